/// Turns concatenated `(name, value)` rows and `(name, description)` help
/// entries into per-sample metric records plus the shared column headers,
/// and carves per-section column subsets out of that shared pool.
///
/// Pairing policy:
///   - every row becomes a record; a later row with the same name replaces
///     an earlier one
///   - a header exists only for names present in both rows and help text
///   - help entries naming no row are dropped
use std::collections::HashMap;

use log::debug;

use crate::model::{Header, HeaderPool, MetricRecord, MetricValue, Modality, SampleMetrics};

/// One metric row tagged with the assay of the table it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRow {
    pub name: String,
    pub raw: String,
    pub modality: Modality,
}

/// Build the metric records of one sample and the headers describing them.
pub fn table_data_and_headers(
    rows: &[TaggedRow],
    help: &[(String, String)],
) -> (SampleMetrics, HeaderPool) {
    let descriptions: HashMap<&str, &str> = help
        .iter()
        .map(|(name, desc)| (name.as_str(), desc.as_str()))
        .collect();

    let mut metrics = SampleMetrics::new();
    for row in rows {
        let record = MetricRecord {
            name: row.name.clone(),
            raw: row.raw.clone(),
            value: MetricValue::parse(&row.raw),
            description: descriptions.get(row.name.as_str()).map(|d| d.to_string()),
            modality: row.modality,
        };
        if let Some(prev) = metrics.insert(row.name.clone(), record) {
            debug!(
                "Metric '{}' appears more than once ({} then {}), keeping the later value",
                row.name, prev.modality, row.modality
            );
        }
    }

    let mut headers = HeaderPool::new();
    for record in metrics.values() {
        let description = match &record.description {
            Some(d) => d,
            None => continue,
        };
        let mut header = Header::new(record.name.clone(), description.clone());
        if record.value.is_percent() {
            header.suffix = Some("%".to_string());
            header.min = Some(0.0);
            header.max = Some(100.0);
        }
        headers.insert(record.name.clone(), header);
    }

    (metrics, headers)
}

/// Pick `columns` (metric name, color scale) out of `pool`, in the given
/// order. Names missing from the pool are skipped.
pub fn subset_headers(
    pool: &HeaderPool,
    columns: &[(&str, &str)],
    namespace: Option<&str>,
) -> Vec<Header> {
    columns
        .iter()
        .filter_map(|&(name, scale)| {
            let mut header = pool.get(name)?.clone();
            header.scale = Some(scale.to_string());
            if let Some(ns) = namespace {
                header.namespace = Some(ns.to_string());
            }
            Some(header)
        })
        .collect()
}

/// Mark the named columns hidden by default.
pub fn set_hidden(headers: &mut [Header], names: &[&str]) {
    for header in headers.iter_mut() {
        if names.contains(&header.key.as_str()) {
            header.hidden = true;
        }
    }
}
