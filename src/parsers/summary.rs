/// Parser for the decoded Cell Ranger ARC summary.
///
/// The eight metric tables are concatenated in a fixed order (joint, ATAC
/// sequencing, GEX sequencing, ATAC cells, GEX cells, ATAC mapping, GEX
/// mapping, ATAC targeting) together with their help blocks, then
/// normalized into records and headers. Alarms, the four plots and the
/// pipeline version are read alongside.
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::headers::{table_data_and_headers, TaggedRow};
use super::plot::extract_plot_data;
use crate::error::Result;
use crate::model::{ParsedSummary, PlotKind, WarningEntry};
use crate::schema::{RawSummary, Section};

/// Pipeline version string like "cellranger-arc-2.0.1".
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cellranger-arc-([\d.]+)").unwrap());

/// Row of `joint_pipeline_info_table` that holds the version.
const VERSION_ROW: usize = 2;
const VERSION_LABEL: &str = "Pipeline version";

pub fn parse_summary(summary: &RawSummary) -> Result<ParsedSummary> {
    // ── Metrics and headers ───────────────────────────────────────
    let mut rows = Vec::new();
    let mut help = Vec::new();
    for section in Section::ALL {
        let modality = section.modality();
        rows.extend(summary.table(section).rows.iter().map(|r| TaggedRow {
            name: r.0.clone(),
            raw: r.1.as_text(),
            modality,
        }));
        help.extend(
            summary
                .helptext(section)
                .data
                .iter()
                .map(|h| (h.0.clone(), h.1.to_text())),
        );
    }
    let (metrics, headers) = table_data_and_headers(&rows, &help);

    // ── Plots ─────────────────────────────────────────────────────
    let mut plots = std::collections::BTreeMap::new();
    for kind in PlotKind::ALL {
        let series = extract_plot_data(kind.summary_key(), summary.plot(kind))?;
        plots.insert(kind, series);
    }

    Ok(ParsedSummary {
        sample_id: summary.sample.id.clone(),
        metrics,
        headers,
        warnings: extract_warnings(summary),
        plots,
        version: pipeline_version(summary),
    })
}

/// Alarms that carry an `id` key (even a null one), in report order.
pub fn extract_warnings(summary: &RawSummary) -> Vec<WarningEntry> {
    summary
        .alarms
        .alarms
        .iter()
        .filter(|a| a.id.is_some())
        .map(|a| WarningEntry {
            title: a.title.clone(),
            message: a.message.clone(),
            level: a.level.clone(),
        })
        .collect()
}

/// Version number from the "Pipeline version" row, if it can be found.
pub fn pipeline_version(summary: &RawSummary) -> Option<String> {
    let sample = &summary.sample.id;
    let Some(table) = &summary.joint_pipeline_info_table else {
        debug!("Unable to parse version for sample {sample}: no pipeline info table");
        return None;
    };
    let Some(row) = table.rows.get(VERSION_ROW) else {
        debug!("Unable to parse version for sample {sample}: pipeline info table too short");
        return None;
    };
    if row.0 != VERSION_LABEL {
        debug!(
            "Unable to parse version for sample {sample}: expected '{VERSION_LABEL}', found '{}'",
            row.0
        );
        return None;
    }
    let value = row.1.as_text();
    match VERSION_RE.captures(&value) {
        Some(caps) => Some(caps[1].to_string()),
        None => {
            debug!("Unable to parse version for sample {sample}: '{value}'");
            None
        }
    }
}
