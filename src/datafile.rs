//! Flat-file dump of parsed results, one file per concern.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{ArcQcError, Result};
use crate::model::{Accumulator, MetricValue, PlotKind};

/// Basename of the sample × metric table.
pub const DATA_FILE_STEM: &str = "arcqc_cellranger_arc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DataFormat {
    #[default]
    Tsv,
    Json,
}

impl DataFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DataFormat::Tsv => "tsv",
            DataFormat::Json => "json",
        }
    }
}

/// Write metrics, sources and plot points under `dir`, creating it if
/// needed. Returns the files written.
pub fn write_data_files(acc: &Accumulator, dir: &Path, format: DataFormat) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let metrics_path = dir.join(format!("{DATA_FILE_STEM}.{}", format.extension()));
    match format {
        DataFormat::Tsv => write_metrics_tsv(acc, &metrics_path)?,
        DataFormat::Json => write_metrics_json(acc, &metrics_path)?,
    }
    written.push(metrics_path);

    let sources_path = dir.join("arcqc_sources.tsv");
    let mut wtr = tsv_writer(&sources_path)?;
    wtr.write_record(["Sample", "Source"])?;
    for (sample, source) in &acc.sources {
        let source = source.to_string_lossy();
        wtr.write_record([sample.as_str(), source.as_ref()])?;
    }
    wtr.flush()?;
    written.push(sources_path);

    for kind in PlotKind::ALL {
        let series = match acc.plots.get(&kind) {
            Some(s) if !s.is_empty() => s,
            _ => continue,
        };
        let path = dir.join(format!("arcqc_{}.tsv", kind.id()));
        let mut wtr = tsv_writer(&path)?;
        wtr.write_record(["Sample", "Series", "x", "y"])?;
        for (sample, plot) in series {
            for line in &plot.lines {
                let name = line.name.as_deref().unwrap_or("");
                for (x, y) in &line.points {
                    let (x, y) = (x.to_string(), y.to_string());
                    wtr.write_record([sample.as_str(), name, x.as_str(), y.as_str()])?;
                }
            }
        }
        wtr.flush()?;
        written.push(path);
    }

    info!("Wrote {} data files to {}", written.len(), dir.display());
    Ok(written)
}

fn tsv_writer(path: &Path) -> Result<csv::Writer<File>> {
    Ok(csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)?)
}

/// Sample rows, one column per metric name seen in any sample.
fn write_metrics_tsv(acc: &Accumulator, path: &Path) -> Result<()> {
    let columns: BTreeSet<&str> = acc
        .samples
        .values()
        .flat_map(|m| m.keys().map(String::as_str))
        .collect();

    let mut wtr = tsv_writer(path)?;
    wtr.write_record(std::iter::once("Sample").chain(columns.iter().copied()))?;
    for (sample, metrics) in &acc.samples {
        let mut record = vec![sample.clone()];
        record.extend(columns.iter().map(|c| match metrics.get(*c) {
            Some(m) => plain_value(&m.value),
            None => String::new(),
        }));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Numbers without separators or `%`, so downstream tools read them as numbers.
fn plain_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Percent(v) => v.to_string(),
        other => other.to_string(),
    }
}

/// `{sample: {metric: value}}`
fn write_metrics_json(acc: &Accumulator, path: &Path) -> Result<()> {
    let dump: BTreeMap<&str, BTreeMap<&str, &MetricValue>> = acc
        .samples
        .iter()
        .map(|(sample, metrics)| {
            let values = metrics.iter().map(|(k, m)| (k.as_str(), &m.value)).collect();
            (sample.as_str(), values)
        })
        .collect();
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, &dump)
        .map_err(|e| ArcQcError::Other(format!("Failed to write {}: {e}", path.display())))?;
    Ok(())
}
