//! Command handler functions for the arcqc CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::datafile::{write_data_files, DataFormat};
use crate::ingest::{ingest_paths, parse_file, IngestOptions};
use crate::model::PlotKind;
use crate::report::{self, JsonFormatter, MarkdownFormatter, ReportFormatter, TextFormatter};

/// Output style for the `report` command.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum Style {
    #[default]
    Text,
    Markdown,
    Json,
}

/// Options of the `report` command beyond ingest.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub style: Style,
    pub show_hidden: bool,
    pub data_dir: Option<PathBuf>,
    pub data_format: DataFormat,
}

pub fn cmd_report(inputs: &[PathBuf], opts: &IngestOptions, report_opts: &ReportOptions) -> Result<String> {
    let acc = ingest_paths(inputs, opts)?;

    if let Some(dir) = &report_opts.data_dir {
        write_data_files(&acc, dir, report_opts.data_format)
            .with_context(|| format!("Failed to write data files to {}", dir.display()))?;
    }

    let report = report::build_report(&acc);
    let show_hidden = report_opts.show_hidden;
    let formatter: Box<dyn ReportFormatter> = match report_opts.style {
        Style::Text => Box::new(TextFormatter { show_hidden }),
        Style::Markdown => Box::new(MarkdownFormatter { show_hidden }),
        Style::Json => Box::new(JsonFormatter),
    };
    Ok(report.format(formatter.as_ref())?)
}

/// Every metric, alarm and plot of a single web summary.
pub fn cmd_inspect(file: &Path) -> Result<String> {
    let parsed = parse_file(file).with_context(|| format!("Failed to parse {}", file.display()))?;
    let Some(parsed) = parsed else {
        return Ok(format!("No summary data found in {}\n", file.display()));
    };

    let mut out = String::new();
    writeln!(out, "Sample:    {}", parsed.sample_id).unwrap();
    writeln!(
        out,
        "Version:   {}",
        parsed.version.as_deref().unwrap_or("unknown")
    )
    .unwrap();
    writeln!(out, "Metrics:   {}", parsed.metrics.len()).unwrap();
    for record in parsed.metrics.values() {
        writeln!(
            out,
            "  [{:<5}] {:<55} {}",
            record.modality.as_str(),
            record.name,
            record.raw
        )
        .unwrap();
        if let Some(desc) = &record.description {
            writeln!(out, "          {desc}").unwrap();
        }
    }

    if parsed.warnings.is_empty() {
        writeln!(out, "Warnings:  none").unwrap();
    } else {
        writeln!(out, "Warnings:  {}", parsed.warnings.len()).unwrap();
        for w in &parsed.warnings {
            writeln!(out, "  {}: {}", w.title, w.message).unwrap();
        }
    }

    writeln!(out, "Plots:").unwrap();
    for (kind, series) in &parsed.plots {
        writeln!(out, "  {:<28} {} points", kind.id(), series.point_count()).unwrap();
    }
    Ok(out)
}

/// Tab-separated points of one plot for every sample.
pub fn cmd_plot(inputs: &[PathBuf], opts: &IngestOptions, kind: PlotKind) -> Result<String> {
    let acc = ingest_paths(inputs, opts)?;

    let mut out = String::new();
    writeln!(out, "Sample\tSeries\t{}\t{}", kind.xlab(), kind.ylab()).unwrap();
    if let Some(series) = acc.plots.get(&kind) {
        for (sample, plot) in series {
            for line in &plot.lines {
                let name = line.name.as_deref().unwrap_or("");
                for (x, y) in &line.points {
                    writeln!(out, "{sample}\t{name}\t{x}\t{y}").unwrap();
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_inspect_without_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("web_summary.html");
        std::fs::write(&path, "<html></html>\n").unwrap();

        let out = cmd_inspect(&path).unwrap();
        assert!(out.starts_with("No summary data found in"));
    }

    #[test]
    fn test_cmd_inspect_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("web_summary.html");
        std::fs::write(&path, "const data = {oops\n").unwrap();

        let err = cmd_inspect(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid JSON on line 1"));
    }

    #[test]
    fn test_cmd_report_no_samples() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_report(
            &[dir.path().to_path_buf()],
            &IngestOptions::default(),
            &ReportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::ArcQcError>(),
            Some(crate::error::ArcQcError::NoSamplesFound)
        ));
    }
}
