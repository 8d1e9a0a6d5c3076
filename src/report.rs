//! Report assembly and output formatting.
//!
//! `build_report` turns an `Accumulator` into an ordered list of table and
//! line-plot sections; a `ReportFormatter` renders that list.

use std::collections::BTreeMap;
use std::fmt::Write;

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::model::{
    Accumulator, FileFailure, Header, HeaderPool, PlotKind, PlotSeries, WARNING_VALUE,
};
use crate::parsers::headers::{set_hidden, subset_headers};

// ── Column selections ────────────────────────────────────────────────

/// Columns contributed to the general statistics table.
pub const GENERAL_COLUMNS: &[(&str, &str)] = &[
    ("Estimated number of cells", "YlGn"),
    ("Fraction of high-quality fragments in cells", "Blues"),
    ("Median genes per cell", "GnBu"),
    ("Feature linkages detected", "PuBuGn"),
    ("Linked genes", "RdYlGn"),
    ("Linked peaks", "RdYlBu"),
];

pub const ATAC_SEQ_TARGET_COLUMNS: &[(&str, &str)] = &[
    ("Sequenced read pairs", "YlGn"),
    ("Valid barcodes", "RdPu"),
    ("Percent duplicates", "Blues"),
    ("Number of peaks", "Greens"),
    ("Fraction of genome in peaks", "Purples"),
    ("TSS enrichment score", "PuBuGn"),
    ("Fraction of high-quality fragments overlapping peaks", "Spectral"),
];

pub const ATAC_CELL_MAPPING_COLUMNS: &[(&str, &str)] = &[
    ("Estimated number of cells", "YlGn"),
    ("Mean raw read pairs per cell", "RdPu"),
    ("Fraction of high-quality fragments in cells", "Blues"),
    ("Fraction of transposition events in peaks in cells", "Greens"),
    ("Median high-quality fragments per cell", "Purples"),
    ("Confidently mapped read pairs", "PuBuGn"),
    ("Non-nuclear read pairs", "Spectral"),
];

pub const GEX_COLUMNS: &[(&str, &str)] = &[
    ("Sequenced read pairs", "YlGn"),
    ("Estimated number of cells", "RdPu"),
    ("Mean raw reads per cell", "Blues"),
    ("Total genes detected", "Greens"),
    ("Median genes per cell", "Purples"),
    ("Fraction of transcriptomic reads in cells", "PuBuGn"),
    ("Reads with TSO", "YlOrRd"),
    ("Valid barcodes", "Spectral"),
    ("Valid UMIs", "RdYlGn"),
    ("Median UMI counts per cell", "YlGn"),
    ("Percent duplicates", "RdPu"),
    ("Q30 bases in barcode", "Blues"),
    ("Q30 bases in UMI", "Greens"),
    ("Reads mapped to genome", "Purples"),
    ("Reads mapped confidently to genome", "PuBuGn"),
    ("Reads mapped confidently to transcriptome", "YlOrRd"),
    ("Reads mapped confidently to exonic regions", "Spectral"),
    ("Reads mapped confidently to intronic regions", "RdYlGn"),
    ("Reads mapped confidently to intergenic regions", "YlGn"),
    ("Reads mapped antisense to gene", "RdPu"),
];

/// GEX columns hidden unless asked for.
pub const GEX_HIDDEN_COLUMNS: &[&str] = &[
    "Percent duplicates",
    "Q30 bases in barcode",
    "Q30 bases in UMI",
    "Reads mapped to genome",
    "Reads mapped confidently to genome",
    "Reads mapped confidently to transcriptome",
    "Reads mapped confidently to exonic regions",
    "Reads mapped confidently to intronic regions",
    "Reads mapped confidently to intergenic regions",
    "Reads mapped antisense to gene",
];

// ── Sections ─────────────────────────────────────────────────────────

/// One sample's cells, aligned with the table's headers.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub sample: String,
    pub cells: Vec<Option<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSection {
    pub name: String,
    pub anchor: String,
    pub description: String,
    pub id: String,
    pub title: String,
    pub headers: Vec<Header>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotSection {
    pub kind: PlotKind,
    pub name: String,
    pub anchor: String,
    pub description: String,
    pub helptext: String,
    pub id: String,
    pub title: String,
    pub xlab: String,
    pub ylab: String,
    pub series: BTreeMap<String, PlotSeries>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportSection {
    Table(TableSection),
    LineGraph(PlotSection),
}

impl ReportSection {
    pub fn name(&self) -> &str {
        match self {
            ReportSection::Table(t) => &t.name,
            ReportSection::LineGraph(p) => &p.name,
        }
    }
}

/// Everything needed to render one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub sample_count: usize,
    /// Sample → Cell Ranger ARC version.
    pub versions: BTreeMap<String, String>,
    pub failures: Vec<FileFailure>,
    pub sections: Vec<ReportSection>,
}

impl Report {
    /// Format using a specific formatter.
    pub fn format(&self, formatter: &dyn ReportFormatter) -> Result<String> {
        formatter.format(self)
    }

    pub fn section(&self, name: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.name() == name)
    }
}

struct TableSpec<'a> {
    name: &'a str,
    anchor: &'a str,
    description: &'a str,
    id: &'a str,
    title: &'a str,
}

/// Build every section for the samples in `acc`, in display order.
pub fn build_report(acc: &Accumulator) -> Report {
    let mut sections = Vec::new();

    let general = subset_headers(&acc.headers, GENERAL_COLUMNS, None);
    sections.push(metrics_table(
        acc,
        &TableSpec {
            name: "General Statistics",
            anchor: "general_stats",
            description: "Cell Ranger ARC key metrics",
            id: "general_stats_table",
            title: "General Statistics",
        },
        general,
    ));

    if !acc.warnings.is_empty() {
        sections.push(warnings_table(acc));
    }

    let seq_target = subset_headers(&acc.headers, ATAC_SEQ_TARGET_COLUMNS, Some("ATAC"));
    sections.push(metrics_table(
        acc,
        &TableSpec {
            name: "ATAC - Summary stats",
            anchor: "cellranger-atac-stats",
            description: "ATAC: Sequencing & Targeting metrics",
            id: "cellranger-atac-stats-table1",
            title: "ATAC: Sequencing & Targeting metrics",
        },
        seq_target,
    ));

    let cell_mapping = subset_headers(&acc.headers, ATAC_CELL_MAPPING_COLUMNS, Some("ATAC"));
    sections.push(metrics_table(
        acc,
        &TableSpec {
            name: "ATAC - Cell & Mapping metrics",
            anchor: "cellranger-atac-cell-mapping",
            description: "ATAC: Cell & Mapping metrics",
            id: "cellranger-atac-stats-table2",
            title: "ATAC: Cell & Mapping metrics",
        },
        cell_mapping,
    ));

    let mut gex = subset_headers(&acc.headers, GEX_COLUMNS, Some("GEX"));
    set_hidden(&mut gex, GEX_HIDDEN_COLUMNS);
    sections.push(metrics_table(
        acc,
        &TableSpec {
            name: "GEX - Summary stats",
            anchor: "cellranger-gex-stats",
            description: "GEX: Gene Expression metrics",
            id: "cellranger-gex-stats-table",
            title: "GEX: Gene Expression metrics",
        },
        gex,
    ));

    if acc.has_plot_data() {
        for kind in PlotKind::ALL {
            let series = acc.plots.get(&kind).cloned().unwrap_or_default();
            sections.push(ReportSection::LineGraph(plot_section(kind, series)));
        }
    }

    // Tables whose columns are all absent from the reports are left out.
    sections.retain(|s| match s {
        ReportSection::Table(t) if t.headers.is_empty() => {
            debug!("No columns available for '{}', skipping", t.name);
            false
        }
        _ => true,
    });

    Report {
        sample_count: acc.sample_count(),
        versions: acc.versions.clone(),
        failures: acc.failures.clone(),
        sections,
    }
}

fn metrics_table(acc: &Accumulator, spec: &TableSpec, headers: Vec<Header>) -> ReportSection {
    let rows = acc
        .samples
        .iter()
        .map(|(sample, metrics)| TableRow {
            sample: sample.clone(),
            cells: headers
                .iter()
                .map(|h| metrics.get(&h.key).map(|m| m.raw.clone()))
                .collect(),
        })
        .filter(|r| r.cells.iter().any(Option::is_some))
        .collect();
    ReportSection::Table(TableSection {
        name: spec.name.to_string(),
        anchor: spec.anchor.to_string(),
        description: spec.description.to_string(),
        id: spec.id.to_string(),
        title: spec.title.to_string(),
        headers,
        rows,
    })
}

fn warnings_table(acc: &Accumulator) -> ReportSection {
    let headers: Vec<Header> = warning_columns(&acc.warning_headers, &acc.warnings)
        .into_iter()
        .map(|mut h| {
            h.namespace = Some("ARC".to_string());
            h
        })
        .collect();
    let rows = acc
        .warnings
        .iter()
        .map(|(sample, warnings)| TableRow {
            sample: sample.clone(),
            cells: headers
                .iter()
                .map(|h| {
                    warnings
                        .iter()
                        .any(|w| w.title == h.key)
                        .then(|| WARNING_VALUE.to_string())
                })
                .collect(),
        })
        .collect();
    ReportSection::Table(TableSection {
        name: "ARC - Warnings".to_string(),
        anchor: "cellranger-arc-warnings".to_string(),
        description: "Warnings encountered during the analysis".to_string(),
        id: "cellranger-arc-warnings-table".to_string(),
        title: "Cellranger ARC: Warnings".to_string(),
        headers,
        rows,
    })
}

/// Headers of alarms raised by at least one remaining sample.
fn warning_columns(
    pool: &HeaderPool,
    warnings: &BTreeMap<String, Vec<crate::model::WarningEntry>>,
) -> Vec<Header> {
    pool.values()
        .filter(|h| warnings.values().flatten().any(|w| w.title == h.key))
        .cloned()
        .collect()
}

fn plot_section(kind: PlotKind, series: BTreeMap<String, PlotSeries>) -> PlotSection {
    let description = match kind {
        PlotKind::TssEnrichment => "Transcription Start Site (TSS) Plot",
        PlotKind::InsertSize => "Insert Size Distribution Plot",
        PlotKind::SeqSaturation => "Sequencing Saturation Plot",
        PlotKind::GenesPerCell => "Median Genes per Cell Plot",
    };
    PlotSection {
        kind,
        name: kind.section_name().to_string(),
        anchor: kind.anchor().to_string(),
        description: description.to_string(),
        helptext: kind.helptext().to_string(),
        id: format!("mqc_{}", kind.id()),
        title: kind.title().to_string(),
        xlab: kind.xlab().to_string(),
        ylab: kind.ylab().to_string(),
        series,
    }
}

// ── Formatters ───────────────────────────────────────────────────────

/// Trait for formatting reports.
pub trait ReportFormatter {
    /// Format the report to a string.
    fn format(&self, report: &Report) -> Result<String>;
}

/// Plain text formatter.
#[derive(Default)]
pub struct TextFormatter {
    pub show_hidden: bool,
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut out = String::new();
        let count = report.sample_count;
        writeln!(out, "Cell Ranger ARC: {count} sample(s)").unwrap();
        for (sample, version) in &report.versions {
            writeln!(out, "  {sample}: cellranger-arc {version}").unwrap();
        }
        if !report.failures.is_empty() {
            let n = report.failures.len();
            writeln!(out, "Skipped {n} unreadable report(s):").unwrap();
            for f in &report.failures {
                writeln!(out, "  {}", f.message).unwrap();
            }
        }

        for section in &report.sections {
            out.push('\n');
            match section {
                ReportSection::Table(t) => {
                    writeln!(out, "== {} ==", t.name).unwrap();
                    let headers = visible(&t.headers, self.show_hidden);
                    let mut grid: Vec<Vec<String>> = Vec::with_capacity(t.rows.len() + 1);
                    grid.push(
                        std::iter::once("Sample".to_string())
                            .chain(headers.iter().map(|(_, h)| h.title.clone()))
                            .collect(),
                    );
                    for row in &t.rows {
                        grid.push(
                            std::iter::once(row.sample.clone())
                                .chain(headers.iter().map(|&(i, _)| cell(row, i).to_string()))
                                .collect(),
                        );
                    }
                    write_grid(&mut out, &grid);
                }
                ReportSection::LineGraph(p) => {
                    writeln!(out, "== {} ==", p.name).unwrap();
                    writeln!(out, "{} vs {}", p.ylab, p.xlab).unwrap();
                    if p.series.is_empty() {
                        writeln!(out, "  (no data)").unwrap();
                    }
                    for (sample, series) in &p.series {
                        writeln!(out, "  {sample}  {}", describe_series(series)).unwrap();
                    }
                }
            }
        }
        Ok(out)
    }
}

/// Markdown formatter.
#[derive(Default)]
pub struct MarkdownFormatter {
    pub show_hidden: bool,
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut md = String::new();
        let count = report.sample_count;
        writeln!(md, "## Cell Ranger ARC\n").unwrap();
        writeln!(md, "**{count}** sample(s) reported.").unwrap();
        if !report.versions.is_empty() {
            let versions: Vec<String> = report
                .versions
                .iter()
                .map(|(s, v)| format!("`{s}` {v}"))
                .collect();
            writeln!(md, "\nVersions: {}", versions.join(", ")).unwrap();
        }
        if !report.failures.is_empty() {
            md.push_str("\n<details>\n<summary>Skipped reports</summary>\n\n");
            for f in &report.failures {
                writeln!(md, "- `{}`: {}", f.path.display(), f.message).unwrap();
            }
            md.push_str("\n</details>\n");
        }

        for section in &report.sections {
            match section {
                ReportSection::Table(t) => {
                    writeln!(md, "\n### {}\n", t.name).unwrap();
                    writeln!(md, "{}\n", t.description).unwrap();
                    let headers = visible(&t.headers, self.show_hidden);
                    md.push_str("| Sample |");
                    for (_, h) in &headers {
                        write!(md, " {} |", h.title).unwrap();
                    }
                    md.push_str("\n|:-----|");
                    for _ in &headers {
                        md.push_str("-----:|");
                    }
                    md.push('\n');
                    for row in &t.rows {
                        write!(md, "| `{}` |", row.sample).unwrap();
                        for &(i, _) in &headers {
                            write!(md, " {} |", cell(row, i)).unwrap();
                        }
                        md.push('\n');
                    }
                    let described: Vec<_> = headers
                        .iter()
                        .filter(|(_, h)| !h.description.is_empty())
                        .collect();
                    if !described.is_empty() {
                        md.push_str("\n<details>\n<summary>Column descriptions</summary>\n\n");
                        for (_, h) in described {
                            writeln!(md, "- **{}**: {}", h.title, h.description).unwrap();
                        }
                        md.push_str("\n</details>\n");
                    }
                }
                ReportSection::LineGraph(p) => {
                    writeln!(md, "\n### {}\n", p.name).unwrap();
                    writeln!(md, "{}\n", p.helptext).unwrap();
                    md.push_str("| Sample | Points | X range | Peak |\n");
                    md.push_str("|:-----|-----:|-----:|-----:|\n");
                    for (sample, series) in &p.series {
                        let range = series
                            .x_range()
                            .map(|(lo, hi)| format!("{lo} – {hi}"))
                            .unwrap_or_default();
                        let peak = series
                            .peak()
                            .map(|(x, y)| format!("{y} at {x}"))
                            .unwrap_or_default();
                        let points = series.point_count();
                        writeln!(md, "| `{sample}` | {points} | {range} | {peak} |").unwrap();
                    }
                }
            }
        }
        Ok(md)
    }
}

/// JSON formatter: the whole report, plot series included.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut out = serde_json::to_string_pretty(report)
            .map_err(|e| crate::error::ArcQcError::Other(format!("JSON output failed: {e}")))?;
        out.push('\n');
        Ok(out)
    }
}

fn visible(headers: &[Header], show_hidden: bool) -> Vec<(usize, &Header)> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| show_hidden || !h.hidden)
        .collect()
}

fn cell(row: &TableRow, idx: usize) -> &str {
    row.cells
        .get(idx)
        .and_then(|c| c.as_deref())
        .unwrap_or("-")
}

fn write_grid(out: &mut String, grid: &[Vec<String>]) {
    let columns = grid.first().map_or(0, Vec::len);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            grid.iter()
                .map(|r| r[c].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    for (i, row) in grid.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (v, &w))| {
                if c == 0 {
                    format!("{v:<w$}")
                } else {
                    format!("{v:>w$}")
                }
            })
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end()).unwrap();
        if i == 0 {
            let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
            writeln!(out, "{}", "-".repeat(total)).unwrap();
        }
    }
}

fn describe_series(series: &PlotSeries) -> String {
    let points = series.point_count();
    let mut desc = format!("{points} points");
    if series.lines.len() > 1 {
        write!(desc, " in {} lines", series.lines.len()).unwrap();
    }
    if let Some((lo, hi)) = series.x_range() {
        write!(desc, ", x {lo}..{hi}").unwrap();
    }
    if let Some((x, y)) = series.peak() {
        write!(desc, ", peak {y} at {x}").unwrap();
    }
    desc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        MetricRecord, MetricValue, Modality, ParsedSummary, PlotLine, WarningEntry,
    };
    use std::path::PathBuf;

    fn record(name: &str, raw: &str) -> MetricRecord {
        MetricRecord {
            name: name.to_string(),
            raw: raw.to_string(),
            value: MetricValue::parse(raw),
            description: Some(format!("about {name}")),
            modality: Modality::Joint,
        }
    }

    fn parsed(metrics: &[(&str, &str)]) -> ParsedSummary {
        let mut p = ParsedSummary::default();
        for &(name, raw) in metrics {
            p.metrics.insert(name.to_string(), record(name, raw));
            p.headers
                .insert(name.to_string(), Header::new(name, format!("about {name}")));
        }
        p
    }

    fn table<'a>(report: &'a Report, name: &str) -> &'a TableSection {
        match report.section(name) {
            Some(ReportSection::Table(t)) => t,
            other => panic!("no table '{name}': {other:?}"),
        }
    }

    #[test]
    fn test_general_stats_columns() {
        let mut acc = Accumulator::new();
        acc.insert(
            "A",
            parsed(&[("Linked genes", "1,234"), ("Estimated number of cells", "9,000")]),
            PathBuf::from("a"),
        );
        let report = build_report(&acc);
        let general = table(&report, "General Statistics");
        let keys: Vec<_> = general.headers.iter().map(|h| h.key.as_str()).collect();
        // Follows the column list order, not the pool order
        assert_eq!(keys, vec!["Estimated number of cells", "Linked genes"]);
        assert_eq!(
            general.rows[0].cells,
            vec![Some("9,000".to_string()), Some("1,234".to_string())]
        );
        assert_eq!(general.headers[0].scale.as_deref(), Some("YlGn"));
    }

    #[test]
    fn test_empty_tables_skipped() {
        let mut acc = Accumulator::new();
        acc.insert("A", parsed(&[("Linked genes", "1")]), PathBuf::from("a"));
        let report = build_report(&acc);
        assert!(report.section("GEX - Summary stats").is_none());
        assert!(report.section("ARC - Warnings").is_none());
    }

    #[test]
    fn test_gex_hidden_columns() {
        let mut acc = Accumulator::new();
        acc.insert(
            "A",
            parsed(&[("Reads with TSO", "3.2%"), ("Q30 bases in UMI", "91.0%")]),
            PathBuf::from("a"),
        );
        let report = build_report(&acc);
        let gex = table(&report, "GEX - Summary stats");
        assert_eq!(gex.headers.len(), 2);
        assert!(!gex.headers[0].hidden);
        assert!(gex.headers[1].hidden);
        assert_eq!(gex.headers[1].namespace.as_deref(), Some("GEX"));

        let text = report.format(&TextFormatter::default()).unwrap();
        assert!(text.contains("Reads with TSO"));
        assert!(!text.contains("Q30 bases in UMI"));

        let text = report
            .format(&TextFormatter { show_hidden: true })
            .unwrap();
        assert!(text.contains("Q30 bases in UMI"));
    }

    #[test]
    fn test_warnings_table() {
        let mut acc = Accumulator::new();
        let mut a = parsed(&[("Linked genes", "1")]);
        a.warnings.push(WarningEntry {
            title: "Low Fraction Reads in Peaks".into(),
            message: "Ideal > 25%".into(),
            level: Some("WARN".into()),
        });
        acc.insert("A", a, PathBuf::from("a"));
        acc.insert("B", parsed(&[("Linked genes", "2")]), PathBuf::from("b"));

        let report = build_report(&acc);
        let warnings = table(&report, "ARC - Warnings");
        assert_eq!(warnings.rows.len(), 1);
        assert_eq!(warnings.rows[0].sample, "A");
        assert_eq!(warnings.rows[0].cells, vec![Some("FAIL".to_string())]);
        assert_eq!(warnings.headers[0].namespace.as_deref(), Some("ARC"));

        let md = report.format(&MarkdownFormatter::default()).unwrap();
        assert!(md.contains("### ARC - Warnings"));
        assert!(md.contains("| `A` | FAIL |"));
        assert!(md.contains("**Low Fraction Reads in Peaks**: Ideal > 25%"));
    }

    #[test]
    fn test_plot_sections() {
        let mut acc = Accumulator::new();
        let mut a = parsed(&[("Linked genes", "1")]);
        a.plots.insert(
            PlotKind::TssEnrichment,
            PlotSeries {
                lines: vec![PlotLine {
                    name: None,
                    points: vec![(-100.0, 1.0), (0.0, 7.5), (100.0, 1.0)],
                }],
            },
        );
        acc.insert("A", a, PathBuf::from("a"));

        let report = build_report(&acc);
        let plots: Vec<_> = report
            .sections
            .iter()
            .filter_map(|s| match s {
                ReportSection::LineGraph(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(plots.len(), 4);
        assert_eq!(plots[0].id, "mqc_atac_tss_enrichment_plot");
        assert_eq!(plots[0].series["A"].point_count(), 3);
        assert!(plots[1].series.is_empty());

        let text = report.format(&TextFormatter::default()).unwrap();
        assert!(text.contains("A  3 points, x -100..100, peak 7.5 at 0"));
    }

    #[test]
    fn test_no_plot_sections_without_data() {
        let mut acc = Accumulator::new();
        acc.insert("A", parsed(&[("Linked genes", "1")]), PathBuf::from("a"));
        let report = build_report(&acc);
        assert!(report
            .sections
            .iter()
            .all(|s| matches!(s, ReportSection::Table(_))));
    }

    #[test]
    fn test_text_header_and_versions() {
        let mut acc = Accumulator::new();
        let mut a = parsed(&[("Linked genes", "1")]);
        a.version = Some("2.0.1".into());
        acc.insert("A", a, PathBuf::from("a"));
        let text = build_report(&acc)
            .format(&TextFormatter::default())
            .unwrap();
        assert!(text.starts_with("Cell Ranger ARC: 1 sample(s)\n"));
        assert!(text.contains("A: cellranger-arc 2.0.1"));
        assert!(text.contains("== General Statistics =="));
    }

    #[test]
    fn test_json_formatter() {
        let mut acc = Accumulator::new();
        acc.insert("A", parsed(&[("Linked genes", "1")]), PathBuf::from("a"));
        let json = build_report(&acc).format(&JsonFormatter).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sample_count"], 1);
        assert_eq!(value["sections"][0]["type"], "table");
        assert_eq!(value["sections"][0]["rows"][0]["sample"], "A");
    }
}
