//! Uniform in-memory representation of one parsed web summary and of the
//! per-run accumulation across samples. The parser produces a
//! `ParsedSummary`; the ingest loop folds those into an `Accumulator`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Value shown for every raised alarm.
pub const WARNING_VALUE: &str = "FAIL";

/// Background color of a raised alarm cell.
pub const WARNING_COLOR: &str = "#f06807";

/// Assay a metric belongs to, inferred from the table it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Joint,
    Atac,
    Gex,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Joint => "joint",
            Modality::Atac => "atac",
            Modality::Gex => "gex",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric value coerced from the display string the upstream tool wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    /// Percentage on a 0–100 scale, `%` stripped.
    Percent(f64),
    Text(String),
}

impl MetricValue {
    /// Coerce a display string: thousands separators are dropped, a trailing
    /// `%` makes a percentage, anything non-numeric stays text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let cleaned = trimmed.replace(',', "");

        if let Some(pct) = cleaned.strip_suffix('%') {
            if let Ok(v) = pct.trim().parse::<f64>() {
                return MetricValue::Percent(v);
            }
        }
        if let Ok(v) = cleaned.parse::<i64>() {
            return MetricValue::Int(v);
        }
        match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() => MetricValue::Float(v),
            _ => MetricValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, MetricValue::Percent(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Int(v) => write!(f, "{v}"),
            MetricValue::Float(v) => write!(f, "{v}"),
            MetricValue::Percent(v) => write!(f, "{v}%"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// One named metric of one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub name: String,
    /// The value exactly as the web summary displays it.
    pub raw: String,
    pub value: MetricValue,
    pub description: Option<String>,
    pub modality: Modality,
}

/// Display metadata for one table column.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Header {
    /// Metric name the column reads from.
    pub key: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Cell value → background color.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub bgcols: BTreeMap<String, String>,
    pub hidden: bool,
}

impl Header {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            title: key.clone(),
            key,
            description: description.into(),
            ..Default::default()
        }
    }
}

/// Shared header registry keyed by metric name.
pub type HeaderPool = BTreeMap<String, Header>;

/// Metrics of one sample keyed by metric name.
pub type SampleMetrics = BTreeMap<String, MetricRecord>;

/// A QC alarm raised by the upstream pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarningEntry {
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl WarningEntry {
    /// Column header for this alarm in the warnings table.
    pub fn header(&self) -> Header {
        let mut header = Header::new(self.title.clone(), self.message.clone());
        header
            .bgcols
            .insert(WARNING_VALUE.to_string(), WARNING_COLOR.to_string());
        header
    }
}

/// The four line plots carried by an ARC web summary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    #[value(name = "tss")]
    TssEnrichment,
    InsertSize,
    #[value(name = "saturation")]
    SeqSaturation,
    #[value(name = "genes")]
    GenesPerCell,
}

impl PlotKind {
    pub const ALL: [PlotKind; 4] = [
        PlotKind::TssEnrichment,
        PlotKind::InsertSize,
        PlotKind::SeqSaturation,
        PlotKind::GenesPerCell,
    ];

    /// Key of the plot object inside the web summary JSON.
    pub fn summary_key(&self) -> &'static str {
        match self {
            PlotKind::TssEnrichment => "atac_tss_enrichment_plot",
            PlotKind::InsertSize => "atac_insert_size_plot",
            PlotKind::SeqSaturation => "gex_seq_saturation_plot",
            PlotKind::GenesPerCell => "gex_genes_per_cell_plot",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            PlotKind::TssEnrichment => "atac_tss_enrichment_plot",
            PlotKind::InsertSize => "atac_insert_size_plot",
            PlotKind::SeqSaturation => "gex_saturation_plot",
            PlotKind::GenesPerCell => "gex_genes_plot",
        }
    }

    pub fn section_name(&self) -> &'static str {
        match self {
            PlotKind::TssEnrichment => "ATAC - TSS enrichment plot",
            PlotKind::InsertSize => "ATAC - Insert Size Distribution",
            PlotKind::SeqSaturation => "GEX - Sequencing Saturation",
            PlotKind::GenesPerCell => "GEX - Median Genes per Cell",
        }
    }

    pub fn anchor(&self) -> &'static str {
        match self {
            PlotKind::TssEnrichment => "atac-tss-plot",
            PlotKind::InsertSize => "atac-insert-size-plot",
            PlotKind::SeqSaturation => "gex-saturation-plot",
            PlotKind::GenesPerCell => "gex-genes-plot",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PlotKind::TssEnrichment => "Cell Ranger ARC (ATAC): Enrichment around TSS",
            PlotKind::InsertSize => "Cell Ranger ARC (ATAC): Insert Size Distribution",
            PlotKind::SeqSaturation => "Cell Ranger ARC (GEX): Sequencing Saturation",
            PlotKind::GenesPerCell => "Cell Ranger ARC (GEX): Median Genes per Cell",
        }
    }

    pub fn xlab(&self) -> &'static str {
        match self {
            PlotKind::TssEnrichment => "Relative Position (bp from TSS)",
            PlotKind::InsertSize => "Insert Size",
            PlotKind::SeqSaturation | PlotKind::GenesPerCell => "Mean Read Pairs per Cell",
        }
    }

    pub fn ylab(&self) -> &'static str {
        match self {
            PlotKind::TssEnrichment => "Relative Enrichment",
            PlotKind::InsertSize => "Fragment Count (linear scale)",
            PlotKind::SeqSaturation => "Percent Duplicates",
            PlotKind::GenesPerCell => "Median Genes per Cell",
        }
    }

    pub fn helptext(&self) -> &'static str {
        match self {
            PlotKind::TssEnrichment => {
                "The TSS profile is displayed in the plot. The y-axis scale is normalized \
                 by the minimum signal in the window."
            }
            PlotKind::InsertSize => {
                "Insert size distribution of transposase accessible fragments sequenced \
                 is displayed in the plot."
            }
            PlotKind::SeqSaturation => {
                "This plot shows the Percent Duplicates metric as a function of downsampled \
                 sequencing depth (measured in mean read pairs per cell), up to the observed \
                 sequencing depth. The Percent Duplicates metric is a measure of the \
                 sequencing saturation, and approaches 1.0 (100%) when all converted mRNA \
                 transcripts have been sequenced. The slope of the curve near the endpoint \
                 can be interpreted as an upper bound to the benefit to be gained from \
                 increasing the sequencing depth beyond this point."
            }
            PlotKind::GenesPerCell => {
                "Observed median genes per cell as a function of downsampling rate in mean \
                 read pairs per cell. The slope of the curve near the endpoint can be \
                 interpreted as an upper bound to the benefit to be gained from increasing \
                 the sequencing depth beyond this point."
            }
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One line of a plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub points: Vec<(f64, f64)>,
}

/// All lines one sample contributes to one plot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PlotSeries {
    pub lines: Vec<PlotLine>,
}

impl PlotSeries {
    pub fn point_count(&self) -> usize {
        self.lines.iter().map(|l| l.points.len()).sum()
    }

    /// (min x, max x) over every line, `None` when there are no points.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        self.points().fold(None, |acc, &(x, _)| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
    }

    /// The point with the largest y over every line.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.points()
            .copied()
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                Some(best) if best.1 >= p.1 => Some(best),
                _ => Some(p),
            })
    }

    fn points(&self) -> impl Iterator<Item = &(f64, f64)> {
        self.lines.iter().flat_map(|l| l.points.iter())
    }
}

/// Everything extracted from a single web summary.
#[derive(Debug, Clone, Default)]
pub struct ParsedSummary {
    /// `sample.id` as written in the report, before name cleaning.
    pub sample_id: String,
    pub metrics: SampleMetrics,
    pub headers: HeaderPool,
    pub warnings: Vec<WarningEntry>,
    pub plots: BTreeMap<PlotKind, PlotSeries>,
    pub version: Option<String>,
}

/// A file that could not be parsed and was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Per-run accumulation over every ingested web summary.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    pub samples: BTreeMap<String, SampleMetrics>,
    pub warnings: BTreeMap<String, Vec<WarningEntry>>,
    pub plots: BTreeMap<PlotKind, BTreeMap<String, PlotSeries>>,
    pub headers: HeaderPool,
    pub warning_headers: HeaderPool,
    pub versions: BTreeMap<String, String>,
    pub sources: BTreeMap<String, PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one parsed summary in under `sample`. Everything already stored
    /// for that sample is replaced; headers merge with later files winning.
    pub fn insert(&mut self, sample: &str, parsed: ParsedSummary, source: PathBuf) {
        self.remove(sample);

        self.headers.extend(parsed.headers);
        for warning in &parsed.warnings {
            self.warning_headers
                .insert(warning.title.clone(), warning.header());
        }
        if !parsed.warnings.is_empty() {
            self.warnings.insert(sample.to_string(), parsed.warnings);
        }
        for (kind, series) in parsed.plots {
            self.plots
                .entry(kind)
                .or_default()
                .insert(sample.to_string(), series);
        }
        if let Some(version) = parsed.version {
            self.versions.insert(sample.to_string(), version);
        }
        self.sources.insert(sample.to_string(), source);
        self.samples.insert(sample.to_string(), parsed.metrics);
    }

    pub fn contains(&self, sample: &str) -> bool {
        self.samples.contains_key(sample)
    }

    /// Keep only samples for which `keep` returns true.
    pub fn retain_samples<F>(&mut self, keep: F)
    where
        F: Fn(&str) -> bool,
    {
        self.samples.retain(|s, _| keep(s));
        self.warnings.retain(|s, _| keep(s));
        for series in self.plots.values_mut() {
            series.retain(|s, _| keep(s));
        }
        self.versions.retain(|s, _| keep(s));
        self.sources.retain(|s, _| keep(s));
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn has_plot_data(&self) -> bool {
        self.plots.values().any(|s| !s.is_empty())
    }

    fn remove(&mut self, sample: &str) {
        self.samples.remove(sample);
        self.warnings.remove(sample);
        for series in self.plots.values_mut() {
            series.remove(sample);
        }
        self.versions.remove(sample);
        self.sources.remove(sample);
    }
}
