//! Typed view of the JSON blob embedded in a Cell Ranger ARC web summary.
//!
//! Only the sections read by this crate are modelled; unknown keys are
//! ignored. Required sections are plain fields so that a missing one fails
//! the decode with serde's "missing field `...`" message.
//!
//! ```text
//! {
//!   "sample": {"id": "pbmc_10k"},
//!   "joint_pipeline_info_table": {"rows": [["Sample ID", ...], ..., ["Pipeline version", "cellranger-arc-2.0.1"]]},
//!   "joint_metrics_table": {"rows": [["Estimated number of cells", "11,909"], ...]},
//!   "joint_metrics_helptext": {"data": [["Estimated number of cells", ["The number of barcodes ..."]], ...]},
//!   ...
//!   "alarms": {"alarms": [{"id": "...", "title": "...", "message": "...", "level": "WARN"}]},
//!   "atac_tss_enrichment_plot": {"plot": {"data": [{"x": [...], "y": [...]}], "layout": {...}}},
//!   ...
//! }
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ArcQcError, Result};
use crate::model::Modality;

#[derive(Debug, Clone, Deserialize)]
pub struct RawSummary {
    pub sample: SampleInfo,

    #[serde(default)]
    pub joint_pipeline_info_table: Option<Table>,

    pub joint_metrics_table: Table,
    pub atac_sequencing_table: Table,
    pub gex_sequencing_table: Table,
    pub atac_cells_table: Table,
    pub gex_cells_table: Table,
    pub atac_mapping_table: Table,
    pub gex_mapping_table: Table,
    pub atac_targeting_table: Table,

    pub joint_metrics_helptext: HelpText,
    pub atac_sequencing_helptext: HelpText,
    pub gex_sequencing_helptext: HelpText,
    pub atac_cells_helptext: HelpText,
    pub gex_cells_helptext: HelpText,
    pub atac_mapping_helptext: HelpText,
    pub gex_mapping_helptext: HelpText,
    pub atac_targeting_helptext: HelpText,

    #[serde(default)]
    pub alarms: AlarmBlock,

    pub atac_tss_enrichment_plot: Value,
    pub atac_insert_size_plot: Value,
    pub gex_seq_saturation_plot: Value,
    pub gex_genes_per_cell_plot: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleInfo {
    pub id: String,
}

/// A `{"rows": [[name, value], ...]}` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row(pub String, pub Cell);

/// Table cells are display strings, occasionally bare numbers. Anything
/// else is passed through as its JSON text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(serde_json::Number),
    Other(Value),
}

impl Cell {
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Other(Value::Null) => String::new(),
            Cell::Other(v) => v.to_string(),
        }
    }
}

/// A `{"data": [[name, description], ...]}` help block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HelpText {
    pub data: Vec<HelpEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HelpEntry(pub String, pub HelpBody);

/// Descriptions come either as one string or as a list of paragraphs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HelpBody {
    Text(String),
    Paragraphs(Vec<String>),
}

impl HelpBody {
    pub fn to_text(&self) -> String {
        match self {
            HelpBody::Text(s) => s.trim().to_string(),
            HelpBody::Paragraphs(p) => p
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlarmBlock {
    #[serde(default)]
    pub alarms: Vec<Alarm>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alarm {
    /// `Some` whenever the key is present, `Some(Value::Null)` included.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub level: Option<String>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// The eight metric tables, in concatenation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    JointMetrics,
    AtacSequencing,
    GexSequencing,
    AtacCells,
    GexCells,
    AtacMapping,
    GexMapping,
    AtacTargeting,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::JointMetrics,
        Section::AtacSequencing,
        Section::GexSequencing,
        Section::AtacCells,
        Section::GexCells,
        Section::AtacMapping,
        Section::GexMapping,
        Section::AtacTargeting,
    ];

    pub fn modality(&self) -> Modality {
        match self {
            Section::JointMetrics => Modality::Joint,
            Section::AtacSequencing
            | Section::AtacCells
            | Section::AtacMapping
            | Section::AtacTargeting => Modality::Atac,
            Section::GexSequencing | Section::GexCells | Section::GexMapping => Modality::Gex,
        }
    }
}

impl RawSummary {
    /// Decode an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(ArcQcError::Schema)
    }

    pub fn table(&self, section: Section) -> &Table {
        match section {
            Section::JointMetrics => &self.joint_metrics_table,
            Section::AtacSequencing => &self.atac_sequencing_table,
            Section::GexSequencing => &self.gex_sequencing_table,
            Section::AtacCells => &self.atac_cells_table,
            Section::GexCells => &self.gex_cells_table,
            Section::AtacMapping => &self.atac_mapping_table,
            Section::GexMapping => &self.gex_mapping_table,
            Section::AtacTargeting => &self.atac_targeting_table,
        }
    }

    pub fn helptext(&self, section: Section) -> &HelpText {
        match section {
            Section::JointMetrics => &self.joint_metrics_helptext,
            Section::AtacSequencing => &self.atac_sequencing_helptext,
            Section::GexSequencing => &self.gex_sequencing_helptext,
            Section::AtacCells => &self.atac_cells_helptext,
            Section::GexCells => &self.gex_cells_helptext,
            Section::AtacMapping => &self.atac_mapping_helptext,
            Section::GexMapping => &self.gex_mapping_helptext,
            Section::AtacTargeting => &self.atac_targeting_helptext,
        }
    }

    pub fn plot(&self, kind: crate::model::PlotKind) -> &Value {
        use crate::model::PlotKind;
        match kind {
            PlotKind::TssEnrichment => &self.atac_tss_enrichment_plot,
            PlotKind::InsertSize => &self.atac_insert_size_plot,
            PlotKind::SeqSaturation => &self.gex_seq_saturation_plot,
            PlotKind::GenesPerCell => &self.gex_genes_per_cell_plot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_accepts_text_and_numbers() {
        let rows: Vec<Row> =
            serde_json::from_value(json!([["Linked genes", "12,001"], ["Linked peaks", 523]]))
                .unwrap();
        assert_eq!(rows[0].1.as_text(), "12,001");
        assert_eq!(rows[1].1.as_text(), "523");
    }

    #[test]
    fn test_row_passes_through_other_values() {
        let rows: Vec<Row> = serde_json::from_value(json!([
            ["Sample description", null],
            ["Include introns", true]
        ]))
        .unwrap();
        assert_eq!(rows[0].1.as_text(), "");
        assert_eq!(rows[1].1.as_text(), "true");
    }

    #[test]
    fn test_help_body_forms() {
        let entries: Vec<HelpEntry> = serde_json::from_value(json!([
            ["A", "single line"],
            ["B", ["first part.", "", " second part."]]
        ]))
        .unwrap();
        assert_eq!(entries[0].1.to_text(), "single line");
        assert_eq!(entries[1].1.to_text(), "first part. second part.");
    }

    #[test]
    fn test_alarm_defaults() {
        let block: AlarmBlock =
            serde_json::from_value(json!({"alarms": [{"title": "no id here"}]})).unwrap();
        assert_eq!(block.alarms.len(), 1);
        assert!(block.alarms[0].id.is_none());
        assert_eq!(block.alarms[0].message, "");

        let block: AlarmBlock =
            serde_json::from_value(json!({"alarms": [{"id": null, "title": "T"}]})).unwrap();
        assert_eq!(block.alarms[0].id, Some(Value::Null));

        let empty: AlarmBlock = serde_json::from_value(json!({})).unwrap();
        assert!(empty.alarms.is_empty());
    }

    #[test]
    fn test_missing_section_is_named() {
        let err = RawSummary::from_value(json!({"sample": {"id": "x"}})).unwrap_err();
        assert!(err.to_string().contains("missing field"), "{err}");
    }

    #[test]
    fn test_section_modality() {
        assert_eq!(Section::JointMetrics.modality(), Modality::Joint);
        assert_eq!(Section::AtacTargeting.modality(), Modality::Atac);
        assert_eq!(Section::GexMapping.modality(), Modality::Gex);
    }
}
