#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

fn plot(name: &str, xs: &[f64], ys: &[f64]) -> Value {
    json!({"plot": {"data": [{"name": name, "type": "scatter", "x": xs, "y": ys}], "layout": {}}})
}

/// A complete decoded web summary for `sample_id` with a handful of
/// realistic rows in each table.
pub fn summary_json(sample_id: &str, cells: &str) -> Value {
    json!({
        "sample": {"id": sample_id, "description": ""},
        "joint_pipeline_info_table": {"rows": [
            ["Sample ID", sample_id],
            ["Sample description", ""],
            ["Pipeline version", "cellranger-arc-2.0.2"]
        ]},
        "joint_metrics_table": {"rows": [
            ["Estimated number of cells", cells],
            ["Feature linkages detected", "145,331"],
            ["Linked genes", "9,520"],
            ["Linked peaks", "34,885"]
        ]},
        "joint_metrics_helptext": {"data": [
            ["Estimated number of cells", ["The number of barcodes associated with cells."]],
            ["Feature linkages detected", ["The number of feature linkages detected."]],
            ["Linked genes", ["The number of genes linked to peaks."]],
            ["Linked peaks", ["The number of peaks linked to genes."]]
        ]},
        "atac_sequencing_table": {"rows": [
            ["Sequenced read pairs", "384,054,576"],
            ["Valid barcodes", "96.7%"],
            ["Percent duplicates", "44.1%"]
        ]},
        "atac_sequencing_helptext": {"data": [
            ["Sequenced read pairs", ["Total number of sequenced read pairs assigned to the sample."]],
            ["Valid barcodes", ["Fraction of read pairs with barcodes that match the whitelist."]],
            ["Percent duplicates", ["Fraction of high-quality read pairs that are deemed duplicates."]]
        ]},
        "gex_sequencing_table": {"rows": [
            ["Sequenced read pairs", "217,409,883"],
            ["Valid UMIs", "99.9%"],
            ["Q30 bases in UMI", "93.4%"]
        ]},
        "gex_sequencing_helptext": {"data": [
            ["Sequenced read pairs", ["Total number of sequenced read pairs assigned to the sample."]],
            ["Valid UMIs", ["Fraction of read pairs with valid UMIs."]],
            ["Q30 bases in UMI", ["Fraction of UMI bases with Q-score >= 30."]]
        ]},
        "atac_cells_table": {"rows": [
            ["Estimated number of cells", cells],
            ["Median high-quality fragments per cell", "16,690"]
        ]},
        "atac_cells_helptext": {"data": [
            ["Median high-quality fragments per cell", "Median number of high-quality fragments per cell barcode."]
        ]},
        "gex_cells_table": {"rows": [
            ["Median genes per cell", "2,084"],
            ["Total genes detected", "27,342"]
        ]},
        "gex_cells_helptext": {"data": [
            ["Median genes per cell", ["The median number of genes detected per cell."]],
            ["Total genes detected", ["The number of genes with at least one UMI count."]]
        ]},
        "atac_mapping_table": {"rows": [
            ["Confidently mapped read pairs", "91.3%"],
            ["Non-nuclear read pairs", "0.3%"]
        ]},
        "atac_mapping_helptext": {"data": [
            ["Confidently mapped read pairs", ["Fraction of sequenced read pairs with mapping quality > 30."]],
            ["Non-nuclear read pairs", ["Fraction of sequenced read pairs that have a valid barcode and map to non-nuclear contigs."]]
        ]},
        "gex_mapping_table": {"rows": [
            ["Reads mapped to genome", "95.8%"]
        ]},
        "gex_mapping_helptext": {"data": [
            ["Reads mapped to genome", ["Fraction of reads that mapped to the genome."]]
        ]},
        "atac_targeting_table": {"rows": [
            ["TSS enrichment score", "9.51"]
        ]},
        "atac_targeting_helptext": {"data": [
            ["TSS enrichment score", ["Maximum value of the TSS profile."]]
        ]},
        "alarms": {"alarms": []},
        "atac_tss_enrichment_plot": plot("TSS", &[-1000.0, 0.0, 1000.0], &[1.0, 9.51, 1.2]),
        "atac_insert_size_plot": plot("Insert size", &[0.0, 200.0, 400.0], &[0.0, 5400.0, 1200.0]),
        "gex_seq_saturation_plot": plot("Saturation", &[0.0, 25000.0], &[0.0, 0.61]),
        "gex_genes_per_cell_plot": plot("Genes", &[0.0, 25000.0], &[0.0, 2084.0])
    })
}

/// Add one alarm to a summary.
pub fn add_alarm(summary: &mut Value, id: &str, title: &str, message: &str) {
    summary["alarms"]["alarms"]
        .as_array_mut()
        .unwrap()
        .push(json!({"id": id, "title": title, "message": message, "level": "WARN"}));
}

/// Wrap the summary the way Cell Ranger ARC embeds it in the page.
pub fn render_html(summary: &Value) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Web Summary</title></head>\n<body>\n<script>\n    const data = {};\n</script>\n</body>\n</html>\n",
        serde_json::to_string(summary).unwrap()
    )
}

/// Write `<root>/<run>/outs/web_summary.html`, returning its path.
pub fn write_run(root: &Path, run: &str, summary: &Value) -> PathBuf {
    let outs = root.join(run).join("outs");
    std::fs::create_dir_all(&outs).unwrap();
    let path = outs.join("web_summary.html");
    std::fs::write(&path, render_html(summary)).unwrap();
    path
}
