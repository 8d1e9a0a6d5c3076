/// Reshape a web summary plot object into line-graph series.
///
/// Plot objects wrap a plotly figure:
///   `{"help": {...}, "plot": {"data": [{"x": [...], "y": [...], "name": "...", "type": "scatter"}], "layout": {...}}}`
///
/// Every trace becomes one line; coordinates are copied through unchanged.
use serde_json::Value;

use crate::error::{ArcQcError, Result};
use crate::model::{PlotLine, PlotSeries};

pub fn extract_plot_data(plot_name: &str, plot: &Value) -> Result<PlotSeries> {
    let malformed = |reason: String| ArcQcError::Plot {
        plot: plot_name.to_string(),
        reason,
    };

    let traces = plot
        .get("plot")
        .ok_or_else(|| malformed("missing `plot` object".into()))?
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| malformed("missing `plot.data` array".into()))?;
    if traces.is_empty() {
        return Err(malformed("`plot.data` has no traces".into()));
    }

    let mut series = PlotSeries::default();
    for (idx, trace) in traces.iter().enumerate() {
        let xs = numbers(trace, "x").map_err(|r| malformed(format!("trace {idx}: {r}")))?;
        let ys = numbers(trace, "y").map_err(|r| malformed(format!("trace {idx}: {r}")))?;
        if xs.len() != ys.len() {
            return Err(malformed(format!(
                "trace {idx}: {} x values but {} y values",
                xs.len(),
                ys.len()
            )));
        }
        series.lines.push(PlotLine {
            name: trace
                .get("name")
                .and_then(|n| n.as_str())
                .map(str::to_string),
            points: xs.into_iter().zip(ys).collect(),
        });
    }
    Ok(series)
}

fn numbers(trace: &Value, axis: &str) -> std::result::Result<Vec<f64>, String> {
    let values = trace
        .get(axis)
        .and_then(|v| v.as_array())
        .ok_or_else(|| format!("missing `{axis}` array"))?;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64()
                .ok_or_else(|| format!("`{axis}[{i}]` is not a number: {v}"))
        })
        .collect()
}
