//! Locate the `const data = {...}` assignment inside a web summary HTML file.
//!
//! The web summary ships its whole payload as one JavaScript line:
//!
//! ```text
//! <script>
//!     const data = {"sample": {"id": "pbmc"}, ...}
//! </script>
//! ```
use std::io::BufRead;

use log::trace;
use serde_json::Value;

use crate::error::{ArcQcError, Result};

/// Marker a payload line starts with, after leading whitespace.
pub const DATA_MARKER: &str = "const data";

/// Find the first payload line and return its JSON text with its 1-based
/// line number. Reading stops at the first match.
pub fn find_data_line<R: BufRead>(reader: R) -> Result<Option<(usize, String)>> {
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let stripped = line.trim();
        if let Some(rest) = stripped.strip_prefix(DATA_MARKER) {
            let payload = rest.trim_start();
            let payload = payload.strip_prefix('=').unwrap_or(payload).trim();
            let payload = payload.strip_suffix(';').unwrap_or(payload).trim_end();
            trace!("Found summary payload on line {}", idx + 1);
            return Ok(Some((idx + 1, payload.to_string())));
        }
    }
    Ok(None)
}

/// Parse the embedded summary. `Ok(None)` means the file carries no payload
/// and should be skipped; malformed JSON after the marker is an error.
pub fn extract_summary<R: BufRead>(reader: R) -> Result<Option<Value>> {
    let (line, payload) = match find_data_line(reader)? {
        Some(found) => found,
        None => return Ok(None),
    };
    let value = serde_json::from_str(&payload)
        .map_err(|source| ArcQcError::Json { source, line })?;
    Ok(Some(value))
}
