/// Locating Cell Ranger ARC web summaries.
///
/// Strategy:
///   1. Paths naming a file are used as given, with a warning when the
///      name does not end in `web_summary.html`
///   2. Directories are searched recursively for `*web_summary.html`
///   3. The result is sorted and deduplicated so runs are reproducible
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{ArcQcError, Result};

/// File name suffix of a web summary report.
pub const WEB_SUMMARY_SUFFIX: &str = "web_summary.html";

/// Does the file name look like a web summary?
pub fn is_web_summary(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(WEB_SUMMARY_SUFFIX))
}

/// Expand the given inputs into the list of reports to read.
pub fn find_web_summaries(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for input in inputs {
        let meta = std::fs::metadata(input).map_err(|e| {
            ArcQcError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", input.display()),
            ))
        })?;
        if meta.is_file() {
            if !is_web_summary(input) {
                warn!(
                    "{} is not named like a web summary, reading it anyway",
                    input.display()
                );
            }
            found.push(input.clone());
            continue;
        }
        let before = found.len();
        search_dir(input, &mut found)?;
        debug!(
            "Found {} web summaries under {}",
            found.len() - before,
            input.display()
        );
    }
    found.sort();
    found.dedup();
    Ok(found)
}

fn search_dir(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let pattern = format!("{escaped}/**/*{WEB_SUMMARY_SUFFIX}");
    let paths = glob::glob(&pattern).map_err(|source| ArcQcError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => found.push(path),
            Ok(_) => {}
            Err(e) => debug!("Skipping unreadable path {}: {e}", e.path().display()),
        }
    }
    Ok(())
}
