//! Sample naming: cleaning the ids read from reports and excluding samples
//! by glob pattern.

use std::path::Path;

use glob::Pattern;

use crate::error::{ArcQcError, Result};

/// Extensions stripped from sample names unless overridden.
pub const DEFAULT_CLEAN_EXTS: &[&str] = &[".gz", ".html", "_web_summary", ".txt"];

const TRIM_CHARS: &[char] = &['.', '_', '-', ' ', '\t'];

/// How sample ids are turned into display names.
#[derive(Debug, Clone)]
pub struct NameCleaner {
    pub enabled: bool,
    pub extensions: Vec<String>,
}

impl Default for NameCleaner {
    fn default() -> Self {
        Self {
            enabled: true,
            extensions: DEFAULT_CLEAN_EXTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl NameCleaner {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            extensions: Vec::new(),
        }
    }

    /// Clean `raw`, falling back to the name of the directory holding
    /// `source` when nothing usable is left.
    pub fn clean(&self, raw: &str, source: &Path) -> String {
        let name = if self.enabled {
            self.clean_name(raw)
        } else {
            raw.trim().to_string()
        };
        if !name.is_empty() {
            return name;
        }
        fallback_name(source)
    }

    fn clean_name(&self, raw: &str) -> String {
        let mut name = raw.trim();
        if let Some(idx) = name.rfind(['/', '\\']) {
            name = &name[idx + 1..];
        }
        let mut name = name.to_string();
        // Everything from the first occurrence of an extension onwards goes.
        for ext in self.extensions.iter().filter(|e| !e.is_empty()) {
            if let Some(idx) = name.find(ext.as_str()) {
                name.truncate(idx);
            }
        }
        name.trim_matches(TRIM_CHARS).to_string()
    }
}

/// Cell Ranger writes reports to `<id>/outs/web_summary.html`, so the
/// directory above `outs` is the best guess at a name.
fn fallback_name(source: &Path) -> String {
    let mut dir = source.parent();
    if dir.and_then(|d| d.file_name()).is_some_and(|n| n == "outs") {
        dir = dir.and_then(Path::parent);
    }
    dir.and_then(|d| d.file_name())
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("unnamed")
        .to_string()
}

/// Sample names to drop from the results.
#[derive(Debug, Clone, Default)]
pub struct SampleFilter {
    patterns: Vec<Pattern>,
}

impl SampleFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p.as_ref()).map_err(|source| ArcQcError::Pattern {
                    pattern: p.as_ref().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_ignored(&self, sample: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(sample))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_plain_id() {
        let cleaner = NameCleaner::default();
        assert_eq!(cleaner.clean("pbmc_10k", Path::new("x")), "pbmc_10k");
        assert_eq!(cleaner.clean("  pbmc_10k \n", Path::new("x")), "pbmc_10k");
    }

    #[test]
    fn test_clean_strips_extensions_and_dirs() {
        let cleaner = NameCleaner::default();
        assert_eq!(
            cleaner.clean("runs/pbmc_web_summary.html", Path::new("x")),
            "pbmc"
        );
        assert_eq!(cleaner.clean("_brain-", Path::new("x")), "brain");
    }

    #[test]
    fn test_clean_truncates_at_extension() {
        let cleaner = NameCleaner::default();
        assert_eq!(cleaner.clean("pbmc.html.bak", Path::new("x")), "pbmc");
        assert_eq!(cleaner.clean("lib1.txt.gz", Path::new("x")), "lib1");
    }

    #[test]
    fn test_clean_custom_extensions() {
        let cleaner = NameCleaner {
            enabled: true,
            extensions: vec!["_arc".to_string()],
        };
        assert_eq!(cleaner.clean("lymph_arc", Path::new("x")), "lymph");
        assert_eq!(cleaner.clean("lymph.html", Path::new("x")), "lymph.html");
    }

    #[test]
    fn test_disabled_keeps_name() {
        let cleaner = NameCleaner::disabled();
        assert_eq!(
            cleaner.clean(" runs/pbmc.html ", Path::new("x")),
            "runs/pbmc.html"
        );
    }

    #[test]
    fn test_fallback_to_directory() {
        let cleaner = NameCleaner::default();
        assert_eq!(
            cleaner.clean("", Path::new("/data/lib7/outs/web_summary.html")),
            "lib7"
        );
        assert_eq!(
            cleaner.clean("__", Path::new("/data/lib8/web_summary.html")),
            "lib8"
        );
        assert_eq!(cleaner.clean("", Path::new("web_summary.html")), "unnamed");
    }

    #[test]
    fn test_sample_filter() {
        let filter = SampleFilter::new(&["B", "ctrl_*"]).unwrap();
        assert!(filter.is_ignored("B"));
        assert!(filter.is_ignored("ctrl_01"));
        assert!(!filter.is_ignored("A"));
        assert!(!filter.is_ignored("BB"));
        assert!(SampleFilter::default().is_empty());
    }

    #[test]
    fn test_sample_filter_bad_pattern() {
        let err = SampleFilter::new(&["[unclosed"]).unwrap_err();
        assert!(err.to_string().contains("[unclosed"));
    }
}
