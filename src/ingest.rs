use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::detect::find_web_summaries;
use crate::error::{ArcQcError, Result};
use crate::model::{Accumulator, FileFailure, ParsedSummary};
use crate::parsers::{Parser, WebSummaryParser};
use crate::samples::{NameCleaner, SampleFilter};

/// Options controlling a multi-file ingest run.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Abort on the first unparseable report instead of skipping it.
    pub strict: bool,
    pub cleaner: NameCleaner,
    pub filter: SampleFilter,
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Parsed and stored under this sample name.
    Parsed(String),
    /// No `const data` payload; nothing stored.
    NoSummary,
    /// Unparseable; recorded as a failure and skipped.
    Failed,
}

/// Read and parse one report. The file is closed before returning.
pub fn parse_file(path: &Path) -> Result<Option<ParsedSummary>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    WebSummaryParser.parse(&mut reader)
}

/// Parse one report and fold it into `acc`.
pub fn ingest_file(path: &Path, opts: &IngestOptions, acc: &mut Accumulator) -> Result<FileOutcome> {
    let parsed = match parse_file(path) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            debug!("No summary data found in {}", path.display());
            return Ok(FileOutcome::NoSummary);
        }
        Err(e) => {
            let e = e.in_file(path);
            if opts.strict {
                return Err(e);
            }
            error!("{e}");
            acc.failures.push(FileFailure {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
            return Ok(FileOutcome::Failed);
        }
    };

    let sample = opts.cleaner.clean(&parsed.sample_id, path);
    if acc.contains(&sample) {
        debug!(
            "Duplicate sample name found in {}! Overwriting: {}",
            path.display(),
            sample
        );
    }
    acc.insert(&sample, parsed, path.to_path_buf());
    Ok(FileOutcome::Parsed(sample))
}

/// Find every report under `inputs`, parse them one after another, then
/// drop excluded samples. Fails with `NoSamplesFound` when nothing is left.
pub fn ingest_paths(inputs: &[PathBuf], opts: &IngestOptions) -> Result<Accumulator> {
    let files = find_web_summaries(inputs)?;
    debug!("Considering {} candidate files", files.len());

    let mut acc = Accumulator::new();
    for path in &files {
        ingest_file(path, opts, &mut acc)?;
    }

    if !opts.filter.is_empty() {
        let before = acc.sample_count();
        acc.retain_samples(|s| !opts.filter.is_ignored(s));
        debug!("Ignored {} samples", before - acc.sample_count());
    }

    if acc.sample_count() == 0 {
        return Err(ArcQcError::NoSamplesFound);
    }
    info!("Found {} Cell Ranger ARC reports", acc.sample_count());
    Ok(acc)
}
