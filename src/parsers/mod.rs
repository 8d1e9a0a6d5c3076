pub mod headers;
pub mod plot;
pub mod summary;

use std::io::BufRead;

use crate::error::Result;
use crate::extract::extract_summary;
use crate::model::ParsedSummary;
use crate::schema::RawSummary;

/// Every report parser implements this trait.
pub trait Parser {
    /// Parse one report. `Ok(None)` means the input carries no summary.
    fn parse(&self, input: &mut dyn BufRead) -> Result<Option<ParsedSummary>>;
}

/// Cell Ranger ARC `web_summary.html` parser.
pub struct WebSummaryParser;

impl Parser for WebSummaryParser {
    fn parse(&self, input: &mut dyn BufRead) -> Result<Option<ParsedSummary>> {
        let value = match extract_summary(input)? {
            Some(v) => v,
            None => return Ok(None),
        };
        let raw = RawSummary::from_value(value)?;
        summary::parse_summary(&raw).map(Some)
    }
}
