pub mod cli;
pub mod datafile;
pub mod detect;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod parsers;
pub mod report;
pub mod samples;
pub mod schema;
