use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use arcqc::cli::{self, ReportOptions, Style};
use arcqc::datafile::DataFormat;
use arcqc::error::ArcQcError;
use arcqc::ingest::IngestOptions;
use arcqc::logging;
use arcqc::model::PlotKind;
use arcqc::samples::{NameCleaner, SampleFilter};

/// arcqc: QC metrics from Cell Ranger ARC web summaries.
#[derive(Parser)]
#[command(name = "arcqc", version, about)]
struct Cli {
    /// More log output (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// Skip samples whose cleaned name matches this glob. Repeatable.
    #[arg(long = "ignore-samples", value_name = "GLOB")]
    ignore_samples: Vec<String>,

    /// Abort on the first report that fails to parse.
    #[arg(long)]
    strict: bool,

    /// Use sample ids exactly as written in the reports.
    #[arg(long)]
    no_clean_names: bool,

    /// Extra extension to strip from sample names. Repeatable.
    #[arg(long = "clean-ext", value_name = "EXT")]
    clean_ext: Vec<String>,
}

impl CommonArgs {
    fn ingest_options(&self) -> Result<IngestOptions> {
        let cleaner = if self.no_clean_names {
            NameCleaner::disabled()
        } else {
            let mut cleaner = NameCleaner::default();
            cleaner.extensions.extend(self.clean_ext.iter().cloned());
            cleaner
        };
        Ok(IngestOptions {
            strict: self.strict,
            cleaner,
            filter: SampleFilter::new(&self.ignore_samples)?,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the QC report for every web summary under the given paths.
    Report {
        /// Web summary files or directories to search.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output style.
        #[arg(long, value_enum, default_value_t = Style::Text)]
        style: Style,

        /// Include columns hidden by default.
        #[arg(long)]
        show_hidden: bool,

        /// Also write flat data files to this directory.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Format of the metrics data file.
        #[arg(long, value_enum, default_value_t = DataFormat::Tsv)]
        data_format: DataFormat,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Show every metric, warning and plot of a single web summary.
    Inspect {
        /// The web summary file.
        file: PathBuf,
    },

    /// Dump the points of one plot for every sample as TSV.
    Plot {
        /// Web summary files or directories to search.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Which plot to dump.
        #[arg(long, value_enum)]
        kind: PlotKind,

        #[command(flatten)]
        common: CommonArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_log(logging::level(cli.verbose, cli.quiet));

    let output = match cli.command {
        Commands::Report {
            paths,
            style,
            show_hidden,
            data_dir,
            data_format,
            common,
        } => {
            let report_opts = ReportOptions {
                style,
                show_hidden,
                data_dir,
                data_format,
            };
            cli::cmd_report(&paths, &common.ingest_options()?, &report_opts)
        }
        Commands::Inspect { file } => cli::cmd_inspect(&file),
        Commands::Plot { paths, kind, common } => {
            cli::cmd_plot(&paths, &common.ingest_options()?, kind)
        }
    };

    match output {
        Ok(text) => {
            print!("{text}");
            Ok(())
        }
        Err(e) if matches!(e.downcast_ref::<ArcQcError>(), Some(ArcQcError::NoSamplesFound)) => {
            log::warn!("No Cell Ranger ARC reports found, nothing to do");
            Ok(())
        }
        Err(e) => Err(e),
    }
}
