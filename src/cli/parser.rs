use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for gatelog
#[derive(Parser)]
#[command(
    name = "gatelog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Archive PalGate access-log records into a spreadsheet, skipping rows already archived",
    long_about = None,
    after_long_help = "Runs against the same archive must not overlap: \
schedule a single writer (e.g. one cron entry) per spreadsheet."
)]
pub struct Cli {
    /// Configuration file (default: .palgate.yaml in the working or home directory)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Without a subcommand, `archive` runs.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a configuration template
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show or check the effective configuration (file + environment)
    Config {
        #[arg(long = "print", help = "Print the effective configuration (secrets masked)")]
        print_config: bool,

        #[arg(
            long = "check",
            help = "Fail if a setting required for archiving is missing"
        )]
        check: bool,
    },

    /// Fetch the gate log without touching the archive
    Fetch {
        /// Save the raw response as JSON instead of printing a table
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Fetch the gate log and archive the new records
    Archive {
        /// Show the rows that would be archived, write nothing
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Read records from a saved response (see `fetch --output`) instead of the server
        #[arg(long = "from-file", value_name = "FILE")]
        from_file: Option<PathBuf>,
    },
}
