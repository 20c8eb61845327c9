use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for securecheck
/// CLI ledger for police traffic-stop logs backed by SQLite
#[derive(Parser)]
#[command(
    name = "securecheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "SecureCheck: browse a police stop ledger, run canned reports, and predict outcomes",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show the stop ledger (full-table view)
    List {
        #[arg(long, help = "Show at most N records")]
        limit: Option<u32>,

        #[arg(long, help = "Filter by county name")]
        county: Option<String>,

        #[arg(long, help = "Filter by violation type")]
        violation: Option<String>,

        #[arg(long, help = "Filter by stop outcome")]
        outcome: Option<String>,
    },

    /// Show the key metrics (stops, arrests, searches, warnings)
    Metrics,

    /// Render the visual insights as terminal bar charts
    Charts {
        #[arg(long, help = "Only the stops-by-violation chart")]
        violations: bool,

        #[arg(long, help = "Only the driver-gender distribution chart")]
        gender: bool,
    },

    /// Run one of the canned aggregate reports
    Report {
        /// Report slug (see --list)
        slug: Option<String>,

        #[arg(long = "list", help = "List the available reports")]
        list: bool,
    },

    /// Add a new stop record and predict its outcome
    Add {
        /// Stop date (YYYY-MM-DD)
        #[arg(long = "date")]
        date: String,

        /// Stop time (HH:MM)
        #[arg(long = "time")]
        time: String,

        #[arg(long = "country", default_value = "")]
        country: String,

        #[arg(long = "county", default_value = "")]
        county: String,

        /// Driver gender (m/male, f/female)
        #[arg(long = "gender")]
        gender: String,

        /// Driver age (16-100)
        #[arg(long = "age")]
        age: i64,

        #[arg(long = "race", default_value = "")]
        race: String,

        /// Was a search conducted?
        #[arg(long = "search")]
        search: bool,

        #[arg(long = "search-type", default_value = "")]
        search_type: String,

        /// Stop duration bucket (e.g. "0-15 min")
        #[arg(long = "duration", default_value = "0-15 min")]
        duration: String,

        #[arg(long = "vehicle", default_value = "")]
        vehicle: String,

        /// Predict only, do not save the record
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Export stop records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Filter by violation type")]
        violation: Option<String>,

        #[arg(long, help = "Export at most N records")]
        limit: Option<u32>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
