use crate::export::ReportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for punchclock
#[derive(Parser)]
#[command(
    name = "punchclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "QR time clock: record employee punches and export attendance reports using SQLite",
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
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $VISUAL, $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a punch for the employee carrying CODE
    Punch {
        /// Scanned badge code
        code: String,

        /// in | out | break_in | break_out
        #[arg(long, short = 'a', default_value = "in")]
        action: String,

        /// Job / M-number the punch belongs to
        #[arg(long, short = 'j')]
        job: Option<String>,

        /// Department name overriding the employee's
        #[arg(long)]
        department: Option<String>,

        /// Location name overriding the employee's
        #[arg(long)]
        location: Option<String>,

        /// Device label (defaults to the configured station label)
        #[arg(long)]
        device: Option<String>,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,
    },

    /// Manage employees
    Employee {
        #[command(subcommand)]
        action: EmployeeCommands,
    },

    /// List departments
    Departments,

    /// List locations
    Locations,

    /// Export the attendance report
    Report {
        #[arg(long, value_enum, default_value = "csv")]
        format: ReportFormat,

        /// Absolute output path; stdout when omitted (csv/json only)
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (YYYY-MM-DD:YYYY-MM-DD)"
        )]
        range: Option<String>,

        /// Restrict to these employee codes (repeatable)
        #[arg(long = "employee", value_name = "CODE")]
        employees: Vec<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// Register a new employee
    Add {
        #[arg(long)]
        name: String,

        /// Unique badge code
        #[arg(long)]
        code: String,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// List employees
    List {
        /// Include deactivated employees
        #[arg(long)]
        all: bool,
    },

    /// Deactivate an employee (punches are refused afterwards)
    Deactivate { code: String },

    /// Re-activate a deactivated employee
    Activate { code: String },

    /// Import employees from a CSV roster (name, qr_code_value, department, location)
    Import {
        #[arg(value_name = "FILE")]
        file: String,
    },
}
