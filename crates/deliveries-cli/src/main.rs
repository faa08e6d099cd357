mod cmd;
mod output;
mod sheet_path;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "deliveries",
    about = "Deliveries tracker — recurring deliveries backed by a sheet store",
    version,
    propagate_version = true
)]
struct Cli {
    /// Sheet file (default: auto-detect deliveries.yaml upward from cwd)
    #[arg(long, global = true, env = "DELIVERIES_SHEET")]
    sheet: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the sheet file with the canonical header
    Init,

    /// Show all tracked deliveries
    List {
        /// Order rows by due date (undated rows last)
        #[arg(long)]
        sort_due: bool,
    },

    /// Append a new delivery
    Add {
        /// Due date, ISO or day-first (e.g. 2024-03-15 or 15/03/2024)
        #[arg(long)]
        due: Option<String>,

        /// Recurrence: weekly, monthly, quarterly, semesterly
        #[arg(long)]
        frequency: Option<String>,

        /// Initial status (default: Not started)
        #[arg(long)]
        status: Option<String>,

        /// Priority: Low, Medium, High (default: Medium)
        #[arg(long)]
        priority: Option<String>,

        /// Free-text notes
        notes: Vec<String>,
    },

    /// Update a single cell
    Set {
        /// Sheet row number (data rows start at 2)
        row: u32,
        /// Column name (Due, Frequency, Done, Status, Priority, Notes)
        column: String,
        value: String,
    },

    /// Mark deliveries done and run a sync cycle (reschedule + write-back)
    Done {
        /// Sheet row numbers (data rows start at 2)
        #[arg(required = true)]
        rows: Vec<u32>,
    },

    /// Launch the web API server
    Ui {
        /// Port to listen on
        #[arg(long, default_value = "3172")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Ui { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let sheet = sheet_path::resolve_sheet(cli.sheet.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&sheet, cli.json),
        Commands::List { sort_due } => cmd::list::run(&sheet, sort_due, cli.json),
        Commands::Add {
            due,
            frequency,
            status,
            priority,
            notes,
        } => cmd::add::run(
            &sheet,
            due.as_deref(),
            frequency.as_deref(),
            status.as_deref(),
            priority.as_deref(),
            &notes.join(" "),
            cli.json,
        ),
        Commands::Set { row, column, value } => {
            cmd::set::run(&sheet, row, &column, &value, cli.json)
        }
        Commands::Done { rows } => cmd::done::run(&sheet, &rows, cli.json),
        Commands::Ui { port, no_open } => cmd::ui::run(&sheet, port, no_open),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
