mod commands;
mod input;
mod logging;
mod output;
mod settings;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;

use commands::index::IndexArgs;
use commands::loan::LoanArgs;
use commands::rate::RateArgs;
use settings::Settings;

/// UVA-indexed mortgage quotes
#[derive(Parser)]
#[command(
    name = "uva",
    version,
    about = "UVA-indexed mortgage quotes and amortisation schedules",
    long_about = "Prices mortgages denominated in UVA (Unidad de Valor Adquisitivo) \
                  using the French amortisation system. Resolves the daily UVA value \
                  from a configured feed, selects the rate tier, and prints the \
                  monthly payment, totals and the amortisation schedule."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a JSON or YAML settings file
    #[arg(long, global = true)]
    settings: Option<String>,

    /// URL of the UVA index feed
    #[arg(long, env = "UVA_FEED_URL", global = true)]
    feed_url: Option<String>,

    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a UVA mortgage: monthly payment, totals and schedule
    Loan(LoanArgs),
    /// Resolve the UVA index value for a date (today by default)
    Index(IndexArgs),
    /// Show the annual rate offered for a borrower profile
    Rate(RateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.settings.as_deref()) {
        Ok(s) => s.with_overrides(cli.feed_url, cli.log_level),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init(&settings.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
    debug!(?settings, "settings loaded");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loan::run_loan(args, &settings),
        Commands::Index(args) => commands::index::run_index(args, &settings),
        Commands::Rate(args) => commands::rate::run_rate(args),
        Commands::Version => {
            println!("uva {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
