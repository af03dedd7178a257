use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use rust_decimal::Decimal;
use tripledger::cli::add::AddExpense;
use tripledger::core::Currency;
use tripledger::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tripledger::AppCommand {
    fn from(cmd: Commands) -> tripledger::AppCommand {
        match cmd {
            Commands::Trips => tripledger::AppCommand::Trips,
            Commands::Add {
                trip,
                item,
                category,
                currency,
                amount,
                date,
            } => tripledger::AppCommand::Add(AddExpense {
                trip,
                item,
                category,
                currency,
                amount,
                date,
            }),
            Commands::Show { trip } => tripledger::AppCommand::Show { trip },
            Commands::Rate => tripledger::AppCommand::Rate,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List trips with their totals
    Trips,
    /// Record an expense for a trip
    Add {
        /// Trip name; a new name starts a new trip
        #[arg(short, long)]
        trip: String,
        /// What the money was spent on
        #[arg(short, long)]
        item: String,
        /// Expense category, one of the configured categories
        #[arg(short = 'g', long)]
        category: String,
        /// Currency of the amount (JPY or TWD)
        #[arg(short = 'u', long, default_value = "JPY")]
        currency: Currency,
        /// Amount in the given currency
        #[arg(short, long)]
        amount: Decimal,
        /// Date of the expense (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Display expenses and total for a trip, or for all trips
    Show {
        #[arg(short, long)]
        trip: Option<String>,
    },
    /// Display the current JPY to TWD rate
    Rate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => tripledger::cli::setup::setup(),
        Some(cmd) => tripledger::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
