use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use sparkl_rates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Skip the live rate fetch and use the built-in rates
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for sparkl_rates::AppCommand {
    fn from(cmd: Commands) -> sparkl_rates::AppCommand {
        match cmd {
            Commands::Convert { amount, from, to } => {
                sparkl_rates::AppCommand::Convert { amount, from, to }
            }
            Commands::Rate { from, to } => sparkl_rates::AppCommand::Rate { from, to },
            Commands::Rates { base } => sparkl_rates::AppCommand::Rates { base },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies
    Convert {
        /// Amount in the source currency
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Source currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. NGN
        to: String,
    },
    /// Show the exchange rate between two currencies
    Rate { from: String, to: String },
    /// List all known exchange rates
    Rates {
        /// Currency to quote rates against (defaults to the configured base)
        #[arg(short, long)]
        base: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => sparkl_rates::cli::setup::setup(),
        Some(cmd) => {
            sparkl_rates::run_command(cmd.into(), cli.config_path.as_deref(), cli.offline).await
        }
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
