mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::cart::CartArgs;
use commands::feed::FeedArgs;
use commands::format::FormatArgs;
use commands::quote::QuoteArgs;

/// Storefront price quotes and installment plans
#[derive(Parser)]
#[command(
    name = "spq",
    version,
    about = "Storefront price quotes and installment plans",
    long_about = "Computes cash prices and 6/12/15/18-month financing plans from a \
                  product's cost and percentages, rounding every amount up to the \
                  next 5000. Also totals carts and builds the catalog export feed."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// House defaults file (YAML or JSON)
    #[arg(long, env = "SPQ_CONFIG", global = true)]
    config: Option<String>,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the cash price and financing plans for one product
    Quote(QuoteArgs),
    /// Total a cart at cash prices
    CartTotal(CartArgs),
    /// Build the machine-readable catalog feed
    Feed(FeedArgs),
    /// Format an amount as a currency string
    Format(FormatArgs),
    /// Print the house defaults in effect
    Defaults,
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

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    let house_defaults = || config::load_house_defaults(config_path);

    let result: Result<Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => {
            house_defaults().and_then(|d| commands::quote::run_quote(args, &d))
        }
        Commands::CartTotal(args) => {
            house_defaults().and_then(|d| commands::cart::run_cart_total(args, &d))
        }
        Commands::Feed(args) => house_defaults().and_then(|d| commands::feed::run_feed(args, &d)),
        Commands::Format(args) => commands::format::run_format(args),
        Commands::Defaults => {
            house_defaults().and_then(|d| Ok(serde_json::to_value(&d)?))
        }
        Commands::Version => {
            println!("spq {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
