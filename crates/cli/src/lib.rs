pub mod commands;
pub mod normalize;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::negotiate::NegotiateArgs;
use commands::search::SearchArgs;

#[derive(Debug, Parser)]
#[command(
    name = "loadline",
    about = "Loadline operator CLI",
    long_about = "Search the loadboard, evaluate carrier counter-offers, verify carrier \
                  authority, and aggregate call outcomes.",
    after_help = "Examples:\n  loadline search --origin \"Chicago, IL\" --equipment reefer\n  \
                  loadline negotiate --carrier-offer 1950 --last-offer 1800 --round 1 --ceiling 1900\n  \
                  loadline verify 512345\n  loadline metrics"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Find the single best posted load for a set of lane constraints")]
    Search(SearchArgs),
    #[command(about = "Evaluate one carrier counter-offer and print the decision")]
    Negotiate(NegotiateArgs),
    #[command(about = "Aggregate call outcomes and the board headcount into a metrics report")]
    Metrics {
        #[arg(long, help = "JSON file of call summaries (defaults to the demo history)")]
        calls: Option<PathBuf>,
        #[arg(long, help = "JSON file of posted loads (defaults to the demo board)")]
        loads: Option<PathBuf>,
    },
    #[command(about = "Check a carrier's operating authority by MC number")]
    Verify {
        #[arg(help = "MC number, 5-8 digits")]
        mc_number: String,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Search(args) => commands::search::run(&args),
        Command::Negotiate(args) => commands::negotiate::run(&args),
        Command::Metrics { calls, loads } => {
            commands::metrics::run(calls.as_deref(), loads.as_deref())
        }
        Command::Verify { mc_number } => commands::verify::run(&mc_number),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
