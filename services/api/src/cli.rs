use crate::demo::{run_demo, run_evaluate, run_stats, EvaluateArgs, StatsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use gig_decision::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Gig Order Decision Engine",
    about = "Decide which gig offers are worth taking and track how they pay off",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single offer from the command line
    Evaluate(EvaluateArgs),
    /// Summarize a CSV order log by hour and day
    Stats(StatsArgs),
    /// Run a handful of sample offers through the engine
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Persist logged orders to this CSV file instead of memory
    #[arg(long)]
    pub(crate) orders_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Stats(args) => run_stats(args),
        Command::Demo => run_demo(),
    }
}
