use crate::demo::{run_demo, run_scorecard, DemoArgs, ScorecardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use perfomind::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Perfomind",
    about = "Run the service-repair order intake and KPI dashboard service",
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
    /// Score a weekly KPI export and print the commission table
    Scorecard(ScorecardArgs),
    /// Run an end-to-end in-memory demo covering intake and the dashboard
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Scorecard(args) => run_scorecard(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
