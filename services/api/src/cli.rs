use crate::commands::{run_context, run_fees, ContextArgs, FormArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use patent_filing::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Patent Filing Service",
    about = "Price patent filings, assemble application contexts and serve the filing API",
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
    /// Print the statutory fee breakdown for a form
    Fees(FormArgs),
    /// Print the application context a document template would receive
    Context(ContextArgs),
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
        Command::Fees(args) => run_fees(args),
        Command::Context(args) => run_context(args),
    }
}
