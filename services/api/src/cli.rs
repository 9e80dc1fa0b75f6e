use crate::demo::{run_demo, run_redact, DemoArgs, RedactArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruiter::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruiter Shortlist Service",
    about = "Run and exercise the recruiter shortlist and CV blinding service from the command line",
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
    /// Redact contact details from a CV document on disk or stdin
    Redact(RedactArgs),
    /// Run an end-to-end shortlist walkthrough against in-memory stores
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
        Command::Redact(args) => run_redact(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
