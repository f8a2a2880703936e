use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod commands;

/// Safe multisig queue monitor
#[derive(Parser)]
#[command(name = "safe-queue-monitor")]
#[command(about = "Report pending Safe multisig transactions and who still needs to sign")]
#[command(version)]
pub struct Cli {
    /// Verbose diagnostic logging (no effect on output)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run one fetch-format-notify cycle
    Run(commands::run::RunCommand),
    /// List supported networks
    Chains(commands::chains::ChainsCommand),
}

/// Logs go to stderr so the console channel owns stdout.
/// `--debug` forces debug level; otherwise RUST_LOG applies, defaulting to "warn".
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Run(command) => command.run().await,
        Commands::Chains(command) => command.run(),
    }
}
