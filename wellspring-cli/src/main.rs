use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod ollama;

#[derive(Parser)]
#[command(name = "wellspring", about = "Estimate idea-space exhaustion for a prompt")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an exhaustion session for a prompt
    Run(commands::run::RunArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run(args) => commands::run::execute(args).await,
    }
}
