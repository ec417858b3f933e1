use clap::Parser;
use fuel_tracker::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Budget(args) => cli::budget::run(args).await,
    }
}
