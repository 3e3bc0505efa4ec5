mod cli;
mod history;
mod session;
mod telemetry;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_format)?;

    let provider = session::build_provider(&cli)?;
    let pipeline = session::build_pipeline(&cli, provider)?;

    match &cli.command {
        Commands::Ask { file, question, json } => {
            session::run_ask(&pipeline, file, question, *json).await
        }
        Commands::Chat { file } => session::run_chat(&pipeline, file).await,
    }
}
