use anyhow::Result;
use clap::Parser;

use kaulvote::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    Cli::parse().run().await
}
