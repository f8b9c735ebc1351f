use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;

use crate::config::Config;
use crate::voting::engine::VotingEngine;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP voting service
    Serve {
        /// Port to bind (overrides KAUL_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the JSON documents (overrides KAUL_DATA_DIR)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Restore the subjects and users documents to their seed state
    Reset {
        /// Directory holding the JSON documents (overrides KAUL_DATA_DIR)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Print the subjects and their tallies
    Show {
        /// Directory holding the JSON documents (overrides KAUL_DATA_DIR)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Serve { port, data_dir } => {
                let mut config = Config::load();
                if let Some(port) = port {
                    config.port = port;
                }
                if let Some(data_dir) = data_dir {
                    config.data_dir = data_dir;
                }
                crate::server::serve(config).await
            }

            Commands::Reset { data_dir } => {
                let mut engine = VotingEngine::open(&resolve_data_dir(data_dir))?;
                engine.reset()?;
                info!("Databases reset: all votes and points cleared");
                Ok(())
            }

            Commands::Show { data_dir } => {
                let engine = VotingEngine::open(&resolve_data_dir(data_dir))?;
                for subject in &engine.snapshot().subjects {
                    info!(
                        "#{} {} {}: up {} / down {} ({} votes recorded)",
                        subject.id,
                        subject.emoji,
                        subject.title,
                        subject.votes.up,
                        subject.votes.down,
                        subject.voter_history.len()
                    );
                }
                Ok(())
            }
        }
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| Config::load().data_dir)
}
