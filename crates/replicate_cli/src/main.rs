//! `llm-replicate` command-line entry point.
//!
//! Mounts the bridge's subcommands the way a host LLM tool would: parse,
//! resolve the configuration directory, dispatch. Any unhandled error is
//! printed with the remote detail and exits non-zero.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use replicate_store::ConfigDir;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Work with language models hosted on Replicate.
#[derive(Debug, Parser)]
#[command(name = "llm-replicate", version, about)]
struct Cli {
    /// Override the configuration directory.
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the curated language-models collection into the local cache.
    FetchModels {
        /// Replicate API key.
        #[arg(long, short = 'k')]
        key: Option<String>,
    },
    /// Register a Replicate model, e.g. `add joehoover/falcon-40b-instruct`.
    Add {
        /// `"owner/name"` identifier of the model.
        model_id: String,
        /// Aliases for this model (repeatable).
        #[arg(long = "alias", value_name = "ALIAS")]
        aliases: Vec<String>,
        /// Model version (defaults to the latest published one).
        #[arg(long)]
        version: Option<String>,
        /// The model expects the `User:`/`Assistant:` chat prompt format.
        #[arg(long)]
        chat: bool,
        /// Replicate API key.
        #[arg(long, short = 'k')]
        key: Option<String>,
    },
    /// Edit the registered models file with the default editor.
    EditModels,
    /// Mirror remote prediction history into the local table.
    FetchPredictions {
        /// Replicate API key.
        #[arg(long, short = 'k')]
        key: Option<String>,
    },
}

fn default_config_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("LLM_REPLICATE_HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::config_dir()
        .map(|base| base.join("llm-replicate"))
        .context("could not determine a configuration directory")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let base = match cli.config_dir {
        Some(dir) => dir,
        None => default_config_dir()?,
    };
    let dir = ConfigDir::new(base);
    dir.ensure()?;

    match cli.command {
        Commands::FetchModels { key } => commands::fetch_models(&dir, key).await,
        Commands::Add {
            model_id,
            aliases,
            version,
            chat,
            key,
        } => commands::add_model(&dir, model_id, aliases, version, chat, key).await,
        Commands::EditModels => commands::edit_models(&dir),
        Commands::FetchPredictions { key } => commands::fetch_predictions(&dir, key).await,
    }
}
