//! Subcommand implementations.

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use replicate_core::ModelRegistry;
use replicate_provider::{
    DEFAULT_BASE_URL, PredictionSync, ReplicateClient, TokenResolver, register_models,
};
use replicate_store::{CatalogCache, ConfigDir, ModelsFile, PredictionTable, RegistryEntry, StoredKeys};

fn resolver(dir: &ConfigDir, key: Option<String>) -> TokenResolver {
    TokenResolver::new(key, StoredKeys::new(dir))
}

/// `fetch-models`: downloads the curated collection and replaces the cache.
pub async fn fetch_models(dir: &ConfigDir, key: Option<String>) -> Result<()> {
    let token = resolver(dir, key).resolve()?;
    let client = ReplicateClient::new(token);

    let models = client.fetch_language_models().await?;
    CatalogCache::new(dir).save(&models)?;
    println!("Fetched {} models", models.len());
    Ok(())
}

/// `add`: records a model in the user registry file.
///
/// The identifier is not validated here; a malformed one surfaces as a
/// registration failure the next time models are loaded.
pub async fn add_model(
    dir: &ConfigDir,
    model_id: String,
    aliases: Vec<String>,
    version: Option<String>,
    chat: bool,
    key: Option<String>,
) -> Result<()> {
    // The token is only needed when the latest version must be looked up.
    let version = match version {
        Some(version) => version,
        None => {
            let token = resolver(dir, key).resolve()?;
            ReplicateClient::new(token).latest_version(&model_id).await?
        }
    };

    let mut entry = RegistryEntry::new(model_id, version);
    entry.aliases = aliases;
    entry.chat = chat;
    let id = entry.model_id.clone();
    ModelsFile::new(dir).upsert(entry)?;
    println!("Added model replicate-{id}");
    Ok(())
}

/// `edit-models`: opens `models.json` in the user's editor.
pub fn edit_models(dir: &ConfigDir) -> Result<()> {
    let models = ModelsFile::new(dir);
    models.ensure_exists()?;

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    let status = std::process::Command::new(&editor)
        .arg(models.path())
        .status()
        .with_context(|| format!("could not launch editor {editor}"))?;
    if !status.success() {
        bail!("editor {editor} exited with {status}");
    }
    Ok(())
}

/// `fetch-predictions`: reconciles remote prediction history into the
/// local table, with a progress bar over the detail fetches.
pub async fn fetch_predictions(dir: &ConfigDir, key: Option<String>) -> Result<()> {
    let auth = resolver(dir, key);
    let token = auth.resolve()?;
    let client = ReplicateClient::new(token);

    let mut registry = ModelRegistry::new();
    register_models(&mut registry, dir, &auth, DEFAULT_BASE_URL)?;

    let mut table = PredictionTable::open(dir.predictions_path())?;
    let sync = PredictionSync::new(client, &registry);

    let to_fetch = sync.discover(&table).await?;
    if to_fetch.is_empty() {
        println!("No new predictions to fetch.");
        return Ok(());
    }

    let bar = ProgressBar::new(to_fetch.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{msg} {bar:40} {pos}/{len} ({eta})",
    )?);
    bar.set_message("Fetching predictions");
    for url in &to_fetch {
        let id = sync.ingest(&mut table, url).await?;
        tracing::debug!(%id, "prediction stored");
        bar.inc(1);
    }
    bar.finish_and_clear();
    println!("Fetched {} predictions, {} stored in total", to_fetch.len(), table.len());
    Ok(())
}
