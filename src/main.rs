//! Preview binary - applies a language to a page built from the catalog
//!
//! Usage:
//!   cargo run                  # Restore the stored language (default "en")
//!   cargo run -- fr            # Select "fr", persist it, and print the page
//!
//! Optional environment variables:
//! - TRANSLATIONS_URL (defaults to translations.json)
//! - LANGUAGE_STORE_PATH (defaults to data/local_storage.json)
//! - DEFAULT_LANGUAGE (defaults to en)
//! - MISSING_KEY_POLICY, CLOSE_MENU_ON_SELECT, RESTORE_ON_LOAD, LOAD_ORDERING

use anyhow::{Context, Result};
use language_switcher::switcher::TRANSLATE_KEY_ATTR;
use language_switcher::{
    config, ActivationEvent, CatalogSource, ConfiguredSource, Document, FileStore,
    LanguageSwitcher, StaticDocument,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_switcher=info".parse()?),
        )
        .init();

    let config = config::Config::from_env()?;
    let source = ConfiguredSource::from_location(&config.translations_url);

    // Build the page from the default language's keys
    info!("Reading catalog layout from {}", source.location());
    let catalog = source
        .fetch_catalog()
        .await
        .context("Failed to load translation catalog")?;

    let coverage = catalog.coverage(&config.default_language);
    for warning in coverage.warnings() {
        warn!("{}", warning);
    }

    let languages = catalog.languages();
    let keys = catalog.keys(&config.default_language);
    let entries: Vec<(&str, &str)> = keys.iter().map(|key| (*key, *key)).collect();
    let document = StaticDocument::language_page(&languages, &entries);

    let switcher = LanguageSwitcher::new(
        document,
        FileStore::new(&config.storage_path),
        source,
        config.switcher_options(),
    );

    if let Some(handle) = switcher.initialize_language() {
        handle.await?;
    }

    if let Some(lang) = std::env::args().nth(1) {
        let mut event = ActivationEvent::new();
        switcher.select_language(&mut event, &lang).await?;
    }

    info!("Active language: {}", switcher.active_language());

    switcher.with_document(|doc| {
        for node in doc.elements_with_attribute(None, TRANSLATE_KEY_ATTR) {
            let key = doc.attribute(node, TRANSLATE_KEY_ATTR).unwrap_or_default();
            let text = doc.text(node).unwrap_or_default();
            println!("{}: {}", key, text);
        }
    });

    let report = switcher.metrics().report();
    info!("Metrics: {}", serde_json::to_string(&report)?);

    Ok(())
}
