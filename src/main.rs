//! Preview binary - runs the site's language layer against an in-memory page.
//!
//! Usage:
//!   cargo run                 # Resolve and apply the initial language
//!   cargo run -- es           # Then switch to Spanish (persists the choice)
//!
//! Optional environment variables:
//! - SITE_URL (defaults to http://localhost:8080/)
//! - TRANSLATIONS_BASE (defaults to i18n/, resolved against SITE_URL)
//! - PREFERENCES_FILE (defaults to data/preferences.json)
//! - PREFERRED_LANGUAGES (defaults to the POSIX locale)

use anyhow::{bail, Result};
use kalenex_i18n::config::{Config, TranslationSource};
use kalenex_i18n::document::{Document, MemoryDocument};
use kalenex_i18n::history::{History, MemoryHistory};
use kalenex_i18n::i18n::{
    FsTranslationStore, HttpTranslationStore, LanguageRegistry, TranslationManager,
    TranslationStore, TranslationValidator, CURRENT_LABEL_ID, MENU_ID, SWITCHER_ID, TOGGLE_ID,
};
use kalenex_i18n::preferences::{FilePreferences, PreferenceStore};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kalenex_i18n=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let requested = std::env::args().nth(1);

    match config.translations.clone() {
        TranslationSource::Http(base) => {
            let store = HttpTranslationStore::new(reqwest::Client::new(), base);
            run(&config, store, requested.as_deref()).await
        }
        TranslationSource::Directory(dir) => {
            run(&config, FsTranslationStore::new(dir), requested.as_deref()).await
        }
    }
}

/// Header markup every page carries for the language switcher.
fn page_skeleton() -> MemoryDocument {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let header = doc.append_with(body, "header", &[("id", "header")], "");
    let switcher = doc.append_with(
        header,
        "div",
        &[("id", SWITCHER_ID), ("class", "lang-switcher")],
        "",
    );
    let button = doc.append_with(switcher, "button", &[("id", TOGGLE_ID)], "");
    doc.append_with(button, "span", &[("id", CURRENT_LABEL_ID)], "");
    doc.append_with(switcher, "ul", &[("id", MENU_ID)], "");
    doc
}

async fn run<S: TranslationStore>(
    config: &Config,
    store: S,
    requested: Option<&str>,
) -> Result<()> {
    let registry = LanguageRegistry::builtin().clone();
    let mut manager = TranslationManager::new(
        registry,
        store,
        page_skeleton(),
        MemoryHistory::new(config.site_url.clone()),
        FilePreferences::open(&config.preferences_file),
    );

    info!("Preferred languages: {:?}", config.preferred_languages);
    manager.init(&config.preferred_languages).await;

    if let Some(code) = requested {
        let Some(language) = manager.registry().language(code) else {
            bail!(
                "Unknown language code: '{}' (available: {})",
                code,
                manager
                    .languages()
                    .iter()
                    .map(|l| l.code)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        };
        manager.switch_to(language).await;
    }

    let doc = manager.document();
    info!("Active language: {}", manager.current());
    info!("Address: {}", manager.history().location());
    info!("Loaded {} translations", manager.translations().len());
    if let Some(menu) = doc.get_element_by_id(MENU_ID) {
        for entry in doc.children(menu) {
            info!("Switcher entry: {}", doc.outer_html(entry));
        }
    }

    validate_all(&manager).await;

    info!("{}", manager.metrics().report().format());
    Ok(())
}

/// Check every configured language's resource against the default one.
async fn validate_all<S, D, H, P>(manager: &TranslationManager<S, D, H, P>)
where
    S: TranslationStore,
    D: Document,
    H: History,
    P: PreferenceStore,
{
    let default = manager.registry().default_language();
    let reference = match manager.store().fetch(default.code()).await {
        Ok(map) => map,
        Err(e) => {
            warn!("Skipping validation, default resource unavailable: {}", e);
            return;
        }
    };

    for lang in manager.languages() {
        if lang.code == default.code() {
            continue;
        }
        match manager.store().fetch(lang.code).await {
            Ok(map) => {
                let report = TranslationValidator::validate(&reference, &map);
                if report.is_clean() {
                    info!("✓ {}.json matches {}.json", lang.code, default.code());
                }
                for error in &report.errors {
                    warn!("{}.json: {}", lang.code, error);
                }
                for warning in &report.warnings {
                    warn!("{}.json: {}", lang.code, warning);
                }
            }
            Err(e) => warn!("{}.json unavailable: {}", lang.code, e),
        }
    }
}
