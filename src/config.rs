use anyhow::{Context, Result};
use reqwest::Url;
use std::path::PathBuf;

/// Where translation resources are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationSource {
    /// `{base}/{code}.json` over HTTP
    Http(Url),
    /// `{dir}/{code}.json` on disk
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    // Page
    pub site_url: Url,

    // Translations
    pub translations: TranslationSource,

    // Preferences
    pub preferences_file: PathBuf,

    // User agent
    pub preferred_languages: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/".to_string());
        let site_url =
            Url::parse(&site_url).with_context(|| format!("SITE_URL is not a URL: {}", site_url))?;

        let translations_base =
            std::env::var("TRANSLATIONS_BASE").unwrap_or_else(|_| "i18n/".to_string());
        let translations = translation_source(&site_url, &translations_base)?;

        Ok(Self {
            site_url,
            translations,

            preferences_file: std::env::var("PREFERENCES_FILE")
                .unwrap_or_else(|_| "data/preferences.json".to_string())
                .into(),

            preferred_languages: match std::env::var("PREFERRED_LANGUAGES") {
                Ok(list) => parse_language_list(&list),
                Err(_) => system_languages(),
            },
        })
    }
}

/// Decide how to reach the translation resources.
///
/// - `http(s)://...` → HTTP at that base
/// - `file://...` or an absolute path → that directory
/// - anything else is relative: joined to the page URL when the page is
///   served over HTTP, otherwise treated as a local directory
pub fn translation_source(site_url: &Url, base: &str) -> Result<TranslationSource> {
    if base.starts_with("http://") || base.starts_with("https://") {
        let url = Url::parse(base)
            .with_context(|| format!("TRANSLATIONS_BASE is not a URL: {}", base))?;
        return Ok(TranslationSource::Http(url));
    }

    if let Some(path) = base.strip_prefix("file://") {
        return Ok(TranslationSource::Directory(PathBuf::from(path)));
    }

    let path = PathBuf::from(base);
    if path.is_absolute() {
        return Ok(TranslationSource::Directory(path));
    }

    match site_url.scheme() {
        "http" | "https" => {
            let url = site_url
                .join(base)
                .with_context(|| format!("Cannot resolve {} against {}", base, site_url))?;
            Ok(TranslationSource::Http(url))
        }
        _ => Ok(TranslationSource::Directory(path)),
    }
}

/// Split a comma-separated tag list, dropping blanks and `;q=` weights.
pub fn parse_language_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|tag| tag.split(';').next().unwrap_or_default().trim())
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Preferred languages from the POSIX locale environment.
///
/// `LANGUAGE` (colon-separated) wins over `LC_ALL`, which wins over `LANG`.
fn system_languages() -> Vec<String> {
    if let Ok(list) = std::env::var("LANGUAGE") {
        let tags: Vec<String> = list
            .split(':')
            .filter_map(posix_locale_to_tag)
            .collect();
        if !tags.is_empty() {
            return tags;
        }
    }

    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| posix_locale_to_tag(&value))
        .into_iter()
        .collect()
}

/// `es_ES.UTF-8@euro` → `es-ES`. `C` and `POSIX` carry no language.
pub fn posix_locale_to_tag(locale: &str) -> Option<String> {
    let base = locale.split(['.', '@']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}
