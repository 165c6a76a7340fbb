//! Initial language resolution.
//!
//! Precedence, first match wins:
//!   1. `?lang=xx` query parameter
//!   2. stored preference
//!   3. user-agent preferred languages (primary subtag only)
//!   4. registry default

use crate::i18n::{Language, LanguageRegistry};

/// Query parameter that selects the language.
pub const LANG_QUERY_PARAM: &str = "lang";

/// Everything resolution looks at, gathered by the caller.
#[derive(Debug, Clone, Default)]
pub struct ResolutionInputs<'a> {
    /// Value of the `lang` query parameter, if present
    pub query: Option<&'a str>,

    /// Previously stored preference, if any
    pub stored: Option<&'a str>,

    /// User-agent preferred language tags, most preferred first (e.g., "es-MX")
    pub user_languages: &'a [String],
}

/// Pick the initial language. Pure, and always returns a configured language.
pub fn resolve_language(registry: &LanguageRegistry, inputs: &ResolutionInputs<'_>) -> Language {
    if let Some(lang) = inputs.query.and_then(|code| registry.language(code)) {
        return lang;
    }

    if let Some(lang) = inputs.stored.and_then(|code| registry.language(code)) {
        return lang;
    }

    inputs
        .user_languages
        .iter()
        .find_map(|tag| registry.language(&primary_subtag(tag)))
        .unwrap_or_else(|| registry.default_language())
}

/// Primary subtag of a language tag, lowercased: `"es-MX"` → `"es"`.
pub fn primary_subtag(tag: &str) -> String {
    tag.split('-').next().unwrap_or_default().to_lowercase()
}

/// Read the `lang` query parameter from a URL.
pub fn query_language(url: &reqwest::Url) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == LANG_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
}
