//! Language registry: the fixed set of languages the site ships.
//!
//! The registry is plain configuration. It is validated once on construction
//! and never mutated afterwards. The site's own set is available through
//! [`LanguageRegistry::builtin`], which uses a `OnceLock` so every caller
//! shares the same instance.

use crate::i18n::Language;
use anyhow::{bail, Result};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Display metadata for a supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDescriptor {
    /// Short language code, also the translation resource name (e.g., "en", "es")
    pub code: &'static str,

    /// Human-readable name shown in the switcher (e.g., "English", "Español")
    pub label: &'static str,

    /// Short abbreviation shown on the switcher button (e.g., "EN", "ES")
    pub flag: &'static str,
}

/// Ordered set of supported languages plus the designated default.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageDescriptor>,
    default_code: &'static str,
}

/// Site registry instance (initialized lazily)
static BUILTIN: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Build a registry from descriptors and a default code.
    ///
    /// # Errors
    /// Fails if `languages` is empty, contains a duplicate or blank code, or
    /// if `default_code` is not one of the configured codes.
    pub fn new(languages: Vec<LanguageDescriptor>, default_code: &'static str) -> Result<Self> {
        if languages.is_empty() {
            bail!("Language registry must contain at least one language");
        }

        let mut seen = HashSet::new();
        for lang in &languages {
            if lang.code.trim().is_empty() {
                bail!("Language code must not be empty");
            }
            if !seen.insert(lang.code) {
                bail!("Duplicate language code: '{}'", lang.code);
            }
        }

        if !seen.contains(default_code) {
            bail!(
                "Default language '{}' is not one of the configured languages",
                default_code
            );
        }

        Ok(Self {
            languages,
            default_code,
        })
    }

    /// The languages shipped with the site (English is the default).
    pub fn builtin() -> &'static LanguageRegistry {
        BUILTIN.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
            default_code: "en",
        })
    }

    /// Look up a descriptor by exact code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageDescriptor> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Validate a code against the registry.
    ///
    /// Matching is exact: `"ES"` is not `"es"`.
    pub fn language(&self, code: &str) -> Option<Language> {
        self.get_by_code(code).map(|lang| Language::new(lang.code))
    }

    /// Check if a code is configured.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// All descriptors, in display order.
    pub fn list(&self) -> &[LanguageDescriptor] {
        &self.languages
    }

    /// The default language.
    pub fn default_language(&self) -> Language {
        Language::new(self.default_code)
    }

    /// Descriptor for a validated language.
    ///
    /// Returns `None` only when `language` came from a different registry
    /// that contains codes this one does not.
    pub fn descriptor(&self, language: Language) -> Option<&LanguageDescriptor> {
        self.get_by_code(language.code())
    }

    /// Check if `language` is the registry default.
    pub fn is_default(&self, language: Language) -> bool {
        language.code() == self.default_code
    }
}

/// Languages shipped with the site.
///
/// Adding a language means adding an entry here and an `i18n/{code}.json`
/// resource with the same keys as `en.json`.
fn default_languages() -> Vec<LanguageDescriptor> {
    vec![
        LanguageDescriptor {
            code: "en",
            label: "English",
            flag: "EN",
        },
        LanguageDescriptor {
            code: "es",
            label: "Español",
            flag: "ES",
        },
    ]
}
