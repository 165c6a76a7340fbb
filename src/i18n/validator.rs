//! Translation resource validation.
//!
//! Every `{code}.json` is expected to carry the same keys as the default
//! language's resource. This module compares a translation against the
//! default and reports what drifted: missing keys, extra keys, blank values,
//! and inline markup (e.g. `<strong>` in `data-i18n-html` strings) that was
//! lost or added in translation.

use crate::i18n::TranslationMap;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys the translation must provide but does not
    pub errors: Vec<String>,

    /// Non-critical issues worth a look
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation resources.
pub struct TranslationValidator;

static TAG_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Compare `translated` against the `reference` (default language) map.
    ///
    /// Errors:
    /// - keys present in the reference but missing from the translation
    ///
    /// Warnings:
    /// - keys only present in the translation
    /// - blank values where the reference has text
    /// - differing sets of inline tags for the same key
    ///
    /// Messages are sorted by key so reports are stable.
    pub fn validate(reference: &TranslationMap, translated: &TranslationMap) -> ValidationReport {
        let mut report = ValidationReport::new();

        let reference_keys: BTreeSet<&str> = reference.keys().collect();
        let translated_keys: BTreeSet<&str> = translated.keys().collect();

        for key in reference_keys.difference(&translated_keys) {
            report.errors.push(format!("Missing key: '{}'", key));
        }

        for key in translated_keys.difference(&reference_keys) {
            report
                .warnings
                .push(format!("Key not in default language: '{}'", key));
        }

        for key in reference_keys.intersection(&translated_keys) {
            let (Some(original), Some(value)) = (reference.get(key), translated.get(key)) else {
                continue;
            };

            if value.trim().is_empty() && !original.trim().is_empty() {
                report.warnings.push(format!("Empty value for key: '{}'", key));
            }

            let original_tags = Self::extract_tags(original);
            let translated_tags = Self::extract_tags(value);
            if original_tags != translated_tags {
                report.warnings.push(format!(
                    "Markup mismatch for '{}': default has {:?}, translation has {:?}",
                    key, original_tags, translated_tags
                ));
            }
        }

        report
    }

    /// Distinct lowercased tag names used in `text` (`<a href>` → `a`).
    pub fn extract_tags(text: &str) -> BTreeSet<String> {
        let regex = TAG_NAME_REGEX
            .get_or_init(|| Regex::new(r"</?\s*([a-zA-Z][a-zA-Z0-9]*)[^>]*>").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }
}
