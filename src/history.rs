//! Navigable address of the page.
//!
//! Mirrors `window.location` plus `history.replaceState`: the address can be
//! read and replaced without a reload.

use crate::i18n::LANG_QUERY_PARAM;
use reqwest::Url;

pub trait History {
    fn location(&self) -> &Url;

    /// Replace the current entry (no new history entry, no reload).
    fn replace_state(&mut self, url: Url);
}

/// In-memory history that keeps every replacement.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    current: Url,
    replacements: Vec<Url>,
}

impl MemoryHistory {
    pub fn new(url: Url) -> Self {
        Self {
            current: url,
            replacements: Vec::new(),
        }
    }

    /// Every URL passed to `replace_state`, oldest first.
    pub fn replacements(&self) -> &[Url] {
        &self.replacements
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &Url {
        &self.current
    }

    fn replace_state(&mut self, url: Url) {
        self.replacements.push(url.clone());
        self.current = url;
    }
}

/// Copy of `url` with the `lang` parameter set to `code`, or removed when
/// `code` is `None`. Other query parameters keep their order; an empty query
/// is dropped entirely so the canonical form has no trailing `?`.
pub fn with_language_param(url: &Url, code: Option<&str>) -> Url {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != LANG_QUERY_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    if let Some(code) = code {
        pairs.push((LANG_QUERY_PARAM.to_string(), code.to_string()));
    }

    let mut updated = url.clone();
    if pairs.is_empty() {
        updated.set_query(None);
    } else {
        updated.query_pairs_mut().clear().extend_pairs(pairs);
    }
    updated
}
