//! Translation manager: owns the active language and translation map, and
//! keeps the document, address, preference store and switcher in step.
//!
//! Every operation takes `&mut self`, so a switch always finishes its
//! fetch → apply → switcher cycle before the next one starts.

use crate::document::{Document, NodeId};
use crate::history::{with_language_param, History};
use crate::i18n::resolver::{query_language, resolve_language, ResolutionInputs};
use crate::i18n::{
    Language, LanguageDescriptor, LanguageRegistry, TranslationMap, TranslationMetrics,
    TranslationStore,
};
use crate::preferences::{PreferenceStore, LANGUAGE_PREFERENCE_KEY};
use tracing::{debug, info, warn};

/// Marker: replace the element's text with the translation.
pub const TEXT_MARKER: &str = "data-i18n";
/// Marker: replace the element's inner markup with the translation.
pub const HTML_MARKER: &str = "data-i18n-html";
/// Marker: `attr:key;attr:key` pairs to set from translations.
pub const ATTR_MARKER: &str = "data-i18n-attr";

/// Attribute carrying the language code on switcher entries.
pub const LANG_ENTRY_ATTR: &str = "data-lang";

pub const SWITCHER_ID: &str = "langSwitcher";
pub const TOGGLE_ID: &str = "langBtn";
pub const MENU_ID: &str = "langMenu";
pub const CURRENT_LABEL_ID: &str = "langCurrent";

pub const ITEM_CLASS: &str = "lang-switcher__item";
pub const ITEM_ACTIVE_CLASS: &str = "lang-switcher__item--active";
pub const OPEN_CLASS: &str = "open";

pub struct TranslationManager<S, D, H, P> {
    registry: LanguageRegistry,
    store: S,
    document: D,
    history: H,
    preferences: P,
    current: Language,
    translations: TranslationMap,
    metrics: TranslationMetrics,
    toggle_wired: bool,
}

impl<S, D, H, P> TranslationManager<S, D, H, P>
where
    S: TranslationStore,
    D: Document,
    H: History,
    P: PreferenceStore,
{
    /// Create a manager. The active language starts as the registry default
    /// with no translations until [`init`](Self::init) runs.
    pub fn new(
        registry: LanguageRegistry,
        store: S,
        document: D,
        history: H,
        preferences: P,
    ) -> Self {
        let current = registry.default_language();
        Self {
            registry,
            store,
            document,
            history,
            preferences,
            current,
            translations: TranslationMap::new(),
            metrics: TranslationMetrics::new(),
            toggle_wired: false,
        }
    }

    /// Resolve, load, apply, render the switcher and wire its toggle.
    pub async fn init(&mut self, user_languages: &[String]) {
        self.current = self.resolve_language(user_languages);
        info!("Resolved language: {}", self.current);

        self.load_translations(self.current.code()).await;
        self.apply();
        self.build_switcher();

        self.toggle_wired = self.document.get_element_by_id(TOGGLE_ID).is_some()
            && self.document.get_element_by_id(SWITCHER_ID).is_some();
        if !self.toggle_wired {
            debug!("Language switcher toggle not present; dropdown stays static");
        }
    }

    /// Pick the initial language from the address, the stored preference and
    /// `user_languages`. Reads only.
    pub fn resolve_language(&self, user_languages: &[String]) -> Language {
        let query = query_language(self.history.location());
        let stored = self.preferences.get(LANGUAGE_PREFERENCE_KEY);

        resolve_language(
            &self.registry,
            &ResolutionInputs {
                query: query.as_deref(),
                stored: stored.as_deref(),
                user_languages,
            },
        )
    }

    /// Fetch the resource for `code` and make it the active map.
    ///
    /// A failure for a non-default code is retried once with the default
    /// language. If that fails too (or `code` was the default), the active
    /// map becomes empty and the authored page text stays as it is.
    pub async fn load_translations(&mut self, code: &str) {
        if let Some(map) = self.fetch(code).await {
            self.translations = map;
            return;
        }

        let default = self.registry.default_language();
        if code != default.code() {
            self.metrics.record_fallback();
            warn!(
                "Falling back to default language '{}' after '{}' failed",
                default, code
            );
            if let Some(map) = self.fetch(default.code()).await {
                self.translations = map;
                return;
            }
        }

        self.metrics.record_degraded();
        warn!("No translations available; keeping authored text");
        self.translations = TranslationMap::new();
    }

    async fn fetch(&self, code: &str) -> Option<TranslationMap> {
        self.metrics.record_load();
        match self.store.fetch(code).await {
            Ok(map) => {
                debug!("Loaded {} translations for '{}'", map.len(), code);
                Some(map)
            }
            Err(e) => {
                self.metrics.record_load_failure();
                warn!("Failed to load translations: {}", e);
                None
            }
        }
    }

    /// Write the active map into every marked element and set the document
    /// language. Keys missing from the map leave the element untouched.
    pub fn apply(&mut self) {
        for node in self.document.query_by_attribute(TEXT_MARKER) {
            if let Some(value) = self.lookup(node, TEXT_MARKER) {
                self.document.set_text_content(node, &value);
            }
        }

        for node in self.document.query_by_attribute(HTML_MARKER) {
            if let Some(value) = self.lookup(node, HTML_MARKER) {
                self.document.set_inner_html(node, &value);
            }
        }

        for node in self.document.query_by_attribute(ATTR_MARKER) {
            let spec = self.document.attribute(node, ATTR_MARKER).unwrap_or_default();
            for (name, key) in parse_attr_pairs(&spec) {
                match self.translations.get(key) {
                    Some(value) => {
                        self.metrics.record_key_applied();
                        self.document.set_attribute(node, name, value);
                    }
                    None => self.metrics.record_key_missing(),
                }
            }
        }

        self.document.set_document_language(self.current.code());
    }

    fn lookup(&self, node: NodeId, marker: &str) -> Option<String> {
        let key = self.document.attribute(node, marker)?;
        match self.translations.get(&key) {
            Some(value) => {
                self.metrics.record_key_applied();
                Some(value.to_string())
            }
            None => {
                self.metrics.record_key_missing();
                None
            }
        }
    }

    /// Switch to `language`. Does nothing when it is already active.
    ///
    /// Address and preference are updated before the fetch, and the page is
    /// re-rendered only once the new map is in place.
    pub async fn switch_to(&mut self, language: Language) {
        if language == self.current {
            debug!("Language '{}' already active", language);
            return;
        }
        info!("Switching language: {} -> {}", self.current, language);

        self.current = language;
        self.preferences.set(LANGUAGE_PREFERENCE_KEY, language.code());

        let param = if self.registry.is_default(language) {
            None
        } else {
            Some(language.code())
        };
        let url = with_language_param(self.history.location(), param);
        self.history.replace_state(url);

        self.load_translations(language.code()).await;
        self.apply();
        self.build_switcher();
    }

    /// Re-render the switcher list and current label from scratch.
    ///
    /// Does nothing unless both `#langMenu` and `#langCurrent` exist.
    pub fn build_switcher(&mut self) {
        let (Some(menu), Some(label)) = (
            self.document.get_element_by_id(MENU_ID),
            self.document.get_element_by_id(CURRENT_LABEL_ID),
        ) else {
            return;
        };

        let flag = self
            .registry
            .descriptor(self.current)
            .map(|d| d.flag.to_string())
            .unwrap_or_else(|| self.current.code().to_uppercase());
        self.document.set_text_content(label, &flag);

        self.document.clear_children(menu);
        let entries: Vec<LanguageDescriptor> = self.registry.list().to_vec();
        for lang in entries {
            let item = self.document.append_element(menu, "li");
            let class = if lang.code == self.current.code() {
                format!("{} {}", ITEM_CLASS, ITEM_ACTIVE_CLASS)
            } else {
                ITEM_CLASS.to_string()
            };
            self.document.set_attribute(item, "class", &class);
            self.document.set_attribute(item, LANG_ENTRY_ATTR, lang.code);
            self.document.set_text_content(item, lang.label);
        }
    }

    /// Dispatch a click on `target`.
    ///
    /// - inside the toggle button: open/close the dropdown, nothing else
    /// - inside a language entry: switch to it, then close the dropdown
    /// - anywhere else: close the dropdown
    pub async fn click(&mut self, target: NodeId) {
        if self.toggle_wired {
            if let Some(button) = self.document.get_element_by_id(TOGGLE_ID) {
                if self.document.is_within(target, button) {
                    self.toggle_switcher();
                    return;
                }
            }
        }

        let requested = self
            .document
            .closest_with_attribute(target, LANG_ENTRY_ATTR)
            .and_then(|entry| self.document.attribute(entry, LANG_ENTRY_ATTR));
        if let Some(code) = requested {
            match self.registry.language(&code) {
                Some(language) => self.switch_to(language).await,
                None => warn!("Ignoring click on unknown language entry '{}'", code),
            }
        }

        self.close_switcher();
    }

    fn toggle_switcher(&mut self) {
        if let Some(switcher) = self.document.get_element_by_id(SWITCHER_ID) {
            let open = self.document.toggle_class(switcher, OPEN_CLASS);
            debug!("Language switcher {}", if open { "opened" } else { "closed" });
        }
    }

    fn close_switcher(&mut self) {
        if !self.toggle_wired {
            return;
        }
        if let Some(switcher) = self.document.get_element_by_id(SWITCHER_ID) {
            self.document.remove_class(switcher, OPEN_CLASS);
        }
    }

    pub fn is_switcher_open(&self) -> bool {
        self.document
            .get_element_by_id(SWITCHER_ID)
            .map(|switcher| self.document.has_class(switcher, OPEN_CLASS))
            .unwrap_or(false)
    }

    pub fn current(&self) -> Language {
        self.current
    }

    pub fn languages(&self) -> &[LanguageDescriptor] {
        self.registry.list()
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn translations(&self) -> &TranslationMap {
        &self.translations
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }
}

/// Split `"title:hero.title; aria-label:hero.aria"` into `(attr, key)` pairs.
///
/// Each pair splits on its first `:`; both sides are trimmed and pairs with
/// an empty side are skipped.
pub fn parse_attr_pairs(spec: &str) -> Vec<(&str, &str)> {
    spec.split(';')
        .filter_map(|pair| pair.split_once(':'))
        .map(|(name, key)| (name.trim(), key.trim()))
        .filter(|(name, key)| !name.is_empty() && !key.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::history::MemoryHistory;
    use crate::i18n::MemoryTranslationStore;
    use crate::preferences::MemoryPreferences;
    use reqwest::Url;

    type TestManager = TranslationManager<
        MemoryTranslationStore,
        MemoryDocument,
        MemoryHistory,
        MemoryPreferences,
    >;

    const EN: &str = r#"{
        "nav.pricing": "Pricing",
        "hero.title": "Plan your week",
        "hero.sub": "Save <strong>hours</strong>",
        "search.placeholder": "Search",
        "search.label": "Search the site"
    }"#;

    const ES: &str = r#"{
        "nav.pricing": "Precios",
        "hero.title": "Planifica tu semana",
        "hero.sub": "Ahorra <strong>horas</strong>",
        "search.placeholder": "Buscar",
        "search.label": "Buscar en el sitio"
    }"#;

    struct Page {
        doc: MemoryDocument,
        pricing: NodeId,
        title: NodeId,
        sub: NodeId,
        search: NodeId,
        untranslated: NodeId,
        outside: NodeId,
    }

    fn page() -> Page {
        let mut doc = MemoryDocument::new();
        let body = doc.body();

        let header = doc.append_with(body, "header", &[], "");
        let pricing = doc.append_with(header, "a", &[(TEXT_MARKER, "nav.pricing")], "Pricing");
        let switcher = doc.append_with(
            header,
            "div",
            &[("id", SWITCHER_ID), ("class", "lang-switcher")],
            "",
        );
        let button = doc.append_with(switcher, "button", &[("id", TOGGLE_ID)], "");
        doc.append_with(button, "span", &[("id", CURRENT_LABEL_ID)], "EN");
        doc.append_with(switcher, "ul", &[("id", MENU_ID)], "");

        let title = doc.append_with(body, "h1", &[(TEXT_MARKER, "hero.title")], "Plan your week");
        let sub = doc.append_with(body, "p", &[(HTML_MARKER, "hero.sub")], "Save hours");
        let search = doc.append_with(
            body,
            "input",
            &[(
                ATTR_MARKER,
                "placeholder:search.placeholder; aria-label:search.label;title:missing.key",
            )],
            "",
        );
        let untranslated =
            doc.append_with(body, "p", &[(TEXT_MARKER, "not.in.map")], "Authored text");
        let outside = doc.append_with(body, "footer", &[], "Footer");

        Page {
            doc,
            pricing,
            title,
            sub,
            search,
            untranslated,
            outside,
        }
    }

    fn manager_with(doc: MemoryDocument, url: &str, prefs: MemoryPreferences) -> TestManager {
        let store = MemoryTranslationStore::new()
            .with_resource("en", EN)
            .with_resource("es", ES);
        TranslationManager::new(
            LanguageRegistry::builtin().clone(),
            store,
            doc,
            MemoryHistory::new(Url::parse(url).unwrap()),
            prefs,
        )
    }

    fn spanish() -> Language {
        LanguageRegistry::builtin().language("es").unwrap()
    }

    fn english() -> Language {
        LanguageRegistry::builtin().language("en").unwrap()
    }

    fn menu_entries(manager: &TestManager) -> Vec<String> {
        let doc = manager.document();
        let menu = doc.get_element_by_id(MENU_ID).unwrap();
        doc.children(menu).into_iter().map(|li| doc.outer_html(li)).collect()
    }

    // ==================== parse_attr_pairs Tests ====================

    #[test]
    fn test_parse_attr_pairs() {
        assert_eq!(
            parse_attr_pairs("placeholder:a; aria-label : b"),
            vec![("placeholder", "a"), ("aria-label", "b")]
        );
    }

    #[test]
    fn test_parse_attr_pairs_skips_broken_entries() {
        assert_eq!(
            parse_attr_pairs("title:;:key;novalue;;alt:img.alt;"),
            vec![("alt", "img.alt")]
        );
    }

    #[test]
    fn test_parse_attr_pairs_splits_on_first_colon() {
        assert_eq!(parse_attr_pairs("href:link:url"), vec![("href", "link:url")]);
    }

    // ==================== init Tests ====================

    #[tokio::test]
    async fn test_init_applies_resolved_language() {
        let p = page();
        let mut manager =
            manager_with(p.doc, "https://kalenex.com/?lang=es", MemoryPreferences::new());

        manager.init(&[]).await;

        let doc = manager.document();
        assert_eq!(manager.current(), spanish());
        assert_eq!(doc.text_content(p.pricing), "Precios");
        assert_eq!(doc.text_content(p.title), "Planifica tu semana");
        assert_eq!(doc.inner_html(p.sub), "Ahorra <strong>horas</strong>");
        assert_eq!(doc.attribute(p.search, "placeholder").as_deref(), Some("Buscar"));
        assert_eq!(
            doc.attribute(p.search, "aria-label").as_deref(),
            Some("Buscar en el sitio")
        );
        assert_eq!(doc.document_language().as_deref(), Some("es"));
    }

    #[tokio::test]
    async fn test_init_does_not_write_address_or_preference() {
        let p = page();
        let prefs = MemoryPreferences::new().with_value(LANGUAGE_PREFERENCE_KEY, "es");
        let mut manager = manager_with(p.doc, "https://kalenex.com/", prefs);

        manager.init(&["en-US".to_string()]).await;

        assert_eq!(manager.current(), spanish());
        assert!(manager.history().replacements().is_empty());
        assert_eq!(manager.preferences().writes(), 0);
    }

    #[tokio::test]
    async fn test_init_uses_user_agent_languages() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());

        manager.init(&["fr-FR".to_string(), "es-MX".to_string()]).await;

        assert_eq!(manager.current(), spanish());
        assert_eq!(manager.store().requests(), vec!["es".to_string()]);
    }

    // ==================== apply Tests ====================

    #[tokio::test]
    async fn test_apply_leaves_missing_keys_untouched() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());

        manager.init(&[]).await;

        let doc = manager.document();
        assert_eq!(doc.text_content(p.untranslated), "Authored text");
        assert_eq!(doc.attribute(p.search, "title"), None);
        assert!(manager.metrics().keys_missing() >= 2);
    }

    #[tokio::test]
    async fn test_apply_with_empty_map_keeps_authored_content() {
        let p = page();
        let store = MemoryTranslationStore::new();
        let mut manager = TranslationManager::new(
            LanguageRegistry::builtin().clone(),
            store,
            p.doc,
            MemoryHistory::new(Url::parse("https://kalenex.com/").unwrap()),
            MemoryPreferences::new(),
        );

        manager.init(&[]).await;

        let doc = manager.document();
        assert!(manager.translations().is_empty());
        assert_eq!(doc.text_content(p.title), "Plan your week");
        assert_eq!(doc.text_content(p.sub), "Save hours");
        assert_eq!(doc.document_language().as_deref(), Some("en"));
    }

    // ==================== load_translations Tests ====================

    #[tokio::test]
    async fn test_load_unknown_code_falls_back_to_default() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());

        manager.load_translations("xx").await;

        assert_eq!(manager.translations().get("hero.title"), Some("Plan your week"));
        assert_eq!(
            manager.store().requests(),
            vec!["xx".to_string(), "en".to_string()]
        );
        assert_eq!(manager.metrics().fallbacks(), 1);
        assert_eq!(manager.metrics().degraded(), 0);
    }

    #[tokio::test]
    async fn test_load_malformed_resource_falls_back_to_default() {
        let store = MemoryTranslationStore::new()
            .with_resource("en", EN)
            .with_resource("es", "{ broken");
        let mut manager = TranslationManager::new(
            LanguageRegistry::builtin().clone(),
            store,
            MemoryDocument::new(),
            MemoryHistory::new(Url::parse("https://kalenex.com/").unwrap()),
            MemoryPreferences::new(),
        );

        manager.load_translations("es").await;

        assert_eq!(manager.translations().get("nav.pricing"), Some("Pricing"));
    }

    #[tokio::test]
    async fn test_load_default_failure_retries_nothing() {
        let store = MemoryTranslationStore::new().with_resource("es", ES);
        let mut manager = TranslationManager::new(
            LanguageRegistry::builtin().clone(),
            store,
            MemoryDocument::new(),
            MemoryHistory::new(Url::parse("https://kalenex.com/").unwrap()),
            MemoryPreferences::new(),
        );

        manager.load_translations("en").await;

        assert!(manager.translations().is_empty());
        assert_eq!(manager.store().fetch_count(), 1);
        assert_eq!(manager.metrics().degraded(), 1);
    }

    #[tokio::test]
    async fn test_load_both_failing_stops_after_one_retry() {
        let store = MemoryTranslationStore::new();
        let mut manager = TranslationManager::new(
            LanguageRegistry::builtin().clone(),
            store,
            MemoryDocument::new(),
            MemoryHistory::new(Url::parse("https://kalenex.com/").unwrap()),
            MemoryPreferences::new(),
        );

        manager.load_translations("es").await;

        assert!(manager.translations().is_empty());
        assert_eq!(manager.store().fetch_count(), 2);
        assert_eq!(manager.metrics().load_failures(), 2);
    }

    #[tokio::test]
    async fn test_load_replaces_map_wholesale() {
        let store = MemoryTranslationStore::new()
            .with_resource("en", r#"{"only.en": "x", "shared": "en"}"#)
            .with_resource("es", r#"{"shared": "es"}"#);
        let mut manager = TranslationManager::new(
            LanguageRegistry::builtin().clone(),
            store,
            MemoryDocument::new(),
            MemoryHistory::new(Url::parse("https://kalenex.com/").unwrap()),
            MemoryPreferences::new(),
        );

        manager.load_translations("en").await;
        manager.load_translations("es").await;

        assert_eq!(manager.translations().get("shared"), Some("es"));
        assert!(!manager.translations().contains_key("only.en"));
    }

    // ==================== switch_to Tests ====================

    #[tokio::test]
    async fn test_switch_to_same_language_is_noop() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());
        manager.init(&[]).await;
        let fetches = manager.store().fetch_count();

        manager.switch_to(english()).await;

        assert!(manager.history().replacements().is_empty());
        assert_eq!(manager.preferences().writes(), 0);
        assert_eq!(manager.store().fetch_count(), fetches);
    }

    #[tokio::test]
    async fn test_switch_to_spanish_from_default() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());
        manager.init(&[]).await;

        manager.switch_to(spanish()).await;

        assert_eq!(
            manager.preferences().get(LANGUAGE_PREFERENCE_KEY).as_deref(),
            Some("es")
        );
        assert_eq!(
            query_language(manager.history().location()).as_deref(),
            Some("es")
        );
        let doc = manager.document();
        assert_eq!(doc.document_language().as_deref(), Some("es"));
        assert_eq!(doc.text_content(p.title), "Planifica tu semana");

        let label = doc.get_element_by_id(CURRENT_LABEL_ID).unwrap();
        assert_eq!(doc.text_content(label), "ES");

        let entries = menu_entries(&manager);
        assert!(entries[1].contains(ITEM_ACTIVE_CLASS));
        assert!(entries[1].contains(r#"data-lang="es""#));
        assert!(!entries[0].contains(ITEM_ACTIVE_CLASS));
    }

    #[tokio::test]
    async fn test_switch_to_default_removes_query_param() {
        let p = page();
        let mut manager = manager_with(
            p.doc,
            "https://kalenex.com/?ref=ad&lang=es",
            MemoryPreferences::new(),
        );
        manager.init(&[]).await;

        manager.switch_to(english()).await;

        assert_eq!(
            manager.history().location().as_str(),
            "https://kalenex.com/?ref=ad"
        );
        assert_eq!(
            manager.preferences().get(LANGUAGE_PREFERENCE_KEY).as_deref(),
            Some("en")
        );
        assert_eq!(manager.document().text_content(p.title), "Plan your week");
    }

    // ==================== build_switcher Tests ====================

    #[tokio::test]
    async fn test_build_switcher_is_idempotent() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());
        manager.init(&[]).await;

        manager.build_switcher();
        let first = menu_entries(&manager);
        manager.build_switcher();
        let second = menu_entries(&manager);

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(
            first[0],
            r#"<li class="lang-switcher__item lang-switcher__item--active" data-lang="en">English</li>"#
        );
        assert_eq!(
            first[1],
            r#"<li class="lang-switcher__item" data-lang="es">Español</li>"#
        );
    }

    #[tokio::test]
    async fn test_build_switcher_without_container_is_noop() {
        let mut doc = MemoryDocument::new();
        let title = doc.append_with(doc.body(), "h1", &[(TEXT_MARKER, "hero.title")], "x");
        let mut manager = manager_with(doc, "https://kalenex.com/", MemoryPreferences::new());

        manager.init(&[]).await;
        manager.build_switcher();

        assert_eq!(manager.document().text_content(title), "Plan your week");
        assert!(manager.document().query_by_attribute(LANG_ENTRY_ATTR).is_empty());
    }

    // ==================== click Tests ====================

    #[tokio::test]
    async fn test_click_toggle_opens_and_closes() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());
        manager.init(&[]).await;
        let label = manager.document().get_element_by_id(CURRENT_LABEL_ID).unwrap();

        manager.click(label).await;
        assert!(manager.is_switcher_open());

        manager.click(label).await;
        assert!(!manager.is_switcher_open());
    }

    #[tokio::test]
    async fn test_click_outside_closes() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());
        manager.init(&[]).await;
        let button = manager.document().get_element_by_id(TOGGLE_ID).unwrap();

        manager.click(button).await;
        manager.click(p.outside).await;

        assert!(!manager.is_switcher_open());
    }

    #[tokio::test]
    async fn test_click_entry_switches_and_closes() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());
        manager.init(&[]).await;
        let button = manager.document().get_element_by_id(TOGGLE_ID).unwrap();
        manager.click(button).await;

        let entry = manager.document().query_by_attribute(LANG_ENTRY_ATTR)[1];
        manager.click(entry).await;

        assert_eq!(manager.current(), spanish());
        assert!(!manager.is_switcher_open());
        assert_eq!(manager.document().text_content(p.pricing), "Precios");
    }

    #[tokio::test]
    async fn test_click_unknown_entry_is_ignored() {
        let p = page();
        let mut manager = manager_with(p.doc, "https://kalenex.com/", MemoryPreferences::new());
        manager.init(&[]).await;

        let body = manager.document().body();
        let rogue = manager
            .document_mut()
            .append_with(body, "li", &[(LANG_ENTRY_ATTR, "xx")], "??");
        manager.click(rogue).await;

        assert_eq!(manager.current(), english());
        assert_eq!(manager.preferences().writes(), 0);
    }

    #[tokio::test]
    async fn test_click_without_toggle_still_switches() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        doc.append_with(body, "span", &[("id", CURRENT_LABEL_ID)], "");
        doc.append_with(body, "ul", &[("id", MENU_ID)], "");
        let mut manager = manager_with(doc, "https://kalenex.com/", MemoryPreferences::new());
        manager.init(&[]).await;

        let entry = manager.document().query_by_attribute(LANG_ENTRY_ATTR)[1];
        manager.click(entry).await;

        assert_eq!(manager.current(), spanish());
        assert!(!manager.is_switcher_open());
    }
}
