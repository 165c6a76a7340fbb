//! Internationalization (i18n) for the Kalenex site.
//!
//! # Architecture
//!
//! - `registry`: The fixed set of supported languages and the default
//! - `language`: Validated language type handed out by the registry
//! - `map`: Flat key → string translation table
//! - `resolver`: Initial language resolution (query > stored > user agent > default)
//! - `store`: Where translation resources are fetched from
//! - `manager`: Loads, applies and switches translations on a document
//! - `validator`: Checks translation resources against the default language
//! - `metrics`: Load and apply counters
//!
//! # Example
//!
//! ```rust,ignore
//! use kalenex_i18n::i18n::{LanguageRegistry, TranslationManager};
//!
//! let mut manager = TranslationManager::new(
//!     LanguageRegistry::builtin().clone(),
//!     store,
//!     document,
//!     history,
//!     preferences,
//! );
//! manager.init(&user_languages).await;
//!
//! if let Some(spanish) = manager.registry().language("es") {
//!     manager.switch_to(spanish).await;
//! }
//! ```

mod language;
mod manager;
mod map;
mod metrics;
mod registry;
mod resolver;
mod store;
mod validator;

pub use language::Language;
pub use manager::{
    parse_attr_pairs, TranslationManager, ATTR_MARKER, CURRENT_LABEL_ID, HTML_MARKER,
    ITEM_ACTIVE_CLASS, ITEM_CLASS, LANG_ENTRY_ATTR, MENU_ID, OPEN_CLASS, SWITCHER_ID,
    TEXT_MARKER, TOGGLE_ID,
};
pub use map::TranslationMap;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use registry::{LanguageDescriptor, LanguageRegistry};
pub use resolver::{
    primary_subtag, query_language, resolve_language, ResolutionInputs, LANG_QUERY_PARAM,
};
pub use store::{
    FsTranslationStore, HttpTranslationStore, MemoryTranslationStore, StoreError,
    TranslationStore,
};
pub use validator::{TranslationValidator, ValidationReport};
