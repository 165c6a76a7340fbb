//! Language layer for the Kalenex marketing site.
//!
//! Resolves the active language, loads its translations, applies them to a
//! document and drives the language switcher. The browser pieces (document,
//! address bar, local storage) sit behind small traits so the same logic runs
//! against in-memory implementations.

pub mod config;
pub mod document;
pub mod history;
pub mod i18n;
pub mod preferences;
