//! Language type: a code that has been validated against a registry.

use std::fmt;

/// A validated language.
///
/// Values can only be obtained from a [`LanguageRegistry`](crate::i18n::LanguageRegistry),
/// so holding one means the code is part of the configured set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// Short language code (e.g., "en", "es")
    code: &'static str,
}

impl Language {
    pub(crate) fn new(code: &'static str) -> Self {
        Self { code }
    }

    /// Get the language code.
    ///
    /// # Returns
    /// The code as a static string (e.g., "en", "es").
    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl PartialEq<str> for Language {
    fn eq(&self, other: &str) -> bool {
        self.code == other
    }
}

impl PartialEq<&str> for Language {
    fn eq(&self, other: &&str) -> bool {
        self.code == *other
    }
}
