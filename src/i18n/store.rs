//! Translation stores: where `{code}.json` resources come from.
//!
//! Every retrieval problem maps to a [`StoreError`]. The manager treats all of
//! them the same way (fall back to the default language once), but the
//! variants keep the cause visible in logs.

use crate::i18n::TranslationMap;
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Failure to retrieve a translation resource.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("translation resource for '{0}' not found")]
    NotFound(String),

    #[error("translation resource for '{code}' returned HTTP {status}")]
    Status { code: String, status: u16 },

    #[error("translation resource for '{code}' is malformed: {source}")]
    Malformed {
        code: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to fetch translation resource for '{code}': {source}")]
    Transport {
        code: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read translation resource for '{code}': {source}")]
    Io {
        code: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' is not a valid resource name")]
    InvalidCode(String),
}

/// Source of translation resources, addressed by language code.
pub trait TranslationStore {
    /// Fetch and parse the resource for `code`.
    fn fetch(&self, code: &str)
        -> impl Future<Output = Result<TranslationMap, StoreError>> + Send;
}

/// Resource names are bare codes; anything that could escape the base
/// location is rejected before a request is made.
fn check_code(code: &str) -> Result<(), StoreError> {
    let valid = !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCode(code.to_string()))
    }
}

fn parse(code: &str, body: &str) -> Result<TranslationMap, StoreError> {
    TranslationMap::from_json(body).map_err(|source| StoreError::Malformed {
        code: code.to_string(),
        source,
    })
}

// ==================== HTTP ====================

/// Fetches `{base}/{code}.json` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTranslationStore {
    client: reqwest::Client,
    base: reqwest::Url,
}

impl HttpTranslationStore {
    /// Create a store rooted at `base`.
    ///
    /// A trailing `/` is added when missing so that `join` keeps the last
    /// path segment.
    pub fn new(client: reqwest::Client, mut base: reqwest::Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { client, base }
    }

    /// Resolve `relative` (e.g., `"i18n/"`) against the page address, the
    /// way a browser resolves a relative `fetch`.
    pub fn for_page(
        client: reqwest::Client,
        page: &reqwest::Url,
        relative: &str,
    ) -> anyhow::Result<Self> {
        let base = page.join(relative)?;
        Ok(Self::new(client, base))
    }

    pub fn base(&self) -> &reqwest::Url {
        &self.base
    }

    fn resource_url(&self, code: &str) -> Result<reqwest::Url, StoreError> {
        check_code(code)?;
        self.base
            .join(&format!("{}.json", code))
            .map_err(|_| StoreError::InvalidCode(code.to_string()))
    }
}

impl TranslationStore for HttpTranslationStore {
    async fn fetch(&self, code: &str) -> Result<TranslationMap, StoreError> {
        let url = self.resource_url(code)?;
        debug!("Fetching translations from {}", url);

        let transport = |source| StoreError::Transport {
            code: code.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(code.to_string()));
        }
        if !status.is_success() {
            return Err(StoreError::Status {
                code: code.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        parse(code, &body)
    }
}

// ==================== Filesystem ====================

/// Reads `{dir}/{code}.json` from disk.
#[derive(Debug, Clone)]
pub struct FsTranslationStore {
    dir: PathBuf,
}

impl FsTranslationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TranslationStore for FsTranslationStore {
    async fn fetch(&self, code: &str) -> Result<TranslationMap, StoreError> {
        check_code(code)?;
        let path = self.dir.join(format!("{}.json", code));
        debug!("Reading translations from {}", path.display());

        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => StoreError::NotFound(code.to_string()),
                _ => StoreError::Io {
                    code: code.to_string(),
                    source,
                },
            })?;

        parse(code, &body)
    }
}

// ==================== In-memory ====================

/// Resources held as raw JSON text; records every request.
#[derive(Debug, Default)]
pub struct MemoryTranslationStore {
    resources: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
    fetch_count: AtomicUsize,
}

impl MemoryTranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource. `json` is parsed on fetch, so malformed text is kept
    /// as-is and surfaces as [`StoreError::Malformed`].
    pub fn with_resource(mut self, code: impl Into<String>, json: impl Into<String>) -> Self {
        self.resources.insert(code.into(), json.into());
        self
    }

    /// Number of fetches so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::Relaxed)
    }

    /// Codes requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl TranslationStore for MemoryTranslationStore {
    async fn fetch(&self, code: &str) -> Result<TranslationMap, StoreError> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(code.to_string());
        }

        let body = self
            .resources
            .get(code)
            .ok_or_else(|| StoreError::NotFound(code.to_string()))?;
        parse(code, body)
    }
}
