//! Document Store implementations: raw answer text by content key.

use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use reqwest::Client;

use crate::error::CitationError;

/// Source of raw answer documents keyed by content key.
pub trait DocumentStore {
    /// Fetch the full text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CitationError::StoreUnavailable`] if the document cannot be
    /// read.
    fn fetch(&self, key: &str) -> impl Future<Output = Result<String, CitationError>> + Send;
}

/// Documents stored as files below a root directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `key` below the root, refusing keys that could escape it.
    fn resolve(&self, key: &str) -> Result<PathBuf, CitationError> {
        let relative = Path::new(key);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if key.trim().is_empty() || escapes {
            return Err(CitationError::StoreUnavailable {
                key: key.to_string(),
                reason: "key must be a relative path inside the document root".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl DocumentStore for FsDocumentStore {
    async fn fetch(&self, key: &str) -> Result<String, CitationError> {
        let path = self.resolve(key)?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| CitationError::StoreUnavailable {
                key: key.to_string(),
                reason: format!("{}: {e}", path.display()),
            })
    }
}

/// Documents served over HTTP at `<base_url>/<key>` (e.g. an object-storage
/// bucket endpoint).
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
}

impl HttpDocumentStore {
    /// # Errors
    ///
    /// Returns [`CitationError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CitationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("brandlens/0.1 (citation-analysis)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key.trim_start_matches('/'))
    }
}

impl DocumentStore for HttpDocumentStore {
    async fn fetch(&self, key: &str) -> Result<String, CitationError> {
        let unavailable = |reason: String| CitationError::StoreUnavailable {
            key: key.to_string(),
            reason,
        };

        let response = self
            .client
            .get(self.url_for(key))
            .send()
            .await
            .map_err(|e| unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("document store returned status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| unavailable(format!("body read failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_escaping_keys() {
        let store = FsDocumentStore::new("/srv/docs");
        for key in ["../secret.md", "a/../../b.md", "/etc/passwd", "", "  "] {
            assert!(
                matches!(
                    store.resolve(key),
                    Err(CitationError::StoreUnavailable { .. })
                ),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn resolve_joins_relative_keys() {
        let store = FsDocumentStore::new("/srv/docs");
        assert_eq!(
            store.resolve("report-1/answer.md").unwrap(),
            PathBuf::from("/srv/docs/report-1/answer.md")
        );
    }

    #[test]
    fn http_url_joins_without_double_slash() {
        let store = HttpDocumentStore::new("https://bucket.example.com/", 5).unwrap();
        assert_eq!(
            store.url_for("/report-1/a.md"),
            "https://bucket.example.com/report-1/a.md"
        );
    }
}
