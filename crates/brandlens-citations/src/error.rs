use thiserror::Error;

#[derive(Debug, Error)]
pub enum CitationError {
    /// A document could not be read from the document store.
    #[error("document store unavailable for '{key}': {reason}")]
    StoreUnavailable { key: String, reason: String },

    /// The competitor classification service failed or returned garbage.
    #[error("classification service unavailable: {0}")]
    ClassificationServiceUnavailable(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Scope(#[from] brandlens_core::CoreError),
}
