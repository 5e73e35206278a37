//! Domain/citation analysis for captured answer documents.
//!
//! Extracts markdown citations and bare URLs from raw answer text, reduces
//! each URL to an approximate registrable domain, and classifies domains as
//! the report's own, a competitor's, or external. Documents come from a
//! [`DocumentStore`]; competitor detection is delegated to a
//! [`CompetitorClassifier`].

pub mod analyzer;
pub mod classify;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod store;

pub use analyzer::{analyze_documents, analyze_domain_citations, DEFAULT_FETCH_CONCURRENCY};
pub use classify::{classify_domain, CompetitorClassifier, NoCompetitors, SEARCH_CHROME_DOMAIN};
pub use error::CitationError;
pub use extract::{citation_urls, extract_url_records, normalize_url, registrable_domain};
pub use gemini::GeminiClassifier;
pub use store::{DocumentStore, FsDocumentStore, HttpDocumentStore};
