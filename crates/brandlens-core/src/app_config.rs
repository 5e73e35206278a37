use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Root directory for the filesystem document store.
    pub document_root: PathBuf,
    /// When set, documents are fetched over HTTP from `<base>/<key>` instead.
    pub document_base_url: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub http_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("document_root", &self.document_root)
            .field("document_base_url", &self.document_base_url)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}
