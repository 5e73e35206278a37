//! `citations` command handler.

use brandlens_citations::{
    analyze_domain_citations, DocumentStore, FsDocumentStore, GeminiClassifier,
    HttpDocumentStore, NoCompetitors,
};
use brandlens_core::{AppConfig, CitationReport, CoreError, Scope};

use crate::print_data;
use crate::scope_args::ScopeArgs;

/// Analyze the citations in every document captured for a scope.
///
/// Documents are read over HTTP when `BRANDLENS_DOCUMENT_BASE_URL` is set and
/// from `BRANDLENS_DOCUMENT_ROOT` otherwise. Without `GEMINI_API_KEY` no
/// domain is classified as a competitor.
///
/// # Errors
///
/// Returns an error if the scope is invalid, the fact store query fails, a
/// document cannot be fetched, or the classification service fails.
pub(crate) async fn run_citations(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    args: ScopeArgs,
    domain: &str,
) -> anyhow::Result<()> {
    let scope = args.into_scope()?;
    if domain.trim().is_empty() {
        return Err(CoreError::InvalidScope("target domain is required".to_string()).into());
    }
    let keys = brandlens_db::list_document_keys(pool, &scope).await?;

    let report = if let Some(base_url) = config.document_base_url.as_deref() {
        let store = HttpDocumentStore::new(base_url, config.http_timeout_secs)?;
        analyze_with_store(config, &scope, domain, &keys, &store).await?
    } else {
        let store = FsDocumentStore::new(config.document_root.clone());
        analyze_with_store(config, &scope, domain, &keys, &store).await?
    };

    print_data(&report)
}

async fn analyze_with_store<S: DocumentStore + Sync>(
    config: &AppConfig,
    scope: &Scope,
    domain: &str,
    keys: &[String],
    store: &S,
) -> anyhow::Result<CitationReport> {
    let report = match config.gemini_api_key.as_deref() {
        Some(api_key) => {
            let classifier =
                GeminiClassifier::new(api_key, &config.gemini_model, config.http_timeout_secs)?;
            analyze_domain_citations(scope, domain, keys, store, &classifier).await?
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; competitor classification disabled");
            analyze_domain_citations(scope, domain, keys, store, &NoCompetitors).await?
        }
    };
    Ok(report)
}
