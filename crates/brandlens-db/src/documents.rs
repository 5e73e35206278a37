//! Lookups against the `report_documents` table.

use brandlens_core::Scope;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `report_documents` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportDocumentRow {
    pub id: i64,
    pub report_id: String,
    pub sub_scope_id: Option<String>,
    pub model: String,
    pub captured_at: DateTime<Utc>,
    pub content_key: String,
    pub snapshot_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Every document captured inside a scope's report, model, and inclusive
/// date window, in capture order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_report_documents(
    pool: &PgPool,
    scope: &Scope,
) -> Result<Vec<ReportDocumentRow>, DbError> {
    let rows = sqlx::query_as::<_, ReportDocumentRow>(
        "SELECT id, report_id, sub_scope_id, model, captured_at, content_key, \
             snapshot_key, created_at \
         FROM report_documents \
         WHERE report_id = $1 \
           AND captured_at >= $2 \
           AND captured_at <= $3 \
           AND ($4::TEXT IS NULL OR lower(model) = lower($4)) \
         ORDER BY captured_at, id",
    )
    .bind(&scope.report_id)
    .bind(scope.from_date)
    .bind(scope.to_date)
    .bind(scope.model.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Content keys of the documents in scope, in capture order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_document_keys(pool: &PgPool, scope: &Scope) -> Result<Vec<String>, DbError> {
    let keys: Vec<String> = list_report_documents(pool, scope)
        .await?
        .into_iter()
        .map(|doc| doc.content_key)
        .collect();

    tracing::debug!(
        report_id = %scope.report_id,
        documents = keys.len(),
        "resolved document keys for scope"
    );

    Ok(keys)
}
