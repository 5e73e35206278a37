//! Database operations for the append-only `observations` table.

use brandlens_core::{ModelFilter, Observation, Scope};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;

use crate::DbError;

/// A row from the `observations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ObservationRow {
    pub id: i64,
    pub report_id: String,
    pub sub_scope_id: Option<String>,
    pub brand: String,
    pub mention_count: i64,
    pub position: i64,
    pub observed_at: DateTime<Utc>,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl From<ObservationRow> for Observation {
    fn from(row: ObservationRow) -> Self {
        Observation {
            report_id: row.report_id,
            sub_scope_id: row.sub_scope_id,
            brand: row.brand,
            mention_count: row.mention_count,
            position: row.position,
            date: row.observed_at,
            model: row.model,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, report_id, sub_scope_id, brand, mention_count, position, \
     observed_at, model, created_at \
     FROM observations";

/// Append a batch of observations in a single transaction.
///
/// Returns the number of rows written. An empty batch is a no-op.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; the whole batch is rolled back.
pub async fn insert_observations(pool: &PgPool, rows: &[Observation]) -> Result<u64, DbError> {
    if rows.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0_u64;

    for row in rows {
        let result = sqlx::query(
            "INSERT INTO observations \
                 (report_id, sub_scope_id, brand, mention_count, position, observed_at, model) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&row.report_id)
        .bind(row.sub_scope_id.as_deref())
        .bind(&row.brand)
        .bind(row.mention_count)
        .bind(row.position)
        .bind(row.date)
        .bind(&row.model)
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    tracing::debug!(rows = inserted, "appended observations");
    Ok(inserted)
}

/// Load every observation inside a scope's report, model, and inclusive
/// date window, oldest first.
///
/// The scope's brand is not applied here; the metric calculators select
/// the target brand themselves.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_observations(pool: &PgPool, scope: &Scope) -> Result<Vec<Observation>, DbError> {
    let sql = format!(
        "{SELECT_COLUMNS} \
         WHERE report_id = $1 \
           AND observed_at >= $2 \
           AND observed_at <= $3 \
           AND ($4::TEXT IS NULL OR lower(model) = lower($4)) \
         ORDER BY observed_at, id"
    );

    let rows = sqlx::query_as::<_, ObservationRow>(&sql)
        .bind(&scope.report_id)
        .bind(scope.from_date)
        .bind(scope.to_date)
        .bind(scope.model.as_deref())
        .fetch_all(pool)
        .await?;

    tracing::debug!(
        report_id = %scope.report_id,
        model = scope.model.as_deref().unwrap_or("all"),
        rows = rows.len(),
        "loaded observations for scope"
    );

    Ok(rows.into_iter().map(Observation::from).collect())
}

/// Observations recorded for one sub-scope (prompt) on a single UTC day,
/// ordered by position then brand.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn brand_info(
    pool: &PgPool,
    report_id: &str,
    sub_scope_id: &str,
    model: &ModelFilter,
    day: NaiveDate,
) -> Result<Vec<Observation>, DbError> {
    let day_start = day.and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);

    let sql = format!(
        "{SELECT_COLUMNS} \
         WHERE report_id = $1 \
           AND sub_scope_id = $2 \
           AND ($3::TEXT IS NULL OR lower(model) = lower($3)) \
           AND observed_at >= $4 \
           AND observed_at < $5 \
         ORDER BY position, brand, id"
    );

    let rows = sqlx::query_as::<_, ObservationRow>(&sql)
        .bind(report_id)
        .bind(sub_scope_id)
        .bind(model.as_deref())
        .bind(day_start)
        .bind(day_end)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Observation::from).collect())
}
