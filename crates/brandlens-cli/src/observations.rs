//! `observations` command handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use brandlens_core::Observation;
use clap::Subcommand;

/// Sub-commands available under `observations`.
#[derive(Debug, Subcommand)]
pub enum ObservationCommands {
    /// Append observations from a JSON array file
    Import {
        /// Path to a JSON file holding an array of observation objects
        path: PathBuf,
    },
}

/// Parse a JSON array of observations, rejecting negative counts or
/// positions and mentioned rows without a positive position.
pub(crate) fn parse_observations(raw: &str) -> anyhow::Result<Vec<Observation>> {
    let rows: Vec<Observation> =
        serde_json::from_str(raw).context("expected a JSON array of observations")?;

    for (i, row) in rows.iter().enumerate() {
        if row.mention_count < 0 || row.position < 0 {
            anyhow::bail!(
                "observation {i} ({} / {}) has a negative mention_count or position",
                row.report_id,
                row.brand
            );
        }
        if row.is_mentioned() && row.position < 1 {
            anyhow::bail!(
                "observation {i} ({} / {}) is mentioned but has position {}",
                row.report_id,
                row.brand,
                row.position
            );
        }
    }

    Ok(rows)
}

/// Read `path` and append every observation in it in a single transaction.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the insert fails.
pub(crate) async fn run_import(pool: &sqlx::PgPool, path: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows = parse_observations(&raw)?;

    if rows.is_empty() {
        println!("no observations in {}", path.display());
        return Ok(());
    }

    let inserted = brandlens_db::insert_observations(pool, &rows).await?;
    tracing::info!(path = %path.display(), inserted, "imported observations");
    println!("imported {inserted} observation(s)");
    Ok(())
}
