//! Metric and ranking command handlers.
//!
//! Each handler loads the scoped observation rows from the fact store, runs
//! the pure calculators from `brandlens-core`, and prints JSON.

use brandlens_core::{
    average_position, compute_ranking, compute_ranking_over_time, coverage, mentions,
    share_of_voice, summarize, CoreError, ModelFilter,
};
use clap::Subcommand;
use serde_json::json;

use crate::print_data;
use crate::scope_args::{BrandInfoArgs, ScopeArgs};

/// Sub-commands available under `metrics`.
#[derive(Debug, Subcommand)]
pub enum MetricsCommands {
    /// Total mentions of the brand
    Mentions {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Brand mentions as a percentage of all mentions in scope
    ShareOfVoice {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Percentage of rows in scope that mention the brand
    Coverage {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Average position of the brand where it was mentioned
    Position {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Every single-brand metric at once
    Summary {
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    Mentions,
    ShareOfVoice,
    Coverage,
    Position,
    Summary,
}

impl MetricsCommands {
    fn into_parts(self) -> (Metric, ScopeArgs) {
        match self {
            MetricsCommands::Mentions { scope } => (Metric::Mentions, scope),
            MetricsCommands::ShareOfVoice { scope } => (Metric::ShareOfVoice, scope),
            MetricsCommands::Coverage { scope } => (Metric::Coverage, scope),
            MetricsCommands::Position { scope } => (Metric::Position, scope),
            MetricsCommands::Summary { scope } => (Metric::Summary, scope),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMode {
    Snapshot,
    OverTime,
}

/// Compute and print one single-brand metric.
///
/// # Errors
///
/// Returns an error if the scope is invalid, the brand is missing, or the
/// fact store query fails.
pub(crate) async fn run_metric(
    pool: &sqlx::PgPool,
    command: MetricsCommands,
) -> anyhow::Result<()> {
    let (metric, args) = command.into_parts();
    let scope = args.into_scope()?;
    // Fail on a missing brand before touching the database.
    let brand = scope.require_brand()?.to_string();
    let rows = brandlens_db::list_observations(pool, &scope).await?;
    tracing::debug!(?metric, rows = rows.len(), "loaded observations");

    let data = match metric {
        Metric::Mentions => json!({ "brand": brand, "mentions": mentions(&scope, &rows)? }),
        Metric::ShareOfVoice => {
            json!({ "brand": brand, "share_of_voice": share_of_voice(&scope, &rows)? })
        }
        Metric::Coverage => json!({ "brand": brand, "coverage": coverage(&scope, &rows)? }),
        Metric::Position => {
            json!({ "brand": brand, "average_position": average_position(&scope, &rows)? })
        }
        Metric::Summary => serde_json::to_value(summarize(&scope, &rows)?)?,
    };

    print_data(&data)
}

/// Compute and print the brand ranking for a scope.
///
/// # Errors
///
/// Returns an error if the scope is invalid or the fact store query fails.
pub(crate) async fn run_ranking(
    pool: &sqlx::PgPool,
    args: ScopeArgs,
    mode: RankingMode,
) -> anyhow::Result<()> {
    let scope = args.into_scope()?;
    let rows = brandlens_db::list_observations(pool, &scope).await?;

    match mode {
        RankingMode::Snapshot => print_data(&compute_ranking(&scope, &rows)),
        RankingMode::OverTime => print_data(&compute_ranking_over_time(&scope, &rows)),
    }
}

/// Print the observations recorded for one prompt, model, and day, best
/// position first.
///
/// # Errors
///
/// Returns [`CoreError::InvalidScope`] for a blank report or prompt, or an
/// error if the fact store query fails.
pub(crate) async fn run_brand_info(
    pool: &sqlx::PgPool,
    args: &BrandInfoArgs,
) -> anyhow::Result<()> {
    let report_id = args.report_id.trim();
    let sub_scope_id = args.sub_scope_id.trim();
    if report_id.is_empty() || sub_scope_id.is_empty() {
        return Err(CoreError::InvalidScope("report and prompt are required".to_string()).into());
    }

    let model = ModelFilter::parse(Some(&args.model));
    let rows =
        brandlens_db::brand_info(pool, report_id, sub_scope_id, &model, args.date).await?;

    if rows.is_empty() {
        tracing::info!(
            report_id = %args.report_id,
            prompt = %args.sub_scope_id,
            date = %args.date,
            "no observations for prompt on this day"
        );
    }

    print_data(&rows)
}
