//! Shared command-line arguments that describe a query scope.

use brandlens_core::{Scope, ScopeRequest, ALL_MODELS};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use clap::Args;

/// Report, brand, model, and date window flags shared by the metric,
/// ranking, and citation commands.
#[derive(Debug, Clone, Args)]
pub struct ScopeArgs {
    /// Report identifier to aggregate over
    #[arg(long = "report")]
    pub report_id: String,
    /// Target brand (required by single-brand metrics)
    #[arg(long)]
    pub brand: Option<String>,
    /// Model name, or "all" to include every model
    #[arg(long, default_value = ALL_MODELS)]
    pub model: String,
    /// Start of the window (RFC 3339, "YYYY-MM-DD HH:MM:SS", or YYYY-MM-DD)
    #[arg(long = "from", value_parser = parse_timestamp)]
    pub from_date: Option<DateTime<Utc>>,
    /// End of the window, inclusive
    #[arg(long = "to", value_parser = parse_timestamp)]
    pub to_date: Option<DateTime<Utc>>,
}

impl ScopeArgs {
    /// Validate the flags into a [`Scope`].
    ///
    /// # Errors
    ///
    /// Returns [`brandlens_core::CoreError::InvalidScope`] for a blank report
    /// or a reversed window.
    pub fn into_scope(self) -> Result<Scope, brandlens_core::CoreError> {
        ScopeRequest {
            report_id: Some(self.report_id),
            brand: self.brand,
            model: Some(self.model),
            from_date: self.from_date,
            to_date: self.to_date,
        }
        .build()
    }
}

#[derive(Debug, Clone, Args)]
pub struct BrandInfoArgs {
    #[arg(long = "report")]
    pub report_id: String,
    /// Prompt (sub-scope) identifier within the report
    #[arg(long = "prompt")]
    pub sub_scope_id: String,
    #[arg(long, default_value = ALL_MODELS)]
    pub model: String,
    /// UTC calendar day, YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,
}

/// Parse a command-line timestamp. Values without an offset are taken as UTC;
/// a bare date means midnight at the start of that day.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN).and_utc());
    }
    Err(format!(
        "invalid timestamp '{raw}': expected RFC 3339, \"YYYY-MM-DD HH:MM:SS\", or YYYY-MM-DD"
    ))
}
