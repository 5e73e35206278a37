//! Scope Builder: turns raw request fields into a validated filter.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::observation::{eq_fold, Observation};
use crate::CoreError;

/// Model value that disables model filtering.
pub const ALL_MODELS: &str = "all";

/// Length of the trailing window used when no dates are supplied.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Raw, unvalidated scope fields as received from a caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeRequest {
    pub report_id: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelFilter {
    All,
    /// Case-insensitive exact match on the model name.
    Only(String),
}

impl ModelFilter {
    /// Interpret a raw model field; absent, blank, or `"all"` disables filtering.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => ModelFilter::All,
            Some(m) if m.eq_ignore_ascii_case(ALL_MODELS) => ModelFilter::All,
            Some(m) => ModelFilter::Only(m.to_string()),
        }
    }

    #[must_use]
    pub fn accepts(&self, model: &str) -> bool {
        match self {
            ModelFilter::All => true,
            ModelFilter::Only(wanted) => eq_fold(wanted, model),
        }
    }

    /// The model name to filter on, or `None` when filtering is disabled.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            ModelFilter::All => None,
            ModelFilter::Only(m) => Some(m),
        }
    }
}

/// A validated, per-request filter. The date window is inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub report_id: String,
    pub brand: Option<String>,
    pub model: ModelFilter,
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
}

impl ScopeRequest {
    /// Validate the request against the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidScope`] when `report_id` is missing or
    /// blank, or when the window is reversed.
    pub fn build(self) -> Result<Scope, CoreError> {
        self.build_at(Utc::now())
    }

    /// Validate the request, resolving default dates relative to `now`.
    ///
    /// With no dates the window is the seven days ending at `now`. A lone
    /// `to_date` gets a window of the same length ending there; a lone
    /// `from_date` runs up to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidScope`] when `report_id` is missing or
    /// blank, or when `from_date > to_date`.
    pub fn build_at(self, now: DateTime<Utc>) -> Result<Scope, CoreError> {
        let report_id = self
            .report_id
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .ok_or_else(|| CoreError::InvalidScope("report_id is required".to_string()))?;

        let window = Duration::days(DEFAULT_WINDOW_DAYS);
        let (from_date, to_date) = match (self.from_date, self.to_date) {
            (Some(from), Some(to)) => (from, to),
            (Some(from), None) => (from, now),
            (None, Some(to)) => (to - window, to),
            (None, None) => (now - window, now),
        };

        if from_date > to_date {
            return Err(CoreError::InvalidScope(format!(
                "from_date {from_date} is after to_date {to_date}"
            )));
        }

        let brand = self
            .brand
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        Ok(Scope {
            report_id,
            brand,
            model: ModelFilter::parse(self.model.as_deref()),
            from_date,
            to_date,
        })
    }
}

impl Scope {
    /// The target brand for single-brand metrics.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidScope`] when no brand was supplied.
    pub fn require_brand(&self) -> Result<&str, CoreError> {
        self.brand.as_deref().ok_or_else(|| {
            CoreError::InvalidScope("brand is required for single-brand metrics".to_string())
        })
    }

    /// Whether `row` falls inside this scope's report, model, and window.
    ///
    /// The brand is not part of the predicate. Share of voice,
    /// coverage, and ranking all need every brand in scope.
    #[must_use]
    pub fn matches(&self, row: &Observation) -> bool {
        row.report_id == self.report_id
            && self.model.accepts(&row.model)
            && row.date >= self.from_date
            && row.date <= self.to_date
    }

    /// Rows of `rows` that fall inside this scope.
    pub fn filter<'a>(
        &'a self,
        rows: &'a [Observation],
    ) -> impl Iterator<Item = &'a Observation> + 'a {
        rows.iter().filter(move |row| self.matches(row))
    }
}
