use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fact row: how often `brand` was mentioned, and at what rank position,
/// in a single AI-generated answer captured for a report.
///
/// Rows are appended by the extraction pipeline and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub report_id: String,
    /// Finer grouping inside a report (the prompt the answer was produced for).
    #[serde(default)]
    pub sub_scope_id: Option<String>,
    pub brand: String,
    pub mention_count: i64,
    /// Rank of the brand inside the answer. Only meaningful when
    /// `mention_count >= 1`.
    pub position: i64,
    pub date: DateTime<Utc>,
    /// Answer engine that produced the text.
    pub model: String,
}

impl Observation {
    /// Whether this row counts as the brand appearing in the answer.
    #[must_use]
    pub fn is_mentioned(&self) -> bool {
        self.mention_count >= 1
    }
}

/// Case-insensitive brand equality.
#[must_use]
pub fn same_brand(a: &str, b: &str) -> bool {
    eq_fold(a, b)
}

/// Unicode-lowercase string equality without allocating.
pub(crate) fn eq_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Grouping key for a brand name, folded char by char exactly as
/// [`eq_fold`] compares, so `brand_key(a) == brand_key(b)` iff `eq_fold(a, b)`.
pub(crate) fn brand_key(brand: &str) -> String {
    brand.chars().flat_map(char::to_lowercase).collect()
}
