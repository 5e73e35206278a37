//! Metric Calculators: pure aggregations over a scoped row set.
//!
//! Every calculator filters `rows` through [`Scope::matches`] first, so callers
//! may pass either a pre-filtered store result or a wider in-memory set. An
//! empty scope always resolves to zero rather than an error.

use serde::Serialize;

use crate::observation::{same_brand, Observation};
use crate::scope::Scope;
use crate::CoreError;

/// All single-brand metrics for one scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSummary {
    pub brand: String,
    pub mentions: i64,
    pub share_of_voice: f64,
    pub coverage: f64,
    pub average_position: f64,
}

/// Total mentions of the scope's brand.
///
/// # Errors
///
/// Returns [`CoreError::InvalidScope`] if the scope carries no brand.
pub fn mentions(scope: &Scope, rows: &[Observation]) -> Result<i64, CoreError> {
    let brand = scope.require_brand()?;
    Ok(scope
        .filter(rows)
        .filter(|row| same_brand(&row.brand, brand))
        .map(|row| row.mention_count)
        .sum())
}

/// Percentage of all mention volume in scope that belongs to the brand.
///
/// Not rounded. `0.0` when nothing in scope was mentioned.
///
/// # Errors
///
/// Returns [`CoreError::InvalidScope`] if the scope carries no brand.
pub fn share_of_voice(scope: &Scope, rows: &[Observation]) -> Result<f64, CoreError> {
    let brand = scope.require_brand()?;
    let (target, total) = scope.filter(rows).fold((0_i64, 0_i64), |(t, all), row| {
        let own = if same_brand(&row.brand, brand) {
            row.mention_count
        } else {
            0
        };
        (t + own, all + row.mention_count)
    });
    Ok(percentage(target, total))
}

/// Percentage of all rows in scope (any brand) in which the brand was
/// mentioned at least once.
///
/// # Errors
///
/// Returns [`CoreError::InvalidScope`] if the scope carries no brand.
pub fn coverage(scope: &Scope, rows: &[Observation]) -> Result<f64, CoreError> {
    let brand = scope.require_brand()?;
    let (covered, total) = scope.filter(rows).fold((0_i64, 0_i64), |(c, all), row| {
        let hit = row.is_mentioned() && same_brand(&row.brand, brand);
        (c + i64::from(hit), all + 1)
    });
    Ok(percentage(covered, total))
}

/// Mean position of the brand across rows where it was actually mentioned.
///
/// # Errors
///
/// Returns [`CoreError::InvalidScope`] if the scope carries no brand.
pub fn average_position(scope: &Scope, rows: &[Observation]) -> Result<f64, CoreError> {
    let brand = scope.require_brand()?;
    let (sum, count) = scope
        .filter(rows)
        .filter(|row| row.is_mentioned() && same_brand(&row.brand, brand))
        .fold((0_i64, 0_i64), |(s, n), row| (s + row.position, n + 1));
    Ok(ratio(sum, count))
}

/// Compute every single-brand metric in one call.
///
/// # Errors
///
/// Returns [`CoreError::InvalidScope`] if the scope carries no brand.
pub fn summarize(scope: &Scope, rows: &[Observation]) -> Result<BrandSummary, CoreError> {
    Ok(BrandSummary {
        brand: scope.require_brand()?.to_string(),
        mentions: mentions(scope, rows)?,
        share_of_voice: share_of_voice(scope, rows)?,
        coverage: coverage(scope, rows)?,
        average_position: average_position(scope, rows)?,
    })
}

fn percentage(part: i64, whole: i64) -> f64 {
    ratio(part, whole) * 100.0
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
