//! Ranking Engine and Ranking-Over-Time Engine.
//!
//! Both share [`rank_totals`], a standard competition ranking ("1-2-2-4"):
//! equal totals share a rank and the next distinct total is ranked one past
//! the number of entries already placed.

use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::observation::{brand_key, Observation};
use crate::scope::Scope;

/// Aggregate mention volume for one brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandTotal {
    pub brand: String,
    pub mention_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEntry {
    pub rank: usize,
    pub brand: String,
    pub mention_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankPoint {
    pub date: DateTime<Utc>,
    pub rank: usize,
    pub mention_count: i64,
}

/// Rank history of one brand, oldest point first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandSeries {
    pub brand: String,
    pub points: Vec<RankPoint>,
}

/// Sum mention counts per brand, merging brand names case-insensitively.
///
/// Totals are returned in first-seen order and keep the first spelling
/// encountered for each brand.
pub fn brand_totals<'a, I>(rows: I) -> Vec<BrandTotal>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut totals: Vec<BrandTotal> = Vec::new();

    for row in rows {
        match index.entry(brand_key(&row.brand)) {
            Entry::Occupied(slot) => totals[*slot.get()].mention_count += row.mention_count,
            Entry::Vacant(slot) => {
                slot.insert(totals.len());
                totals.push(BrandTotal {
                    brand: row.brand.clone(),
                    mention_count: row.mention_count,
                });
            }
        }
    }

    totals
}

/// Order totals by descending volume and assign competition ranks.
///
/// The sort is stable: brands with equal volume keep their input order.
#[must_use]
pub fn rank_totals(mut totals: Vec<BrandTotal>) -> Vec<RankEntry> {
    totals.sort_by_key(|t| Reverse(t.mention_count));

    let mut ranked = Vec::with_capacity(totals.len());
    let mut rank = 0;
    let mut skip = 1;
    let mut prev_total: Option<i64> = None;

    for total in totals {
        if prev_total == Some(total.mention_count) {
            skip += 1;
        } else {
            rank += skip;
            skip = 1;
        }
        prev_total = Some(total.mention_count);

        ranked.push(RankEntry {
            rank,
            brand: total.brand,
            mention_count: total.mention_count,
        });
    }

    ranked
}

/// Rank every brand in scope by total mentions over the whole window.
#[must_use]
pub fn compute_ranking(scope: &Scope, rows: &[Observation]) -> Vec<RankEntry> {
    rank_totals(brand_totals(scope.filter(rows)))
}

/// Rank brands independently within each distinct observation date and
/// regroup the results into one series per brand.
///
/// A brand absent from a date simply has no point for it.
#[must_use]
pub fn compute_ranking_over_time(scope: &Scope, rows: &[Observation]) -> Vec<BrandSeries> {
    let mut buckets: BTreeMap<DateTime<Utc>, Vec<&Observation>> = BTreeMap::new();
    for row in scope.filter(rows) {
        buckets.entry(row.date).or_default().push(row);
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut series: Vec<BrandSeries> = Vec::new();

    for (date, bucket) in buckets {
        for entry in rank_totals(brand_totals(bucket)) {
            let slot = match index.entry(brand_key(&entry.brand)) {
                Entry::Occupied(slot) => *slot.get(),
                Entry::Vacant(slot) => {
                    series.push(BrandSeries {
                        brand: entry.brand.clone(),
                        points: Vec::new(),
                    });
                    *slot.insert(series.len() - 1)
                }
            };
            series[slot].points.push(RankPoint {
                date,
                rank: entry.rank,
                mention_count: entry.mention_count,
            });
        }
    }

    series
}

#[cfg(test)]
#[path = "ranking_test.rs"]
mod tests;
