//! Domain/Citation Analyzer.
//!
//! 1. Concatenate every document in scope into one buffer.
//! 2. Count markdown citations in the buffer.
//! 3. Extract and group every `http(s)` URL.
//! 4. Reduce each URL to its last two host labels.
//! 5. Drop search chrome, label the target as self, split the rest into
//!    competitor and external using the classifier's verdict.
//! 6. Compute the share of documents that mention the target at all.

use std::collections::HashSet;

use brandlens_core::{CitationReport, CoreError, DomainCategory, Scope, UrlData};
use futures::{StreamExt, TryStreamExt};

use crate::classify::{classify_domain, CompetitorClassifier};
use crate::error::CitationError;
use crate::extract::{citation_urls, extract_url_records, registrable_domain};
use crate::store::DocumentStore;

/// Maximum number of documents fetched from the store at once.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

/// Fetch the documents behind `keys`, ask `classifier` for competitor
/// domains, and build the citation report for `target_domain`.
///
/// # Errors
///
/// - [`CitationError::Scope`] if `target_domain` is blank.
/// - [`CitationError::StoreUnavailable`] if any document cannot be fetched.
/// - [`CitationError::ClassificationServiceUnavailable`] if the classifier
///   fails. Nothing is retried.
pub async fn analyze_domain_citations<S, C>(
    scope: &Scope,
    target_domain: &str,
    keys: &[String],
    store: &S,
    classifier: &C,
) -> Result<CitationReport, CitationError>
where
    S: DocumentStore + Sync,
    C: CompetitorClassifier + Sync,
{
    let target = target_domain.trim();
    if target.is_empty() {
        return Err(CoreError::InvalidScope("target domain is required".to_string()).into());
    }

    let documents: Vec<String> = futures::stream::iter(keys)
        .map(|key| store.fetch(key))
        .buffered(DEFAULT_FETCH_CONCURRENCY)
        .try_collect()
        .await?;

    let citations = citation_urls(&documents.join("\n"));
    let competitors = if citations.is_empty() {
        Vec::new()
    } else {
        classifier
            .classify_competitors(&citations, &registrable_domain(target))
            .await?
    };

    let report = analyze_documents(&documents, target, &competitors);

    tracing::info!(
        report_id = %scope.report_id,
        domain = target,
        documents = documents.len(),
        citations = report.citation_count,
        competitors = report.url_data.competitor_domains.len(),
        coverage = report.coverage_percentage,
        "analyzed domain citations"
    );

    Ok(report)
}

/// Build a citation report from already-fetched documents and a competitor
/// domain list.
#[must_use]
pub fn analyze_documents(
    documents: &[String],
    target_domain: &str,
    competitors: &[String],
) -> CitationReport {
    let buffer = documents.join("\n");
    let own_domain = registrable_domain(target_domain);
    let competitor_set: HashSet<String> = competitors
        .iter()
        .map(|d| registrable_domain(d))
        .filter(|d| !d.is_empty())
        .collect();

    let mut url_data = UrlData::default();
    for record in extract_url_records(&buffer) {
        let Some(classification) = classify_domain(&record.domain, &own_domain, &competitor_set)
        else {
            continue;
        };
        match classification.category {
            DomainCategory::Own => {
                let replace = url_data
                    .own
                    .as_ref()
                    .is_none_or(|current| record.occurrence_count > current.occurrence_count);
                if replace {
                    url_data.own = Some(record);
                }
            }
            DomainCategory::Competitor => url_data.competitor_domains.push(record),
            DomainCategory::External => url_data.external_domains.push(record),
        }
    }

    CitationReport {
        citation_count: citation_urls(&buffer).len(),
        coverage_percentage: coverage_percentage(documents, target_domain),
        url_data,
    }
}

/// Percentage of documents whose text contains `target_domain` anywhere,
/// ignoring ASCII case, rounded to two decimal places.
fn coverage_percentage(documents: &[String], target_domain: &str) -> f64 {
    if documents.is_empty() {
        return 0.0;
    }
    let needle = target_domain.trim().to_ascii_lowercase();
    let covered = documents
        .iter()
        .filter(|doc| doc.to_ascii_lowercase().contains(&needle))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let pct = covered as f64 / documents.len() as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
