//! Domain classification and the competitor-detection seam.

use std::collections::HashSet;
use std::future::Future;

use brandlens_core::{DomainCategory, DomainClassification};

use crate::error::CitationError;

/// Search-result chrome; never treated as a citation.
///
/// Matched against the reduced domain, not the URL text: any `*.google.com`
/// host is dropped, while `https://example.com/?u=https://google.com` and
/// `https://google.com.evil.net` keep their own domains.
pub const SEARCH_CHROME_DOMAIN: &str = "google.com";

/// Anything that can tell which domains among a set of cited URLs belong to
/// competitors of the target domain.
///
/// Implementations may return an empty list; that simply classifies every
/// non-target domain as external.
pub trait CompetitorClassifier {
    /// Return the competitor domains found among `urls`.
    ///
    /// # Errors
    ///
    /// Returns [`CitationError::ClassificationServiceUnavailable`] when the
    /// backing service cannot be reached or answers with garbage.
    fn classify_competitors(
        &self,
        urls: &[String],
        target_domain: &str,
    ) -> impl Future<Output = Result<Vec<String>, CitationError>> + Send;
}

/// Classifier that never reports competitors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompetitors;

impl CompetitorClassifier for NoCompetitors {
    async fn classify_competitors(
        &self,
        _urls: &[String],
        _target_domain: &str,
    ) -> Result<Vec<String>, CitationError> {
        Ok(Vec::new())
    }
}

/// Classify one reduced domain against the target and the competitor set.
///
/// Returns `None` for [`SEARCH_CHROME_DOMAIN`], which is dropped entirely.
#[must_use]
pub fn classify_domain(
    domain: &str,
    target_domain: &str,
    competitors: &HashSet<String>,
) -> Option<DomainClassification> {
    if domain == SEARCH_CHROME_DOMAIN {
        return None;
    }

    let category = if domain == target_domain {
        DomainCategory::Own
    } else if competitors.contains(domain) {
        DomainCategory::Competitor
    } else {
        DomainCategory::External
    };

    Some(DomainClassification {
        domain: domain.to_string(),
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competitors(domains: &[&str]) -> HashSet<String> {
        domains.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn google_is_dropped() {
        assert!(classify_domain("google.com", "nike.com", &competitors(&[])).is_none());
    }

    #[test]
    fn target_is_self() {
        let c = classify_domain("nike.com", "nike.com", &competitors(&["nike.com"])).unwrap();
        assert_eq!(c.category, DomainCategory::Own);
    }

    #[test]
    fn competitor_and_external_split() {
        let set = competitors(&["adidas.com"]);
        assert_eq!(
            classify_domain("adidas.com", "nike.com", &set)
                .unwrap()
                .category,
            DomainCategory::Competitor
        );
        assert_eq!(
            classify_domain("runnersworld.com", "nike.com", &set)
                .unwrap()
                .category,
            DomainCategory::External
        );
    }

    #[tokio::test]
    async fn no_competitors_returns_empty() {
        let urls = vec!["https://adidas.com".to_string()];
        let found = NoCompetitors
            .classify_competitors(&urls, "nike.com")
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
