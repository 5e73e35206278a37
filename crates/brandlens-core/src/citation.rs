//! Result types produced by the domain/citation analyzer.

use serde::{Deserialize, Serialize};

/// One distinct URL found in the analysed documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub normalized_url: String,
    pub occurrence_count: usize,
    /// Approximate registrable domain: the last two labels of the host.
    pub domain: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainCategory {
    /// The report's own target domain.
    #[serde(rename = "self")]
    Own,
    Competitor,
    External,
}

impl std::fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainCategory::Own => write!(f, "self"),
            DomainCategory::Competitor => write!(f, "competitor"),
            DomainCategory::External => write!(f, "external"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainClassification {
    pub domain: String,
    pub category: DomainCategory,
}

/// Classified URL statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlData {
    /// Most frequently occurring URL on the target domain, if any.
    #[serde(rename = "self")]
    pub own: Option<UrlRecord>,
    pub competitor_domains: Vec<UrlRecord>,
    pub external_domains: Vec<UrlRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationReport {
    /// Number of markdown `[title](url)` references.
    pub citation_count: usize,
    /// Share of documents mentioning the target domain, rounded to 2 places.
    pub coverage_percentage: f64,
    pub url_data: UrlData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_category_serializes_as_self() {
        let json = serde_json::to_value(DomainCategory::Own).unwrap();
        assert_eq!(json, "self");
        assert_eq!(DomainCategory::Competitor.to_string(), "competitor");
    }

    #[test]
    fn empty_url_data_has_null_self() {
        let json = serde_json::to_value(UrlData::default()).unwrap();
        assert!(json["self"].is_null());
        assert_eq!(json["competitor_domains"], serde_json::json!([]));
        assert_eq!(json["external_domains"], serde_json::json!([]));
    }
}
