//! URL and citation extraction from raw answer text.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::LazyLock;

use brandlens_core::UrlRecord;
use regex::Regex;
use reqwest::Url;

/// Markdown link references: `[title](http...)`.
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[.*?\]\((https?://[^\s)]+)\)").expect("valid citation regex")
});

/// Any `http(s)://` run up to whitespace, a quote, or an angle bracket.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s"'<>]+"#).expect("valid url regex"));

/// URLs of every markdown citation in `text`, in order of appearance.
#[must_use]
pub fn citation_urls(text: &str) -> Vec<String> {
    CITATION_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Strip the trailing `)` left behind when a URL is matched out of a
/// markdown link.
#[must_use]
pub fn normalize_url(raw: &str) -> &str {
    raw.trim_end_matches(')')
}

/// Collapse a URL (or bare host) to its last two DNS labels.
///
/// This is a heuristic: `shop.nike.com` becomes `nike.com`, but two-label
/// public suffixes such as `bbc.co.uk` collapse to `co.uk`.
#[must_use]
pub fn registrable_domain(url_or_host: &str) -> String {
    let host = host_of(url_or_host.trim());
    let host = host.trim_end_matches('.');
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() >= 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host.to_string()
    }
}

fn host_of(raw: &str) -> String {
    if let Ok(parsed) = Url::parse(raw) {
        if let Some(host) = parsed.host_str() {
            return host.to_lowercase();
        }
    }

    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let authority = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    authority
        .split(':')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Every distinct normalized URL in `text` with its occurrence count and
/// domain, in order of first appearance.
#[must_use]
pub fn extract_url_records(text: &str) -> Vec<UrlRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut records: Vec<UrlRecord> = Vec::new();

    for found in URL_RE.find_iter(text) {
        let url = normalize_url(found.as_str());
        match index.entry(url) {
            Entry::Occupied(slot) => records[*slot.get()].occurrence_count += 1,
            Entry::Vacant(slot) => {
                let domain = registrable_domain(url);
                if domain.is_empty() {
                    continue;
                }
                slot.insert(records.len());
                records.push(UrlRecord {
                    normalized_url: url.to_string(),
                    occurrence_count: 1,
                    domain,
                });
            }
        }
    }

    records
}
