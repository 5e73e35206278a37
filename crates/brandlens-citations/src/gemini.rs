//! Competitor classification backed by the Gemini `generateContent` API.
//!
//! The model is asked for a JSON array of `{"domain": ...}` objects via a
//! response schema, so the reply can be deserialized directly.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::classify::CompetitorClassifier;
use crate::error::CitationError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini REST client for competitor detection.
///
/// Use [`GeminiClassifier::new`] for production or
/// [`GeminiClassifier::with_base_url`] to point at a mock server in tests.
pub struct GeminiClassifier {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DomainEntry {
    domain: String,
}

impl GeminiClassifier {
    /// # Errors
    ///
    /// Returns [`CitationError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, CitationError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`CitationError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, CitationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("brandlens/0.1 (citation-analysis)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

fn build_prompt(urls: &[&str], target_domain: &str) -> String {
    let listing = urls
        .iter()
        .map(|u| format!("- {u}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "The target website is {target_domain}.\n\
         Below is a list of URLs cited in AI-generated answers about it.\n\
         Return the registrable domains (for example `example.com`) of the URLs \
         that belong to direct competitors of {target_domain}: businesses selling \
         comparable products or services. Exclude {target_domain} itself, search \
         engines, news outlets, encyclopedias, forums, and marketplaces.\n\
         Return an empty array if none qualify.\n\n\
         URLs:\n{listing}"
    )
}

impl CompetitorClassifier for GeminiClassifier {
    async fn classify_competitors(
        &self,
        urls: &[String],
        target_domain: &str,
    ) -> Result<Vec<String>, CitationError> {
        let mut seen = HashSet::new();
        let unique: Vec<&str> = urls
            .iter()
            .map(String::as_str)
            .filter(|u| seen.insert(*u))
            .collect();

        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(&unique, target_domain) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": { "domain": { "type": "STRING" } },
                        "required": ["domain"]
                    }
                }
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                CitationError::ClassificationServiceUnavailable(format!("request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CitationError::ClassificationServiceUnavailable(format!(
                "Gemini returned status {status}"
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            CitationError::ClassificationServiceUnavailable(format!("response parse error: {e}"))
        })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            tracing::debug!(target_domain, "Gemini returned no candidate text");
            return Ok(Vec::new());
        }

        let entries: Vec<DomainEntry> = serde_json::from_str(&text).map_err(|e| {
            CitationError::ClassificationServiceUnavailable(format!(
                "unparseable domain list: {e}"
            ))
        })?;

        let domains: Vec<String> = entries
            .into_iter()
            .map(|e| e.domain.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();

        tracing::debug!(
            target_domain,
            urls = unique.len(),
            competitors = domains.len(),
            "classified competitor domains"
        );

        Ok(domains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_every_url_and_target() {
        let prompt = build_prompt(&["https://adidas.com", "https://puma.com/x"], "nike.com");
        assert!(prompt.contains("The target website is nike.com."));
        assert!(prompt.contains("- https://adidas.com\n- https://puma.com/x"));
    }

    #[test]
    fn endpoint_includes_model() {
        let classifier =
            GeminiClassifier::with_base_url("k", "gemini-2.5-flash", 5, "http://localhost:9/")
                .unwrap();
        assert_eq!(
            classifier.endpoint(),
            "http://localhost:9/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
