//! Core domain types and the visibility aggregation engine.
//!
//! Everything in this crate is a pure function over an externally supplied
//! row set: the Fact Store lives in `brandlens-db` and document handling in
//! `brandlens-citations`.

pub mod app_config;
pub mod citation;
pub mod config;
pub mod metrics;
pub mod observation;
pub mod ranking;
pub mod scope;

pub use app_config::AppConfig;
pub use citation::{CitationReport, DomainCategory, DomainClassification, UrlData, UrlRecord};
pub use config::{load_app_config, load_app_config_from_env};
pub use metrics::{average_position, coverage, mentions, share_of_voice, summarize, BrandSummary};
pub use observation::{same_brand, Observation};
pub use ranking::{
    brand_totals, compute_ranking, compute_ranking_over_time, rank_totals, BrandSeries,
    BrandTotal, RankEntry, RankPoint,
};
pub use scope::{ModelFilter, Scope, ScopeRequest, ALL_MODELS, DEFAULT_WINDOW_DAYS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid scope: {0}")]
    InvalidScope(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
