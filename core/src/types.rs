//! Response DTOs for the news API.
//!
//! # Design
//! The provider omits fields freely, so every article and source field is
//! optional. The top-level envelope is an internally tagged enum on `status`:
//! a body is either `ok` with a payload or `error` with a code and message,
//! never both. Anything else fails to decode.
//!
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates.

use serde::{Deserialize, Serialize};

/// One search result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Article {
    /// Publisher descriptor, passed through untouched.
    pub source: Option<serde_json::Value>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    /// ISO-8601 timestamp as sent by the provider.
    pub published_at: Option<String>,
    pub content: Option<String>,
}

/// One publisher descriptor from the sources listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Source {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

/// Successful payload of the article endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsResult {
    pub total_results: u64,
    pub articles: Vec<Article>,
}

/// Successful payload of the sources endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourcesResult {
    pub sources: Vec<Source>,
}

/// Top-level response object, discriminated by `status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Ok(T),
    Error {
        #[serde(default)]
        code: String,
        #[serde(default)]
        message: String,
    },
}
