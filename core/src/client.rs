//! Stateless request builder and response parser for the news API.
//!
//! # Design
//! `NewsClient` holds only a base URL and the API key and carries no mutable
//! state between calls. Each endpoint has a `build_*` method that produces
//! an `HttpRequest`, and each response shape has a `parse_*` method that
//! consumes an `HttpResponse`. Whoever executes the GET in between (a
//! `Transport`, or the host application) owns the I/O.
//!
//! The provider reports failures in the body, sometimes with HTTP 200 and
//! sometimes with 4xx, so `parse_*` reads the envelope first and does not
//! look at the status code.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::DEFAULT_BASE_URL;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, API_KEY_HEADER};
use crate::params::SearchRequest;
use crate::query::{self, Endpoint};
use crate::types::{Envelope, NewsResult, SourcesResult};

/// Synchronous, stateless client for the news API.
#[derive(Clone)]
pub struct NewsClient {
    base_url: String,
    api_key: String,
}

impl NewsClient {
    /// Client for the public provider. Blank keys are rejected up front.
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ApiError::InvalidCredential);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the query URL for `endpoint` without wrapping it in a request.
    pub fn query_url(&self, endpoint: Endpoint, request: &SearchRequest) -> Result<String, ApiError> {
        query::build_query(&endpoint.url(&self.base_url), request)
    }

    pub fn build_request(
        &self,
        endpoint: Endpoint,
        request: &SearchRequest,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.query_url(endpoint, request)?;
        debug!(endpoint = %endpoint, url = %url, "built request");
        Ok(self.request_for_url(url))
    }

    pub fn build_everything(&self, request: &SearchRequest) -> Result<HttpRequest, ApiError> {
        self.build_request(Endpoint::Everything, request)
    }

    pub fn build_top_headlines(&self, request: &SearchRequest) -> Result<HttpRequest, ApiError> {
        self.build_request(Endpoint::TopHeadlines, request)
    }

    pub fn build_sources(&self, request: &SearchRequest) -> Result<HttpRequest, ApiError> {
        self.build_request(Endpoint::Sources, request)
    }

    /// Wrap an already-built URL in an authenticated GET.
    pub fn request_for_url(&self, url: impl Into<String>) -> HttpRequest {
        HttpRequest {
            url: url.into(),
            headers: vec![(API_KEY_HEADER.to_string(), self.api_key.clone())],
        }
    }

    pub fn parse_news(&self, response: HttpResponse) -> Result<NewsResult, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_sources(&self, response: HttpResponse) -> Result<SourcesResult, ApiError> {
        parse_envelope(&response)
    }
}

impl fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Decode the envelope and turn `status: "error"` into `ProviderError`.
fn parse_envelope<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    let envelope: Envelope<T> = serde_json::from_str(&response.body).map_err(|e| {
        ApiError::DecodeError(format!("HTTP {}: {e}", response.status))
    })?;
    match envelope {
        Envelope::Ok(payload) => Ok(payload),
        Envelope::Error { code, message } => {
            debug!(status = response.status, code = %code, "provider returned error envelope");
            Err(ApiError::ProviderError { code, message })
        }
    }
}
