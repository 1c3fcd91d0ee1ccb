//! One-call façade: build, fetch and decode per endpoint.
//!
//! # Design
//! `NewsApi` pairs a `NewsClient` with a `Transport`. It is immutable after
//! construction, so a single instance can serve concurrent callers.

use std::sync::Arc;

use tracing::debug;

use crate::client::NewsClient;
use crate::config::{ClientConfig, ENV_API_KEY};
use crate::error::ApiError;
use crate::params::SearchRequest;
use crate::query::Endpoint;
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewsResult, SourcesResult};

#[derive(Clone)]
pub struct NewsApi {
    client: NewsClient,
    transport: Arc<dyn Transport>,
}

impl NewsApi {
    /// Client for the public provider with no request timeout.
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        Self::with_config(api_key, ClientConfig::default())
    }

    pub fn with_config(api_key: &str, config: ClientConfig) -> Result<Self, ApiError> {
        let client = NewsClient::with_base_url(api_key, &config.base_url)?;
        Ok(Self {
            client,
            transport: Arc::new(UreqTransport::new(config.timeout)),
        })
    }

    pub fn with_transport(
        api_key: &str,
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        let client = NewsClient::with_base_url(api_key, base_url)?;
        Ok(Self { client, transport })
    }

    /// Key from `NEWS_API_KEY`, everything else from `ClientConfig::from_env`.
    pub fn from_env() -> Result<Self, ApiError> {
        let key = std::env::var(ENV_API_KEY).map_err(|_| ApiError::InvalidCredential)?;
        Self::with_config(&key, ClientConfig::from_env())
    }

    pub fn client(&self) -> &NewsClient {
        &self.client
    }

    pub fn everything(&self, request: &SearchRequest) -> Result<NewsResult, ApiError> {
        let url = self.client.query_url(Endpoint::Everything, request)?;
        self.fetch_news(&url)
    }

    pub fn top_headlines(&self, request: &SearchRequest) -> Result<NewsResult, ApiError> {
        let url = self.client.query_url(Endpoint::TopHeadlines, request)?;
        self.fetch_news(&url)
    }

    pub fn sources(&self, request: &SearchRequest) -> Result<SourcesResult, ApiError> {
        let url = self.client.query_url(Endpoint::Sources, request)?;
        self.fetch_sources(&url)
    }

    /// Build a URL for later use with `fetch_news` / `fetch_sources`.
    pub fn query_url(&self, endpoint: Endpoint, request: &SearchRequest) -> Result<String, ApiError> {
        self.client.query_url(endpoint, request)
    }

    pub fn fetch_news(&self, url: &str) -> Result<NewsResult, ApiError> {
        debug!(url, "fetching articles");
        let response = self.transport.execute(self.client.request_for_url(url))?;
        self.client.parse_news(response)
    }

    pub fn fetch_sources(&self, url: &str) -> Result<SourcesResult, ApiError> {
        debug!(url, "fetching sources");
        let response = self.transport.execute(self.client.request_for_url(url))?;
        self.client.parse_sources(response)
    }
}

impl std::fmt::Debug for NewsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsApi").field("client", &self.client).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpRequest, HttpResponse, API_KEY_HEADER};

    /// Replays one canned response and records what was sent.
    struct StubTransport {
        status: u16,
        body: String,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl StubTransport {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.clone(),
            })
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::TransportError("connection refused".to_string()))
        }
    }

    const BASE: &str = "http://localhost:3000/v2";

    #[test]
    fn blank_key_fails_construction() {
        assert_eq!(NewsApi::new("   ").unwrap_err(), ApiError::InvalidCredential);
        let stub = StubTransport::new(200, "{}");
        assert_eq!(
            NewsApi::with_transport("", BASE, stub).unwrap_err(),
            ApiError::InvalidCredential
        );
    }

    #[test]
    fn everything_sends_built_url_with_key_header() {
        let stub = StubTransport::new(200, r#"{"status":"ok","totalResults":0,"articles":[]}"#);
        let api = NewsApi::with_transport("k1", BASE, stub.clone()).unwrap();

        let result = api.everything(&SearchRequest::new("apple").page(0)).unwrap();
        assert_eq!(result, NewsResult::default());

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "http://localhost:3000/v2/everything?q=apple&page=1");
        assert_eq!(seen[0].header(API_KEY_HEADER), Some("k1"));
    }

    #[test]
    fn invalid_query_makes_no_call() {
        let stub = StubTransport::new(200, r#"{"status":"ok"}"#);
        let api = NewsApi::with_transport("k1", BASE, stub.clone()).unwrap();

        assert_eq!(
            api.top_headlines(&SearchRequest::default()).unwrap_err(),
            ApiError::MissingQuery
        );
        assert!(matches!(
            api.sources(&SearchRequest::new(" ")).unwrap_err(),
            ApiError::InvalidQuery(_)
        ));
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn provider_error_is_surfaced() {
        let stub = StubTransport::new(200, r#"{"status":"error","code":"rateLimited","message":"X"}"#);
        let api = NewsApi::with_transport("k1", BASE, stub).unwrap();

        let err = api.top_headlines(&SearchRequest::new("apple")).unwrap_err();
        assert_eq!(
            err,
            ApiError::ProviderError {
                code: "rateLimited".to_string(),
                message: "X".to_string(),
            }
        );
    }

    #[test]
    fn sources_endpoint_decodes_sources() {
        let stub = StubTransport::new(200, r#"{"status":"ok","sources":[{"id":"wired"}]}"#);
        let api = NewsApi::with_transport("k1", BASE, stub.clone()).unwrap();

        let result = api.sources(&SearchRequest::new("tech").category(["technology"])).unwrap();
        assert_eq!(result.sources[0].id.as_deref(), Some("wired"));
        assert_eq!(
            stub.seen.lock().unwrap()[0].url,
            "http://localhost:3000/v2/top-headlines/sources?q=tech&category=technology"
        );
    }

    #[test]
    fn transport_errors_propagate() {
        let api = NewsApi::with_transport("k1", BASE, Arc::new(FailingTransport)).unwrap();
        let err = api.everything(&SearchRequest::new("apple")).unwrap_err();
        assert_eq!(err, ApiError::TransportError("connection refused".to_string()));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let stub = StubTransport::new(200, "not json");
        let api = NewsApi::with_transport("k1", BASE, stub).unwrap();
        assert!(matches!(
            api.everything(&SearchRequest::new("apple")).unwrap_err(),
            ApiError::DecodeError(_)
        ));
    }

    #[test]
    fn two_step_flow_matches_one_step() {
        let stub = StubTransport::new(200, r#"{"status":"ok","totalResults":3}"#);
        let api = NewsApi::with_transport("k1", BASE, stub.clone()).unwrap();

        let request = SearchRequest::new("apple").language(["EN"]);
        let url = api.query_url(Endpoint::Everything, &request).unwrap();
        let two_step = api.fetch_news(&url).unwrap();
        let one_step = api.everything(&request).unwrap();

        assert_eq!(two_step, one_step);
        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen[0].url, seen[1].url);
    }

    #[test]
    fn facade_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NewsApi>();
    }
}
