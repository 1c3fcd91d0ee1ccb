//! Synchronous client core for a news-search REST API.
//!
//! # Overview
//! Validates and normalizes search options, serializes them into a
//! deterministic query URL, and decodes the provider's JSON envelope into
//! typed results. The query-building half never touches the network; the
//! `Transport` seam holds the single I/O boundary.
//!
//! # Design
//! - `params` normalizes individual options; only the search text can fail.
//! - `query` orders and encodes the fragments for one `Endpoint`.
//! - `NewsClient` splits each call into `build_*` (produces request) and
//!   `parse_*` (consumes response), so hosts can run the I/O themselves.
//! - `NewsApi` combines build, fetch and parse per endpoint over a
//!   `Transport`, with `UreqTransport` as the default.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod query;
pub mod transport;
pub mod types;

pub use api::NewsApi;
pub use client::NewsClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, API_KEY_HEADER};
pub use params::{SearchRequest, SortBy};
pub use query::{build_query, Endpoint};
pub use transport::{Transport, UreqTransport};
pub use types::{Article, Envelope, NewsResult, Source, SourcesResult};
