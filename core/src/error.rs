//! Error types for the news API client.
//!
//! # Design
//! Only the search text is load-bearing enough to reject a request; every
//! other parameter problem is normalized away in `params` and never shows up
//! here. Provider-reported failures get their own variant so callers can
//! branch on `code` without matching on message strings.

use thiserror::Error;

/// Errors returned by `NewsClient`, `NewsApi` and the transports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The API key was empty or whitespace-only at construction time.
    #[error("invalid api key")]
    InvalidCredential,

    /// No search text was supplied.
    #[error("query string is required")]
    MissingQuery,

    /// The search text was empty after trimming or longer than 500 characters.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// An endpoint name did not match any of the provider's resources.
    #[error("invalid query type: {0}")]
    UnknownEndpoint(String),

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    TransportError(String),

    /// The response body was not a well-formed envelope.
    #[error("failed to decode response: {0}")]
    DecodeError(String),

    /// The provider answered with `status: "error"`.
    #[error("provider error ({code}): {message}")]
    ProviderError { code: String, message: String },
}
