//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `NewsClient` builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; a
//! `Transport` (or the caller) performs the actual GET in between. Every
//! provider call is a GET, so no method field is carried.

/// Header carrying the API key. The key never goes into the query string.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// A GET request described as plain data.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Hand-written so the API key header never lands in logs.
impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case(API_KEY_HEADER) {
                    (k.as_str(), "<redacted>")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &headers)
            .finish()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            url: "http://localhost/v2/everything?q=a".to_string(),
            headers: vec![(API_KEY_HEADER.to_string(), "secret".to_string())],
        };
        assert_eq!(req.header("x-api-key"), Some("secret"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let req = HttpRequest {
            url: "http://localhost/v2/everything?q=a".to_string(),
            headers: vec![(API_KEY_HEADER.to_string(), "secret".to_string())],
        };
        let rendered = format!("{req:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
