//! Deterministic query-string construction.
//!
//! # Design
//! `build_query` walks a fixed field order so the same `SearchRequest`
//! always yields the same URL byte-for-byte. Each field goes through its
//! normalizer in `params` and contributes at most one `&name=value`
//! fragment. Free-form values are percent-encoded; allow-listed tokens come
//! from closed lists of plain ASCII words and are emitted as-is.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;
use crate::params::{self, SearchRequest, CATEGORIES, COUNTRIES, LANGUAGES, SEARCH_IN};

/// One of the provider's fixed resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Everything,
    TopHeadlines,
    Sources,
}

impl Endpoint {
    pub const ALL: [Endpoint; 3] = [Endpoint::Everything, Endpoint::TopHeadlines, Endpoint::Sources];

    /// Short name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Everything => "everything",
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Sources => "sources",
        }
    }

    /// Path below the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Everything => "everything",
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Sources => "top-headlines/sources",
        }
    }

    /// Full endpoint URL ending in `?`, ready for `build_query`.
    pub fn url(self, base_url: &str) -> String {
        format!("{}/{}?", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ApiError::UnknownEndpoint(s.to_string()))
    }
}

/// Appends `&name=value` fragments to a URL under construction.
struct QueryWriter {
    url: String,
}

impl QueryWriter {
    fn push(&mut self, name: &str, value: &str) {
        self.url.push('&');
        self.url.push_str(name);
        self.url.push('=');
        self.url.push_str(value);
    }

    fn push_encoded(&mut self, name: &str, value: &str) {
        self.push(name, &urlencoding::encode(value));
    }

    fn push_allowed(&mut self, name: &str, tokens: Option<&Vec<String>>, allowed: &[&'static str]) {
        if let Some(tokens) = tokens {
            let kept = params::filter_allowed(tokens, allowed);
            if !kept.is_empty() {
                self.push(name, &kept.join(","));
            }
        }
    }

    fn push_free_form(&mut self, name: &str, tokens: Option<&Vec<String>>) {
        if let Some(joined) = tokens.and_then(|t| params::join_free_form(t)) {
            self.push_encoded(name, &joined);
        }
    }
}

/// Build the full request URL from `base` (which must already end in `?`).
///
/// Fails only on a missing or malformed `q`; every other field is
/// normalized or left out.
pub fn build_query(base: &str, request: &SearchRequest) -> Result<String, ApiError> {
    let q = params::normalize_query(request.q.as_deref())?;

    let mut w = QueryWriter {
        url: format!("{base}q={}", urlencoding::encode(&q)),
    };

    w.push_allowed("searchIn", request.search_in.as_ref(), SEARCH_IN);

    // A non-empty `sources` list wins over country/category, even when it
    // contributes no fragment of its own.
    match request.sources.as_ref().filter(|s| !s.is_empty()) {
        Some(_) => w.push_free_form("sources", request.sources.as_ref()),
        None => {
            w.push_allowed("country", request.country.as_ref(), COUNTRIES);
            w.push_allowed("category", request.category.as_ref(), CATEGORIES);
        }
    }

    w.push_free_form("domains", request.domains.as_ref());
    w.push_free_form("excludeDomains", request.exclude_domains.as_ref());

    let dates = params::normalize_dates(request.from.as_deref(), request.to.as_deref());
    if let Some(from) = dates.from {
        w.push_encoded("from", from);
    }
    if let Some(to) = dates.to {
        w.push_encoded("to", to);
    }

    w.push_allowed("language", request.language.as_ref(), LANGUAGES);

    if let Some(sort_by) = request.sort_by.as_deref() {
        w.push("sortBy", params::normalize_sort_by(sort_by).as_str());
    }
    if let Some(page_size) = request.page_size {
        w.push("pageSize", &params::normalize_page_size(page_size).to_string());
    }
    if let Some(page) = request.page {
        w.push("page", &params::normalize_page(page).to_string());
    }

    Ok(w.url)
}
