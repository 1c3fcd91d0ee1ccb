//! Search options and the per-parameter normalization rules.
//!
//! # Design
//! `SearchRequest` exposes only the options the provider recognizes, each
//! with its own type. Normalization is lenient: a token missing from an
//! allow-list, an unparsable date or an out-of-range page number is dropped
//! or replaced and logged with `tracing`, never returned as an error. The
//! search text is the only exception; a missing or malformed `q` aborts the
//! build.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;

pub const MAX_QUERY_LEN: usize = 500;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE: i64 = 1;

pub const SEARCH_IN: &[&str] = &["title", "description", "content"];

pub const LANGUAGES: &[&str] = &[
    "ar", "de", "en", "es", "fr", "he", "it", "nl", "no", "pt", "ru", "sv", "ud", "zh",
];

pub const COUNTRIES: &[&str] = &[
    "ae", "ar", "at", "au", "be", "bg", "br", "ca", "ch", "cn", "co", "cu", "cz", "de", "eg", "fr",
    "gb", "gr", "hk", "hu", "id", "ie", "il", "in", "it", "jp", "kr", "lt", "lv", "ma", "mx", "my",
    "ng", "nl", "no", "nz", "ph", "pl", "pt", "ro", "rs", "ru", "sa", "se", "sg", "si", "sk", "th",
    "tr", "tw", "ua", "us", "ve", "za",
];

pub const CATEGORIES: &[&str] = &[
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

/// Options for one search call. Absent fields are omitted from the URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchRequest {
    pub q: Option<String>,
    pub search_in: Option<Vec<String>>,
    pub sources: Option<Vec<String>>,
    pub country: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
    pub domains: Option<Vec<String>>,
    pub exclude_domains: Option<Vec<String>>,
    /// RFC3339 lower bound.
    pub from: Option<String>,
    /// RFC3339 upper bound.
    pub to: Option<String>,
    pub language: Option<Vec<String>>,
    pub sort_by: Option<String>,
    pub page_size: Option<i64>,
    pub page: Option<i64>,
}

fn to_strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl SearchRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Self::default()
        }
    }

    pub fn search_in<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_in = Some(to_strings(fields));
        self
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = Some(to_strings(sources));
        self
    }

    pub fn country<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.country = Some(to_strings(countries));
        self
    }

    pub fn category<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = Some(to_strings(categories));
        self
    }

    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = Some(to_strings(domains));
        self
    }

    pub fn exclude_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_domains = Some(to_strings(domains));
        self
    }

    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn language<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.language = Some(to_strings(languages));
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }
}

/// Result ordering accepted by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    PublishedAt,
    Popularity,
    Relevancy,
}

impl SortBy {
    const ALL: [SortBy; 3] = [SortBy::PublishedAt, SortBy::Popularity, SortBy::Relevancy];

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::PublishedAt => "publishedAt",
            SortBy::Popularity => "popularity",
            SortBy::Relevancy => "relevancy",
        }
    }

    /// Case-insensitive lookup by wire name.
    pub fn parse(value: &str) -> Option<SortBy> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

/// Validated `from`/`to` bounds, ready to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange<'a> {
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
}

/// Trim and length-check the search text.
pub fn normalize_query(q: Option<&str>) -> Result<String, ApiError> {
    let q = q.ok_or(ApiError::MissingQuery)?.trim();
    let len = q.chars().count();
    if len == 0 {
        return Err(ApiError::InvalidQuery(
            "query string length should be at least 1".to_string(),
        ));
    }
    if len > MAX_QUERY_LEN {
        return Err(ApiError::InvalidQuery(format!(
            "query string length {len} exceeds {MAX_QUERY_LEN}"
        )));
    }
    Ok(q.to_string())
}

/// Keep the tokens present in `allowed`, compared lower-cased.
///
/// Returns the canonical allow-list spellings in first-seen order with
/// repeats removed.
pub fn filter_allowed(tokens: &[String], allowed: &[&'static str]) -> Vec<&'static str> {
    let mut kept: Vec<&'static str> = Vec::new();
    for token in tokens {
        let lowered = token.to_lowercase();
        match allowed.iter().find(|a| **a == lowered) {
            Some(canonical) if !kept.contains(canonical) => kept.push(*canonical),
            Some(_) => {}
            None => debug!(token = %token, "dropping token not in allow-list"),
        }
    }
    kept
}

/// Comma-join free-form tokens verbatim. `None` when nothing is left to send.
pub fn join_free_form(tokens: &[String]) -> Option<String> {
    let joined = tokens.join(",");
    (!joined.is_empty()).then_some(joined)
}

fn is_rfc3339(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

/// Validate the date bounds.
///
/// With both bounds present they are kept or dropped together: either one
/// failing to parse, or `to` preceding `from`, drops both.
pub fn normalize_dates<'a>(from: Option<&'a str>, to: Option<&'a str>) -> DateRange<'a> {
    match (from, to) {
        (Some(from), Some(to)) => {
            let parsed = DateTime::parse_from_rfc3339(from)
                .and_then(|f| DateTime::parse_from_rfc3339(to).map(|t| (f, t)));
            match parsed {
                Ok((f, t)) if t < f => {
                    warn!(from, to, "to date is before from date, dropping both bounds");
                    DateRange::default()
                }
                Ok(_) => DateRange {
                    from: Some(from),
                    to: Some(to),
                },
                Err(err) => {
                    warn!(from, to, error = %err, "unable to parse dates, dropping both bounds");
                    DateRange::default()
                }
            }
        }
        (Some(from), None) if is_rfc3339(from) => DateRange {
            from: Some(from),
            to: None,
        },
        (None, Some(to)) if is_rfc3339(to) => DateRange {
            from: None,
            to: Some(to),
        },
        (Some(value), None) | (None, Some(value)) => {
            warn!(value, "unable to parse date, dropping it");
            DateRange::default()
        }
        (None, None) => DateRange::default(),
    }
}

/// Match `sortBy`, substituting the default instead of dropping.
pub fn normalize_sort_by(value: &str) -> SortBy {
    SortBy::parse(value).unwrap_or_else(|| {
        debug!(value, "unknown sortBy, using {}", SortBy::default().as_str());
        SortBy::default()
    })
}

pub fn normalize_page_size(page_size: i64) -> i64 {
    if page_size < 1 {
        warn!(page_size, "pageSize below 1, using default of {DEFAULT_PAGE_SIZE}");
        return DEFAULT_PAGE_SIZE;
    }
    if page_size > MAX_PAGE_SIZE {
        warn!(page_size, "pageSize above maximum, clamping to {MAX_PAGE_SIZE}");
        return MAX_PAGE_SIZE;
    }
    page_size
}

pub fn normalize_page(page: i64) -> i64 {
    if page < 1 {
        warn!(page, "page below 1, using default of {DEFAULT_PAGE}");
        return DEFAULT_PAGE;
    }
    page
}
