use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: String,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: String,
    pub content: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub language: String,
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesPayload {
    pub total_results: usize,
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourcesPayload {
    pub sources: Vec<Source>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Ok(T),
    Error { code: String, message: String },
}

pub struct MockState {
    api_key: String,
    sources: Vec<Source>,
    articles: Vec<Article>,
}

type Shared = Arc<MockState>;
type Params = HashMap<String, String>;

pub fn app(api_key: impl Into<String>) -> Router {
    let sources = fixture_sources();
    let articles = fixture_articles(&sources);
    let state: Shared = Arc::new(MockState {
        api_key: api_key.into(),
        sources,
        articles,
    });
    Router::new()
        .route("/v2/everything", get(everything))
        .route("/v2/top-headlines", get(top_headlines))
        .route("/v2/top-headlines/sources", get(list_sources))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: String) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

fn error(status: StatusCode, code: &str, message: &str) -> Response {
    let body: Envelope<()> = Envelope::Error {
        code: code.to_string(),
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    match headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        None => Err(error(
            StatusCode::UNAUTHORIZED,
            "apiKeyMissing",
            "Your API key is missing. Append this to the URL with the apiKey param, or use the x-api-key HTTP header.",
        )),
        Some(key) if key != state.api_key => Err(error(
            StatusCode::UNAUTHORIZED,
            "apiKeyInvalid",
            "Your API key is invalid or incorrect. Check your key, or go to https://newsapi.org to create a free API key.",
        )),
        Some(_) => Ok(()),
    }
}

fn list_param(params: &Params, name: &str) -> Option<Vec<String>> {
    params
        .get(name)
        .map(|v| v.split(',').map(|s| s.trim().to_lowercase()).collect())
}

fn int_param(params: &Params, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(|v| v.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn search_articles(state: &MockState, params: &Params, headlines: bool) -> Response {
    let Some(q) = params.get("q").map(|q| q.to_lowercase()) else {
        return error(
            StatusCode::BAD_REQUEST,
            "parametersMissing",
            "Required parameters are missing. Please set any of the following parameters and try again: q.",
        );
    };
    let sources = list_param(params, "sources");
    let countries = list_param(params, "country");
    let categories = list_param(params, "category");

    let matches: Vec<&Article> = state
        .articles
        .iter()
        .filter(|a| {
            a.title.to_lowercase().contains(&q) || a.description.to_lowercase().contains(&q)
        })
        .filter(|a| {
            let id = a.source.id.as_deref().unwrap_or_default();
            let source = state.sources.iter().find(|s| s.id == id);
            let in_list = |list: &Option<Vec<String>>, field: fn(&Source) -> &str| match list {
                None => true,
                Some(values) => source.is_some_and(|s| values.iter().any(|v| v == field(s))),
            };
            let by_source = sources.as_ref().map_or(true, |ids| ids.iter().any(|s| s == id));
            let by_country = !headlines || in_list(&countries, |s| s.country.as_str());
            let by_category = !headlines || in_list(&categories, |s| s.category.as_str());
            by_source && by_country && by_category
        })
        .collect();

    let page_size = int_param(params, "pageSize", 100).min(100);
    let page = int_param(params, "page", 1);
    let articles = matches
        .iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .map(|a| (*a).clone())
        .collect();

    tracing::info!(q = %q, total = matches.len(), headlines, "served article search");
    Json(Envelope::Ok(ArticlesPayload {
        total_results: matches.len(),
        articles,
    }))
    .into_response()
}

async fn everything(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    search_articles(&state, &params, false)
}

async fn top_headlines(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    search_articles(&state, &params, true)
}

async fn list_sources(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let categories = list_param(&params, "category");
    let languages = list_param(&params, "language");
    let countries = list_param(&params, "country");
    let keep = |list: &Option<Vec<String>>, value: &str| {
        list.as_ref().map_or(true, |values| values.iter().any(|v| v == value))
    };
    let sources: Vec<Source> = state
        .sources
        .iter()
        .filter(|s| keep(&categories, s.category.as_str()))
        .filter(|s| keep(&languages, s.language.as_str()))
        .filter(|s| keep(&countries, s.country.as_str()))
        .cloned()
        .collect();

    tracing::info!(total = sources.len(), "served sources listing");
    Json(Envelope::Ok(SourcesPayload { sources })).into_response()
}

fn source(id: &str, name: &str, category: &str, language: &str, country: &str) -> Source {
    Source {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("Latest news from {name}."),
        url: format!("https://{id}.example.com"),
        category: category.to_string(),
        language: language.to_string(),
        country: country.to_string(),
    }
}

fn fixture_sources() -> Vec<Source> {
    vec![
        source("bbc-news", "BBC News", "general", "en", "gb"),
        source("techcrunch", "TechCrunch", "technology", "en", "us"),
        source("the-wall-street-journal", "The Wall Street Journal", "business", "en", "us"),
        source("der-tagesspiegel", "Der Tagesspiegel", "general", "de", "de"),
    ]
}

fn fixture_articles(sources: &[Source]) -> Vec<Article> {
    let items = [
        ("bbc-news", "Apple unveils new iPhone", "The phone maker showed its latest handset.", "2024-03-01T09:00:00Z"),
        ("techcrunch", "Apple opens developer conference", "Keynote recap and platform updates.", "2024-03-02T17:30:00Z"),
        ("the-wall-street-journal", "Apple shares rise after earnings", "Investors cheered services growth.", "2024-03-03T21:05:00Z"),
        ("techcrunch", "Rust adoption grows in startups", "Memory safety is winning converts.", "2024-03-04T12:00:00Z"),
        ("der-tagesspiegel", "Berlin weather turns mild", "Spring arrives early in the capital.", "2024-03-05T06:45:00Z"),
    ];
    items
        .iter()
        .enumerate()
        .map(|(i, (id, title, description, published_at))| {
            let name = sources
                .iter()
                .find(|s| s.id == *id)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            Article {
                source: ArticleSource {
                    id: Some(id.to_string()),
                    name,
                },
                author: (i % 2 == 0).then(|| "Staff Reporter".to_string()),
                title: title.to_string(),
                description: description.to_string(),
                url: format!("https://{id}.example.com/articles/{i}"),
                url_to_image: None,
                published_at: published_at.to_string(),
                content: Some(format!("{description} [+{} chars]", 100 + i)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_serializes_with_status() {
        let env = Envelope::Ok(SourcesPayload { sources: Vec::new() });
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["sources"].as_array().unwrap().is_empty());
    }

    #[test]
    fn error_envelope_serializes_code_and_message() {
        let env: Envelope<()> = Envelope::Error {
            code: "apiKeyInvalid".to_string(),
            message: "nope".to_string(),
        };
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "apiKeyInvalid");
        assert_eq!(json["message"], "nope");
    }

    #[test]
    fn article_uses_camel_case_keys() {
        let article = fixture_articles(&fixture_sources()).remove(0);
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["source"]["id"], "bbc-news");
        assert_eq!(json["source"]["name"], "BBC News");
        assert!(json.get("publishedAt").is_some());
        assert!(json.get("urlToImage").is_some());
    }

    #[test]
    fn every_fixture_article_has_a_known_source() {
        let sources = fixture_sources();
        for article in fixture_articles(&sources) {
            assert!(!article.source.name.is_empty(), "{}", article.title);
        }
    }

    #[test]
    fn list_param_splits_and_lowercases() {
        let mut params = Params::new();
        params.insert("country".to_string(), "US, gb".to_string());
        assert_eq!(
            list_param(&params, "country"),
            Some(vec!["us".to_string(), "gb".to_string()])
        );
        assert_eq!(list_param(&params, "category"), None);
    }

    #[test]
    fn int_param_falls_back_on_junk() {
        let mut params = Params::new();
        params.insert("page".to_string(), "0".to_string());
        params.insert("pageSize".to_string(), "abc".to_string());
        assert_eq!(int_param(&params, "page", 1), 1);
        assert_eq!(int_param(&params, "pageSize", 100), 100);
    }
}
