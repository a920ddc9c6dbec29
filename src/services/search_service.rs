use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SearchConfig;

pub const SEARCH_DEPTH: &str = "basic";
pub const MAX_RESULTS: u32 = 10;
pub const DEFAULT_TITLE: &str = "No title";

/// One search hit with missing fields already defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Search API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse search results: {0}")]
    Parse(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Results in provider order.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

pub struct TavilySearchProvider {
    client: Client,
    api_url: String,
    api_key: String,
}

impl TavilySearchProvider {
    pub fn new(client: Client, config: &SearchConfig, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: &'static str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Option<Vec<TavilyResult>>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: Option<String>,
    url: Option<String>,
    content: Option<String>,
}

impl From<TavilyResult> for SearchResult {
    fn from(r: TavilyResult) -> Self {
        Self {
            title: r.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            url: r.url.unwrap_or_default(),
            content: r.content.unwrap_or_default(),
        }
    }
}

pub(crate) fn parse_results(body: &str) -> Result<Vec<SearchResult>, SearchError> {
    let response: TavilyResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(response
        .results
        .unwrap_or_default()
        .into_iter()
        .map(SearchResult::from)
        .collect())
}

#[async_trait]
impl SearchProvider for TavilySearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(&TavilyRequest {
                api_key: &self.api_key,
                query,
                search_depth: SEARCH_DEPTH,
                max_results: MAX_RESULTS,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let results = parse_results(&body)?;
        tracing::debug!("Search returned {} results", results.len());
        Ok(results)
    }
}
