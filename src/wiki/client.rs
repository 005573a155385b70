//! Content backend client.
//!
//! # Responsibilities
//! - Issue the shortcut and redirect searches concurrently
//! - Check status and decode the response envelope
//! - Combine both page lists into the request's routes
//!
//! # Design Decisions
//! - Both searches always run to completion before a result or error is produced
//! - Any failed search fails the whole load; no partial route sets
//! - No retries and no local cache; a `max-age` hint lets intermediate caches help

use reqwest::header::CACHE_CONTROL;
use serde_json::{json, Map, Value};
use std::time::Duration;

use crate::config::WikiConfig;
use crate::observability::metrics;
use crate::routing::RouteEntry;
use crate::wiki::canonical::CanonicalUrls;
use crate::wiki::source::{dedupe_pages, extract_routes};
use crate::wiki::types::{envelope_results, Page, SearchQuery, WikiError};

/// Client for the wiki search API.
#[derive(Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    config: WikiConfig,
    urls: CanonicalUrls,
}

impl WikiClient {
    pub fn new(http: reqwest::Client, config: WikiConfig) -> Self {
        let urls = CanonicalUrls::from_config(&config);
        Self { http, config, urls }
    }

    /// Load every route currently declared on the wiki.
    pub async fn load_routes(&self) -> Result<Vec<RouteEntry>, WikiError> {
        let (shortcuts, redirects) = tokio::join!(
            self.search(SearchQuery::Shortcuts),
            self.search(SearchQuery::Redirects),
        );

        let (shortcuts, redirects) = match (shortcuts, redirects) {
            (Ok(s), Ok(r)) => (s, r),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => return Err(e),
            (Err(e), Err(other)) => {
                tracing::warn!(error = %other, "Second search also failed");
                return Err(e);
            }
        };

        let pages = dedupe_pages(shortcuts.into_iter().chain(redirects));
        let routes = extract_routes(&pages, &self.urls);
        tracing::debug!(pages = pages.len(), routes = routes.len(), "Routes loaded");
        Ok(routes)
    }

    /// Run one search and return its readable page records.
    pub async fn search(&self, query: SearchQuery) -> Result<Vec<Page>, WikiError> {
        let result = self.fetch(query).await;
        metrics::record_backend_query(query.field(), result.is_ok());
        if let Err(e) = &result {
            tracing::error!(query = %query, error = %e, "Wiki search failed");
        }
        result
    }

    async fn fetch(&self, query: SearchQuery) -> Result<Vec<Page>, WikiError> {
        let response = self
            .http
            .get(&self.config.search_url)
            .query(&[("input", search_input(query))])
            .header(CACHE_CONTROL, format!("max-age={}", self.config.cache_ttl_secs))
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|source| WikiError::Request { query, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Status {
                query,
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| WikiError::Envelope {
            query,
            reason: e.to_string(),
        })?;
        let records = envelope_results(&body).ok_or_else(|| WikiError::Envelope {
            query,
            reason: "missing result.data.results".to_string(),
        })?;

        Ok(records
            .iter()
            .filter_map(|record| {
                let page = Page::from_value(record);
                if page.is_none() {
                    tracing::warn!(query = %query, "Skipping page record without a pageRef");
                }
                page
            })
            .collect())
    }
}

/// JSON `input` parameter selecting pages that carry `query`'s field.
pub fn search_input(query: SearchQuery) -> String {
    let mut criteria = Map::new();
    criteria.insert(query.field().to_string(), Value::Bool(true));
    json!({ "match": criteria }).to_string()
}

impl std::fmt::Debug for WikiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikiClient")
            .field("search_url", &self.config.search_url)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish()
    }
}
