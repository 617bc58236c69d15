//! NewsAPI client.
//!
//! Searches `GET {endpoint}/everything` for a topic. See
//! https://newsapi.org/docs/endpoints/everything

use crate::news::types::{Article, EverythingResponse, NewsApiError};
use crate::news::NewsSource;
use newsrag_core::{AppConfig, AppError, AppResult};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// NewsAPI `/everything` client.
pub struct NewsApiClient {
    endpoint: String,
    api_key: String,
    language: String,
    sort_by: String,
    client: reqwest::Client,
}

impl NewsApiClient {
    /// Create a client.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        language: impl Into<String>,
        sort_by: impl Into<String>,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("newsrag/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Ingest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: language.into(),
            sort_by: sort_by.into(),
            client,
        })
    }

    /// Create a client from application config.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(
            &config.news.endpoint,
            config.news_api_key.expose(),
            &config.news.language,
            &config.news.sort_by,
        )
    }

    fn build_request(&self, topic: &str) -> AppResult<reqwest::Request> {
        self.client
            .get(format!("{}/everything", self.endpoint))
            .query(&[
                ("q", topic),
                ("sortBy", self.sort_by.as_str()),
                ("language", self.language.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .build()
            .map_err(|e| AppError::Ingest(format!("Failed to build news request: {}", e)))
    }

    async fn try_fetch(&self, topic: &str) -> AppResult<Vec<Article>> {
        let request = self.build_request(topic)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| AppError::Ingest(format!("Failed to reach news API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<NewsApiError>(&error_text)
                .map(|e| match e.code {
                    Some(code) => format!("{} ({})", e.message, code),
                    None => e.message,
                })
                .unwrap_or(error_text);

            return Err(AppError::Ingest(format!(
                "News API error ({}): {}",
                status, message
            )));
        }

        let body: EverythingResponse = response
            .json()
            .await
            .map_err(|e| AppError::Ingest(format!("Failed to parse news response: {}", e)))?;

        Ok(body.articles)
    }
}

#[async_trait::async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch(&self, topic: &str) -> Vec<Article> {
        tracing::info!("Fetching news for topic: {}", topic);

        match self.try_fetch(topic).await {
            Ok(articles) => {
                tracing::info!("Fetched {} articles for '{}'", articles.len(), topic);
                articles
            }
            Err(e) => {
                tracing::warn!("Could not fetch news for '{}': {}", topic, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> NewsApiClient {
        NewsApiClient::new(endpoint, "news-key", "en", "publishedAt").unwrap()
    }

    #[test]
    fn test_build_request_query() {
        let request = client("https://newsapi.org/v2/").build_request("NVIDIA earnings").unwrap();
        let url = request.url();

        assert_eq!(url.path(), "/v2/everything");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "NVIDIA earnings".to_string()),
                ("sortBy".to_string(), "publishedAt".to_string()),
                ("language".to_string(), "en".to_string()),
                ("apiKey".to_string(), "news-key".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_empty() {
        let articles = client("http://127.0.0.1:9").fetch("NVIDIA").await;
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_try_fetch_surfaces_error() {
        let result = client("http://127.0.0.1:9").try_fetch("NVIDIA").await;
        assert!(matches!(result, Err(AppError::Ingest(_))));
    }
}
