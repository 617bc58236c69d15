//! NewsAPI response types.

use crate::types::{ArticleMetadata, NewsDocument};
use serde::{Deserialize, Serialize};

/// Body of a successful `/everything` response.
#[derive(Debug, Clone, Deserialize)]
pub struct EverythingResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Body of a NewsAPI error response.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

/// An article as returned by the news source. Every field may be null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Publisher reference inside an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Article {
    /// Convert into a storable document, or `None` when the article has no
    /// usable content.
    pub fn into_document(self) -> Option<NewsDocument> {
        let content = self.content.filter(|c| !c.trim().is_empty())?;

        Some(NewsDocument {
            content,
            metadata: ArticleMetadata {
                source: self
                    .source
                    .and_then(|s| s.name)
                    .unwrap_or_default(),
                title: self.title.unwrap_or_default(),
            },
        })
    }
}
