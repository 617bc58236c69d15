//! Embedding configuration types and persistence.

use newsrag_core::config::EmbeddingSettings;
use newsrag_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Embedding configuration for a collection.
///
/// Persisted next to the collection's database the first time it is opened
/// and compared on every later open, so a collection never mixes vectors
/// from different models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "trigram", "ollama"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Provider endpoint, when the provider talks to a server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self::from(&EmbeddingSettings::default())
    }
}

impl From<&EmbeddingSettings> for EmbeddingConfig {
    fn from(settings: &EmbeddingSettings) -> Self {
        Self {
            provider: settings.provider.clone(),
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            endpoint: settings.endpoint.clone(),
        }
    }
}

impl EmbeddingConfig {
    /// Load the persisted config for a collection, if one exists.
    pub fn load(db_dir: &Path, collection: &str) -> AppResult<Option<Self>> {
        let config_path = crate::config::get_embedding_config_path(db_dir, collection);

        if !config_path.exists() {
            tracing::debug!(
                "No embedding config for collection '{}' at {:?}",
                collection,
                config_path
            );
            return Ok(None);
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            AppError::Knowledge(format!("Failed to read config at {:?}: {}", config_path, e))
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            AppError::Knowledge(format!(
                "Failed to parse config at {:?}: {}",
                config_path, e
            ))
        })?;

        Ok(Some(config))
    }

    /// Save this config for a collection.
    pub fn save(&self, db_dir: &Path, collection: &str) -> AppResult<()> {
        let config_path = crate::config::get_embedding_config_path(db_dir, collection);

        fs::create_dir_all(db_dir).map_err(|e| {
            AppError::Knowledge(format!("Failed to create database directory: {}", e))
        })?;

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Knowledge(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, yaml).map_err(|e| {
            AppError::Knowledge(format!(
                "Failed to write config to {:?}: {}",
                config_path, e
            ))
        })?;

        tracing::debug!("Saved embedding config for collection '{}'", collection);
        Ok(())
    }

    /// Validate that another config is consistent with this one.
    ///
    /// Endpoints may differ; provider, model and dimensions may not.
    pub fn validate_consistency(&self, other: &Self) -> AppResult<()> {
        if self.provider != other.provider {
            return Err(AppError::Knowledge(format!(
                "Provider mismatch: expected '{}', got '{}'",
                self.provider, other.provider
            )));
        }

        if self.model != other.model {
            return Err(AppError::Knowledge(format!(
                "Model mismatch: expected '{}', got '{}'",
                self.model, other.model
            )));
        }

        if self.dimensions != other.dimensions {
            return Err(AppError::Knowledge(format!(
                "Dimension mismatch: expected {}, got {}",
                self.dimensions, other.dimensions
            )));
        }

        Ok(())
    }

    /// Check this config against the one persisted for a collection.
    ///
    /// The first open of a collection records the config; later opens must
    /// match it.
    pub fn ensure_persisted(&self, db_dir: &Path, collection: &str) -> AppResult<()> {
        match Self::load(db_dir, collection)? {
            Some(existing) => existing.validate_consistency(self).map_err(|e| {
                AppError::Knowledge(format!(
                    "Collection '{}' was built with a different embedding configuration. {}",
                    collection, e
                ))
            }),
            None => self.save(db_dir, collection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, "trigram");
        assert_eq!(config.model, "trigram-v1");
        assert_eq!(config.dimensions, 384);
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let config = EmbeddingConfig {
            provider: "ollama".to_string(),
            model: "nomic-embed-text".to_string(),
            dimensions: 768,
            endpoint: Some("http://localhost:11434".to_string()),
        };

        config.save(temp.path(), "financial_news").unwrap();

        let loaded = EmbeddingConfig::load(temp.path(), "financial_news")
            .unwrap()
            .unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing() {
        let temp = TempDir::new().unwrap();
        assert!(EmbeddingConfig::load(temp.path(), "nothing").unwrap().is_none());
    }

    #[test]
    fn test_validate_consistency_provider_mismatch() {
        let config1 = EmbeddingConfig::default();
        let config2 = EmbeddingConfig {
            provider: "ollama".to_string(),
            ..config1.clone()
        };

        let result = config1.validate_consistency(&config2);
        assert!(result.unwrap_err().to_string().contains("Provider mismatch"));
    }

    #[test]
    fn test_validate_consistency_ignores_endpoint() {
        let config1 = EmbeddingConfig::default();
        let config2 = EmbeddingConfig {
            endpoint: Some("http://elsewhere:11434".to_string()),
            ..config1.clone()
        };

        assert!(config1.validate_consistency(&config2).is_ok());
    }

    #[test]
    fn test_ensure_persisted_rejects_dimension_change() {
        let temp = TempDir::new().unwrap();
        let original = EmbeddingConfig::default();
        original.ensure_persisted(temp.path(), "news").unwrap();

        // Same settings reopen fine
        original.ensure_persisted(temp.path(), "news").unwrap();

        let changed = EmbeddingConfig {
            dimensions: 128,
            ..original
        };
        let err = changed.ensure_persisted(temp.path(), "news").unwrap_err();
        assert!(err.to_string().contains("Dimension mismatch"));
    }
}
