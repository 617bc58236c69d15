//! Configuration management for newsrag.
//!
//! Configuration is loaded once at startup and passed explicitly to every
//! component. Sources, lowest precedence first:
//! - Built-in defaults
//! - `.env` file in the current directory
//! - YAML config file (`<workspace>/.newsrag/config.yaml` or `NEWSRAG_CONFIG`)
//! - Environment variables
//! - Command-line flags (`with_overrides`)
//!
//! `NEWS_API_KEY` and `GROQ_API_KEY` are required; loading fails fast
//! when either is missing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Environment variable holding the NewsAPI key.
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";

/// Environment variable holding the Groq API key.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// LLM providers accepted by `validate`.
pub const KNOWN_PROVIDERS: [&str; 2] = ["groq", "ollama"];

/// Embedding providers accepted by `validate`.
pub const KNOWN_EMBEDDING_PROVIDERS: [&str; 2] = ["trigram", "ollama"];

/// A secret value that never shows up in logs or serialized output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw secret for use in an outgoing request.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Workspace root (contains `.newsrag/`)
    pub workspace: PathBuf,

    /// Config file that was merged, if any
    pub config_file: Option<PathBuf>,

    /// Directory holding the persisted vector collection
    pub db_dir: PathBuf,

    /// Collection name inside `db_dir`
    pub collection: String,

    /// Generation provider ("groq", "ollama")
    pub provider: String,

    /// Generation model identifier
    pub model: String,

    /// Optional generation endpoint override
    pub llm_endpoint: Option<String>,

    /// Embedding settings
    pub embedding: EmbeddingSettings,

    /// News source settings
    pub news: NewsSettings,

    /// Number of documents retrieved per question
    pub top_k: usize,

    /// HTTP server settings
    pub server: ServerSettings,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    #[serde(skip_serializing)]
    pub news_api_key: ApiKey,

    #[serde(skip_serializing)]
    pub groq_api_key: ApiKey,
}

/// Embedding provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    pub provider: String,
    pub model: String,
    pub dimensions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
            endpoint: None,
        }
    }
}

/// NewsAPI request settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSettings {
    pub endpoint: String,
    pub language: String,
    #[serde(rename = "sortBy")]
    pub sort_by: String,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://newsapi.org/v2".to_string(),
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
        }
    }
}

/// HTTP server bind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    embedding: Option<EmbeddingSection>,
    news: Option<NewsSection>,
    storage: Option<StorageSection>,
    retrieval: Option<RetrievalSection>,
    server: Option<ServerSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingSection {
    provider: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct NewsSection {
    endpoint: Option<String>,
    language: Option<String>,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct StorageSection {
    #[serde(rename = "dbDir")]
    db_dir: Option<PathBuf>,
    collection: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RetrievalSection {
    #[serde(rename = "topK")]
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl AppConfig {
    /// Defaults for everything except the secrets.
    fn defaults(workspace: PathBuf) -> Self {
        Self {
            db_dir: workspace.join("db"),
            workspace,
            config_file: None,
            collection: "financial_news".to_string(),
            provider: "groq".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            llm_endpoint: None,
            embedding: EmbeddingSettings::default(),
            news: NewsSettings::default(),
            top_k: 5,
            server: ServerSettings::default(),
            log_level: None,
            verbose: false,
            no_color: false,
            news_api_key: ApiKey::default(),
            groq_api_key: ApiKey::default(),
        }
    }

    /// Load configuration from `.env`, the config file and the process environment.
    ///
    /// `workspace` and `config_file` come from the command line (which already
    /// folds in `NEWSRAG_WORKSPACE` / `NEWSRAG_CONFIG`).
    ///
    /// Environment variables:
    /// - `NEWS_API_KEY`, `GROQ_API_KEY`: required secrets
    /// - `NEWSRAG_DB_DIR`: collection directory
    /// - `NEWSRAG_PROVIDER`, `NEWSRAG_MODEL`: generation provider and model
    /// - `RUST_LOG`: log filter
    /// - `NO_COLOR`: disable colored output
    pub fn load(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(AppError::Config(format!("Failed to read .env file: {}", e)));
            }
        }

        Self::from_lookup(workspace, config_file, |key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        lookup: F,
    ) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let workspace = match workspace {
            Some(path) => path,
            None => std::env::current_dir()?,
        };

        if !workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                workspace
            )));
        }

        let mut config = Self::defaults(workspace);

        let config_path = config_file
            .clone()
            .unwrap_or_else(|| config.newsrag_dir().join("config.yaml"));

        if config_path.exists() {
            config.merge_yaml(&config_path)?;
            config.config_file = Some(config_path);
        } else if config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        if let Some(db_dir) = lookup("NEWSRAG_DB_DIR") {
            config.db_dir = PathBuf::from(db_dir);
        }
        if let Some(provider) = lookup("NEWSRAG_PROVIDER") {
            config.provider = provider;
        }
        if let Some(model) = lookup("NEWSRAG_MODEL") {
            config.model = model;
        }
        if config.log_level.is_none() {
            config.log_level = lookup("RUST_LOG");
        }
        if lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        config.news_api_key = require_secret(&lookup, NEWS_API_KEY_ENV)?;
        config.groq_api_key = require_secret(&lookup, GROQ_API_KEY_ENV)?;

        config.db_dir = config.resolve(&config.db_dir);

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &Path) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                self.provider = provider;
            }
            if let Some(model) = llm.model {
                self.model = model;
            }
            if llm.endpoint.is_some() {
                self.llm_endpoint = llm.endpoint;
            }
        }

        if let Some(embedding) = file.embedding {
            if let Some(provider) = embedding.provider {
                self.embedding.provider = provider;
            }
            if let Some(model) = embedding.model {
                self.embedding.model = model;
            }
            if let Some(dimensions) = embedding.dimensions {
                self.embedding.dimensions = dimensions;
            }
            if embedding.endpoint.is_some() {
                self.embedding.endpoint = embedding.endpoint;
            }
        }

        if let Some(news) = file.news {
            if let Some(endpoint) = news.endpoint {
                self.news.endpoint = endpoint;
            }
            if let Some(language) = news.language {
                self.news.language = language;
            }
            if let Some(sort_by) = news.sort_by {
                self.news.sort_by = sort_by;
            }
        }

        if let Some(storage) = file.storage {
            if let Some(db_dir) = storage.db_dir {
                self.db_dir = db_dir;
            }
            if let Some(collection) = storage.collection {
                self.collection = collection;
            }
        }

        if let Some(top_k) = file.retrieval.and_then(|r| r.top_k) {
            self.top_k = top_k;
        }

        if let Some(server) = file.server {
            if let Some(host) = server.host {
                self.server.host = host;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the environment and the
    /// config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        db_dir: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(db_dir) = db_dir {
            self.db_dir = self.resolve(&db_dir);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if verbose {
            self.verbose = true;
        }

        // --log-level wins over --verbose
        match log_level {
            Some(level) => self.log_level = Some(level),
            None if verbose => self.log_level = Some("debug".to_string()),
            None => {}
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the `.newsrag` directory.
    pub fn newsrag_dir(&self) -> PathBuf {
        self.workspace.join(".newsrag")
    }

    /// Resolve a possibly relative path against the workspace.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Validate provider names and numeric settings.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if !KNOWN_EMBEDDING_PROVIDERS.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                KNOWN_EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if self.embedding.dimensions == 0 {
            return Err(AppError::Config(
                "Embedding dimensions must be greater than zero".to_string(),
            ));
        }

        if self.top_k == 0 {
            return Err(AppError::Config(
                "retrieval.topK must be greater than zero".to_string(),
            ));
        }

        if self.collection.trim().is_empty() {
            return Err(AppError::Config("Collection name cannot be empty".to_string()));
        }

        Ok(())
    }
}

fn require_secret<F>(lookup: &F, key: &str) -> AppResult<ApiKey>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(ApiKey::new(value.trim())),
        _ => Err(AppError::Config(format!(
            "API keys for NewsAPI or Groq are not set: {} is missing. Add it to the environment or the .env file.",
            key
        ))),
    }
}
