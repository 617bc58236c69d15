//! Serve command handler.

use clap::Args;
use newsrag_core::{config::AppConfig, AppError, AppResult};
use newsrag_knowledge::{Answerer, NewsStore};
use newsrag_server::AppState;
use std::sync::Arc;

/// Run the HTTP query API
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Bind address (default from config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port (default from config)
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let host = self.host.as_deref().unwrap_or(&config.server.host);
        let port = self.port.unwrap_or(config.server.port);

        tracing::info!("Executing serve command on {}:{}", host, port);

        let store = Arc::new(NewsStore::open(config).await?);
        let answerer = Answerer::from_config(config, store)?;
        let state = AppState::new(Arc::new(answerer));

        newsrag_server::serve(state, host, port)
            .await
            .map_err(|e| AppError::Other(format!("{:#}", e)))
    }
}
