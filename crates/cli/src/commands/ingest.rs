//! Ingest command handler.

use clap::Args;
use newsrag_core::{config::AppConfig, AppResult};
use newsrag_knowledge::{ingest_topic, NewsApiClient, NewsStore, DEFAULT_TOPIC};

/// Fetch articles for a topic and add them to the collection
#[derive(Args, Debug)]
pub struct IngestCommand {
    /// Search topic
    #[arg(default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl IngestCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ingest command for topic '{}'", self.topic);

        let source = NewsApiClient::from_config(config)?;
        let store = NewsStore::open(config).await?;

        let stats = ingest_topic(&source, &store, &self.topic).await?;

        if self.json {
            super::print_json(&stats)?;
        } else if stats.stored == 0 {
            println!(
                "No articles with content found for '{}' ({} fetched)",
                stats.topic, stats.fetched
            );
        } else {
            println!(
                "Stored {} articles for '{}' ({} fetched, {} skipped) in {:.2}s",
                stats.stored, stats.topic, stats.fetched, stats.skipped, stats.duration_secs
            );
        }

        Ok(())
    }
}
