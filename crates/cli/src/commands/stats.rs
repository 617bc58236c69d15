//! Stats command handler.

use clap::Args;
use newsrag_core::{config::AppConfig, AppResult};
use newsrag_knowledge::NewsStore;

/// Show collection statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let store = NewsStore::open(config).await?;
        let stats = store.stats()?;

        if self.json {
            return super::print_json(&stats);
        }

        println!("Collection: {}", stats.collection);
        println!("  Records: {}", stats.records);
        match stats.dimensions {
            Some(dimensions) => println!("  Dimensions: {}", dimensions),
            None => println!("  Dimensions: (empty)"),
        }
        println!(
            "  Embeddings: {} / {}",
            stats.embedding_provider, stats.embedding_model
        );
        if let Some(path) = &stats.db_path {
            println!("  DB: {} ({} bytes)", path.display(), stats.db_size_bytes);
        }
        if let Some(last) = stats.last_ingested_at {
            println!("  Last ingest: {}", last);
        }

        Ok(())
    }
}
