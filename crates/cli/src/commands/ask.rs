//! Ask command handler.
//!
//! Answers one question from the collection without starting the server.

use clap::Args;
use newsrag_core::{config::AppConfig, AppResult};
use newsrag_knowledge::{Answerer, NewsStore};
use std::sync::Arc;

/// Ask a question about the ingested news
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Number of articles to retrieve (default from config)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let store = Arc::new(NewsStore::open(config).await?);
        let mut answerer = Answerer::from_config(config, store)?;
        if let Some(top_k) = self.top_k {
            answerer = answerer.with_top_k(top_k);
        }

        let response = answerer.answer(&self.question).await?;

        if self.json {
            return super::print_json(&response);
        }

        println!("Answer:");
        println!("{}", response.answer);

        if let Some(sources) = &response.sources {
            println!();
            println!("Sources:");
            for (i, source) in sources.iter().enumerate() {
                println!("[{}] {}", i + 1, preview(source, 120));
            }
        }

        Ok(())
    }
}

/// First `max` characters of a document on one line.
fn preview(text: &str, max: usize) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= max {
        line
    } else {
        let cut: String = line.chars().take(max).collect();
        format!("{}...", cut)
    }
}
