//! Scenario tests across ingestion, storage and answering.

mod rag_ranking;

use crate::embeddings::providers::TrigramProvider;
use crate::memory_store::MemoryStore;
use crate::storage::NewsStore;
use newsrag_core::{AppConfig, AppError, AppResult};
use newsrag_llm::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// LLM fake that replays scripted outcomes and records prompts.
pub(crate) struct ScriptedLlm {
    outcomes: Mutex<Vec<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedLlm {
    /// Outcomes are consumed in order; the last one repeats.
    pub(crate) fn new(outcomes: Vec<Result<&str, &str>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(
                outcomes
                    .into_iter()
                    .map(|o| o.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());

        let outcome = {
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.len() > 1 {
                outcomes.remove(0)
            } else {
                outcomes[0].clone()
            }
        };

        match outcome {
            Ok(content) => Ok(LlmResponse {
                content,
                model: request.model.clone(),
                usage: LlmUsage::new(100, 10),
            }),
            Err(message) => Err(AppError::Llm(message)),
        }
    }
}

pub(crate) fn memory_news_store() -> Arc<NewsStore> {
    Arc::new(NewsStore::new(
        "test",
        Arc::new(MemoryStore::new()),
        Arc::new(TrigramProvider::new(384)),
    ))
}

pub(crate) fn test_config(workspace: &Path, extra: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("NEWS_API_KEY".to_string(), "news-key".to_string());
    vars.insert("GROQ_API_KEY".to_string(), "groq-key".to_string());
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }

    AppConfig::from_lookup(Some(workspace.to_path_buf()), None, |k| vars.get(k).cloned()).unwrap()
}
