//! RAG answering orchestration.
//!
//! Retrieves relevant news documents and asks the LLM to answer from them.

use crate::rag::types::{RagResponse, EMPTY_QUESTION_MESSAGE};
use crate::storage::{NewsStore, DEFAULT_TOP_K};
use newsrag_core::{AppConfig, AppError, AppResult};
use newsrag_llm::{create_client, LlmClient, LlmRequest};
use newsrag_prompt::{build_prompt, load_prompt, PromptDefinition, NEWS_ANALYST_PROMPT_ID};
use std::collections::HashMap;
use std::sync::Arc;

/// Separator placed between documents in the prompt context.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Answers questions from a news collection.
///
/// Holds no per-request state; share it behind an `Arc`.
pub struct Answerer {
    store: Arc<NewsStore>,
    llm: Arc<dyn LlmClient>,
    prompt: PromptDefinition,
    model: String,
    top_k: usize,
}

impl Answerer {
    pub fn new(
        store: Arc<NewsStore>,
        llm: Arc<dyn LlmClient>,
        prompt: PromptDefinition,
        model: impl Into<String>,
    ) -> Self {
        Self {
            store,
            llm,
            prompt,
            model: model.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Build an answerer from application config: the configured LLM
    /// provider and the `news.analyst` prompt (workspace override first).
    pub fn from_config(config: &AppConfig, store: Arc<NewsStore>) -> AppResult<Self> {
        let llm = create_client(
            &config.provider,
            config.llm_endpoint.as_deref(),
            Some(config.groq_api_key.expose()),
        )?;

        let prompts_dir = crate::config::get_prompts_dir(&config.newsrag_dir());
        let prompt = load_prompt(&prompts_dir, NEWS_ANALYST_PROMPT_ID)?;

        tracing::debug!(
            "Answerer ready (provider: {}, model: {}, prompt: {}, top_k: {})",
            llm.provider_name(),
            config.model,
            prompt.id,
            config.top_k
        );

        Ok(Self::new(store, llm, prompt, &config.model).with_top_k(config.top_k))
    }

    /// Set how many documents are retrieved per question.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Answer a question from the collection.
    ///
    /// A blank question is a validation error and touches no backend. When
    /// retrieval finds nothing the canned "no information" answer is
    /// returned without calling the LLM.
    pub async fn answer(&self, question: &str) -> AppResult<RagResponse> {
        if question.trim().is_empty() {
            return Err(AppError::Validation(EMPTY_QUESTION_MESSAGE.to_string()));
        }

        tracing::info!("Answering question: {}", question);

        let documents = self.store.query(question, self.top_k).await?;

        if documents.is_empty() {
            tracing::info!("No documents retrieved; returning canned answer");
            return Ok(RagResponse::no_information());
        }

        tracing::debug!("Retrieved {} documents for context", documents.len());

        let context = build_context(&documents);

        let mut variables = HashMap::new();
        variables.insert("context".to_string(), context);
        variables.insert("question".to_string(), question.to_string());
        let built = build_prompt(&self.prompt, variables)?;

        let mut request = LlmRequest::new(built.user, &self.model);
        if let Some(system) = built.system {
            request = request.with_system(system);
        }

        let response = self.llm.complete(&request).await.map_err(|e| {
            let cause = match e {
                AppError::Llm(message) => message,
                other => other.to_string(),
            };
            tracing::error!("Generation failed: {}", cause);
            AppError::Llm(format!("An error occurred with the generation API: {}", cause))
        })?;

        tracing::info!(
            "Generated answer with {} (tokens: prompt={}, completion={}, total={})",
            response.model,
            response.usage.prompt_tokens,
            response.usage.completion_tokens,
            response.usage.total_tokens
        );

        Ok(RagResponse::new(response.content, documents))
    }
}

/// Join retrieved documents into the prompt context block.
pub fn build_context(documents: &[String]) -> String {
    documents.join(CONTEXT_SEPARATOR)
}
