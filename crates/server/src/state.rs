use newsrag_knowledge::Answerer;
use std::sync::Arc;

/// Shared state for request handlers.
pub struct AppState {
    pub answerer: Arc<Answerer>,
}

impl AppState {
    pub fn new(answerer: Arc<Answerer>) -> Arc<Self> {
        Arc::new(Self { answerer })
    }
}
