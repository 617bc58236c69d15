//! RAG (Retrieval-Augmented Generation) answering over news collections.

pub mod ask;
pub mod types;

pub use ask::{build_context, Answerer, CONTEXT_SEPARATOR};
pub use types::{RagResponse, EMPTY_QUESTION_MESSAGE, NO_RESULTS_ANSWER};
