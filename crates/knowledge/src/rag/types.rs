//! RAG response types.

use serde::{Deserialize, Serialize};

/// Error message for a blank question.
pub const EMPTY_QUESTION_MESSAGE: &str = "Question field cannot be empty.";

/// Answer returned when retrieval finds nothing.
pub const NO_RESULTS_ANSWER: &str =
    "I couldn't find any relevant news articles to answer your question. Try ingesting some data first.";

/// Response from a RAG answering query.
///
/// `sources` holds the retrieved document texts in rank order. It is absent
/// (and omitted from JSON) when nothing was retrieved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagResponse {
    /// Answer synthesized by the LLM
    pub answer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

impl RagResponse {
    /// Create a response grounded in `sources`.
    pub fn new(answer: String, sources: Vec<String>) -> Self {
        Self {
            answer,
            sources: Some(sources),
        }
    }

    /// The canned response used when no documents were retrieved.
    pub fn no_information() -> Self {
        Self {
            answer: NO_RESULTS_ANSWER.to_string(),
            sources: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_with_sources() {
        let response = RagResponse::new(
            "Company X beat earnings.".to_string(),
            vec!["Company X beats earnings".to_string()],
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "answer": "Company X beat earnings.",
                "sources": ["Company X beats earnings"]
            })
        );
    }

    #[test]
    fn test_no_information_omits_sources() {
        let json = serde_json::to_value(RagResponse::no_information()).unwrap();
        assert_eq!(json, serde_json::json!({ "answer": NO_RESULTS_ANSWER }));
    }
}
