//! Prompt system for newsrag.
//!
//! Prompts are YAML definitions rendered with Handlebars. A built-in
//! `news.analyst` prompt ships with the crate and can be overridden per
//! workspace by dropping `<id>.yml` into `.newsrag/prompts/`.

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{builtin_prompt, load_prompt, NEWS_ANALYST_PROMPT_ID};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptBehavior, PromptDefinition, PromptInputSpec, PromptOutputSpec};
