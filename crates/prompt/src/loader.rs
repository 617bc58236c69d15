//! Prompt loader for YAML prompt definitions.

use crate::types::PromptDefinition;
use newsrag_core::{AppError, AppResult};
use std::path::Path;

/// Identifier of the built-in financial analyst prompt.
pub const NEWS_ANALYST_PROMPT_ID: &str = "news.analyst";

const NEWS_ANALYST_YAML: &str = include_str!("../prompts/news.analyst.yml");

/// Variables the answering flow always supplies to `news.analyst`.
const NEWS_ANALYST_VARIABLES: &[&str] = &["context", "question"];

/// Load a prompt definition by ID.
///
/// Looks for `<prompts_dir>/<id>.yml` first and falls back to the prompts
/// compiled into the crate.
///
/// # Example
/// ```no_run
/// use newsrag_prompt::{load_prompt, NEWS_ANALYST_PROMPT_ID};
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new(".newsrag/prompts"), NEWS_ANALYST_PROMPT_ID)?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(prompts_dir: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir.join(format!("{}.yml", prompt_id));

    if prompt_file.exists() {
        tracing::debug!("Loading prompt override from: {:?}", prompt_file);

        let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
            AppError::Prompt(format!(
                "Failed to read prompt file {:?}: {}",
                prompt_file, e
            ))
        })?;

        let definition = parse_prompt(&contents, &prompt_file.display().to_string())?;

        if definition.id != prompt_id {
            return Err(AppError::Prompt(format!(
                "Prompt file {:?} declares id '{}', expected '{}'",
                prompt_file, definition.id, prompt_id
            )));
        }

        tracing::info!("Loaded prompt override: {} ({})", definition.id, definition.title);
        return Ok(definition);
    }

    builtin_prompt(prompt_id)
}

/// Look up a prompt shipped with the crate.
pub fn builtin_prompt(prompt_id: &str) -> AppResult<PromptDefinition> {
    match prompt_id {
        NEWS_ANALYST_PROMPT_ID => parse_prompt(NEWS_ANALYST_YAML, "built-in news.analyst"),
        _ => Err(AppError::Prompt(format!("Unknown prompt: {}", prompt_id))),
    }
}

fn parse_prompt(contents: &str, origin: &str) -> AppResult<PromptDefinition> {
    let definition: PromptDefinition = serde_yaml::from_str(contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML {}: {}", origin, e))
    })?;

    validate_prompt(&definition)?;
    validate_required_variables(&definition)?;
    Ok(definition)
}

fn required_variables(prompt_id: &str) -> &'static [&'static str] {
    match prompt_id {
        NEWS_ANALYST_PROMPT_ID => NEWS_ANALYST_VARIABLES,
        _ => &[],
    }
}

/// Known prompts must declare and use every variable their caller fills in.
fn validate_required_variables(def: &PromptDefinition) -> AppResult<()> {
    for required in required_variables(&def.id) {
        let placeholder = format!("{{{{{}}}}}", required);
        let declared = def.input.variables.iter().any(|v| v == required);

        if !declared || !def.template.contains(&placeholder) {
            return Err(AppError::Prompt(format!(
                "Prompt '{}' must declare and use {}",
                def.id, placeholder
            )));
        }
    }

    Ok(())
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt("Prompt template cannot be empty".to_string()));
    }

    for variable in &def.input.variables {
        let placeholder = format!("{{{{{}}}}}", variable);
        if !def.template.contains(&placeholder) {
            return Err(AppError::Prompt(format!(
                "Prompt '{}' declares variable '{}' but the template never uses {}",
                def.id, variable, placeholder
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_analyst_prompt() {
        let def = builtin_prompt(NEWS_ANALYST_PROMPT_ID).unwrap();
        assert_eq!(def.id, NEWS_ANALYST_PROMPT_ID);
        assert_eq!(def.input.variables, vec!["context", "question"]);
        assert!(def.template.contains("*only*"));
        assert!(def.template.contains("state that clearly"));
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(builtin_prompt("agent.ask.default").is_err());
    }

    #[test]
    fn test_missing_dir_falls_back_to_builtin() {
        let temp = TempDir::new().unwrap();
        let def = load_prompt(&temp.path().join("prompts"), NEWS_ANALYST_PROMPT_ID).unwrap();
        assert_eq!(def.title, "Financial news analyst");
    }

    #[test]
    fn test_workspace_override() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("news.analyst.yml"),
            r#"
id: news.analyst
title: Terse analyst
apiVersion: "1.0"
behavior:
  tone: neutral
  style: terse
input:
  variables: [context, question]
template: "Context: {{context}} Question: {{question}}"
output:
  format: text
"#,
        )
        .unwrap();

        let def = load_prompt(temp.path(), NEWS_ANALYST_PROMPT_ID).unwrap();
        assert_eq!(def.title, "Terse analyst");
    }

    #[test]
    fn test_override_missing_declared_variable() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("news.analyst.yml"),
            r#"
id: news.analyst
title: Broken
apiVersion: "1.0"
behavior:
  tone: neutral
  style: terse
input:
  variables: [context, question]
template: "Question: {{question}}"
output:
  format: text
"#,
        )
        .unwrap();

        let err = load_prompt(temp.path(), NEWS_ANALYST_PROMPT_ID).unwrap_err();
        assert!(err.to_string().contains("context"));
    }

    #[test]
    fn test_override_dropping_context_is_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("news.analyst.yml"),
            r#"
id: news.analyst
title: Ungrounded
apiVersion: "1.0"
behavior:
  tone: neutral
  style: terse
input:
  variables: [question]
template: "Answer freely: {{question}}"
output:
  format: text
"#,
        )
        .unwrap();

        let err = load_prompt(temp.path(), NEWS_ANALYST_PROMPT_ID).unwrap_err();
        assert!(matches!(err, AppError::Prompt(_)));
        assert!(err.to_string().contains("{{context}}"));
    }
}
