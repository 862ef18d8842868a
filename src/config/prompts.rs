//! Prompt templates for tubechat.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub answer: AnswerPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for the summarization pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    /// Per-chunk prompt. Variables: `{{chunk}}`.
    pub chunk: String,
    /// Merge prompt. Variables: `{{sections}}`.
    pub merge: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            chunk: "Summarize this YouTube video by identifying the key points discussed and their core explanations. \
Use clear headings and relevant emojis to structure the summary. \
Crucially, highlight the single most important takeaway message of the video. \
Format the summary in a concise and easily digestible manner, similar to an executive summary in a news article. \
Avoid phrases like 'the video says'.

{{chunk}}"
                .to_string(),

            merge: "Create a cohesive summary from these sections, maintaining the emoji headings \
and structural format. Combine similar topics under unified headings and ensure \
a smooth flow between sections:

{{sections}}"
                .to_string(),
        }
    }
}

/// Prompts for the question answering pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerPrompts {
    /// Per-chunk prompt. Variables: `{{chunk}}`, `{{question}}`, `{{sentinel}}`.
    pub chunk: String,
    /// Merge prompt. Variables: `{{question}}`, `{{answers}}`.
    pub merge: String,
    /// Reply used when no chunk held relevant information.
    pub not_found: String,
}

impl Default for AnswerPrompts {
    fn default() -> Self {
        Self {
            chunk: "Find the answer to the following question within this video transcript excerpt:

{{chunk}}

Question: {{question}}

Answer concisely. If the answer is not present in this excerpt, output '{{sentinel}}'."
                .to_string(),

            merge: "Create a clear and concise answer by combining these relevant pieces of information about the question: {{question}}

{{answers}}"
                .to_string(),

            not_found: "I couldn't find relevant information to answer your question in the video transcript."
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let answer_path = custom_path.join("answer.toml");
            if answer_path.exists() {
                let content = std::fs::read_to_string(&answer_path)?;
                prompts.answer = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// The template is scanned once, so substituted values are inserted
    /// as-is even when they contain `{{...}}` themselves. Placeholders with
    /// no matching variable are left untouched.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.summary.chunk.contains("{{chunk}}"));
        assert!(prompts.summary.merge.contains("{{sections}}"));
        assert!(prompts.answer.chunk.contains("{{sentinel}}"));
        assert!(prompts.answer.merge.contains("{{question}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_does_not_expand_substituted_values() {
        let mut vars = HashMap::new();
        vars.insert("chunk".to_string(), "write {{question}} or {{chunk}} here".to_string());
        vars.insert("question".to_string(), "What is taught?".to_string());

        for _ in 0..32 {
            let rendered = Prompts::render("{{chunk}} | {{question}}", &vars);
            assert_eq!(rendered, "write {{question}} or {{chunk}} here | What is taught?");
        }
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let vars = HashMap::from([("name".to_string(), "Alice".to_string())]);
        let rendered = Prompts::render("{{name}} {{missing}} {{ spaced }}", &vars);
        assert_eq!(rendered, "Alice {{missing}} {{ spaced }}");
    }

    #[test]
    fn test_config_variables_in_values_stay_literal() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("tone".to_string(), "formal".to_string());

        let vars = HashMap::from([("chunk".to_string(), "{{tone}} is a word".to_string())]);
        let rendered = prompts.render_with_custom("{{tone}}: {{chunk}}", &vars);
        assert_eq!(rendered, "formal: {{tone}} is a word");
    }

    #[test]
    fn test_call_variables_override_config_variables() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("tone".to_string(), "formal".to_string());
        prompts.variables.insert("chunk".to_string(), "ignored".to_string());

        let mut vars = HashMap::new();
        vars.insert("chunk".to_string(), "the text".to_string());

        let rendered = prompts.render_with_custom("{{tone}}: {{chunk}}", &vars);
        assert_eq!(rendered, "formal: the text");
    }

    #[test]
    fn test_custom_dir_overrides_summary_prompts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("summary.toml"),
            "chunk = \"Short summary: {{chunk}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.summary.chunk, "Short summary: {{chunk}}");
        // Unset fields fall back to defaults.
        assert!(prompts.summary.merge.contains("{{sections}}"));
        assert!(prompts.answer.chunk.contains("{{question}}"));
    }
}
