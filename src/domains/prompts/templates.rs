//! Prompt templates.
//!
//! Templates use `{{variable}}` substitution and
//! `{{#if variable}}...{{else}}...{{/if}}` blocks. Blocks do not nest.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

const IF_OPEN: &str = "{{#if ";
const ELSE: &str = "{{else}}";
const END_IF: &str = "{{/if}}";

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template text.
    pub template: String,
}

impl PromptTemplate {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Render the template with the given arguments.
    ///
    /// Conditionals are resolved first; an argument counts as set when it is
    /// present and non-empty. Placeholders left without a value are removed.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut result = resolve_conditionals(&self.template, arguments)?;

        for (key, value) in arguments {
            let placeholder = format!("{{{{{}}}}}", key);
            result = result.replace(&placeholder, value);
        }

        Ok(strip_placeholders(&result))
    }
}

fn resolve_conditionals(
    template: &str,
    arguments: &HashMap<String, String>,
) -> Result<String, PromptError> {
    let mut result = template.to_string();

    while let Some(if_start) = result.find(IF_OPEN) {
        let var_end = result[if_start..]
            .find("}}")
            .map(|pos| if_start + pos)
            .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?;
        let var_name = result[if_start + IF_OPEN.len()..var_end].trim();

        let endif_pos = result[var_end..]
            .find(END_IF)
            .map(|pos| var_end + pos)
            .ok_or_else(|| PromptError::template(format!("Missing {{{{/if}}}} for '{var_name}'")))?;

        let block = &result[var_end + 2..endif_pos];
        let (when_set, otherwise) = match block.find(ELSE) {
            Some(else_pos) => (&block[..else_pos], &block[else_pos + ELSE.len()..]),
            None => (block, ""),
        };

        let is_set = arguments.get(var_name).is_some_and(|v| !v.is_empty());
        let replacement = if is_set { when_set } else { otherwise };

        result = format!(
            "{}{}{}",
            &result[..if_start],
            replacement,
            &result[endif_pos + END_IF.len()..]
        );
    }

    Ok(result)
}

fn strip_placeholders(text: &str) -> String {
    let mut result = text.to_string();
    let mut start = 0;

    while let Some(pos) = result[start..].find("{{") {
        let abs_pos = start + pos;
        match result[abs_pos..].find("}}") {
            Some(end) if !result[abs_pos..abs_pos + end].contains(['#', '/']) => {
                result.replace_range(abs_pos..abs_pos + end + 2, "");
            }
            _ => start = abs_pos + 2,
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, args: &[(&str, &str)]) -> Result<String, PromptError> {
        let args = args
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PromptTemplate::new("test", None, vec![], template).render(&args)
    }

    #[test]
    fn test_simple_substitution() {
        assert_eq!(render("Sales for {{period}}.", &[("period", "Q1")]).unwrap(), "Sales for Q1.");
    }

    #[test]
    fn test_else_branch_when_missing_or_empty() {
        let template = "Last {{#if period}}{{period}}{{else}}month{{/if}}";
        assert_eq!(render(template, &[]).unwrap(), "Last month");
        assert_eq!(render(template, &[("period", "")]).unwrap(), "Last month");
        assert_eq!(render(template, &[("period", "year")]).unwrap(), "Last year");
    }

    #[test]
    fn test_several_blocks() {
        let template = "{{#if a}}A{{/if}}-{{#if b}}B{{else}}b{{/if}}";
        assert_eq!(render(template, &[("a", "1")]).unwrap(), "A-b");
    }

    #[test]
    fn test_unmatched_placeholder_removed() {
        assert_eq!(render("Hello {{name}}!", &[]).unwrap(), "Hello !");
    }

    #[test]
    fn test_missing_end_if() {
        let err = render("{{#if period}}open", &[]).unwrap_err();
        assert!(matches!(err, PromptError::TemplateError(_)));
    }
}
