//! Prompt service implementation.
//!
//! The PromptService holds the registered templates and renders them on
//! request. Prompts are defined in `definitions/` and registered via
//! `registry.rs`.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use super::error::PromptError;
use super::templates::PromptTemplate;
use crate::core::config::PromptsConfig;

/// Service for listing and rendering prompts.
pub struct PromptService {
    #[allow(dead_code)]
    config: PromptsConfig,

    /// Key: prompt name, Value: prompt template
    prompts: BTreeMap<String, PromptTemplate>,
}

impl PromptService {
    /// Create an empty PromptService.
    pub fn new(config: PromptsConfig) -> Self {
        Self {
            config,
            prompts: BTreeMap::new(),
        }
    }

    /// Register a prompt template; names must be unique.
    pub fn register_prompt(&mut self, template: PromptTemplate) -> Result<(), PromptError> {
        if self.prompts.contains_key(&template.name) {
            return Err(PromptError::AlreadyRegistered(template.name));
        }
        info!("Registering prompt: {}", template.name);
        self.prompts.insert(template.name.clone(), template);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .values()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .get(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();

        for arg in &template.arguments {
            if arg.required.unwrap_or(false) && !arguments.contains_key(&arg.name) {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        debug!(prompt = name, "Rendering prompt");
        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}
