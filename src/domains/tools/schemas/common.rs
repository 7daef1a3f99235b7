//! Generic method call input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Constraint, Validate, ValidationError};

/// Arguments forwarded verbatim to `execute_kw`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExecuteMethodInput {
    /// Model name, e.g. 'res.partner'
    pub model: String,

    /// Method name, e.g. 'search_read'
    pub method: String,

    /// Positional arguments
    #[serde(default)]
    pub args: Vec<serde_json::Value>,

    /// Keyword arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kwargs: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Validate for ExecuteMethodInput {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::single("model", Constraint::Invalid, "model must not be empty"));
        }
        if self.method.trim().is_empty() {
            return Err(ValidationError::single("method", Constraint::Invalid, "method must not be empty"));
        }
        Ok(())
    }
}
