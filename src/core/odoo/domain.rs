//! Search domains in Odoo's polish-notation list form.

use serde_json::Value as Json;

/// An AND-combined list of `[field, operator, value]` terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain {
    terms: Vec<Json>,
}

impl Domain {
    /// Create an empty domain (matches every record).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term, builder style.
    pub fn term(mut self, field: &str, operator: &str, value: impl Into<Json>) -> Self {
        self.push(field, operator, value);
        self
    }

    /// Append a term in place.
    pub fn push(&mut self, field: &str, operator: &str, value: impl Into<Json>) {
        self.terms
            .push(Json::Array(vec![field.into(), operator.into(), value.into()]));
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The domain as a JSON array, ready to be sent as an argument.
    pub fn to_json(&self) -> Json {
        Json::Array(self.terms.clone())
    }
}
