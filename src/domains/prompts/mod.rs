//! Prompts domain module.
//!
//! Prompts are static guidance templates, one per business area, that steer
//! a model towards the right Odoo tools for an analysis.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual prompt definitions (one file per prompt)
//! - `registry.rs` - Central prompt registration
//! - `service.rs` - Prompt service for listing and rendering
//! - `templates.rs` - Template rendering engine

pub mod definitions;
mod error;
mod registry;
mod service;
pub mod templates;

pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use registry::{prompt_names, register_all_prompts};
pub use service::PromptService;
pub use templates::PromptTemplate;
