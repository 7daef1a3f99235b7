//! Tools domain module.
//!
//! Tools are the Odoo operations MCP clients can call: searches, record
//! creation and business analyses, plus a generic `execute_method` escape
//! hatch.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, grouped by business area
//! - `schemas/` - Typed, validated input records
//! - `registry.rs` - Central tool registry and dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add the input record to `schemas/` and implement `Validate` for it
//! 2. Create a unit struct implementing [`OdooTool`] in `definitions/`
//! 3. Register it in its area's `register` function
//!
//! The router and the HTTP dispatcher pick it up from the registry.

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod schemas;

pub use error::ToolError;
pub use handlers::{OdooTool, ToolFailure, ToolOutput};
pub use registry::ToolRegistry;
pub use router::build_tool_router;
