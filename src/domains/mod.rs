//! Domains module containing business logic organized by bounded contexts.
//!
//! Prompts, resources and tools each live in their own subdomain;
//! `extensions` registers all three at startup.

pub mod extensions;
pub mod prompts;
pub mod resources;
pub mod tools;

pub use extensions::{Extensions, register_all_extensions};
