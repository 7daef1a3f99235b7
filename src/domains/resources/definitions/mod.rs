//! Resource definitions module.
//!
//! Each resource is defined in its own file with its URI, metadata and
//! content provider.
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

mod accounting_docs;
mod inventory_docs;
mod purchase_docs;
mod sales_docs;
mod server_info;

pub use accounting_docs::AccountingDocsResource;
pub use inventory_docs::InventoryDocsResource;
pub use purchase_docs::PurchaseDocsResource;
pub use sales_docs::SalesDocsResource;
pub use server_info::{ServerInfo, ServerInfoResource};

use super::service::ResourceContent;

/// Trait for resource definitions.
pub trait ResourceDefinition {
    /// The unique URI of the resource.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Get the content for this resource.
    fn content() -> ResourceContent;
}
