//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `register_all_resources()`

use rmcp::model::{AnnotateAble, RawResource};

use super::definitions::{
    AccountingDocsResource, InventoryDocsResource, PurchaseDocsResource, ResourceDefinition,
    SalesDocsResource, ServerInfoResource,
};
use super::error::ResourceError;
use super::service::{ResourceEntry, ResourceService};

/// Build a resource entry from a definition.
fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

/// Register every resource, stopping at the first duplicate.
pub fn register_all_resources(service: &mut ResourceService) -> Result<(), ResourceError> {
    service.register_resource(build_resource::<ServerInfoResource>())?;
    service.register_resource(build_resource::<SalesDocsResource>())?;
    service.register_resource(build_resource::<PurchaseDocsResource>())?;
    service.register_resource(build_resource::<InventoryDocsResource>())?;
    service.register_resource(build_resource::<AccountingDocsResource>())?;
    Ok(())
}

/// Get the list of all resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![
        ServerInfoResource::URI,
        SalesDocsResource::URI,
        PurchaseDocsResource::URI,
        InventoryDocsResource::URI,
        AccountingDocsResource::URI,
    ]
}
