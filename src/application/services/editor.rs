//! Attribute editing with caller-side JSON validation.
//!
//! The store accepts any string as an attribute payload; the contract
//! that payloads must parse as JSON is enforced here, at the editing
//! boundary, so the store stays "opaque string in, opaque string out".

use tracing::instrument;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::HierarchyStore;

pub struct AttributeEditor;

impl AttributeEditor {
    /// Validate `raw` as JSON and apply it to the node's attributes.
    ///
    /// On invalid JSON or an unknown id the store is left untouched.
    #[instrument(level = "debug", skip(store, raw))]
    pub fn apply(store: &mut HierarchyStore, id: &str, raw: &str) -> ApplicationResult<()> {
        if !store.contains(id) {
            return Err(ApplicationError::NodeNotFound(id.to_string()));
        }
        serde_json::from_str::<serde_json::Value>(raw).map_err(|source| {
            ApplicationError::InvalidJson {
                id: id.to_string(),
                source,
            }
        })?;
        store.set_attributes(id, raw.to_string());
        Ok(())
    }
}
