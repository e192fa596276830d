//! Workbook exchange: file to store and back.

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{ExportAction, HierarchyStore};
use crate::infrastructure::workbook;

/// Read a workbook file and load it into a fresh store.
#[instrument(level = "debug")]
pub fn import(path: &Path) -> ApplicationResult<HierarchyStore> {
    let rows = workbook::read(path)?;
    let store = HierarchyStore::load(&rows);
    debug!(
        entities = store.len(),
        types = rows.types.len(),
        "imported workbook"
    );
    Ok(store)
}

/// Serialize the store and write it as a workbook file.
///
/// Exporting an empty hierarchy is rejected here; the store itself does
/// not forbid serializing an empty map.
#[instrument(level = "debug", skip(store))]
pub fn export(
    store: &HierarchyStore,
    path: &Path,
    action: ExportAction,
    pretty: bool,
) -> ApplicationResult<()> {
    if store.is_empty() {
        return Err(ApplicationError::EmptyHierarchy);
    }
    let rows = store.serialize(action);
    workbook::write(path, &rows, pretty)?;
    Ok(())
}
