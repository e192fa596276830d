//! Tests for the workbook container and the exchange services

use std::fs;
use std::path::Path;

use assetree::application::services::exchange;
use assetree::application::ApplicationError;
use assetree::domain::{ExportAction, HierarchyStore};
use assetree::infrastructure::workbook;
use assetree::infrastructure::WorkbookError;

const FIXTURE: &str = "tests/resources/plant.json";

// ============================================================
// Reading Tests
// ============================================================

#[test]
fn given_fixture_workbook_when_reading_then_headers_skipped() {
    let rows = workbook::read(Path::new(FIXTURE)).unwrap();

    assert_eq!(rows.types.len(), 3);
    assert_eq!(rows.entities.len(), 4);
    assert_eq!(rows.relationships.len(), 3);
    assert_eq!(rows.types[0].type_key, "Site");
}

#[test]
fn given_numeric_cell_when_reading_then_stringified() {
    let rows = workbook::read(Path::new(FIXTURE)).unwrap();

    let unit = rows.entities.iter().find(|e| e.id == "UNIT-1").unwrap();
    assert_eq!(unit.source, "2024");
}

#[test]
fn given_short_relationship_row_when_reading_then_missing_cells_empty() {
    let rows = workbook::read(Path::new(FIXTURE)).unwrap();

    let short = rows
        .relationships
        .iter()
        .find(|r| r.parent_id == "UNIT-1")
        .unwrap();
    assert_eq!(short.kind, "HAS");
    assert_eq!(short.action, "");
}

#[test]
fn given_headerless_workbook_when_reading_then_first_row_is_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.json");
    fs::write(
        &path,
        r#"{
            "EntityTypes": [["Pump", "flow"]],
            "Entities": [["P-1", "Feed Pump", "Pump", "erp", "{}", "INSERT"]],
            "Relationships": []
        }"#,
    )
    .unwrap();

    let rows = workbook::read(&path).unwrap();

    assert_eq!(rows.types.len(), 1);
    assert_eq!(rows.entities.len(), 1);
    assert_eq!(rows.entities[0].id, "P-1");
}

#[test]
fn given_missing_sheet_when_reading_then_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"EntityTypes": [], "Entities": []}"#).unwrap();

    let result = workbook::read(&path);

    assert!(matches!(result, Err(WorkbookError::Parse { .. })));
}

#[test]
fn given_missing_file_when_reading_then_read_error() {
    let result = workbook::read(Path::new("tests/resources/no-such.json"));

    assert!(matches!(result, Err(WorkbookError::Read { .. })));
}

// ============================================================
// Writing Tests
// ============================================================

#[test]
fn given_rows_when_writing_and_reading_back_then_identical() {
    let rows = workbook::read(Path::new(FIXTURE)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.json");

    workbook::write(&path, &rows, true).unwrap();
    let back = workbook::read(&path).unwrap();

    assert_eq!(back, rows);
}

#[test]
fn given_rows_when_writing_then_headers_present() {
    let rows = workbook::read(Path::new(FIXTURE)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");

    workbook::write(&path, &rows, false).unwrap();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["EntityTypes"][0][0], "Type");
    assert_eq!(doc["Entities"][0][0], "ID");
    assert_eq!(doc["Relationships"][0], serde_json::json!(["ParentID", "ChildID", "Type", "Action"]));
}

// ============================================================
// Exchange Tests
// ============================================================

#[test]
fn given_fixture_when_importing_then_tolerance_policy_applied() {
    let store = exchange::import(Path::new(FIXTURE)).unwrap();

    // GHOST-1 cites the unregistered "Turbine" type, SENS-9 does not
    // exist: both rows are dropped without error.
    assert_eq!(store.len(), 3);
    assert!(!store.contains("GHOST-1"));
    assert!(store.get("PUMP-1").unwrap().links.is_empty());
}

#[test]
fn given_store_when_exporting_then_action_tag_uniform() {
    let store = exchange::import(Path::new(FIXTURE)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");

    exchange::export(&store, &path, ExportAction::Delete, true).unwrap();

    let rows = workbook::read(&path).unwrap();
    assert!(rows.entities.iter().all(|r| r.action == "DELETE"));
    assert!(rows.relationships.iter().all(|r| r.action == "DELETE"));
}

#[test]
fn given_empty_store_when_exporting_then_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.json");

    let result = exchange::export(
        &HierarchyStore::new(),
        &path,
        ExportAction::Insert,
        true,
    );

    assert!(matches!(result, Err(ApplicationError::EmptyHierarchy)));
    assert!(!path.exists());
}
