//! JSON workbook container: three named sheets of string rows.
//!
//! The on-disk format mirrors the classic three-sheet layout without
//! the binary spreadsheet container: one JSON object whose keys are the
//! sheet names and whose values are arrays of rows (arrays of cells).
//! Header rows are always written on export and skipped on import when
//! present; short rows are padded with empty cells, extra cells and the
//! advisory input `Action` column are carried but not interpreted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::instrument;

use crate::domain::{EntityRow, RelationshipRow, SheetRows, TypeRow};

pub const SHEET_TYPES: &str = "EntityTypes";
pub const SHEET_ENTITIES: &str = "Entities";
pub const SHEET_RELATIONSHIPS: &str = "Relationships";

pub const TYPES_HEADER: [&str; 2] = ["Type", "Attributes"];
pub const ENTITIES_HEADER: [&str; 6] = ["ID", "Name", "EntityType", "Source", "Attributes", "Action"];
pub const RELATIONSHIPS_HEADER: [&str; 4] = ["ParentID", "ChildID", "Type", "Action"];

#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("cannot read workbook {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write workbook {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid workbook {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type WorkbookResult<T> = Result<T, WorkbookError>;

/// Raw on-disk shape. Cells are arbitrary JSON scalars on input
/// (numeric cells from spreadsheet exports are common) and normalized
/// to strings while converting to rows.
#[derive(Debug, Deserialize)]
struct WorkbookFile {
    #[serde(rename = "EntityTypes")]
    entity_types: Vec<Vec<Value>>,
    #[serde(rename = "Entities")]
    entities: Vec<Vec<Value>>,
    #[serde(rename = "Relationships")]
    relationships: Vec<Vec<Value>>,
}

/// Read a workbook file into the three row groups.
#[instrument(level = "debug")]
pub fn read(path: &Path) -> WorkbookResult<SheetRows> {
    let content = fs::read_to_string(path).map_err(|source| WorkbookError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: WorkbookFile =
        serde_json::from_str(&content).map_err(|source| WorkbookError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let types = skip_header(&file.entity_types, TYPES_HEADER[0])
        .iter()
        .map(|row| TypeRow {
            type_key: cell(row, 0),
            attribute_schema: cell(row, 1),
        })
        .collect();

    let entities = skip_header(&file.entities, ENTITIES_HEADER[0])
        .iter()
        .map(|row| EntityRow {
            id: cell(row, 0),
            name: cell(row, 1),
            type_key: cell(row, 2),
            source: cell(row, 3),
            attributes: cell(row, 4),
            action: cell(row, 5),
        })
        .collect();

    let relationships = skip_header(&file.relationships, RELATIONSHIPS_HEADER[0])
        .iter()
        .map(|row| RelationshipRow {
            parent_id: cell(row, 0),
            child_id: cell(row, 1),
            kind: cell(row, 2),
            action: cell(row, 3),
        })
        .collect();

    Ok(SheetRows {
        types,
        entities,
        relationships,
    })
}

/// Write the three row groups as a workbook file, headers included.
#[instrument(level = "debug", skip(rows))]
pub fn write(path: &Path, rows: &SheetRows, pretty: bool) -> WorkbookResult<()> {
    let mut types_sheet: Vec<Vec<String>> = vec![header_row(&TYPES_HEADER)];
    types_sheet.extend(rows.types.iter().map(|r| {
        vec![r.type_key.clone(), r.attribute_schema.clone()]
    }));

    let mut entities_sheet: Vec<Vec<String>> = vec![header_row(&ENTITIES_HEADER)];
    entities_sheet.extend(rows.entities.iter().map(|r| {
        vec![
            r.id.clone(),
            r.name.clone(),
            r.type_key.clone(),
            r.source.clone(),
            r.attributes.clone(),
            r.action.clone(),
        ]
    }));

    let mut relationships_sheet: Vec<Vec<String>> = vec![header_row(&RELATIONSHIPS_HEADER)];
    relationships_sheet.extend(rows.relationships.iter().map(|r| {
        vec![
            r.parent_id.clone(),
            r.child_id.clone(),
            r.kind.clone(),
            r.action.clone(),
        ]
    }));

    let doc = json!({
        SHEET_TYPES: types_sheet,
        SHEET_ENTITIES: entities_sheet,
        SHEET_RELATIONSHIPS: relationships_sheet,
    });
    let content = if pretty {
        serde_json::to_string_pretty(&doc).map_err(|source| WorkbookError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        doc.to_string()
    };

    fs::write(path, content).map_err(|source| WorkbookError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Skip a leading header row, recognized by its first cell.
fn skip_header<'a>(rows: &'a [Vec<Value>], first_header: &str) -> &'a [Vec<Value>] {
    match rows.first().and_then(|r| r.first()) {
        Some(Value::String(s)) if s == first_header => &rows[1..],
        _ => rows,
    }
}

/// Cell by position, missing/null cells as empty strings, non-string
/// scalars stringified.
fn cell(row: &[Value], idx: usize) -> String {
    match row.get(idx) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn header_row(header: &[&str]) -> Vec<String> {
    header.iter().map(|h| h.to_string()).collect()
}
