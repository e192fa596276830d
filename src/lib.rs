//! assetree: entity hierarchy manager
//!
//! Owns a small entity hierarchy as a two-kind graph (containment "HAS"
//! edges, lateral "LINK" edges): import a three-sheet workbook, render
//! the entities as a tree, edit an entity's JSON attribute payload,
//! cascade-delete a subtree, and re-export the hierarchy stamped with a
//! single INSERT/DELETE action tag.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
