//! Infrastructure layer: file I/O

pub mod workbook;

pub use workbook::{WorkbookError, WorkbookResult};
