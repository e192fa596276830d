//! Application services

pub mod editor;
pub mod exchange;
