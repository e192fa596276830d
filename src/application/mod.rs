//! Application layer: services and application errors

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
