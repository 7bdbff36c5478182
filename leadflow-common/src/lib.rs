//! Shared infrastructure for the Leadflow services
//!
//! Holds the lead data model, the country display-name table, database
//! initialization, configuration resolution, and the common error type.

pub mod config;
pub mod countries;
pub mod db;
pub mod error;

pub use error::{Error, Result};
