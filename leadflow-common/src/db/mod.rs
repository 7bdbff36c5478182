//! Database layer: connection initialization and models

pub mod init;
pub mod models;

pub use init::{create_schema, init_database};
