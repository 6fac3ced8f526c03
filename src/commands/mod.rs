//! # Command Implementations
//!
//! Each submodule handles one CLI command (scan, delete, undo, etc.).

pub mod backups;
pub mod delete;
pub mod layers;
pub mod scan;
pub mod settings;
pub mod summary;
pub mod undo;
