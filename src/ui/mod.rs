//! # User Interface
//!
//! Colored terminal output with clickable file links.

pub mod log;
pub mod prompt;

pub use log::{debug, emit, error, format_size, header, info, path_link, progress, success, warn, Log};
pub use prompt::confirm;
