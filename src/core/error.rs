//! Errors callers need to tell apart

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
	/// The project has no asset container directory. Aborts the whole scan.
	#[error("sprites folder not found in project: {0}")]
	MissingContainer(PathBuf),
}
