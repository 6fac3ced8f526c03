//! Core domain types

pub mod error;
pub mod event;
pub mod hash;
pub mod media;

use serde::Serialize;
use std::path::PathBuf;

pub use error::ScanError;
pub use event::{Level, LogFn, ProgressFn};
pub use hash::FileHash;
pub use media::is_image;

/// One image file found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetRecord {
	pub name: String,
	pub path: PathBuf,
	pub size: u64,
	pub used: bool,
}

/// A nested grouping directory under `<folder>/layers/`.
///
/// Referenced sub-collections are reported with an empty `images` list since
/// they are never walked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubCollection {
	pub name: String,
	pub path: PathBuf,
	pub orphaned: bool,
	pub images: Vec<AssetRecord>,
}

impl SubCollection {
	pub fn total_size(&self) -> u64 {
		self.images.iter().map(|i| i.size).sum()
	}
}

/// Duplicate candidates share an asset folder and a byte size.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DuplicateKey {
	pub folder: String,
	pub size: u64,
}
