//! Project root and master `.yyp` discovery

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ASSET_CONTAINER, MASTER_SPRITE_PATTERN, PROJECT_EXT};
use crate::core::{Level, LogFn, ScanError};

#[derive(Debug, Clone)]
pub struct Project {
	pub root: PathBuf,
	pub name: String,
	pub master: Option<PathBuf>,
}

impl Project {
	/// Open a project from its directory or from its `.yyp` file.
	pub fn open(path: &Path) -> Self {
		let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

		let (root, master) = if path.is_file() {
			let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
			(root, Some(path))
		} else {
			let master = find_master(&path);
			(path, master)
		};

		let name = master
			.as_deref()
			.and_then(Path::file_stem)
			.or_else(|| root.file_name())
			.map(|n| n.to_string_lossy().into_owned())
			.unwrap_or_else(|| "project".to_string());

		Self { root, name, master }
	}

	pub fn container(&self) -> PathBuf {
		self.root.join(ASSET_CONTAINER)
	}
}

/// First `*.yyp` directly under the project root, by file name.
pub fn find_master(root: &Path) -> Option<PathBuf> {
	let entries = fs::read_dir(root).ok()?;
	let mut candidates: Vec<PathBuf> = entries
		.filter_map(|e| e.ok())
		.map(|e| e.path())
		.filter(|p| p.is_file())
		.filter(|p| {
			p.extension()
				.and_then(|e| e.to_str())
				.is_some_and(|e| e == PROJECT_EXT)
		})
		.collect();
	candidates.sort();
	candidates.into_iter().next()
}

/// Sprite folder names referenced by the master file.
pub fn master_sprite_folders(master: &Path) -> Result<BTreeSet<String>> {
	let content = fs::read_to_string(master)
		.with_context(|| format!("Failed to read {}", master.display()))?;

	Ok(content
		.lines()
		.filter_map(|line| line.split_once(MASTER_SPRITE_PATTERN))
		.filter_map(|(_, rest)| rest.split('/').next())
		.filter(|name| !name.is_empty())
		.map(str::to_string)
		.collect())
}

/// Asset container path, or the one scan-fatal error.
pub fn require_container(root: &Path) -> Result<PathBuf> {
	let container = root.join(ASSET_CONTAINER);
	if !container.is_dir() {
		return Err(ScanError::MissingContainer(container).into());
	}
	Ok(container)
}

/// Immediate subdirectories of the container, sorted by name (case-sensitive).
pub fn asset_folders(container: &Path, only: Option<&BTreeSet<String>>, log: LogFn) -> Vec<(String, PathBuf)> {
	let entries = match fs::read_dir(container) {
		Ok(entries) => entries,
		Err(e) => {
			log(&format!("Failed to list {}: {}", container.display(), e), Level::Error);
			return Vec::new();
		}
	};

	let mut folders: Vec<(String, PathBuf)> = entries
		.filter_map(|e| e.ok())
		.filter(|e| e.path().is_dir())
		.filter_map(|e| {
			let name = e.file_name().to_str()?.to_string();
			Some((name, e.path()))
		})
		.filter(|(name, _)| only.map_or(true, |set| set.contains(name)))
		.collect();

	folders.sort_by(|a, b| a.0.cmp(&b.0));
	folders
}
