//! Restoring the most recent trash session

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{MANIFEST_FILE, SESSION_PREFIX};
use crate::core::{Level, LogFn};

use super::move_path;
use super::session::Manifest;

/// Session folders under `trash_root`, newest first.
pub fn list_sessions(trash_root: &Path) -> Result<Vec<PathBuf>> {
	let entries = match fs::read_dir(trash_root) {
		Ok(entries) => entries,
		Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
		Err(e) => return Err(e).with_context(|| format!("Failed to list {}", trash_root.display())),
	};

	let mut sessions: Vec<(String, PathBuf)> = entries
		.filter_map(|e| e.ok())
		.filter(|e| e.path().is_dir())
		.filter_map(|e| Some((e.file_name().to_str()?.to_string(), e.path())))
		.filter(|(name, _)| name.starts_with(SESSION_PREFIX))
		.collect();

	sessions.sort_by(|a, b| b.0.cmp(&a.0));
	Ok(sessions.into_iter().map(|(_, path)| path).collect())
}

/// Put back everything from the latest session. Returns false if there was none.
///
/// Entries go back to the original path recorded in the session manifest.
/// Sessions without a readable manifest are restored flat into
/// `fallback_dir` by name. Nothing is overwritten: an entry whose
/// destination already exists stays in the session, and so does the session.
pub fn undo_last(trash_root: &Path, fallback_dir: &Path, log: LogFn) -> Result<bool> {
	let Some(session_dir) = list_sessions(trash_root)?.into_iter().next() else {
		return Ok(false);
	};

	let manifest = match Manifest::load(&session_dir) {
		Ok(manifest) => Some(manifest),
		Err(e) => {
			log(&format!("Restoring by name into {}: {:#}", fallback_dir.display(), e), Level::Warn);
			None
		}
	};

	let mut names: Vec<OsString> = fs::read_dir(&session_dir)
		.with_context(|| format!("Failed to list {}", session_dir.display()))?
		.filter_map(|e| e.ok())
		.map(|e| e.file_name())
		.filter(|name| name != MANIFEST_FILE)
		.collect();
	names.sort();

	let mut left_behind = 0;
	for name in names {
		let source = session_dir.join(&name);
		let destination = manifest
			.as_ref()
			.zip(name.to_str())
			.and_then(|(m, stored)| m.original_of(stored))
			.map(Path::to_path_buf)
			.unwrap_or_else(|| fallback_dir.join(&name));

		if let Err(e) = restore_one(&source, &destination) {
			log(&format!("Failed to restore {}: {}", destination.display(), e), Level::Error);
			left_behind += 1;
			continue;
		}
		log(&format!("Restored {}", destination.display()), Level::Info);
	}

	if left_behind == 0 {
		if let Err(e) = fs::remove_dir_all(&session_dir) {
			log(&format!("Failed to remove {}: {}", session_dir.display(), e), Level::Warn);
		}
	} else {
		log(
			&format!("{} entries left in {}", left_behind, session_dir.display()),
			Level::Warn,
		);
	}

	Ok(true)
}

fn restore_one(source: &Path, destination: &Path) -> io::Result<()> {
	if fs::symlink_metadata(destination).is_ok() {
		return Err(io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"));
	}
	if let Some(parent) = destination.parent() {
		fs::create_dir_all(parent)?;
	}
	move_path(source, destination)
}
