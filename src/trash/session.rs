//! Moving files into a trash session

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{MANIFEST_FILE, SESSION_PREFIX, SESSION_STAMP_FORMAT};
use crate::core::{Level, LogFn};

use super::backup::{self, Archive};
use super::move_path;

const MAX_SESSIONS_PER_SECOND: u32 = 999;

#[derive(Debug, Clone)]
pub struct BackupOptions {
	pub dir: PathBuf,
	pub max_kept: usize,
}

#[derive(Debug, Clone)]
pub struct TrashOptions<'a> {
	pub trash_root: &'a Path,
	pub project_name: &'a str,
	pub backup: Option<BackupOptions>,
}

/// One moved top-level entry: where it sits in the session, where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
	pub stored: String,
	pub original: PathBuf,
	pub is_dir: bool,
}

/// `session.json`, written next to the moved entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
	pub session: String,
	pub project: String,
	pub created: DateTime<Local>,
	pub entries: Vec<ManifestEntry>,
}

impl Manifest {
	pub fn load(session_dir: &Path) -> Result<Self> {
		let path = session_dir.join(MANIFEST_FILE);
		let content = fs::read_to_string(&path)
			.with_context(|| format!("Failed to read {}", path.display()))?;
		serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
	}

	fn save(&self, session_dir: &Path) -> Result<()> {
		let json = serde_json::to_string_pretty(self).context("Failed to serialize session manifest")?;
		fs::write(session_dir.join(MANIFEST_FILE), json).context("Failed to write session manifest")
	}

	pub fn original_of(&self, stored: &str) -> Option<&Path> {
		self.entries
			.iter()
			.find(|e| e.stored == stored)
			.map(|e| e.original.as_path())
	}
}

#[derive(Debug, Clone)]
pub struct TrashSession {
	/// `delete_<YYYYMMDD_HHMMSS>` plus `_NNN` when that second was taken
	pub id: String,
	pub dir: PathBuf,
	pub moved: Vec<PathBuf>,
}

impl TrashSession {
	/// Timestamp part of the id, shared with the backup archive name.
	pub fn stamp(&self) -> &str {
		self.id.strip_prefix(SESSION_PREFIX).unwrap_or(&self.id)
	}
}

#[derive(Debug, Clone)]
pub struct TrashOutcome {
	pub session: TrashSession,
	/// Input paths that were actually moved, in input order
	pub deleted: Vec<PathBuf>,
	pub archive: Option<PathBuf>,
}

/// Move `paths` into a fresh trash session, optionally zipping them too.
///
/// Each path is handled on its own: a failure is logged and the path is left
/// out of [`TrashOutcome::deleted`], which is the only record of what moved.
/// Directories left empty by the move are pruned afterwards.
pub fn move_to_trash(paths: &[PathBuf], options: &TrashOptions, log: LogFn) -> Result<TrashOutcome> {
	let trash_root = options.trash_root;
	fs::create_dir_all(trash_root)
		.with_context(|| format!("Failed to create trash folder {}", trash_root.display()))?;

	let created = Local::now();
	let mut session = create_session(trash_root, created)?;

	let mut archive = match &options.backup {
		Some(backup) => match Archive::create(&backup.dir, options.project_name, session.stamp()) {
			Ok(archive) => Some(archive),
			Err(e) => {
				log(&format!("Backup disabled for this delete: {:#}", e), Level::Warn);
				None
			}
		},
		None => None,
	};

	let mut taken = HashSet::new();
	let mut entries = Vec::new();

	for path in paths {
		let Some(stored) = stored_name(path, &mut taken) else {
			log(&format!("Failed to delete: {} (no file name)", path.display()), Level::Error);
			continue;
		};
		let target = session.dir.join(&stored);

		let is_dir = match trash_one(path, &target) {
			Ok(is_dir) => is_dir,
			Err(e) => {
				taken.remove(&stored);
				log(&format!("Failed to delete: {} ({})", path.display(), e), Level::Error);
				continue;
			}
		};

		if let Some(archive) = archive.as_mut() {
			let written = if is_dir {
				archive.add_tree(&target, &session.dir)
			} else {
				archive.add_file(&target, Path::new(&stored))
			};
			if let Err(e) = written {
				log(&format!("Backup incomplete for {}: {:#}", path.display(), e), Level::Warn);
			}
		}

		log(&format!("Moved {} to trash", path.display()), Level::Info);
		entries.push(ManifestEntry { stored, original: path.clone(), is_dir });
		session.moved.push(path.clone());
	}

	let archive = match archive {
		Some(archive) => finish_backup(archive, options, log),
		None => None,
	};

	if entries.is_empty() {
		let _ = fs::remove_dir_all(&session.dir);
	} else {
		let manifest = Manifest {
			session: session.id.clone(),
			project: options.project_name.to_string(),
			created,
			entries,
		};
		if let Err(e) = manifest.save(&session.dir) {
			log(&format!("Undo will restore by name only: {:#}", e), Level::Warn);
		}
	}

	for path in paths {
		prune_empty_parents(path, trash_root);
	}

	Ok(TrashOutcome {
		deleted: session.moved.clone(),
		session,
		archive,
	})
}

fn create_session(trash_root: &Path, now: DateTime<Local>) -> Result<TrashSession> {
	let stamp = now.format(SESSION_STAMP_FORMAT).to_string();

	for n in 0..=MAX_SESSIONS_PER_SECOND {
		let id = if n == 0 {
			format!("{}{}", SESSION_PREFIX, stamp)
		} else {
			format!("{}{}_{:03}", SESSION_PREFIX, stamp, n)
		};
		let dir = trash_root.join(&id);
		match fs::create_dir(&dir) {
			Ok(()) => return Ok(TrashSession { id, dir, moved: Vec::new() }),
			Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
			Err(e) => {
				return Err(e).with_context(|| format!("Failed to create session folder {}", dir.display()));
			}
		}
	}

	anyhow::bail!("Too many trash sessions created at {}", stamp)
}

/// Base name, prefixed with a counter when the session already holds one.
fn stored_name(path: &Path, taken: &mut HashSet<String>) -> Option<String> {
	let base = path.file_name()?.to_string_lossy().into_owned();
	if base == MANIFEST_FILE || taken.contains(&base) {
		let name = (1..)
			.map(|n| format!("{}_{}", n, base))
			.find(|candidate| !taken.contains(candidate))?;
		taken.insert(name.clone());
		return Some(name);
	}
	taken.insert(base.clone());
	Some(base)
}

/// Move one path into the session. Returns whether it was a directory.
fn trash_one(path: &Path, target: &Path) -> io::Result<bool> {
	let meta = fs::symlink_metadata(path)?;
	if !meta.is_file() && !meta.is_dir() {
		return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a file or directory"));
	}
	move_path(path, target)?;
	Ok(meta.is_dir())
}

fn finish_backup(archive: Archive, options: &TrashOptions, log: LogFn) -> Option<PathBuf> {
	let path = match archive.finish() {
		Ok(path) => path,
		Err(e) => {
			log(&format!("Backup failed: {:#}", e), Level::Warn);
			None
		}
	};

	if let Some(backup) = &options.backup {
		for removed in backup::rotate(&backup.dir, options.project_name, backup.max_kept) {
			log(&format!("Rotated old backup {}", removed.display()), Level::Info);
		}
	}

	path
}

/// Remove directories the move left empty, walking up from `path`.
fn prune_empty_parents(path: &Path, trash_root: &Path) {
	let mut parent = path.parent();
	while let Some(dir) = parent {
		if dir.as_os_str().is_empty() || dir == trash_root || !dir.exists() {
			break;
		}
		if fs::remove_dir(dir).is_err() {
			break;
		}
		parent = dir.parent();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	#[test]
	fn same_second_sessions_stay_sortable() {
		let dir = tempfile::tempdir().unwrap();
		let now = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

		let ids: Vec<String> = (0..3)
			.map(|_| create_session(dir.path(), now).unwrap().id)
			.collect();

		assert_eq!(
			ids,
			vec!["delete_20260102_030405", "delete_20260102_030405_001", "delete_20260102_030405_002"]
		);
		let mut sorted = ids.clone();
		sorted.sort();
		assert_eq!(sorted, ids);
		assert!("delete_20260102_030406".to_string() > ids[2]);
	}

	#[test]
	fn clashing_base_names_get_a_prefix() {
		let mut taken = HashSet::new();
		assert_eq!(stored_name(Path::new("/a/x.png"), &mut taken).unwrap(), "x.png");
		assert_eq!(stored_name(Path::new("/b/x.png"), &mut taken).unwrap(), "1_x.png");
		assert_eq!(stored_name(Path::new("/c/x.png"), &mut taken).unwrap(), "2_x.png");
		assert_eq!(stored_name(Path::new("/d/session.json"), &mut taken).unwrap(), "1_session.json");
	}

	#[test]
	fn pruning_stops_at_non_empty_and_trash_root() {
		let dir = tempfile::tempdir().unwrap();
		let keep = dir.path().join("sprites");
		let deep = keep.join("spr_a").join("layers").join("x");
		fs::create_dir_all(&deep).unwrap();
		fs::write(keep.join("spr_a").join("spr_a.yy"), "{}").unwrap();

		prune_empty_parents(&deep.join("gone.png"), dir.path());

		assert!(!keep.join("spr_a").join("layers").exists());
		assert!(keep.join("spr_a").exists());
	}
}
