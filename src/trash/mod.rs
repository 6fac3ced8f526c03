//! # Trash
//!
//! Soft deletion into timestamped session folders, zip backups with
//! rotation, and single-level undo.

pub mod backup;
pub mod session;
pub mod undo;

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

pub use backup::{list_archives, rotate, Archive};
pub use session::{move_to_trash, BackupOptions, Manifest, ManifestEntry, TrashOptions, TrashOutcome, TrashSession};
pub use undo::{list_sessions, undo_last};

/// Move a file or directory, copying across filesystems when rename can't.
pub(crate) fn move_path(src: &Path, dst: &Path) -> io::Result<()> {
	let meta = fs::symlink_metadata(src)?;

	match fs::rename(src, dst) {
		Ok(()) => Ok(()),
		Err(rename_err) => {
			if matches!(rename_err.kind(), io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied) {
				return Err(rename_err);
			}
			let copied = if meta.is_dir() { copy_tree(src, dst) } else { fs::copy(src, dst).map(|_| ()) };
			if let Err(e) = copied {
				let _ = if meta.is_dir() { fs::remove_dir_all(dst) } else { fs::remove_file(dst) };
				return Err(io::Error::new(e.kind(), format!("{} (rename: {})", e, rename_err)));
			}
			if meta.is_dir() { fs::remove_dir_all(src) } else { fs::remove_file(src) }
		}
	}
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
	for entry in WalkDir::new(src) {
		let entry = entry.map_err(io::Error::from)?;
		let rel = entry.path().strip_prefix(src).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
		let target = dst.join(rel);
		if entry.file_type().is_dir() {
			fs::create_dir_all(&target)?;
		} else {
			fs::copy(entry.path(), &target)?;
		}
	}
	Ok(())
}
