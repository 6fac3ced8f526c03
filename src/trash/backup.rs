//! Zip backups of trash sessions, and their rotation

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::ARCHIVE_EXT;

/// An archive being filled while a trash session is written.
pub struct Archive {
	path: PathBuf,
	project: String,
	writer: ZipWriter<File>,
	entries: usize,
}

impl Archive {
	/// Create `<dir>/<project>_<stamp>.zip`.
	pub fn create(dir: &Path, project: &str, stamp: &str) -> Result<Self> {
		fs::create_dir_all(dir)
			.with_context(|| format!("Failed to create backup directory {}", dir.display()))?;

		let path = dir.join(format!("{}_{}.{}", project, stamp, ARCHIVE_EXT));
		let file = File::create(&path)
			.with_context(|| format!("Failed to create {}", path.display()))?;

		Ok(Self {
			path,
			project: project.to_string(),
			writer: ZipWriter::new(file),
			entries: 0,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn entries(&self) -> usize {
		self.entries
	}

	/// Add one file as `<project>/<relative>`.
	pub fn add_file(&mut self, source: &Path, relative: &Path) -> Result<()> {
		let name = self.entry_name(relative);
		let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

		let mut input = File::open(source)
			.with_context(|| format!("Failed to open {}", source.display()))?;
		self.writer
			.start_file(name.as_str(), options)
			.with_context(|| format!("Failed to add {} to archive", name))?;
		io::copy(&mut input, &mut self.writer)
			.with_context(|| format!("Failed to write {} to archive", name))?;

		self.entries += 1;
		Ok(())
	}

	/// Add every file under `dir`, named relative to `base`.
	pub fn add_tree(&mut self, dir: &Path, base: &Path) -> Result<()> {
		for entry in WalkDir::new(dir).sort_by_file_name() {
			let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
			if !entry.file_type().is_file() {
				continue;
			}
			let relative = entry.path().strip_prefix(base).unwrap_or(entry.path());
			self.add_file(entry.path(), relative)?;
		}
		Ok(())
	}

	/// Finish the zip. Empty archives are removed and `None` is returned.
	pub fn finish(mut self) -> Result<Option<PathBuf>> {
		self.writer
			.finish()
			.with_context(|| format!("Failed to finish {}", self.path.display()))?;

		if self.entries == 0 {
			let _ = fs::remove_file(&self.path);
			return Ok(None);
		}
		Ok(Some(self.path))
	}

	fn entry_name(&self, relative: &Path) -> String {
		let mut name = self.project.clone();
		for part in relative.components() {
			name.push('/');
			name.push_str(&part.as_os_str().to_string_lossy());
		}
		name
	}
}

/// Archives of `project` in `dir`, oldest first.
///
/// Only names of the form `<project>_<YYYYMMDD_HHMMSS...>.zip` count, so a
/// project called `foo` never claims `foobar`'s backups.
pub fn list_archives(dir: &Path, project: &str) -> Vec<PathBuf> {
	let Ok(entries) = fs::read_dir(dir) else { return Vec::new() };
	let prefix = format!("{}_", project);
	let suffix = format!(".{}", ARCHIVE_EXT);

	let mut archives: Vec<(String, PathBuf)> = entries
		.filter_map(|e| e.ok())
		.filter(|e| e.path().is_file())
		.filter_map(|e| {
			let name = e.file_name().to_str()?.to_string();
			let stamp = name.strip_prefix(&prefix)?.strip_suffix(&suffix)?;
			is_stamp(stamp).then(|| (name.clone(), e.path()))
		})
		.collect();

	archives.sort_by(|a, b| a.0.cmp(&b.0));
	archives.into_iter().map(|(_, path)| path).collect()
}

/// Delete the oldest archives of `project` until at most `max_kept` remain.
///
/// `max_kept = 0` clears every backup of the project. Returns what was
/// actually removed; removal failures are skipped.
pub fn rotate(dir: &Path, project: &str, max_kept: usize) -> Vec<PathBuf> {
	let archives = list_archives(dir, project);
	let excess = archives.len().saturating_sub(max_kept);

	archives
		.into_iter()
		.take(excess)
		.filter(|path| fs::remove_file(path).is_ok())
		.collect()
}

/// `YYYYMMDD_HHMMSS` optionally followed by `_NNN`
fn is_stamp(s: &str) -> bool {
	let bytes = s.as_bytes();
	if bytes.len() < 15 {
		return false;
	}
	let (head, rest) = bytes.split_at(15);
	let head_ok = head
		.iter()
		.enumerate()
		.all(|(i, b)| if i == 8 { *b == b'_' } else { b.is_ascii_digit() });
	let rest_ok = rest.is_empty()
		|| (rest.len() > 1 && rest[0] == b'_' && rest[1..].iter().all(u8::is_ascii_digit));
	head_ok && rest_ok
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stamps_are_recognised() {
		assert!(is_stamp("20260102_030405"));
		assert!(is_stamp("20260102_030405_002"));
		assert!(!is_stamp("20260102-030405"));
		assert!(!is_stamp("bar_20260102_030405"));
		assert!(!is_stamp("20260102_030405_"));
	}

	#[test]
	fn other_projects_are_not_listed() {
		let dir = tempfile::tempdir().unwrap();
		for name in [
			"foo_20260101_000000.zip",
			"foobar_20260101_000000.zip",
			"foo_bar_20260101_000000.zip",
			"foo_20260101_000001.txt",
		] {
			fs::write(dir.path().join(name), b"").unwrap();
		}

		let listed = list_archives(dir.path(), "foo");
		assert_eq!(listed, vec![dir.path().join("foo_20260101_000000.zip")]);
	}

	#[test]
	fn empty_archive_is_discarded() {
		let dir = tempfile::tempdir().unwrap();
		let archive = Archive::create(dir.path(), "Game", "20260101_000000").unwrap();
		let path = archive.path().to_path_buf();
		assert!(archive.finish().unwrap().is_none());
		assert!(!path.exists());
	}
}
