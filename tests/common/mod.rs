// Throwaway GameMaker-style projects for integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use spritesweep::core::Level;

pub struct Fixture {
	pub dir: tempfile::TempDir,
}

impl Fixture {
	/// Project root with an empty `sprites/` folder.
	pub fn new() -> Self {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir(dir.path().join("sprites")).unwrap();
		Self { dir }
	}

	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	pub fn folder(&self, name: &str) -> PathBuf {
		self.root().join("sprites").join(name)
	}

	/// Sprite folder whose descriptor declares `frames`.
	pub fn sprite(&self, name: &str, frames: &[&str]) -> PathBuf {
		let folder = self.folder(name);
		fs::create_dir_all(&folder).unwrap();

		let entries: Vec<String> = frames
			.iter()
			.map(|f| format!("    {{\"name\": \"{f}\", \"%Name\": \"{f}\",}},\n"))
			.collect();
		let yy = format!("{{\n  \"frames\": [\n{}  ],\n  \"name\": \"{name}\",\n}}\n", entries.concat());
		fs::write(folder.join(format!("{name}.yy")), yy).unwrap();
		folder
	}

	/// Write `size` bytes of `fill` to a path under the project root.
	pub fn file(&self, relative: &str, size: usize, fill: u8) -> PathBuf {
		let path = self.root().join(relative);
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(&path, vec![fill; size]).unwrap();
		path
	}
}

/// Logging callback that keeps every message.
#[derive(Default)]
pub struct Recorder {
	pub lines: RefCell<Vec<(String, Level)>>,
	pub progress: RefCell<Vec<f32>>,
}

impl Recorder {
	pub fn log(&self, msg: &str, level: Level) {
		self.lines.borrow_mut().push((msg.to_string(), level));
	}

	pub fn step(&self, percent: f32) {
		self.progress.borrow_mut().push(percent);
	}

	pub fn count(&self, level: Level) -> usize {
		self.lines.borrow().iter().filter(|(_, l)| *l == level).count()
	}

	pub fn any(&self, level: Level, needle: &str) -> bool {
		self.lines
			.borrow()
			.iter()
			.any(|(m, l)| *l == level && m.contains(needle))
	}
}
