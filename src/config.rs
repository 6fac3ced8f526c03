//! Application configuration and constants

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// === Project Layout ===
pub const ASSET_CONTAINER: &str = "sprites";
pub const LAYERS_DIR: &str = "layers";
pub const DESCRIPTOR_EXT: &str = "yy";
pub const PROJECT_EXT: &str = "yyp";
pub const IMAGE_EXT: &str = "png";

/// Substring that marks a sprite folder reference inside the master `.yyp` file
pub const MASTER_SPRITE_PATTERN: &str = "\"path\": \"sprites/";

// === Trash ===
pub const TRASH_DIR: &str = "_SpriteSweep_Trash";
pub const SESSION_PREFIX: &str = "delete_";
pub const SESSION_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const MANIFEST_FILE: &str = "session.json";

// === Backups ===
pub const ARCHIVE_EXT: &str = "zip";
pub const BACKUP_DIR: &str = "Documents/SpriteSweep_Backups";
pub const DEFAULT_MAX_BACKUPS: usize = 3;

// === Settings ===
pub const SETTINGS_FILE: &str = ".spritesweep.json";

/// User settings, loaded once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub backup_enabled: bool,
	pub backup_dir: Option<PathBuf>,
	pub trash_dir: Option<PathBuf>,
	pub max_backups: usize,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			backup_enabled: true,
			backup_dir: None,
			trash_dir: None,
			max_backups: DEFAULT_MAX_BACKUPS,
		}
	}
}

impl Settings {
	/// Load settings, falling back to defaults when the file is missing or broken.
	pub fn load(path: &Path) -> Self {
		match Self::try_load(path) {
			Ok(settings) => settings,
			Err(e) => {
				if path.exists() {
					crate::ui::debug(&format!("Ignoring settings: {:#}", e));
				}
				Self::default()
			}
		}
	}

	fn try_load(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path).context("Failed to read settings")?;
		serde_json::from_str(&content).context("Failed to parse settings")
	}

	/// Write settings back. Failures are reported but never fatal.
	pub fn save(&self, path: &Path) -> Result<()> {
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).context("Failed to create settings directory")?;
		}
		let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
		fs::write(path, json).context("Failed to write settings")?;
		Ok(())
	}

	/// Trash root: configured value, else next to the working directory
	pub fn trash_root(&self) -> PathBuf {
		if let Some(dir) = &self.trash_dir {
			return dir.clone();
		}
		std::env::current_dir()
			.unwrap_or_else(|_| PathBuf::from("."))
			.join(TRASH_DIR)
	}

	/// Backup directory (SPRITESWEEP_BACKUP_DIR env var wins over the settings file)
	pub fn backup_root(&self) -> Option<PathBuf> {
		if let Ok(env_path) = std::env::var("SPRITESWEEP_BACKUP_DIR") {
			if !env_path.is_empty() {
				crate::ui::debug(&format!("Using SPRITESWEEP_BACKUP_DIR: {}", env_path));
				return Some(PathBuf::from(env_path));
			}
		}
		if let Some(dir) = &self.backup_dir {
			return Some(dir.clone());
		}
		home_dir().map(|h| h.join(BACKUP_DIR))
	}
}

/// Settings file location (SPRITESWEEP_CONFIG env var, else the home directory)
pub fn settings_path() -> PathBuf {
	if let Ok(env_path) = std::env::var("SPRITESWEEP_CONFIG") {
		if !env_path.is_empty() {
			return PathBuf::from(env_path);
		}
	}
	home_dir()
		.unwrap_or_else(|| PathBuf::from("."))
		.join(SETTINGS_FILE)
}

fn home_dir() -> Option<PathBuf> {
	std::env::var_os("HOME")
		.or_else(|| std::env::var_os("USERPROFILE"))
		.filter(|h| !h.is_empty())
		.map(PathBuf::from)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn settings_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("settings.json");

		let settings = Settings {
			backup_enabled: false,
			backup_dir: Some(dir.path().join("bk")),
			trash_dir: None,
			max_backups: 7,
		};
		settings.save(&path).unwrap();

		assert_eq!(Settings::load(&path), settings);
	}

	#[test]
	fn broken_or_partial_settings_fall_back() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("settings.json");

		assert_eq!(Settings::load(&path), Settings::default());

		fs::write(&path, "{ not json").unwrap();
		assert_eq!(Settings::load(&path), Settings::default());

		fs::write(&path, r#"{"max_backups": 1}"#).unwrap();
		let partial = Settings::load(&path);
		assert_eq!(partial.max_backups, 1);
		assert!(partial.backup_enabled);
	}

	#[test]
	fn configured_trash_dir_wins() {
		let settings = Settings {
			trash_dir: Some(PathBuf::from("/tmp/custom-trash")),
			..Settings::default()
		};
		assert_eq!(settings.trash_root(), PathBuf::from("/tmp/custom-trash"));
	}
}
