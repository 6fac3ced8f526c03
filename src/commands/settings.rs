//! Config command - show or persist settings

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::config::Settings;
use crate::ui;

pub fn run(
	path: &Path,
	mut settings: Settings,
	backup: Option<bool>,
	max_backups: Option<usize>,
	save_paths: bool,
) -> Result<()> {
	let changed = backup.is_some() || max_backups.is_some() || save_paths;

	if let Some(enabled) = backup {
		settings.backup_enabled = enabled;
	}
	if let Some(max) = max_backups {
		settings.max_backups = max;
	}
	if !save_paths {
		// Only persist paths that were already in the file
		let stored = Settings::load(path);
		settings.trash_dir = stored.trash_dir;
		settings.backup_dir = stored.backup_dir;
	}

	if changed {
		match settings.save(path) {
			Ok(()) => ui::success(&format!("Saved {}", path.display())),
			Err(e) => ui::warn(&format!("Settings not saved: {:#}", e)),
		}
	}

	ui::header("Settings");
	let on_off = |b: bool| if b { "on".green() } else { "off".red() };
	println!("  {} {}", "Backups:".bright_blue(), on_off(settings.backup_enabled));
	println!("  {} {}", "Max backups:".bright_blue(), settings.max_backups);
	println!(
		"  {} {}",
		"Backup dir:".bright_blue(),
		settings.backup_root().map(|p| p.display().to_string()).unwrap_or_else(|| "-".into()).dimmed()
	);
	println!("  {} {}", "Trash:".bright_blue(), settings.trash_root().display().to_string().dimmed());
	println!();

	Ok(())
}
