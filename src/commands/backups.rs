//! Backups command - list or clear zip archives

use anyhow::Result;
use colored::*;
use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::storage::Project;
use crate::trash;
use crate::ui;

pub fn run(dir: &Path, settings: &Settings, clear: bool, auto_confirm: bool) -> Result<()> {
	let project = Project::open(dir);
	let Some(backup_dir) = settings.backup_root() else {
		ui::warn("No backup directory configured");
		return Ok(());
	};

	let archives = trash::list_archives(&backup_dir, &project.name);
	if archives.is_empty() {
		ui::info(&format!("No backups for {} in {}", project.name, backup_dir.display()));
		return Ok(());
	}

	if !clear {
		ui::header(&format!("Backups of {}", project.name));
		for archive in archives.iter().rev() {
			let size = fs::metadata(archive).map(|m| m.len()).unwrap_or(0);
			println!("  {} {}", ui::path_link(archive, 60), ui::format_size(size).dimmed());
		}
		return Ok(());
	}

	if !auto_confirm
		&& !ui::confirm(&format!("Delete all {} backups in {}?", archives.len(), backup_dir.display()))?
	{
		ui::info("Cancelled");
		return Ok(());
	}

	let removed = trash::rotate(&backup_dir, &project.name, 0);
	ui::info(&format!("All backups cleared ({} removed).", removed.len().to_string().bright_white()));
	if removed.len() < archives.len() {
		ui::warn(&format!("{} backups could not be removed", archives.len() - removed.len()));
	}

	Ok(())
}
