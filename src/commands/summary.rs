//! Summary command - both passes, then totals

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::config::Settings;
use crate::processing::{self, Summary};
use crate::storage::Project;
use crate::ui;

pub fn run(dir: &Path, settings: &Settings) -> Result<()> {
	let project = Project::open(dir);

	ui::info(&format!("Scanning project: {}", project.name.bright_white().bold()));
	let usage = processing::scan_sprites(&project.root, &ui::emit, &ui::progress)?;
	let layers = processing::scan_layers(&project.root, &ui::emit, &ui::progress)?;

	print(&Summary::new(&usage, Some(&layers)), settings);
	Ok(())
}

/// Prints the scan summary block.
pub fn print(summary: &Summary, settings: &Settings) {
	ui::header("Summary");

	println!("  {} {}", "Folders scanned:".bright_blue(), summary.total_folders);
	println!("  {} {}", "Clean folders:".green(), summary.clean_folders);
	if summary.flagged_folders > 0 {
		println!("  {} {}", "With unused files:".yellow(), summary.flagged_folders);
	}
	if summary.skipped_folders > 0 {
		println!("  {} {}", "Skipped (bad descriptor):".red(), summary.skipped_folders);
	}
	println!("  {} {}", "Unused items:".bright_blue(), summary.unused_items);
	println!(
		"  {} {:.2} KB",
		"Recoverable:".bright_blue(),
		summary.recoverable_bytes as f64 / 1024.0
	);

	let backups = match settings.backup_root() {
		Some(dir) if settings.backup_enabled => dir.display().to_string(),
		_ => "Not enabled".to_string(),
	};
	println!("  {} {}", "Backups:".bright_blue(), backups.dimmed());
	println!("  {} {}", "Trash:".bright_blue(), settings.trash_root().display().to_string().dimmed());
	println!();
}
