//! Undo command - restore the last delete; Trash command - list sessions

use anyhow::Result;
use colored::*;

use crate::config::Settings;
use crate::trash::{self, Manifest};
use crate::ui;

pub fn run(settings: &Settings) -> Result<()> {
	let fallback = std::env::current_dir()?;

	if trash::undo_last(&settings.trash_root(), &fallback, &ui::emit)? {
		ui::success("Undo successful. Last delete restored.");
	} else {
		ui::warn("No deletions found to undo.");
	}

	Ok(())
}

pub fn list(settings: &Settings) -> Result<()> {
	let root = settings.trash_root();
	let sessions = trash::list_sessions(&root)?;

	if sessions.is_empty() {
		ui::info(&format!("Trash is empty: {}", root.display()));
		return Ok(());
	}

	ui::header("Trash sessions");
	for (index, dir) in sessions.iter().enumerate() {
		let id = dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
		let detail = match Manifest::load(dir) {
			Ok(m) => format!("{} · {} entries", m.project, m.entries.len()),
			Err(_) => "no manifest".to_string(),
		};
		let marker = if index == 0 { " ← undo".bright_green().to_string() } else { String::new() };
		println!("  {} {}{}", id.bright_white(), detail.dimmed(), marker);
	}

	Ok(())
}
