//! Delete command - move selected unused files into the trash

use anyhow::{bail, Result};
use colored::*;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::processing::{self, LayerReport, UsageReport};
use crate::storage::Project;
use crate::trash::{self, BackupOptions, TrashOptions};
use crate::ui;

/// What the user asked to delete.
#[derive(Debug, Clone, Default)]
pub struct Selection {
	pub paths: Vec<PathBuf>,
	pub all: bool,
	pub duplicates: bool,
	pub layers: bool,
	pub folder: Option<String>,
	pub filter: Option<String>,
}

impl Selection {
	fn keeps(&self, folder: &str, name: &str) -> bool {
		let folder_ok = self.folder.as_deref().map_or(true, |f| f == folder);
		let name_ok = self
			.filter
			.as_deref()
			.map_or(true, |t| name.to_lowercase().contains(&t.to_lowercase()));
		folder_ok && name_ok
	}

	/// Unused sprite frames this selection picks from a usage report.
	pub fn pick_sprites(&self, report: &UsageReport) -> Vec<PathBuf> {
		report
			.unused()
			.filter(|(folder, record)| self.keeps(folder, &record.name))
			.filter(|(folder, record)| !self.duplicates || report.is_duplicate(folder, record))
			.map(|(_, record)| record.path.clone())
			.collect()
	}

	/// Orphaned layer folders this selection picks from a layer report.
	pub fn pick_layers(&self, report: &LayerReport) -> Vec<PathBuf> {
		report
			.orphans()
			.filter(|(folder, sub)| self.keeps(folder, &sub.name))
			.map(|(_, sub)| sub.path.clone())
			.collect()
	}
}

enum Scanned {
	Sprites(UsageReport),
	Layers(LayerReport),
	Nothing,
}

pub fn run(dir: &Path, settings: &Settings, selection: &Selection, no_backup: bool, auto_confirm: bool) -> Result<()> {
	let project = Project::open(dir);

	let (targets, mut scanned) = if !selection.paths.is_empty() {
		let paths: Vec<PathBuf> = selection
			.paths
			.iter()
			.map(|p| p.canonicalize().unwrap_or_else(|_| p.clone()))
			.collect();
		(paths, Scanned::Nothing)
	} else if selection.layers {
		ui::info("Scanning layers...");
		let report = processing::scan_layers(&project.root, &ui::emit, &ui::progress)?;
		(selection.pick_layers(&report), Scanned::Layers(report))
	} else if selection.all || selection.duplicates {
		ui::info("Scanning project...");
		let report = processing::scan_sprites(&project.root, &ui::emit, &ui::progress)?;
		(selection.pick_sprites(&report), Scanned::Sprites(report))
	} else {
		bail!("Nothing selected: pass --all, --duplicates, --layers or explicit paths");
	};

	if targets.is_empty() {
		ui::info("No items selected for deletion.");
		return Ok(());
	}

	ui::header("Selected");
	for path in &targets {
		println!("  {}", ui::path_link(path, 60));
	}

	if !auto_confirm && !ui::confirm(&format!("Delete {} selected items?", targets.len()))? {
		ui::info("Cancelled");
		return Ok(());
	}

	let trash_root = settings.trash_root();
	let backup = if settings.backup_enabled && !no_backup {
		settings.backup_root().map(|dir| BackupOptions { dir, max_kept: settings.max_backups })
	} else {
		None
	};
	let options = TrashOptions {
		trash_root: &trash_root,
		project_name: &project.name,
		backup,
	};

	let outcome = trash::move_to_trash(&targets, &options, &ui::emit)?;

	ui::warn(&format!("Deleted {} items.", outcome.deleted.len()));
	let failed = targets.len() - outcome.deleted.len();
	if failed > 0 {
		ui::error(&format!("{} items could not be moved", failed));
	}
	if let Some(archive) = &outcome.archive {
		ui::info(&format!("Backup: {}", ui::path_link(archive, 60)));
	}
	if !outcome.deleted.is_empty() {
		ui::info(&format!("Trash session: {}", outcome.session.id.bright_white()));
	}

	let remaining = match &mut scanned {
		Scanned::Sprites(report) => {
			report.apply_deleted(&outcome.deleted);
			Some(report.unused_count())
		}
		Scanned::Layers(report) => {
			report.apply_deleted(&outcome.deleted);
			Some(report.orphan_count())
		}
		Scanned::Nothing => None,
	};
	if let Some(remaining) = remaining {
		ui::info(&format!("{} unused items remain", remaining));
	}

	Ok(())
}
