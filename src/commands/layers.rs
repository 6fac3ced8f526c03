//! Layers command - report orphaned layer folders

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::processing;
use crate::storage::Project;
use crate::ui;

pub fn run(dir: &Path) -> Result<()> {
	let project = Project::open(dir);

	ui::info(&format!("Scanning layers: {}", project.name.bright_white().bold()));
	let report = processing::scan_layers(&project.root, &ui::emit, &ui::progress)?;

	ui::header("Layer folders");
	for folder in report.folders.values() {
		if folder.orphans.is_empty() {
			println!("  {} {}", folder.name, "(OK)".green());
			continue;
		}
		println!("  {} {}", folder.name.bright_white(), format!("({} unused)", folder.orphans.len()).yellow());
		for sub in &folder.orphans {
			println!(
				"    {} {}",
				ui::path_link(&sub.path, 60),
				format!("({} PNGs, {})", sub.images.len(), ui::format_size(sub.total_size())).dimmed()
			);
		}
	}

	println!();
	if report.orphan_count() == 0 {
		ui::success("No orphaned layer folders");
	} else {
		ui::warn(&format!(
			"{} orphaned layer folders ({})",
			report.orphan_count(),
			ui::format_size(report.orphan_bytes())
		));
	}
	ui::success("Layer scan completed.");

	Ok(())
}
