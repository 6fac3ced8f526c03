//! Scan command - report unused sprite frames

use anyhow::Result;
use colored::*;
use std::path::Path;
use std::time::Instant;

use crate::config::Settings;
use crate::processing::{self, report, Summary, UsageReport};
use crate::storage::Project;
use crate::ui;

pub fn run(dir: &Path, settings: &Settings, duplicates: bool, verify: bool) -> Result<()> {
	let start = Instant::now();
	let project = Project::open(dir);

	ui::info(&format!("Scanning project: {}", project.name.bright_white().bold()));
	let report = processing::scan_sprites(&project.root, &ui::emit, &ui::progress)?;

	print_folders(&report);

	if duplicates {
		print_duplicates(&report, verify);
	}

	super::summary::print(&Summary::new(&report, None), settings);
	ui::success(&format!("Project scan completed in {:.1}s", start.elapsed().as_secs_f32()));

	Ok(())
}

fn print_folders(report: &UsageReport) {
	ui::header("Folders");

	for (count, name) in report::folder_counts(report, None) {
		if count == 0 {
			println!("  {} {}", name, "(OK)".green());
			continue;
		}
		println!("  {} {}", name.bright_white(), format!("({} unused)", count).yellow());

		for record in &report.folders[name].unused {
			let dup = if report.is_duplicate(name, record) { " dup".yellow().to_string() } else { String::new() };
			println!(
				"    {} {}{}",
				ui::path_link(&record.path, 60),
				format!("({} B)", record.size).dimmed(),
				dup
			);
		}
	}

	for folder in report.folders.values().filter(|f| !f.descriptor_ok) {
		ui::warn(&format!("{}: descriptor unreadable, folder skipped", folder.name));
	}
}

fn print_duplicates(report: &UsageReport, verify: bool) {
	ui::header("Same-size files");

	let mut groups = 0;
	for (key, group) in report.duplicate_groups() {
		groups += 1;
		let names: Vec<&str> = group.iter().map(|r| r.name.as_str()).collect();
		println!("  {} {} {}", key.folder.bright_white(), format!("{} B", key.size).dimmed(), names.join(", "));
	}
	if groups == 0 {
		ui::info("No same-size files");
		return;
	}

	if verify {
		ui::header("Identical content");
		let confirmed = report.confirmed_duplicates(&ui::emit);
		if confirmed.is_empty() {
			ui::info("Same-size files all differ in content");
		}
		for (folder, members) in confirmed {
			let names: Vec<&str> = members.iter().map(|r| r.name.as_str()).collect();
			println!("  {} {}", folder.bright_white(), names.join(" = "));
		}
	}
}
