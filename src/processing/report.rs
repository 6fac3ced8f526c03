//! Scan summary numbers

use serde::Serialize;

use super::{LayerReport, UsageReport};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
	/// Folders whose descriptor was read; skipped folders are not counted
	pub total_folders: usize,
	pub clean_folders: usize,
	pub flagged_folders: usize,
	/// Folders left out because their descriptor was missing or unreadable
	pub skipped_folders: usize,
	/// Unused root images plus orphaned layer folders
	pub unused_items: usize,
	pub recoverable_bytes: u64,
}

impl Summary {
	pub fn new(usage: &UsageReport, layers: Option<&LayerReport>) -> Self {
		let mut summary = Summary {
			skipped_folders: usage.folders.values().filter(|f| !f.descriptor_ok).count(),
			recoverable_bytes: usage.unused_bytes() + layers.map_or(0, LayerReport::orphan_bytes),
			..Summary::default()
		};

		for (count, _) in folder_counts(usage, layers) {
			summary.total_folders += 1;
			summary.unused_items += count;
			if count == 0 {
				summary.clean_folders += 1;
			} else {
				summary.flagged_folders += 1;
			}
		}

		summary
	}
}

/// Per-folder count of deletion candidates, in folder name order.
/// Folders with an unreadable descriptor are left out.
pub fn folder_counts<'a>(
	usage: &'a UsageReport,
	layers: Option<&'a LayerReport>,
) -> impl Iterator<Item = (usize, &'a str)> + 'a {
	usage.folders.values().filter(|f| f.descriptor_ok).map(move |folder| {
		let orphans = layers
			.and_then(|l| l.folders.get(&folder.name))
			.map_or(0, |l| l.orphans.len());
		(folder.unused.len() + orphans, folder.name.as_str())
	})
}
