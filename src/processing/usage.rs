//! Sprite usage pass: which root-level images does each folder's descriptor keep alive

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{is_image, AssetRecord, DuplicateKey, FileHash, Level, LogFn, ProgressFn};
use crate::storage::{self, Descriptor};

#[derive(Debug, Clone)]
pub struct FolderUsage {
	pub name: String,
	pub path: PathBuf,
	/// False when the descriptor was missing or unparseable; no files are listed then.
	pub descriptor_ok: bool,
	/// `<frame>.png` names the descriptor declares
	pub used: BTreeSet<String>,
	pub used_files: Vec<AssetRecord>,
	pub unused: Vec<AssetRecord>,
}

impl FolderUsage {
	pub fn unused_bytes(&self) -> u64 {
		self.unused.iter().map(|r| r.size).sum()
	}
}

#[derive(Debug, Clone, Default)]
pub struct UsageReport {
	pub folders: BTreeMap<String, FolderUsage>,
	pub duplicates: BTreeMap<DuplicateKey, Vec<AssetRecord>>,
	pub used_global: BTreeSet<String>,
}

impl UsageReport {
	pub fn unused_count(&self) -> usize {
		self.folders.values().map(|f| f.unused.len()).sum()
	}

	pub fn unused_bytes(&self) -> u64 {
		self.folders.values().map(FolderUsage::unused_bytes).sum()
	}

	pub fn unused(&self) -> impl Iterator<Item = (&str, &AssetRecord)> {
		self.folders
			.values()
			.flat_map(|f| f.unused.iter().map(move |r| (f.name.as_str(), r)))
	}

	/// Size groups with more than one member.
	pub fn duplicate_groups(&self) -> impl Iterator<Item = (&DuplicateKey, &Vec<AssetRecord>)> {
		self.duplicates.iter().filter(|(_, group)| group.len() > 1)
	}

	/// True if the record shares its byte size with another file in the same folder.
	pub fn is_duplicate(&self, folder: &str, record: &AssetRecord) -> bool {
		let key = DuplicateKey { folder: folder.to_string(), size: record.size };
		self.duplicates.get(&key).is_some_and(|g| g.len() > 1)
	}

	/// Split size groups by full-content hash, keeping groups that still have
	/// more than one member. Unreadable files are left out.
	pub fn confirmed_duplicates(&self, log: LogFn) -> Vec<(String, Vec<AssetRecord>)> {
		let mut confirmed = Vec::new();

		for (key, group) in self.duplicate_groups() {
			let mut by_hash: BTreeMap<FileHash, Vec<AssetRecord>> = BTreeMap::new();
			for record in group {
				match FileHash::compute(&record.path) {
					Ok(hash) => by_hash.entry(hash).or_default().push(record.clone()),
					Err(e) => log(&format!("Failed to hash {}: {}", record.path.display(), e), Level::Warn),
				}
			}
			confirmed.extend(
				by_hash
					.into_values()
					.filter(|members| members.len() > 1)
					.map(|members| (key.folder.clone(), members)),
			);
		}

		confirmed
	}

	/// Drop deleted paths from the in-memory report so it matches the disk
	/// without a rescan.
	pub fn apply_deleted(&mut self, deleted: &[PathBuf]) {
		let gone: HashSet<&Path> = deleted.iter().map(PathBuf::as_path).collect();

		for folder in self.folders.values_mut() {
			folder.unused.retain(|r| !gone.contains(r.path.as_path()));
			folder.used_files.retain(|r| !gone.contains(r.path.as_path()));
		}
		for group in self.duplicates.values_mut() {
			group.retain(|r| !gone.contains(r.path.as_path()));
		}
		self.duplicates.retain(|_, group| !group.is_empty());
	}
}

/// Scan every sprite folder's root-level images against its descriptor.
///
/// Folders are restricted to those named in the master `.yyp` when one is
/// found and names any. A broken descriptor is logged and its folder is
/// reported with `descriptor_ok = false`.
pub fn scan_sprites(root: &Path, log: LogFn, progress: ProgressFn) -> Result<UsageReport> {
	let container = storage::require_container(root)?;

	let filter = match storage::find_master(root) {
		Some(master) => match storage::master_sprite_folders(&master) {
			Ok(folders) => {
				log(
					&format!(
						"Found sprite folders in {}: {}",
						master.display(),
						folders.iter().cloned().collect::<Vec<_>>().join(", ")
					),
					Level::Info,
				);
				Some(folders).filter(|f| !f.is_empty())
			}
			Err(e) => {
				log(&format!("Error reading master file: {:#}", e), Level::Error);
				None
			}
		},
		None => None,
	};

	let folders = storage::asset_folders(&container, filter.as_ref(), log);
	let total = folders.len();
	let mut report = UsageReport::default();

	for (index, (name, path)) in folders.into_iter().enumerate() {
		let usage = scan_folder(&name, &path, &mut report.duplicates, log);
		report.used_global.extend(usage.used.iter().cloned());
		report.folders.insert(name, usage);

		progress((index + 1) as f32 / total as f32 * 100.0);
	}

	progress(100.0);
	Ok(report)
}

fn scan_folder(
	name: &str,
	path: &Path,
	duplicates: &mut BTreeMap<DuplicateKey, Vec<AssetRecord>>,
	log: LogFn,
) -> FolderUsage {
	let descriptor = storage::descriptor_path(path, name);
	log(&format!("Scanning {}...", descriptor.display()), Level::Info);

	let mut usage = FolderUsage {
		name: name.to_string(),
		path: path.to_path_buf(),
		descriptor_ok: false,
		used: BTreeSet::new(),
		used_files: Vec::new(),
		unused: Vec::new(),
	};

	let descriptor = match Descriptor::load(&descriptor) {
		Ok(d) => d,
		Err(e) => {
			log(&format!("Failed to read descriptor: {:#}", e), Level::Error);
			return usage;
		}
	};

	if !descriptor.names().is_empty() {
		let names: Vec<&str> = descriptor.names().iter().map(String::as_str).collect();
		log(&format!("Found names in {}: {}", name, names.join(", ")), Level::Info);
	}
	let used = descriptor.references();

	for record in root_images(path, &used, log) {
		duplicates
			.entry(DuplicateKey { folder: name.to_string(), size: record.size })
			.or_default()
			.push(record.clone());

		if record.used {
			usage.used_files.push(record);
		} else {
			usage.unused.push(record);
		}
	}

	usage.descriptor_ok = true;
	usage.used = used;
	usage
}

/// Root-level images of a folder, sorted by name. Subdirectories are not entered.
fn root_images(path: &Path, used: &BTreeSet<String>, log: LogFn) -> Vec<AssetRecord> {
	let entries = match fs::read_dir(path) {
		Ok(entries) => entries,
		Err(e) => {
			log(&format!("Failed to list {}: {}", path.display(), e), Level::Error);
			return Vec::new();
		}
	};

	let mut records: Vec<AssetRecord> = entries
		.filter_map(|e| e.ok())
		.filter_map(|entry| {
			let path = entry.path();
			if !is_image(&path) {
				return None;
			}
			let meta = fs::metadata(&path).ok().filter(|m| m.is_file())?;
			let name = entry.file_name().to_str()?.to_string();
			Some(AssetRecord {
				used: used.contains(&name),
				name,
				path,
				size: meta.len(),
			})
		})
		.collect();

	records.sort_by(|a, b| a.name.cmp(&b.name));
	records
}
