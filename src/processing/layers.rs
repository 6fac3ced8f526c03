//! Layer pass: find `layers/` sub-collections nothing refers to anymore
//!
//! A sub-collection `X` stays if the folder has a root image `X.png` or the
//! descriptor declares a frame named `X`. Everything else is orphaned and
//! its whole subtree is listed as deletion candidates.

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{IMAGE_EXT, LAYERS_DIR};
use crate::core::{is_image, AssetRecord, Level, LogFn, ProgressFn, SubCollection};
use crate::storage::{self, Descriptor};

#[derive(Debug, Clone)]
pub struct FolderLayers {
	pub name: String,
	pub path: PathBuf,
	pub used_pngs: BTreeSet<String>,
	pub orphans: Vec<SubCollection>,
	pub referenced: Vec<SubCollection>,
}

#[derive(Debug, Clone, Default)]
pub struct LayerReport {
	pub folders: BTreeMap<String, FolderLayers>,
}

impl LayerReport {
	pub fn orphan_count(&self) -> usize {
		self.folders.values().map(|f| f.orphans.len()).sum()
	}

	pub fn orphan_bytes(&self) -> u64 {
		self.folders
			.values()
			.flat_map(|f| &f.orphans)
			.map(SubCollection::total_size)
			.sum()
	}

	pub fn orphans(&self) -> impl Iterator<Item = (&str, &SubCollection)> {
		self.folders
			.values()
			.flat_map(|f| f.orphans.iter().map(move |s| (f.name.as_str(), s)))
	}

	/// Remove deleted sub-collections and images from the report.
	///
	/// A sub-collection whose own path was deleted goes away entirely. One
	/// that only lost images stays while it still has images or still exists.
	pub fn apply_deleted(&mut self, deleted: &[PathBuf]) {
		let gone: HashSet<&Path> = deleted.iter().map(PathBuf::as_path).collect();

		for folder in self.folders.values_mut() {
			folder.orphans.retain(|sub| !gone.contains(sub.path.as_path()));
			for sub in &mut folder.orphans {
				sub.images.retain(|img| !gone.contains(img.path.as_path()));
			}
			folder.orphans.retain(|sub| !sub.images.is_empty() || sub.path.exists());
		}
	}
}

/// Classify every sub-collection under `<folder>/layers/` for every sprite folder.
pub fn scan_layers(root: &Path, log: LogFn, progress: ProgressFn) -> Result<LayerReport> {
	let container = storage::require_container(root)?;
	let folders = storage::asset_folders(&container, None, log);
	let total = folders.len();
	let mut report = LayerReport::default();

	for (index, (name, path)) in folders.into_iter().enumerate() {
		if let Some(layers) = scan_folder(&name, &path, log) {
			report.folders.insert(name, layers);
		}
		progress((index + 1) as f32 / total as f32 * 100.0);
	}

	progress(100.0);
	Ok(report)
}

fn scan_folder(name: &str, path: &Path, log: LogFn) -> Option<FolderLayers> {
	let descriptor_path = storage::descriptor_path(path, name);
	log(&format!("Scanning layers for {}...", descriptor_path.display()), Level::Info);

	let descriptor = match Descriptor::load(&descriptor_path) {
		Ok(d) => d,
		Err(e) => {
			log(&format!("Error reading descriptor: {:#}", e), Level::Error);
			return None;
		}
	};

	let root_pngs = root_image_names(path);
	let mut layers = FolderLayers {
		name: name.to_string(),
		path: path.to_path_buf(),
		used_pngs: descriptor.references(),
		orphans: Vec::new(),
		referenced: Vec::new(),
	};

	let layers_path = path.join(LAYERS_DIR);
	if !layers_path.is_dir() {
		return Some(layers);
	}

	for (sub_name, sub_path) in subdirectories(&layers_path) {
		let by_root_image = root_pngs.contains(&format!("{}.{}", sub_name, IMAGE_EXT));
		let by_descriptor = descriptor.names().contains(&sub_name);

		if by_root_image {
			log(&format!("Subfolder {} matches root PNG in {}", sub_name, name), Level::Info);
		} else if by_descriptor {
			log(&format!("Subfolder {} matches name in {}.yy", sub_name, name), Level::Info);
		}

		if by_root_image || by_descriptor {
			layers.referenced.push(SubCollection {
				name: sub_name,
				path: sub_path,
				orphaned: false,
				images: Vec::new(),
			});
			continue;
		}

		log(&format!("Found unused layer folder: {} in {}", sub_name, name), Level::Info);
		let images = walk_images(&sub_path, log);
		layers.orphans.push(SubCollection {
			name: sub_name,
			path: sub_path,
			orphaned: true,
			images,
		});
	}

	Some(layers)
}

fn root_image_names(path: &Path) -> HashSet<String> {
	let Ok(entries) = fs::read_dir(path) else { return HashSet::new() };

	entries
		.filter_map(|e| e.ok())
		.filter(|e| e.path().is_file() && is_image(&e.path()))
		.filter_map(|e| e.file_name().to_str().map(str::to_string))
		.collect()
}

fn subdirectories(path: &Path) -> Vec<(String, PathBuf)> {
	let Ok(entries) = fs::read_dir(path) else { return Vec::new() };

	let mut dirs: Vec<(String, PathBuf)> = entries
		.filter_map(|e| e.ok())
		.filter(|e| e.path().is_dir())
		.filter_map(|e| Some((e.file_name().to_str()?.to_string(), e.path())))
		.collect();
	dirs.sort_by(|a, b| a.0.cmp(&b.0));
	dirs
}

/// Every image anywhere under `path`.
fn walk_images(path: &Path, log: LogFn) -> Vec<AssetRecord> {
	let mut images = Vec::new();

	for entry in WalkDir::new(path).sort_by_file_name() {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				log(&format!("Failed to walk {}: {}", path.display(), e), Level::Warn);
				continue;
			}
		};
		if !entry.file_type().is_file() || !is_image(entry.path()) {
			continue;
		}
		let Ok(meta) = entry.metadata() else { continue };
		images.push(AssetRecord {
			name: entry.file_name().to_string_lossy().into_owned(),
			path: entry.path().to_path_buf(),
			size: meta.len(),
			used: false,
		});
	}

	images
}
