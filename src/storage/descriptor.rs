//! Per-folder `.yy` descriptor reading
//!
//! Descriptors are almost-JSON: the producer sometimes leaves a trailing
//! comma before a closing bracket. [`repair`] strips those before parsing.

use anyhow::{Context, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{DESCRIPTOR_EXT, IMAGE_EXT};

/// Keys a frame entry may carry its name under.
const FRAME_NAME_KEYS: &[&str] = &["name", "%Name"];

/// A parsed descriptor and the frame names it declares.
#[derive(Debug, Clone)]
pub struct Descriptor {
	names: BTreeSet<String>,
}

impl Descriptor {
	/// Repair and parse descriptor text.
	pub fn parse(text: &str) -> Result<Self> {
		let repaired = repair(text);
		let value: Value = serde_json::from_str(&repaired).context("Invalid descriptor JSON")?;
		Ok(Self { names: frame_names(&value) })
	}

	/// Read and parse a descriptor file.
	pub fn load(path: &Path) -> Result<Self> {
		let text = fs::read_to_string(path)
			.with_context(|| format!("Failed to read {}", path.display()))?;
		Self::parse(&text).with_context(|| format!("Failed to parse {}", path.display()))
	}

	/// Bare frame names, as written in the descriptor.
	pub fn names(&self) -> &BTreeSet<String> {
		&self.names
	}

	/// Image file names the descriptor keeps alive (`<name>.png`).
	pub fn references(&self) -> BTreeSet<String> {
		self.names
			.iter()
			.map(|n| format!("{}.{}", n, IMAGE_EXT))
			.collect()
	}
}

/// `<folder>/<folder>.yy`
pub fn descriptor_path(folder_path: &Path, folder_name: &str) -> PathBuf {
	folder_path.join(format!("{}.{}", folder_name, DESCRIPTOR_EXT))
}

fn frame_names(value: &Value) -> BTreeSet<String> {
	let Some(frames) = value.get("frames").and_then(Value::as_array) else {
		return BTreeSet::new();
	};

	frames
		.iter()
		.flat_map(|frame| FRAME_NAME_KEYS.iter().filter_map(move |key| frame.get(*key)))
		.filter_map(Value::as_str)
		.map(str::to_string)
		.collect()
}

/// Drop every `,` that is followed (after optional whitespace) by `]` or `}`.
///
/// Commas inside string literals are left alone.
pub fn repair(text: &str) -> Cow<'_, str> {
	let bytes = text.as_bytes();
	let mut out: Option<String> = None;
	let mut copied = 0;
	let mut in_string = false;
	let mut escaped = false;

	for (i, &b) in bytes.iter().enumerate() {
		if in_string {
			match b {
				_ if escaped => escaped = false,
				b'\\' => escaped = true,
				b'"' => in_string = false,
				_ => {}
			}
			continue;
		}

		match b {
			b'"' => in_string = true,
			b',' => {
				let next = bytes[i + 1..].iter().find(|c| !c.is_ascii_whitespace());
				if matches!(next, Some(b']') | Some(b'}')) {
					let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
					buf.push_str(&text[copied..i]);
					copied = i + 1;
				}
			}
			_ => {}
		}
	}

	match out {
		Some(mut buf) => {
			buf.push_str(&text[copied..]);
			Cow::Owned(buf)
		}
		None => Cow::Borrowed(text),
	}
}
