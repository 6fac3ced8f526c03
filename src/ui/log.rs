//! Unified logging system

use chrono::Local;
use colored::*;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::Level;

static VERBOSE: AtomicBool = AtomicBool::new(false);
static TIMESTAMPS: AtomicBool = AtomicBool::new(false);

const PROGRESS_WIDTH: usize = 30;

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}

	pub fn set_timestamps(enabled: bool) {
		TIMESTAMPS.store(enabled, Ordering::Relaxed);
	}
}

fn stamp() -> String {
	if TIMESTAMPS.load(Ordering::Relaxed) {
		format!("[{}] ", Local::now().format("%H:%M:%S").to_string().dimmed())
	} else {
		String::new()
	}
}

pub fn info(msg: &str) {
	println!("{}{} {}", stamp(), "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{}{} {}", stamp(), "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{}{} {}", stamp(), "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	println!("{}{} {}", stamp(), "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("{}{} {}", stamp(), "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", format!("─── {} ───", text).bright_blue().bold());
}

/// Logging callback for the scan and trash core.
///
/// Per-decision chatter arrives at `Info` and is only shown with `--verbose`.
pub fn emit(msg: &str, level: Level) {
	match level {
		Level::Info => debug(msg),
		Level::Success => success(msg),
		Level::Warn => warn(msg),
		Level::Error => error(msg),
	}
}

/// Progress callback: redraws a single bar line, newline at 100%.
pub fn progress(percent: f32) {
	if Log::is_verbose() {
		return;
	}
	let percent = percent.clamp(0.0, 100.0);
	let filled = ((percent / 100.0) * PROGRESS_WIDTH as f32).round() as usize;
	let bar = format!(
		"{}{}",
		"█".repeat(filled).bright_blue(),
		"░".repeat(PROGRESS_WIDTH - filled).dimmed()
	);
	print!("\r  {} {:>5.1}%", bar, percent);
	if percent >= 100.0 {
		println!();
	}
	let _ = std::io::stdout().flush();
}

/// Human-readable byte size
pub fn format_size(bytes: u64) -> String {
	const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
	let mut value = bytes as f64;
	let mut unit = 0;
	while value >= 1024.0 && unit < UNITS.len() - 1 {
		value /= 1024.0;
		unit += 1;
	}
	if unit == 0 {
		format!("{} {}", bytes, UNITS[0])
	} else {
		format!("{:.2} {}", value, UNITS[unit])
	}
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path, max_len: usize) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

	let uri = if cfg!(windows) {
		let path_str = absolute.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", absolute.display())
	};

	let filename = path
		.file_name()
		.and_then(|n| n.to_str())
		.unwrap_or("unknown");

	let display_name = if filename.chars().count() > max_len {
		let chars: Vec<char> = filename.chars().collect();
		let head: String = chars[..max_len / 2].iter().collect();
		let tail: String = chars[chars.len() - (max_len / 2).saturating_sub(3)..].iter().collect();
		format!("{}...{}", head, tail)
	} else {
		filename.to_string()
	};

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, display_name)
}
