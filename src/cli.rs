use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

fn parse_toggle(s: &str) -> Result<bool, String> {
	match s.to_ascii_lowercase().as_str() {
		"on" | "true" | "yes" | "1" => Ok(true),
		"off" | "false" | "no" | "0" => Ok(false),
		_ => Err(format!("'{}' is not on/off", s)),
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.usage(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.literal(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.placeholder(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
		.valid(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
}

#[derive(Parser, Debug)]
#[command(
	name = "spritesweep",
	author,
	version,
	about = "Find and safely trash unused sprite images in GameMaker projects",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {scan}    {scan_args}        {scan_desc}
  {bin} {layers}  {layers_args}                 {layers_desc}
  {bin} {delete}  {delete_args}  {delete_desc}
  {bin} {undo}                           {undo_desc}
  {bin} {backups} {backups_args}       {backups_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "spritesweep".bright_blue(),
		scan = "scan".yellow(),
		scan_args = "-d ./MyGame --duplicates",
		scan_desc = "Report unused sprite frames".dimmed(),
		layers = "layers".yellow(),
		layers_args = "-d ./MyGame",
		layers_desc = "Report orphaned layer folders".dimmed(),
		delete = "delete".yellow(),
		delete_args = "-d ./MyGame --duplicates -y",
		delete_desc = "Trash unused same-size frames".dimmed(),
		undo = "undo".yellow(),
		undo_desc = "Restore the last delete".dimmed(),
		backups = "backups".yellow(),
		backups_args = "-d ./MyGame --clear",
		backups_desc = "Remove all zip backups".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Prefix log lines with the time
	#[arg(long = "timestamps", global = true)]
	pub timestamps: bool,

	/// Settings file (default: ~/.spritesweep.json)
	#[arg(long = "config", global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Trash folder (default: ./_SpriteSweep_Trash)
	#[arg(long = "trash", global = true, value_name = "PATH")]
	pub trash: Option<PathBuf>,

	/// Backup folder for zip archives
	#[arg(long = "backup-dir", global = true, value_name = "PATH")]
	pub backup_dir: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Report sprite frames no descriptor references
	Scan {
		/// Project directory or .yyp file
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,

		/// List same-size files per folder
		#[arg(long = "duplicates")]
		duplicates: bool,

		/// Confirm same-size files by content hash
		#[arg(long = "verify", requires = "duplicates")]
		verify: bool,
	},

	/// Report layer folders nothing refers to
	Layers {
		/// Project directory or .yyp file
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,
	},

	/// Scan sprites and layers, then print totals
	Summary {
		/// Project directory or .yyp file
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,
	},

	/// Move unused files to the trash
	Delete {
		/// Project directory or .yyp file
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,

		/// Explicit files or folders to trash
		#[arg(value_name = "PATH", conflicts_with_all = ["all", "duplicates", "layers"])]
		paths: Vec<PathBuf>,

		/// Every unused sprite frame
		#[arg(short = 'a', long = "all")]
		all: bool,

		/// Only unused frames sharing their size with another file in the folder
		#[arg(long = "duplicates", conflicts_with = "all")]
		duplicates: bool,

		/// Orphaned layer folders instead of sprite frames
		#[arg(short = 'l', long = "layers", conflicts_with_all = ["all", "duplicates"])]
		layers: bool,

		/// Restrict to one sprite folder
		#[arg(short = 'f', long = "folder", value_name = "NAME")]
		folder: Option<String>,

		/// Only names containing this text (case-insensitive)
		#[arg(long = "filter", value_name = "TEXT")]
		filter: Option<String>,

		/// Skip the zip backup for this delete
		#[arg(long = "no-backup")]
		no_backup: bool,

		/// Don't ask for confirmation
		#[arg(short = 'y', long = "yes")]
		auto_confirm: bool,
	},

	/// Restore the most recent delete
	Undo,

	/// List trash sessions, newest first
	Trash,

	/// List or clear a project's zip backups
	Backups {
		/// Project directory or .yyp file
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,

		/// Delete every backup of the project
		#[arg(long = "clear")]
		clear: bool,

		/// Don't ask for confirmation
		#[arg(short = 'y', long = "yes")]
		auto_confirm: bool,
	},

	/// Show or change saved settings
	Config {
		/// Zip backups on delete: on/off
		#[arg(long = "backup", value_parser = parse_toggle)]
		backup: Option<bool>,

		/// Backups kept per project
		#[arg(long = "max-backups")]
		max_backups: Option<usize>,

		/// Save --trash and --backup-dir as defaults
		#[arg(long = "save-paths")]
		save_paths: bool,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
