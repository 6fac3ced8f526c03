//! spritesweep - unused sprite cleanup for GameMaker projects
//!
//! Thin command-line shell over the library: loads settings, wires the
//! terminal logger and progress bar into the scan and trash core.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use spritesweep::cli::{Cli, Command};
use spritesweep::commands::{self, delete::Selection};
use spritesweep::config::{self, Settings};
use spritesweep::ui::{self, Log};

fn main() {
	let cli = Cli::parse();

	Log::set_verbose(cli.verbose);
	Log::set_timestamps(cli.timestamps);

	if let Err(e) = run(cli) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> Result<()> {
	let settings_path = cli.config.clone().unwrap_or_else(config::settings_path);
	let mut settings = Settings::load(&settings_path);
	if let Some(trash) = cli.trash {
		settings.trash_dir = Some(trash);
	}
	if let Some(backup_dir) = cli.backup_dir {
		settings.backup_dir = Some(backup_dir);
	}

	match cli.command {
		Command::Scan { directory, duplicates, verify } => {
			commands::scan::run(&directory, &settings, duplicates, verify)
		}
		Command::Layers { directory } => commands::layers::run(&directory),
		Command::Summary { directory } => commands::summary::run(&directory, &settings),
		Command::Delete {
			directory,
			paths,
			all,
			duplicates,
			layers,
			folder,
			filter,
			no_backup,
			auto_confirm,
		} => {
			let selection = Selection { paths, all, duplicates, layers, folder, filter };
			commands::delete::run(&directory, &settings, &selection, no_backup, auto_confirm)
		}
		Command::Undo => commands::undo::run(&settings),
		Command::Trash => commands::undo::list(&settings),
		Command::Backups { directory, clear, auto_confirm } => {
			commands::backups::run(&directory, &settings, clear, auto_confirm)
		}
		Command::Config { backup, max_backups, save_paths } => {
			commands::settings::run(&settings_path, settings, backup, max_backups, save_paths)
		}
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			match subcommand.as_deref().and_then(|sub| cmd.find_subcommand_mut(sub)) {
				Some(sub_cmd) => sub_cmd.print_help()?,
				None => {
					if let Some(sub) = &subcommand {
						ui::warn(&format!("Unknown subcommand: {}", sub));
					}
					Cli::command().print_help()?
				}
			}
			Ok(())
		}
	}
}
