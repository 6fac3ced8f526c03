// Trash sessions, zip backups, rotation and undo

mod common;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use common::{Fixture, Recorder};
use spritesweep::core::Level;
use spritesweep::trash::{self, BackupOptions, Manifest, TrashOptions};
use zip::ZipArchive;

fn options<'a>(trash_root: &'a Path, backup: Option<BackupOptions>) -> TrashOptions<'a> {
	TrashOptions { trash_root, project_name: "Game", backup }
}

fn archive_names(path: &Path) -> Vec<String> {
	let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
	let mut names: Vec<String> = (0..archive.len())
		.map(|i| archive.by_index(i).unwrap().name().to_string())
		.collect();
	names.sort();
	names
}

#[test]
fn failed_path_is_skipped_not_fatal() {
	let fx = Fixture::new();
	let a = fx.file("sprites/spr_a/a.png", 3, 1);
	let missing = fx.folder("spr_a").join("missing.png");
	let c = fx.file("sprites/spr_a/c.png", 3, 2);
	let trash_root = fx.root().join("trash");

	let rec = Recorder::default();
	let outcome = trash::move_to_trash(
		&[a.clone(), missing.clone(), c.clone()],
		&options(&trash_root, None),
		&|m: &str, l: Level| rec.log(m, l),
	)
	.unwrap();

	assert_eq!(outcome.deleted, vec![a.clone(), c.clone()]);
	assert_eq!(outcome.session.moved, outcome.deleted);
	assert!(outcome.archive.is_none());
	assert_eq!(rec.count(Level::Error), 1);
	assert!(rec.any(Level::Error, "missing.png"));

	assert!(!a.exists() && !c.exists());
	assert!(outcome.session.dir.join("a.png").is_file());
	assert!(outcome.session.dir.join("c.png").is_file());
	assert!(outcome.session.id.starts_with("delete_"));
	assert_eq!(outcome.session.dir.parent(), Some(trash_root.as_path()));
}

#[test]
fn emptied_directories_are_pruned() {
	let fx = Fixture::new();
	fx.sprite("spr_a", &[]);
	let layer = fx.file("sprites/spr_a/layers/old/deep/l.png", 1, 1);
	let trash_root = fx.root().join("trash");

	trash::move_to_trash(&[layer.clone()], &options(&trash_root, None), &|_: &str, _: Level| {}).unwrap();

	assert!(!fx.folder("spr_a").join("layers").exists());
	assert!(fx.folder("spr_a").join("spr_a.yy").exists());
}

#[test]
fn nothing_moved_leaves_no_session() {
	let fx = Fixture::new();
	let trash_root = fx.root().join("trash");

	let outcome = trash::move_to_trash(
		&[fx.root().join("nope.png")],
		&options(&trash_root, None),
		&|_: &str, _: Level| {},
	)
	.unwrap();

	assert!(outcome.deleted.is_empty());
	assert!(trash::list_sessions(&trash_root).unwrap().is_empty());
}

#[test]
fn backup_archive_mirrors_session() {
	let fx = Fixture::new();
	let a = fx.file("sprites/spr_a/a.png", 5, 1);
	let other = fx.file("sprites/spr_b/a.png", 6, 2);
	let layer = fx.folder("spr_a").join("layers").join("orphan");
	fx.file("sprites/spr_a/layers/orphan/x.png", 7, 3);
	fx.file("sprites/spr_a/layers/orphan/sub/y.png", 8, 4);
	let trash_root = fx.root().join("trash");
	let backup_dir = fx.root().join("backups");

	let outcome = trash::move_to_trash(
		&[a, other, layer],
		&options(&trash_root, Some(BackupOptions { dir: backup_dir.clone(), max_kept: 3 })),
		&|_: &str, _: Level| {},
	)
	.unwrap();

	let archive = outcome.archive.unwrap();
	let expected_name = format!("Game_{}.zip", outcome.session.id.trim_start_matches("delete_"));
	assert_eq!(archive, backup_dir.join(expected_name));
	assert_eq!(
		archive_names(&archive),
		vec!["Game/1_a.png", "Game/a.png", "Game/orphan/sub/y.png", "Game/orphan/x.png"]
	);
}

#[test]
fn backup_failure_is_a_warning_and_keeps_the_move() {
	let fx = Fixture::new();
	let a = fx.file("sprites/spr_a/a.png", 3, 1);
	let trash_root = fx.root().join("trash");
	let not_a_dir = fx.file("backups", 1, 0);

	let rec = Recorder::default();
	let outcome = trash::move_to_trash(
		&[a.clone()],
		&options(&trash_root, Some(BackupOptions { dir: not_a_dir.clone(), max_kept: 3 })),
		&|m: &str, l: Level| rec.log(m, l),
	)
	.unwrap();

	assert_eq!(outcome.deleted, vec![a.clone()]);
	assert!(outcome.archive.is_none());
	assert_eq!(rec.count(Level::Warn), 1);
	assert_eq!(rec.count(Level::Error), 0);
	assert!(!a.exists());
	assert!(outcome.session.dir.join("a.png").is_file());
	assert!(not_a_dir.is_file());
}

#[test]
fn undo_restores_and_removes_session() {
	let fx = Fixture::new();
	let d = fx.folder("spr_a");
	let a = fx.file("sprites/spr_a/a.png", 2, 1);
	let b = fx.file("sprites/spr_a/b.png", 3, 2);
	let trash_root = fx.root().join("trash");
	let quiet = |_: &str, _: Level| {};

	let outcome = trash::move_to_trash(&[a.clone(), b.clone()], &options(&trash_root, None), &quiet).unwrap();
	assert_eq!(outcome.deleted.len(), 2);
	assert!(!d.exists(), "emptied folder is pruned");

	assert!(trash::undo_last(&trash_root, fx.root(), &quiet).unwrap());
	assert_eq!(fs::read(&a).unwrap(), vec![1, 1]);
	assert_eq!(fs::read(&b).unwrap(), vec![2, 2, 2]);
	assert!(trash::list_sessions(&trash_root).unwrap().is_empty());

	let before: Vec<PathBuf> = fs::read_dir(&d).unwrap().map(|e| e.unwrap().path()).collect();
	assert!(!trash::undo_last(&trash_root, fx.root(), &quiet).unwrap());
	let after: Vec<PathBuf> = fs::read_dir(&d).unwrap().map(|e| e.unwrap().path()).collect();
	assert_eq!(before.len(), after.len());

	let never_used = fx.root().join("no-trash-here");
	assert!(!trash::undo_last(&never_used, fx.root(), &quiet).unwrap());
	assert!(!never_used.exists());
}

#[test]
fn undo_puts_entries_back_in_their_own_folders() {
	let fx = Fixture::new();
	let first = fx.file("sprites/spr_a/frame.png", 1, 1);
	let second = fx.file("sprites/spr_b/frame.png", 2, 2);
	let layer = fx.folder("spr_c").join("layers").join("old");
	fx.file("sprites/spr_c/layers/old/l.png", 3, 3);
	let trash_root = fx.root().join("trash");
	let quiet = |_: &str, _: Level| {};

	let outcome =
		trash::move_to_trash(&[first.clone(), second.clone(), layer.clone()], &options(&trash_root, None), &quiet)
			.unwrap();

	let manifest = Manifest::load(&outcome.session.dir).unwrap();
	assert_eq!(manifest.project, "Game");
	assert_eq!(manifest.original_of("frame.png"), Some(first.as_path()));
	assert_eq!(manifest.original_of("1_frame.png"), Some(second.as_path()));
	assert!(manifest.entries[2].is_dir);

	assert!(trash::undo_last(&trash_root, fx.root(), &quiet).unwrap());
	assert_eq!(fs::read(&first).unwrap(), vec![1]);
	assert_eq!(fs::read(&second).unwrap(), vec![2, 2]);
	assert!(layer.join("l.png").is_file());
}

#[test]
fn undo_without_manifest_restores_flat_and_never_overwrites() {
	let fx = Fixture::new();
	let trash_root = fx.root().join("trash");
	let session = trash_root.join("delete_20260101_000000");
	fs::create_dir_all(&session).unwrap();
	fs::write(session.join("a.png"), b"old").unwrap();
	fs::write(session.join("b.png"), b"old").unwrap();
	let restore_to = fx.root().join("here");
	fs::create_dir_all(&restore_to).unwrap();
	fs::write(restore_to.join("b.png"), b"new").unwrap();

	let rec = Recorder::default();
	assert!(trash::undo_last(&trash_root, &restore_to, &|m: &str, l: Level| rec.log(m, l)).unwrap());

	assert_eq!(fs::read(restore_to.join("a.png")).unwrap(), b"old");
	assert_eq!(fs::read(restore_to.join("b.png")).unwrap(), b"new");
	assert!(session.join("b.png").exists(), "conflicting entry stays in the trash");
	assert!(rec.any(Level::Error, "b.png"));
}

#[cfg(target_os = "linux")]
#[test]
fn undo_restores_names_that_are_not_utf8() {
	use std::ffi::OsStr;
	use std::os::unix::ffi::OsStrExt;

	let fx = Fixture::new();
	let trash_root = fx.root().join("trash");
	let session = trash_root.join("delete_20260101_000000");
	fs::create_dir_all(&session).unwrap();
	let odd = OsStr::from_bytes(b"frame_\xff.png");
	fs::write(session.join(odd), b"px").unwrap();
	fs::write(session.join("plain.png"), b"px").unwrap();
	let out = fx.root().join("out");
	fs::create_dir(&out).unwrap();

	assert!(trash::undo_last(&trash_root, &out, &|_: &str, _: Level| {}).unwrap());

	assert_eq!(fs::read(out.join(odd)).unwrap(), b"px");
	assert!(out.join("plain.png").is_file());
	assert!(!session.exists());
}

#[test]
fn undo_picks_the_latest_session() {
	let fx = Fixture::new();
	let trash_root = fx.root().join("trash");
	for (id, file) in [
		("delete_20260101_000000", "old.png"),
		("delete_20260101_000000_001", "newer.png"),
		("delete_20250101_235959", "oldest.png"),
	] {
		fs::create_dir_all(trash_root.join(id)).unwrap();
		fs::write(trash_root.join(id).join(file), b"x").unwrap();
	}
	let out = fx.root().join("out");
	fs::create_dir(&out).unwrap();

	assert!(trash::undo_last(&trash_root, &out, &|_: &str, _: Level| {}).unwrap());
	assert!(out.join("newer.png").exists());
	assert!(!out.join("old.png").exists());
	assert_eq!(trash::list_sessions(&trash_root).unwrap().len(), 2);
}

#[test]
fn rotation_keeps_the_newest() {
	let dir = tempfile::tempdir().unwrap();
	let stamps = [
		"20260103_000000",
		"20260101_000000",
		"20260105_000000",
		"20260102_000000",
		"20260104_000000",
	];
	for stamp in stamps {
		fs::write(dir.path().join(format!("P_{}.zip", stamp)), b"zip").unwrap();
	}
	fs::write(dir.path().join("Q_20260101_000000.zip"), b"zip").unwrap();

	let removed = trash::rotate(dir.path(), "P", 3);
	assert_eq!(
		removed,
		vec![dir.path().join("P_20260101_000000.zip"), dir.path().join("P_20260102_000000.zip")]
	);
	let left: Vec<PathBuf> = trash::list_archives(dir.path(), "P");
	assert_eq!(
		left,
		vec![
			dir.path().join("P_20260103_000000.zip"),
			dir.path().join("P_20260104_000000.zip"),
			dir.path().join("P_20260105_000000.zip"),
		]
	);

	assert_eq!(trash::rotate(dir.path(), "P", 0).len(), 3);
	assert!(trash::list_archives(dir.path(), "P").is_empty());
	assert!(dir.path().join("Q_20260101_000000.zip").exists());
}

#[test]
fn rotation_clears_all_five_with_zero() {
	let dir = tempfile::tempdir().unwrap();
	for day in 1..=5 {
		fs::write(dir.path().join(format!("P_2026010{}_120000.zip", day)), b"zip").unwrap();
	}
	assert_eq!(trash::rotate(dir.path(), "P", 0).len(), 5);
	assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn deleting_runs_rotation() {
	let fx = Fixture::new();
	let trash_root = fx.root().join("trash");
	let backup_dir = fx.root().join("backups");
	fs::create_dir_all(&backup_dir).unwrap();
	for day in 1..=3 {
		fs::write(backup_dir.join(format!("Game_2020010{}_000000.zip", day)), b"zip").unwrap();
	}
	let a = fx.file("sprites/spr_a/a.png", 1, 1);

	let outcome = trash::move_to_trash(
		&[a],
		&options(&trash_root, Some(BackupOptions { dir: backup_dir.clone(), max_kept: 2 })),
		&|_: &str, _: Level| {},
	)
	.unwrap();

	let left = trash::list_archives(&backup_dir, "Game");
	assert_eq!(left.len(), 2);
	assert_eq!(left[0], backup_dir.join("Game_20200103_000000.zip"));
	assert_eq!(left.last(), outcome.archive.as_ref());
}
