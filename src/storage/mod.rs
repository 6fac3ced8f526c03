//! Project files on disk: master `.yyp` and per-folder `.yy` descriptors

pub mod descriptor;
pub mod project;

pub use descriptor::{descriptor_path, repair, Descriptor};
pub use project::{asset_folders, find_master, master_sprite_folders, require_container, Project};
