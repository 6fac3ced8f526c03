//! Scan passes over a project's sprite folders

pub mod layers;
pub mod report;
pub mod usage;

pub use layers::{scan_layers, FolderLayers, LayerReport};
pub use report::Summary;
pub use usage::{scan_sprites, FolderUsage, UsageReport};
