//! # spritesweep
//!
//! Finds sprite images a GameMaker project no longer references and moves
//! them into an undoable trash, with optional rotating zip backups.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod processing;
pub mod storage;
pub mod trash;
pub mod ui;
