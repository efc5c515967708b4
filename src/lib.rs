//! Username availability checks against web profile services.

pub mod cli;
pub mod config;
pub mod core;
pub mod modules;
pub mod sources;
