//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the scanner, the audio output,
//! the widget and logging, plus helpers to load them from disk.

mod load;
mod schema;

pub use load::{default_state_dir, resolve_config_path};
pub use schema::*;
