//! Music library: discovering playable files and describing them as tracks.

mod model;
mod scan;

pub use model::Track;
pub use scan::{scan, spawn_scan};

#[cfg(test)]
mod tests;
