//! Widget model: mirrors the player's broadcasts for the terminal panel.

mod model;

pub use model::*;
