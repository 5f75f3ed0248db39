//! Playback: the state machine, its audio output and the thread that
//! serializes everything reaching it.

mod error;
mod output;
mod player;
mod session;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;
