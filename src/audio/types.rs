//! Audio-related small types and handles.
//!
//! This module defines the player state, the commands and events that cross
//! the player thread boundary, and the shared playback snapshot.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::Track;

/// The state of the single playback session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Nothing loaded yet, or a picked file is being opened.
    #[default]
    Preparing,
    Playing,
    Paused,
    Stopped,
}

/// Commands accepted from the user or from media controls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerCmd {
    /// Resume when paused, otherwise pick a random track and play it.
    Play,
    Pause,
    Stop,
    /// Drop the current track and play another random one.
    Next,
}

/// What the decoder reports about the loaded track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderEvent {
    Prepared,
    Completed,
    Error(String),
}

/// Everything the player thread processes, in arrival order.
#[derive(Debug)]
pub enum Input {
    Command(PlayerCmd),
    Decoder(DecoderEvent),
    /// Result of a library scan: the candidate files for the next pick.
    Library(Vec<PathBuf>),
    /// Stop the thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

impl From<PlayerCmd> for Input {
    fn from(cmd: PlayerCmd) -> Self {
        Input::Command(cmd)
    }
}

/// Messages meant for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoFile,
    PlaybackError(String),
    NoOutputDevice(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoFile => write!(f, "No music file found"),
            Notice::PlaybackError(e) => write!(f, "Cannot play this file: {e}"),
            Notice::NoOutputDevice(e) => write!(f, "No audio output device: {e}"),
        }
    }
}

/// Broadcast from the player thread whenever something visible changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    StateChanged(PlayerState),
    TrackChanged(Track),
    LibraryScanned { tracks: usize },
    Notice(Notice),
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    pub state: PlayerState,
    /// Track currently loaded, if any.
    pub track: Option<Track>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
