//! Widget model: `App` and the button strip.
//!
//! The `App` struct mirrors what the player has broadcast (state, current
//! track, library size) plus the transient message line.

use std::time::{Duration, Instant};

use crate::audio::{Notice, PlayerCmd, PlayerEvent, PlayerState};
use crate::library::Track;

/// One of the three widget buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    /// Highlighted with the accent color.
    pub active: bool,
}

impl Button {
    const fn new(label: &'static str, active: bool) -> Self {
        Self { label, active }
    }
}

/// Labels and highlight for the Play, Pause and Stop buttons in `state`.
///
/// The button matching the current state reads as a status ("Playing",
/// "Paused", "Stopped") and is the only one highlighted.
pub fn buttons(state: PlayerState) -> [Button; 3] {
    match state {
        PlayerState::Playing => [
            Button::new("Playing", true),
            Button::new("Pause", false),
            Button::new("Stop", false),
        ],
        PlayerState::Paused => [
            Button::new("Play", false),
            Button::new("Paused", true),
            Button::new("Stop", false),
        ],
        PlayerState::Stopped => [
            Button::new("Play", false),
            Button::new("Pause", false),
            Button::new("Stopped", true),
        ],
        PlayerState::Preparing => [
            Button::new("Play", false),
            Button::new("Pause", false),
            Button::new("Stop", false),
        ],
    }
}

/// The main widget model.
#[derive(Default)]
pub struct App {
    pub state: PlayerState,
    /// Last track the player announced; kept after stop so the title stays.
    pub track: Option<Track>,
    /// `None` while a scan is running.
    pub track_count: Option<usize>,
    pub current_dir: Option<String>,

    message: Option<(String, Instant)>,
    /// A notice that never expires: the player could not start at all.
    fault: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the scanned directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    /// Mark a library scan as in flight.
    pub fn start_rescan(&mut self) {
        self.track_count = None;
    }

    /// Fold one player broadcast into the model.
    pub fn apply(&mut self, event: &PlayerEvent, now: Instant) {
        match event {
            PlayerEvent::StateChanged(state) => self.state = *state,
            PlayerEvent::TrackChanged(track) => self.track = Some(track.clone()),
            PlayerEvent::LibraryScanned { tracks } => self.track_count = Some(*tracks),
            PlayerEvent::Notice(notice) => {
                if let Notice::NoOutputDevice(_) = notice {
                    self.fault = Some(notice.to_string());
                }
                self.message = Some((notice.to_string(), now));
            }
        }
    }

    /// The message line, if one was posted less than `timeout` ago, else
    /// the standing fault.
    pub fn message(&self, now: Instant, timeout: Duration) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|(_, at)| now.saturating_duration_since(*at) < timeout)
            .map(|(text, _)| text.as_str())
            .or(self.fault.as_deref())
    }

    /// The command a single play/pause toggle should send.
    pub fn toggle_cmd(&self) -> PlayerCmd {
        match self.state {
            PlayerState::Playing => PlayerCmd::Pause,
            PlayerState::Paused | PlayerState::Stopped | PlayerState::Preparing => PlayerCmd::Play,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.name.as_str())
    }

    pub fn album_title(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.album_title())
    }
}
