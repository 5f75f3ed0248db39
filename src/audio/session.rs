//! The playback state machine.
//!
//! A `Session` owns the output and the candidate list and is only ever driven
//! from the player thread, so every transition is serialized. Decoder events
//! (prepared, completed, error) are fed back through [`Session::handle`] like
//! any other input.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;

use rand::Rng;

use crate::library::Track;
use crate::shuffle;

use super::output::Output;
use super::types::{DecoderEvent, Input, Notice, PlaybackHandle, PlayerCmd, PlayerEvent, PlayerState};

pub struct Session<O: Output, R: Rng> {
    output: O,
    rng: R,
    /// `None` until the first scan has been delivered.
    library: Option<Vec<PathBuf>>,
    state: PlayerState,
    current: Option<Track>,
    /// A play request that arrived before the library was known.
    pending_play: bool,
    events: Sender<PlayerEvent>,
    info: PlaybackHandle,
}

impl<O: Output, R: Rng> Session<O, R> {
    pub fn new(output: O, rng: R, events: Sender<PlayerEvent>, info: PlaybackHandle) -> Self {
        let session = Self {
            output,
            rng,
            library: None,
            state: PlayerState::Preparing,
            current: None,
            pending_play: false,
            events,
            info,
        };
        session.publish();
        session
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Process one input. `Input::Quit` is handled by [`Session::shutdown`].
    pub fn handle(&mut self, input: Input) {
        match input {
            Input::Command(cmd) => self.command(cmd),
            Input::Decoder(ev) => self.decoder(ev),
            Input::Library(paths) => self.set_library(paths),
            Input::Quit { fade_out_ms } => self.shutdown(Duration::from_millis(fade_out_ms)),
        }
    }

    /// Periodic check: turns the end of the current track into a
    /// `Completed` event and refreshes the elapsed time.
    pub fn poll(&mut self) {
        if self.state == PlayerState::Playing && self.output.finished() {
            self.decoder(DecoderEvent::Completed);
            return;
        }
        if let Ok(mut info) = self.info.lock() {
            info.elapsed = self.output.position();
        }
    }

    pub fn shutdown(&mut self, fade_out: Duration) {
        self.output.fade_out(fade_out);
        self.output.release();
        self.current = None;
        self.pending_play = false;
        self.set_state(PlayerState::Stopped);
    }

    fn command(&mut self, cmd: PlayerCmd) {
        log::debug!("{cmd:?} in {:?}", self.state);
        match cmd {
            PlayerCmd::Play => self.play(),
            PlayerCmd::Pause => self.pause(),
            PlayerCmd::Stop => self.stop(),
            PlayerCmd::Next => self.next(),
        }
    }

    fn play(&mut self) {
        match self.state {
            PlayerState::Paused => {
                self.output.start();
                self.set_state(PlayerState::Playing);
            }
            PlayerState::Playing => {}
            PlayerState::Preparing | PlayerState::Stopped => {
                self.pick_and_load();
            }
        }
    }

    fn pause(&mut self) {
        if self.state == PlayerState::Playing {
            self.output.pause();
            self.set_state(PlayerState::Paused);
        }
    }

    fn stop(&mut self) {
        self.pending_play = false;
        self.output.stop();
        self.output.release();
        self.current = None;
        self.set_state(PlayerState::Stopped);
    }

    fn next(&mut self) {
        if self.library.is_none() {
            self.pending_play = true;
            return;
        }
        self.output.release();
        self.current = None;
        if !self.pick_and_load() {
            self.set_state(PlayerState::Stopped);
        }
    }

    /// Pick a random candidate and start loading it. Returns false when there
    /// was nothing to pick; the state is left untouched in that case.
    fn pick_and_load(&mut self) -> bool {
        let Some(library) = &self.library else {
            log::info!("play requested before the library scan finished");
            self.pending_play = true;
            return false;
        };
        let Some(path) = shuffle::pick(library, &mut self.rng).cloned() else {
            log::warn!("no playable files in library");
            self.notify(Notice::NoFile);
            return false;
        };

        self.output.release();
        self.current = Some(Track::load(&path));
        self.set_state(PlayerState::Preparing);

        log::info!("loading {}", path.display());
        match self.output.load(&path) {
            Ok(()) => self.decoder(DecoderEvent::Prepared),
            Err(e) => self.decoder(DecoderEvent::Error(e.to_string())),
        }
        true
    }

    fn decoder(&mut self, ev: DecoderEvent) {
        match ev {
            DecoderEvent::Prepared => {
                if self.state != PlayerState::Preparing {
                    return;
                }
                self.output.start();
                if let Some(track) = self.current.clone() {
                    self.emit(PlayerEvent::TrackChanged(track));
                }
                self.set_state(PlayerState::Playing);
            }
            DecoderEvent::Completed => {
                if self.state != PlayerState::Playing {
                    return;
                }
                if let Some(t) = &self.current {
                    log::debug!("finished {}", t.path.display());
                }
                self.output.release();
                self.current = None;
                if !self.pick_and_load() {
                    self.set_state(PlayerState::Stopped);
                }
            }
            DecoderEvent::Error(msg) => {
                log::error!("playback error: {msg}");
                self.notify(Notice::PlaybackError(msg));
                self.output.release();
                self.current = None;
                self.set_state(PlayerState::Stopped);
            }
        }
    }

    fn set_library(&mut self, paths: Vec<PathBuf>) {
        let tracks = paths.len();
        self.library = Some(paths);
        self.emit(PlayerEvent::LibraryScanned { tracks });

        if std::mem::take(&mut self.pending_play)
            && matches!(self.state, PlayerState::Preparing | PlayerState::Stopped)
        {
            self.pick_and_load();
        }
    }

    fn set_state(&mut self, state: PlayerState) {
        let changed = self.state != state;
        self.state = state;
        self.publish();
        if changed {
            self.emit(PlayerEvent::StateChanged(state));
        }
    }

    fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            info.state = self.state;
            if info.track.as_ref().map(|t| &t.path) != self.current.as_ref().map(|t| &t.path) {
                info.track = self.current.clone();
                info.elapsed = Duration::ZERO;
            }
        }
    }

    fn notify(&self, notice: Notice) {
        self.emit(PlayerEvent::Notice(notice));
    }

    fn emit(&self, event: PlayerEvent) {
        // The UI may already be gone during shutdown.
        let _ = self.events.send(event);
    }
}
