//! The decoder/sink seam the session drives.
//!
//! `Output` is what the state machine needs from an audio backend;
//! `RodioOutput` implements it on top of a single `rodio` output stream.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use super::error::{PlayerError, PlayerResult};

const FADE_STEPS: u32 = 20;

pub trait Output {
    /// Open and decode `path`, leaving it paused at the start.
    fn load(&mut self, path: &Path) -> PlayerResult<()>;
    fn start(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Drop whatever is loaded.
    fn release(&mut self);
    /// True once the loaded track has played to its end.
    fn finished(&self) -> bool;
    fn position(&self) -> Duration;
    /// Lower the volume to silence over `over`, then stop.
    fn fade_out(&mut self, _over: Duration) {
        self.stop();
    }
}

pub struct RodioOutput {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioOutput {
    pub fn open_default(volume: f32) -> PlayerResult<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::NoOutputDevice(e.to_string()))?;
        // rodio logs to stderr when the stream is dropped, which would land on
        // top of the terminal UI.
        stream.log_on_drop(false);
        Ok(Self {
            stream,
            sink: None,
            volume,
        })
    }
}

impl Output for RodioOutput {
    fn load(&mut self, path: &Path) -> PlayerResult<()> {
        self.release();

        let file = File::open(path).map_err(|source| PlayerError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| PlayerError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(source);
        self.sink = Some(sink);
        Ok(())
    }

    fn start(&mut self) {
        if let Some(s) = &self.sink {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = &self.sink {
            s.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(s) = &self.sink {
            s.stop();
        }
    }

    fn release(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.empty())
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|s| s.get_pos())
            .unwrap_or(Duration::ZERO)
    }

    fn fade_out(&mut self, over: Duration) {
        let Some(sink) = &self.sink else {
            return;
        };
        if !over.is_zero() && !sink.is_paused() {
            let step = (over / FADE_STEPS).max(Duration::from_millis(1));
            for i in 1..=FADE_STEPS {
                let t = i as f32 / FADE_STEPS as f32;
                sink.set_volume(self.volume * (1.0 - t));
                thread::sleep(step);
            }
        }
        sink.set_volume(0.0);
        self.release();
    }
}
