use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::thread::spawn_audio_thread;
use super::types::{Input, PlaybackHandle, PlaybackInfo, PlayerCmd, PlayerEvent};

/// Handle to the player thread.
pub struct AudioPlayer {
    tx: Sender<Input>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings, events: Sender<PlayerEvent>) -> Self {
        let (tx, rx) = mpsc::channel::<Input>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, events, playback_info.clone(), audio_settings);

        Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    /// A sender other threads (the scan worker) can use to reach the player.
    pub fn inbox(&self) -> Sender<Input> {
        self.tx.clone()
    }

    pub fn send(&self, cmd: PlayerCmd) -> Result<(), mpsc::SendError<Input>> {
        self.tx.send(Input::Command(cmd))
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.tx.send(Input::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
