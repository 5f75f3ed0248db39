use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::AudioSettings;

use super::output::RodioOutput;
use super::session::Session;
use super::types::{Input, Notice, PlaybackHandle, PlayerEvent};

/// How often the thread checks for the end of a track when idle.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub(super) fn spawn_audio_thread(
    rx: Receiver<Input>,
    events: Sender<PlayerEvent>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let output = match RodioOutput::open_default(audio_settings.volume) {
            Ok(o) => o,
            Err(e) => {
                log::error!("{e}");
                let _ = events.send(PlayerEvent::Notice(Notice::NoOutputDevice(e.to_string())));
                return;
            }
        };

        let mut session = Session::new(output, rand::rng(), events, playback_info);
        run(&mut session, &rx);
        log::debug!("audio thread exiting");
    })
}

/// Drive `session` from `rx` until `Quit` arrives or every sender is gone.
pub(super) fn run<O, R>(session: &mut Session<O, R>, rx: &Receiver<Input>)
where
    O: super::output::Output,
    R: rand::Rng,
{
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(Input::Quit { fade_out_ms }) => {
                session.shutdown(Duration::from_millis(fade_out_ms));
                break;
            }
            Ok(input) => session.handle(input),
            Err(RecvTimeoutError::Timeout) => session.poll(),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
