use crate::app::App;
use crate::audio::PlayerState;
use crate::library::Track;
use crate::mpris::MprisHandle;

/// The widget keeps the last title after a stop; media controls only
/// advertise a track while one is loaded.
fn loaded_track(app: &App) -> Option<&Track> {
    match app.state {
        PlayerState::Playing | PlayerState::Paused => app.track.as_ref(),
        PlayerState::Stopped | PlayerState::Preparing => None,
    }
}

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    mpris.set_track(loaded_track(app));
    mpris.set_playback(app.state);
}
