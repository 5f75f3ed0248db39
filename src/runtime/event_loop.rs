use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioPlayer, PlaybackInfo, PlayerCmd, PlayerEvent};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// What a key press asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Control(ControlCmd),
    Rescan,
    None,
}

fn key_action(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('p') => KeyAction::Control(ControlCmd::Play),
        KeyCode::Char('P') => KeyAction::Control(ControlCmd::Pause),
        KeyCode::Char(' ') => KeyAction::Control(ControlCmd::PlayPause),
        KeyCode::Char('s') => KeyAction::Control(ControlCmd::Stop),
        KeyCode::Char('n') => KeyAction::Control(ControlCmd::Next),
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Control(ControlCmd::Quit),
        KeyCode::Char('r') => KeyAction::Rescan,
        _ => KeyAction::None,
    }
}

/// Map a control request to the player command it stands for. `None` for quit.
fn player_cmd(cmd: &ControlCmd, app: &App) -> Option<PlayerCmd> {
    match cmd {
        ControlCmd::Quit => None,
        ControlCmd::Play => Some(PlayerCmd::Play),
        ControlCmd::Pause => Some(PlayerCmd::Pause),
        ControlCmd::PlayPause => Some(app.toggle_cmd()),
        ControlCmd::Stop => Some(PlayerCmd::Stop),
        ControlCmd::Next => Some(PlayerCmd::Next),
    }
}

/// Main terminal event loop: applies player broadcasts, draws the widget,
/// and forwards keys and media-control requests to the player. Returns
/// `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    event_rx: &mpsc::Receiver<PlayerEvent>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    rescan: &dyn Fn(),
) -> Result<(), Box<dyn std::error::Error>> {
    let playback = audio_player.playback_handle();

    loop {
        let now = Instant::now();
        let mut changed = false;
        while let Ok(ev) = event_rx.try_recv() {
            changed |= matches!(
                ev,
                PlayerEvent::StateChanged(_) | PlayerEvent::TrackChanged(_)
            );
            app.apply(&ev, now);
        }
        // Keep MPRIS in sync with whatever the player broadcast, including
        // auto-advance at the end of a track.
        if changed {
            update_mpris(mpris, app);
        }

        let snapshot = playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_else(|_| PlaybackInfo::default());
        terminal.draw(|f| ui::draw(f, app, &snapshot, &settings.widget, now))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, audio_player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key_action(&key) {
                    KeyAction::Control(cmd) => {
                        if handle_control_cmd(cmd, settings, app, audio_player) {
                            return Ok(());
                        }
                    }
                    KeyAction::Rescan => {
                        app.start_rescan();
                        rescan();
                    }
                    KeyAction::None => {}
                }
            }
        }
    }
}

/// Returns true when the app should exit.
fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &App,
    audio_player: &AudioPlayer,
) -> bool {
    match player_cmd(&cmd, app) {
        Some(pc) => {
            if let Err(e) = audio_player.send(pc) {
                log::warn!("player thread gone, dropping {pc:?}: {e}");
            }
            false
        }
        None => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::PlayerState;
    use crossterm::event::KeyModifiers;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_controls() {
        assert_eq!(key_action(&key('p')), KeyAction::Control(ControlCmd::Play));
        assert_eq!(key_action(&key('P')), KeyAction::Control(ControlCmd::Pause));
        assert_eq!(
            key_action(&key(' ')),
            KeyAction::Control(ControlCmd::PlayPause)
        );
        assert_eq!(key_action(&key('s')), KeyAction::Control(ControlCmd::Stop));
        assert_eq!(key_action(&key('n')), KeyAction::Control(ControlCmd::Next));
        assert_eq!(key_action(&key('q')), KeyAction::Control(ControlCmd::Quit));
        assert_eq!(key_action(&key('r')), KeyAction::Rescan);
        assert_eq!(key_action(&key('x')), KeyAction::None);
    }

    #[test]
    fn play_pause_depends_on_current_state() {
        let mut app = App::new();
        app.state = PlayerState::Playing;
        assert_eq!(
            player_cmd(&ControlCmd::PlayPause, &app),
            Some(PlayerCmd::Pause)
        );
        app.state = PlayerState::Stopped;
        assert_eq!(
            player_cmd(&ControlCmd::PlayPause, &app),
            Some(PlayerCmd::Play)
        );
        assert_eq!(player_cmd(&ControlCmd::Quit, &app), None);
    }
}
