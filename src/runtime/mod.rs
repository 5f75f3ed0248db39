use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioPlayer, Input, PlayerCmd, PlayerEvent};
use crate::config::LibrarySettings;
use crate::library::spawn_scan;
use crate::mpris::ControlCmd;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings.logging);

    let root = resolve_root(env::args().nth(1), &settings.library);
    log::info!("music root: {}", root.display());

    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();
    let audio_player = AudioPlayer::new(settings.audio.clone(), event_tx);

    let mut app = App::new();
    app.set_current_dir(root.display().to_string());

    let rescan = {
        let inbox = audio_player.inbox();
        let root = root.clone();
        let library = settings.library.clone();
        move || {
            let inbox = inbox.clone();
            let _ = spawn_scan(root.clone(), library.clone(), move |paths| {
                let _ = inbox.send(Input::Library(paths));
            });
        }
    };
    rescan();
    if settings.playback.autoplay {
        // Deferred by the player until the scan above lands.
        let _ = audio_player.send(PlayerCmd::Play);
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &audio_player,
        &mpris,
        &event_rx,
        &control_rx,
        &rescan,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        log::error!("event loop failed: {e}");
    }
    run_result
}

/// Pick the directory to scan: CLI argument, then `library.root`, then
/// `~/Music` when it exists, then the current directory. Relative choices
/// are made absolute against the working directory.
fn resolve_root(arg: Option<String>, library: &LibrarySettings) -> PathBuf {
    let chosen = arg.map(PathBuf::from).or_else(|| library.root.clone());
    if let Some(root) = chosen {
        return std::path::absolute(&root).unwrap_or(root);
    }
    if let Some(music) = env::var_os("HOME")
        .map(|h| Path::new(&h).join("Music"))
        .filter(|p| p.is_dir())
    {
        return music;
    }
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_root_prefers_argument_then_setting() {
        let library = LibrarySettings {
            root: Some(PathBuf::from("/from/config")),
            ..LibrarySettings::default()
        };
        assert_eq!(
            resolve_root(Some("/from/cli".into()), &library),
            PathBuf::from("/from/cli")
        );
        assert_eq!(resolve_root(None, &library), PathBuf::from("/from/config"));
    }

    #[test]
    fn resolve_root_makes_relative_choices_absolute() {
        let library = LibrarySettings {
            root: Some(PathBuf::from("tunes")),
            ..LibrarySettings::default()
        };

        let from_arg = resolve_root(Some("music".into()), &library);
        assert!(from_arg.is_absolute());
        assert!(from_arg.ends_with("music"));

        let from_config = resolve_root(None, &library);
        assert!(from_config.is_absolute());
        assert!(from_config.ends_with("tunes"));
    }
}
