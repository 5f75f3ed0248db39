//! UI rendering for the terminal widget.
//!
//! This module draws the header, the Play/Pause/Stop strip, the now-playing
//! box and the message line using `ratatui`.

use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, buttons};
use crate::audio::PlaybackInfo;
use crate::config::WidgetSettings;

const ACCENT: Color = Color::Yellow;

const CONTROLS: &[(&str, &str)] = &[
    ("p", "play"),
    ("P", "pause"),
    ("space", "play/pause"),
    ("s", "stop"),
    ("n", "another song"),
    ("r", "rescan"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn library_text(app: &App) -> String {
    let count = match app.track_count {
        Some(1) => "1 song".to_string(),
        Some(n) => format!("{n} songs"),
        None => "scanning...".to_string(),
    };
    match &app.current_dir {
        Some(dir) => format!("{count} in {dir}"),
        None => count,
    }
}

/// Render the whole widget into `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    playback: &PlaybackInfo,
    settings: &WidgetSettings,
    now: Instant,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(if settings.show_album { 5 } else { 4 }),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" shufflebox ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Button strip
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[1]);
    for (button, area) in buttons(app.state).iter().zip(cells.iter()) {
        let style = if button.active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(button.label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(widget, *area);
    }

    // Now playing
    let mut lines = vec![app.file_name().unwrap_or("-").to_string()];
    if settings.show_album {
        lines.push(app.album_title().unwrap_or("-").to_string());
    }
    if playback.track.is_some() {
        let elapsed = format_mmss(playback.elapsed);
        let time = match playback.track.as_ref().and_then(|t| t.duration) {
            Some(total) => format!("{elapsed} / {}", format_mmss(total)),
            None => elapsed,
        };
        lines.push(time);
    }
    let now_playing = Paragraph::new(lines.join("\n"))
        .block(
            Block::bordered()
                .padding(Padding::left(1))
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[2]);

    let status = match app.message(now, Duration::from_millis(settings.message_timeout_ms)) {
        Some(msg) => Paragraph::new(msg).style(Style::default().fg(ACCENT)),
        None => Paragraph::new(library_text(app)),
    };
    frame.render_widget(
        status
            .block(Block::bordered().padding(Padding::left(1)).title(" status "))
            .wrap(Wrap { trim: true }),
        chunks[3],
    );

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{Notice, PlayerEvent, PlayerState};
    use crate::library::Track;
    use ratatui::{Terminal, backend::TestBackend};
    use std::path::Path;

    fn render(app: &App, playback: &PlaybackInfo, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 22)).unwrap();
        terminal
            .draw(|f| draw(f, app, playback, &WidgetSettings::default(), now))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn format_mmss_pads() {
        assert_eq!(format_mmss(Duration::from_secs(0)), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
    }

    #[test]
    fn renders_stopped_buttons_and_library_line() {
        let mut app = App::new();
        app.set_current_dir("/music".into());
        let now = Instant::now();
        app.apply(&PlayerEvent::StateChanged(PlayerState::Stopped), now);
        app.apply(&PlayerEvent::LibraryScanned { tracks: 3 }, now);

        let screen = render(&app, &PlaybackInfo::default(), now);
        assert!(screen.contains("Stopped"));
        assert!(screen.contains("Play"));
        assert!(screen.contains("3 songs in /music"));
    }

    #[test]
    fn renders_now_playing_and_notice() {
        let mut app = App::new();
        let now = Instant::now();
        let mut track = Track::bare(Path::new("/m/Blue.mp3"));
        track.album = Some("Kind".into());
        track.duration = Some(Duration::from_secs(125));
        app.apply(&PlayerEvent::TrackChanged(track.clone()), now);
        app.apply(&PlayerEvent::StateChanged(PlayerState::Playing), now);
        app.apply(&PlayerEvent::Notice(Notice::NoFile), now);

        let playback = PlaybackInfo {
            state: PlayerState::Playing,
            track: Some(track),
            elapsed: Duration::from_secs(61),
        };
        let screen = render(&app, &playback, now);
        assert!(screen.contains("Playing"));
        assert!(screen.contains("Blue"));
        assert!(screen.contains("Kind"));
        assert!(screen.contains("01:01 / 02:05"));
        assert!(screen.contains("No music file found"));
    }
}
