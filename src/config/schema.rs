use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/shufflebox/config.toml` or
/// `~/.config/shufflebox/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SHUFFLEBOX__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub widget: WidgetSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory to scan when none is given on the command line.
    pub root: Option<PathBuf>,
    /// File extensions to treat as playable (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to descend into hidden directories (dot-directories).
    pub include_hidden: bool,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: None,
            extensions: vec!["mp3".into()],
            include_hidden: false,
            follow_links: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output volume applied to every track (1.0 = unchanged).
    pub volume: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start playing a random track as soon as the library is scanned.
    pub autoplay: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Text rendered inside the header box.
    pub header_text: String,
    /// Whether to show the album line under the file name.
    pub show_album: bool,
    /// How long a notice stays on the message line (milliseconds).
    pub message_timeout_ms: u64,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            header_text: " shuffle & play ".to_string(),
            show_album: true,
            message_timeout_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
    /// Log file; defaults to `$XDG_STATE_HOME/shufflebox/shufflebox.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
