use std::fs::{self, File};
use std::path::PathBuf;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::{LoggingSettings, default_state_dir};

/// Where log lines go when `logging.file` is not set.
pub fn default_log_path() -> Option<PathBuf> {
    default_state_dir().map(|d| d.join("shufflebox.log"))
}

fn level(settings: &LoggingSettings) -> LevelFilter {
    settings.level.trim().parse().unwrap_or_else(|_| {
        eprintln!(
            "shufflebox: unknown log level {:?}, using info",
            settings.level
        );
        LevelFilter::Info
    })
}

/// Install a file logger. The terminal belongs to the UI, so nothing is
/// logged to stderr; if the file cannot be created logging stays off.
pub fn init(settings: &LoggingSettings) {
    let level = level(settings);
    if level == LevelFilter::Off {
        return;
    }
    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = match File::create(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("shufflebox: cannot write log file {}: {e}", path.display());
            return;
        }
    };

    let config = ConfigBuilder::new()
        .add_filter_ignore_str("zbus")
        .add_filter_ignore_str("symphonia")
        .build();
    if WriteLogger::init(level, config, file).is_ok() {
        log::info!("logging to {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_known_names_and_falls_back_to_info() {
        let mut s = LoggingSettings::default();
        assert_eq!(level(&s), LevelFilter::Info);

        s.level = "DEBUG".into();
        assert_eq!(level(&s), LevelFilter::Debug);

        s.level = " off ".into();
        assert_eq!(level(&s), LevelFilter::Off);

        s.level = "chatty".into();
        assert_eq!(level(&s), LevelFilter::Info);
    }
}
