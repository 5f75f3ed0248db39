use std::path::Path;

use crate::config::{self, Settings};

/// Why loaded settings were thrown away.
#[derive(Debug)]
enum Rejected {
    /// The file or an environment override could not be parsed.
    Unreadable(::config::ConfigError),
    /// Parsed fine, but a value is out of range.
    Invalid(String),
}

fn check(loaded: Result<Settings, ::config::ConfigError>) -> Result<Settings, Rejected> {
    let settings = loaded.map_err(Rejected::Unreadable)?;
    settings.validate().map_err(Rejected::Invalid)?;
    Ok(settings)
}

fn describe(source: Option<&Path>, rejected: &Rejected) -> String {
    let file = source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<no config file>".to_string());
    match rejected {
        Rejected::Unreadable(e) => format!(
            "shufflebox: cannot read settings from {file} or SHUFFLEBOX__* variables ({e}); using defaults"
        ),
        Rejected::Invalid(msg) => {
            format!("shufflebox: rejected settings from {file}: {msg}; using defaults")
        }
    }
}

/// Load settings, falling back to defaults with a note on stderr. Logging is
/// not up yet at this point, since its level comes from these settings.
pub fn load_settings() -> Settings {
    match check(Settings::load()) {
        Ok(settings) => settings,
        Err(rejected) => {
            eprintln!("{}", describe(config::resolve_config_path().as_deref(), &rejected));
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_values_are_rejected_with_the_file_named() {
        let mut settings = Settings::default();
        settings.audio.volume = 5.0;

        let rejected = check(Ok(settings)).unwrap_err();
        assert!(matches!(rejected, Rejected::Invalid(_)));

        let note = describe(Some(Path::new("/home/me/.config/shufflebox/config.toml")), &rejected);
        assert!(note.contains("/home/me/.config/shufflebox/config.toml"), "{note}");
        assert!(note.contains("audio.volume"), "{note}");
    }

    #[test]
    fn parse_failures_mention_the_environment_layer() {
        let rejected = check(Err(::config::ConfigError::Message("bad value".into()))).unwrap_err();
        let note = describe(None, &rejected);
        assert!(note.contains("<no config file>"), "{note}");
        assert!(note.contains("SHUFFLEBOX__"), "{note}");
        assert!(note.contains("bad value"), "{note}");
    }

    #[test]
    fn valid_settings_pass_through() {
        let settings = check(Ok(Settings::default())).unwrap();
        assert_eq!(settings.audio.volume, Settings::default().audio.volume);
    }
}
