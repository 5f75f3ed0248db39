use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};

/// A playable file and the metadata shown for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// File name without its extension.
    pub name: String,
    pub album: Option<String>,
    pub duration: Option<Duration>,
}

impl Track {
    /// Build a track for `path`, reading the album tag and duration when the
    /// file carries them. Unreadable files still produce a track.
    pub fn load(path: &Path) -> Self {
        let mut track = Self::bare(path);

        match lofty::read_from_path(path) {
            Ok(tagged) => {
                track.duration = Some(tagged.properties().duration());
                if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                    track.album = tag
                        .album()
                        .map(|a| a.trim().to_string())
                        .filter(|a| !a.is_empty());
                }
            }
            Err(e) => log::debug!("no tags for {}: {e}", path.display()),
        }

        track
    }

    /// A track with only the path-derived fields filled in.
    pub fn bare(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            name: display_name(path),
            album: None,
            duration: None,
        }
    }

    /// Album title, falling back to the file name when the tag is missing.
    pub fn album_title(&self) -> &str {
        self.album.as_deref().unwrap_or(&self.name)
    }
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}
