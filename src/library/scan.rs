use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

fn wanted_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Collect every file under `root` whose extension is in `settings.extensions`.
///
/// The walk is depth-first and sorted by file name. Hidden directories are
/// pruned unless `include_hidden` is set. A missing or unreadable root, or an
/// unreadable subdirectory, contributes nothing instead of failing the scan.
/// A relative `root` is resolved against the working directory, so every
/// returned path is absolute.
pub fn scan(root: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let exts = wanted_extensions(settings);
    let root = absolute_root(root);

    let walker = WalkDir::new(&root)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    let mut found = Vec::new();
    for entry in walker.into_iter().filter_entry(|e| {
        e.depth() == 0 || settings.include_hidden || !e.file_type().is_dir() || !is_hidden(e)
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file()) {
            if has_extension(entry.path(), &exts) {
                found.push(entry.into_path());
            }
        }
    }

    log::info!("scanned {}: {} playable files", root.display(), found.len());
    found
}

fn absolute_root(root: &Path) -> PathBuf {
    std::path::absolute(root).unwrap_or_else(|e| {
        log::debug!("cannot resolve {}: {e}", root.display());
        root.to_path_buf()
    })
}

/// Run [`scan`] on a worker thread and hand the result to `on_done`.
pub fn spawn_scan<F>(root: PathBuf, settings: LibrarySettings, on_done: F) -> JoinHandle<()>
where
    F: FnOnce(Vec<PathBuf>) + Send + 'static,
{
    thread::spawn(move || {
        let paths = scan(&root, &settings);
        on_done(paths);
    })
}
