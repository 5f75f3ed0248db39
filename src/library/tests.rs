use super::{Track, scan};
use crate::config::LibrarySettings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn scan_returns_exactly_the_matching_files() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("albums").join("one");
    fs::create_dir_all(&sub).unwrap();

    // 4 matching
    fs::write(dir.path().join("a.mp3"), b"x").unwrap();
    fs::write(dir.path().join("B.MP3"), b"x").unwrap();
    fs::write(sub.join("c.mp3"), b"x").unwrap();
    fs::write(sub.join("d.mp3"), b"x").unwrap();
    // 5 non-matching
    fs::write(dir.path().join("cover.jpg"), b"x").unwrap();
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();
    fs::write(sub.join("e.flac"), b"x").unwrap();
    fs::write(sub.join("mp3"), b"x").unwrap();
    fs::write(sub.join("f.mp3.part"), b"x").unwrap();

    let found = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(found.len(), 4);
    assert!(found.iter().all(|p| p.is_absolute()));
}

#[test]
fn scan_skips_hidden_directories_by_default() {
    let dir = tempdir().unwrap();
    let hidden = dir.path().join(".cache");
    fs::create_dir_all(&hidden).unwrap();
    fs::write(hidden.join("ad.mp3"), b"x").unwrap();
    fs::write(dir.path().join("song.mp3"), b"x").unwrap();

    let found = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(found, vec![dir.path().join("song.mp3")]);

    let settings = LibrarySettings {
        include_hidden: true,
        ..LibrarySettings::default()
    };
    assert_eq!(scan(dir.path(), &settings).len(), 2);
}

#[test]
fn scan_keeps_hidden_files_in_visible_directories() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".intro.mp3"), b"x").unwrap();

    let found = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(found, vec![dir.path().join(".intro.mp3")]);
}

#[test]
fn scan_of_missing_root_is_empty() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    assert!(scan(&missing, &LibrarySettings::default()).is_empty());
}

#[test]
fn scan_of_tree_without_matches_is_empty() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("empty")).unwrap();
    fs::write(dir.path().join("readme.md"), b"x").unwrap();
    assert!(scan(dir.path(), &LibrarySettings::default()).is_empty());
}

#[test]
fn track_name_drops_extension() {
    let t = Track::bare(Path::new("/music/Some Song.mp3"));
    assert_eq!(t.name, "Some Song");
    assert_eq!(t.album, None);
}

#[test]
fn album_title_falls_back_to_name() {
    let mut t = Track::bare(Path::new("/music/Intro.mp3"));
    assert_eq!(t.album_title(), "Intro");

    t.album = Some("Live".to_string());
    assert_eq!(t.album_title(), "Live");
}

#[test]
fn load_of_untagged_file_keeps_path_derived_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("garbage.mp3");
    fs::write(&path, b"definitely not an mp3 frame").unwrap();

    let t = Track::load(&path);
    assert_eq!(t.path, path);
    assert_eq!(t.name, "garbage");
    assert_eq!(t.album, None);
    assert_eq!(t.album_title(), "garbage");
}

#[test]
fn scan_of_relative_root_yields_absolute_paths() {
    let dir = tempdir().unwrap();
    let music = dir.path().join("music");
    fs::create_dir_all(&music).unwrap();
    fs::write(music.join("a.mp3"), b"x").unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let found = scan(Path::new("music"), &LibrarySettings::default());
    std::env::set_current_dir(previous).unwrap();

    assert_eq!(found.len(), 1);
    assert!(found.iter().all(|p| p.is_absolute()));
    assert_eq!(found[0].file_name().unwrap(), "a.mp3");
}

#[cfg(unix)]
#[test]
fn scan_skips_unreadable_subdirectories() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("hidden.mp3"), b"x").unwrap();
    fs::write(dir.path().join("open.mp3"), b"x").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not stop root.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let found = scan(dir.path(), &LibrarySettings::default());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(found, vec![dir.path().join("open.mp3")]);
}
