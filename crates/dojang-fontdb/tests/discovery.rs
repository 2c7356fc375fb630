//! Discovery against real directories on disk

use std::fs;
use std::path::PathBuf;

use dojang_core::{
    error::{DojangError, FontLoadError},
    FontResolver,
};
use dojang_fontdb::FontLibrary;

/// A fresh, empty directory under the system temp dir
fn scratch_dir(tag: &str) -> PathBuf {
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("dojang_fontdb_{tag}_{id}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_directory_is_an_error() {
    let err = FontLibrary::new()
        .discover("/definitely/not/a/font/dir")
        .unwrap_err();
    assert!(matches!(err, DojangError::FontLoad(FontLoadError::FileNotFound(_))));
}

#[test]
fn invalid_and_unrelated_files_are_skipped() {
    let dir = scratch_dir("skip");
    fs::write(dir.join("malgun.ttf"), b"not really a font").unwrap();
    fs::write(dir.join("notes.txt"), b"hello").unwrap();
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("nested").join("Batang.otf"), [0u8; 64]).unwrap();

    let library = FontLibrary::new();
    assert_eq!(library.discover(&dir).unwrap(), 0);
    assert!(library.families().is_empty());
    assert!(library.resolve(dojang_core::types::FontFamily::MalgunGothic).is_err());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn background_loader_opens_the_gate() {
    let dir = scratch_dir("gate");
    let library = pollster::block_on(FontLibrary::load_in_background(&dir).wait()).unwrap();
    assert!(library.families().is_empty());
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn background_loader_reports_discovery_errors() {
    let gate = FontLibrary::load_in_background("/definitely/not/a/font/dir");
    let err = pollster::block_on(gate.wait()).err();
    assert!(matches!(
        err,
        Some(DojangError::FontLoad(FontLoadError::FileNotFound(_)))
    ));
}
