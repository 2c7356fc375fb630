//! CLI Smoke Tests
//!
//! Integration tests for the dojang CLI commands:
//! - `info`: List families, styles and formats
//! - `stamp`: Render a seal
//! - `trademark`: Render a trademark specimen
//!
//! Rendering tests need a system font directory and return early without one.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Get the path to the dojang binary
fn dojang_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dojang"))
}

/// The directory of an installed system font, if any
fn system_font_dir() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/Library/Fonts/Arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
    .and_then(|p| p.parent().map(PathBuf::from))
}

/// Create a temporary file path
fn temp_output(ext: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("dojang_test_{}.{}", id, ext));
    path
}

// ============================================================================
// Info Command Tests
// ============================================================================

#[test]
fn test_info_help() {
    let output = Command::new(dojang_binary())
        .args(["info", "--help"])
        .output()
        .expect("Failed to execute dojang info --help");

    assert!(output.status.success(), "info --help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Display information"),
        "Help should describe the command"
    );
}

#[test]
fn test_info_lists_everything() {
    let output = Command::new(dojang_binary())
        .arg("info")
        .output()
        .expect("Failed to execute dojang info");

    assert!(output.status.success(), "info should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in ["museum-classic", "malgun-gothic", "vertical-right", "rough", "png"] {
        assert!(stdout.contains(expected), "info should list {expected}");
    }
}

#[test]
fn test_info_formats_only() {
    let output = Command::new(dojang_binary())
        .args(["info", "--formats"])
        .output()
        .expect("Failed to execute dojang info --formats");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jpg"));
    assert!(!stdout.contains("Font families"));
}

// ============================================================================
// Failure Cases
// ============================================================================

#[test]
fn test_stamp_missing_font_dir_fails() {
    let output_file = temp_output("jpg");
    let output = Command::new(dojang_binary())
        .args(["stamp", "홍길동", "--font-dir", "/nonexistent/fonts", "-o"])
        .arg(&output_file)
        .output()
        .expect("Failed to execute dojang stamp");

    assert!(
        !output.status.success(),
        "stamp should fail without a font directory"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"), "Should print an error");
    assert!(!output_file.exists(), "No file should be written");
}

#[test]
fn test_stamp_invalid_shape_fails() {
    let output = Command::new(dojang_binary())
        .args(["stamp", "홍길동", "--shape", "triangle"])
        .output()
        .expect("Failed to execute dojang stamp");

    assert!(!output.status.success(), "unknown shape should be rejected");
}

#[test]
fn test_trademark_bad_config_fails() {
    let config = temp_output("json");
    fs::write(&config, "{ not json").unwrap();
    let output = Command::new(dojang_binary())
        .args(["trademark", "--config"])
        .arg(&config)
        .output()
        .expect("Failed to execute dojang trademark");
    fs::remove_file(&config).ok();

    assert!(!output.status.success(), "malformed config should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid configuration"), "{stderr}");
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_stamp_png_to_file() {
    let Some(font_dir) = system_font_dir() else {
        return;
    };
    let output_file = temp_output("png");
    let output = Command::new(dojang_binary())
        .args(["stamp", "ABC", "-O", "png", "--seed", "3", "--border-style", "rough"])
        .arg("--font-dir")
        .arg(&font_dir)
        .arg("-o")
        .arg(&output_file)
        .output()
        .expect("Failed to execute dojang stamp");

    assert!(
        output.status.success(),
        "stamp should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let data = fs::read(&output_file).unwrap();
    fs::remove_file(&output_file).ok();
    assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n", "Should be a PNG file");
}

#[test]
fn test_trademark_jpeg_to_file() {
    let Some(font_dir) = system_font_dir() else {
        return;
    };
    let output_file = temp_output("jpg");
    let output = Command::new(dojang_binary())
        .args(["trademark", "Dojang\\nStudio", "--dpi", "150"])
        .arg("--font-dir")
        .arg(&font_dir)
        .arg("-o")
        .arg(&output_file)
        .output()
        .expect("Failed to execute dojang trademark");

    assert!(
        output.status.success(),
        "trademark should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let data = fs::read(&output_file).unwrap();
    fs::remove_file(&output_file).ok();
    assert_eq!(&data[..2], &[0xff, 0xd8], "Should be a JPEG file");
}
