//! Basic functionality tests to ensure the build is working

use winclip::clipboard::formats;
use winclip::config::MonitorConfig;

#[test]
fn test_version() {
    assert_eq!(winclip::VERSION, "0.1.0");
}

#[test]
fn test_max_clipboard_size() {
    assert_eq!(winclip::MAX_CLIPBOARD_SIZE, 5 * 1024 * 1024);
}

#[test]
fn test_default_config() {
    let config = MonitorConfig::default();
    assert!(config.poll_interval_ms > 0);
    assert!(config.max_size > 0);
    config.validate().unwrap();
}

#[test]
fn test_predefined_formats() {
    assert_eq!(formats::CF_UNICODETEXT, 13);
    assert_eq!(formats::predefined_name(formats::CF_TEXT), Some("CF_TEXT"));
    assert!(formats::is_predefined(formats::CF_DIB));
    assert!(!formats::is_predefined(0xC123));
}

#[cfg(not(windows))]
#[test]
fn test_backend_unavailable_off_windows() {
    assert!(matches!(
        winclip::clipboard::create_backend(),
        Err(winclip::ClipboardError::UnsupportedPlatform)
    ));
}
