//! # WinClip
//!
//! Windows clipboard access and change monitoring.
//!
//! WinClip wraps the Win32 clipboard primitives (text get/set, format
//! enumeration, format naming, sequence number) behind a small [`Clipboard`]
//! trait and provides a polling [`Monitor`] that detects clipboard changes
//! by watching the clipboard sequence number.
//!
//! The Win32 backend only exists on Windows; the trait, the monitor, and the
//! configuration layer build everywhere so that embedding code and tests can
//! run against fake backends on any platform.

pub mod clipboard;
pub mod config;
pub mod monitor;

pub use clipboard::{
    Clipboard, ClipboardError, ClipboardEvent, ClipboardWatcher, SystemError, MAX_CLIPBOARD_SIZE,
};
pub use config::MonitorConfig;
pub use monitor::Monitor;

/// Result type alias for WinClip operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for WinClip operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Clipboard operation error
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] clipboard::ClipboardError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Retrieve the current clipboard text (CF_UNICODETEXT, converted from UTF-16).
#[cfg(windows)]
pub fn get_clipboard_text() -> Result<String> {
    let backend = clipboard::win32::Win32Clipboard::new()?;
    Ok(backend.get_text()?)
}

/// Replace the clipboard contents with the given text.
#[cfg(windows)]
pub fn set_clipboard_text(text: &str) -> Result<()> {
    let backend = clipboard::win32::Win32Clipboard::new()?;
    Ok(backend.set_text(text)?)
}

/// Enumerate the format codes currently available on the clipboard.
#[cfg(windows)]
pub fn get_clipboard_formats() -> Result<Vec<u32>> {
    let backend = clipboard::win32::Win32Clipboard::new()?;
    Ok(backend.formats()?)
}

/// Look up the registered name of a clipboard format.
///
/// Predefined formats have no registered name; see
/// [`clipboard::formats::predefined_name`] for those.
#[cfg(windows)]
pub fn get_format_name(format: u32) -> Result<Option<String>> {
    let backend = clipboard::win32::Win32Clipboard::new()?;
    Ok(backend.format_name(format))
}
