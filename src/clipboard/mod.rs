//! Clipboard abstraction layer
//!
//! This module defines the [`Clipboard`] trait that the polling monitor is
//! written against, the error types shared by every backend, and the Win32
//! implementation (Windows only).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

pub mod formats;

#[cfg(windows)]
pub mod win32;

#[cfg(test)]
use mockall::automock;

/// Maximum clipboard content size (5MB)
pub const MAX_CLIPBOARD_SIZE: usize = 5 * 1024 * 1024;

/// A Windows system error code.
///
/// Code `0` (`ERROR_SUCCESS`) means no error. On Windows the human-readable
/// description is resolved through `FormatMessageW`; elsewhere the standard
/// library's OS error text is used as a best effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("os error {0}")]
pub struct SystemError(u32);

impl SystemError {
    /// Wrap a raw system error code.
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    /// The raw error code.
    pub fn code(&self) -> u32 {
        self.0
    }

    /// Whether this code represents success.
    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }

    /// Human-readable description of the error code.
    pub fn description(&self) -> String {
        #[cfg(windows)]
        {
            win32::describe_error(self.0)
        }

        #[cfg(not(windows))]
        {
            std::io::Error::from_raw_os_error(self.0 as i32).to_string()
        }
    }
}

/// Clipboard errors
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Platform call failed with a system error code
    #[error("Platform error: {0}")]
    System(#[from] SystemError),

    /// Content too large
    #[error("Content too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },

    /// No content available in the requested format
    #[error("No clipboard content available")]
    NoContent,

    /// Format code not usable for the requested operation
    #[error("Unsupported clipboard format: {0}")]
    UnsupportedFormat(u32),

    /// No clipboard backend exists for this platform
    #[error("Clipboard is not supported on this platform")]
    UnsupportedPlatform,

    /// Watch error
    #[error("Failed to watch clipboard: {0}")]
    Watch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipboardError {
    /// The underlying system error code, if this error carries one.
    pub fn system_code(&self) -> Option<u32> {
        match self {
            Self::System(err) => Some(err.code()),
            _ => None,
        }
    }
}

/// Clipboard backend trait
///
/// Implemented by the Win32 backend and by test fakes. All operations are
/// synchronous; the underlying platform calls are short-lived.
#[cfg_attr(test, automock)]
pub trait Clipboard: Send + Sync {
    /// Current clipboard sequence number.
    ///
    /// The counter increments whenever the clipboard contents change.
    /// Returns `None` when the counter cannot be read (the system reports
    /// zero when the caller lacks `WINSTA_ACCESSCLIPBOARD`).
    fn sequence_number(&self) -> Option<u32>;

    /// Get the current clipboard text.
    fn get_text(&self) -> Result<String, ClipboardError>;

    /// Replace the clipboard contents with the given text.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Clear the clipboard.
    fn clear(&self) -> Result<(), ClipboardError>;

    /// Enumerate the format codes currently on the clipboard.
    fn formats(&self) -> Result<Vec<u32>, ClipboardError>;

    /// Registered name of a format code.
    ///
    /// Predefined formats have no registered name and yield `None`; use
    /// [`formats::predefined_name`] for those.
    fn format_name(&self, format: u32) -> Option<String>;

    /// Get backend name
    fn name(&self) -> &str;
}

/// Clipboard change event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEvent {
    /// The clipboard text after the change
    pub text: String,
    /// Sequence number observed with the change
    pub sequence: u32,
}

/// Clipboard watcher for monitoring changes
pub struct ClipboardWatcher {
    /// Channel receiver for clipboard events
    pub receiver: mpsc::Receiver<ClipboardEvent>,
    /// Handle to stop watching
    _handle: Box<dyn Send + Sync>,
}

impl ClipboardWatcher {
    /// Create a new watcher with the given receiver
    pub fn new(
        receiver: mpsc::Receiver<ClipboardEvent>,
        handle: impl Send + Sync + 'static,
    ) -> Self {
        Self {
            receiver,
            _handle: Box::new(handle),
        }
    }

    /// Receive the next clipboard change event.
    pub async fn recv(&mut self) -> Option<ClipboardEvent> {
        self.receiver.recv().await
    }
}

/// Create a clipboard backend for the current platform
pub fn create_backend() -> Result<Box<dyn Clipboard>, ClipboardError> {
    #[cfg(windows)]
    {
        Ok(Box::new(win32::Win32Clipboard::new()?))
    }

    #[cfg(not(windows))]
    {
        Err(ClipboardError::UnsupportedPlatform)
    }
}

/// Encode text as a nul-terminated UTF-16 buffer.
pub fn utf16_nul_terminated(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode a UTF-16 buffer up to its first nul (or the full buffer).
pub fn utf16_until_nul(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}
