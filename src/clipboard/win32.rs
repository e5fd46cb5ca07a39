//! Win32 clipboard backend
//!
//! Direct wrappers over the Win32 clipboard API. Every operation keeps the
//! OpenClipboard→CloseClipboard window as short as possible; buffers are
//! prepared before the clipboard is opened and the pairing is enforced with
//! an RAII guard.

use super::{
    formats, utf16_nul_terminated, utf16_until_nul, Clipboard, ClipboardError, SystemError,
    MAX_CLIPBOARD_SIZE,
};
use tracing::warn;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{GetLastError, GlobalFree, SetLastError, HANDLE, HGLOBAL, WIN32_ERROR};
use windows::Win32::System::DataExchange::{
    CloseClipboard, CountClipboardFormats, EmptyClipboard, EnumClipboardFormats,
    GetClipboardData, GetClipboardFormatNameW, GetClipboardSequenceNumber,
    IsClipboardFormatAvailable, OpenClipboard, RegisterClipboardFormatW, SetClipboardData,
};
use windows::Win32::System::Memory::{
    GlobalAlloc, GlobalLock, GlobalSize, GlobalUnlock, GMEM_MOVEABLE,
};

/// Win32 clipboard provider
pub struct Win32Clipboard;

impl Win32Clipboard {
    /// Create a new Win32 clipboard provider.
    pub fn new() -> Result<Self, ClipboardError> {
        Ok(Self)
    }

    /// Read the raw bytes stored under the given format code.
    pub fn read_raw(&self, format: u32) -> Result<Vec<u8>, ClipboardError> {
        let _guard = ClipboardGuard::open()?;
        unsafe {
            let handle =
                GetClipboardData(format).map_err(|e| ClipboardError::System(system_error(&e)))?;
            let hglobal = HGLOBAL(handle.0);

            let ptr = GlobalLock(hglobal) as *const u8;
            if ptr.is_null() {
                return Err(last_error().into());
            }

            let len = GlobalSize(hglobal);
            let data = std::slice::from_raw_parts(ptr, len).to_vec();
            let _ = GlobalUnlock(hglobal);
            Ok(data)
        }
    }

    /// Replace the clipboard with raw bytes under the given format code.
    pub fn write_raw(&self, format: u32, data: &[u8]) -> Result<(), ClipboardError> {
        if data.len() > MAX_CLIPBOARD_SIZE {
            return Err(ClipboardError::TooLarge {
                size: data.len(),
                max: MAX_CLIPBOARD_SIZE,
            });
        }
        if format == 0 {
            return Err(ClipboardError::UnsupportedFormat(format));
        }

        let _guard = ClipboardGuard::open()?;
        unsafe {
            EmptyClipboard().map_err(|e| ClipboardError::System(system_error(&e)))?;
            set_global_data(format, data)
        }
    }

    /// Register a clipboard format with the given name, returning its code.
    ///
    /// Registering an already-registered name returns the existing code.
    pub fn register_format(&self, name: &str) -> Result<u32, ClipboardError> {
        let wide = utf16_nul_terminated(name);
        let format = unsafe { RegisterClipboardFormatW(PCWSTR(wide.as_ptr())) };
        if format == 0 {
            Err(last_error().into())
        } else {
            Ok(format)
        }
    }

    /// Whether the given format is currently present on the clipboard.
    pub fn is_format_available(&self, format: u32) -> bool {
        unsafe { IsClipboardFormatAvailable(format).is_ok() }
    }

    /// Number of formats currently on the clipboard.
    pub fn count_formats(&self) -> Result<usize, ClipboardError> {
        let count = unsafe {
            // Zero is also the error return; clear any stale code first so
            // GetLastError can tell an empty clipboard from a failure.
            SetLastError(WIN32_ERROR(0));
            CountClipboardFormats()
        };
        if count == 0 {
            let err = unsafe { GetLastError() };
            if err.0 != 0 {
                return Err(SystemError::new(err.0).into());
            }
        }
        Ok(count as usize)
    }
}

impl Clipboard for Win32Clipboard {
    fn sequence_number(&self) -> Option<u32> {
        // Zero means the caller lacks WINSTA_ACCESSCLIPBOARD.
        let num = unsafe { GetClipboardSequenceNumber() };
        if num == 0 {
            None
        } else {
            Some(num)
        }
    }

    fn get_text(&self) -> Result<String, ClipboardError> {
        let _guard = ClipboardGuard::open()?;
        unsafe {
            let handle = GetClipboardData(formats::CF_UNICODETEXT)
                .map_err(|e| ClipboardError::System(system_error(&e)))?;
            let hglobal = HGLOBAL(handle.0);

            let ptr = GlobalLock(hglobal) as *const u16;
            if ptr.is_null() {
                return Err(last_error().into());
            }

            let units = GlobalSize(hglobal) / std::mem::size_of::<u16>();
            let text = utf16_until_nul(std::slice::from_raw_parts(ptr, units));
            let _ = GlobalUnlock(hglobal);
            Ok(text)
        }
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if text.len() > MAX_CLIPBOARD_SIZE {
            return Err(ClipboardError::TooLarge {
                size: text.len(),
                max: MAX_CLIPBOARD_SIZE,
            });
        }

        // Encode before opening so the clipboard is held only for the copy.
        let wide = utf16_nul_terminated(text);
        let bytes = unsafe {
            std::slice::from_raw_parts(wide.as_ptr() as *const u8, wide.len() * 2)
        };

        let _guard = ClipboardGuard::open()?;
        unsafe {
            EmptyClipboard().map_err(|e| ClipboardError::System(system_error(&e)))?;
            set_global_data(formats::CF_UNICODETEXT, bytes)
        }
    }

    fn clear(&self) -> Result<(), ClipboardError> {
        let _guard = ClipboardGuard::open()?;
        unsafe { EmptyClipboard().map_err(|e| ClipboardError::System(system_error(&e))) }
    }

    fn formats(&self) -> Result<Vec<u32>, ClipboardError> {
        let _guard = ClipboardGuard::open()?;
        let mut result = Vec::new();
        unsafe {
            let mut format = EnumClipboardFormats(0);
            while format != 0 {
                result.push(format);
                format = EnumClipboardFormats(format);
            }

            // Enumeration ends with ERROR_SUCCESS; anything else is a failure.
            let err = GetLastError();
            if err.0 != 0 {
                return Err(SystemError::new(err.0).into());
            }
        }
        Ok(result)
    }

    fn format_name(&self, format: u32) -> Option<String> {
        let mut buf = [0u16; 128];
        let len = unsafe { GetClipboardFormatNameW(format, &mut buf) };
        if len <= 0 {
            return None;
        }
        Some(String::from_utf16_lossy(&buf[..len as usize]))
    }

    fn name(&self) -> &str {
        "Win32"
    }
}

/// RAII pairing for OpenClipboard/CloseClipboard.
struct ClipboardGuard;

impl ClipboardGuard {
    fn open() -> Result<Self, ClipboardError> {
        unsafe {
            OpenClipboard(None).map_err(|e| ClipboardError::System(system_error(&e)))?;
        }
        Ok(Self)
    }
}

impl Drop for ClipboardGuard {
    fn drop(&mut self) {
        if let Err(err) = unsafe { CloseClipboard() } {
            warn!("CloseClipboard failed: {err}");
        }
    }
}

/// Copy bytes into movable global memory and hand them to the clipboard.
///
/// Ownership of the allocation passes to the system on success; on failure
/// the allocation is freed here.
unsafe fn set_global_data(format: u32, data: &[u8]) -> Result<(), ClipboardError> {
    let hglobal = GlobalAlloc(GMEM_MOVEABLE, data.len().max(1))
        .map_err(|e| ClipboardError::System(system_error(&e)))?;

    let ptr = GlobalLock(hglobal) as *mut u8;
    if ptr.is_null() {
        let err = last_error();
        let _ = GlobalFree(Some(hglobal));
        return Err(err.into());
    }

    std::ptr::copy_nonoverlapping(data.as_ptr(), ptr, data.len());
    let _ = GlobalUnlock(hglobal);

    if let Err(err) = SetClipboardData(format, Some(HANDLE(hglobal.0))) {
        let _ = GlobalFree(Some(hglobal));
        return Err(ClipboardError::System(system_error(&err)));
    }

    Ok(())
}

/// The calling thread's last system error code.
fn last_error() -> SystemError {
    SystemError::new(unsafe { GetLastError() }.0)
}

/// Extract the Win32 error code from a windows-rs error.
///
/// HRESULTs in the Win32 facility carry the original code in the low word;
/// anything else is kept verbatim.
fn system_error(err: &windows::core::Error) -> SystemError {
    let hr = err.code().0 as u32;
    if (hr & 0xFFFF_0000) == 0x8007_0000 {
        SystemError::new(hr & 0xFFFF)
    } else {
        SystemError::new(hr)
    }
}

/// Resolve a system error code to its message text.
pub(crate) fn describe_error(code: u32) -> String {
    use windows::core::PWSTR;
    use windows::Win32::System::Diagnostics::Debug::{
        FormatMessageW, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
    };

    let mut buf = [0u16; 512];
    let len = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            None,
            code,
            0,
            PWSTR(buf.as_mut_ptr()),
            buf.len() as u32,
            None,
        )
    };

    if len == 0 {
        return format!("Unknown error {}", code);
    }
    utf16_until_nul(&buf).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // These run only on Windows and touch the real clipboard; they are the
    // same style of opportunistic platform tests the backend has always had.

    #[test]
    fn test_backend_name() {
        let clipboard = Win32Clipboard::new().unwrap();
        assert_eq!(clipboard.name(), "Win32");
    }

    #[test]
    fn test_text_round_trip() {
        let clipboard = Win32Clipboard::new().unwrap();
        if clipboard.set_text("winclip test").is_ok() {
            assert_eq!(clipboard.get_text().unwrap(), "winclip test");
            assert!(clipboard.is_format_available(formats::CF_UNICODETEXT));
        }
    }

    #[test]
    fn test_set_text_too_large() {
        let clipboard = Win32Clipboard::new().unwrap();
        let huge = "x".repeat(MAX_CLIPBOARD_SIZE + 1);
        match clipboard.set_text(&huge) {
            Err(ClipboardError::TooLarge { size, max }) => {
                assert_eq!(size, MAX_CLIPBOARD_SIZE + 1);
                assert_eq!(max, MAX_CLIPBOARD_SIZE);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_register_format_is_stable() {
        let clipboard = Win32Clipboard::new().unwrap();
        let first = clipboard.register_format("WinClip.Test").unwrap();
        let second = clipboard.register_format("WinClip.Test").unwrap();
        assert_eq!(first, second);
        assert!(first >= 0xC000);
    }

    #[test]
    fn test_count_formats_ignores_stale_error() {
        let clipboard = Win32Clipboard::new().unwrap();
        if clipboard.clear().is_ok() {
            // A leftover code from an earlier call must not surface as an
            // error when the clipboard is simply empty.
            unsafe { SetLastError(WIN32_ERROR(5)) };
            assert_eq!(clipboard.count_formats().unwrap(), 0);
        }
    }

    #[test]
    fn test_format_name_of_predefined_is_none() {
        let clipboard = Win32Clipboard::new().unwrap();
        assert_eq!(clipboard.format_name(formats::CF_UNICODETEXT), None);
    }

    #[test]
    fn test_hresult_unwrapping() {
        let err = windows::core::Error::from_hresult(windows::core::HRESULT(0x8007_058A_u32 as i32));
        assert_eq!(system_error(&err).code(), 1418);
    }
}
