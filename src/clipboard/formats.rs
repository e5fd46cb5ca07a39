//! Standard clipboard formats
//!
//! The predefined Win32 format codes. `GetClipboardFormatNameW` only names
//! formats registered at runtime, so the names of the predefined formats are
//! kept in a static table here.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// ANSI text
pub const CF_TEXT: u32 = 1;
/// Bitmap handle (HBITMAP)
pub const CF_BITMAP: u32 = 2;
/// Metafile picture
pub const CF_METAFILEPICT: u32 = 3;
/// Microsoft Symbolic Link format
pub const CF_SYLK: u32 = 4;
/// Software Arts' Data Interchange Format
pub const CF_DIF: u32 = 5;
/// Tagged-image file format
pub const CF_TIFF: u32 = 6;
/// Text in the OEM character set
pub const CF_OEMTEXT: u32 = 7;
/// Device-independent bitmap
pub const CF_DIB: u32 = 8;
/// Color palette handle
pub const CF_PALETTE: u32 = 9;
/// Pen extensions data
pub const CF_PENDATA: u32 = 10;
/// Audio data in RIFF format
pub const CF_RIFF: u32 = 11;
/// Audio data in WAVE format
pub const CF_WAVE: u32 = 12;
/// Unicode (UTF-16) text
pub const CF_UNICODETEXT: u32 = 13;
/// Enhanced metafile handle
pub const CF_ENHMETAFILE: u32 = 14;
/// List of dropped files (HDROP)
pub const CF_HDROP: u32 = 15;
/// Locale identifier for CF_TEXT conversions
pub const CF_LOCALE: u32 = 16;
/// Device-independent bitmap, version 5
pub const CF_DIBV5: u32 = 17;

/// Owner-drawn clipboard display
pub const CF_OWNERDISPLAY: u32 = 0x0080;
/// Private text display format
pub const CF_DSPTEXT: u32 = 0x0081;
/// Private bitmap display format
pub const CF_DSPBITMAP: u32 = 0x0082;
/// Private metafile-picture display format
pub const CF_DSPMETAFILEPICT: u32 = 0x0083;
/// Private enhanced metafile display format
pub const CF_DSPENHMETAFILE: u32 = 0x008E;

/// Start of the private format range
pub const CF_PRIVATEFIRST: u32 = 0x0200;
/// End of the private format range
pub const CF_PRIVATELAST: u32 = 0x02FF;
/// Start of the GDI object format range
pub const CF_GDIOBJFIRST: u32 = 0x0300;
/// End of the GDI object format range
pub const CF_GDIOBJLAST: u32 = 0x03FF;

static PREDEFINED_NAMES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (CF_TEXT, "CF_TEXT"),
        (CF_BITMAP, "CF_BITMAP"),
        (CF_METAFILEPICT, "CF_METAFILEPICT"),
        (CF_SYLK, "CF_SYLK"),
        (CF_DIF, "CF_DIF"),
        (CF_TIFF, "CF_TIFF"),
        (CF_OEMTEXT, "CF_OEMTEXT"),
        (CF_DIB, "CF_DIB"),
        (CF_PALETTE, "CF_PALETTE"),
        (CF_PENDATA, "CF_PENDATA"),
        (CF_RIFF, "CF_RIFF"),
        (CF_WAVE, "CF_WAVE"),
        (CF_UNICODETEXT, "CF_UNICODETEXT"),
        (CF_ENHMETAFILE, "CF_ENHMETAFILE"),
        (CF_HDROP, "CF_HDROP"),
        (CF_LOCALE, "CF_LOCALE"),
        (CF_DIBV5, "CF_DIBV5"),
        (CF_OWNERDISPLAY, "CF_OWNERDISPLAY"),
        (CF_DSPTEXT, "CF_DSPTEXT"),
        (CF_DSPBITMAP, "CF_DSPBITMAP"),
        (CF_DSPMETAFILEPICT, "CF_DSPMETAFILEPICT"),
        (CF_DSPENHMETAFILE, "CF_DSPENHMETAFILE"),
    ])
});

/// Whether a format code is one of the predefined system formats.
pub fn is_predefined(format: u32) -> bool {
    PREDEFINED_NAMES.contains_key(&format)
}

/// Name of a predefined format code.
pub fn predefined_name(format: u32) -> Option<&'static str> {
    PREDEFINED_NAMES.get(&format).copied()
}

/// Whether a format code lies in the application-private range.
pub fn is_private(format: u32) -> bool {
    (CF_PRIVATEFIRST..=CF_PRIVATELAST).contains(&format)
}
