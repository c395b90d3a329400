//! Codepage-aware string decoding.
//!
//! OPJ files store text in 8-bit Windows codepages, not UTF-8. Names,
//! units and comments with non-ASCII characters decode correctly only
//! through the locale-appropriate codepage; the decoder defaults to
//! Windows-1252 and lets the caller override it.

use encoding_rs::Encoding;

/// Map a Windows codepage identifier to an encoding.
///
/// Covers the codepages Origin installations actually used; anything
/// else falls back to `None` and the caller keeps the default.
pub fn codepage_encoding(codepage: u16) -> Option<&'static Encoding> {
    match codepage {
        874 => Some(encoding_rs::WINDOWS_874),   // Thai
        932 => Some(encoding_rs::SHIFT_JIS),     // Japanese
        936 => Some(encoding_rs::GBK),           // Simplified Chinese
        949 => Some(encoding_rs::EUC_KR),        // Korean
        950 => Some(encoding_rs::BIG5),          // Traditional Chinese
        1250 => Some(encoding_rs::WINDOWS_1250), // Central European
        1251 => Some(encoding_rs::WINDOWS_1251), // Cyrillic
        1252 => Some(encoding_rs::WINDOWS_1252), // Western European
        1253 => Some(encoding_rs::WINDOWS_1253), // Greek
        1254 => Some(encoding_rs::WINDOWS_1254), // Turkish
        1255 => Some(encoding_rs::WINDOWS_1255), // Hebrew
        1256 => Some(encoding_rs::WINDOWS_1256), // Arabic
        1257 => Some(encoding_rs::WINDOWS_1257), // Baltic
        1258 => Some(encoding_rs::WINDOWS_1258), // Vietnamese
        _ => None,
    }
}

/// Decode a null-padded or null-terminated byte field.
///
/// Text stops at the first null byte; the rest of the field is
/// padding.
pub fn decode_terminated(bytes: &[u8], codepage: u16) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let encoding = codepage_encoding(codepage).unwrap_or(encoding_rs::WINDOWS_1252);
    encoding.decode(&bytes[..end]).0.into_owned()
}
