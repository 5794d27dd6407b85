//! Boundary adapter from legacy-encoded bytes to canonical text
//!
//! ETC exports are written in Shift_JIS. Everything past this module works
//! on UTF-8 `str`, so the parser can be exercised entirely on text fixtures.

use crate::constants::UTF8_BOM;
use crate::{Error, Result};
use encoding_rs::Encoding;
use tracing::{debug, warn};

/// Look up an encoding by its WHATWG label (`shift_jis`, `utf-8`, ...)
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::encoding(format!("unknown text encoding label '{}'", label)))
}

/// Decode raw file bytes into UTF-8 text
///
/// Malformed sequences are replaced with U+FFFD rather than failing the
/// batch; a byte order mark, if present, selects the encoding and is removed.
pub fn decode_bytes(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = resolve_encoding(label)?;
    let (text, used, had_errors) = encoding.decode(bytes);

    if had_errors {
        warn!(
            "Input contained byte sequences invalid in {}; replaced with U+FFFD",
            used.name()
        );
    }
    debug!("Decoded {} bytes as {}", bytes.len(), used.name());

    Ok(text.into_owned())
}

/// Remove a leading UTF-8 byte order mark from inline text
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(UTF8_BOM).unwrap_or(text)
}
