//! encoding.rs
//! Repair tag text that was decoded under the wrong single-byte encoding.
//!
//! Old rips often store cp1251 (or similar) bytes in ID3 fields without
//! declaring it, so players decode them as Latin-1 and show mojibake.
//! The repair walks the damage backwards: every char maps back to its
//! Latin-1 byte, and the byte sequence is decoded with the encoding the
//! text was actually written in.

use encoding_rs::Encoding;
use log::warn;

use crate::config::NO_ENCODING_FIX;
use crate::error::{ConfigError, FileError};

/// Re-decode `text` under `target`.
///
/// - `target` equal to the skip sentinel (case-insensitive) is an identity.
/// - Text containing a char above U+00FF was never Latin-1 damage; it is
///   logged and returned unchanged.
/// - An unknown `target` label fails with [`FileError::UnknownEncoding`].
pub fn fix(text: &str, target: &str) -> Result<String, FileError> {
    if target.eq_ignore_ascii_case(NO_ENCODING_FIX) {
        return Ok(text.to_string());
    }
    let encoding = Encoding::for_label(target.as_bytes())
        .ok_or_else(|| FileError::UnknownEncoding(target.to_string()))?;

    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let cp = ch as u32;
        if cp > 0xFF {
            warn!("`{text}` is not latin-1 (contains {ch:?}), leaving it unchanged");
            return Ok(text.to_string());
        }
        bytes.push(cp as u8);
    }

    let (decoded, _, _) = encoding.decode(&bytes);
    Ok(decoded.into_owned())
}

/// Eager label check for configuration time.
pub fn validate_label(target: &str) -> Result<(), ConfigError> {
    if target.eq_ignore_ascii_case(NO_ENCODING_FIX)
        || Encoding::for_label(target.as_bytes()).is_some()
    {
        Ok(())
    } else {
        Err(ConfigError::UnknownEncoding(target.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// "Привет" as windows-1251 bytes, mis-decoded as Latin-1.
    fn garbled_privet() -> String {
        [0xCFu8, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2]
            .iter()
            .map(|&b| b as char)
            .collect()
    }

    #[test]
    fn skip_sentinel_is_identity() {
        assert_eq!(fix("Ïðèâåò", "none").unwrap(), "Ïðèâåò");
        assert_eq!(fix("Ïðèâåò", "None").unwrap(), "Ïðèâåò");
    }

    #[test]
    fn skip_then_fix_equals_fix() {
        let garbled = garbled_privet();
        let skipped = fix(&garbled, "none").unwrap();
        assert_eq!(fix(&skipped, "cp1251").unwrap(), fix(&garbled, "cp1251").unwrap());
    }

    #[test]
    fn repairs_cp1251_mojibake() {
        assert_eq!(fix(&garbled_privet(), "cp1251").unwrap(), "Привет");
    }

    #[test]
    fn non_latin1_text_is_left_unchanged() {
        assert_eq!(fix("Привет", "cp1251").unwrap(), "Привет");
    }

    #[test]
    fn unknown_label_fails() {
        assert!(matches!(
            fix("abc", "klingon"),
            Err(FileError::UnknownEncoding(label)) if label == "klingon"
        ));
    }

    #[test]
    fn validate_label_accepts_sentinel_and_known_labels() {
        assert!(validate_label("none").is_ok());
        assert!(validate_label("cp1251").is_ok());
        assert!(validate_label("utf-8").is_ok());
        assert!(validate_label("klingon").is_err());
    }
}
