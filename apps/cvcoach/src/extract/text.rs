use tracing::{debug, warn};

use super::ExtractError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Decodes a plain-text upload. The content is returned as decoded, not trimmed.
pub fn read_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let text = decode(bytes).ok_or_else(|| {
        warn!(len = bytes.len(), "TXT upload has a UTF-16 BOM but malformed content");
        ExtractError::CorruptedText
    })?;

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyText);
    }

    Ok(text)
}

fn decode(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return Some(decode_utf8(rest));
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    Some(decode_utf8(bytes))
}

/// Strict UTF-8 first. Legacy encodings (Windows-1252 from Word or Notepad)
/// fall back to a lossy decode with replacement characters.
fn decode_utf8(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(e) => {
            debug!(valid_up_to = e.valid_up_to(), "TXT upload is not UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_is_returned_unchanged() {
        let input = "  Experienced backend engineer, 5 years.\n\nSkills: Rust, Go\n";
        assert_eq!(read_text(input.as_bytes()).unwrap(), input);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        for input in ["", " ", "\n\n\t  \r\n"] {
            assert_eq!(
                read_text(input.as_bytes()).unwrap_err(),
                ExtractError::EmptyText,
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_windows_1252_cv_is_accepted() {
        let text = read_text(b"R\xe9sum\xe9 - Project manager, 8 years.").unwrap();
        assert_eq!(text, "R\u{FFFD}sum\u{FFFD} - Project manager, 8 years.");
    }

    #[test]
    fn test_invalid_utf8_after_bom_is_decoded_lossily() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(&[0x43, 0x56, 0xC3, 0x28, 0xFF]);
        assert_eq!(read_text(&bytes).unwrap(), "CV\u{FFFD}(\u{FFFD}");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("Adébáyọ̀ Ọlá".as_bytes());
        assert_eq!(read_text(&bytes).unwrap(), "Adébáyọ̀ Ọlá");
    }

    #[test]
    fn test_utf16_with_bom_is_decoded() {
        let mut le = UTF16_LE_BOM.to_vec();
        let mut be = UTF16_BE_BOM.to_vec();
        for unit in "Data analyst".encode_utf16() {
            le.extend_from_slice(&unit.to_le_bytes());
            be.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(read_text(&le).unwrap(), "Data analyst");
        assert_eq!(read_text(&be).unwrap(), "Data analyst");
    }

    #[test]
    fn test_truncated_utf16_is_corrupted() {
        let bytes = [0xFF, 0xFE, 0x41, 0x00, 0x42];
        assert_eq!(read_text(&bytes).unwrap_err(), ExtractError::CorruptedText);
    }
}
