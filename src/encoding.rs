//! Text encoding detection for uploaded bytes.
//!
//! Report exports arrive in a mix of UTF-8 (with or without a byte-order
//! marker) and legacy Shift_JIS. Candidates are probed strictly in that
//! order: the marker is an unambiguous signal, plain UTF-8 is the
//! general-purpose fallback, and Shift_JIS goes last because nearly any
//! byte sequence decodes under it and it would shadow the safer candidates.

use encoding_rs::SHIFT_JIS;

use crate::error::{ProcessError, ProcessResult};

/// The UTF-8 byte-order marker.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// A decoding under which an uploaded byte stream was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// UTF-8 with a leading byte-order marker.
    Utf8Bom,
    /// Plain UTF-8.
    Utf8,
    /// Shift_JIS (legacy double-byte).
    ShiftJis,
}

impl SourceEncoding {
    /// Detect the first candidate encoding under which `bytes` decode
    /// without error.
    pub fn detect(bytes: &[u8]) -> ProcessResult<Self> {
        Self::decode(bytes).map(|(encoding, _)| encoding)
    }

    /// Detect and decode in one pass.
    ///
    /// The returned text has the byte-order marker stripped when one was
    /// present. Probing is side-effect free; failure of all three
    /// candidates is [`ProcessError::UnsupportedEncoding`].
    pub fn decode(bytes: &[u8]) -> ProcessResult<(Self, String)> {
        if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
            if let Ok(text) = std::str::from_utf8(rest) {
                return Ok((Self::Utf8Bom, text.to_owned()));
            }
        }
        if let Ok(text) = std::str::from_utf8(bytes) {
            return Ok((Self::Utf8, text.to_owned()));
        }
        // Strict decode: no replacement characters, malformed input fails.
        if let Some(text) = SHIFT_JIS.decode_without_bom_handling_and_without_replacement(bytes) {
            return Ok((Self::ShiftJis, text.into_owned()));
        }
        Err(ProcessError::UnsupportedEncoding)
    }
}

/// Re-encode `text` as UTF-8 with a leading byte-order marker.
pub fn encode_utf8_bom(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
    out.extend_from_slice(&UTF8_BOM);
    out.extend_from_slice(text.as_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::{encode_utf8_bom, SourceEncoding, UTF8_BOM};

    #[test]
    fn marker_is_preferred_over_plain_utf8() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("a,b\n1,2\n".as_bytes());

        let (encoding, text) = SourceEncoding::decode(&bytes).unwrap();
        assert_eq!(encoding, SourceEncoding::Utf8Bom);
        assert_eq!(text, "a,b\n1,2\n");
    }

    #[test]
    fn plain_utf8_decodes_without_marker() {
        let (encoding, text) = SourceEncoding::decode("性別,imp\n".as_bytes()).unwrap();
        assert_eq!(encoding, SourceEncoding::Utf8);
        assert_eq!(text, "性別,imp\n");
    }

    #[test]
    fn shift_jis_is_the_last_resort() {
        // 性別 in Shift_JIS.
        let bytes = [0x90, 0xAB, 0x95, 0xCA];
        let (encoding, text) = SourceEncoding::decode(&bytes).unwrap();
        assert_eq!(encoding, SourceEncoding::ShiftJis);
        assert_eq!(text, "性別");
    }

    #[test]
    fn undecodable_bytes_are_rejected() {
        // 0xFF is not a valid lead byte in any candidate.
        let err = SourceEncoding::decode(&[0xFF, 0xFF]).unwrap_err();
        assert_eq!(err.kind(), "unsupported_encoding");
    }

    #[test]
    fn encode_utf8_bom_prepends_the_marker() {
        let bytes = encode_utf8_bom("a,b\n");
        assert!(bytes.starts_with(&UTF8_BOM));
        assert_eq!(&bytes[UTF8_BOM.len()..], "a,b\n".as_bytes());
    }
}
