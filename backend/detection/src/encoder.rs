//! Image transport encoding: raw bytes to an embeddable `data:` URI.

use base64::{engine::general_purpose::STANDARD, Engine};

pub const JPEG_MIME: &str = "image/jpeg";

/// Prefix of every URI produced by [`jpeg_data_url`].
pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// JPEG start-of-image marker followed by the first segment marker byte.
const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Encode bytes as a JPEG data URI. The bytes are not inspected.
pub fn jpeg_data_url(bytes: &[u8]) -> String {
    data_url(JPEG_MIME, bytes)
}

pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Cheap format sniff on the leading bytes.
pub fn looks_like_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&JPEG_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let samples: [&[u8]; 4] = [
            b"\xFF\xD8\xFF\xE0fake jpeg",
            b"x",
            &[0u8, 1, 2, 253, 254, 255],
            b"not an image at all",
        ];
        for bytes in samples {
            let url = jpeg_data_url(bytes);
            let payload = url.strip_prefix(JPEG_DATA_URL_PREFIX).unwrap();
            assert_eq!(STANDARD.decode(payload).unwrap(), bytes);
        }
    }

    #[test]
    fn uses_padded_standard_alphabet() {
        assert_eq!(jpeg_data_url(&[0xFB, 0xFF]), "data:image/jpeg;base64,+/8=");
    }

    #[test]
    fn sniffs_jpeg_magic() {
        assert!(looks_like_jpeg(&[0xFF, 0xD8, 0xFF, 0xDB, 0x00]));
        assert!(!looks_like_jpeg(b"\x89PNG\r\n\x1a\n"));
        assert!(!looks_like_jpeg(&[0xFF, 0xD8]));
    }
}
