//! URL-safe base64 without padding.

use base64ct::{Base64UrlUnpadded, Encoding};

use super::CodecError;

#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decode unpadded base64url text.
///
/// # Errors
/// Returns `MalformedEncoding` for characters outside the URL-safe alphabet,
/// padding characters, or truncated input.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Base64UrlUnpadded::decode_vec(text).map_err(|_| CodecError::MalformedEncoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_byte_value() {
        let bytes: Vec<u8> = (0..=255).collect();
        let encoded = encode(&bytes);
        assert!(!encoded.contains(['+', '/', '=']));
        assert_eq!(decode(&encoded), Ok(bytes));
    }

    #[test]
    fn round_trips_short_inputs() {
        for len in 0..8 {
            let bytes = vec![0xfb_u8; len];
            assert_eq!(decode(&encode(&bytes)), Ok(bytes));
        }
    }

    #[test]
    fn encodes_without_padding() {
        assert_eq!(encode(b"a"), "YQ");
        assert_eq!(encode(b"ab"), "YWI");
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
    }

    #[test]
    fn rejects_standard_alphabet_and_padding() {
        assert_eq!(decode("+/8"), Err(CodecError::MalformedEncoding));
        assert_eq!(decode("YQ=="), Err(CodecError::MalformedEncoding));
        assert_eq!(decode("YW I"), Err(CodecError::MalformedEncoding));
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(decode("Y"), Err(CodecError::MalformedEncoding));
        assert_eq!(decode("YWJjZ"), Err(CodecError::MalformedEncoding));
    }
}
