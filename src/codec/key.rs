//! Key Codec
//!
//! UTF-8 string encoding for keys and hash field names.

use crate::error::{CacheError, Result};

// == String Codec ==
/// Encodes keys as their raw UTF-8 bytes, with no escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl StringCodec {
    /// Encodes a key into the bytes sent to the store.
    pub fn encode(&self, key: &str) -> Vec<u8> {
        key.as_bytes().to_vec()
    }

    /// Decodes bytes read back from the store into a key.
    ///
    /// Fails with `SerializationFailure` if the bytes are not valid UTF-8.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| CacheError::SerializationFailure(format!("key is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_raw_utf8() {
        let codec = StringCodec;
        assert_eq!(codec.encode("666"), b"666".to_vec());
        assert_eq!(codec.encode("键"), "键".as_bytes().to_vec());
    }

    #[test]
    fn test_decode_utf8() {
        let codec = StringCodec;
        assert_eq!(codec.decode("哈哈哈".as_bytes()).unwrap(), "哈哈哈");
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let codec = StringCodec;
        let result = codec.decode(&[0xff, 0xfe]);
        assert!(matches!(result, Err(CacheError::SerializationFailure(_))));
    }
}
