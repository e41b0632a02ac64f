use std::borrow::Cow;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Which bytes of a value are percent-encoded.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EncodingMode {
    /// Encode every byte outside the unreserved set `[A-Za-z0-9-_.~]`.
    #[default]
    #[display(fmt = "full")]
    Full,
    /// Encode only non-ASCII bytes and the space character.
    ///
    /// Other ASCII punctuation such as `?`, `=` and `&` is left as is.
    #[display(fmt = "non_ascii_only")]
    NonAsciiOnly,
}

impl EncodingMode {
    /// The mode selected by the `only_non_ascii` configuration flag.
    pub fn from_only_non_ascii(only_non_ascii: bool) -> Self {
        if only_non_ascii {
            EncodingMode::NonAsciiOnly
        } else {
            EncodingMode::Full
        }
    }

    /// Return true if `byte` must be written as `%XX` in this mode.
    pub fn should_encode(self, byte: u8) -> bool {
        match self {
            EncodingMode::Full => !is_unreserved(byte),
            EncodingMode::NonAsciiOnly => byte == b' ' || !byte.is_ascii(),
        }
    }
}

/// Return true for bytes that are never percent-encoded.
pub fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

/// Percent-encode `value` according to `mode`.
///
/// Each byte selected by the mode is replaced with `%` followed by two
/// uppercase hex digits. Multi-byte characters are encoded one UTF-8 byte at
/// a time and space is written as `%20`. Already encoded input is encoded
/// again (`%` becomes `%25` in [EncodingMode::Full]).
///
/// Returns the input unchanged (borrowed) if no byte needs encoding.
pub fn encode(value: &str, mode: EncodingMode) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    let Some(first) = bytes.iter().position(|byte| mode.should_encode(*byte)) else {
        return Cow::Borrowed(value);
    };

    // Every mode encodes all non-ASCII bytes, so the prefix before the first
    // encoded byte is ASCII and `first` is a character boundary.
    let rest = &bytes[first..];
    let mut encoded = String::with_capacity(first + 3 * rest.len());
    encoded.push_str(&value[..first]);
    for &byte in rest {
        if mode.should_encode(byte) {
            encoded.push('%');
            encoded.push(HEX_UPPER[usize::from(byte >> 4)] as char);
            encoded.push(HEX_UPPER[usize::from(byte & 0x0F)] as char);
        } else {
            encoded.push(char::from(byte));
        }
    }
    Cow::Owned(encoded)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Reverse percent-encoding, for checking that no information is lost.
    fn decode(encoded: &str) -> Vec<u8> {
        let bytes = encoded.as_bytes();
        let mut decoded = Vec::with_capacity(bytes.len());
        let mut index = 0;
        while index < bytes.len() {
            if bytes[index] == b'%' {
                let hex = std::str::from_utf8(&bytes[index + 1..index + 3]).unwrap();
                decoded.push(u8::from_str_radix(hex, 16).unwrap());
                index += 3;
            } else {
                decoded.push(bytes[index]);
                index += 1;
            }
        }
        decoded
    }

    #[test]
    fn test_full_query() {
        assert_eq!(
            encode("?q= aあ", EncodingMode::Full),
            "%3Fq%3D%20a%E3%81%82"
        );
    }

    #[test]
    fn test_non_ascii_only_query() {
        assert_eq!(
            encode("?q= aあ", EncodingMode::NonAsciiOnly),
            "?q=%20a%E3%81%82"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(encode("", EncodingMode::Full), "");
        assert_eq!(encode("", EncodingMode::NonAsciiOnly), "");
    }

    #[test]
    fn test_unreserved_is_borrowed() {
        let value = "Az09-_.~";
        assert!(matches!(encode(value, EncodingMode::Full), Cow::Borrowed(_)));
        assert!(matches!(
            encode(value, EncodingMode::NonAsciiOnly),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_space_is_not_plus() {
        assert_eq!(encode("a b", EncodingMode::Full), "a%20b");
        assert_eq!(encode("a b", EncodingMode::NonAsciiOnly), "a%20b");
        assert_eq!(encode("a+b", EncodingMode::Full), "a%2Bb");
    }

    #[test]
    fn test_reencodes_percent() {
        assert_eq!(encode("%3F", EncodingMode::Full), "%253F");
        assert_eq!(encode("%3F", EncodingMode::NonAsciiOnly), "%3F");
    }

    #[test]
    fn test_zero_padded_hex() {
        assert_eq!(encode("\n\u{7f}", EncodingMode::Full), "%0A%7F");
        assert_eq!(encode("\u{80}", EncodingMode::Full), "%C2%80");
    }

    #[test]
    fn test_four_byte_character() {
        assert_eq!(encode("😀", EncodingMode::NonAsciiOnly), "%F0%9F%98%80");
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(EncodingMode::from_only_non_ascii(false), EncodingMode::Full);
        assert_eq!(
            EncodingMode::from_only_non_ascii(true),
            EncodingMode::NonAsciiOnly
        );
        assert_eq!(EncodingMode::default(), EncodingMode::Full);
    }

    #[test]
    fn test_mode_serde() {
        let mode: EncodingMode = serde_yaml::from_str("non_ascii_only").unwrap();
        assert_eq!(mode, EncodingMode::NonAsciiOnly);
        assert_eq!(mode.to_string(), "non_ascii_only");
        assert_eq!(
            serde_yaml::to_string(&EncodingMode::Full).unwrap().trim(),
            "full"
        );
    }

    proptest! {
        #[test]
        fn test_unreserved_unchanged(value in "[A-Za-z0-9._~-]*") {
            prop_assert_eq!(encode(&value, EncodingMode::Full), value.as_str());
            prop_assert_eq!(encode(&value, EncodingMode::NonAsciiOnly), value.as_str());
        }

        #[test]
        fn test_full_leaves_only_unreserved(value in any::<String>()) {
            let encoded = encode(&value, EncodingMode::Full);
            prop_assert!(encoded.bytes().all(|byte| byte == b'%' || is_unreserved(byte)));
            prop_assert_eq!(decode(&encoded), value.as_bytes());
        }

        #[test]
        fn test_non_ascii_only_keeps_punctuation(value in "([[:punct:]]|[^\\x00-\\x7F])*") {
            let encoded = encode(&value, EncodingMode::NonAsciiOnly);

            let mut expected = String::new();
            for c in value.chars() {
                if c.is_ascii() {
                    expected.push(c);
                } else {
                    let mut buf = [0; 4];
                    for byte in c.encode_utf8(&mut buf).bytes() {
                        expected.push_str(&format!("%{byte:02X}"));
                    }
                }
            }
            prop_assert_eq!(&*encoded, expected.as_str());
        }

        #[test]
        fn test_non_ascii_only_output_is_ascii(value in any::<String>()) {
            let encoded = encode(&value, EncodingMode::NonAsciiOnly);
            prop_assert!(encoded.is_ascii());
            prop_assert!(!encoded.contains(' '));
        }
    }
}
