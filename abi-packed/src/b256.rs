use core::{fmt, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error as ThisError;

/// Fixed 32-byte value, Solidity `bytes32`
#[cfg_attr(any(feature = "arbitrary", test), derive(arbitrary::Arbitrary))]
#[derive(
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    derive_more::From,
    derive_more::Into,
)]
pub struct B256([u8; 32]);

impl B256 {
    pub const LEN: usize = 32;
    pub const ZERO: Self = Self([0; Self::LEN]);

    #[inline]
    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// UTF-8 bytes of `s`, right-padded with zeros.
    /// At least one trailing zero byte is kept, so `s` is limited to 31 bytes.
    pub fn encode_short_string(s: &str) -> Result<Self, ParseB256Error> {
        let data = s.as_bytes();
        if data.len() >= Self::LEN {
            return Err(ParseB256Error::StringTooLong(data.len()));
        }
        let mut bytes = [0u8; Self::LEN];
        bytes[..data.len()].copy_from_slice(data);
        Ok(Self(bytes))
    }

    /// Inverse of [`B256::encode_short_string`]
    pub fn decode_short_string(&self) -> Option<String> {
        let [data @ .., 0] = &self.0 else {
            return None;
        };
        let len = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        String::from_utf8(data[..len].to_vec()).ok()
    }
}

impl AsRef<[u8]> for B256 {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for B256 {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for B256 {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ParseB256Error {
    #[error("hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error("expected 64 hex digits, got {0}")]
    Length(usize),
    #[error("string is too long for bytes32: {0} bytes")]
    StringTooLong(usize),
}

impl FromStr for B256 {
    type Err = ParseB256Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").ok_or(ParseB256Error::MissingPrefix)?;
        if digits.len() != 2 * Self::LEN {
            return Err(ParseB256Error::Length(digits.len()));
        }
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    #[test]
    fn parse() {
        let s = "0x0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20";
        let value: B256 = s.parse().unwrap();
        assert_eq!(
            value,
            B256::new(hex!(
                "0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20"
            ))
        );
        assert_eq!(value.to_string(), s);
        assert_eq!(
            s[2..].parse::<B256>().unwrap_err(),
            ParseB256Error::MissingPrefix
        );
    }

    #[rstest]
    #[case("0x01", ParseB256Error::Length(2))]
    #[case("0x", ParseB256Error::Length(0))]
    #[case("", ParseB256Error::MissingPrefix)]
    #[case("0X01", ParseB256Error::MissingPrefix)]
    #[case(
        "0x0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f2021",
        ParseB256Error::Length(66)
    )]
    fn invalid(#[case] s: &str, #[case] err: ParseB256Error) {
        assert_eq!(s.parse::<B256>().unwrap_err(), err);
    }

    #[test]
    fn invalid_hex() {
        assert!(matches!(
            "0xzz02030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20".parse::<B256>(),
            Err(ParseB256Error::Hex(_))
        ));
    }

    #[rstest]
    #[case("", hex!("0000000000000000000000000000000000000000000000000000000000000000"))]
    #[case("image", hex!("696d616765000000000000000000000000000000000000000000000000000000"))]
    #[case(
        "0123456789012345678901234567890",
        hex!("3031323334353637383930313233343536373839303132333435363738393000")
    )]
    fn short_string(#[case] s: &str, #[case] expected: [u8; 32]) {
        let encoded = B256::encode_short_string(s).unwrap();
        assert_eq!(encoded, B256::new(expected));
        assert_eq!(encoded.decode_short_string().as_deref(), Some(s));
    }

    #[test]
    fn short_string_too_long() {
        assert_eq!(
            B256::encode_short_string("01234567890123456789012345678901").unwrap_err(),
            ParseB256Error::StringTooLong(32),
        );
        assert_eq!(B256::new([0xff; 32]).decode_short_string(), None);
    }
}
