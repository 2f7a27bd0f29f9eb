use core::{fmt, str::FromStr};

use dataset_crypto::keccak256;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error as ThisError;

/// 20-byte account address.
///
/// Parses from hex with an optional `0x` prefix. Inputs that mix upper and
/// lower case must carry a valid
/// [EIP-55](https://eips.ethereum.org/EIPS/eip-55) checksum.
/// Displays in checksummed form.
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
pub struct Address([u8; 20]);

impl Address {
    pub const LEN: usize = 20;
    pub const ZERO: Self = Self([0; Self::LEN]);

    #[inline]
    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + 2 * Self::LEN);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let shift = if i % 2 == 0 { 4 } else { 0 };
            let nibble = (hash[i / 2] >> shift) & 0x0f;
            out.push(if nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            });
        }
        out
    }
}

impl AsRef<[u8]> for Address {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ParseAddressError {
    #[error("hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("expected 40 hex digits, got {0}")]
    Length(usize),
    #[error("bad address checksum")]
    Checksum,
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 2 * Self::LEN {
            return Err(ParseAddressError::Length(digits.len()));
        }

        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(digits, &mut bytes)?;
        let address = Self(bytes);

        let mixed_case = digits.chars().any(|c| c.is_ascii_lowercase())
            && digits.chars().any(|c| c.is_ascii_uppercase());
        if mixed_case && address.to_checksum()[2..] != *digits {
            return Err(ParseAddressError::Checksum);
        }

        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use arbitrary::{Arbitrary, Unstructured};
    use dataset_test_utils::random::random_bytes;
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")]
    #[case("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359")]
    #[case("0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB")]
    #[case("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb")]
    fn checksum(#[case] s: &str) {
        let address: Address = s.parse().unwrap();
        assert_eq!(address.to_string(), s);

        // single case skips checksum validation
        assert_eq!(s.to_lowercase().parse::<Address>().unwrap(), address);
        assert_eq!(
            format!("0x{}", s[2..].to_uppercase()).parse::<Address>().unwrap(),
            address
        );
    }

    #[test]
    fn bad_checksum() {
        assert_eq!(
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD"
                .parse::<Address>()
                .unwrap_err(),
            ParseAddressError::Checksum,
        );
    }

    #[rstest]
    #[case("not-an-address")]
    #[case("")]
    #[case("0x")]
    #[case("0x00000000000000000000000000000000000000")]
    #[case("0x000000000000000000000000000000000000000001")]
    #[case("0x000000000000000000000000000000000000000g")]
    #[case("0X0000000000000000000000000000000000000001")]
    fn invalid(#[case] s: &str) {
        assert!(s.parse::<Address>().is_err());
    }

    #[test]
    fn without_prefix() {
        assert_eq!(
            "0000000000000000000000000000000000000001"
                .parse::<Address>()
                .unwrap(),
            Address::new(hex!("0000000000000000000000000000000000000001")),
        );
    }

    #[rstest]
    fn display_roundtrip(random_bytes: Vec<u8>) {
        let mut u = Unstructured::new(&random_bytes);
        let address = Address::arbitrary(&mut u).unwrap();

        assert_eq!(address.to_string().parse::<Address>().unwrap(), address);
        assert_eq!(format!("{address:#x}").parse::<Address>().unwrap(), address);
        assert_eq!(format!("{address:x}").len(), 40);
    }
}
