use dataset_crypto::{CryptoHash, Payload, keccak256};
use impl_tools::autoimpl;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

/// Raw bytes wrapped into the `personal_sign` envelope.
/// See [ERC-191](https://eips.ethereum.org/EIPS/eip-191), version `0x45`.
///
/// The digest is what `signer.signMessage(bytes)` signs in ethers.
#[serde_as]
#[autoimpl(Deref using self.0)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Erc191Payload(#[serde_as(as = "Hex")] pub Vec<u8>);

impl Erc191Payload {
    pub const PREFIX: &str = "\x19Ethereum Signed Message:\n";

    #[inline]
    pub const fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    #[inline]
    pub fn prehash(&self) -> Vec<u8> {
        [
            format!("{}{}", Self::PREFIX, self.0.len()).as_bytes(),
            &self.0,
        ]
        .concat()
    }
}

impl From<Vec<u8>> for Erc191Payload {
    #[inline]
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl Payload for Erc191Payload {
    #[inline]
    fn hash(&self) -> CryptoHash {
        keccak256(self.prehash())
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        b"Hello World",
        hex!("a1de988600a42c4b4ab089b619297c17d53cffae5d5120d82d8a92d0bb3b78f2")
    )]
    fn known_hashes(#[case] data: &[u8], #[case] expected: CryptoHash) {
        assert_eq!(Erc191Payload::new(data.to_vec()).hash(), expected);
    }

    #[test]
    fn prehash_uses_decimal_length() {
        let payload = Erc191Payload::new(vec![0xab; 104]);
        let prehash = payload.prehash();

        let prefix = b"\x19Ethereum Signed Message:\n104";
        assert_eq!(&prehash[..prefix.len()], prefix);
        assert_eq!(&prehash[prefix.len()..], payload.as_slice());
        assert_eq!(payload.hash(), keccak256(&prehash));
    }

    #[test]
    fn hex_json() {
        let payload = Erc191Payload::new(hex!("deadbeef").to_vec());
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#""deadbeef""#);
        assert_eq!(serde_json::from_str::<Erc191Payload>(&json).unwrap(), payload);
    }
}
