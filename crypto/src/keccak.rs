use digest::Digest;
use sha3::Keccak256;

use crate::CryptoHash;

/// Ethereum flavour of SHA-3 (original Keccak padding)
#[inline]
pub fn keccak256(data: impl AsRef<[u8]>) -> CryptoHash {
    Keccak256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        b"",
        hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
    )]
    #[case(
        b"hello",
        hex!("1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8")
    )]
    fn known_vectors(#[case] data: &[u8], #[case] expected: CryptoHash) {
        assert_eq!(keccak256(data), expected);
    }
}
