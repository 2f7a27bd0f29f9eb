//! Traits for hashing message payloads.
//!
//! Each message kind (a packed dataset message, an ERC-191 envelope around
//! it) implements [`Payload`], so callers can compute the digest to sign
//! without knowing how the bytes were laid out.

/// 32-byte digest
pub type CryptoHash = [u8; 32];

/// Bytes with a fixed on-chain digest.
///
/// For a packed message this is `keccak256(abi.encodePacked(...))` as the
/// contract recomputes it; for an envelope it is the digest over the prefixed
/// bytes.
pub trait Payload {
    fn hash(&self) -> CryptoHash;
}

impl<P> Payload for &P
where
    P: Payload + ?Sized,
{
    #[inline]
    fn hash(&self) -> CryptoHash {
        (**self).hash()
    }
}
