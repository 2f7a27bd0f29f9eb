//! 256-bit unsigned integers as used by Solidity `uint256` fields.
//!
//! [`U256`] is backed by [`bnum`], so values can't overflow once constructed.
//! Every textual form a caller might hold (decimal, `0x`/`0o`/`0b` prefixed) goes
//! through [`parse_u256`], which rejects anything that doesn't fit.

use core::num::IntErrorKind;

use thiserror::Error as ThisError;

pub use bnum::types::U256;

#[cfg(feature = "serde")]
pub mod serde;

/// Size of a big-endian `uint256` word in bytes
pub const U256_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum ParseU256Error {
    #[error("empty string")]
    Empty,
    #[error("invalid digit")]
    InvalidDigit,
    #[error("negative value")]
    Negative,
    #[error("value doesn't fit into 256 bits")]
    Overflow,
}

/// Parses an unsigned integer the way JS `BigInt` reads strings.
///
/// Surrounding whitespace is ignored. Decimal digits may carry a `+` sign,
/// and `-0` is zero. `0x`, `0o` and `0b` prefixes select the radix and
/// don't take a sign.
pub fn parse_u256(s: &str) -> Result<U256, ParseU256Error> {
    let s = s.trim();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = split_radix(unsigned);
    if radix != 10 && unsigned.len() != s.len() {
        return Err(ParseU256Error::InvalidDigit);
    }

    let n = parse_digits(digits, radix)?;
    if negative && n != U256::ZERO {
        return Err(ParseU256Error::Negative);
    }
    Ok(n)
}

fn split_radix(s: &str) -> (u32, &str) {
    let radix = match s.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return (10, s),
    };
    (radix, &s[2..])
}

fn parse_digits(digits: &str, radix: u32) -> Result<U256, ParseU256Error> {
    if digits.is_empty() {
        return Err(ParseU256Error::Empty);
    }
    // bnum reports overflow on any input wider than 256 bits, zeros included
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(U256::ZERO);
    }
    // bnum accepts a sign of its own
    if significant.starts_with('+') {
        return Err(ParseU256Error::InvalidDigit);
    }

    U256::from_str_radix(significant, radix).map_err(|err| match err.kind() {
        IntErrorKind::Empty => ParseU256Error::Empty,
        IntErrorKind::PosOverflow => ParseU256Error::Overflow,
        _ => ParseU256Error::InvalidDigit,
    })
}

/// Big-endian 32-byte representation
#[inline]
pub fn u256_to_be_bytes(n: &U256) -> [u8; U256_BYTES] {
    let mut bytes = [0u8; U256_BYTES];
    // digits are little-endian u64 limbs
    for (chunk, digit) in bytes.rchunks_exact_mut(8).zip(n.digits()) {
        chunk.copy_from_slice(&digit.to_be_bytes());
    }
    bytes
}

#[inline]
pub fn u256_from_be_bytes(bytes: [u8; U256_BYTES]) -> U256 {
    let Some(n) = U256::from_be_slice(&bytes) else {
        unreachable!("32 bytes always fit")
    };
    n
}
