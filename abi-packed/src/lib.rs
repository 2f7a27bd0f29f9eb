//! Non-standard packed ABI encoding, as produced by Solidity's
//! `abi.encodePacked` and ethers' `solidityPacked`.
//!
//! Top-level fields are concatenated with their minimal width (20 bytes for
//! `address`, 32 bytes for `uint256` and `bytes32`) without any padding or
//! length prefixes. Elements of arrays are the exception: each one occupies
//! a full 32-byte word, and the array itself carries no length.

mod address;
mod b256;
mod encode;
mod error;
mod into_sol;
mod sol_type;
mod value;

pub use self::{
    address::*, b256::*, encode::*, error::*, into_sol::*, sol_type::*, value::*,
};

pub use dataset_num_utils::U256;
pub use hex;

/// Width of a single ABI word
pub const WORD: usize = 32;
