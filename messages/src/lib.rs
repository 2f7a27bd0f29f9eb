//! Messages signed off-chain for the dataset contracts.
//!
//! Each message is a fixed tuple of Solidity values packed with
//! `abi.encodePacked` semantics (see [`dataset_abi_packed`]). The contracts
//! rebuild the same bytes from their call arguments and check the signature
//! over them, so the layout here must match theirs byte for byte:
//!
//! | message | types | length |
//! |---|---|---|
//! | [`MintMessage`] | `uint256, address, uint256, address` | 104 |
//! | [`FragmentProposeMessage`] | `uint256, address, uint256, uint256, address, bytes32` | 168 |
//! | [`FragmentProposeBatchMessage`] | `uint256, address, uint256, uint256, address[], bytes32[]` | 116 + 64 per pair |
//!
//! The `build_*` functions accept any representation convertible through
//! [`TryIntoSol`], so `42`, `"42"` and `"0x2a"` produce identical bytes.
//! The returned bytes are raw; hashing and signing are up to the caller
//! (see [`Payload`] and [`PackedMessage::to_erc191`]).

mod error;
mod fragment;
mod message;
mod mint;

pub use self::{error::*, fragment::*, message::*, mint::*};

pub use dataset_abi_packed::{Address, B256, SolType, SolValue, TryIntoSol, U256};
pub use dataset_crypto::{CryptoHash, Payload};
pub use dataset_erc191::Erc191Payload;
