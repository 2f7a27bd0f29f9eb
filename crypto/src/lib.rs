//! Hashing primitives shared by the dataset message crates.
//!
//! This crate defines the [`Payload`] trait that lets every message kind
//! expose the digest a contract would reconstruct, plus the [`keccak256`]
//! function they all build on. Signing and verification happen elsewhere.

mod keccak;
mod payload;

pub use self::{keccak::*, payload::*};
