use dataset_abi_packed::{
    Address, PackedEncode, SolType, SolValue, TryIntoSol, U256, WORD, coerce,
};
use dataset_crypto::{CryptoHash, Payload, keccak256};
use dataset_num_utils::serde::AsU256;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{MessageKind, PackedMessage, Result};

/// Authorizes minting of dataset `dataset_id` on `dataset_address` to
/// `owner_address`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintMessage {
    #[serde_as(as = "AsU256")]
    pub chain_id: U256,
    pub dataset_address: Address,
    #[serde_as(as = "AsU256")]
    pub dataset_id: U256,
    pub owner_address: Address,
}

impl MintMessage {
    pub const PACKED_LEN: usize = 2 * WORD + 2 * Address::LEN;

    #[inline]
    pub const fn new(
        chain_id: U256,
        dataset_address: Address,
        dataset_id: U256,
        owner_address: Address,
    ) -> Self {
        Self {
            chain_id,
            dataset_address,
            dataset_id,
            owner_address,
        }
    }

    pub fn try_new(
        chain_id: impl TryIntoSol<U256>,
        dataset_address: impl TryIntoSol<Address>,
        dataset_id: impl TryIntoSol<U256>,
        owner_address: impl TryIntoSol<Address>,
    ) -> Result<Self> {
        Ok(Self::new(
            coerce(chain_id)?,
            coerce(dataset_address)?,
            coerce(dataset_id)?,
            coerce(owner_address)?,
        ))
    }
}

impl PackedMessage for MintMessage {
    #[inline]
    fn kind(&self) -> MessageKind {
        MessageKind::Mint
    }

    fn sol_types(&self) -> Vec<SolType> {
        vec![
            SolType::Uint256,
            SolType::Address,
            SolType::Uint256,
            SolType::Address,
        ]
    }

    fn sol_values(&self) -> Vec<SolValue> {
        vec![
            self.chain_id.into(),
            self.dataset_address.into(),
            self.dataset_id.into(),
            self.owner_address.into(),
        ]
    }

    fn encode_packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::PACKED_LEN);
        self.chain_id.encode_packed_to(&mut out);
        self.dataset_address.encode_packed_to(&mut out);
        self.dataset_id.encode_packed_to(&mut out);
        self.owner_address.encode_packed_to(&mut out);
        out
    }
}

impl Payload for MintMessage {
    #[inline]
    fn hash(&self) -> CryptoHash {
        keccak256(self.encode_packed())
    }
}

/// Packs `[uint256, address, uint256, address]`, always 104 bytes.
pub fn build_mint_message(
    chain_id: impl TryIntoSol<U256>,
    dataset_address: impl TryIntoSol<Address>,
    dataset_id: impl TryIntoSol<U256>,
    owner_address: impl TryIntoSol<Address>,
) -> Result<Vec<u8>> {
    MintMessage::try_new(chain_id, dataset_address, dataset_id, owner_address)
        .map(|message| message.build())
}
