use dataset_abi_packed::{SolType, SolValue};
use dataset_crypto::{CryptoHash, Payload, keccak256};
use dataset_erc191::Erc191Payload;
use derive_more::From;
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, EnumIter, EnumString};
use tracing::debug;

use crate::{FragmentProposeBatchMessage, FragmentProposeMessage, MintMessage};

/// A fixed tuple of Solidity values with a packed encoding.
pub trait PackedMessage {
    fn kind(&self) -> MessageKind;

    /// Field types, in packing order
    fn sol_types(&self) -> Vec<SolType>;

    /// Field values, in packing order
    fn sol_values(&self) -> Vec<SolValue>;

    /// Packs the fields without going through [`SolValue`].
    /// Agrees byte for byte with
    /// [`encode_packed`](dataset_abi_packed::encode_packed) of
    /// [`sol_types`](Self::sol_types) and [`sol_values`](Self::sol_values).
    fn encode_packed(&self) -> Vec<u8>;

    /// Same as [`encode_packed`](Self::encode_packed), with a debug log line
    fn build(&self) -> Vec<u8> {
        let bytes = self.encode_packed();
        debug!(kind = %self.kind(), len = bytes.len(), "built message");
        bytes
    }

    /// ERC-191 envelope of the packed bytes, the form wallets sign
    #[inline]
    fn to_erc191(&self) -> Erc191Payload {
        Erc191Payload::new(self.encode_packed())
    }
}

/// Any of the dataset messages, tagged by `kind` in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, From, EnumDiscriminants)]
#[strum_discriminants(
    name(MessageKind),
    derive(strum::Display, EnumString, EnumIter, Hash),
    strum(serialize_all = "snake_case"),
    vis(pub)
)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetMessage {
    Mint(MintMessage),
    FragmentPropose(FragmentProposeMessage),
    FragmentProposeBatch(FragmentProposeBatchMessage),
}

impl PackedMessage for DatasetMessage {
    #[inline]
    fn kind(&self) -> MessageKind {
        self.into()
    }

    fn sol_types(&self) -> Vec<SolType> {
        match self {
            Self::Mint(m) => m.sol_types(),
            Self::FragmentPropose(m) => m.sol_types(),
            Self::FragmentProposeBatch(m) => m.sol_types(),
        }
    }

    fn sol_values(&self) -> Vec<SolValue> {
        match self {
            Self::Mint(m) => m.sol_values(),
            Self::FragmentPropose(m) => m.sol_values(),
            Self::FragmentProposeBatch(m) => m.sol_values(),
        }
    }

    fn encode_packed(&self) -> Vec<u8> {
        match self {
            Self::Mint(m) => m.encode_packed(),
            Self::FragmentPropose(m) => m.encode_packed(),
            Self::FragmentProposeBatch(m) => m.encode_packed(),
        }
    }
}

impl Payload for DatasetMessage {
    /// `keccak256(abi.encodePacked(...))`, as computed on-chain
    #[inline]
    fn hash(&self) -> CryptoHash {
        keccak256(self.encode_packed())
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(
            MessageKind::iter().map(|k| k.to_string()).collect::<Vec<_>>(),
            ["mint", "fragment_propose", "fragment_propose_batch"],
        );
        assert_eq!(
            "fragment_propose".parse::<MessageKind>().unwrap(),
            MessageKind::FragmentPropose
        );
    }
}
