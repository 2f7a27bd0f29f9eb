use dataset_abi_packed::{
    Address, B256, PackedEncode, SolType, SolValue, TryIntoSol, U256, WORD, coerce, coerce_all,
};
use dataset_crypto::{CryptoHash, Payload, keccak256};
use dataset_num_utils::serde::AsU256;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{MessageError, MessageKind, PackedMessage, Result};

/// Proposal of a single fragment tagged with `tag` for dataset `dataset_id`.
///
/// `counter` is the proposer's fragment counter on the contract; it is packed
/// as given.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentProposeMessage {
    #[serde_as(as = "AsU256")]
    pub chain_id: U256,
    pub dataset_address: Address,
    #[serde_as(as = "AsU256")]
    pub dataset_id: U256,
    #[serde_as(as = "AsU256")]
    pub counter: U256,
    pub owner: Address,
    pub tag: B256,
}

impl FragmentProposeMessage {
    pub const PACKED_LEN: usize = 4 * WORD + 2 * Address::LEN;

    #[inline]
    pub const fn new(
        chain_id: U256,
        dataset_address: Address,
        dataset_id: U256,
        counter: U256,
        owner: Address,
        tag: B256,
    ) -> Self {
        Self {
            chain_id,
            dataset_address,
            dataset_id,
            counter,
            owner,
            tag,
        }
    }

    pub fn try_new(
        chain_id: impl TryIntoSol<U256>,
        dataset_address: impl TryIntoSol<Address>,
        dataset_id: impl TryIntoSol<U256>,
        counter: impl TryIntoSol<U256>,
        owner: impl TryIntoSol<Address>,
        tag: impl TryIntoSol<B256>,
    ) -> Result<Self> {
        Ok(Self::new(
            coerce(chain_id)?,
            coerce(dataset_address)?,
            coerce(dataset_id)?,
            coerce(counter)?,
            coerce(owner)?,
            coerce(tag)?,
        ))
    }
}

impl PackedMessage for FragmentProposeMessage {
    #[inline]
    fn kind(&self) -> MessageKind {
        MessageKind::FragmentPropose
    }

    fn sol_types(&self) -> Vec<SolType> {
        vec![
            SolType::Uint256,
            SolType::Address,
            SolType::Uint256,
            SolType::Uint256,
            SolType::Address,
            SolType::Bytes32,
        ]
    }

    fn sol_values(&self) -> Vec<SolValue> {
        vec![
            self.chain_id.into(),
            self.dataset_address.into(),
            self.dataset_id.into(),
            self.counter.into(),
            self.owner.into(),
            self.tag.into(),
        ]
    }

    fn encode_packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::PACKED_LEN);
        self.chain_id.encode_packed_to(&mut out);
        self.dataset_address.encode_packed_to(&mut out);
        self.dataset_id.encode_packed_to(&mut out);
        self.counter.encode_packed_to(&mut out);
        self.owner.encode_packed_to(&mut out);
        self.tag.encode_packed_to(&mut out);
        out
    }
}

impl Payload for FragmentProposeMessage {
    #[inline]
    fn hash(&self) -> CryptoHash {
        keccak256(self.encode_packed())
    }
}

/// Proposal of several fragments at once. `owners[i]` proposes the fragment
/// tagged `tags[i]`, so both lists always have the same length.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedFragmentProposeBatchMessage")]
pub struct FragmentProposeBatchMessage {
    #[serde_as(as = "AsU256")]
    pub chain_id: U256,
    pub dataset_address: Address,
    #[serde_as(as = "AsU256")]
    pub dataset_id: U256,
    #[serde_as(as = "AsU256")]
    pub counter: U256,
    owners: Vec<Address>,
    tags: Vec<B256>,
}

impl FragmentProposeBatchMessage {
    /// Length of the four leading scalar fields
    pub const HEADER_LEN: usize = 3 * WORD + Address::LEN;

    /// Array elements are padded to a full word each
    #[inline]
    pub const fn packed_len(pairs: usize) -> usize {
        Self::HEADER_LEN + 2 * WORD * pairs
    }

    pub fn new(
        chain_id: U256,
        dataset_address: Address,
        dataset_id: U256,
        counter: U256,
        owners: Vec<Address>,
        tags: Vec<B256>,
    ) -> Result<Self> {
        if owners.len() != tags.len() {
            return Err(MessageError::LengthMismatch {
                owners: owners.len(),
                tags: tags.len(),
            });
        }
        Ok(Self {
            chain_id,
            dataset_address,
            dataset_id,
            counter,
            owners,
            tags,
        })
    }

    pub fn try_new<O, T>(
        chain_id: impl TryIntoSol<U256>,
        dataset_address: impl TryIntoSol<Address>,
        dataset_id: impl TryIntoSol<U256>,
        counter: impl TryIntoSol<U256>,
        owners: impl IntoIterator<Item = O>,
        tags: impl IntoIterator<Item = T>,
    ) -> Result<Self>
    where
        O: TryIntoSol<Address>,
        T: TryIntoSol<B256>,
    {
        Self::new(
            coerce(chain_id)?,
            coerce(dataset_address)?,
            coerce(dataset_id)?,
            coerce(counter)?,
            coerce_all(owners)?,
            coerce_all(tags)?,
        )
    }

    #[inline]
    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    #[inline]
    pub fn tags(&self) -> &[B256] {
        &self.tags
    }

    /// `(owner, tag)` pairs in packing order
    #[inline]
    pub fn pairs(&self) -> impl Iterator<Item = (&Address, &B256)> {
        self.owners.iter().zip(&self.tags)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl PackedMessage for FragmentProposeBatchMessage {
    #[inline]
    fn kind(&self) -> MessageKind {
        MessageKind::FragmentProposeBatch
    }

    fn sol_types(&self) -> Vec<SolType> {
        vec![
            SolType::Uint256,
            SolType::Address,
            SolType::Uint256,
            SolType::Uint256,
            SolType::array(SolType::Address),
            SolType::array(SolType::Bytes32),
        ]
    }

    fn sol_values(&self) -> Vec<SolValue> {
        vec![
            self.chain_id.into(),
            self.dataset_address.into(),
            self.dataset_id.into(),
            self.counter.into(),
            SolValue::Array(self.owners.iter().copied().map(Into::into).collect()),
            SolValue::Array(self.tags.iter().copied().map(Into::into).collect()),
        ]
    }

    fn encode_packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::packed_len(self.len()));
        self.chain_id.encode_packed_to(&mut out);
        self.dataset_address.encode_packed_to(&mut out);
        self.dataset_id.encode_packed_to(&mut out);
        self.counter.encode_packed_to(&mut out);
        self.owners.encode_packed_to(&mut out);
        self.tags.encode_packed_to(&mut out);
        out
    }
}

impl Payload for FragmentProposeBatchMessage {
    #[inline]
    fn hash(&self) -> CryptoHash {
        keccak256(self.encode_packed())
    }
}

#[serde_as]
#[derive(Deserialize)]
struct UncheckedFragmentProposeBatchMessage {
    #[serde_as(as = "AsU256")]
    chain_id: U256,
    dataset_address: Address,
    #[serde_as(as = "AsU256")]
    dataset_id: U256,
    #[serde_as(as = "AsU256")]
    counter: U256,
    owners: Vec<Address>,
    tags: Vec<B256>,
}

impl TryFrom<UncheckedFragmentProposeBatchMessage> for FragmentProposeBatchMessage {
    type Error = MessageError;

    #[inline]
    fn try_from(m: UncheckedFragmentProposeBatchMessage) -> Result<Self> {
        Self::new(
            m.chain_id,
            m.dataset_address,
            m.dataset_id,
            m.counter,
            m.owners,
            m.tags,
        )
    }
}

/// Packs `[uint256, address, uint256, uint256, address, bytes32]`,
/// always 168 bytes.
pub fn build_fragment_propose_message(
    chain_id: impl TryIntoSol<U256>,
    dataset_address: impl TryIntoSol<Address>,
    dataset_id: impl TryIntoSol<U256>,
    counter: impl TryIntoSol<U256>,
    owner: impl TryIntoSol<Address>,
    tag: impl TryIntoSol<B256>,
) -> Result<Vec<u8>> {
    FragmentProposeMessage::try_new(chain_id, dataset_address, dataset_id, counter, owner, tag)
        .map(|message| message.build())
}

/// Packs `[uint256, address, uint256, uint256, address[], bytes32[]]`.
///
/// `owners` and `tags` are paired by position and must have the same length.
/// The result is `116 + 64 * owners.len()` bytes long.
pub fn build_fragment_propose_batch_message<O, T>(
    chain_id: impl TryIntoSol<U256>,
    dataset_address: impl TryIntoSol<Address>,
    dataset_id: impl TryIntoSol<U256>,
    counter: impl TryIntoSol<U256>,
    owners: impl IntoIterator<Item = O>,
    tags: impl IntoIterator<Item = T>,
) -> Result<Vec<u8>>
where
    O: TryIntoSol<Address>,
    T: TryIntoSol<B256>,
{
    FragmentProposeBatchMessage::try_new(
        chain_id,
        dataset_address,
        dataset_id,
        counter,
        owners,
        tags,
    )
    .map(|message| message.build())
}

#[cfg(test)]
mod tests {
    use dataset_abi_packed::encode_packed;
    use dataset_test_utils::random::{Rng, TestRng, rng};
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    const CHAIN_ID: u64 = 31337;
    const DATASET: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    const OWNER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    fn tag(s: &str) -> B256 {
        B256::encode_short_string(s).unwrap()
    }

    #[test]
    fn propose_layout() {
        let packed =
            build_fragment_propose_message(CHAIN_ID, DATASET, 1, 7, OWNER, tag("image")).unwrap();

        assert_eq!(packed.len(), FragmentProposeMessage::PACKED_LEN);
        assert_eq!(
            packed,
            hex!(
                "0000000000000000000000000000000000000000000000000000000000007a69"
                "5fbdb2315678afecb367f032d93f642f64180aa3"
                "0000000000000000000000000000000000000000000000000000000000000001"
                "0000000000000000000000000000000000000000000000000000000000000007"
                "70997970c51812dc3a010c7d01b50e0d17dc79c8"
                "696d616765000000000000000000000000000000000000000000000000000000"
            )
        );
    }

    #[test]
    fn propose_counter_changes_bytes() {
        let a = build_fragment_propose_message(CHAIN_ID, DATASET, 1, 0, OWNER, tag("x")).unwrap();
        let b = build_fragment_propose_message(CHAIN_ID, DATASET, 1, 1, OWNER, tag("x")).unwrap();
        assert_ne!(a, b);
        assert_eq!(a[..3 * WORD + Address::LEN], b[..3 * WORD + Address::LEN]);
    }

    #[test]
    fn batch_layout() {
        let owners = [OWNER, "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"];
        let tags = [tag("image"), tag("text")];
        let packed =
            build_fragment_propose_batch_message(CHAIN_ID, DATASET, 1, 7, owners, tags).unwrap();

        assert_eq!(packed.len(), FragmentProposeBatchMessage::packed_len(2));
        assert_eq!(packed.len(), 116 + 64 * 2);
        assert_eq!(
            packed[FragmentProposeBatchMessage::HEADER_LEN..],
            hex!(
                "00000000000000000000000070997970c51812dc3a010c7d01b50e0d17dc79c8"
                "0000000000000000000000003c44cdddb6a900fa2b585dd299e03d12fa4293bc"
                "696d616765000000000000000000000000000000000000000000000000000000"
                "7465787400000000000000000000000000000000000000000000000000000000"
            )
        );
    }

    #[test]
    fn batch_keeps_pairs_in_order() {
        let owners = [OWNER, "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"];
        let tags = [tag("image"), tag("text")];
        let message =
            FragmentProposeBatchMessage::try_new(CHAIN_ID, DATASET, 1, 7, owners, tags).unwrap();

        let expected: Vec<Address> = owners.iter().map(|o| o.parse().unwrap()).collect();
        assert_eq!(message.len(), 2);
        assert!(!message.is_empty());
        assert_eq!(message.owners(), expected);
        assert_eq!(message.tags(), tags);
        assert_eq!(
            message.pairs().map(|(o, t)| (*o, *t)).collect::<Vec<_>>(),
            [(expected[0], tags[0]), (expected[1], tags[1])]
        );

        let empty = FragmentProposeBatchMessage::new(
            U256::ONE,
            Address::ZERO,
            U256::ONE,
            U256::ZERO,
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.pairs().count(), 0);
    }

    #[test]
    fn empty_batch_is_header_only() {
        let packed = build_fragment_propose_batch_message(
            CHAIN_ID,
            DATASET,
            1,
            7,
            Vec::<Address>::new(),
            Vec::<B256>::new(),
        )
        .unwrap();
        assert_eq!(packed.len(), FragmentProposeBatchMessage::HEADER_LEN);
    }

    #[rstest]
    #[case(2, 1)]
    #[case(0, 1)]
    #[case(1, 0)]
    fn batch_length_mismatch(#[case] owners: usize, #[case] tags: usize) {
        let err = build_fragment_propose_batch_message(
            CHAIN_ID,
            DATASET,
            1,
            7,
            vec![OWNER; owners],
            vec![tag("x"); tags],
        )
        .unwrap_err();
        assert_eq!(err, MessageError::LengthMismatch { owners, tags });
    }

    #[test]
    fn batch_rejects_bad_owner() {
        assert!(matches!(
            build_fragment_propose_batch_message(
                CHAIN_ID,
                DATASET,
                1,
                7,
                [OWNER, "not-an-address"],
                [tag("a"), tag("b")],
            ),
            Err(MessageError::Encoding(_))
        ));
    }

    #[rstest]
    fn batch_typed_matches_dynamic(mut rng: TestRng) {
        let n = rng.random_range(0..8);
        let message = FragmentProposeBatchMessage::new(
            U256::from(rng.random::<u64>()),
            Address::new(rng.random()),
            U256::from(rng.random::<u64>()),
            U256::from(rng.random::<u64>()),
            (0..n).map(|_| Address::new(rng.random())).collect(),
            (0..n).map(|_| B256::new(rng.random())).collect(),
        )
        .unwrap();

        let packed = message.encode_packed();
        assert_eq!(packed.len(), FragmentProposeBatchMessage::packed_len(n));
        assert_eq!(
            packed,
            encode_packed(&message.sol_types(), &message.sol_values()).unwrap()
        );
    }

    #[rstest]
    fn single_batch_differs_from_single_propose(mut rng: TestRng) {
        let owner = Address::new(rng.random());
        let tag = B256::new(rng.random());

        let single = FragmentProposeMessage::try_new(CHAIN_ID, DATASET, 1, 7, owner, tag)
            .unwrap()
            .encode_packed();
        let batch = FragmentProposeBatchMessage::try_new(CHAIN_ID, DATASET, 1, 7, [owner], [tag])
            .unwrap()
            .encode_packed();

        // same header, but batch owners are padded to a word
        let header = FragmentProposeBatchMessage::HEADER_LEN;
        assert_eq!(single[..header], batch[..header]);
        assert_eq!(batch.len(), single.len() + (WORD - Address::LEN));
        assert_ne!(keccak256(&single), keccak256(&batch));
    }

    #[test]
    fn batch_json_checks_pairing() {
        let json = serde_json::json!({
            "chain_id": CHAIN_ID,
            "dataset_address": DATASET,
            "dataset_id": 1,
            "counter": "7",
            "owners": [OWNER],
            "tags": [],
        });
        let err = serde_json::from_value::<FragmentProposeBatchMessage>(json).unwrap_err();
        assert!(err.to_string().contains("owners and tags must be paired"));
    }
}
