use dataset_num_utils::{U256, u256_to_be_bytes};
use serde_json::Value;
use tracing::trace;

use crate::{Address, B256, Error, Result, SolType, SolValue, ValueError, WORD};

/// Packed ABI encoding of a value.
pub trait PackedEncode {
    /// Length of the top-level packed form
    fn packed_len(&self) -> usize;

    /// Appends the top-level packed form
    fn encode_packed_to(&self, out: &mut Vec<u8>);

    /// Appends the form used for array elements, which always takes a full word
    #[inline]
    fn encode_packed_element_to(&self, out: &mut Vec<u8>) {
        self.encode_packed_to(out);
    }

    #[inline]
    fn encode_packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.packed_len());
        self.encode_packed_to(&mut out);
        out
    }
}

impl PackedEncode for U256 {
    #[inline]
    fn packed_len(&self) -> usize {
        WORD
    }

    #[inline]
    fn encode_packed_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&u256_to_be_bytes(self));
    }
}

impl PackedEncode for Address {
    #[inline]
    fn packed_len(&self) -> usize {
        Self::LEN
    }

    #[inline]
    fn encode_packed_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    #[inline]
    fn encode_packed_element_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[0; WORD - Self::LEN]);
        self.encode_packed_to(out);
    }
}

impl PackedEncode for B256 {
    #[inline]
    fn packed_len(&self) -> usize {
        Self::LEN
    }

    #[inline]
    fn encode_packed_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

impl<T> PackedEncode for [T]
where
    T: PackedEncode,
{
    #[inline]
    fn packed_len(&self) -> usize {
        self.len() * WORD
    }

    fn encode_packed_to(&self, out: &mut Vec<u8>) {
        for element in self {
            element.encode_packed_element_to(out);
        }
    }
}

impl<T> PackedEncode for Vec<T>
where
    T: PackedEncode,
{
    #[inline]
    fn packed_len(&self) -> usize {
        self.as_slice().packed_len()
    }

    #[inline]
    fn encode_packed_to(&self, out: &mut Vec<u8>) {
        self.as_slice().encode_packed_to(out);
    }
}

impl PackedEncode for SolValue {
    fn packed_len(&self) -> usize {
        match self {
            Self::Uint256(v) => v.packed_len(),
            Self::Address(v) => v.packed_len(),
            Self::Bytes32(v) => v.packed_len(),
            Self::Array(v) => v.packed_len(),
        }
    }

    fn encode_packed_to(&self, out: &mut Vec<u8>) {
        match self {
            Self::Uint256(v) => v.encode_packed_to(out),
            Self::Address(v) => v.encode_packed_to(out),
            Self::Bytes32(v) => v.encode_packed_to(out),
            Self::Array(v) => v.encode_packed_to(out),
        }
    }

    fn encode_packed_element_to(&self, out: &mut Vec<u8>) {
        match self {
            Self::Uint256(v) => v.encode_packed_element_to(out),
            Self::Address(v) => v.encode_packed_element_to(out),
            Self::Bytes32(v) => v.encode_packed_element_to(out),
            Self::Array(v) => v.encode_packed_element_to(out),
        }
    }
}

/// Packs `values` according to `types`, in order.
///
/// Fails if the counts differ, if a value doesn't have the shape of its type
/// or if a type can't be packed.
pub fn encode_packed(types: &[SolType], values: &[SolValue]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(Error::ArityMismatch {
            expected: types.len(),
            got: values.len(),
        });
    }

    for (ty, value) in types.iter().zip(values) {
        ty.ensure_packable()?;
        if !value.matches(ty) {
            return Err(Error::TypeMismatch {
                ty: ty.clone(),
                source: ValueError::Unexpected(value.kind()),
            });
        }
    }

    let mut out = Vec::with_capacity(values.iter().map(PackedEncode::packed_len).sum());
    for (ty, value) in types.iter().zip(values) {
        trace!(%ty, offset = out.len(), "packing field");
        value.encode_packed_to(&mut out);
    }
    Ok(out)
}

/// Coerces untyped JSON `values` according to `types`, then packs them
pub fn encode_packed_json(types: &[SolType], values: &[Value]) -> Result<Vec<u8>> {
    if types.len() != values.len() {
        return Err(Error::ArityMismatch {
            expected: types.len(),
            got: values.len(),
        });
    }

    let values = types
        .iter()
        .zip(values)
        .map(|(ty, value)| ty.coerce(value))
        .collect::<Result<Vec<_>>>()?;
    encode_packed(types, &values)
}
