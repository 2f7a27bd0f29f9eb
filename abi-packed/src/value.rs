use dataset_num_utils::{ParseU256Error, U256, parse_u256};
use serde_json::Value;
use tracing::debug;

use crate::{Address, B256, Error, Result, SolType, ValueError};

/// Concrete value of a field
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum SolValue {
    Uint256(U256),
    Address(Address),
    Bytes32(B256),
    Array(Vec<SolValue>),
}

impl SolValue {
    #[inline]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Uint256(_) => "uint256",
            Self::Address(_) => "address",
            Self::Bytes32(_) => "bytes32",
            Self::Array(_) => "array",
        }
    }

    /// Whether the value has the shape of `ty`.
    /// Empty arrays match any array type.
    pub fn matches(&self, ty: &SolType) -> bool {
        match (self, ty) {
            (Self::Uint256(_), SolType::Uint256)
            | (Self::Address(_), SolType::Address)
            | (Self::Bytes32(_), SolType::Bytes32) => true,
            (Self::Array(values), SolType::Array(element)) => {
                values.iter().all(|value| value.matches(element))
            }
            _ => false,
        }
    }
}

impl SolType {
    /// Coerces an untyped JSON value into this type.
    ///
    /// `uint256` accepts JSON numbers as well as decimal and `0x`-hex strings,
    /// `address` and `bytes32` accept hex strings, arrays accept JSON arrays
    /// of the element type.
    pub fn coerce(&self, value: &Value) -> Result<SolValue> {
        self.ensure_packable()?;

        let coerced: Result<SolValue, ValueError> = match (self, value) {
            (Self::Array(element), Value::Array(items)) => {
                return items
                    .iter()
                    .map(|item| element.coerce(item))
                    .collect::<Result<Vec<_>>>()
                    .map(SolValue::Array);
            }
            (Self::Uint256, Value::Number(n)) => match (n.as_u64(), n.as_i64()) {
                (Some(n), _) => Ok(SolValue::Uint256(U256::from(n))),
                (None, Some(_)) => Err(ParseU256Error::Negative.into()),
                (None, None) => Err(ValueError::Unexpected("fractional number")),
            },
            (Self::Uint256, Value::String(s)) => parse_u256(s)
                .map(SolValue::Uint256)
                .map_err(Into::into),
            (Self::Address, Value::String(s)) => s
                .parse::<Address>()
                .map(SolValue::Address)
                .map_err(Into::into),
            (Self::Bytes32, Value::String(s)) => s
                .parse::<B256>()
                .map(SolValue::Bytes32)
                .map_err(Into::into),
            _ => Err(ValueError::Unexpected(json_kind(value))),
        };

        coerced.map_err(|source| {
            debug!(ty = %self, %source, "failed to coerce value");
            Error::TypeMismatch {
                ty: self.clone(),
                source,
            }
        })
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
