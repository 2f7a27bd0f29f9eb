use dataset_num_utils::ParseU256Error;
use thiserror::Error as ThisError;

use crate::{ParseAddressError, ParseB256Error, SolType};

pub type Result<T, E = Error> = ::core::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    #[error("expected {expected} values, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("invalid {ty} value: {source}")]
    TypeMismatch {
        ty: SolType,
        #[source]
        source: ValueError,
    },

    #[error("unknown type: '{0}'")]
    UnknownType(String),

    #[error("unsupported type: {0}")]
    UnsupportedType(SolType),
}

/// Reason a value doesn't fit its type
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ValueError {
    #[error("address: {0}")]
    Address(#[from] ParseAddressError),

    #[error("bytes32: {0}")]
    Bytes32(#[from] ParseB256Error),

    #[error("uint256: {0}")]
    Uint(#[from] ParseU256Error),

    #[error("unexpected {0}")]
    Unexpected(&'static str),
}
