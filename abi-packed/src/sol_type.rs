use core::{fmt, str::FromStr};

use crate::{Error, Result};

/// Field-type tag, named after the Solidity type it packs as
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SolType {
    Uint256,
    Address,
    Bytes32,
    Array(Box<SolType>),
}

impl SolType {
    #[inline]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    #[inline]
    pub fn element(&self) -> Option<&Self> {
        match self {
            Self::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Nested arrays can't be packed
    pub(crate) fn ensure_packable(&self) -> Result<()> {
        match self.element() {
            Some(element) if element.element().is_some() => {
                Err(Error::UnsupportedType(self.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for SolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint256 => f.write_str("uint256"),
            Self::Address => f.write_str("address"),
            Self::Bytes32 => f.write_str("bytes32"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

impl FromStr for SolType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(element) = s.strip_suffix("[]") {
            return element.parse().map(Self::array);
        }
        match s {
            "uint256" | "uint" => Ok(Self::Uint256),
            "address" => Ok(Self::Address),
            "bytes32" => Ok(Self::Bytes32),
            _ => Err(Error::UnknownType(s.to_string())),
        }
    }
}
