use dataset_num_utils::{ParseU256Error, U256, parse_u256};
use tracing::debug;

use crate::{Address, B256, Error, PackedEncode, Result, SolType, ValueError};

/// Fixed-size types with a single [`SolType`] tag
pub trait SolPrimitive: PackedEncode + Sized {
    const SOL_TYPE: SolType;
}

impl SolPrimitive for U256 {
    const SOL_TYPE: SolType = SolType::Uint256;
}

impl SolPrimitive for Address {
    const SOL_TYPE: SolType = SolType::Address;
}

impl SolPrimitive for B256 {
    const SOL_TYPE: SolType = SolType::Bytes32;
}

/// Conversion of caller-side representations into a typed value.
///
/// A native integer, a decimal string and a hex string holding the same
/// number all convert to the same [`U256`], so they pack identically.
pub trait TryIntoSol<T> {
    fn try_into_sol(self) -> Result<T, ValueError>;
}

impl<T> TryIntoSol<T> for T {
    #[inline]
    fn try_into_sol(self) -> Result<T, ValueError> {
        Ok(self)
    }
}

macro_rules! impl_copy_from_ref {
    ($($t:ty),+) => {$(
        impl TryIntoSol<$t> for &$t {
            #[inline]
            fn try_into_sol(self) -> Result<$t, ValueError> {
                Ok(*self)
            }
        }
    )+};
}
impl_copy_from_ref!(U256, Address, B256);

macro_rules! impl_uint_from_unsigned {
    ($($t:ty),+) => {$(
        impl TryIntoSol<U256> for $t {
            #[inline]
            fn try_into_sol(self) -> Result<U256, ValueError> {
                Ok(U256::from(self))
            }
        }
    )+};
}
impl_uint_from_unsigned!(u8, u16, u32, u64, u128);

macro_rules! impl_uint_from_int {
    ($($t:ty),+) => {$(
        impl TryIntoSol<U256> for $t {
            #[inline]
            fn try_into_sol(self) -> Result<U256, ValueError> {
                u128::try_from(self)
                    .map(U256::from)
                    .map_err(|_| ParseU256Error::Negative.into())
            }
        }
    )+};
}
impl_uint_from_int!(i32, i64, i128, usize);

impl TryIntoSol<Address> for [u8; Address::LEN] {
    #[inline]
    fn try_into_sol(self) -> Result<Address, ValueError> {
        Ok(Address::new(self))
    }
}

impl TryIntoSol<B256> for [u8; B256::LEN] {
    #[inline]
    fn try_into_sol(self) -> Result<B256, ValueError> {
        Ok(B256::new(self))
    }
}

macro_rules! impl_from_str {
    ($($s:ty),+) => {$(
        impl TryIntoSol<U256> for $s {
            #[inline]
            fn try_into_sol(self) -> Result<U256, ValueError> {
                parse_u256(<$s as AsRef<str>>::as_ref(&self)).map_err(Into::into)
            }
        }

        impl TryIntoSol<Address> for $s {
            #[inline]
            fn try_into_sol(self) -> Result<Address, ValueError> {
                self.parse::<Address>().map_err(Into::into)
            }
        }

        impl TryIntoSol<B256> for $s {
            #[inline]
            fn try_into_sol(self) -> Result<B256, ValueError> {
                self.parse::<B256>().map_err(Into::into)
            }
        }
    )+};
}
impl_from_str!(&str, String, &String);

/// Converts `value` into `T`, attributing failures to `T`'s tag
pub fn coerce<T, V>(value: V) -> Result<T>
where
    T: SolPrimitive,
    V: TryIntoSol<T>,
{
    value.try_into_sol().map_err(|source| {
        debug!(ty = %T::SOL_TYPE, %source, "failed to coerce value");
        Error::TypeMismatch {
            ty: T::SOL_TYPE,
            source,
        }
    })
}

/// Converts every element of `values` into `T`
pub fn coerce_all<T, V>(values: impl IntoIterator<Item = V>) -> Result<Vec<T>>
where
    T: SolPrimitive,
    V: TryIntoSol<T>,
{
    values.into_iter().map(coerce::<T, V>).collect()
}
