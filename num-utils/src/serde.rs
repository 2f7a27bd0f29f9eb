use core::fmt;

use serde::{Deserializer, Serializer, de};
use serde_with::{DeserializeAs, SerializeAs};

use crate::{ParseU256Error, U256, parse_u256};

/// Serializes [`U256`] as a decimal string.
/// Deserializes from a JSON number or a decimal / `0x`-hex string.
pub struct AsU256;

impl SerializeAs<U256> for AsU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(source)
    }
}

impl<'de> DeserializeAs<'de, U256> for AsU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(U256Visitor)
    }
}

struct U256Visitor;

impl de::Visitor<'_> for U256Visitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an unsigned integer or a decimal / 0x-hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(U256::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(U256::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(U256::from)
            .map_err(|_| E::custom(ParseU256Error::Negative))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        parse_u256(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use serde_with::serde_as;

    use super::*;

    #[serde_as]
    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    struct Wrapper(#[serde_as(as = "AsU256")] U256);

    #[test]
    fn any_representation() {
        for v in [json!(42), json!("42"), json!("0x2a")] {
            let Wrapper(n) = serde_json::from_value(v).unwrap();
            assert_eq!(n, U256::from(42u8));
        }
    }

    #[test]
    fn serializes_decimal() {
        assert_eq!(
            serde_json::to_value(Wrapper(U256::MAX)).unwrap(),
            json!("115792089237316195423570985008687907853269984665640564039457584007913129639935"),
        );
    }

    #[test]
    fn rejects_negative() {
        assert!(serde_json::from_value::<Wrapper>(json!(-1)).is_err());
        assert!(serde_json::from_value::<Wrapper>(json!("-1")).is_err());
    }
}
