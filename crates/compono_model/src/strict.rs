//! Strict decoding helpers.
//!
//! Serde's stock map visitors silently keep the last value when a key is
//! repeated. Input sections are keyed registries, so a repeated key is an
//! authoring mistake and must fail the decode.

use std::fmt;
use std::marker::PhantomData;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

/// Deserialize a mapping into an [`IndexMap`], rejecting duplicate keys.
///
/// A null value (`areas:` with no body) decodes as an empty map.
pub fn unique_keys<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_any(UniqueKeys(PhantomData))
}

struct UniqueKeys<V>(PhantomData<V>);

impl<'de, V> Visitor<'de> for UniqueKeys<V>
where
    V: Deserialize<'de>,
{
    type Value = IndexMap<String, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a mapping with unique keys")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(IndexMap::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(IndexMap::new())
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));

        while let Some(key) = access.next_key::<String>()? {
            if map.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate key `{}`", key)));
            }
            let value = access.next_value::<V>()?;
            map.insert(key, value);
        }

        Ok(map)
    }
}
