//! Object-only JSON parsing.
//!
//! Derived `Deserialize` impls of structs also accept a JSON array and fill the
//! fields by position, so `["hello"]` would parse as `{"message":"hello"}`.
//! Request bodies must be JSON objects, and so must the objects nested in them.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Parses `bytes` into `T`, accepting only a JSON object at the top level.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value = object(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// `deserialize_with` helper for a field that must hold a JSON object.
pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let map = Map::<String, Value>::deserialize(deserializer)?;
    T::deserialize(Value::Object(map)).map_err(de::Error::custom)
}

/// Like [`object`], but `null` is `None`.
pub(crate) fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Map<String, Value>>::deserialize(deserializer)? {
        Some(map) => T::deserialize(Value::Object(map)).map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// `deserialize_with` helper for an array of JSON objects.
pub(crate) fn objects<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Vec::<Map<String, Value>>::deserialize(deserializer)?
        .into_iter()
        .map(|map| T::deserialize(Value::Object(map)).map_err(de::Error::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Outer {
        name: String,
        #[serde(default, deserialize_with = "object")]
        inner: Inner,
        #[serde(default, deserialize_with = "optional_object")]
        extra: Option<Inner>,
        #[serde(default, deserialize_with = "objects")]
        list: Vec<Inner>,
    }

    #[derive(Deserialize, Debug, PartialEq, Default)]
    struct Inner {
        id: u32,
    }

    #[test]
    fn parses_objects() {
        let outer: Outer =
            from_slice(br#"{"name":"a","inner":{"id":1},"extra":{"id":2},"list":[{"id":3},{"id":4}]}"#).unwrap();
        assert_eq!(
            outer,
            Outer {
                name: "a".to_owned(),
                inner: Inner { id: 1 },
                extra: Some(Inner { id: 2 }),
                list: vec![Inner { id: 3 }, Inner { id: 4 }],
            }
        );

        let outer: Outer = from_slice(br#"{"name":"b","extra":null}"#).unwrap();
        assert_eq!(outer.inner, Inner::default());
        assert_eq!(outer.extra, None);
        assert!(outer.list.is_empty());
    }

    #[test]
    fn rejects_arrays_in_place_of_objects() {
        for body in [
            r#"["a"]"#,
            r#"{"name":"a","inner":[1]}"#,
            r#"{"name":"a","extra":[2]}"#,
            r#"{"name":"a","list":[[3]]}"#,
        ] {
            assert!(from_slice::<Outer>(body.as_bytes()).is_err(), "{body}");
        }
    }

    #[test]
    fn rejects_trailing_data() {
        assert!(from_slice::<Outer>(br#"{"name":"a"} {"name":"b"}"#).is_err());
    }
}
