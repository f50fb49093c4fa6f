//! Response shapes of list-style endpoints.
//!
//! Some endpoints answer with a bare JSON array, others wrap the array in an
//! envelope object (`{"data": [...]}`). [`Listing`] accepts both and is
//! resolved into a plain collection with [`Listing::into_collection`].

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A collection wrapped in an object under the `data` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
}

/// Any of the shapes a list endpoint may answer with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Envelope(Envelope<T>),
    /// Neither an array nor an object with an array under `data`.
    Unrecognized,
}

impl<T> Listing<T> {
    pub fn into_collection(self) -> Vec<T> {
        match self {
            Self::Bare(items) => items,
            Self::Envelope(envelope) => envelope.data,
            Self::Unrecognized => Vec::new(),
        }
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Bare(items)
    }
}

impl<T> From<Envelope<T>> for Listing<T> {
    fn from(envelope: Envelope<T>) -> Self {
        Self::Envelope(envelope)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Listing<T> {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        // Records that fail to decode are an error, not an empty listing, so
        // the shape is inspected before the elements are decoded.
        let value = Value::deserialize(deserializer)?;
        let is_envelope = value
            .get("data")
            .is_some_and(|data| data.is_array());

        if value.is_array() {
            serde_json::from_value(value)
                .map(Listing::Bare)
                .map_err(de::Error::custom)
        } else if is_envelope {
            serde_json::from_value(value)
                .map(Listing::Envelope)
                .map_err(de::Error::custom)
        } else {
            Ok(Listing::Unrecognized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Record {
        id: i64,
    }

    fn parse(value: Value) -> Result<Listing<Record>, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn bare_array_is_used_directly() {
        let listing = parse(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert!(matches!(listing, Listing::Bare(_)));
        assert_eq!(
            listing.into_collection(),
            vec![Record { id: 1 }, Record { id: 2 }]
        );
    }

    #[test]
    fn envelope_data_is_extracted() {
        let listing =
            parse(json!({"data": [{"id": 1}, {"id": 2}], "total": 2}))
                .unwrap();
        assert!(matches!(listing, Listing::Envelope(_)));
        assert_eq!(
            listing.into_collection(),
            vec![Record { id: 1 }, Record { id: 2 }]
        );
    }

    #[test]
    fn empty_shapes_yield_empty_collections() {
        assert!(parse(json!([])).unwrap().into_collection().is_empty());
        assert!(
            parse(json!({"data": []}))
                .unwrap()
                .into_collection()
                .is_empty()
        );
    }

    #[test]
    fn unrecognized_shapes_default_to_empty() {
        for value in [
            json!({"message": "ok"}),
            json!({"data": null}),
            json!({"data": {"id": 1}}),
            json!(null),
            json!("movies"),
            json!(3),
        ] {
            let listing = parse(value).unwrap();
            assert_eq!(listing, Listing::Unrecognized);
            assert!(listing.into_collection().is_empty());
        }
    }

    #[test]
    fn malformed_records_are_errors() {
        assert!(parse(json!([{"id": "one"}])).is_err());
        assert!(parse(json!({"data": [{"name": "no id"}]})).is_err());
    }
}
