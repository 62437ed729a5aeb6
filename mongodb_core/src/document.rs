//! Documents exchanged with the server, in their extended JSON form.
//!
//! The wire codec is not part of this crate. Commands and replies cross the
//! [`CommandChannel`](crate::channel::CommandChannel) boundary as ordered JSON
//! objects, with the few BSON-only types this crate needs represented the way
//! canonical extended JSON spells them.
mod binary;
pub mod ext_date;
mod object_id;

pub use binary::*;
pub use object_id::*;

use serde::{de::DeserializeOwned, ser::Error as _, Serialize};
use serde_json::Value;

/// An ordered command or reply document.
pub type Document = serde_json::Map<String, Value>;

/// Serializes `value` into a [`Document`]. Fails if it is not an object.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(doc) => Ok(doc),
        other => Err(serde_json::Error::custom(format!(
            "expected a document, found `{}`",
            other
        ))),
    }
}

/// Deserializes a reply document into `T`.
pub fn from_document<T: DeserializeOwned>(doc: &Document) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(doc.clone()))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::{from_document, to_document};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Probe {
        z_first: i32,
        a_second: String,
    }

    #[test]
    fn to_document_preserves_field_order() {
        // Arrange
        let probe = Probe {
            z_first: 1,
            a_second: "x".into(),
        };

        // Act
        let doc = to_document(&probe).unwrap();

        // Assert
        let keys = doc.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec!["zFirst", "aSecond"]);
        assert_eq!(from_document::<Probe>(&doc).unwrap(), probe);
    }

    #[test]
    fn to_document_rejects_non_objects() {
        assert!(to_document(&json!([1, 2, 3])).is_err());
        assert!(to_document(&5).is_err());
    }
}
