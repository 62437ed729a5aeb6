use std::ops::Deref;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// Generic binary subtype, the only one SASL payloads use.
const GENERIC_SUBTYPE: &str = "00";

/// Opaque binary data, such as a SASL payload.
///
/// Serializes as `{"$binary": {"base64": "...", "subType": "00"}}`.
/// Deserializes from that form or from a plain array of bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Binary(pub Vec<u8>);

impl Binary {
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// The extended JSON value for this binary.
    pub fn to_value(&self) -> Value {
        json!({
            "$binary": {
                "base64": STANDARD.encode(&self.0),
                "subType": GENERIC_SUBTYPE,
            }
        })
    }
}

impl Deref for Binary {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<u8>> for Binary {
    fn from(value: Vec<u8>) -> Self {
        Binary(value)
    }
}

impl From<&[u8]> for Binary {
    fn from(value: &[u8]) -> Self {
        Binary(value.to_vec())
    }
}

#[derive(Deserialize)]
struct ExtendedBinary {
    base64: String,
    #[serde(rename = "subType", default)]
    _sub_type: Option<String>,
}

#[derive(Deserialize)]
struct BinaryWrapper {
    #[serde(rename = "$binary")]
    binary: ExtendedBinary,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BinaryRepr {
    Extended(BinaryWrapper),
    Bytes(Vec<u8>),
}

impl Serialize for Binary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Binary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match BinaryRepr::deserialize(deserializer)? {
            BinaryRepr::Extended(wrapper) => STANDARD
                .decode(wrapper.binary.base64.as_bytes())
                .map(Binary)
                .map_err(|e| de::Error::custom(format!("invalid base64 payload: {}", e))),
            BinaryRepr::Bytes(bytes) => Ok(Binary(bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use serde_json::json;

    use super::Binary;

    #[test]
    fn binary_serializes_as_canonical_extended_json() {
        // Arrange
        let payload = Binary(b"n,,n=user".to_vec());

        // Act
        let value = serde_json::to_value(&payload).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({ "$binary": { "base64": "biwsbj11c2Vy", "subType": "00" } })
        );
    }

    #[test]
    fn binary_deserializes_from_extended_json_or_byte_array() {
        let extended: Binary =
            serde_json::from_value(json!({ "$binary": { "base64": "AQID", "subType": "00" } }))
                .unwrap();
        let array: Binary = serde_json::from_value(json!([1, 2, 3])).unwrap();

        assert_eq!(extended, Binary(vec![1, 2, 3]));
        assert_eq!(array, extended);
    }

    #[test]
    fn binary_rejects_invalid_base64() {
        let result =
            serde_json::from_value::<Binary>(json!({ "$binary": { "base64": "***" } }));

        assert!(result.is_err());
    }
}
