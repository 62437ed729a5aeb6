use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A 12 byte BSON ObjectId, as carried in a heartbeat's `electionId`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ObjectIdError {
    #[error("invalid hex in object id: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("object id must be 12 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let len = bytes.len();
        let bytes: [u8; 12] = bytes
            .try_into()
            .map_err(|_| ObjectIdError::InvalidLength(len))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Serialize, Deserialize)]
struct OidWrapper {
    #[serde(rename = "$oid")]
    oid: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OidRepr {
    Extended(OidWrapper),
    Hex(String),
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OidWrapper { oid: self.to_hex() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = match OidRepr::deserialize(deserializer)? {
            OidRepr::Extended(wrapper) => wrapper.oid,
            OidRepr::Hex(hex) => hex,
        };
        hex.parse().map_err(de::Error::custom)
    }
}
