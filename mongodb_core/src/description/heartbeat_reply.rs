use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::document::{ext_date, ObjectId};

/// The reply to an `isMaster` heartbeat, as far as server descriptions care.
///
/// Every field is optional on the wire and falls back to its zero value.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HeartbeatReply {
    pub arbiter_only: bool,
    pub arbiters: Vec<String>,
    pub compression: Vec<String>,
    pub election_id: Option<ObjectId>,
    pub hidden: bool,
    pub hosts: Vec<String>,
    #[serde(rename = "ismaster")]
    pub is_master: bool,
    #[serde(rename = "isreplicaset")]
    pub is_replica_set: bool,
    pub last_write: Option<LastWrite>,
    pub max_bson_object_size: u32,
    pub max_message_size_bytes: u32,
    pub max_wire_version: i32,
    pub max_write_batch_size: u32,
    /// The address the server believes it has.
    pub me: String,
    pub min_wire_version: i32,
    pub msg: String,
    pub ok: f64,
    pub passives: Vec<String>,
    pub read_only: bool,
    pub secondary: bool,
    pub set_name: String,
    pub set_version: u32,
    pub tags: HashMap<String, String>,
}

impl HeartbeatReply {
    /// `ok` comes back as a double, and only exactly `1` counts as success.
    #[allow(clippy::float_cmp)]
    pub fn is_ok(&self) -> bool {
        self.ok == 1.0
    }

    pub fn last_write_date(&self) -> Option<DateTime<Utc>> {
        self.last_write.as_ref().map(|lw| lw.last_write_date)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LastWrite {
    #[serde(with = "ext_date")]
    pub last_write_date: DateTime<Utc>,
}
