use chrono::{DateTime, Duration, Utc};

use crate::{
    address::Address,
    document::{from_document, Document, ObjectId},
    tag::TagSet,
};

use super::{DescriptionError, HeartbeatReply, ServerKind, VersionRange};

/// Milliseconds value of the "no round trip time yet" sentinel.
pub const UNSET_RTT_MILLIS: i64 = -1;

/// The sentinel round trip time. Passing it to
/// [`ServerDescription::set_average_rtt`] clears `average_rtt_set`.
pub fn unset_rtt() -> Duration {
    Duration::milliseconds(UNSET_RTT_MILLIS)
}

/// What the driver knows about one server, built from its latest heartbeat.
///
/// A description is a value: updates such as [`set_average_rtt`](Self::set_average_rtt)
/// return a new description, so a monitor can publish them behind an `Arc`
/// and readers never observe a half-updated server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDescription {
    pub address: Address,

    pub average_rtt: Duration,
    pub average_rtt_set: bool,
    /// Compressors the server agreed to, in its order of preference.
    pub compression: Vec<String>,
    pub canonical_address: Address,
    pub election_id: Option<ObjectId>,
    pub heartbeat_interval: std::time::Duration,
    pub last_error: Option<DescriptionError>,
    pub last_update_time: DateTime<Utc>,
    pub last_write_time: Option<DateTime<Utc>>,
    pub max_batch_count: u32,
    pub max_document_size: u32,
    pub max_message_size: u32,
    /// Hosts, then passives, then arbiters. Not deduplicated.
    pub members: Vec<Address>,
    pub read_only: bool,
    pub set_name: String,
    pub set_version: u32,
    pub tags: TagSet,
    pub kind: ServerKind,
    pub wire_version: Option<VersionRange>,
}

impl Default for ServerDescription {
    fn default() -> Self {
        Self {
            address: Address::default(),
            average_rtt: Duration::zero(),
            average_rtt_set: false,
            compression: Vec::new(),
            canonical_address: Address::default(),
            election_id: None,
            heartbeat_interval: std::time::Duration::ZERO,
            last_error: None,
            last_update_time: DateTime::<Utc>::MIN_UTC,
            last_write_time: None,
            max_batch_count: 0,
            max_document_size: 0,
            max_message_size: 0,
            members: Vec::new(),
            read_only: false,
            set_name: String::new(),
            set_version: 0,
            tags: TagSet::default(),
            kind: ServerKind::default(),
            wire_version: None,
        }
    }
}

impl ServerDescription {
    /// Builds the description of the server at `address` from its heartbeat reply.
    ///
    /// Never fails. A reply that is not ok yields a description carrying
    /// [`DescriptionError::NotOk`], no members, no wire version and
    /// [`ServerKind::Unknown`].
    pub fn new(address: Address, reply: &HeartbeatReply) -> Self {
        let canonical_address = if reply.me.is_empty() {
            address.clone()
        } else {
            Address::from(reply.me.as_str()).canonicalize()
        };

        let mut desc = Self {
            address,
            canonical_address,
            compression: reply.compression.clone(),
            election_id: reply.election_id,
            last_update_time: Utc::now(),
            last_write_time: reply.last_write_date(),
            max_batch_count: reply.max_write_batch_size,
            max_document_size: reply.max_bson_object_size,
            max_message_size: reply.max_message_size_bytes,
            read_only: reply.read_only,
            set_name: reply.set_name.clone(),
            set_version: reply.set_version,
            tags: TagSet::from_map(&reply.tags),
            ..Default::default()
        };

        if !reply.is_ok() {
            tracing::debug!("Heartbeat from {} was not ok", desc.address);
            desc.last_error = Some(DescriptionError::NotOk);
            return desc;
        }

        desc.members = reply
            .hosts
            .iter()
            .chain(reply.passives.iter())
            .chain(reply.arbiters.iter())
            .map(|member| Address::from(member.as_str()).canonicalize())
            .collect();

        desc.kind = classify(reply);
        desc.wire_version = Some(VersionRange::new(
            reply.min_wire_version,
            reply.max_wire_version,
        ));

        tracing::trace!("Classified {} as {}", desc.address, desc.kind);
        desc
    }

    /// A placeholder for a server that has not been checked yet.
    pub fn unknown(address: Address) -> Self {
        Self {
            canonical_address: address.clone(),
            address,
            last_update_time: Utc::now(),
            ..Default::default()
        }
    }

    /// A description for a server whose heartbeat could not be completed.
    pub fn from_error(address: Address, error: &impl std::error::Error) -> Self {
        Self {
            last_error: Some(DescriptionError::Heartbeat(error.to_string())),
            ..Self::unknown(address)
        }
    }

    /// Builds a description straight from a heartbeat reply document.
    ///
    /// A reply that does not deserialize produces an [`Unknown`](ServerKind::Unknown)
    /// description with [`DescriptionError::MalformedHeartbeat`] set.
    pub fn from_document(address: Address, reply: &Document) -> Self {
        match from_document::<HeartbeatReply>(reply) {
            Ok(reply) => Self::new(address, &reply),
            Err(e) => {
                tracing::warn!("Malformed heartbeat reply from {}. Caused by: {}", address, e);
                Self {
                    last_error: Some(DescriptionError::MalformedHeartbeat(e.to_string())),
                    ..Self::unknown(address)
                }
            }
        }
    }

    /// Returns a copy of this description with the given average round trip time.
    ///
    /// [`unset_rtt`] clears `average_rtt_set`; any other value, zero included, sets it.
    #[must_use]
    pub fn set_average_rtt(&self, rtt: Duration) -> Self {
        Self {
            average_rtt: rtt,
            average_rtt_set: rtt != unset_rtt(),
            ..self.clone()
        }
    }
}

/// First match wins, so the order of the checks matters.
fn classify(reply: &HeartbeatReply) -> ServerKind {
    if reply.is_replica_set {
        ServerKind::RsGhost
    } else if !reply.set_name.is_empty() {
        if reply.is_master {
            ServerKind::RsPrimary
        } else if reply.hidden {
            ServerKind::RsMember
        } else if reply.secondary {
            ServerKind::RsSecondary
        } else if reply.arbiter_only {
            ServerKind::RsArbiter
        } else {
            ServerKind::RsMember
        }
    } else if reply.msg == "isdbgrid" {
        ServerKind::Mongos
    } else {
        ServerKind::Standalone
    }
}
