use std::fmt;

/// The shape of the whole deployment, as opposed to the role of one server.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TopologyKind {
    #[default]
    Unknown,
    Single,
    ReplicaSet,
    ReplicaSetNoPrimary,
    ReplicaSetWithPrimary,
    Sharded,
}

impl TopologyKind {
    pub fn is_replica_set(&self) -> bool {
        matches!(
            self,
            TopologyKind::ReplicaSet
                | TopologyKind::ReplicaSetNoPrimary
                | TopologyKind::ReplicaSetWithPrimary
        )
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TopologyKind::Unknown => "Unknown",
            TopologyKind::Single => "Single",
            TopologyKind::ReplicaSet => "ReplicaSet",
            TopologyKind::ReplicaSetNoPrimary => "ReplicaSetNoPrimary",
            TopologyKind::ReplicaSetWithPrimary => "ReplicaSetWithPrimary",
            TopologyKind::Sharded => "Sharded",
        };
        f.write_str(name)
    }
}
