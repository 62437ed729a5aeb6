use std::fmt;

/// The role a single server plays, as classified from its heartbeat.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ServerKind {
    Standalone,
    RsMember,
    RsPrimary,
    RsSecondary,
    RsArbiter,
    RsGhost,
    Mongos,
    /// Nothing is known about the server, either because it has not been
    /// checked yet or because its last heartbeat failed.
    #[default]
    Unknown,
}

impl ServerKind {
    pub fn is_replica_set_member(&self) -> bool {
        matches!(
            self,
            ServerKind::RsMember
                | ServerKind::RsPrimary
                | ServerKind::RsSecondary
                | ServerKind::RsArbiter
                | ServerKind::RsGhost
        )
    }

    /// Whether the server can hold data and so be a candidate for operations.
    pub fn is_data_bearing(&self) -> bool {
        matches!(
            self,
            ServerKind::Standalone
                | ServerKind::RsPrimary
                | ServerKind::RsSecondary
                | ServerKind::Mongos
        )
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerKind::Standalone => "Standalone",
            ServerKind::RsMember => "RSMember",
            ServerKind::RsPrimary => "RSPrimary",
            ServerKind::RsSecondary => "RSSecondary",
            ServerKind::RsArbiter => "RSArbiter",
            ServerKind::RsGhost => "RSGhost",
            ServerKind::Mongos => "Mongos",
            ServerKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}
