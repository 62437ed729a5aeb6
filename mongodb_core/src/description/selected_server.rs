use std::ops::Deref;

use super::{ServerDescription, TopologyKind};

/// A server chosen for an operation, together with the kind of topology it was chosen from.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedServer {
    pub server: ServerDescription,
    pub kind: TopologyKind,
}

impl SelectedServer {
    pub fn new(server: ServerDescription, kind: TopologyKind) -> Self {
        Self { server, kind }
    }
}

impl Deref for SelectedServer {
    type Target = ServerDescription;

    fn deref(&self) -> &Self::Target {
        &self.server
    }
}

#[cfg(test)]
mod tests {
    use super::SelectedServer;
    use crate::description::{ServerDescription, ServerKind, TopologyKind};

    #[test]
    fn selected_server_exposes_both_kinds() {
        let server = ServerDescription {
            kind: ServerKind::RsArbiter,
            ..ServerDescription::unknown("c.example.com:27017".into())
        };

        let selected = SelectedServer::new(server, TopologyKind::ReplicaSetWithPrimary);

        assert_eq!(selected.server.kind, ServerKind::RsArbiter);
        assert_eq!(selected.kind, TopologyKind::ReplicaSetWithPrimary);
        assert!(selected.kind.is_replica_set());
        assert_eq!(selected.address.as_str(), "c.example.com:27017");
    }
}
