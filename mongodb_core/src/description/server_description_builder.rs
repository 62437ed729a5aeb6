use chrono::Duration;
use tracing::instrument;

use crate::address::Address;

use super::{HeartbeatReply, ServerDescription};

/// Builds [`ServerDescription`]s with the settings a monitor applies to every check.
///
/// `build` takes `&self`, so one configured builder can serve as the template
/// for every heartbeat of a server.
#[derive(Debug, Default, Clone)]
pub struct ServerDescriptionBuilder {
    average_rtt: Option<Duration>,
    heartbeat_interval: Option<std::time::Duration>,
}

impl ServerDescriptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_heartbeat_interval(mut self, interval: std::time::Duration) -> Self {
        self.heartbeat_interval = Some(interval);
        self
    }

    pub fn set_average_rtt(mut self, rtt: Duration) -> Self {
        self.average_rtt = Some(rtt);
        self
    }

    #[instrument(level = "trace", name = "Build ServerDescription", skip(self, reply))]
    pub fn build(&self, address: Address, reply: &HeartbeatReply) -> ServerDescription {
        self.apply(ServerDescription::new(address, reply))
    }

    /// Builds the description of a server whose heartbeat failed outright.
    pub fn build_from_error(
        &self,
        address: Address,
        error: &impl std::error::Error,
    ) -> ServerDescription {
        self.apply(ServerDescription::from_error(address, error))
    }

    fn apply(&self, desc: ServerDescription) -> ServerDescription {
        let desc = match self.average_rtt {
            Some(rtt) => desc.set_average_rtt(rtt),
            None => desc,
        };
        match self.heartbeat_interval {
            Some(heartbeat_interval) => ServerDescription {
                heartbeat_interval,
                ..desc
            },
            None => desc,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use chrono::Duration;

    use super::ServerDescriptionBuilder;
    use crate::description::{unset_rtt, DescriptionError, HeartbeatReply, ServerKind};

    #[test]
    fn builder_applies_interval_and_rtt_to_every_build() {
        // Arrange
        let builder = ServerDescriptionBuilder::new()
            .set_heartbeat_interval(std::time::Duration::from_secs(10))
            .set_average_rtt(Duration::milliseconds(12));
        let reply = HeartbeatReply {
            ok: 1.0,
            ..Default::default()
        };

        // Act
        let first = builder.build("a.example.com:27017".into(), &reply);
        let second = builder.build("b.example.com:27017".into(), &reply);

        // Assert
        for desc in [first, second] {
            assert_eq!(desc.kind, ServerKind::Standalone);
            assert_eq!(desc.heartbeat_interval, std::time::Duration::from_secs(10));
            assert_eq!(desc.average_rtt, Duration::milliseconds(12));
            assert!(desc.average_rtt_set);
        }
    }

    #[test]
    fn builder_with_unset_rtt_keeps_flag_cleared() {
        let builder = ServerDescriptionBuilder::new().set_average_rtt(unset_rtt());
        let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");

        let desc = builder.build_from_error("a.example.com:27017".into(), &err);

        assert!(!desc.average_rtt_set);
        assert_eq!(
            desc.last_error,
            Some(DescriptionError::Heartbeat("timed out".to_string()))
        );
    }
}
