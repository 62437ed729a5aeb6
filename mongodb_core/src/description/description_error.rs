use crate::error_chain_fmt;

/// Why a [`ServerDescription`](super::ServerDescription) describes an unusable server.
///
/// Stored in `last_error`; building a description never returns an error.
#[derive(thiserror::Error, Clone, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("not ok")]
    NotOk,
    #[error("heartbeat failed: {0}")]
    Heartbeat(String),
    #[error("malformed heartbeat reply: {0}")]
    MalformedHeartbeat(String),
}
impl std::fmt::Debug for DescriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
