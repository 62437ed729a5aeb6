use crate::{channel::ChannelError, error_chain_fmt};

#[derive(thiserror::Error)]
pub enum AuthError {
    /// The mechanism failed, or the command carrying its payload could not be
    /// sent. `mechanism` is `None` when the mechanism failed before naming itself.
    #[error(
        "unable to authenticate using mechanism \"{}\"",
        .mechanism.as_deref().unwrap_or("unknown")
    )]
    Mechanism {
        mechanism: Option<String>,
        #[source]
        source: anyhow::Error,
    },
    #[error("unable to decode sasl reply")]
    MalformedReply(#[source] serde_json::Error),
    #[error("sasl conversation using mechanism \"{mechanism}\" failed with server code {code}")]
    ServerCode { mechanism: String, code: i32 },
}
impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl AuthError {
    /// The transport failure behind this error, if the round trip was what failed.
    pub fn channel_error(&self) -> Option<&ChannelError> {
        match self {
            AuthError::Mechanism { source, .. } => source.downcast_ref::<ChannelError>(),
            _ => None,
        }
    }
}
