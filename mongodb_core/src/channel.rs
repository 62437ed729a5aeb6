//! The seam between this crate and the transport that actually talks to servers.
mod channel_error;
mod command;
mod operation_context;

pub use channel_error::*;
pub use command::*;
pub use operation_context::*;

use async_trait::async_trait;

use crate::{description::SelectedServer, document::Document};

/// Sends a command to a server and hands back its reply.
///
/// Implementations own framing, connection checkout and compression. They
/// receive the caller's [`OperationContext`] and should give up once it is
/// cancelled, although callers in this crate also enforce it themselves.
#[async_trait]
pub trait CommandChannel: Send + Sync {
    async fn round_trip(
        &self,
        ctx: &OperationContext,
        command: &Command,
        server: &SelectedServer,
    ) -> Result<Document, ChannelError>;
}
