use std::ops::{Deref, DerefMut};

use serde::Deserialize;
use tracing::{instrument, Span};
use uuid::Uuid;

use crate::{
    channel::{Command, CommandChannel, OperationContext},
    description::{SelectedServer, ServerKind},
    document::{from_document, Binary},
};

use super::{AuthError, SaslClient, SaslCommand, DEFAULT_AUTH_DB};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct SaslResponse {
    conversation_id: i32,
    code: i32,
    done: bool,
    payload: Binary,
}

/// Holds the client for the length of a conversation and closes it on the way out.
///
/// Dropping a cancelled conversation future closes the client too.
struct ClosingClient<'a, S: SaslClient + ?Sized>(&'a mut S);

impl<S: SaslClient + ?Sized> Deref for ClosingClient<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl<S: SaslClient + ?Sized> DerefMut for ClosingClient<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.0
    }
}

impl<S: SaslClient + ?Sized> Drop for ClosingClient<'_, S> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Authenticates a connection by running a SASL conversation with the server.
///
/// Arbiters hold no data and cannot be authenticated, so they are skipped
/// without touching the channel. An empty `database` means [`DEFAULT_AUTH_DB`].
///
/// The conversation keeps going until both the server reports `done` and the
/// client reports [`completed`](SaslClient::completed). There is no round
/// limit; `ctx` is the only way to bound it. The client is closed exactly
/// once whatever the outcome.
#[instrument(
    level = "debug",
    name = "Conduct SASL Conversation",
    skip(ctx, server, channel, client),
    fields(address = %server.address, correlation_id)
)]
pub async fn conduct_sasl_conversation<C, S>(
    ctx: &OperationContext,
    server: &SelectedServer,
    channel: &C,
    database: &str,
    client: &mut S,
) -> Result<(), AuthError>
where
    C: CommandChannel + ?Sized,
    S: SaslClient + ?Sized,
{
    Span::current().record("correlation_id", Uuid::new_v4().to_string());
    let mut client = ClosingClient(client);

    if server.server.kind == ServerKind::RsArbiter {
        tracing::debug!("Skipping authentication against an arbiter");
        return Ok(());
    }

    let database = if database.is_empty() {
        DEFAULT_AUTH_DB
    } else {
        database
    };

    let (mechanism, payload) = client
        .start()
        .map_err(|source| AuthError::Mechanism {
            mechanism: None,
            source,
        })?;
    tracing::debug!("Starting {} conversation against `{}`", mechanism, database);

    let start = SaslCommand::Start {
        mechanism: mechanism.clone(),
        payload,
    };
    let mut response = round_trip(
        ctx,
        server,
        channel,
        &start.to_command(database),
        &mechanism,
    )
    .await?;
    let conversation_id = response.conversation_id;

    loop {
        if response.code != 0 {
            tracing::error!(
                "Server rejected {} conversation with code {}",
                mechanism,
                response.code
            );
            return Err(AuthError::ServerCode {
                mechanism,
                code: response.code,
            });
        }

        if response.done && client.completed() {
            tracing::debug!("SASL conversation complete");
            return Ok(());
        }

        let payload = client
            .next(&response.payload)
            .map_err(|source| AuthError::Mechanism {
                mechanism: Some(mechanism.clone()),
                source,
            })?;

        // The last challenge may finish the client without another round trip.
        if response.done && client.completed() {
            tracing::debug!("SASL conversation complete");
            return Ok(());
        }

        let next = SaslCommand::Continue {
            conversation_id,
            payload,
        };
        response = round_trip(
            ctx,
            server,
            channel,
            &next.to_command(database),
            &mechanism,
        )
        .await?;
    }
}

async fn round_trip<C>(
    ctx: &OperationContext,
    server: &SelectedServer,
    channel: &C,
    command: &Command,
    mechanism: &str,
) -> Result<SaslResponse, AuthError>
where
    C: CommandChannel + ?Sized,
{
    tracing::trace!("Sending `{}`", command.name().unwrap_or_default());
    let reply = ctx
        .run(channel.round_trip(ctx, command, server))
        .await
        .map_err(|e| {
            tracing::error!("SASL round trip failed. Caused by: {}", e);
            AuthError::Mechanism {
                mechanism: Some(mechanism.to_string()),
                source: e.into(),
            }
        })?;

    from_document::<SaslResponse>(&reply).map_err(AuthError::MalformedReply)
}

/// Runs SASL conversations with a fixed database and context.
///
/// ```rust
/// use mongodb_core::{auth::SaslConversation, channel::OperationContext};
/// use tokio::time::Duration;
///
/// # tokio_test::block_on(async {
/// let conversation = SaslConversation::new()
///     .set_database("reporting")
///     .set_context(OperationContext::new().with_timeout(Duration::from_secs(10)));
/// assert_eq!(conversation.database(), "reporting");
/// # })
/// ```
#[derive(Debug, Default, Clone)]
pub struct SaslConversation {
    context: OperationContext,
    database: String,
}

impl SaslConversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    pub fn set_context(mut self, context: OperationContext) -> Self {
        self.context = context;
        self
    }

    /// The database the conversation runs against, [`DEFAULT_AUTH_DB`] unless set.
    pub fn database(&self) -> &str {
        if self.database.is_empty() {
            DEFAULT_AUTH_DB
        } else {
            &self.database
        }
    }

    pub fn context(&self) -> &OperationContext {
        &self.context
    }

    pub async fn conduct<C, S>(
        &self,
        server: &SelectedServer,
        channel: &C,
        client: &mut S,
    ) -> Result<(), AuthError>
    where
        C: CommandChannel + ?Sized,
        S: SaslClient + ?Sized,
    {
        conduct_sasl_conversation(&self.context, server, channel, self.database(), client).await
    }
}
