//! Classifies a canned heartbeat and authenticates against an in-process fake server.
//!
//! Run with `RUST_LOG=debug cargo run --example handshake_demo`.
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use mongodb_core::{
    auth::{conduct_sasl_conversation, SaslClient},
    channel::{ChannelError, Command, CommandChannel, OperationContext},
    description::{HeartbeatReply, SelectedServer, ServerDescriptionBuilder, TopologyKind},
    document::{Binary, Document},
};
use serde_json::json;
use tokio::time::Duration;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let heartbeat = json!({
        "ok": 1,
        "ismaster": true,
        "setName": "rs0",
        "me": "Localhost:27017",
        "hosts": ["localhost:27017", "localhost:27018"],
        "arbiters": ["localhost:27019"],
        "minWireVersion": 0,
        "maxWireVersion": 7,
    });
    let heartbeat: HeartbeatReply = serde_json::from_value(heartbeat)?;

    let server = ServerDescriptionBuilder::new()
        .set_heartbeat_interval(std::time::Duration::from_secs(10))
        .build("localhost:27017".into(), &heartbeat);
    println!("{:#?}", server);

    let selected = SelectedServer::new(server, TopologyKind::ReplicaSetWithPrimary);
    let ctx = OperationContext::new().with_timeout(Duration::from_secs(5));
    let mut client = EchoClient::default();

    let fake_server = FakeServer::default();
    let result = conduct_sasl_conversation(&ctx, &selected, &fake_server, "", &mut client).await;
    match result {
        Ok(()) => tracing::info!("Authenticated after {} challenge(s)", client.rounds),
        Err(e) => {
            tracing::error!("Authentication failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}

fn setup_tracing() {
    // Redirect all `log`'s events to the subscriber
    LogTracer::init().expect("Failed to set logger");
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("handshake-demo".into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    set_global_default(subscriber).expect("Failed to set subscriber");
}

/// Not a real mechanism: answers every challenge with the challenge itself.
#[derive(Default)]
struct EchoClient {
    rounds: usize,
}

impl SaslClient for EchoClient {
    fn start(&mut self) -> anyhow::Result<(String, Vec<u8>)> {
        Ok(("ECHO".to_string(), b"hello".to_vec()))
    }

    fn next(&mut self, challenge: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.rounds += 1;
        Ok(challenge.to_vec())
    }

    fn completed(&self) -> bool {
        self.rounds >= 2
    }

    fn close(&mut self) {
        tracing::debug!("EchoClient closed");
    }
}

/// Issues two challenges, then reports done.
#[derive(Default)]
struct FakeServer {
    step: AtomicI32,
}

#[async_trait]
impl CommandChannel for FakeServer {
    async fn round_trip(
        &self,
        _ctx: &OperationContext,
        command: &Command,
        server: &SelectedServer,
    ) -> Result<Document, ChannelError> {
        let step = self.step.fetch_add(1, Ordering::SeqCst);
        tracing::info!(
            "{} received `{}` for `{}`",
            server.address,
            command.name().unwrap_or_default(),
            command.database
        );
        let reply = json!({
            "conversationId": 1,
            "code": 0,
            "done": step >= 1,
            "payload": Binary(format!("challenge-{}", step).into_bytes()),
            "ok": 1,
        });
        match reply {
            serde_json::Value::Object(doc) => Ok(doc),
            _ => Err(anyhow::anyhow!("reply is not a document").into()),
        }
    }
}
