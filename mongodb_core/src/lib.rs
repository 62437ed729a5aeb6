/*!
mongodb_core holds the connection-level pieces of a MongoDB client driver that
sit between the wire protocol and the topology monitor.

It does two jobs:

* Turns the reply to an `isMaster` heartbeat into an immutable
  [`ServerDescription`](description::ServerDescription), classifying the
  server's role in the cluster. Descriptions are plain values, so a topology
  monitor can swap them into shared state without locking readers.
* Drives a SASL conversation with a server to authenticate a connection. The
  mechanism itself is pluggable through [`SaslClient`](auth::SaslClient) and
  the transport through [`CommandChannel`](channel::CommandChannel).

# Example
```rust
use mongodb_core::description::{HeartbeatReply, ServerDescription, ServerKind};

let reply: HeartbeatReply = serde_json::from_value(serde_json::json!({
    "ok": 1,
    "ismaster": true,
    "setName": "rs0",
    "hosts": ["a.example.com:27017", "b.example.com:27017"],
    "minWireVersion": 0,
    "maxWireVersion": 6,
}))
.unwrap();

let server = ServerDescription::new("a.example.com:27017".into(), &reply);
assert_eq!(server.kind, ServerKind::RsPrimary);
```

Nothing in here spawns tasks or holds connections. Framing, pooling, server
selection and the heartbeat schedule belong to the surrounding driver.
*/

pub mod address;
pub mod auth;
pub mod channel;
pub mod description;
pub mod document;
pub mod tag;

pub use address::Address;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
