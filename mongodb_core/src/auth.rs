//! Connection authentication.
//!
//! Every SASL mechanism follows the same `saslStart`/`saslContinue` exchange,
//! so the exchange lives here once and mechanisms only produce payloads.
mod auth_error;
mod sasl_client;
mod sasl_command;
mod sasl_conversation;

pub use auth_error::*;
pub use sasl_client::*;
pub use sasl_command::*;
pub use sasl_conversation::*;

/// Database to authenticate against when the credential does not name one.
pub const DEFAULT_AUTH_DB: &str = "admin";
