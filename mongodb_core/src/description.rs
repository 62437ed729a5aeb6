mod description_error;
mod heartbeat_reply;
mod selected_server;
mod server_description;
mod server_description_builder;
mod server_kind;
mod topology_kind;
mod version_range;

pub use description_error::*;
pub use heartbeat_reply::*;
pub use selected_server::*;
pub use server_description::*;
pub use server_description_builder::*;
pub use server_kind::*;
pub use topology_kind::*;
pub use version_range::*;
