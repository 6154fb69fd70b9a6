// gluelock-api: Async Rust client for the Glue Home lock REST API

pub mod client;
pub mod error;
pub mod events;
pub mod hubs;
pub mod locks;
pub mod models;
pub mod transport;

pub use client::GlueClient;
pub use error::Error;
pub use models::{
    CommandResponse, EventType, Hub, HubCommand, LockEvent, LockStatus, COMMAND_STATUS_SUCCESS,
};
pub use transport::TransportConfig;

/// Production endpoint of the vendor API.
pub const DEFAULT_BASE_URL: &str = "https://api.gluehome.com/api";
