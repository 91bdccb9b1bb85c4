//! WebSocket infrastructure for live editing.
//!
//! Provides connection management, heartbeat pings, the per-document
//! broadcast relay, and the HTTP upgrade handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod manager;
pub mod relay;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::{WsManager, WsSender};
pub use relay::CollabRelay;
