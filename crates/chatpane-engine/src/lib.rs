//! chatpane-engine: Headless core for the chatpane chat client
//!
//! This crate provides everything that does not depend on a terminal:
//! - Message types and the fixed waiting/fallback replies
//! - View traits the front ends implement
//! - The message renderer and send controller
//! - HTTP transport for the `/chat` endpoint
//! - Configuration

pub mod config;
pub mod controller;
pub mod message;
pub mod render;
pub mod transport;
pub mod view;

// Re-export commonly used types
pub use config::{Config, ConfigError, ENDPOINT_ENV};
pub use controller::{resolve_reply, ChatController, InFlight, PendingReply};
pub use message::{Message, Sender, FALLBACK_REPLY, WAITING_REPLY};
pub use render::render;
pub use transport::{ChatRequest, ChatResponse, ChatTransport, HttpTransport, TransportError};
pub use view::{InputField, MessageLog, MessageView, TextField};
