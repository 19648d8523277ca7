//! Chatdesk: chat-list and conversation-creation services for an admin-panel
//! messaging surface.
//!
//! This crate resolves user/agent search results into composite participant
//! keys, looks up display labels for selected keys, and creates or reuses
//! conversations together with their first message, publishing a broadcast
//! event on success.
//!
//! # Architecture
//!
//! Chatdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`chat`]: Chat-list search, label resolution, and conversation creation

pub mod chat;
