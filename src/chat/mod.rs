//! Chat-list search, label resolution, and conversation creation.
//!
//! This module implements the messaging surface of an admin panel: a shared
//! search box over users and agents, display-label resolution for selected
//! composite keys, and transactional conversation-plus-first-message creation
//! with a broadcast event on success.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::ParticipantRef`], [`domain::Conversation`], [`domain::ChatMessage`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::directory::ParticipantDirectory`], [`ports::repository::ConversationRepository`])
//! - **Adapters**: Concrete implementations ([`adapters::memory`], [`adapters::postgres`])
//! - **Services**: Orchestration ([`services::ChatListService`])
//!
//! # Example
//!
//! ```
//! use chatdesk::chat::adapters::memory::{
//!     InMemoryConversationRepository, InMemoryDirectory, RecordingEventPublisher,
//! };
//! use chatdesk::chat::config::ChatConfig;
//! use chatdesk::chat::domain::ActorContext;
//! use chatdesk::chat::services::ChatListService;
//! use mockable::DefaultClock;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runtime = tokio::runtime::Runtime::new()?;
//! runtime.block_on(async {
//!     let directory = InMemoryDirectory::new();
//!     directory.define_model("users", ["name"])?;
//!     directory.define_model("agents", ["name"])?;
//!
//!     let service = ChatListService::new(
//!         ChatConfig::default(),
//!         Arc::new(directory),
//!         Arc::new(InMemoryConversationRepository::new()),
//!         Arc::new(RecordingEventPublisher::new()),
//!         Arc::new(DefaultClock),
//!     )
//!     .await?;
//!
//!     // An empty result set is a valid outcome, never an error.
//!     let results = service.search(&ActorContext::user(7), "nobody").await?;
//!     assert!(results.is_empty());
//!     Ok::<(), Box<dyn std::error::Error>>(())
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
