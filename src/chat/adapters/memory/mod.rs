//! In-memory implementations of the chat ports.
//!
//! Thread-safe test doubles backed by `Arc<RwLock<_>>`. Not suitable for
//! production use.

mod directory;
mod events;
mod notifier;
mod repository;

pub use directory::InMemoryDirectory;
pub use events::RecordingEventPublisher;
pub use notifier::RecordingNotifier;
pub use repository::InMemoryConversationRepository;
