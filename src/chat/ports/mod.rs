//! Port contracts for the chat module.
//!
//! Abstract trait interfaces consumed by the service layer and implemented
//! by adapters: the participant directory, conversation persistence, the
//! broadcast event transport, and the user-facing notifier.

pub mod directory;
pub mod events;
pub mod notifier;
pub mod repository;

pub use directory::{DirectoryEntry, DirectoryResult, IdScope, ParticipantDirectory, SearchCriteria};
pub use events::{EventResult, MessageEvent, MessageEventPublisher};
pub use notifier::{Notice, NoticeSeverity, UserNotifier};
pub use repository::{
    ConversationRepository, ExchangeRecord, ExchangeResult, NewExchange, RepositoryResult,
};
