//! Pure domain types for the chat module.
//!
//! No infrastructure dependencies: identifier newtypes, the participant
//! tagged union and its composite-key encoding, the conversation and message
//! aggregates, the actor context, and search result types.

mod actor;
mod conversation;
mod ids;
mod message;
mod participant;
mod search;

pub use actor::ActorContext;
pub use conversation::{Conversation, PersistedConversation, normalised_pair_key};
pub use ids::{ConversationId, MessageId};
pub use message::{ChatMessage, MessageBody, PersistedMessage};
pub use participant::{ParticipantKind, ParticipantRef};
pub use search::{SearchHit, SearchResults};
