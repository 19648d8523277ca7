//! Repository port for conversation and message persistence.
//!
//! The write path is a single atomic operation: reuse-or-create the
//! conversation, append the message, refresh the conversation's
//! last-activity timestamp, and publish the broadcast event, all inside one
//! transaction boundary. No partial state is observable outside it, and a
//! failed publish aborts the writes.

use std::sync::Arc;

use crate::chat::{
    domain::{ChatMessage, Conversation, ConversationId, MessageBody, ParticipantRef},
    error::{ExchangeError, RepositoryError},
    ports::events::MessageEventPublisher,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type for the atomic exchange operation.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// A validated request to record a message exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExchange {
    sender: ParticipantRef,
    receiver: ParticipantRef,
    body: MessageBody,
    reuse_existing: bool,
}

impl NewExchange {
    /// Creates an exchange request that reuses an existing conversation for
    /// the pair when one exists.
    #[must_use]
    pub const fn new(sender: ParticipantRef, receiver: ParticipantRef, body: MessageBody) -> Self {
        Self {
            sender,
            receiver,
            body,
            reuse_existing: true,
        }
    }

    /// Sets whether an existing conversation for the pair is reused.
    ///
    /// When disabled, every exchange opens a fresh conversation (the
    /// multiple-conversations configuration mode).
    #[must_use]
    pub fn with_reuse(mut self, reuse: bool) -> Self {
        self.reuse_existing = reuse;
        self
    }

    /// Returns the sending participant.
    #[must_use]
    pub const fn sender(&self) -> ParticipantRef {
        self.sender
    }

    /// Returns the receiving participant.
    #[must_use]
    pub const fn receiver(&self) -> ParticipantRef {
        self.receiver
    }

    /// Returns the message body.
    #[must_use]
    pub const fn body(&self) -> &MessageBody {
        &self.body
    }

    /// Returns `true` when an existing conversation for the pair is reused.
    #[must_use]
    pub const fn reuse_existing(&self) -> bool {
        self.reuse_existing
    }
}

/// The outcome of a recorded exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRecord {
    conversation: Conversation,
    message: ChatMessage,
    reused: bool,
}

impl ExchangeRecord {
    /// Creates an exchange record.
    #[must_use]
    pub const fn new(conversation: Conversation, message: ChatMessage, reused: bool) -> Self {
        Self {
            conversation,
            message,
            reused,
        }
    }

    /// Returns the conversation the message was appended to.
    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the appended message.
    #[must_use]
    pub const fn message(&self) -> &ChatMessage {
        &self.message
    }

    /// Returns `true` when an existing conversation was reused rather than
    /// created.
    #[must_use]
    pub const fn reused(&self) -> bool {
        self.reused
    }
}

/// Port for conversation and message persistence.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - `start_exchange` is atomic: either all of its writes land or none do,
///   and a failed event publish counts as a failed write
/// - Pair reuse matches the unordered pair in either orientation
/// - Two concurrent exchanges for the same pair with reuse enabled resolve
///   to one conversation (unique constraint or equivalent), not two
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Records an exchange: reuse-or-create the conversation, append the
    /// message, refresh the conversation's `updated_at` to `now`, and
    /// publish the broadcast event through `events`, all atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError`] if any write or the event publish fails; no
    /// partial writes remain in either case.
    async fn start_exchange(
        &self,
        exchange: &NewExchange,
        now: DateTime<Utc>,
        events: Arc<dyn MessageEventPublisher>,
    ) -> ExchangeResult<ExchangeRecord>;

    /// Retrieves a conversation by id.
    ///
    /// Returns `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the query fails.
    async fn find_by_id(&self, id: ConversationId) -> RepositoryResult<Option<Conversation>>;

    /// Finds the conversation for an unordered participant pair, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the query fails.
    async fn find_for_pair(
        &self,
        a: ParticipantRef,
        b: ParticipantRef,
    ) -> RepositoryResult<Option<Conversation>>;

    /// Returns a conversation's messages in append order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the query fails.
    async fn messages(&self, conversation_id: ConversationId)
    -> RepositoryResult<Vec<ChatMessage>>;
}
