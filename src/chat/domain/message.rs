//! The chat message aggregate and its validated body.
//!
//! Messages are append-only: once recorded they are never mutated or deleted
//! by this service.

use super::{ConversationId, MessageId, ParticipantRef};
use crate::chat::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A non-blank message body.
///
/// Validated once at the boundary; a stored [`ChatMessage`] always carries a
/// body with visible content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBody(String);

impl MessageBody {
    /// Creates a validated message body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyMessageBody`] when the text is empty
    /// or whitespace-only.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyMessageBody);
        }
        Ok(Self(text))
    }

    /// Returns the body text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the body, returning the inner text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Persisted field set for reconstructing a [`ChatMessage`] from storage.
#[derive(Debug, Clone)]
pub struct PersistedMessage {
    /// Message identifier.
    pub id: MessageId,
    /// Owning conversation.
    pub conversation_id: ConversationId,
    /// Sending participant.
    pub sender: ParticipantRef,
    /// Receiving participant.
    pub receiver: ParticipantRef,
    /// Message body.
    pub body: MessageBody,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A message belonging to exactly one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: MessageId,
    conversation_id: ConversationId,
    sender: ParticipantRef,
    receiver: ParticipantRef,
    body: MessageBody,
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Records a new message with a fresh identifier.
    #[must_use]
    pub fn record(
        conversation_id: ConversationId,
        sender: ParticipantRef,
        receiver: ParticipantRef,
        body: MessageBody,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            conversation_id,
            sender,
            receiver,
            body,
            created_at: now,
        }
    }

    /// Reconstructs a message from persisted data.
    #[must_use]
    pub fn from_persisted(data: PersistedMessage) -> Self {
        Self {
            id: data.id,
            conversation_id: data.conversation_id,
            sender: data.sender,
            receiver: data.receiver,
            body: data.body,
            created_at: data.created_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the owning conversation's identifier.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
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

    /// Returns when the message was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
