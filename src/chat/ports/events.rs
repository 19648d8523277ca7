//! Broadcast event port for real-time message delivery.
//!
//! Each recorded exchange publishes one [`MessageEvent`] for downstream
//! fan-out to connected clients. Publication happens inside the exchange's
//! atomic boundary: a failed publish aborts the writes, so the port is
//! synchronous and implementations hand the event to the transport (websocket
//! hub, pub/sub broker) without awaiting delivery.

use crate::chat::domain::{ConversationId, MessageId, ParticipantRef};
use crate::chat::error::EventError;
use serde::Serialize;

/// Result type for event publishing.
pub type EventResult<T> = Result<T, EventError>;

/// The payload broadcast after a message is recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageEvent {
    conversation_id: ConversationId,
    message_id: MessageId,
    receiver: ParticipantRef,
    sender: ParticipantRef,
}

impl MessageEvent {
    /// Creates a message event.
    #[must_use]
    pub const fn new(
        conversation_id: ConversationId,
        message_id: MessageId,
        receiver: ParticipantRef,
        sender: ParticipantRef,
    ) -> Self {
        Self {
            conversation_id,
            message_id,
            receiver,
            sender,
        }
    }

    /// Returns the conversation the message belongs to.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// Returns the recorded message's identifier.
    #[must_use]
    pub const fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Returns the receiving participant.
    #[must_use]
    pub const fn receiver(&self) -> ParticipantRef {
        self.receiver
    }

    /// Returns the sending participant.
    #[must_use]
    pub const fn sender(&self) -> ParticipantRef {
        self.sender
    }
}

/// Port for one-shot broadcast event publication.
///
/// Called by repository implementations inside the exchange's transaction
/// boundary; returning an error rolls the exchange back.
pub trait MessageEventPublisher: Send + Sync {
    /// Publishes one event to the transport.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] when the transport rejects the event.
    fn publish(&self, event: &MessageEvent) -> EventResult<()>;
}
