//! The conversation aggregate.
//!
//! A conversation identifies a sender and receiver participant pair and a
//! freshness timestamp. When multiple conversations per pair are disallowed,
//! pair identity is order-independent: A→B and B→A name the same thread.

use super::{ConversationId, ParticipantRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Returns the order-independent key identifying a participant pair.
///
/// The pair is ordered by kind then numeric id before joining the composite
/// keys, so `(user_7, agent_3)` and `(agent_3, user_7)` produce the same
/// value. Used by adapters to enforce pair uniqueness.
#[must_use]
pub fn normalised_pair_key(a: ParticipantRef, b: ParticipantRef) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    format!("{}:{}", low.composite_key(), high.composite_key())
}

/// Persisted field set for reconstructing a [`Conversation`] from storage.
#[derive(Debug, Clone)]
pub struct PersistedConversation {
    /// Conversation identifier.
    pub id: ConversationId,
    /// The participant who opened the conversation.
    pub sender: ParticipantRef,
    /// The participant the conversation was opened towards.
    pub receiver: ParticipantRef,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-activity timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A conversation between two participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    sender: ParticipantRef,
    receiver: ParticipantRef,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Opens a new conversation between `sender` and `receiver`.
    #[must_use]
    pub fn open(sender: ParticipantRef, receiver: ParticipantRef, now: DateTime<Utc>) -> Self {
        Self {
            id: ConversationId::new(),
            sender,
            receiver,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a conversation from persisted data.
    #[must_use]
    pub fn from_persisted(data: PersistedConversation) -> Self {
        Self {
            id: data.id,
            sender: data.sender,
            receiver: data.receiver,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the conversation identifier.
    #[must_use]
    pub const fn id(&self) -> ConversationId {
        self.id
    }

    /// Returns the participant who opened the conversation.
    #[must_use]
    pub const fn sender(&self) -> ParticipantRef {
        self.sender
    }

    /// Returns the participant the conversation was opened towards.
    #[must_use]
    pub const fn receiver(&self) -> ParticipantRef {
        self.receiver
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-activity timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when this conversation involves the given pair in
    /// either orientation.
    #[must_use]
    pub fn involves(&self, a: ParticipantRef, b: ParticipantRef) -> bool {
        (self.sender == a && self.receiver == b) || (self.sender == b && self.receiver == a)
    }

    /// Returns the order-independent pair key for this conversation.
    #[must_use]
    pub fn pair_key(&self) -> String {
        normalised_pair_key(self.sender, self.receiver)
    }

    /// Refreshes the last-activity timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
