//! In-memory implementation of the [`ConversationRepository`] port.
//!
//! All writes for one exchange happen under a single write lock, mirroring
//! the transactional all-or-nothing boundary of the database adapter. The
//! exchange is staged first and committed only after the broadcast event
//! publishes, so a failed publish leaves no trace.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::chat::{
    domain::{ChatMessage, Conversation, ConversationId, ParticipantRef},
    error::RepositoryError,
    ports::{
        events::{MessageEvent, MessageEventPublisher},
        repository::{
            ConversationRepository, ExchangeRecord, ExchangeResult, NewExchange, RepositoryResult,
        },
    },
};

#[derive(Debug, Default)]
struct RepositoryState {
    conversations: Vec<Conversation>,
    messages: Vec<ChatMessage>,
}

/// In-memory implementation of [`ConversationRepository`].
///
/// Thread-safe via internal [`RwLock`]. Suitable for unit tests only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryConversationRepository {
    state: Arc<RwLock<RepositoryState>>,
}

impl InMemoryConversationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> RepositoryResult<RwLockReadGuard<'_, RepositoryState>> {
        self.state
            .read()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))
    }

    fn write_state(&self) -> RepositoryResult<RwLockWriteGuard<'_, RepositoryState>> {
        self.state
            .write()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))
    }

    /// Returns the number of stored conversations.
    ///
    /// Returns `0` if the internal lock is poisoned, matching the fallback
    /// behaviour of an empty repository.
    #[must_use]
    pub fn conversation_count(&self) -> usize {
        self.state
            .read()
            .map(|state| state.conversations.len())
            .unwrap_or(0)
    }

    /// Returns the number of stored messages.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.state
            .read()
            .map(|state| state.messages.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn start_exchange(
        &self,
        exchange: &NewExchange,
        now: DateTime<Utc>,
        events: Arc<dyn MessageEventPublisher>,
    ) -> ExchangeResult<ExchangeRecord> {
        // One write lock for the whole sequence keeps it all-or-nothing and
        // closes the check-then-create race within this adapter.
        let mut state = self.write_state()?;

        let existing_index = if exchange.reuse_existing() {
            state
                .conversations
                .iter()
                .position(|c| c.involves(exchange.sender(), exchange.receiver()))
        } else {
            None
        };

        let (conversation, reused) = match existing_index.and_then(|i| state.conversations.get(i))
        {
            Some(found) => {
                let mut touched = found.clone();
                touched.touch(now);
                (touched, true)
            }
            None => (
                Conversation::open(exchange.sender(), exchange.receiver(), now),
                false,
            ),
        };

        let message = ChatMessage::record(
            conversation.id(),
            exchange.sender(),
            exchange.receiver(),
            exchange.body().clone(),
            now,
        );

        // Publish before committing anything: a rejected event aborts the
        // whole exchange.
        let event = MessageEvent::new(
            conversation.id(),
            message.id(),
            exchange.receiver(),
            exchange.sender(),
        );
        events.publish(&event)?;

        match existing_index.and_then(|i| state.conversations.get_mut(i)) {
            Some(slot) => *slot = conversation.clone(),
            None => state.conversations.push(conversation.clone()),
        }
        state.messages.push(message.clone());

        Ok(ExchangeRecord::new(conversation, message, reused))
    }

    async fn find_by_id(&self, id: ConversationId) -> RepositoryResult<Option<Conversation>> {
        let state = self.read_state()?;
        Ok(state.conversations.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_for_pair(
        &self,
        a: ParticipantRef,
        b: ParticipantRef,
    ) -> RepositoryResult<Option<Conversation>> {
        let state = self.read_state()?;
        Ok(state
            .conversations
            .iter()
            .find(|c| c.involves(a, b))
            .cloned())
    }

    async fn messages(
        &self,
        conversation_id: ConversationId,
    ) -> RepositoryResult<Vec<ChatMessage>> {
        let state = self.read_state()?;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.conversation_id() == conversation_id)
            .cloned()
            .collect())
    }
}
