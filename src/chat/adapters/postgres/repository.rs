//! `PostgreSQL` repository implementation for conversation persistence.
//!
//! All writes for one exchange run inside a single database transaction,
//! together with the broadcast event publish: a rejected event rolls the
//! transaction back. Pair uniqueness is enforced by the
//! `chat_conversations_pair_unique` index rather than by the read-then-write
//! check alone: an insert that conflicts reads the winning row back instead
//! of failing.

use super::{
    ChatPgPool,
    models::{
        ConversationRow, MessageRow, row_to_conversation, row_to_message, to_new_conversation_row,
        to_new_message_row,
    },
    schema::{chat_conversations, chat_messages},
};
use crate::chat::{
    domain::{ChatMessage, Conversation, ConversationId, ParticipantRef, normalised_pair_key},
    error::{ExchangeError, RepositoryError},
    ports::{
        events::{MessageEvent, MessageEventPublisher},
        repository::{
            ConversationRepository, ExchangeRecord, ExchangeResult, NewExchange, RepositoryResult,
        },
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::sync::Arc;

/// `PostgreSQL`-backed conversation repository.
#[derive(Debug, Clone)]
pub struct PostgresConversationRepository {
    pool: ChatPgPool,
}

impl PostgresConversationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ChatPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| E::from(RepositoryError::database(err)))?;
            f(&mut connection)
        })
        .await
        .map_err(|err| E::from(RepositoryError::database(err)))?
    }
}

fn find_pair_row(
    connection: &mut PgConnection,
    pair_key: &str,
) -> RepositoryResult<Option<ConversationRow>> {
    let row = chat_conversations::table
        .filter(chat_conversations::pair_key.eq(pair_key))
        .select(ConversationRow::as_select())
        .first::<ConversationRow>(connection)
        .optional()?;
    Ok(row)
}

/// Reuses the pair's conversation or opens a new one.
///
/// The insert uses `ON CONFLICT DO NOTHING` so that losing the
/// pair-uniqueness race inside the transaction does not abort it; the
/// winning row is read back instead.
fn reuse_or_open(
    connection: &mut PgConnection,
    exchange: &NewExchange,
    now: DateTime<Utc>,
) -> RepositoryResult<(Conversation, bool)> {
    let pair_key = normalised_pair_key(exchange.sender(), exchange.receiver());

    if exchange.reuse_existing()
        && let Some(row) = find_pair_row(connection, &pair_key)?
    {
        return Ok((row_to_conversation(row)?, true));
    }

    let opened = Conversation::open(exchange.sender(), exchange.receiver(), now);
    let inserted = diesel::insert_into(chat_conversations::table)
        .values(to_new_conversation_row(&opened))
        .on_conflict_do_nothing()
        .execute(connection)?;

    if inserted == 0 {
        let row = find_pair_row(connection, &pair_key)?.ok_or_else(|| {
            RepositoryError::connection("conversation insert conflicted but no row is visible")
        })?;
        return Ok((row_to_conversation(row)?, true));
    }

    Ok((opened, false))
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn start_exchange(
        &self,
        exchange: &NewExchange,
        now: DateTime<Utc>,
        events: Arc<dyn MessageEventPublisher>,
    ) -> ExchangeResult<ExchangeRecord> {
        let exchange = exchange.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<ExchangeRecord, ExchangeError, _>(|connection| {
                let (mut conversation, reused) = reuse_or_open(connection, &exchange, now)
                    .map_err(ExchangeError::Repository)?;

                let message = ChatMessage::record(
                    conversation.id(),
                    exchange.sender(),
                    exchange.receiver(),
                    exchange.body().clone(),
                    now,
                );
                diesel::insert_into(chat_messages::table)
                    .values(to_new_message_row(&message))
                    .execute(connection)?;

                diesel::update(
                    chat_conversations::table
                        .filter(chat_conversations::id.eq(conversation.id().into_inner())),
                )
                .set(chat_conversations::updated_at.eq(now))
                .execute(connection)?;
                conversation.touch(now);

                // A rejected publish aborts the transaction with it.
                let event = MessageEvent::new(
                    conversation.id(),
                    message.id(),
                    exchange.receiver(),
                    exchange.sender(),
                );
                events.publish(&event).map_err(ExchangeError::Event)?;

                Ok(ExchangeRecord::new(conversation, message, reused))
            })
        })
        .await
    }

    async fn find_by_id(&self, id: ConversationId) -> RepositoryResult<Option<Conversation>> {
        self.run_blocking(move |connection| {
            let row = chat_conversations::table
                .filter(chat_conversations::id.eq(id.into_inner()))
                .select(ConversationRow::as_select())
                .first::<ConversationRow>(connection)
                .optional()?;
            row.map(row_to_conversation).transpose()
        })
        .await
    }

    async fn find_for_pair(
        &self,
        a: ParticipantRef,
        b: ParticipantRef,
    ) -> RepositoryResult<Option<Conversation>> {
        let pair_key = normalised_pair_key(a, b);
        self.run_blocking(move |connection| {
            let row = find_pair_row(connection, &pair_key)?;
            row.map(row_to_conversation).transpose()
        })
        .await
    }

    async fn messages(
        &self,
        conversation_id: ConversationId,
    ) -> RepositoryResult<Vec<ChatMessage>> {
        self.run_blocking(move |connection| {
            let rows = chat_messages::table
                .filter(chat_messages::conversation_id.eq(conversation_id.into_inner()))
                .order(chat_messages::created_at.asc())
                .select(MessageRow::as_select())
                .load::<MessageRow>(connection)?;
            rows.into_iter().map(row_to_message).collect()
        })
        .await
    }
}
