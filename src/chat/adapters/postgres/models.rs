//! Diesel row models for chat persistence.

use super::schema::{chat_conversations, chat_messages};
use crate::chat::{
    domain::{
        ChatMessage, Conversation, ConversationId, MessageBody, MessageId, ParticipantKind,
        ParticipantRef, PersistedConversation, PersistedMessage,
    },
    error::RepositoryError,
    ports::repository::RepositoryResult,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for conversation records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = chat_conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConversationRow {
    /// Conversation identifier.
    pub id: uuid::Uuid,
    /// Opening participant kind tag.
    pub sender_kind: String,
    /// Opening participant id.
    pub sender_id: i64,
    /// Receiving participant kind tag.
    pub receiver_kind: String,
    /// Receiving participant id.
    pub receiver_id: i64,
    /// Order-independent pair key.
    pub pair_key: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-activity timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for conversation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = chat_conversations)]
pub struct NewConversationRow {
    /// Conversation identifier.
    pub id: uuid::Uuid,
    /// Opening participant kind tag.
    pub sender_kind: String,
    /// Opening participant id.
    pub sender_id: i64,
    /// Receiving participant kind tag.
    pub receiver_kind: String,
    /// Receiving participant id.
    pub receiver_id: i64,
    /// Order-independent pair key.
    pub pair_key: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-activity timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = chat_messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Message identifier.
    pub id: uuid::Uuid,
    /// Owning conversation.
    pub conversation_id: uuid::Uuid,
    /// Sending participant kind tag.
    pub sender_kind: String,
    /// Sending participant id.
    pub sender_id: i64,
    /// Receiving participant kind tag.
    pub receiver_kind: String,
    /// Receiving participant id.
    pub receiver_id: i64,
    /// Message body.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = chat_messages)]
pub struct NewMessageRow {
    /// Message identifier.
    pub id: uuid::Uuid,
    /// Owning conversation.
    pub conversation_id: uuid::Uuid,
    /// Sending participant kind tag.
    pub sender_kind: String,
    /// Sending participant id.
    pub sender_id: i64,
    /// Receiving participant kind tag.
    pub receiver_kind: String,
    /// Receiving participant id.
    pub receiver_id: i64,
    /// Message body.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

fn parse_kind(tag: &str) -> RepositoryResult<ParticipantKind> {
    ParticipantKind::try_from(tag).map_err(|msg| RepositoryError::database(std::io::Error::other(msg)))
}

/// Converts a conversation row back into the domain aggregate.
pub fn row_to_conversation(row: ConversationRow) -> RepositoryResult<Conversation> {
    let sender = ParticipantRef::new(parse_kind(&row.sender_kind)?, row.sender_id);
    let receiver = ParticipantRef::new(parse_kind(&row.receiver_kind)?, row.receiver_id);

    Ok(Conversation::from_persisted(PersistedConversation {
        id: ConversationId::from_uuid(row.id),
        sender,
        receiver,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// Converts a message row back into the domain aggregate.
pub fn row_to_message(row: MessageRow) -> RepositoryResult<ChatMessage> {
    let sender = ParticipantRef::new(parse_kind(&row.sender_kind)?, row.sender_id);
    let receiver = ParticipantRef::new(parse_kind(&row.receiver_kind)?, row.receiver_id);
    let body = MessageBody::new(row.body)
        .map_err(|err| RepositoryError::database(std::io::Error::other(err.to_string())))?;

    Ok(ChatMessage::from_persisted(PersistedMessage {
        id: MessageId::from_uuid(row.id),
        conversation_id: ConversationId::from_uuid(row.conversation_id),
        sender,
        receiver,
        body,
        created_at: row.created_at,
    }))
}

/// Builds the insert model for a conversation.
#[must_use]
pub fn to_new_conversation_row(conversation: &Conversation) -> NewConversationRow {
    NewConversationRow {
        id: conversation.id().into_inner(),
        sender_kind: conversation.sender().kind().as_str().to_owned(),
        sender_id: conversation.sender().id(),
        receiver_kind: conversation.receiver().kind().as_str().to_owned(),
        receiver_id: conversation.receiver().id(),
        pair_key: conversation.pair_key(),
        created_at: conversation.created_at(),
        updated_at: conversation.updated_at(),
    }
}

/// Builds the insert model for a message.
#[must_use]
pub fn to_new_message_row(message: &ChatMessage) -> NewMessageRow {
    NewMessageRow {
        id: message.id().into_inner(),
        conversation_id: message.conversation_id().into_inner(),
        sender_kind: message.sender().kind().as_str().to_owned(),
        sender_id: message.sender().id(),
        receiver_kind: message.receiver().kind().as_str().to_owned(),
        receiver_id: message.receiver().id(),
        body: message.body().as_str().to_owned(),
        created_at: message.created_at(),
    }
}
