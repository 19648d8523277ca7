//! Diesel schema for chat persistence.
//!
//! The deployment schema additionally carries a unique index
//! `chat_conversations_pair_unique` on `chat_conversations.pair_key` when
//! multiple conversations per pair are disallowed; the repository treats an
//! insert that hits it as a lost race and reads the winning row back.

diesel::table! {
    /// Conversation records keyed by participant pair.
    chat_conversations (id) {
        /// Conversation identifier.
        id -> Uuid,
        /// Kind tag of the opening participant (`user` / `agent`).
        #[max_length = 16]
        sender_kind -> Varchar,
        /// Numeric id of the opening participant.
        sender_id -> Int8,
        /// Kind tag of the receiving participant.
        #[max_length = 16]
        receiver_kind -> Varchar,
        /// Numeric id of the receiving participant.
        receiver_id -> Int8,
        /// Order-independent pair key used for uniqueness.
        #[max_length = 64]
        pair_key -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last-activity timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only message records.
    chat_messages (id) {
        /// Message identifier.
        id -> Uuid,
        /// Owning conversation.
        conversation_id -> Uuid,
        /// Kind tag of the sending participant.
        #[max_length = 16]
        sender_kind -> Varchar,
        /// Numeric id of the sending participant.
        sender_id -> Int8,
        /// Kind tag of the receiving participant.
        #[max_length = 16]
        receiver_kind -> Varchar,
        /// Numeric id of the receiving participant.
        receiver_id -> Int8,
        /// Message body.
        body -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Agent registry: ids with the agent capability.
    chat_agents (id) {
        /// The agent's participant id.
        id -> Int8,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(chat_messages -> chat_conversations (conversation_id));
diesel::allow_tables_to_appear_in_same_query!(chat_conversations, chat_messages, chat_agents);
