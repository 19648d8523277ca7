//! Error types for the chat module.
//!
//! Uses `thiserror` for typed variants that callers can inspect. Each layer
//! has its own error enum; [`ChatError`] is the service-level sum. A label
//! lookup on a missing record is expressed as `Ok(None)`, never as an error.

use super::domain::ConversationId;
use std::sync::Arc;
use thiserror::Error;

/// Configuration errors raised at service construction.
///
/// These are fail-fast: an invalid configuration halts setup rather than
/// surfacing later as query failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configured entity model does not exist in the directory.
    #[error("model '{0}' not found")]
    UnknownModel(String),

    /// A configured searchable column is absent from its model's table.
    #[error("column '{column}' not found in '{model}'")]
    MissingColumn {
        /// The model whose table was inspected.
        model: String,
        /// The missing column name.
        column: String,
    },

    /// The directory itself failed while validating the configuration.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Input validation failures. Safe to show to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No receiver was supplied and auto-assignment is unavailable.
    #[error("a receiver is required")]
    ReceiverRequired,

    /// The receiver key matched neither `user_<id>` nor `agent_<id>`.
    #[error("unrecognised receiver key '{0}'")]
    UnrecognisedReceiverKey(String),

    /// The message body is empty or whitespace-only.
    #[error("message body cannot be empty")]
    EmptyMessageBody,

    /// Auto-assignment was requested but the agent registry is empty.
    #[error("no agent is available for assignment")]
    NoAgentAvailable,

    /// The resolved receiver is the actor itself.
    #[error("cannot start a conversation with yourself")]
    SelfConversation,
}

/// Errors from the participant directory (user/agent tables).
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The named model has no backing table.
    #[error("model '{0}' not found")]
    ModelNotFound(String),

    /// An identifier failed the safety check for dynamic SQL interpolation.
    #[error("unsafe identifier '{0}'")]
    UnsafeIdentifier(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(Arc<dyn std::error::Error + Send + Sync>),

    /// A connection error occurred.
    #[error("connection error: {0}")]
    Connection(String),
}

impl DirectoryError {
    /// Creates a database error from any error type.
    #[must_use]
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Database(Arc::new(err))
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

impl From<diesel::result::Error> for DirectoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::database(err)
    }
}

/// Errors from conversation/message persistence.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The conversation was not found.
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(Arc<dyn std::error::Error + Send + Sync>),

    /// A connection error occurred.
    #[error("connection error: {0}")]
    Connection(String),
}

impl RepositoryError {
    /// Creates a database error from any error type.
    #[must_use]
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Database(Arc::new(err))
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::database(err)
    }
}

/// Errors from the broadcast event port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The event could not be handed to the transport.
    #[error("event publish failed: {0}")]
    PublishFailed(String),
}

/// Errors from the atomic exchange operation.
///
/// Event publication runs inside the exchange's transaction boundary, so a
/// failed publish aborts the writes alongside any persistence failure.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Persistence failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The broadcast event could not be published.
    #[error(transparent)]
    Event(#[from] EventError),
}

impl From<diesel::result::Error> for ExchangeError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Repository(RepositoryError::from(err))
    }
}

/// Service-level error: the sum of the per-layer kinds.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Input validation failed; no writes were attempted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The participant directory failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Persistence failed; the transaction was rolled back.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The broadcast event could not be published; the exchange was rolled
    /// back with it.
    #[error(transparent)]
    Event(#[from] EventError),
}

impl From<ExchangeError> for ChatError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::Repository(repository) => Self::Repository(repository),
            ExchangeError::Event(event) => Self::Event(event),
        }
    }
}

impl ChatError {
    /// Returns `true` when the error is an input validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
