//! Directory port over the user and agent tables.
//!
//! The directory answers schema questions (does this model/column exist),
//! runs the chat-list substring search, resolves display labels, and exposes
//! the agent registry. Implementations decide how models map to storage; the
//! service only names them by their configured identifiers.

use crate::chat::error::DirectoryError;
use async_trait::async_trait;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Restriction on which row ids a search may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdScope {
    /// No restriction.
    All,
    /// Only rows whose id appears in the list.
    Within(Vec<i64>),
    /// Only rows whose id does not appear in the list.
    Excluding(Vec<i64>),
}

impl IdScope {
    /// Returns `true` when the given id is admitted by this scope.
    #[must_use]
    pub fn admits(&self, id: i64) -> bool {
        match self {
            Self::All => true,
            Self::Within(ids) => ids.contains(&id),
            Self::Excluding(ids) => !ids.contains(&id),
        }
    }
}

/// A free-text search over one model's table.
///
/// Matching is a logical OR of substring matches across `columns`; `label`
/// names the column projected as the display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    term: String,
    columns: Vec<String>,
    label_column: String,
    scope: IdScope,
}

impl SearchCriteria {
    /// Creates search criteria.
    #[must_use]
    pub fn new(
        term: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
        label_column: impl Into<String>,
        scope: IdScope,
    ) -> Self {
        Self {
            term: term.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            label_column: label_column.into(),
            scope,
        }
    }

    /// Returns the raw search term (no wildcards applied).
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns the columns matched by the OR chain.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the column projected as the display label.
    #[must_use]
    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Returns the id restriction.
    #[must_use]
    pub const fn scope(&self) -> &IdScope {
        &self.scope
    }
}

/// One directory row matched by a search: its id and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// The row's numeric identifier.
    pub id: i64,
    /// The display label projected from the configured column.
    pub label: String,
}

/// Port over the user/agent tables and the agent registry.
#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    /// Returns `true` when the named model has a backing table.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the schema introspection query fails.
    async fn model_exists(&self, model: &str) -> DirectoryResult<bool>;

    /// Returns `true` when the model's table has the named column.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the schema introspection query fails.
    async fn column_exists(&self, model: &str, column: &str) -> DirectoryResult<bool>;

    /// Runs a substring search over the model's table.
    ///
    /// Results follow the underlying query order. An empty result set is a
    /// valid outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the model is unknown or the query fails.
    async fn search(
        &self,
        model: &str,
        criteria: &SearchCriteria,
    ) -> DirectoryResult<Vec<DirectoryEntry>>;

    /// Resolves the display label for one row.
    ///
    /// Returns `None` when the row does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the model is unknown or the query fails.
    async fn display_label(
        &self,
        model: &str,
        id: i64,
        label_column: &str,
    ) -> DirectoryResult<Option<String>>;

    /// Returns all registered agent ids.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the query fails.
    async fn agent_ids(&self) -> DirectoryResult<Vec<i64>>;

    /// Picks one registered agent uniformly at random.
    ///
    /// Returns `None` when the registry is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the query fails.
    async fn random_agent_id(&self) -> DirectoryResult<Option<i64>>;
}
