//! In-memory implementation of the [`ParticipantDirectory`] port.
//!
//! Models are plain column/row tables seeded by tests; the agent registry is
//! an ordered id list. Search preserves row insertion order, matching the
//! query-order contract of the real adapter.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::chat::{
    error::DirectoryError,
    ports::directory::{DirectoryEntry, DirectoryResult, ParticipantDirectory, SearchCriteria},
};

#[derive(Debug, Default)]
struct ModelTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug)]
struct Row {
    id: i64,
    values: HashMap<String, String>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    models: HashMap<String, ModelTable>,
    agent_ids: Vec<i64>,
}

/// In-memory implementation of [`ParticipantDirectory`].
///
/// # Example
///
/// ```
/// use chatdesk::chat::adapters::memory::InMemoryDirectory;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let directory = InMemoryDirectory::new();
/// directory.define_model("users", ["name", "email"])?;
/// directory.insert("users", 7, [("name", "Alice"), ("email", "alice@example.test")])?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> DirectoryResult<RwLockReadGuard<'_, DirectoryState>> {
        self.state
            .read()
            .map_err(|e| DirectoryError::connection(format!("lock poisoned: {e}")))
    }

    fn write_state(&self) -> DirectoryResult<RwLockWriteGuard<'_, DirectoryState>> {
        self.state
            .write()
            .map_err(|e| DirectoryError::connection(format!("lock poisoned: {e}")))
    }

    /// Defines a model with the given columns.
    ///
    /// Redefining a model replaces its columns and drops its rows.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Connection`] when the internal lock is
    /// poisoned.
    pub fn define_model(
        &self,
        model: &str,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> DirectoryResult<()> {
        let mut state = self.write_state()?;
        state.models.insert(
            model.to_owned(),
            ModelTable {
                columns: columns.into_iter().map(Into::into).collect(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    /// Inserts a row into a model's table.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::ModelNotFound`] when the model has not been
    /// defined.
    pub fn insert(
        &self,
        model: &str,
        id: i64,
        values: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> DirectoryResult<()> {
        let mut state = self.write_state()?;
        let table = state
            .models
            .get_mut(model)
            .ok_or_else(|| DirectoryError::ModelNotFound(model.to_owned()))?;
        table.rows.push(Row {
            id,
            values: values
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        });
        Ok(())
    }

    /// Registers an id in the agent registry.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Connection`] when the internal lock is
    /// poisoned.
    pub fn register_agent(&self, id: i64) -> DirectoryResult<()> {
        let mut state = self.write_state()?;
        if !state.agent_ids.contains(&id) {
            state.agent_ids.push(id);
        }
        Ok(())
    }
}

fn row_matches(row: &Row, criteria: &SearchCriteria) -> bool {
    criteria.columns().iter().any(|column| {
        row.values
            .get(column)
            .is_some_and(|value| value.contains(criteria.term()))
    })
}

fn row_label(row: &Row, label_column: &str) -> String {
    row.values.get(label_column).cloned().unwrap_or_default()
}

#[async_trait]
impl ParticipantDirectory for InMemoryDirectory {
    async fn model_exists(&self, model: &str) -> DirectoryResult<bool> {
        Ok(self.read_state()?.models.contains_key(model))
    }

    async fn column_exists(&self, model: &str, column: &str) -> DirectoryResult<bool> {
        let state = self.read_state()?;
        Ok(state
            .models
            .get(model)
            .is_some_and(|table| table.columns.iter().any(|c| c == column)))
    }

    async fn search(
        &self,
        model: &str,
        criteria: &SearchCriteria,
    ) -> DirectoryResult<Vec<DirectoryEntry>> {
        let state = self.read_state()?;
        let table = state
            .models
            .get(model)
            .ok_or_else(|| DirectoryError::ModelNotFound(model.to_owned()))?;

        Ok(table
            .rows
            .iter()
            .filter(|row| criteria.scope().admits(row.id))
            .filter(|row| row_matches(row, criteria))
            .map(|row| DirectoryEntry {
                id: row.id,
                label: row_label(row, criteria.label_column()),
            })
            .collect())
    }

    async fn display_label(
        &self,
        model: &str,
        id: i64,
        label_column: &str,
    ) -> DirectoryResult<Option<String>> {
        let state = self.read_state()?;
        let table = state
            .models
            .get(model)
            .ok_or_else(|| DirectoryError::ModelNotFound(model.to_owned()))?;

        Ok(table
            .rows
            .iter()
            .find(|row| row.id == id)
            .map(|row| row_label(row, label_column)))
    }

    async fn agent_ids(&self) -> DirectoryResult<Vec<i64>> {
        Ok(self.read_state()?.agent_ids.clone())
    }

    async fn random_agent_id(&self) -> DirectoryResult<Option<i64>> {
        let state = self.read_state()?;
        Ok(state.agent_ids.choose(&mut rand::thread_rng()).copied())
    }
}
