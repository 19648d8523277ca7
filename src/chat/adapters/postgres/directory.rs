//! `PostgreSQL` implementation of the participant directory.
//!
//! The user and agent tables are named by configuration, so their table and
//! column identifiers cannot be parameterised through Diesel's typed DSL.
//! They are interpolated into `sql_query` text after a strict identifier
//! check; search terms and ids always travel as bind parameters.

use super::{ChatPgPool, schema::chat_agents};
use crate::chat::{
    error::DirectoryError,
    ports::directory::{
        DirectoryEntry, DirectoryResult, IdScope, ParticipantDirectory, SearchCriteria,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Nullable, Text};

#[derive(QueryableByName)]
struct PresenceRow {
    #[diesel(sql_type = Bool)]
    present: bool,
}

#[derive(QueryableByName)]
struct EntryRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
    #[diesel(sql_type = Nullable<Text>)]
    label: Option<String>,
}

#[derive(QueryableByName)]
struct LabelRow {
    #[diesel(sql_type = Nullable<Text>)]
    label: Option<String>,
}

#[derive(QueryableByName)]
struct AgentIdRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
}

/// Rejects identifiers that cannot be safely interpolated into SQL text.
///
/// Only `[A-Za-z_][A-Za-z0-9_]*` is accepted. Everything else is refused
/// before query construction; configuration values never reach the SQL text
/// unchecked.
pub(crate) fn ensure_safe_identifier(identifier: &str) -> DirectoryResult<()> {
    let mut bytes = identifier.bytes();
    let valid_head = bytes
        .next()
        .is_some_and(|byte| byte.is_ascii_alphabetic() || byte == b'_');
    let valid_tail = bytes.all(|byte| byte.is_ascii_alphanumeric() || byte == b'_');

    if valid_head && valid_tail {
        Ok(())
    } else {
        Err(DirectoryError::UnsafeIdentifier(identifier.to_owned()))
    }
}

/// Escapes `LIKE` metacharacters in a user-supplied search term.
pub(crate) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Renders an id list clause (`AND id IN (...)` / `AND id NOT IN (...)`).
///
/// Ids are `i64` values formatted directly; their decimal rendering contains
/// only digits and an optional leading minus, so no quoting is needed.
fn push_scope_clause(sql: &mut String, scope: &IdScope) {
    let (keyword, ids) = match scope {
        IdScope::All => return,
        IdScope::Within(ids) => ("IN", ids),
        IdScope::Excluding(ids) => ("NOT IN", ids),
    };
    if ids.is_empty() {
        return;
    }
    let list = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    sql.push_str(" AND id ");
    sql.push_str(keyword);
    sql.push_str(" (");
    sql.push_str(&list);
    sql.push(')');
}

/// `PostgreSQL`-backed participant directory.
#[derive(Debug, Clone)]
pub struct PostgresParticipantDirectory {
    pool: ChatPgPool,
}

impl PostgresParticipantDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ChatPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryError::database)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryError::database)?
    }
}

/// Builds the search query text for one model after vetting every
/// interpolated identifier. The search term itself travels as a bind.
pub(crate) fn build_search_sql(model: &str, criteria: &SearchCriteria) -> DirectoryResult<String> {
    ensure_safe_identifier(model)?;
    ensure_safe_identifier(criteria.label_column())?;
    for column in criteria.columns() {
        ensure_safe_identifier(column)?;
    }

    let mut sql = format!(
        "SELECT id, {}::text AS label FROM {} WHERE (",
        criteria.label_column(),
        model
    );
    for (index, column) in criteria.columns().iter().enumerate() {
        if index > 0 {
            sql.push_str(" OR ");
        }
        sql.push_str(column);
        sql.push_str(" LIKE $1");
    }
    sql.push(')');
    push_scope_clause(&mut sql, criteria.scope());
    sql.push_str(" ORDER BY id");
    Ok(sql)
}

#[async_trait]
impl ParticipantDirectory for PostgresParticipantDirectory {
    async fn model_exists(&self, model: &str) -> DirectoryResult<bool> {
        let model = model.to_owned();
        self.run_blocking(move |connection| {
            let row: PresenceRow = diesel::sql_query(concat!(
                "SELECT EXISTS (SELECT 1 FROM information_schema.tables ",
                "WHERE table_schema = current_schema() AND table_name = $1) AS present",
            ))
            .bind::<Text, _>(&model)
            .get_result(connection)?;
            Ok(row.present)
        })
        .await
    }

    async fn column_exists(&self, model: &str, column: &str) -> DirectoryResult<bool> {
        let model = model.to_owned();
        let column = column.to_owned();
        self.run_blocking(move |connection| {
            let row: PresenceRow = diesel::sql_query(concat!(
                "SELECT EXISTS (SELECT 1 FROM information_schema.columns ",
                "WHERE table_schema = current_schema() AND table_name = $1 ",
                "AND column_name = $2) AS present",
            ))
            .bind::<Text, _>(&model)
            .bind::<Text, _>(&column)
            .get_result(connection)?;
            Ok(row.present)
        })
        .await
    }

    async fn search(
        &self,
        model: &str,
        criteria: &SearchCriteria,
    ) -> DirectoryResult<Vec<DirectoryEntry>> {
        if criteria.columns().is_empty() {
            return Ok(Vec::new());
        }
        // A Within scope with no admissible ids can never match.
        if matches!(criteria.scope(), IdScope::Within(ids) if ids.is_empty()) {
            return Ok(Vec::new());
        }

        let sql = build_search_sql(model, criteria)?;
        let pattern = format!("%{}%", escape_like(criteria.term()));

        self.run_blocking(move |connection| {
            let rows: Vec<EntryRow> = diesel::sql_query(sql)
                .bind::<Text, _>(&pattern)
                .load(connection)?;
            Ok(rows
                .into_iter()
                .map(|row| DirectoryEntry {
                    id: row.id,
                    label: row.label.unwrap_or_default(),
                })
                .collect())
        })
        .await
    }

    async fn display_label(
        &self,
        model: &str,
        id: i64,
        label_column: &str,
    ) -> DirectoryResult<Option<String>> {
        ensure_safe_identifier(model)?;
        ensure_safe_identifier(label_column)?;
        let sql = format!("SELECT {label_column}::text AS label FROM {model} WHERE id = $1");

        self.run_blocking(move |connection| {
            let row: Option<LabelRow> = diesel::sql_query(sql)
                .bind::<BigInt, _>(id)
                .get_result(connection)
                .optional()?;
            Ok(row.map(|found| found.label.unwrap_or_default()))
        })
        .await
    }

    async fn agent_ids(&self) -> DirectoryResult<Vec<i64>> {
        self.run_blocking(|connection| {
            let ids = chat_agents::table
                .select(chat_agents::id)
                .order(chat_agents::id.asc())
                .load::<i64>(connection)?;
            Ok(ids)
        })
        .await
    }

    async fn random_agent_id(&self) -> DirectoryResult<Option<i64>> {
        self.run_blocking(|connection| {
            let row: Option<AgentIdRow> =
                diesel::sql_query("SELECT id FROM chat_agents ORDER BY random() LIMIT 1")
                    .get_result(connection)
                    .optional()?;
            Ok(row.map(|found| found.id))
        })
        .await
    }
}
