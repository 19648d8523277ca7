//! `PostgreSQL` implementations of the chat ports.
//!
//! Diesel-backed adapters sharing an r2d2 connection pool. Blocking database
//! work runs on the Tokio blocking pool via `spawn_blocking`.

pub(crate) mod directory;
mod models;
mod repository;
mod schema;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

pub use directory::PostgresParticipantDirectory;
pub use repository::PostgresConversationRepository;

/// `PostgreSQL` connection pool type used by the chat adapters.
pub type ChatPgPool = Pool<ConnectionManager<PgConnection>>;
