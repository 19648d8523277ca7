//! Participant references: a tagged (kind, id) pair identifying either side
//! of a conversation.
//!
//! Two otherwise separate identifier spaces (users and agents) share one
//! selection UI, so search results are keyed by a composite key of the form
//! `user_<id>` or `agent_<id>`. The key is parsed and validated once at the
//! boundary; everything deeper in the call chain works with the structured
//! [`ParticipantRef`] value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of participant kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    /// A customer-side user record.
    User,
    /// An agent record.
    Agent,
}

impl ParticipantKind {
    /// Returns the lowercase tag used in composite keys and persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
        }
    }
}

impl TryFrom<&str> for ParticipantKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Self::User),
            "agent" => Ok(Self::Agent),
            other => Err(format!("unknown participant kind '{other}'")),
        }
    }
}

impl fmt::Display for ParticipantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A polymorphic participant reference: the (kind, id) pair standing in for
/// one side of a conversation.
///
/// # Examples
///
/// ```
/// use chatdesk::chat::domain::{ParticipantKind, ParticipantRef};
///
/// let agent = ParticipantRef::agent(3);
/// assert_eq!(agent.composite_key(), "agent_3");
/// assert_eq!(ParticipantRef::parse("agent_3"), Some(agent));
/// assert_eq!(ParticipantRef::parse("agent_x"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantRef {
    /// The kind of entity this reference points at.
    kind: ParticipantKind,
    /// The numeric row identifier within that kind's table.
    id: i64,
}

impl ParticipantRef {
    /// Creates a participant reference from a kind and numeric id.
    #[must_use]
    pub const fn new(kind: ParticipantKind, id: i64) -> Self {
        Self { kind, id }
    }

    /// Creates a user participant reference.
    #[must_use]
    pub const fn user(id: i64) -> Self {
        Self::new(ParticipantKind::User, id)
    }

    /// Creates an agent participant reference.
    #[must_use]
    pub const fn agent(id: i64) -> Self {
        Self::new(ParticipantKind::Agent, id)
    }

    /// Returns the participant kind.
    #[must_use]
    pub const fn kind(self) -> ParticipantKind {
        self.kind
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn id(self) -> i64 {
        self.id
    }

    /// Encodes this reference as a composite key (`user_<id>` / `agent_<id>`).
    #[must_use]
    pub fn composite_key(self) -> String {
        format!("{}_{}", self.kind.as_str(), self.id)
    }

    /// Parses a composite key back into a participant reference.
    ///
    /// Accepts exactly `user_<digits>` or `agent_<digits>` where the digit
    /// suffix fits in an `i64`. Anything else (wrong case, missing suffix,
    /// trailing junk, sign characters) yields `None`.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        let (kind, digits) = key
            .strip_prefix("user_")
            .map(|rest| (ParticipantKind::User, rest))
            .or_else(|| {
                key.strip_prefix("agent_")
                    .map(|rest| (ParticipantKind::Agent, rest))
            })?;

        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }

        // All-digit suffixes can still overflow i64; treat that as malformed.
        digits.parse::<i64>().ok().map(|id| Self::new(kind, id))
    }
}

impl fmt::Display for ParticipantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.as_str(), self.id)
    }
}
