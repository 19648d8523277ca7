//! The authenticated actor on whose behalf an operation runs.
//!
//! Passed explicitly into every service operation rather than read from a
//! global authentication singleton.

use super::{ParticipantKind, ParticipantRef};

/// Identity and capabilities of the current actor.
///
/// The `kind` names the table the actor's row lives in; the `agent` flag is
/// the capability check ("is this actor an agent"). The two are independent:
/// in deployments where agents are ordinary user rows listed in an agent
/// registry, an agent actor has kind [`ParticipantKind::User`] with the flag
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    id: i64,
    kind: ParticipantKind,
    agent: bool,
}

impl ActorContext {
    /// Creates an actor context from its parts.
    #[must_use]
    pub const fn new(id: i64, kind: ParticipantKind, agent: bool) -> Self {
        Self { id, kind, agent }
    }

    /// Creates a non-agent user actor.
    #[must_use]
    pub const fn user(id: i64) -> Self {
        Self::new(id, ParticipantKind::User, false)
    }

    /// Creates an agent actor whose row lives in the agent table.
    #[must_use]
    pub const fn agent(id: i64) -> Self {
        Self::new(id, ParticipantKind::Agent, true)
    }

    /// Returns the actor's numeric identifier.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the kind of table the actor's row lives in.
    #[must_use]
    pub const fn kind(&self) -> ParticipantKind {
        self.kind
    }

    /// Returns `true` when the actor has the agent capability.
    #[must_use]
    pub const fn is_agent(&self) -> bool {
        self.agent
    }

    /// Returns the actor as a participant reference.
    #[must_use]
    pub const fn participant(&self) -> ParticipantRef {
        ParticipantRef::new(self.kind, self.id)
    }
}
