//! Search result types for the chat-list search box.

use super::ParticipantRef;

/// One search hit: a participant and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    participant: ParticipantRef,
    label: String,
}

impl SearchHit {
    /// Creates a search hit.
    #[must_use]
    pub fn new(participant: ParticipantRef, label: impl Into<String>) -> Self {
        Self {
            participant,
            label: label.into(),
        }
    }

    /// Returns the matched participant.
    #[must_use]
    pub const fn participant(&self) -> ParticipantRef {
        self.participant
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the composite key for this hit.
    #[must_use]
    pub fn key(&self) -> String {
        self.participant.composite_key()
    }
}

/// An ordered mapping from composite key to display label.
///
/// Order follows the underlying query result order; when two searches are
/// merged the first operand's hits come first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResults(Vec<SearchHit>);

impl SearchResults {
    /// Creates an empty result set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Creates a result set from hits, preserving their order.
    #[must_use]
    pub fn from_hits(hits: Vec<SearchHit>) -> Self {
        Self(hits)
    }

    /// Appends another result set after this one, preserving both orders.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Returns the hits in result order.
    #[must_use]
    pub fn hits(&self) -> &[SearchHit] {
        &self.0
    }

    /// Returns `(composite key, label)` pairs in result order, the shape the
    /// selection UI consumes.
    #[must_use]
    pub fn options(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|hit| (hit.key(), hit.label().to_owned()))
            .collect()
    }

    /// Returns the number of hits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no hits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for SearchResults {
    type Item = SearchHit;
    type IntoIter = std::vec::IntoIter<SearchHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
