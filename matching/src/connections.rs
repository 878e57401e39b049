//! Connection store: committed pairings, answer checking, and reset.
//!
//! Connections are appended in commit order and never re-targeted. The only
//! mutation after commit is the verdict written by [`ConnectionStore::validate_all`],
//! which is recomputed from scratch on every call.

#[cfg(test)]
#[path = "connections_test.rs"]
mod connections_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::AnswerKey;
use crate::geometry::{LineGeometry, LineState};
use crate::input::EndpointStatus;
use crate::registry::{EndpointId, PointRegistry};

/// Outcome of checking one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    fn endpoint_status(self) -> EndpointStatus {
        match self {
            Self::Correct => EndpointStatus::Correct,
            Self::Incorrect => EndpointStatus::Incorrect,
        }
    }

    fn line_state(self) -> LineState {
        match self {
            Self::Correct => LineState::Correct,
            Self::Incorrect => LineState::Incorrect,
        }
    }
}

/// A committed pairing between one left and one right endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Left endpoint, whichever way the line was dragged.
    pub left: EndpointId,
    /// Right endpoint, whichever way the line was dragged.
    pub right: EndpointId,
    pub left_value: String,
    pub right_value: String,
    /// Line from the left centre to the right centre, whichever side the drag
    /// started from.
    pub line: LineGeometry,
    /// Set by the last answer check; `None` before the first check.
    pub verdict: Option<Verdict>,
}

impl Connection {
    /// Whether `id` is one of this connection's endpoints.
    #[must_use]
    pub fn involves(&self, id: EndpointId) -> bool {
        self.left == id || self.right == id
    }
}

/// Result of an answer check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Connections found in the answer key.
    pub correct_count: usize,
    /// Pairs in the answer key.
    pub total: usize,
    /// Connections that were checked.
    pub committed: usize,
}

impl MatchResult {
    /// Every pair in the key was found.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct_count == self.total
    }
}

/// Owns the committed connections of one game instance.
#[derive(Debug, Clone, Default)]
pub struct ConnectionStore {
    connections: Vec<Connection>,
}

impl ConnectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed connection.
    pub fn add(&mut self, connection: Connection) {
        debug!(
            left = %connection.left_value,
            right = %connection.right_value,
            count = self.connections.len() + 1,
            "connection committed"
        );
        self.connections.push(connection);
    }

    /// Tag every connection against `key` and refine its endpoints'
    /// statuses. Incorrect connections stay in place.
    pub fn validate_all(&mut self, key: &AnswerKey, registry: &mut PointRegistry) -> MatchResult {
        let mut correct_count = 0;
        for connection in &mut self.connections {
            let verdict = if key.contains(&connection.left_value, &connection.right_value) {
                correct_count += 1;
                Verdict::Correct
            } else {
                Verdict::Incorrect
            };
            connection.verdict = Some(verdict);
            connection.line.state = verdict.line_state();
            registry.set_status(connection.left, verdict.endpoint_status());
            registry.set_status(connection.right, verdict.endpoint_status());
        }
        MatchResult { correct_count, total: key.len(), committed: self.connections.len() }
    }

    /// Remove every connection and free the endpoints they referenced.
    ///
    /// Returns the removed connections in commit order.
    pub fn reset(&mut self, registry: &mut PointRegistry) -> Vec<Connection> {
        let removed: Vec<Connection> = self.connections.drain(..).collect();
        for connection in &removed {
            registry.set_status(connection.left, EndpointStatus::Free);
            registry.set_status(connection.right, EndpointStatus::Free);
        }
        removed
    }

    /// Replace line geometry after a surface resize. Entries are
    /// `(index, line)`; unknown indices are skipped.
    pub fn relayout(&mut self, lines: &[(usize, LineGeometry)]) {
        for (index, line) in lines {
            if let Some(connection) = self.connections.get_mut(*index) {
                connection.line = *line;
            }
        }
    }

    /// Whether any connection references `id`.
    #[must_use]
    pub fn involves(&self, id: EndpointId) -> bool {
        self.connections.iter().any(|c| c.involves(id))
    }

    /// Connections in commit order.
    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    /// Connections as a slice, in commit order.
    #[must_use]
    pub fn as_slice(&self) -> &[Connection] {
        &self.connections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
