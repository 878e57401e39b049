//! Input model: pointer events, endpoint sides and statuses, and the drag
//! state machine.
//!
//! `PointerEvent` is what the host hands in, already translated into
//! surface coordinates. The engine is agnostic to whether it came from a
//! mouse or a finger; `pointer_id` only exists so a second finger can be
//! told apart from the one that owns the drag. `DragState` is the gesture
//! tracked between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{LineGeometry, Point};
use crate::registry::EndpointId;

/// Which column a term sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left column (characters).
    Left,
    /// Right column (romanised pronunciation).
    Right,
}

impl Side {
    /// The other column.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Interaction status of a single endpoint.
///
/// `Correct` and `Incorrect` refine `Connected`; they only appear after an
/// answer check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    /// Available as a drag origin or target.
    #[default]
    Free,
    /// Origin of the drag in progress.
    Active,
    /// Part of a committed connection, not yet checked.
    Connected,
    /// Part of a connection that matched the answer key.
    Correct,
    /// Part of a connection that did not match the answer key.
    Incorrect,
}

impl EndpointStatus {
    /// Whether the endpoint may start or receive a new connection.
    #[must_use]
    pub fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }

    /// Whether the endpoint belongs to a committed connection.
    #[must_use]
    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected | Self::Correct | Self::Incorrect)
    }
}

/// Identifies one pointer (mouse, or one finger of a touch).
pub type PointerId = u32;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed or finger placed.
    Down,
    /// Pointer moved.
    Move,
    /// Button released or finger lifted.
    Up,
    /// The platform aborted the gesture (e.g. touch-cancel).
    Cancel,
}

/// A raw pointer event in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Which pointer produced the event.
    #[serde(default, rename = "pointer")]
    pub pointer_id: PointerId,
    /// Down, move, up or cancel.
    pub phase: PointerPhase,
    /// Position on the render surface, in pixels.
    #[serde(flatten)]
    pub position: Point,
}

impl PointerEvent {
    /// Build an event for the primary pointer.
    #[must_use]
    pub fn primary(phase: PointerPhase, position: Point) -> Self {
        Self { pointer_id: 0, phase, position }
    }
}

/// One in-progress connection attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Pointer that owns the drag; events from any other pointer are ignored.
    pub pointer_id: PointerId,
    /// Endpoint the drag started on.
    pub origin: EndpointId,
    /// Live line from the origin centre to the pointer.
    pub line: LineGeometry,
}

/// State of the drag session controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A line is being dragged out of an endpoint.
    Dragging(DragSession),
}

impl DragState {
    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }
}
