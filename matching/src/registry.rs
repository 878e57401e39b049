//! Point registry: every endpoint of the current game instance.
//!
//! Endpoints are created once per [`PointRegistry::initialize`] and keep
//! their `(side, index)` identity until the next initialize. Only statuses
//! and resolved centres change in between.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::DEFAULT_HIT_RADIUS_PX;
use crate::content::TermSpec;
use crate::geometry::{Coord, Point, Surface};
use crate::hit;
use crate::input::{EndpointStatus, Side};

/// Stable identity of an endpoint within one registry instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EndpointId {
    pub side: Side,
    pub index: usize,
}

impl EndpointId {
    #[must_use]
    pub fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }

    #[must_use]
    pub fn left(index: usize) -> Self {
        Self::new(Side::Left, index)
    }

    #[must_use]
    pub fn right(index: usize) -> Self {
        Self::new(Side::Right, index)
    }
}

/// A connectable term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub id: EndpointId,
    /// Label used for answer matching.
    pub value: String,
    /// Declared horizontal position.
    pub x: Coord,
    /// Declared vertical position.
    pub y: Coord,
    /// Declared position resolved onto the current surface.
    pub center: Point,
    pub status: EndpointStatus,
}

/// Owns all endpoints of one game instance.
#[derive(Debug, Clone)]
pub struct PointRegistry {
    left: Vec<Endpoint>,
    right: Vec<Endpoint>,
    hit_radius: f64,
}

impl Default for PointRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_RADIUS_PX)
    }
}

impl PointRegistry {
    /// Create an empty registry with the given hit radius (surface pixels).
    #[must_use]
    pub fn new(hit_radius: f64) -> Self {
        Self { left: Vec::new(), right: Vec::new(), hit_radius }
    }

    /// Discard all endpoints and create one `Free` endpoint per term.
    ///
    /// Indices follow the order of each input slice.
    pub fn initialize(&mut self, left: &[TermSpec], right: &[TermSpec], surface: Surface) {
        self.left = build_side(Side::Left, left, surface);
        self.right = build_side(Side::Right, right, surface);
        debug!(left = self.left.len(), right = self.right.len(), "point registry initialized");
    }

    /// Re-resolve every centre against a new surface. Statuses are kept.
    pub fn relayout(&mut self, surface: Surface) {
        for endpoint in self.left.iter_mut().chain(self.right.iter_mut()) {
            endpoint.center = surface.resolve(endpoint.x, endpoint.y);
        }
    }

    /// Endpoint under `point`, if any is within the hit radius.
    #[must_use]
    pub fn find_at(&self, point: Point) -> Option<EndpointId> {
        hit::hit_test(point, self.endpoints(), self.hit_radius)
    }

    /// Look up an endpoint.
    #[must_use]
    pub fn get(&self, id: EndpointId) -> Option<&Endpoint> {
        self.side(id.side).get(id.index)
    }

    /// Current status of an endpoint.
    #[must_use]
    pub fn status(&self, id: EndpointId) -> Option<EndpointStatus> {
        self.get(id).map(|e| e.status)
    }

    /// Set an endpoint's status. Returns false (and logs) for ids this
    /// registry does not hold.
    pub fn set_status(&mut self, id: EndpointId, status: EndpointStatus) -> bool {
        let endpoints = match id.side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        let Some(endpoint) = endpoints.get_mut(id.index) else {
            warn!(side = %id.side, index = id.index, ?status, "set_status on unknown endpoint ignored");
            return false;
        };
        endpoint.status = status;
        true
    }

    /// Revert every endpoint to `Free`.
    pub fn free_all(&mut self) {
        for endpoint in self.left.iter_mut().chain(self.right.iter_mut()) {
            endpoint.status = EndpointStatus::Free;
        }
    }

    /// All endpoints, left column first, each column in index order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.left.iter().chain(self.right.iter())
    }

    /// Endpoints of one column.
    #[must_use]
    pub fn side(&self, side: Side) -> &[Endpoint] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Pointer reach around each centre.
    #[must_use]
    pub fn hit_radius(&self) -> f64 {
        self.hit_radius
    }

    /// Total number of endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    /// Returns `true` before the first initialize.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

fn build_side(side: Side, terms: &[TermSpec], surface: Surface) -> Vec<Endpoint> {
    terms
        .iter()
        .enumerate()
        .map(|(index, term)| Endpoint {
            id: EndpointId::new(side, index),
            value: term.value.clone(),
            x: term.x,
            y: term.y,
            center: surface.resolve(term.x, term.y),
            status: EndpointStatus::Free,
        })
        .collect()
}
