//! Geometry: surface points, declared coordinates, and connection lines.
//!
//! Content declares endpoint positions in resolution-independent terms
//! (mostly percentages of the slide). [`Surface::resolve`] turns those into
//! pixel [`Point`]s once per layout, so hit-testing and line drawing never
//! depend on live layout measurement.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SURFACE_HEIGHT_PX, DEFAULT_SURFACE_WIDTH_PX};
use crate::error::SetupError;

/// A point on the render surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// A declared coordinate along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordRepr", into = "String")]
pub enum Coord {
    /// Fraction of the surface extent, in percent (`"35%"`).
    Percent(f64),
    /// Absolute offset in pixels (`"120px"` or a bare number).
    Px(f64),
}

impl Coord {
    /// Resolve against a surface extent along the same axis.
    #[must_use]
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Percent(p) => extent * p / 100.0,
            Self::Px(px) => px,
        }
    }
}

impl FromStr for Coord {
    type Err = SetupError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let invalid = || SetupError::InvalidCoordinate(raw.to_string());
        let (number, ctor): (&str, fn(f64) -> Coord) = if let Some(n) = trimmed.strip_suffix('%') {
            (n, Coord::Percent)
        } else if let Some(n) = trimmed.strip_suffix("px") {
            (n, Coord::Px)
        } else {
            (trimmed, Coord::Px)
        };
        let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(ctor(value))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Px(px) => write!(f, "{px}px"),
        }
    }
}

impl From<Coord> for String {
    fn from(coord: Coord) -> Self {
        coord.to_string()
    }
}

/// Wire shape of a coordinate: a CSS-like string or a bare number.
#[derive(Deserialize)]
#[serde(untagged)]
enum CoordRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<CoordRepr> for Coord {
    type Error = SetupError;

    fn try_from(repr: CoordRepr) -> Result<Self, Self::Error> {
        match repr {
            CoordRepr::Number(n) if n.is_finite() => Ok(Self::Px(n)),
            CoordRepr::Number(n) => Err(SetupError::InvalidCoordinate(n.to_string())),
            CoordRepr::Text(s) => s.parse(),
        }
    }
}

/// Size of the render surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self { width: DEFAULT_SURFACE_WIDTH_PX, height: DEFAULT_SURFACE_HEIGHT_PX }
    }
}

impl Surface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map a declared position onto this surface.
    #[must_use]
    pub fn resolve(&self, x: Coord, y: Coord) -> Point {
        Point { x: x.resolve(self.width), y: y.resolve(self.height) }
    }
}

/// Visual state of a line, mirrored onto the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineState {
    /// Following the pointer during a drag.
    Drawing,
    /// Committed between two endpoints.
    Committed,
    /// Checked and found in the answer key.
    Correct,
    /// Checked and not found in the answer key.
    Incorrect,
}

/// A renderable line segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub start: Point,
    pub end: Point,
    pub state: LineState,
}

impl LineGeometry {
    /// A zero-length drawing line anchored at `start`.
    #[must_use]
    pub fn drawing_from(start: Point) -> Self {
        Self { start, end: start, state: LineState::Drawing }
    }
}
