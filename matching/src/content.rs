//! Slide content: the terms to connect and the answer key.
//!
//! This is the shape the course's slide configuration uses for a matching
//! slide (`matchingData`), parsed with serde. [`MatchingConfig::validate`]
//! is where malformed content is rejected, before any endpoint exists.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::geometry::Coord;
use crate::input::Side;

/// A connectable term as declared by the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSpec {
    /// Label used for answer matching (a word or its romanisation).
    pub value: String,
    /// Horizontal position of the endpoint centre.
    pub x: Coord,
    /// Vertical position of the endpoint centre.
    pub y: Coord,
}

/// One correct pairing in the answer key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerPair {
    pub left: String,
    pub right: String,
}

/// Matching data for one slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingConfig {
    /// Left column, in display order.
    #[serde(default)]
    pub left_points: Vec<TermSpec>,
    /// Right column, in display order.
    #[serde(default)]
    pub right_points: Vec<TermSpec>,
    /// Ground-truth pairs.
    #[serde(default)]
    pub pairs: Vec<AnswerPair>,
}

impl MatchingConfig {
    /// Check the content can run a game and build its answer key.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoTerms`] when a column is empty,
    /// [`SetupError::EmptyAnswerKey`] when there are no pairs, and
    /// [`SetupError::UnknownAnswerTerm`] when a pair names a value that no
    /// term on that side carries.
    pub fn validate(&self) -> Result<AnswerKey, SetupError> {
        if self.left_points.is_empty() {
            return Err(SetupError::NoTerms(Side::Left));
        }
        if self.right_points.is_empty() {
            return Err(SetupError::NoTerms(Side::Right));
        }
        let key = AnswerKey::from_pairs(self.pairs.iter().cloned())?;

        let left: HashSet<&str> = self.left_points.iter().map(|t| t.value.as_str()).collect();
        let right: HashSet<&str> = self.right_points.iter().map(|t| t.value.as_str()).collect();
        for pair in &self.pairs {
            if !left.contains(pair.left.as_str()) {
                return Err(SetupError::UnknownAnswerTerm { side: Side::Left, value: pair.left.clone() });
            }
            if !right.contains(pair.right.as_str()) {
                return Err(SetupError::UnknownAnswerTerm { side: Side::Right, value: pair.right.clone() });
            }
        }
        Ok(key)
    }
}

/// The part of a slide's configuration the game cares about.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideContent {
    /// Present only on matching slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_data: Option<MatchingConfig>,
}

/// Immutable set of correct `(left, right)` value pairs, keyed by left value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    by_left: HashMap<String, HashSet<String>>,
    len: usize,
}

impl AnswerKey {
    /// Build a key from pairs. Duplicate pairs collapse into one.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::EmptyAnswerKey`] when `pairs` is empty.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = AnswerPair>,
    {
        let mut by_left: HashMap<String, HashSet<String>> = HashMap::new();
        let mut len = 0;
        for AnswerPair { left, right } in pairs {
            if by_left.entry(left).or_default().insert(right) {
                len += 1;
            }
        }
        if len == 0 {
            return Err(SetupError::EmptyAnswerKey);
        }
        Ok(Self { by_left, len })
    }

    /// Whether `(left, right)` is a correct pairing.
    #[must_use]
    pub fn contains(&self, left: &str, right: &str) -> bool {
        self.by_left.get(left).is_some_and(|rights| rights.contains(right))
    }

    /// Number of distinct pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed key; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Parse a slide's configuration JSON.
///
/// # Errors
///
/// Returns [`SetupError::Json`] (or a coordinate error surfaced through it)
/// when the JSON does not match the slide shape.
pub fn parse_slide(json: &str) -> Result<SlideContent, SetupError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse bare matching data JSON.
///
/// # Errors
///
/// Returns [`SetupError::Json`] when the JSON does not match.
pub fn parse_config(json: &str) -> Result<MatchingConfig, SetupError> {
    Ok(serde_json::from_str(json)?)
}
