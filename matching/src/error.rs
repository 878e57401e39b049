//! Setup-time faults.
//!
//! Nothing that happens during play is an error: a drag that lands nowhere
//! useful is just a cancelled drag. The only failures the crate reports are
//! content problems caught while a game is being initialised, where carrying
//! on would leave every drag a guaranteed cancel or every commit
//! unvalidatable.

use crate::input::Side;

/// Error returned when slide content cannot start a game.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The content declares no terms for one side.
    #[error("no {0} terms declared")]
    NoTerms(Side),
    /// The answer key has no pairs, so nothing could ever be checked.
    #[error("answer key is empty")]
    EmptyAnswerKey,
    /// An answer pair names a value that no endpoint on that side carries.
    #[error("answer pair refers to unknown {side} term `{value}`")]
    UnknownAnswerTerm {
        /// Side the missing value was expected on.
        side: Side,
        /// The value that could not be found.
        value: String,
    },
    /// A declared coordinate could not be parsed.
    #[error("invalid coordinate `{0}` (expected e.g. \"35%\", \"120px\" or a number)")]
    InvalidCoordinate(String),
    /// A hit radius that is zero, negative or not finite.
    #[error("hit radius must be a positive number of pixels, got {0}")]
    InvalidHitRadius(f64),
    /// The content JSON could not be parsed.
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),
}
