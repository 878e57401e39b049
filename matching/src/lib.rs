//! Drag-to-connect matching game engine for the Kinmen course slides.
//!
//! The crate owns the whole interaction: resolving the declared term
//! positions onto the render surface, hit-testing pointer input, running the
//! single-pointer drag session, committing connections, and checking them
//! against the answer key. The host (browser adapter, CLI, tests) feeds raw
//! pointer events in and applies the returned [`game::Action`]s to whatever
//! it renders with.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`game`] | Per-instance [`game::MatchingGame`] and the drag session controller |
//! | [`registry`] | Point registry: endpoints, statuses, resolved centres |
//! | [`connections`] | Committed connections, validation and reset |
//! | [`content`] | Slide content format and the answer key |
//! | [`geometry`] | Points, declared coordinates, surface resolution, line geometry |
//! | [`input`] | Pointer events and the drag state machine types |
//! | [`hit`] | Radius-based hit-testing |
//! | [`feedback`] | Result notices and the reporter seam |
//! | [`error`] | Setup-time errors |
//! | [`consts`] | Shared numeric constants |

pub mod connections;
pub mod consts;
pub mod content;
pub mod error;
pub mod feedback;
pub mod game;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod registry;

pub use error::SetupError;
pub use game::{Action, GameSettings, MatchingGame};
