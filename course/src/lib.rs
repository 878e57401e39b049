//! Learner progress, session statistics, and class analytics for the
//! Kinmen course.
//!
//! Everything here is plain data plus pure aggregation. Storage is an
//! in-memory key-value map keyed by username; network persistence sits
//! behind the [`sync::ProgressSink`] seam and never blocks or fails the
//! caller.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`progress`] | Progress records, partial updates, and the record store |
//! | [`stats`] | Per-session statistics context and daily streaks |
//! | [`achievements`] | The nine achievements and unlock bookkeeping |
//! | [`analytics`] | Class histograms, roster overviews, and per-student detail |
//! | [`sync`] | Fire-and-forget progress persistence seam |
//! | [`config`] | Course constants loaded from the environment |
//! | [`timestamp`] | Times in every shape stored records use |

pub mod achievements;
pub mod analytics;
pub mod config;
pub mod progress;
pub mod stats;
pub mod sync;
pub mod timestamp;
