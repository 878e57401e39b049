//! Shared numeric constants for the matching crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Default pointer reach around an endpoint centre, in surface pixels.
pub const DEFAULT_HIT_RADIUS_PX: f64 = 24.0;

// ── Surface ─────────────────────────────────────────────────────

/// Surface width assumed before the host reports a real size.
pub const DEFAULT_SURFACE_WIDTH_PX: f64 = 1280.0;

/// Surface height assumed before the host reports a real size.
pub const DEFAULT_SURFACE_HEIGHT_PX: f64 = 720.0;

// ── Feedback ────────────────────────────────────────────────────

/// How long a result notice stays on screen before it dismisses itself.
pub const RESULT_DISPLAY_MS: u64 = 3000;

/// Fade-out time after the display duration elapses.
pub const RESULT_FADE_MS: u64 = 300;
