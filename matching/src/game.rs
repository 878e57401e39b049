//! The matching game: one instance per matching slide.
//!
//! `MatchingGame` ties the point registry, the connection store and the drag
//! session controller together. Input handlers run to completion and return
//! the [`Action`]s the render surface has to apply; nothing in here touches
//! a rendering environment, so the whole interaction is testable headless.
//!
//! Subscribers that are not renderers (statistics, progress sync) register
//! hooks instead of listening for ambient events.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use std::mem;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::connections::{Connection, ConnectionStore, MatchResult, Verdict};
use crate::consts::DEFAULT_HIT_RADIUS_PX;
use crate::content::{AnswerKey, MatchingConfig, SlideContent};
use crate::error::SetupError;
use crate::feedback::{FeedbackReporter, LogReporter, ResultNotice};
use crate::geometry::{LineGeometry, LineState, Point, Surface};
use crate::input::{DragSession, DragState, EndpointStatus, PointerEvent, PointerId, PointerPhase, Side};
use crate::registry::{EndpointId, PointRegistry};

/// Render-surface updates returned from handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A drag began: draw a line out of `origin`.
    LineStarted { origin: EndpointId, line: LineGeometry },
    /// The live drag line moved.
    LineMoved { line: LineGeometry },
    /// The live drag line was discarded without a commit.
    LineCancelled { origin: EndpointId },
    /// An endpoint changed status.
    EndpointChanged { id: EndpointId, status: EndpointStatus },
    /// A connection was committed; its line replaces the live drag line.
    ConnectionCommitted(Connection),
    /// A committed line was re-resolved after a surface resize.
    ConnectionMoved { index: usize, line: LineGeometry },
    /// A connection received a verdict from an answer check.
    ConnectionTagged { index: usize, left: EndpointId, right: EndpointId, verdict: Verdict },
    /// An answer check finished.
    Validated { result: MatchResult, notice: ResultNotice },
    /// Every line was removed and every endpoint is free again.
    Cleared,
}

/// Tunables for a game instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSettings {
    /// Pointer reach around each endpoint centre, in surface pixels.
    pub hit_radius: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self { hit_radius: DEFAULT_HIT_RADIUS_PX }
    }
}

impl GameSettings {
    /// Settings with the given hit radius.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::InvalidHitRadius`] unless the radius is a
    /// positive, finite number of pixels.
    pub fn with_hit_radius(hit_radius: f64) -> Result<Self, SetupError> {
        if hit_radius.is_finite() && hit_radius > 0.0 {
            Ok(Self { hit_radius })
        } else {
            Err(SetupError::InvalidHitRadius(hit_radius))
        }
    }

    /// These settings with out-of-range values replaced by their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        match Self::with_hit_radius(self.hit_radius) {
            Ok(settings) => settings,
            Err(error) => {
                warn!(%error, "using default hit radius");
                Self::default()
            }
        }
    }
}

type CommitHook = Box<dyn FnMut(&Connection)>;
type ResetHook = Box<dyn FnMut()>;
type ValidatedHook = Box<dyn FnMut(&MatchResult)>;

#[derive(Default)]
struct Hooks {
    committed: Vec<CommitHook>,
    reset: Vec<ResetHook>,
    validated: Vec<ValidatedHook>,
}

/// One drag-to-connect game.
pub struct MatchingGame {
    game_id: Option<Uuid>,
    settings: GameSettings,
    surface: Surface,
    registry: PointRegistry,
    connections: ConnectionStore,
    answer_key: Option<AnswerKey>,
    drag: DragState,
    last_result: Option<MatchResult>,
    reporter: Box<dyn FeedbackReporter>,
    hooks: Hooks,
}

impl Default for MatchingGame {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl MatchingGame {
    /// Create an inactive game. Nothing reacts to input until
    /// [`initialize`](Self::initialize) succeeds. An invalid hit radius falls
    /// back to the default.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            game_id: None,
            settings,
            surface: Surface::default(),
            registry: PointRegistry::new(settings.hit_radius),
            connections: ConnectionStore::new(),
            answer_key: None,
            drag: DragState::Idle,
            last_result: None,
            reporter: Box::new(LogReporter),
            hooks: Hooks::default(),
        }
    }

    /// Replace the result reporter.
    #[must_use]
    pub fn with_reporter<R>(mut self, reporter: R) -> Self
    where
        R: FeedbackReporter + 'static,
    {
        self.reporter = Box::new(reporter);
        self
    }

    // --- Hooks ---

    /// Call `hook` with every newly committed connection.
    pub fn on_connection_committed<F>(&mut self, hook: F)
    where
        F: FnMut(&Connection) + 'static,
    {
        self.hooks.committed.push(Box::new(hook));
    }

    /// Call `hook` whenever connections are reset (explicitly, on content
    /// change, or on teardown).
    pub fn on_reset<F>(&mut self, hook: F)
    where
        F: FnMut() + 'static,
    {
        self.hooks.reset.push(Box::new(hook));
    }

    /// Call `hook` with the result of every answer check.
    pub fn on_validated<F>(&mut self, hook: F)
    where
        F: FnMut(&MatchResult) + 'static,
    {
        self.hooks.validated.push(Box::new(hook));
    }

    // --- Lifecycle ---

    /// Start a game from matching content, discarding any previous one.
    ///
    /// The content is validated before anything changes, so a failed call
    /// leaves the current game untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when the content has an empty column, an
    /// empty answer key, or a pair naming an unknown term.
    pub fn initialize(&mut self, config: &MatchingConfig) -> Result<Vec<Action>, SetupError> {
        let key = config.validate()?;
        let actions = self.reset();
        self.registry = PointRegistry::new(self.settings.hit_radius);
        self.registry
            .initialize(&config.left_points, &config.right_points, self.surface);
        self.answer_key = Some(key);
        self.last_result = None;
        let game_id = Uuid::new_v4();
        self.game_id = Some(game_id);
        info!(
            %game_id,
            left = config.left_points.len(),
            right = config.right_points.len(),
            pairs = config.pairs.len(),
            "matching game initialized"
        );
        Ok(actions)
    }

    /// Content-changed signal: tear the current game down, then start the
    /// slide's game if it has one.
    ///
    /// # Errors
    ///
    /// Propagates [`SetupError`] from [`initialize`](Self::initialize); the
    /// game is left inactive in that case.
    pub fn load_slide(&mut self, slide: &SlideContent) -> Result<Vec<Action>, SetupError> {
        let mut actions = self.destroy();
        if let Some(config) = &slide.matching_data {
            actions.extend(self.initialize(config)?);
        }
        Ok(actions)
    }

    /// Reset and deactivate. Input is ignored until the next initialize.
    pub fn destroy(&mut self) -> Vec<Action> {
        let actions = self.reset();
        if let Some(game_id) = self.game_id.take() {
            debug!(%game_id, "matching game destroyed");
        }
        self.answer_key = None;
        self.last_result = None;
        self.registry = PointRegistry::new(self.settings.hit_radius);
        actions
    }

    /// Resize the render surface and re-resolve every centre and line.
    pub fn set_surface(&mut self, surface: Surface) -> Vec<Action> {
        self.surface = surface;
        self.registry.relayout(surface);

        let mut actions = Vec::new();
        if let DragState::Dragging(session) = &mut self.drag {
            if let Some(origin) = self.registry.get(session.origin) {
                session.line.start = origin.center;
                actions.push(Action::LineMoved { line: session.line });
            }
        }

        let moved: Vec<(usize, LineGeometry)> = self
            .connections
            .iter()
            .enumerate()
            .filter_map(|(index, c)| {
                let left = self.registry.get(c.left)?;
                let right = self.registry.get(c.right)?;
                Some((index, LineGeometry { start: left.center, end: right.center, state: c.line.state }))
            })
            .collect();
        self.connections.relayout(&moved);
        actions.extend(
            moved
                .into_iter()
                .map(|(index, line)| Action::ConnectionMoved { index, line }),
        );
        actions
    }

    // --- Input events ---

    /// Dispatch a raw pointer event to the matching handler.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<Action> {
        match event.phase {
            PointerPhase::Down => self.on_pointer_down(event.pointer_id, event.position),
            PointerPhase::Move => self.on_pointer_move(event.pointer_id, event.position),
            PointerPhase::Up => self.on_pointer_up(event.pointer_id, event.position),
            PointerPhase::Cancel => self.on_pointer_cancel(event.pointer_id),
        }
    }

    /// Idle → Dragging when `pt` lands on a free endpoint. Ignored while
    /// another drag is open, on inactive games, and on non-free endpoints.
    pub fn on_pointer_down(&mut self, pointer_id: PointerId, pt: Point) -> Vec<Action> {
        if !self.is_active() {
            return Vec::new();
        }
        if let DragState::Dragging(session) = &self.drag {
            debug!(pointer_id, owner = session.pointer_id, "pointer-down ignored while dragging");
            return Vec::new();
        }
        let Some(origin) = self.registry.find_at(pt) else {
            return Vec::new();
        };
        let Some(endpoint) = self.registry.get(origin) else {
            return Vec::new();
        };
        if !endpoint.status.is_free() {
            debug!(side = %origin.side, index = origin.index, status = ?endpoint.status, "pointer-down on busy endpoint ignored");
            return Vec::new();
        }

        let line = LineGeometry::drawing_from(endpoint.center);
        self.registry.set_status(origin, EndpointStatus::Active);
        self.drag = DragState::Dragging(DragSession { pointer_id, origin, line });
        debug!(pointer_id, side = %origin.side, index = origin.index, "drag started");

        vec![
            Action::EndpointChanged { id: origin, status: EndpointStatus::Active },
            Action::LineStarted { origin, line },
        ]
    }

    /// Track the pointer with the live line. No validation happens here.
    pub fn on_pointer_move(&mut self, pointer_id: PointerId, pt: Point) -> Vec<Action> {
        match &mut self.drag {
            DragState::Dragging(session) if session.pointer_id == pointer_id => {
                session.line.end = pt;
                vec![Action::LineMoved { line: session.line }]
            }
            _ => Vec::new(),
        }
    }

    /// Dragging → Idle: commit when `pt` hits a free endpoint on the other
    /// side, cancel otherwise.
    pub fn on_pointer_up(&mut self, pointer_id: PointerId, pt: Point) -> Vec<Action> {
        let Some(session) = self.take_session(pointer_id) else {
            return Vec::new();
        };
        let target = self.registry.find_at(pt).filter(|target| {
            target.side == session.origin.side.opposite()
                && self
                    .registry
                    .status(*target)
                    .is_some_and(EndpointStatus::is_free)
        });
        match target {
            Some(target) => self.commit(session, target),
            None => self.cancel(session),
        }
    }

    /// The platform aborted the gesture: take the cancel path.
    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId) -> Vec<Action> {
        match self.take_session(pointer_id) {
            Some(session) => self.cancel(session),
            None => Vec::new(),
        }
    }

    // --- Checking and reset ---

    /// Check every connection against the answer key and report the result.
    ///
    /// Repeated checks without an intervening commit or reset give the same
    /// result and tags. Returns nothing on an inactive game.
    pub fn check_answers(&mut self) -> Vec<Action> {
        let Some(key) = &self.answer_key else {
            return Vec::new();
        };
        let result = self.connections.validate_all(key, &mut self.registry);
        let notice = ResultNotice::from_result(&result);
        self.reporter.report(&notice);
        self.last_result = Some(result);
        for hook in &mut self.hooks.validated {
            hook(&result);
        }

        let mut actions: Vec<Action> = self
            .connections
            .iter()
            .enumerate()
            .filter_map(|(index, c)| {
                c.verdict
                    .map(|verdict| Action::ConnectionTagged { index, left: c.left, right: c.right, verdict })
            })
            .collect();
        actions.push(Action::Validated { result, notice });
        actions
    }

    /// Remove every connection, drop any open drag, and free every endpoint.
    pub fn reset(&mut self) -> Vec<Action> {
        if let DragState::Dragging(session) = mem::take(&mut self.drag) {
            debug!(side = %session.origin.side, index = session.origin.index, "drag discarded by reset");
        }
        let removed = self.connections.reset(&mut self.registry);
        self.registry.free_all();
        self.last_result = None;
        debug!(removed = removed.len(), "connections reset");
        for hook in &mut self.hooks.reset {
            hook();
        }
        vec![Action::Cleared]
    }

    // --- Queries ---

    /// Id of the running game instance, if one is active.
    #[must_use]
    pub fn game_id(&self) -> Option<Uuid> {
        self.game_id
    }

    /// Whether a game is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.answer_key.is_some()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    #[must_use]
    pub fn registry(&self) -> &PointRegistry {
        &self.registry
    }

    #[must_use]
    pub fn connections(&self) -> &ConnectionStore {
        &self.connections
    }

    #[must_use]
    pub fn answer_key(&self) -> Option<&AnswerKey> {
        self.answer_key.as_ref()
    }

    /// Result of the last check, cleared by reset and by new content.
    #[must_use]
    pub fn last_result(&self) -> Option<MatchResult> {
        self.last_result
    }

    #[must_use]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    #[must_use]
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    // --- Transitions ---

    fn take_session(&mut self, pointer_id: PointerId) -> Option<DragSession> {
        let owned = matches!(&self.drag, DragState::Dragging(s) if s.pointer_id == pointer_id);
        if !owned {
            return None;
        }
        match mem::take(&mut self.drag) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    fn commit(&mut self, session: DragSession, target: EndpointId) -> Vec<Action> {
        let (left, right) = match session.origin.side {
            Side::Left => (session.origin, target),
            Side::Right => (target, session.origin),
        };
        let (Some(left_end), Some(right_end)) = (self.registry.get(left), self.registry.get(right)) else {
            return self.cancel(session);
        };

        let connection = Connection {
            left,
            right,
            left_value: left_end.value.clone(),
            right_value: right_end.value.clone(),
            line: LineGeometry { start: left_end.center, end: right_end.center, state: LineState::Committed },
            verdict: None,
        };
        self.registry.set_status(left, EndpointStatus::Connected);
        self.registry.set_status(right, EndpointStatus::Connected);
        self.connections.add(connection.clone());
        for hook in &mut self.hooks.committed {
            hook(&connection);
        }

        vec![
            Action::EndpointChanged { id: session.origin, status: EndpointStatus::Connected },
            Action::EndpointChanged { id: target, status: EndpointStatus::Connected },
            Action::ConnectionCommitted(connection),
        ]
    }

    fn cancel(&mut self, session: DragSession) -> Vec<Action> {
        self.registry.set_status(session.origin, EndpointStatus::Free);
        debug!(side = %session.origin.side, index = session.origin.index, "drag cancelled");
        vec![
            Action::LineCancelled { origin: session.origin },
            Action::EndpointChanged { id: session.origin, status: EndpointStatus::Free },
        ]
    }
}
