//! Session state machine
//!
//! `FlightController` owns the session and is the single consumer of
//! `GameEvent`s. Phases cycle NotStarted -> Running -> Ended -> NotStarted;
//! Ended settles back to NotStarted inside the same `handle` call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{build_pair, random_layout};
use super::physics::Physics;
use super::scoring::award_passed_pairs;
use super::scroll::scroll_and_cull;
use super::state::{Aabb, SessionPhase, SessionState, Viewport};
use crate::highscores::HighScoreStore;
use crate::persistence::KeyValueSlot;
use crate::rotation_for_velocity;
use crate::tuning::FlightConfig;

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Tap/click/space
    PointerDown,
    /// Host-owned spawn timer fired
    TimerFire,
    /// Host-detected contact between the bird and a pipe
    Collision,
    /// Viewport changed size
    Resize { width: f32, height: f32 },
    /// One rendered frame, `dt` in seconds
    Frame { dt: f32 },
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    OutOfBounds,
    HitPipe,
}

/// Notifications for the host to mirror on screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionSignal {
    PromptShown,
    PromptHidden,
    Flapped,
    PipePairSpawned { id: u32 },
    PipePairsCulled { count: usize },
    ScoreChanged(u64),
    SessionEnded {
        reason: EndReason,
        score: u64,
        high_score: u64,
        new_record: bool,
    },
}

/// Box the bird is clamped to, when the tuning asks for it
fn world_bounds(config: &FlightConfig, viewport: Viewport) -> Option<Aabb> {
    config.collide_world_bounds.then(|| {
        Aabb::from_min_size(Vec2::ZERO, Vec2::new(viewport.width, viewport.height))
    })
}

/// Single owner of a flight session
pub struct FlightController<P: Physics, S: KeyValueSlot> {
    state: SessionState,
    config: FlightConfig,
    physics: P,
    store: HighScoreStore<S>,
}

impl<P: Physics, S: KeyValueSlot> FlightController<P, S> {
    /// Create a parked session; reads the best score once from `slot`
    pub fn new(config: FlightConfig, viewport: Viewport, mut physics: P, slot: S, seed: u64) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Invalid tuning ({}), using defaults", e);
                FlightConfig::default()
            }
        };
        physics.set_world_bounds(world_bounds(&config, viewport));
        let store = HighScoreStore::open(slot);
        let state = SessionState::new(seed, &config, viewport, store.best());
        log::info!(
            "Flight session ready ({} tuning, {}x{}, best {})",
            config.preset.as_str(),
            viewport.width,
            viewport.height,
            store.best()
        );
        Self {
            state,
            config,
            physics,
            store,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn store(&self) -> &HighScoreStore<S> {
        &self.store
    }

    /// Mutable access for hosts that reposition things directly (tests, editors)
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Process queued events in order
    pub fn handle_all<I>(&mut self, events: I) -> Vec<SessionSignal>
    where
        I: IntoIterator<Item = GameEvent>,
    {
        let mut signals = Vec::new();
        for event in events {
            signals.extend(self.handle(event));
        }
        signals
    }

    /// The transition function
    pub fn handle(&mut self, event: GameEvent) -> Vec<SessionSignal> {
        let mut signals = Vec::new();
        match event {
            GameEvent::PointerDown => self.on_pointer_down(&mut signals),
            GameEvent::TimerFire => {
                if self.state.is_running() {
                    self.spawn_pair(&mut signals);
                }
            }
            GameEvent::Collision => {
                if self.state.is_running() {
                    self.end_session(EndReason::HitPipe, &mut signals);
                }
            }
            GameEvent::Resize { width, height } => self.on_resize(width, height),
            GameEvent::Frame { dt } => self.on_frame(dt, &mut signals),
        }
        signals
    }

    fn on_pointer_down(&mut self, signals: &mut Vec<SessionSignal>) {
        match self.state.phase {
            SessionPhase::NotStarted | SessionPhase::Ended => self.start_session(signals),
            SessionPhase::Running => {}
        }
        self.state.bird.flap(self.config.flap_velocity);
        signals.push(SessionSignal::Flapped);
    }

    fn on_resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            log::warn!("Ignoring resize to {}x{}", width, height);
            return;
        }
        self.state.viewport = Viewport::new(width, height);
        self.physics
            .set_world_bounds(world_bounds(&self.config, self.state.viewport));
        if !self.state.is_running() {
            self.state.bird.recenter(self.state.viewport);
        }
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    fn on_frame(&mut self, dt: f32, signals: &mut Vec<SessionSignal>) {
        if !self.state.is_running() {
            return;
        }
        let dt = dt.max(0.0);

        self.physics.step(&mut self.state.bird, dt);

        if self.state.bird.out_of_bounds(self.state.viewport) {
            self.end_session(EndReason::OutOfBounds, signals);
            return;
        }
        if self.bird_hits_pipe() {
            self.end_session(EndReason::HitPipe, signals);
            return;
        }

        for _ in 0..self.state.spawner.advance(dt) {
            self.spawn_pair(signals);
        }

        let culled = scroll_and_cull(&mut self.state.pipes, dt);
        if culled > 0 {
            signals.push(SessionSignal::PipePairsCulled { count: culled });
        }

        let passed = award_passed_pairs(&mut self.state.pipes, self.state.bird.pos.x);
        if passed > 0 {
            self.state.score += u64::from(passed);
            log::debug!("Score {}", self.state.score);
            signals.push(SessionSignal::ScoreChanged(self.state.score));
        }

        let bird = &mut self.state.bird;
        bird.rotation = rotation_for_velocity(
            bird.velocity_y,
            self.config.rotation_per_velocity,
            self.config.min_rotation,
            self.config.max_rotation,
        );
    }

    fn bird_hits_pipe(&self) -> bool {
        let bird = self.state.bird.bounds();
        self.state.pipes.iter().any(|pair| {
            pair.extents()
                .iter()
                .any(|extent| self.physics.overlaps(bird, pair.extent_bounds(extent)))
        })
    }

    fn start_session(&mut self, signals: &mut Vec<SessionSignal>) {
        self.state.phase = SessionPhase::Running;
        self.state.score = 0;
        self.state.bird.gravity_enabled = true;
        self.state.prompt_visible = false;
        signals.push(SessionSignal::PromptHidden);
        signals.push(SessionSignal::ScoreChanged(0));

        self.state.spawner.set_interval_ms(self.config.spawn_interval_ms);
        self.spawn_pair(signals);
        self.state.spawner.start();

        log::info!("Session {} started", self.state.sessions_played + 1);
    }

    fn spawn_pair(&mut self, signals: &mut Vec<SessionSignal>) {
        let viewport = self.state.viewport;
        let layout = random_layout(viewport, &self.config, &mut self.state.rng);
        let id = self.state.next_pair_id();
        let pair = build_pair(id, viewport, &self.config, layout);
        log::debug!(
            "Pipe pair {} spawned: top={} gap={} bottom={}",
            id,
            layout.top_height,
            layout.gap_height,
            layout.bottom_height
        );
        self.state.pipes.push(pair);
        signals.push(SessionSignal::PipePairSpawned { id });
    }

    fn end_session(&mut self, reason: EndReason, signals: &mut Vec<SessionSignal>) {
        self.state.phase = SessionPhase::Ended;
        self.state.spawner.stop();
        self.state.pipes.clear();

        let score = self.state.score;
        let new_record = self.store.record(score);
        self.state.high_score = self.store.best();

        self.state.bird.gravity_enabled = false;
        self.state.bird.recenter(self.state.viewport);
        self.state.score = 0;
        self.state.prompt_visible = true;
        self.state.sessions_played += 1;

        log::info!(
            "Session {} ended ({:?}): score {}, best {}{}",
            self.state.sessions_played,
            reason,
            score,
            self.state.high_score,
            if new_record { " (new record)" } else { "" }
        );

        signals.push(SessionSignal::SessionEnded {
            reason,
            score,
            high_score: self.state.high_score,
            new_record,
        });
        signals.push(SessionSignal::ScoreChanged(0));
        signals.push(SessionSignal::PromptShown);

        self.state.phase = SessionPhase::NotStarted;
    }
}
