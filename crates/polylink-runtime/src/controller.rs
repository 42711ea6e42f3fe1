#![forbid(unsafe_code)]

//! Playback controller: cursor, play/pause state machine, and pacing.
//!
//! # State machine
//!
//! ```text
//!            load / reset (from any state)
//!                     │
//!                     ▼
//!   ┌──────────────► Idle ──play()──► Playing ──pause()──► Paused
//!   │                  ▲                 │  ▲                 │
//!   │                  │                 │  └─────play()──────┘
//!   │           cursor == len            │
//!   │                  └──── Finished ◄──┘
//!   └──────────────── load / reset ───────┘
//! ```
//!
//! `Finished` is the idle state reached once every step has been rendered.
//! `play()` and `step_once()` are no-ops there, as they are on an empty
//! sequence. Invalid calls never fail; they simply do nothing.
//!
//! # Cancellation
//!
//! Pausing is cooperative. The loop checks the playing flag immediately
//! before each step and after each pacing delay; a step that is already
//! rendering always completes. A pause also wakes a pending pacing delay so
//! [`PlaybackController::play`] resolves promptly.
//!
//! While `play()` is being awaited the controller is mutably borrowed, so
//! pauses and speed changes go through a [`PlaybackHandle`].

use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use polylink_core::StepSequence;
use tokio::sync::Notify;
use tracing::{debug, trace};

use crate::config::PlaybackConfig;
use crate::renderer::Renderer;
use crate::speed::{AtomicSpeed, SpeedFactor};

/// Observable playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Not playing; steps remain (or nothing is loaded).
    Idle,
    /// The continuous play loop is running.
    Playing,
    /// Continuous play was paused; the cursor is where it stopped.
    Paused,
    /// Every loaded step has been rendered.
    Finished,
}

const STATUS_IDLE: u8 = 0;
const STATUS_PLAYING: u8 = 1;
const STATUS_PAUSED: u8 = 2;

// =============================================================================
// Shared state
// =============================================================================

/// State reachable from handles while the controller is busy.
#[derive(Debug)]
struct Shared {
    status: AtomicU8,
    speed: AtomicSpeed,
    wake: Notify,
}

impl Shared {
    fn new(speed: SpeedFactor) -> Self {
        Self {
            status: AtomicU8::new(STATUS_IDLE),
            speed: AtomicSpeed::new(speed),
            wake: Notify::new(),
        }
    }

    fn status(&self) -> u8 {
        self.status.load(Ordering::Acquire)
    }

    fn is_playing(&self) -> bool {
        self.status() == STATUS_PLAYING
    }

    fn set_idle(&self) {
        self.status.store(STATUS_IDLE, Ordering::Release);
    }

    /// Enter `Playing`. Returns `false` if already playing.
    fn begin_playing(&self) -> bool {
        self.status.swap(STATUS_PLAYING, Ordering::AcqRel) != STATUS_PLAYING
    }

    /// `Playing → Paused`. Returns `false` (and does nothing) otherwise.
    fn pause(&self) -> bool {
        let paused = self
            .status
            .compare_exchange(
                STATUS_PLAYING,
                STATUS_PAUSED,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok();
        if paused {
            self.wake.notify_waiters();
        }
        paused
    }

    fn set_speed(&self, factor: f64) -> bool {
        match SpeedFactor::new(factor) {
            Some(speed) => {
                self.speed.store(speed);
                true
            }
            None => false,
        }
    }

    /// Wait out one pacing delay unless paused first.
    ///
    /// Returns whether playback should continue.
    async fn pace(&self, delay: Duration) -> bool {
        let mut notified = pin!(self.wake.notified());
        notified.as_mut().enable();
        if !self.is_playing() {
            return false;
        }
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = &mut notified => {}
            }
        }
        self.is_playing()
    }
}

/// Falls back to `Paused` if a `play()` future is dropped mid-loop.
struct PlayGuard {
    shared: Arc<Shared>,
}

impl Drop for PlayGuard {
    fn drop(&mut self) {
        if self.shared.pause() {
            debug!("play future dropped while playing; paused");
        }
    }
}

// =============================================================================
// PlaybackHandle
// =============================================================================

/// Cloneable remote control for a [`PlaybackController`].
///
/// Safe to use from a sibling task, another thread, or from inside the
/// renderer while the controller's `play()` future is pending.
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    shared: Arc<Shared>,
}

impl PlaybackHandle {
    /// Request a pause. Returns `false` if playback was not running.
    pub fn pause(&self) -> bool {
        let paused = self.shared.pause();
        if paused {
            debug!("pause requested via handle");
        }
        paused
    }

    /// Change the speed for future steps. Invalid factors are ignored and
    /// return `false`.
    pub fn set_speed(&self, factor: f64) -> bool {
        self.shared.set_speed(factor)
    }

    #[must_use]
    pub fn speed(&self) -> SpeedFactor {
        self.shared.speed.load()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.shared.is_playing()
    }
}

// =============================================================================
// PlaybackController
// =============================================================================

/// Sequences a step trace through a [`Renderer`].
pub struct PlaybackController<R> {
    steps: StepSequence,
    cursor: usize,
    config: PlaybackConfig,
    shared: Arc<Shared>,
    renderer: R,
    /// Last speed pushed to the renderer; `None` forces a push on the next step.
    rendered_speed: Option<SpeedFactor>,
}

impl<R: Renderer> PlaybackController<R> {
    /// Create an idle controller with the default configuration.
    pub fn new(renderer: R) -> Self {
        Self::with_config(renderer, PlaybackConfig::default())
    }

    /// Create an idle controller with an explicit configuration.
    pub fn with_config(renderer: R, config: PlaybackConfig) -> Self {
        Self {
            steps: StepSequence::empty(),
            cursor: 0,
            shared: Arc::new(Shared::new(config.initial_speed)),
            config,
            renderer,
            rendered_speed: None,
        }
    }

    /// Replace the sequence, rewind to the first step, and go idle.
    pub fn load(&mut self, steps: impl Into<StepSequence>) {
        self.steps = steps.into();
        self.rewind();
        debug!(steps = self.steps.len(), "sequence loaded");
    }

    /// Drop the sequence, rewind, and go idle.
    pub fn reset(&mut self) {
        self.steps = StepSequence::empty();
        self.rewind();
        debug!("playback reset");
    }

    fn rewind(&mut self) {
        self.shared.set_idle();
        self.cursor = 0;
        self.rendered_speed = None;
        self.renderer.reset();
    }

    /// Play continuously until paused or finished.
    ///
    /// No-op when already playing, finished, or empty. Resolves with the
    /// state playback stopped in.
    ///
    /// Dropping the future pauses playback. If it is dropped while a step is
    /// still rendering, the cursor is not advanced, so the next `play` or
    /// [`step_once`](Self::step_once) delivers that step to the renderer
    /// again.
    pub async fn play(&mut self) -> PlaybackState {
        if self.cursor >= self.steps.len() {
            trace!(cursor = self.cursor, "play ignored: nothing left to play");
            return self.state();
        }
        if !self.shared.begin_playing() {
            trace!("play ignored: already playing");
            return self.state();
        }
        debug!(cursor = self.cursor, speed = %self.speed(), "playback started");
        let _guard = PlayGuard {
            shared: Arc::clone(&self.shared),
        };

        loop {
            if !self.shared.is_playing() {
                break;
            }
            self.execute_current().await;
            if self.cursor >= self.steps.len() {
                self.shared.set_idle();
                break;
            }
            let delay = self.shared.speed.load().scale(self.config.step_delay);
            if !self.shared.pace(delay).await {
                break;
            }
        }

        let state = self.state();
        debug!(cursor = self.cursor, ?state, "playback stopped");
        state
    }

    /// Pause continuous play. No-op unless playing.
    pub fn pause(&self) -> bool {
        self.shared.pause()
    }

    /// Render exactly one step. No-op while playing or when no steps remain.
    ///
    /// Returns whether a step was rendered.
    pub async fn step_once(&mut self) -> bool {
        if self.shared.is_playing() || self.cursor >= self.steps.len() {
            trace!(cursor = self.cursor, "step ignored");
            return false;
        }
        self.execute_current().await;
        true
    }

    /// Change the speed for pacing and renderer animations, effective from
    /// the next step. Invalid factors are ignored and return `false`.
    pub fn set_speed(&self, factor: f64) -> bool {
        self.shared.set_speed(factor)
    }

    async fn execute_current(&mut self) {
        let index = self.cursor;
        let steps = self.steps.clone();
        let Some(step) = steps.get(index) else {
            return;
        };

        let speed = self.shared.speed.load();
        if self.rendered_speed != Some(speed) {
            self.renderer.set_speed(speed);
            self.rendered_speed = Some(speed);
        }

        trace!(index, kind = step.kind.name(), "rendering step");
        self.renderer.render(index, step).await;
        self.cursor = index + 1;
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        match self.shared.status() {
            STATUS_PLAYING => PlaybackState::Playing,
            _ if self.is_finished() => PlaybackState::Finished,
            STATUS_PAUSED => PlaybackState::Paused,
            _ => PlaybackState::Idle,
        }
    }

    /// Whether every step of a non-empty sequence has been rendered.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.steps.is_empty() && self.cursor >= self.steps.len()
    }

    /// Index of the next step to render.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    #[must_use]
    pub fn speed(&self) -> SpeedFactor {
        self.shared.speed.load()
    }

    #[must_use]
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// A remote control sharing this controller's state.
    #[must_use]
    pub fn handle(&self) -> PlaybackHandle {
        PlaybackHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R> std::fmt::Debug for PlaybackController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("steps", &self.steps.len())
            .field("cursor", &self.cursor)
            .field("status", &self.shared.status())
            .field("speed", &self.shared.speed.load())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NullRenderer;
    use polylink_core::{Operation, Polynomial, generate};

    fn sample() -> StepSequence {
        let a = Polynomial::from_coefficients([(2, 2), (0, 3)]).unwrap();
        let b = Polynomial::from_coefficients([(2, 1), (0, 5)]).unwrap();
        generate(&a, &b, Operation::Addition)
    }

    #[test]
    fn new_controller_is_idle_and_empty() {
        let ctl = PlaybackController::new(NullRenderer);
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert_eq!(ctl.cursor(), 0);
        assert!(ctl.steps().is_empty());
        assert!(!ctl.is_finished());
    }

    #[test]
    fn pause_when_idle_is_noop() {
        let mut ctl = PlaybackController::new(NullRenderer);
        ctl.load(sample());
        assert!(!ctl.pause());
        assert!(!ctl.handle().pause());
        assert_eq!(ctl.state(), PlaybackState::Idle);
    }

    #[test]
    fn invalid_speed_is_ignored() {
        let ctl = PlaybackController::new(NullRenderer);
        assert!(!ctl.set_speed(0.0));
        assert!(!ctl.handle().set_speed(f64::NAN));
        assert_eq!(ctl.speed(), SpeedFactor::DEFAULT);
        assert!(ctl.set_speed(2.0));
        assert_eq!(ctl.handle().speed().get(), 2.0);
    }

    #[tokio::test]
    async fn play_on_empty_sequence_is_noop() {
        let mut ctl = PlaybackController::new(NullRenderer);
        assert_eq!(ctl.play().await, PlaybackState::Idle);
        assert!(!ctl.step_once().await);
    }

    #[tokio::test(start_paused = true)]
    async fn play_runs_to_finished() {
        let mut ctl = PlaybackController::new(NullRenderer);
        let steps = sample();
        let len = steps.len();
        ctl.load(steps);
        assert_eq!(ctl.play().await, PlaybackState::Finished);
        assert_eq!(ctl.cursor(), len);
        assert_eq!(ctl.play().await, PlaybackState::Finished);
        assert_eq!(ctl.cursor(), len);
    }

    #[tokio::test]
    async fn load_rewinds_finished_controller() {
        let mut ctl = PlaybackController::with_config(NullRenderer, PlaybackConfig::instant());
        ctl.load(sample());
        while ctl.step_once().await {}
        assert_eq!(ctl.state(), PlaybackState::Finished);
        ctl.load(sample());
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert_eq!(ctl.cursor(), 0);
        ctl.reset();
        assert!(ctl.steps().is_empty());
        assert_eq!(ctl.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn dropped_play_future_falls_back_to_paused() {
        let mut ctl = PlaybackController::new(NullRenderer);
        ctl.load(sample());
        {
            let play = ctl.play();
            // Poll once: first step renders, then the loop parks in its pacing delay.
            let _ = tokio::time::timeout(Duration::from_millis(1), play).await;
        }
        assert_eq!(ctl.state(), PlaybackState::Paused);
        assert_eq!(ctl.cursor(), 1);
    }
}
