#![forbid(unsafe_code)]

//! Playback for polynomial step traces.
//!
//! A [`PlaybackController`] owns a loaded [`StepSequence`](polylink_core::StepSequence),
//! a cursor, and a [`Renderer`]. It renders steps strictly in order, one at
//! a time, pacing continuous play by [`PlaybackConfig::step_delay`] divided
//! by the current [`SpeedFactor`].
//!
//! ```ignore
//! let mut controller = PlaybackController::new(my_renderer);
//! controller.load(generate(&a, &b, Operation::Multiplication));
//! let handle = controller.handle();
//! tokio::join!(controller.play(), async move { /* handle.pause() */ });
//! ```

pub mod config;
pub mod controller;
pub mod renderer;
pub mod speed;

pub use config::{DEFAULT_STEP_DELAY, PlaybackConfig};
pub use controller::{PlaybackController, PlaybackHandle, PlaybackState};
pub use renderer::{NullRenderer, Renderer};
pub use speed::SpeedFactor;
