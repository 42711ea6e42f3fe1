#![forbid(unsafe_code)]

//! Animation durations for renderers.
//!
//! | Animation | At 1.0x | Scaled |
//! |-----------|---------|--------|
//! | pointer move | 600 ms | yes |
//! | ghost node transfer | 800 ms | yes |
//! | merge nudge | 300 ms | yes |
//! | node creation | 500 ms | yes |
//! | zero-result pause | 600 ms | yes |
//! | update pulse | 400 ms | no |
//! | typewriter | 30 ms / char | yes |

use std::time::Duration;

use polylink_core::{Source, Step, StepKind};
use polylink_runtime::SpeedFactor;

/// Durations of the individual renderer animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    pub pointer_move: Duration,
    pub ghost_transfer: Duration,
    pub merge_nudge: Duration,
    pub node_creation: Duration,
    pub zero_result_pause: Duration,
    pub update_pulse: Duration,
    pub typewriter_per_char: Duration,
}

impl AnimationTimings {
    /// Durations at normal speed.
    pub const BASE: Self = Self {
        pointer_move: Duration::from_millis(600),
        ghost_transfer: Duration::from_millis(800),
        merge_nudge: Duration::from_millis(300),
        node_creation: Duration::from_millis(500),
        zero_result_pause: Duration::from_millis(600),
        update_pulse: Duration::from_millis(400),
        typewriter_per_char: Duration::from_millis(30),
    };

    /// Durations divided by `speed`. The update pulse is not scaled.
    #[must_use]
    pub fn for_speed(speed: SpeedFactor) -> Self {
        let base = Self::BASE;
        Self {
            pointer_move: speed.scale(base.pointer_move),
            ghost_transfer: speed.scale(base.ghost_transfer),
            merge_nudge: speed.scale(base.merge_nudge),
            node_creation: speed.scale(base.node_creation),
            zero_result_pause: speed.scale(base.zero_result_pause),
            update_pulse: base.update_pulse,
            typewriter_per_char: speed.scale(base.typewriter_per_char),
        }
    }

    /// Time to type out `text` one character at a time.
    #[must_use]
    pub fn typewriter(&self, text: &str) -> Duration {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        self.typewriter_per_char.saturating_mul(chars)
    }

    /// Animation time for a step's action, excluding the commentary.
    #[must_use]
    pub fn action(&self, step: &Step) -> Duration {
        match &step.kind {
            StepKind::Start | StepKind::Highlight { .. } => self.pointer_move,
            StepKind::AddNode { term, .. } if term.is_zero() => self.zero_result_pause,
            StepKind::AddNode {
                source: Source::Merge,
                ..
            } => self.merge_nudge + self.ghost_transfer + self.node_creation,
            StepKind::AddNode { .. } => self.ghost_transfer + self.node_creation,
            StepKind::UpdateNode { .. } => self.update_pulse,
            StepKind::ShowIntermediate { .. } => self.node_creation,
            StepKind::StartCombine | StepKind::End => Duration::ZERO,
        }
    }

    /// Total time a step occupies: the action and commentary run side by side.
    #[must_use]
    pub fn for_step(&self, step: &Step) -> Duration {
        self.action(step).max(self.typewriter(&step.commentary))
    }
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self::for_speed(SpeedFactor::DEFAULT)
    }
}
