#![forbid(unsafe_code)]

//! A renderer that records every call it receives.

use polylink_core::Step;
use polylink_runtime::{Renderer, SpeedFactor};

/// One call made to a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Render { index: usize, step: Step },
    Speed(SpeedFactor),
    Reset,
}

/// Records calls in order; finishes every step immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Indices of rendered steps, in call order.
    #[must_use]
    pub fn rendered_indices(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Render { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    /// Drain the recorded calls.
    pub fn take(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Renderer for RecordingRenderer {
    async fn render(&mut self, index: usize, step: &Step) {
        self.calls.push(RenderCall::Render {
            index,
            step: step.clone(),
        });
    }

    fn set_speed(&mut self, speed: SpeedFactor) {
        self.calls.push(RenderCall::Speed(speed));
    }

    fn reset(&mut self) {
        self.calls.push(RenderCall::Reset);
    }
}
