#![forbid(unsafe_code)]

//! The renderer boundary.
//!
//! A [`Renderer`] depicts one step at a time. The controller awaits the
//! future returned by [`Renderer::render`] before touching the next step,
//! so at most one step is ever in flight and steps arrive strictly in
//! order.

use std::future::Future;

use polylink_core::Step;

use crate::speed::SpeedFactor;

/// Something that can depict steps of a polynomial trace.
pub trait Renderer {
    /// Depict `step` (at position `index` in the loaded sequence).
    ///
    /// The returned future resolves once the depiction is complete.
    fn render(&mut self, index: usize, step: &Step) -> impl Future<Output = ()>;

    /// The speed factor changed; scale animation durations accordingly.
    ///
    /// Delivered immediately before the next step renders.
    fn set_speed(&mut self, speed: SpeedFactor) {
        let _ = speed;
    }

    /// A sequence was loaded or the controller was reset; drop any
    /// materialized state.
    fn reset(&mut self) {}
}

impl<R: Renderer> Renderer for &mut R {
    fn render(&mut self, index: usize, step: &Step) -> impl Future<Output = ()> {
        (**self).render(index, step)
    }

    fn set_speed(&mut self, speed: SpeedFactor) {
        (**self).set_speed(speed);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

/// Renderer that depicts nothing and finishes every step immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    async fn render(&mut self, _index: usize, _step: &Step) {}
}
