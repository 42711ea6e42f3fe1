#![forbid(unsafe_code)]

//! Renderer-side helpers for polylink.
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`pseudocode`] | C++ snippet per [`CodeRef`](polylink_core::CodeRef), active-line lookup, complexity labels |
//! | [`timings`] | Speed-scaled animation durations |
//! | [`text_renderer`] | A [`Renderer`](polylink_runtime::Renderer) that narrates to any `io::Write` |

pub mod pseudocode;
pub mod text_renderer;
pub mod timings;

pub use pseudocode::{CodeLine, annotated, complexity_label, snippet};
pub use text_renderer::{TextRenderer, ZERO_COEFFICIENT_MESSAGE, format_list};
pub use timings::AnimationTimings;
