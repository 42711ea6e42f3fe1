#![forbid(unsafe_code)]

//! Line-oriented renderer writing a step-by-step narration.
//!
//! Each step prints its commentary, the active pseudocode line, and (when it
//! changed) the result or intermediate list drawn as a linked list:
//!
//! ```text
//! [04] add_node       Powers are equal. Calculating coefficients (2 + 1 = 3).
//!      | int sum = p1->coeff + p2->coeff;
//!      result: [3x^2] -> NULL
//! ```
//!
//! Write failures do not interrupt playback. The first error is kept and
//! further output is suppressed until [`TextRenderer::take_error`] or a
//! controller reset/load clears it.

use std::io::{self, Write};

use polylink_core::{ResultList, Step, StepKind, Term};
use polylink_runtime::{Renderer, SpeedFactor};
use tracing::warn;

use crate::pseudocode;
use crate::timings::AnimationTimings;

/// Shown instead of creating a node for a zero coefficient.
pub const ZERO_COEFFICIENT_MESSAGE: &str =
    "Resulting coefficient is 0. No node is created to save memory.";

/// Draw terms as a singly linked list: `[3x^2] -> [8] -> NULL`.
#[must_use]
pub fn format_list(terms: &[Term]) -> String {
    let mut out = String::new();
    for term in terms {
        out.push('[');
        out.push_str(&term.to_string());
        out.push_str("] -> ");
    }
    out.push_str("NULL");
    out
}

/// [`Renderer`] that narrates steps to a [`Write`] sink.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    model: ResultList,
    timings: AnimationTimings,
    animate: bool,
    show_code: bool,
    error: Option<io::Error>,
}

impl<W: Write> TextRenderer<W> {
    /// Narrate to `out` without waiting on animation timings.
    pub fn new(out: W) -> Self {
        Self {
            out,
            model: ResultList::new(),
            timings: AnimationTimings::default(),
            animate: false,
            show_code: true,
            error: None,
        }
    }

    /// Sleep for each step's scaled animation time after printing it.
    #[must_use]
    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Print the active pseudocode line under each commentary.
    #[must_use]
    pub fn with_code(mut self, show_code: bool) -> Self {
        self.show_code = show_code;
        self
    }

    /// The result list as currently drawn.
    #[must_use]
    pub fn model(&self) -> &ResultList {
        &self.model
    }

    #[must_use]
    pub fn timings(&self) -> &AnimationTimings {
        &self.timings
    }

    /// The first write error, if any. Clears it and resumes output.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn present(&mut self, index: usize, step: &Step) {
        let changed = self.model.apply(step);
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_step(index, step, changed) {
            warn!(index, error = %err, "text renderer output failed");
            self.error = Some(err);
        }
    }

    fn write_step(&mut self, index: usize, step: &Step, changed: bool) -> io::Result<()> {
        writeln!(
            self.out,
            "[{index:02}] {:<14} {}",
            step.kind.name(),
            step.commentary
        )?;
        if self.show_code
            && let Some(line) = pseudocode::active_line(step.code, step.line)
        {
            writeln!(self.out, "     | {}", line.trim_start())?;
        }

        match &step.kind {
            StepKind::AddNode { term, .. } if term.is_zero() => {
                writeln!(self.out, "     {ZERO_COEFFICIENT_MESSAGE}")?;
            }
            StepKind::ShowIntermediate { .. } => {
                writeln!(
                    self.out,
                    "     intermediate: {}",
                    format_list(self.model.intermediate())
                )?;
            }
            StepKind::End => {
                writeln!(self.out, "     result: {}", format_list(self.model.slots()))?;
            }
            _ if changed => {
                writeln!(self.out, "     result: {}", format_list(self.model.slots()))?;
            }
            _ => {}
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    async fn render(&mut self, index: usize, step: &Step) {
        self.present(index, step);
        if self.animate {
            let wait = self.timings.for_step(step);
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
        }
    }

    fn set_speed(&mut self, speed: SpeedFactor) {
        self.timings = AnimationTimings::for_speed(speed);
    }

    /// Clears the model and any stored write error, so a reloaded trace is
    /// narrated again.
    fn reset(&mut self) {
        self.model = ResultList::new();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polylink_core::Term;

    #[test]
    fn list_formatting() {
        assert_eq!(format_list(&[]), "NULL");
        assert_eq!(
            format_list(&[Term::new(3, 2), Term::new(8, 0)]),
            "[3x^2] -> [8] -> NULL"
        );
        assert_eq!(
            format_list(&[Term::new(-1, 1), Term::new(1, 3)]),
            "[-x] -> [x^3] -> NULL"
        );
    }
}
