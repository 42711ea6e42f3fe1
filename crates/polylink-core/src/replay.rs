#![forbid(unsafe_code)]

//! Step replay: fold a step trace into the result a renderer would show.
//!
//! [`ResultList`] applies steps the way a faithful renderer does: zero
//! coefficient `AddNode`s are not materialized, `UpdateNode` rewrites a slot
//! in place (a zero sum keeps its slot), `ShowIntermediate` replaces the
//! product snapshot, and `StartCombine` clears the materialized result.
//! Renderers use it as their model; tests use it to check the arithmetic.

use std::fmt;

use crate::step::{Step, StepKind};
use crate::term::{Term, write_terms};

/// Materialized result list plus the last intermediate snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultList {
    slots: Vec<Term>,
    intermediate: Vec<Term>,
    finished: bool,
}

impl ResultList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one step. Returns `true` when the visible result changed.
    pub fn apply(&mut self, step: &Step) -> bool {
        match &step.kind {
            StepKind::Start => {
                self.slots.clear();
                self.intermediate.clear();
                self.finished = false;
                false
            }
            StepKind::Highlight { .. } => false,
            StepKind::AddNode { term, .. } => {
                if term.is_zero() {
                    return false;
                }
                self.slots.push(*term);
                true
            }
            StepKind::UpdateNode { index, term } => match self.slots.get_mut(*index) {
                Some(slot) => {
                    *slot = *term;
                    true
                }
                None => false,
            },
            StepKind::ShowIntermediate { terms } => {
                self.intermediate.clone_from(terms);
                false
            }
            StepKind::StartCombine => {
                let changed = !self.slots.is_empty();
                self.slots.clear();
                changed
            }
            StepKind::End => {
                self.finished = true;
                false
            }
        }
    }

    /// Result slots in order, including zero-coefficient slots left by the
    /// multiplication combine pass.
    #[must_use]
    pub fn slots(&self) -> &[Term] {
        &self.slots
    }

    /// Last product snapshot seen (multiplication only).
    #[must_use]
    pub fn intermediate(&self) -> &[Term] {
        &self.intermediate
    }

    /// Whether an `End` step has been applied.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Result terms with zero slots dropped, highest power first.
    ///
    /// Not a [`crate::Polynomial`]: a product's coefficients may exceed the
    /// operand bound.
    pub fn result_terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.slots.iter().copied().filter(|t| !t.is_zero())
    }
}

/// The result in conventional notation, `0` when empty.
impl fmt::Display for ResultList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<Term> = self.result_terms().collect();
        write_terms(f, &terms)
    }
}

/// Replay a whole trace.
pub fn replay<'a, I>(steps: I) -> ResultList
where
    I: IntoIterator<Item = &'a Step>,
{
    let mut list = ResultList::new();
    for step in steps {
        list.apply(step);
    }
    list
}
