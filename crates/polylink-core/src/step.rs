#![forbid(unsafe_code)]

//! Step records produced by the generator and consumed by renderers.
//!
//! A [`Step`] is one replayable unit of an algorithm trace. Its
//! [`StepKind`] says what happened; the commentary, [`CodeRef`] and
//! sub-line index are carried for presentation and never interpreted here.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::term::Term;

/// Where an appended result term came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Source {
    /// Copied from the first list.
    P1,
    /// Copied (possibly negated) from the second list.
    P2,
    /// Coefficients of equal powers combined.
    Merge,
    /// Placed during the multiplication combine pass.
    Carry,
}

/// Identifier of a pseudocode block shown alongside a step.
///
/// Opaque to the generator: it is attached, never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum CodeRef {
    AddSubStart,
    AddSubLoop,
    AddEqual,
    SubEqual,
    P1Greater,
    P2Greater,
    SubP2Greater,
    P1Remainder,
    P2Remainder,
    SubP2Remainder,
    MultOuterLoop,
    MultInnerLoop,
    MultCalc,
    MultCombine,
    End,
}

impl CodeRef {
    /// Every identifier, in declaration order.
    pub const ALL: [CodeRef; 15] = [
        CodeRef::AddSubStart,
        CodeRef::AddSubLoop,
        CodeRef::AddEqual,
        CodeRef::SubEqual,
        CodeRef::P1Greater,
        CodeRef::P2Greater,
        CodeRef::SubP2Greater,
        CodeRef::P1Remainder,
        CodeRef::P2Remainder,
        CodeRef::SubP2Remainder,
        CodeRef::MultOuterLoop,
        CodeRef::MultInnerLoop,
        CodeRef::MultCalc,
        CodeRef::MultCombine,
        CodeRef::End,
    ];

    /// Stable upper-snake name, suitable as a lookup key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CodeRef::AddSubStart => "ADD_SUB_START",
            CodeRef::AddSubLoop => "ADD_SUB_LOOP",
            CodeRef::AddEqual => "ADD_EQUAL",
            CodeRef::SubEqual => "SUB_EQUAL",
            CodeRef::P1Greater => "P1_GREATER",
            CodeRef::P2Greater => "P2_GREATER",
            CodeRef::SubP2Greater => "SUB_P2_GREATER",
            CodeRef::P1Remainder => "P1_REMAINDER",
            CodeRef::P2Remainder => "P2_REMAINDER",
            CodeRef::SubP2Remainder => "SUB_P2_REMAINDER",
            CodeRef::MultOuterLoop => "MULT_OUTER_LOOP",
            CodeRef::MultInnerLoop => "MULT_INNER_LOOP",
            CodeRef::MultCalc => "MULT_CALC",
            CodeRef::MultCombine => "MULT_COMBINE",
            CodeRef::End => "END",
        }
    }
}

impl fmt::Display for CodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a step does.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "snake_case"))]
pub enum StepKind {
    /// Algorithm entry.
    Start,
    /// Positions under comparison; `None` means that list is exhausted
    /// or not involved.
    Highlight { p1: Option<usize>, p2: Option<usize> },
    /// Append `term` to the result. A zero coefficient must not be
    /// materialized by the renderer.
    AddNode {
        source: Source,
        term: Term,
        p1: Option<usize>,
        p2: Option<usize>,
    },
    /// Replace the coefficient of the result term at `index`.
    UpdateNode { index: usize, term: Term },
    /// Snapshot of the unmerged product list.
    ShowIntermediate { terms: Vec<Term> },
    /// Product generation is over; any materialized result is cleared.
    StartCombine,
    /// Algorithm completion.
    End,
}

impl StepKind {
    /// Short lowercase tag for logs and traces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            StepKind::Start => "start",
            StepKind::Highlight { .. } => "highlight",
            StepKind::AddNode { .. } => "add_node",
            StepKind::UpdateNode { .. } => "update_node",
            StepKind::ShowIntermediate { .. } => "show_intermediate",
            StepKind::StartCombine => "start_combine",
            StepKind::End => "end",
        }
    }
}

/// One unit of an algorithm trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: StepKind,
    /// Human-readable explanation.
    pub commentary: String,
    /// Pseudocode block to display.
    pub code: CodeRef,
    /// Active line within [`Step::code`].
    pub line: usize,
}

impl Step {
    #[must_use]
    pub fn new(kind: StepKind, commentary: impl Into<String>, code: CodeRef, line: usize) -> Self {
        Self {
            kind,
            commentary: commentary.into(),
            code,
            line,
        }
    }

    /// Whether a renderer should create a visible result node for this step.
    #[must_use]
    pub fn materializes(&self) -> bool {
        matches!(self.kind, StepKind::AddNode { term, .. } if !term.is_zero())
    }
}

/// Immutable, cheaply clonable step list.
///
/// Produced in full before playback starts; clones share storage so a
/// controller can reload the same trace without copying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence(Arc<[Step]>);

impl StepSequence {
    /// A sequence with no steps.
    #[must_use]
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Step] {
        &self.0
    }

    /// Count of steps of the given kind name (see [`StepKind::name`]).
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.0.iter().filter(|s| s.kind.name() == name).count()
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for StepSequence {
    type Target = [Step];

    fn deref(&self) -> &[Step] {
        &self.0
    }
}

impl From<Vec<Step>> for StepSequence {
    fn from(steps: Vec<Step>) -> Self {
        Self(Arc::from(steps))
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
