#![forbid(unsafe_code)]

//! Core: term model, validated input, and step generation.
//!
//! # Key Components
//!
//! - [`Polynomial`] / [`Term`] - canonical, zero-free, power-descending terms
//! - [`PolynomialForm`] - validated entry (max power, then coefficients)
//! - [`generate`] - pure step generator for addition, subtraction, multiplication
//! - [`Step`] / [`StepKind`] - one replayable unit of an algorithm trace
//! - [`ResultList`] - folds steps into the result a renderer would display
//!
//! # Role in PolyLink
//! `polylink-core` has no notion of time or presentation. It produces the
//! whole trace up front; `polylink-runtime` paces it and hands each step to
//! a renderer.

pub mod generator;
pub mod input;
pub mod operation;
pub mod replay;
pub mod step;
pub mod term;

pub use generator::generate;
pub use input::{
    InputError, InputResult, MAX_COEFFICIENT, MAX_POWER, PolynomialForm, parse_max_power,
};
pub use operation::Operation;
pub use replay::{ResultList, replay};
pub use step::{CodeRef, Source, Step, StepKind, StepSequence};
pub use term::{Coefficient, Polynomial, Power, Term};
