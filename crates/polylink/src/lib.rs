#![forbid(unsafe_code)]

//! PolyLink public facade.
//!
//! Re-exports the term model, generator, and input validation from
//! `polylink-core`, playback from `polylink-runtime`, and renderer helpers
//! from `polylink-extras`, plus a prelude for day-to-day usage.
//!
//! ```ignore
//! use polylink::prelude::*;
//!
//! let steps = polylink::trace("2, 0, 3", "1, 0, 5", Operation::Addition)?;
//! let mut controller = PlaybackController::new(TextRenderer::new(std::io::stdout()));
//! controller.load(steps);
//! controller.play().await;
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use polylink_core::{
    CodeRef, Coefficient, InputError, MAX_COEFFICIENT, MAX_POWER, Operation, Polynomial,
    PolynomialForm, Power, ResultList, Source, Step, StepKind, StepSequence, Term, generate,
    parse_max_power, replay,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use polylink_runtime::{
    NullRenderer, PlaybackConfig, PlaybackController, PlaybackHandle, PlaybackState, Renderer,
    SpeedFactor,
};

// --- Extras re-exports -----------------------------------------------------

#[cfg(feature = "extras")]
pub use polylink_extras::{AnimationTimings, TextRenderer, complexity_label};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for polylink apps.
#[derive(Debug)]
pub enum Error {
    /// Rejected user input.
    Input(InputError),
    /// I/O failure while rendering.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for polylink APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Validate two coefficient lists (highest power first) and generate the
/// trace for `op`.
pub fn trace(p1: &str, p2: &str, op: Operation) -> Result<StepSequence> {
    let a = PolynomialForm::from_coefficient_list(p1)?.build();
    let b = PolynomialForm::from_coefficient_list(p2)?.build();
    Ok(generate(&a, &b, op))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Operation, Polynomial, PolynomialForm, Result, Step, StepKind, StepSequence, Term,
        generate,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{PlaybackConfig, PlaybackController, PlaybackState, Renderer};

    #[cfg(feature = "extras")]
    pub use crate::TextRenderer;

    pub use crate::core;
    #[cfg(feature = "extras")]
    pub use crate::extras;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use polylink_core as core;
#[cfg(feature = "extras")]
pub use polylink_extras as extras;
#[cfg(feature = "runtime")]
pub use polylink_runtime as runtime;
