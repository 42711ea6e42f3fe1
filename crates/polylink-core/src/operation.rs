#![forbid(unsafe_code)]

//! Arithmetic operation selector.

use std::fmt;
use std::str::FromStr;

use crate::input::InputError;

/// The operation a step sequence demonstrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Operation::Addition => "Addition",
            Operation::Subtraction => "Subtraction",
            Operation::Multiplication => "Multiplication",
        }
    }

    /// Operator symbol used in commentary.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '-',
            Operation::Multiplication => '*',
        }
    }

    /// Addition and subtraction share the sorted-merge algorithm.
    #[must_use]
    pub const fn is_merge(self) -> bool {
        !matches!(self, Operation::Multiplication)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "addition" | "+" => Ok(Operation::Addition),
            "sub" | "subtract" | "subtraction" | "-" => Ok(Operation::Subtraction),
            "mul" | "multiply" | "multiplication" | "*" | "x" => Ok(Operation::Multiplication),
            _ => Err(InputError::UnknownOperation(s.to_string())),
        }
    }
}
