#![forbid(unsafe_code)]

//! Term model: coefficients, powers, and canonical polynomials.
//!
//! A [`Polynomial`] is the read-only input to the step generator. Its terms
//! are always sorted by strictly decreasing power, no two terms share a
//! power, and no term carries a zero coefficient. An empty polynomial is the
//! zero polynomial.
//!
//! Every term of a `Polynomial` also stays within [`MAX_POWER`] and
//! [`MAX_COEFFICIENT`]. Under those bounds a product is at most `10^12` and a
//! combined sum of up to `51 * 51` products stays below `3 * 10^15`, so the
//! generator's arithmetic cannot overflow `i64`.

use std::collections::BTreeMap;
use std::fmt;

use crate::input::{InputError, InputResult, MAX_COEFFICIENT, MAX_POWER, check_coefficient};

/// Integer coefficient of a term.
pub type Coefficient = i64;

/// Non-negative power of a term.
pub type Power = u32;

/// A single `(coefficient, power)` pair, i.e. one linked-list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    pub coefficient: Coefficient,
    pub power: Power,
}

impl Term {
    /// Create a term.
    #[must_use]
    pub const fn new(coefficient: Coefficient, power: Power) -> Self {
        Self { coefficient, power }
    }

    /// Same power, opposite coefficient.
    ///
    /// # Panics
    ///
    /// On overflow, which terms of a [`Polynomial`] cannot reach.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self {
            coefficient: -self.coefficient,
            power: self.power,
        }
    }

    /// Product of two terms: coefficients multiply, powers add.
    ///
    /// # Panics
    ///
    /// On overflow, which terms of a [`Polynomial`] cannot reach.
    #[must_use]
    pub const fn product(self, other: Term) -> Self {
        Self {
            coefficient: self.coefficient * other.coefficient,
            power: self.power + other.power,
        }
    }

    /// Whether this term contributes nothing to a sum.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.coefficient == 0
    }

    /// Raw `{coefficient}x^{power}` form, used in step commentary.
    #[must_use]
    pub fn raw(self) -> String {
        format!("{}x^{}", self.coefficient, self.power)
    }

    /// Write the magnitude part (no sign) in conventional notation.
    fn fmt_magnitude(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.coefficient.unsigned_abs();
        match self.power {
            0 => write!(f, "{magnitude}"),
            _ if magnitude != 1 => {
                write!(f, "{magnitude}x")?;
                if self.power > 1 {
                    write!(f, "^{}", self.power)?;
                }
                Ok(())
            }
            1 => write!(f, "x"),
            p => write!(f, "x^{p}"),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficient < 0 {
            f.write_str("-")?;
        }
        self.fmt_magnitude(f)
    }
}

/// Write terms in conventional notation, `0` when there are none.
pub(crate) fn write_terms(f: &mut fmt::Formatter<'_>, terms: &[Term]) -> fmt::Result {
    let Some((first, rest)) = terms.split_first() else {
        return f.write_str("0");
    };
    write!(f, "{first}")?;
    for term in rest {
        f.write_str(if term.coefficient < 0 { " - " } else { " + " })?;
        term.fmt_magnitude(f)?;
    }
    Ok(())
}

/// Canonical polynomial: terms in strictly decreasing power, zero-free,
/// every term within [`MAX_POWER`] and [`MAX_COEFFICIENT`].
///
/// Deserialization goes through [`Polynomial::from_terms`], so a serialized
/// term list is canonicalized and bound-checked like any other input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Term>", into = "Vec<Term>"))]
pub struct Polynomial {
    terms: Vec<Term>,
}

impl Polynomial {
    /// The zero polynomial (no terms).
    #[must_use]
    pub const fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// Build from a power → coefficient mapping.
    ///
    /// Zero coefficients are dropped. Repeated powers are summed before the
    /// zero filter, so `[(1, 2), (1, -2)]` yields the zero polynomial. A power
    /// above [`MAX_POWER`] or a summed coefficient beyond [`MAX_COEFFICIENT`]
    /// is rejected.
    pub fn from_coefficients<I>(entries: I) -> InputResult<Self>
    where
        I: IntoIterator<Item = (Power, Coefficient)>,
    {
        // Summed in i128 so duplicates are checked against the bound, not wrapped.
        let mut by_power: BTreeMap<Power, i128> = BTreeMap::new();
        for (power, coefficient) in entries {
            if power > MAX_POWER {
                return Err(InputError::PowerOutOfRange {
                    power,
                    max_power: MAX_POWER,
                });
            }
            *by_power.entry(power).or_insert(0) += i128::from(coefficient);
        }
        let mut terms = Vec::with_capacity(by_power.len());
        for (power, sum) in by_power.into_iter().rev() {
            // A sum outside i64 saturates, which is already beyond the bound.
            let clamped = sum.clamp(i128::from(Coefficient::MIN), i128::from(Coefficient::MAX));
            let coefficient = check_coefficient(power, clamped as Coefficient)?;
            if coefficient != 0 {
                terms.push(Term::new(coefficient, power));
            }
        }
        Ok(Self { terms })
    }

    /// Build from arbitrary terms (any order, duplicates allowed).
    pub fn from_terms<I>(terms: I) -> InputResult<Self>
    where
        I: IntoIterator<Item = Term>,
    {
        Self::from_coefficients(terms.into_iter().map(|t| (t.power, t.coefficient)))
    }

    /// Wrap terms that are already canonical and within bounds.
    pub(crate) fn from_canonical(terms: Vec<Term>) -> Self {
        debug_assert!(terms.windows(2).all(|w| w[0].power > w[1].power));
        debug_assert!(terms.iter().all(|t| {
            !t.is_zero()
                && t.power <= MAX_POWER
                && t.coefficient.unsigned_abs() <= MAX_COEFFICIENT.unsigned_abs()
        }));
        Self { terms }
    }

    /// Terms in strictly decreasing power.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Term> {
        self.terms.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Term> + '_ {
        self.terms.iter().copied()
    }

    /// Highest power present, `None` for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> Option<Power> {
        self.terms.first().map(|t| t.power)
    }

    /// Coefficient at `power` (0 when absent).
    #[must_use]
    pub fn coefficient(&self, power: Power) -> Coefficient {
        self.terms
            .iter()
            .find(|t| t.power == power)
            .map_or(0, |t| t.coefficient)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_terms(f, &self.terms)
    }
}

impl TryFrom<Vec<Term>> for Polynomial {
    type Error = InputError;

    fn try_from(terms: Vec<Term>) -> InputResult<Self> {
        Self::from_terms(terms)
    }
}

impl From<Polynomial> for Vec<Term> {
    fn from(polynomial: Polynomial) -> Self {
        polynomial.terms
    }
}

impl<'a> IntoIterator for &'a Polynomial {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
