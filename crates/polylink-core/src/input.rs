#![forbid(unsafe_code)]

//! Validated polynomial entry.
//!
//! Mirrors a two-stage form: first a maximum power, then one coefficient
//! per power from that maximum down to zero. Everything that reaches the
//! generator has passed through here, so the generator itself never fails.
//!
//! | Error | Cause |
//! |-------|-------|
//! | [`InputError::InvalidMaxPower`] | not an integer in `0..=MAX_POWER` |
//! | [`InputError::PowerOutOfRange`] | power above the form's maximum or [`MAX_POWER`] |
//! | [`InputError::InvalidCoefficient`] | coefficient text is not an integer |
//! | [`InputError::CoefficientOutOfRange`] | magnitude above [`MAX_COEFFICIENT`] |
//! | [`InputError::UnknownOperation`] | unrecognized operation name |

use std::fmt;

use crate::term::{Coefficient, Polynomial, Power, Term};

/// Largest power the form accepts.
pub const MAX_POWER: Power = 50;

/// Largest coefficient magnitude the form accepts.
///
/// With [`MAX_POWER`] this keeps every product and combined sum far inside
/// `i64`.
pub const MAX_COEFFICIENT: Coefficient = 1_000_000;

// =============================================================================
// Error Types
// =============================================================================

/// Rejected polynomial input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Maximum power text was not an integer in range.
    InvalidMaxPower(String),
    /// A power above the form's maximum, or above [`MAX_POWER`].
    PowerOutOfRange { power: Power, max_power: Power },
    /// Coefficient text was not an integer.
    InvalidCoefficient { power: Power, text: String },
    /// Coefficient magnitude exceeds [`MAX_COEFFICIENT`].
    CoefficientOutOfRange { power: Power, value: Coefficient },
    /// Operation name not recognized.
    UnknownOperation(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::InvalidMaxPower(text) => write!(
                f,
                "invalid max power {text:?}: enter a power between 0 and {MAX_POWER}"
            ),
            InputError::PowerOutOfRange { power, max_power } => {
                write!(f, "power {power} exceeds the max power {max_power}")
            }
            InputError::InvalidCoefficient { power, text } => {
                write!(f, "coefficient of x^{power} is not an integer: {text:?}")
            }
            InputError::CoefficientOutOfRange { power, value } => write!(
                f,
                "coefficient of x^{power} out of range: {value} (limit ±{MAX_COEFFICIENT})"
            ),
            InputError::UnknownOperation(name) => write!(
                f,
                "unknown operation {name:?}: expected addition, subtraction or multiplication"
            ),
        }
    }
}

impl std::error::Error for InputError {}

/// Result alias for input validation.
pub type InputResult<T> = Result<T, InputError>;

// =============================================================================
// Parsing
// =============================================================================

/// Parse the maximum-power field.
pub fn parse_max_power(text: &str) -> InputResult<Power> {
    text.trim()
        .parse::<Power>()
        .ok()
        .filter(|&p| p <= MAX_POWER)
        .ok_or_else(|| InputError::InvalidMaxPower(text.to_string()))
}

fn parse_coefficient(power: Power, text: &str) -> InputResult<Coefficient> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let value = trimmed
        .parse::<Coefficient>()
        .map_err(|_| InputError::InvalidCoefficient {
            power,
            text: text.to_string(),
        })?;
    check_coefficient(power, value)
}

pub(crate) fn check_coefficient(power: Power, value: Coefficient) -> InputResult<Coefficient> {
    if value.unsigned_abs() > MAX_COEFFICIENT.unsigned_abs() {
        return Err(InputError::CoefficientOutOfRange { power, value });
    }
    Ok(value)
}

// =============================================================================
// PolynomialForm
// =============================================================================

/// One coefficient slot per power, highest power first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolynomialForm {
    max_power: Power,
    /// `slots[i]` holds the coefficient of `x^(max_power - i)`.
    slots: Vec<Coefficient>,
}

impl PolynomialForm {
    /// A form with every coefficient at zero.
    pub fn new(max_power: Power) -> InputResult<Self> {
        if max_power > MAX_POWER {
            return Err(InputError::InvalidMaxPower(max_power.to_string()));
        }
        Ok(Self {
            max_power,
            slots: vec![0; max_power as usize + 1],
        })
    }

    /// Parse a comma- or whitespace-separated list, highest power first.
    ///
    /// `"2, 0, 3"` is `2x^2 + 3`. Blank entries count as zero.
    pub fn from_coefficient_list(text: &str) -> InputResult<Self> {
        let fields: Vec<&str> = if text.contains(',') {
            text.split(',').collect()
        } else {
            text.split_whitespace().collect()
        };
        let count = fields.len().max(1);
        let max_power = Power::try_from(count - 1)
            .map_err(|_| InputError::InvalidMaxPower((count - 1).to_string()))?;
        let mut form = Self::new(max_power)?;
        for (i, field) in fields.iter().enumerate() {
            // i < count, so the subtraction cannot underflow.
            let power = max_power - i as Power;
            form.set_text(power, field)?;
        }
        Ok(form)
    }

    #[must_use]
    pub fn max_power(&self) -> Power {
        self.max_power
    }

    /// Set one coefficient.
    pub fn set(&mut self, power: Power, coefficient: Coefficient) -> InputResult<()> {
        let index = self.slot(power)?;
        self.slots[index] = check_coefficient(power, coefficient)?;
        Ok(())
    }

    /// Set one coefficient from text. Blank text means zero.
    pub fn set_text(&mut self, power: Power, text: &str) -> InputResult<()> {
        let index = self.slot(power)?;
        self.slots[index] = parse_coefficient(power, text)?;
        Ok(())
    }

    #[must_use]
    pub fn get(&self, power: Power) -> Option<Coefficient> {
        self.slot(power).ok().map(|i| self.slots[i])
    }

    /// The canonical polynomial (zero coefficients dropped).
    #[must_use]
    pub fn build(&self) -> Polynomial {
        // Slots are highest power first and each one passed `check_coefficient`.
        Polynomial::from_canonical(
            self.slots
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c != 0)
                .map(|(i, &c)| Term::new(c, self.max_power - i as Power))
                .collect(),
        )
    }

    fn slot(&self, power: Power) -> InputResult<usize> {
        if power > self.max_power {
            return Err(InputError::PowerOutOfRange {
                power,
                max_power: self.max_power,
            });
        }
        Ok((self.max_power - power) as usize)
    }
}
