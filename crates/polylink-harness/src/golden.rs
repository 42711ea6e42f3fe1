#![forbid(unsafe_code)]

//! Golden trace checksums.
//!
//! Each scenario's trace checksum is stored under
//! `tests/golden/<scenario>.checksums`. A missing file fails verification
//! like a mismatch; run with `BLESS=1` to create or refresh them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use polylink_core::{InputResult, Operation, PolynomialForm, StepSequence, generate};

/// A named generator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenScenario {
    pub name: &'static str,
    /// Coefficients, highest power first.
    pub p1: &'static str,
    pub p2: &'static str,
    pub operation: Operation,
}

impl GoldenScenario {
    /// Build both polynomials and generate the trace.
    pub fn steps(&self) -> InputResult<StepSequence> {
        let p1 = PolynomialForm::from_coefficient_list(self.p1)?.build();
        let p2 = PolynomialForm::from_coefficient_list(self.p2)?.build();
        Ok(generate(&p1, &p2, self.operation))
    }
}

/// Scenarios covering every operation and the main edge cases.
#[must_use]
pub fn standard_scenarios() -> Vec<GoldenScenario> {
    let s = |name, p1, p2, operation| GoldenScenario {
        name,
        p1,
        p2,
        operation,
    };
    vec![
        s("add_equal_powers", "2, 0, 3", "1, 0, 5", Operation::Addition),
        s("add_interleaved", "4, 0, 0, 1", "3, 0, -2", Operation::Addition),
        s("add_cancels_to_zero", "1, -1", "-1, 1", Operation::Addition),
        s("sub_self", "3, 2, 1", "3, 2, 1", Operation::Subtraction),
        s("sub_longer_rhs", "5", "1, 0, 2", Operation::Subtraction),
        s("mul_difference_of_squares", "1, 1", "1, -1", Operation::Multiplication),
        s("mul_by_zero", "2, 1", "0", Operation::Multiplication),
        s("mul_cubic", "1, 2, 3", "4, 5", Operation::Multiplication),
    ]
}

/// Path to the golden checksum file for a scenario.
#[must_use]
pub fn golden_checksum_path(base_dir: &Path, scenario_name: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("golden")
        .join(format!("{scenario_name}.checksums"))
}

/// Load expected checksums; a missing file yields none.
pub fn load_golden_checksums(path: &Path) -> io::Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Write checksums, creating parent directories.
pub fn save_golden_checksums(path: &Path, checksums: &[String]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = format!(
        "# Golden trace checksums - regenerate with BLESS=1\n{}\n",
        checksums.join("\n")
    );
    fs::write(path, content)
}

/// Whether golden files should be rewritten instead of verified.
#[must_use]
pub fn is_bless_mode() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Outcome of comparing actual checksums to golden ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldenOutcome {
    Pass,
    /// No golden file yet.
    Missing,
    /// First differing position, or `None` on a count mismatch.
    Mismatch(Option<usize>),
}

impl GoldenOutcome {
    /// Only an exact match passes; a missing golden file does not.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, GoldenOutcome::Pass)
    }
}

/// Compare checksums position by position.
#[must_use]
pub fn verify_checksums(actual: &[String], expected: &[String]) -> GoldenOutcome {
    if expected.is_empty() {
        return GoldenOutcome::Missing;
    }
    if actual.len() != expected.len() {
        return GoldenOutcome::Mismatch(None);
    }
    match actual.iter().zip(expected).position(|(a, e)| a != e) {
        Some(idx) => GoldenOutcome::Mismatch(Some(idx)),
        None => GoldenOutcome::Pass,
    }
}
