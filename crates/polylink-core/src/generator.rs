#![forbid(unsafe_code)]

//! Step generation for linked-list polynomial arithmetic.
//!
//! [`generate`] maps two polynomials and an [`Operation`] to a complete,
//! immutable [`StepSequence`]. Generation is pure and deterministic: the
//! same inputs always produce the same steps.
//!
//! # Algorithms
//!
//! - **Addition / subtraction**: sorted merge over two cursors, O(m + n).
//!   Equal powers always combine; the larger power is copied otherwise;
//!   the leftover tail of either list is drained at the end. Terms taken
//!   from the second list are negated under subtraction.
//! - **Multiplication**: every ordered pair `(i, j)` contributes one product
//!   to an intermediate list, O(m · n). The list is then stable-sorted by
//!   decreasing power, which makes like powers adjacent, and a single
//!   linear pass combines them into the result.
//!
//! Operand terms are bounded by [`Polynomial`]'s invariants, so plain `i64`
//! arithmetic is exact here: no product wraps to zero and no `AddNode` in
//! the combine pass carries a zero coefficient.

use tracing::debug;

use crate::operation::Operation;
use crate::step::{CodeRef, Source, Step, StepKind, StepSequence};
use crate::term::{Polynomial, Term};

/// Generate the full step trace for `op` applied to `p1` and `p2`.
#[must_use]
pub fn generate(p1: &Polynomial, p2: &Polynomial, op: Operation) -> StepSequence {
    let steps = match op {
        Operation::Addition | Operation::Subtraction => merge_steps(p1, p2, op),
        Operation::Multiplication => multiply_steps(p1, p2),
    };
    debug!(
        operation = op.name(),
        p1_terms = p1.len(),
        p2_terms = p2.len(),
        steps = steps.len(),
        "generated step sequence"
    );
    StepSequence::from(steps)
}

// =============================================================================
// Merge (addition / subtraction)
// =============================================================================

fn merge_steps(p1: &Polynomial, p2: &Polynomial, op: Operation) -> Vec<Step> {
    let subtract = matches!(op, Operation::Subtraction);
    let a = p1.terms();
    let b = p2.terms();
    let mut steps = Vec::with_capacity(2 * (a.len() + b.len()) + 2);
    let (mut i, mut j) = (0usize, 0usize);

    steps.push(Step::new(
        StepKind::Start,
        "Start of function. Pointers p1 and p2 are set to the heads of the two lists.",
        CodeRef::AddSubStart,
        1,
    ));

    while i < a.len() && j < b.len() {
        let (t1, t2) = (a[i], b[j]);
        steps.push(Step::new(
            StepKind::Highlight {
                p1: Some(i),
                p2: Some(j),
            },
            "Comparing nodes pointed to by p1 and p2.",
            CodeRef::AddSubLoop,
            0,
        ));

        if t1.power == t2.power {
            let coefficient = if subtract {
                t1.coefficient - t2.coefficient
            } else {
                t1.coefficient + t2.coefficient
            };
            let code = if subtract {
                CodeRef::SubEqual
            } else {
                CodeRef::AddEqual
            };
            steps.push(Step::new(
                StepKind::AddNode {
                    source: Source::Merge,
                    term: Term::new(coefficient, t1.power),
                    p1: Some(i),
                    p2: Some(j),
                },
                format!(
                    "Powers are equal. Calculating coefficients ({} {} {} = {}).",
                    t1.coefficient,
                    op.symbol(),
                    t2.coefficient,
                    coefficient
                ),
                code,
                0,
            ));
            i += 1;
            j += 1;
        } else if t1.power > t2.power {
            steps.push(Step::new(
                StepKind::AddNode {
                    source: Source::P1,
                    term: t1,
                    p1: Some(i),
                    p2: None,
                },
                format!("p1's power ({}) is greater. Copying node from p1.", t1.power),
                CodeRef::P1Greater,
                0,
            ));
            i += 1;
        } else {
            let (term, commentary, code) = if subtract {
                (
                    t2.negated(),
                    format!(
                        "p2's power ({}) is greater. Copying NEGATED node from p2.",
                        t2.power
                    ),
                    CodeRef::SubP2Greater,
                )
            } else {
                (
                    t2,
                    format!("p2's power ({}) is greater. Copying node from p2.", t2.power),
                    CodeRef::P2Greater,
                )
            };
            steps.push(Step::new(
                StepKind::AddNode {
                    source: Source::P2,
                    term,
                    p1: None,
                    p2: Some(j),
                },
                commentary,
                code,
                0,
            ));
            j += 1;
        }
    }

    for (i, &t1) in a.iter().enumerate().skip(i) {
        steps.push(Step::new(
            StepKind::Highlight {
                p1: Some(i),
                p2: None,
            },
            "List 2 is empty. Processing remainder of List 1.",
            CodeRef::P1Remainder,
            0,
        ));
        steps.push(Step::new(
            StepKind::AddNode {
                source: Source::P1,
                term: t1,
                p1: Some(i),
                p2: None,
            },
            format!("Copying remaining node {} from List 1.", t1.raw()),
            CodeRef::P1Remainder,
            1,
        ));
    }

    for (j, &t2) in b.iter().enumerate().skip(j) {
        steps.push(Step::new(
            StepKind::Highlight {
                p1: None,
                p2: Some(j),
            },
            "List 1 is empty. Processing remainder of List 2.",
            CodeRef::P2Remainder,
            0,
        ));
        let (term, commentary, code) = if subtract {
            let negated = t2.negated();
            (
                negated,
                format!(
                    "Copying remaining NEGATED node ({}) from List 2.",
                    negated.raw()
                ),
                CodeRef::SubP2Remainder,
            )
        } else {
            (
                t2,
                format!("Copying remaining node {} from List 2.", t2.raw()),
                CodeRef::P2Remainder,
            )
        };
        steps.push(Step::new(
            StepKind::AddNode {
                source: Source::P2,
                term,
                p1: None,
                p2: Some(j),
            },
            commentary,
            code,
            1,
        ));
    }

    steps.push(Step::new(
        StepKind::End,
        "Both lists processed. Operation complete.",
        CodeRef::End,
        1,
    ));
    steps
}

// =============================================================================
// Multiplication
// =============================================================================

fn multiply_steps(p1: &Polynomial, p2: &Polynomial) -> Vec<Step> {
    let a = p1.terms();
    let b = p2.terms();
    let mut steps = Vec::with_capacity(a.len() * (2 * b.len() + 1) + 3 + a.len() * b.len());
    let mut intermediate: Vec<Term> = Vec::with_capacity(a.len() * b.len());

    steps.push(Step::new(
        StepKind::Start,
        "Starting multiplication.",
        CodeRef::MultOuterLoop,
        1,
    ));

    for (i, &t1) in a.iter().enumerate() {
        steps.push(Step::new(
            StepKind::Highlight {
                p1: Some(i),
                p2: None,
            },
            format!("Outer loop: selecting term {} from Poly 1.", t1.raw()),
            CodeRef::MultOuterLoop,
            1,
        ));
        for (j, &t2) in b.iter().enumerate() {
            steps.push(Step::new(
                StepKind::Highlight {
                    p1: Some(i),
                    p2: Some(j),
                },
                format!("Inner loop: multiplying by {} from Poly 2.", t2.raw()),
                CodeRef::MultInnerLoop,
                0,
            ));
            let product = t1.product(t2);
            intermediate.push(product);
            steps.push(Step::new(
                StepKind::ShowIntermediate {
                    terms: intermediate.clone(),
                },
                format!(
                    "Result is {}. Adding to intermediate list.",
                    product.raw()
                ),
                CodeRef::MultCalc,
                0,
            ));
        }
    }

    // Stable: equal powers keep traversal order and end up adjacent.
    intermediate.sort_by(|x, y| y.power.cmp(&x.power));

    steps.push(Step::new(
        StepKind::StartCombine,
        "All products calculated. Now, combining like terms.",
        CodeRef::MultCombine,
        1,
    ));

    let mut combined: Vec<Term> = Vec::with_capacity(intermediate.len());
    for term in intermediate {
        let placed = combined.len();
        match combined.last_mut() {
            Some(last) if last.power == term.power => {
                // A zero running sum keeps its slot.
                last.coefficient += term.coefficient;
                steps.push(Step::new(
                    StepKind::UpdateNode {
                        index: placed - 1,
                        term: *last,
                    },
                    format!(
                        "Term with power {} exists. Combining coefficients.",
                        term.power
                    ),
                    CodeRef::MultCombine,
                    1,
                ));
            }
            _ => {
                combined.push(term);
                steps.push(Step::new(
                    StepKind::AddNode {
                        source: Source::Carry,
                        term,
                        p1: None,
                        p2: None,
                    },
                    format!("Adding new term {} to final result.", term.raw()),
                    CodeRef::MultCombine,
                    1,
                ));
            }
        }
    }

    steps.push(Step::new(
        StepKind::End,
        "Multiplication complete.",
        CodeRef::End,
        1,
    ));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(entries: &[(u32, i64)]) -> Polynomial {
        Polynomial::from_coefficients(entries.iter().copied()).unwrap()
    }

    fn kinds(steps: &StepSequence) -> Vec<&'static str> {
        steps.iter().map(|s| s.kind.name()).collect()
    }

    #[test]
    fn merge_copies_larger_power_first() {
        let steps = generate(
            &poly(&[(3, 1)]),
            &poly(&[(1, 4)]),
            Operation::Addition,
        );
        assert_eq!(
            kinds(&steps),
            ["start", "highlight", "add_node", "highlight", "add_node", "end"]
        );
        assert!(matches!(
            steps[2].kind,
            StepKind::AddNode {
                source: Source::P1,
                p1: Some(0),
                p2: None,
                ..
            }
        ));
        assert_eq!(steps[2].code, CodeRef::P1Greater);
        assert_eq!(steps[3].code, CodeRef::P2Remainder);
        assert_eq!(steps[3].kind, StepKind::Highlight { p1: None, p2: Some(0) });
    }

    #[test]
    fn subtraction_negates_second_list() {
        let steps = generate(
            &poly(&[(0, 1)]),
            &poly(&[(2, 3), (0, 1)]),
            Operation::Subtraction,
        );
        let added: Vec<_> = steps
            .iter()
            .filter_map(|s| match s.kind {
                StepKind::AddNode { source, term, .. } => Some((source, term, s.code)),
                _ => None,
            })
            .collect();
        assert_eq!(
            added,
            [
                (Source::P2, Term::new(-3, 2), CodeRef::SubP2Greater),
                (Source::Merge, Term::new(0, 0), CodeRef::SubEqual),
            ]
        );
        assert!(steps[4].commentary.contains("(1 - 1 = 0)"));
    }

    #[test]
    fn zero_merge_keeps_step() {
        let steps = generate(&poly(&[(1, 2)]), &poly(&[(1, -2)]), Operation::Addition);
        assert_eq!(steps.len(), 4);
        assert!(!steps[2].materializes());
        assert_eq!(steps[2].code, CodeRef::AddEqual);
    }

    #[test]
    fn empty_inputs() {
        let zero = Polynomial::zero();
        let steps = generate(&zero, &zero, Operation::Addition);
        assert_eq!(kinds(&steps), ["start", "end"]);

        let steps = generate(&zero, &zero, Operation::Multiplication);
        assert_eq!(kinds(&steps), ["start", "start_combine", "end"]);

        let steps = generate(&poly(&[(1, 1)]), &zero, Operation::Multiplication);
        assert_eq!(kinds(&steps), ["start", "highlight", "start_combine", "end"]);
    }

    #[test]
    fn remainder_from_first_list_uses_second_sub_line() {
        let steps = generate(&poly(&[(2, 5), (0, 1)]), &Polynomial::zero(), Operation::Subtraction);
        assert_eq!(steps[1].code, CodeRef::P1Remainder);
        assert_eq!(steps[1].line, 0);
        assert_eq!(steps[2].line, 1);
        assert_eq!(steps[2].commentary, "Copying remaining node 5x^2 from List 1.");
    }

    #[test]
    fn multiplication_snapshots_accumulate() {
        let steps = generate(
            &poly(&[(1, 1), (0, 1)]),
            &poly(&[(1, 1), (0, -1)]),
            Operation::Multiplication,
        );
        let snapshots: Vec<usize> = steps
            .iter()
            .filter_map(|s| match &s.kind {
                StepKind::ShowIntermediate { terms } => Some(terms.len()),
                _ => None,
            })
            .collect();
        assert_eq!(snapshots, [1, 2, 3, 4]);
    }

    #[test]
    fn multiplication_combine_tracks_slot_index() {
        // (x^2 + x)(x + 1) = x^3 + 2x^2 + x
        let steps = generate(
            &poly(&[(2, 1), (1, 1)]),
            &poly(&[(1, 1), (0, 1)]),
            Operation::Multiplication,
        );
        let updates: Vec<_> = steps
            .iter()
            .filter_map(|s| match s.kind {
                StepKind::UpdateNode { index, term } => Some((index, term)),
                _ => None,
            })
            .collect();
        assert_eq!(updates, [(1, Term::new(2, 2))]);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = poly(&[(4, -2), (2, 7), (0, 1)]);
        let b = poly(&[(3, 5), (2, -7), (1, 1)]);
        for op in Operation::ALL {
            assert_eq!(generate(&a, &b, op), generate(&a, &b, op));
        }
    }

    #[test]
    fn bounded_extremes_multiply_exactly() {
        use crate::input::{MAX_COEFFICIENT, MAX_POWER};
        use crate::replay::replay;

        let m = MAX_COEFFICIENT;
        let a = poly(&[(MAX_POWER, m), (1, -m), (0, m)]);
        let b = poly(&[(MAX_POWER, m), (1, m), (0, -m)]);
        let steps = generate(&a, &b, Operation::Multiplication);

        let combined = steps
            .iter()
            .skip_while(|s| s.kind != StepKind::StartCombine)
            .filter_map(|s| match s.kind {
                StepKind::AddNode { term, .. } => Some(term),
                _ => None,
            });
        for term in combined {
            assert!(!term.is_zero(), "combine added a zero node: {term:?}");
        }

        // (m x^50 - m x + m)(m x^50 + m x - m)
        //   = m^2 x^100 - m^2 x^2 + 2 m^2 x - m^2
        let m2 = m * m;
        let result = replay(&steps);
        let nonzero: Vec<Term> = result.result_terms().collect();
        assert_eq!(
            nonzero,
            [
                Term::new(m2, 100),
                Term::new(-m2, 2),
                Term::new(2 * m2, 1),
                Term::new(-m2, 0),
            ]
        );
    }
}
