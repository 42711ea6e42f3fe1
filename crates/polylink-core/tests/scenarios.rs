//! Worked examples for each operation, checked step by step.

use polylink_core::{
    CodeRef, Operation, Polynomial, PolynomialForm, Source, StepKind, Term, generate, replay,
};

fn form(list: &str) -> Polynomial {
    PolynomialForm::from_coefficient_list(list)
        .expect("valid coefficient list")
        .build()
}

#[test]
fn addition_matching_powers_merge_pairwise() {
    // (2x^2 + 3) + (x^2 + 5) = 3x^2 + 8
    let a = form("2, 0, 3");
    let b = form("1, 0, 5");
    let steps = generate(&a, &b, Operation::Addition);

    let merges: Vec<Term> = steps
        .iter()
        .filter_map(|s| match s.kind {
            StepKind::AddNode {
                source: Source::Merge,
                term,
                ..
            } => Some(term),
            _ => None,
        })
        .collect();
    assert_eq!(merges, [Term::new(3, 2), Term::new(8, 0)]);

    let copies = steps
        .iter()
        .filter(|s| {
            matches!(
                s.kind,
                StepKind::AddNode {
                    source: Source::P1 | Source::P2,
                    ..
                }
            )
        })
        .count();
    assert_eq!(copies, 0);
    assert_eq!(steps.count("highlight"), 2);
    assert_eq!(steps.count("end"), 1);
    assert_eq!(steps.len(), 6);

    // Every merge is directly preceded by its highlight.
    for (idx, step) in steps.iter().enumerate() {
        if let StepKind::AddNode { p1, p2, .. } = step.kind {
            assert_eq!(steps[idx - 1].kind, StepKind::Highlight { p1, p2 });
        }
    }

    assert_eq!(replay(&steps).to_string(), "3x^2 + 8");
}

#[test]
fn multiplication_merges_adjacent_like_terms_once() {
    // (x + 1)(x - 1) = x^2 - 1
    let a = form("1, 1");
    let b = form("1, -1");
    let steps = generate(&a, &b, Operation::Multiplication);

    let last_snapshot = steps
        .iter()
        .rev()
        .find_map(|s| match &s.kind {
            StepKind::ShowIntermediate { terms } => Some(terms.clone()),
            _ => None,
        })
        .expect("snapshot present");
    assert_eq!(
        last_snapshot,
        [
            Term::new(1, 2),
            Term::new(-1, 1),
            Term::new(1, 1),
            Term::new(-1, 0)
        ]
    );

    assert_eq!(steps.count("update_node"), 1);
    assert_eq!(steps.count("start_combine"), 1);

    // Combine pass walks powers in non-increasing order.
    let combine_powers: Vec<u32> = steps
        .iter()
        .skip_while(|s| s.kind != StepKind::StartCombine)
        .filter_map(|s| match s.kind {
            StepKind::AddNode { term, .. } | StepKind::UpdateNode { term, .. } => Some(term.power),
            _ => None,
        })
        .collect();
    assert_eq!(combine_powers, [2, 1, 1, 0]);

    let update = steps
        .iter()
        .find_map(|s| match s.kind {
            StepKind::UpdateNode { index, term } => Some((index, term)),
            _ => None,
        })
        .expect("update present");
    assert_eq!(update, (1, Term::new(0, 1)));

    let result = replay(&steps);
    assert_eq!(result.slots().len(), 3, "zero sum keeps its slot");
    assert_eq!(result.to_string(), "x^2 - 1");
}

#[test]
fn subtraction_of_equal_polynomials_is_empty() {
    let a = form("4, -2, 7");
    let steps = generate(&a, &a, Operation::Subtraction);
    assert!(replay(&steps).slots().is_empty());
    assert!(steps.iter().all(|s| !s.materializes()));
    assert_eq!(steps.count("add_node"), 3);
}

#[test]
fn pseudocode_references_follow_the_branch_taken() {
    // (x^2 + 1) - 3
    let a = form("1, 0, 1");
    let b = form("3");
    let codes: Vec<CodeRef> = generate(&a, &b, Operation::Subtraction)
        .iter()
        .map(|s| s.code)
        .collect();
    assert_eq!(
        codes,
        [
            CodeRef::AddSubStart,
            CodeRef::AddSubLoop,
            CodeRef::P1Greater,
            CodeRef::AddSubLoop,
            CodeRef::SubEqual,
            CodeRef::End,
        ]
    );
}

#[test]
fn multiplication_commentary_uses_raw_terms() {
    let steps = generate(&form("2, 0"), &form("3"), Operation::Multiplication);
    let texts: Vec<&str> = steps.iter().map(|s| s.commentary.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Starting multiplication.",
            "Outer loop: selecting term 2x^1 from Poly 1.",
            "Inner loop: multiplying by 3x^0 from Poly 2.",
            "Result is 6x^1. Adding to intermediate list.",
            "All products calculated. Now, combining like terms.",
            "Adding new term 6x^1 to final result.",
            "Multiplication complete.",
        ]
    );
}
