#![forbid(unsafe_code)]

//! C++-style pseudocode shown next to each step.
//!
//! Every [`CodeRef`] maps to a short block of lines; a step's `line` selects
//! the active one. A line index past the end of the block highlights
//! nothing (the combine phase points at line 1 of a one-line block).

use polylink_core::{CodeRef, Operation};

/// Placeholder shown before any step has run.
pub const PLACEHOLDER: &str = "// C++ code will be highlighted here.";

/// Lines of the pseudocode block for `code`.
#[must_use]
pub fn snippet(code: CodeRef) -> &'static [&'static str] {
    match code {
        CodeRef::AddSubStart => &[
            "struct Node { ... };",
            "Node* operate(Node* p1, Node* p2) {",
            "   Node* resultHead = nullptr;",
            "   Node* current = nullptr;",
        ],
        CodeRef::AddSubLoop => &["   while (p1 != nullptr && p2 != nullptr) {"],
        CodeRef::AddEqual => &[
            "   int sum = p1->coeff + p2->coeff;",
            "   // ... create and append new node ...",
            "   p1 = p1->next;",
            "   p2 = p2->next;",
        ],
        CodeRef::SubEqual => &[
            "   int diff = p1->coeff - p2->coeff;",
            "   // ... create and append new node ...",
            "   p1 = p1->next;",
            "   p2 = p2->next;",
        ],
        CodeRef::P1Greater => &[
            "   } else if (p1->power > p2->power) {",
            "       // ... append node from p1 ...",
            "       p1 = p1->next;",
        ],
        CodeRef::P2Greater => &[
            "   } else {",
            "       // ... append node from p2 ...",
            "       p2 = p2->next;",
        ],
        CodeRef::SubP2Greater => &[
            "   } else {",
            "       // ... append NEGATED node from p2 ...",
            "       p2 = p2->next;",
        ],
        CodeRef::P1Remainder => &[
            "   while (p1 != nullptr) {",
            "   // ... append node from p1 ...",
            "   p1 = p1->next;",
        ],
        CodeRef::P2Remainder => &[
            "   while (p2 != nullptr) {",
            "   // ... append node from p2 ...",
            "   p2 = p2->next;",
        ],
        CodeRef::SubP2Remainder => &[
            "   while (p2 != nullptr) {",
            "   // ... append NEGATED node from p2 ...",
            "   p2 = p2->next;",
        ],
        CodeRef::MultOuterLoop => &[
            "Node* multiply(Node* p1, Node* p2) { ...",
            "   for (Node* t1 = p1; t1 != nullptr; t1 = t1->next) {",
        ],
        CodeRef::MultInnerLoop => &["       for (Node* t2 = p2; t2 != nullptr; t2 = t2->next) {"],
        CodeRef::MultCalc => &[
            "           int newCoeff = t1->coeff * t2->coeff;",
            "           int newPower = t1->power + t2->power;",
            "           // Add to intermediate list...",
        ],
        CodeRef::MultCombine => &["   // After loops, combine like terms..."],
        CodeRef::End => &["   }", "   return resultHead;"],
    }
}

/// One pseudocode line with its highlight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLine {
    pub text: &'static str,
    pub active: bool,
}

/// The block for `code` with line `line` marked active.
pub fn annotated(code: CodeRef, line: usize) -> impl Iterator<Item = CodeLine> {
    snippet(code)
        .iter()
        .enumerate()
        .map(move |(idx, text)| CodeLine {
            text,
            active: idx == line,
        })
}

/// The highlighted line, if `line` falls inside the block.
#[must_use]
pub fn active_line(code: CodeRef, line: usize) -> Option<&'static str> {
    snippet(code).get(line).copied()
}

/// Time complexity of the linked-list algorithm behind `op`.
#[must_use]
pub const fn complexity_label(op: Operation) -> &'static str {
    match op {
        Operation::Addition | Operation::Subtraction => "O(m + n)",
        Operation::Multiplication => "O(m * n)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_has_lines() {
        for code in CodeRef::ALL {
            assert!(!snippet(code).is_empty(), "{code} has no lines");
        }
    }

    #[test]
    fn annotated_marks_single_line() {
        let lines: Vec<_> = annotated(CodeRef::AddEqual, 2).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines.iter().filter(|l| l.active).count(), 1);
        assert!(lines[2].active);
        assert_eq!(lines[2].text, "   p1 = p1->next;");
    }

    #[test]
    fn out_of_range_line_highlights_nothing() {
        assert!(annotated(CodeRef::MultCombine, 1).all(|l| !l.active));
        assert_eq!(active_line(CodeRef::MultCombine, 1), None);
        assert_eq!(
            active_line(CodeRef::End, 1),
            Some("   return resultHead;")
        );
    }

    #[test]
    fn complexity_by_operation() {
        assert_eq!(complexity_label(Operation::Addition), "O(m + n)");
        assert_eq!(complexity_label(Operation::Subtraction), "O(m + n)");
        assert_eq!(complexity_label(Operation::Multiplication), "O(m * n)");
    }
}
