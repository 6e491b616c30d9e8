//! Comparing the binding's layout against probe lines printed from C.

use crate::parse::ProbeLine;
use crate::types::{FieldLayout, StructLayout};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize, Default)]
pub struct VerifyResult {
    pub matching: Vec<ProbeLine>,
    pub mismatched: Vec<FieldMismatch>,
    /// Rust-side fields with no C-side line.
    pub missing: Vec<ProbeLine>,
    /// C-side lines with no Rust-side field. Informational only.
    pub extra: Vec<ProbeLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldMismatch {
    pub name: String,
    pub rust: ProbeLine,
    pub c: ProbeLine,
    pub kind: MismatchKind,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    OffsetChanged,
    WidthChanged,
    OffsetAndWidthChanged,
}

impl FieldMismatch {
    /// One-line description naming both positions.
    pub fn message(&self) -> String {
        format!(
            "Struct field position as specified in Rust code ({}) is different from C ({})",
            self.rust, self.c
        )
    }
}

impl VerifyResult {
    pub fn is_consistent(&self) -> bool {
        self.mismatched.is_empty() && self.missing.is_empty()
    }
}

fn mismatch_kind(rust: &FieldLayout, c: &ProbeLine) -> Option<MismatchKind> {
    match (rust.offset != c.offset, rust.width != c.width) {
        (false, false) => None,
        (true, false) => Some(MismatchKind::OffsetChanged),
        (false, true) => Some(MismatchKind::WidthChanged),
        (true, true) => Some(MismatchKind::OffsetAndWidthChanged),
    }
}

/// Checks every probed Rust field against the C-side line of the same name.
///
/// When C printed the same field more than once, the first line wins.
pub fn verify_layouts(rust: &[StructLayout], c_lines: &[ProbeLine]) -> VerifyResult {
    let mut c_map: HashMap<String, &ProbeLine> = HashMap::new();
    for line in c_lines {
        c_map.entry(line.qualified_name()).or_insert(line);
    }

    let mut result = VerifyResult::default();
    let mut seen = HashSet::new();

    for field in rust.iter().flat_map(|l| &l.fields) {
        let name = field.qualified_name();
        let rust_line = ProbeLine::from(field);

        match c_map.get(&name) {
            None => result.missing.push(rust_line),
            Some(c) => match mismatch_kind(field, c) {
                None => result.matching.push(rust_line),
                Some(kind) => result.mismatched.push(FieldMismatch {
                    name: name.clone(),
                    rust: rust_line,
                    c: (*c).clone(),
                    kind,
                }),
            },
        }
        seen.insert(name);
    }

    for line in c_lines {
        let name = line.qualified_name();
        if !seen.contains(&name) {
            seen.insert(name);
            result.extra.push(line.clone());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rust_layout() -> StructLayout {
        StructLayout::new("Example", 16, 8).with_fields(vec![
            FieldLayout::new("Example", "a", "i32", 0, 4),
            FieldLayout::new("Example", "b", "i64", 8, 8),
        ])
    }

    fn line(field: &str, offset: u64, width: u64) -> ProbeLine {
        ProbeLine { structure: "Example".to_string(), field: field.to_string(), offset, width }
    }

    #[test]
    fn identical_output_is_consistent() {
        let result = verify_layouts(&[rust_layout()], &[line("a", 0, 4), line("b", 8, 8)]);
        assert!(result.is_consistent());
        assert_eq!(result.matching.len(), 2);
        assert!(result.extra.is_empty());
    }

    #[test]
    fn offset_difference_is_reported() {
        let result = verify_layouts(&[rust_layout()], &[line("a", 0, 4), line("b", 4, 8)]);
        assert!(!result.is_consistent());
        assert_eq!(result.mismatched.len(), 1);
        let m = &result.mismatched[0];
        assert_eq!(m.kind, MismatchKind::OffsetChanged);
        assert_eq!(
            m.message(),
            "Struct field position as specified in Rust code ([Example::b @ 8-8]) \
             is different from C ([Example::b @ 4-8])"
        );
    }

    #[test]
    fn width_difference_is_reported() {
        let result = verify_layouts(&[rust_layout()], &[line("a", 0, 8), line("b", 8, 8)]);
        assert_eq!(result.mismatched[0].kind, MismatchKind::WidthChanged);
    }

    #[test]
    fn missing_c_line_is_inconsistent() {
        let result = verify_layouts(&[rust_layout()], &[line("a", 0, 4)]);
        assert!(!result.is_consistent());
        assert_eq!(result.missing.len(), 1);
        assert_eq!(result.missing[0].field, "b");
    }

    #[test]
    fn extra_c_lines_are_informational() {
        let result = verify_layouts(
            &[rust_layout()],
            &[line("a", 0, 4), line("b", 8, 8), line("c", 16, 4), line("c", 16, 4)],
        );
        assert!(result.is_consistent());
        assert_eq!(result.extra.len(), 1);
    }

    #[test]
    fn first_duplicate_c_line_wins() {
        let result = verify_layouts(
            &[rust_layout()],
            &[line("a", 0, 4), line("a", 4, 4), line("b", 8, 8)],
        );
        assert!(result.is_consistent());
    }
}
