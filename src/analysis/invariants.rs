use crate::types::{FieldLayout, StructLayout};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LayoutViolation {
    pub structure: String,
    pub kind: LayoutViolationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LayoutViolationKind {
    /// A field extends past the end of its structure.
    OutOfBounds,
    /// A field's offset is lower than that of a field listed before it.
    OutOfOrder,
    /// Two probed fields share bytes.
    Overlap,
}

/// Checks the layout rules every probed structure must satisfy: fields lie
/// inside the structure, appear at non-decreasing offsets in table order, and
/// do not overlap.
pub fn check_invariants(layout: &StructLayout) -> Vec<LayoutViolation> {
    let mut violations = Vec::new();

    let violation = |kind, message| LayoutViolation {
        structure: layout.name.clone(),
        kind,
        message,
    };

    for field in &layout.fields {
        match field.end_offset() {
            Some(end) if end <= layout.size => {}
            _ => violations.push(violation(
                LayoutViolationKind::OutOfBounds,
                format!(
                    "{}: {} bytes at offset {} exceed struct size {}",
                    field.qualified_name(),
                    field.width,
                    field.offset,
                    layout.size
                ),
            )),
        }
    }

    for pair in layout.fields.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.offset < prev.offset {
            violations.push(violation(
                LayoutViolationKind::OutOfOrder,
                format!(
                    "{} at offset {} is listed after {} at offset {}",
                    next.qualified_name(),
                    next.offset,
                    prev.qualified_name(),
                    prev.offset
                ),
            ));
        }
    }

    // Furthest end among the non-empty fields seen so far, and its owner.
    // Fields below the owner's offset are already reported as out of order.
    let mut covered: Option<(u64, &FieldLayout)> = None;

    for field in &layout.fields {
        if field.width == 0 {
            continue;
        }

        if let Some((max_end, owner)) = covered
            && field.offset >= owner.offset
            && field.offset < max_end
        {
            violations.push(violation(
                LayoutViolationKind::Overlap,
                format!(
                    "{} (offset {}) overlaps {} (bytes {}..{})",
                    field.qualified_name(),
                    field.offset,
                    owner.qualified_name(),
                    owner.offset,
                    max_end
                ),
            ));
        }

        let end = field.end_offset().unwrap_or(u64::MAX);
        if covered.is_none_or(|(max_end, _)| end > max_end) {
            covered = Some((end, field));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: u64, fields: &[(&str, u64, u64)]) -> StructLayout {
        StructLayout::new("S", size, 8).with_fields(
            fields.iter().map(|(n, o, w)| FieldLayout::new("S", *n, "u8", *o, *w)).collect(),
        )
    }

    #[test]
    fn well_formed_layout_has_no_violations() {
        assert!(check_invariants(&layout(16, &[("a", 0, 4), ("b", 8, 8)])).is_empty());
    }

    #[test]
    fn field_past_end_is_out_of_bounds() {
        let v = check_invariants(&layout(12, &[("a", 0, 4), ("b", 8, 8)]));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, LayoutViolationKind::OutOfBounds);
        assert!(v[0].message.contains("S::b"));
    }

    #[test]
    fn overflowing_end_is_out_of_bounds() {
        let v = check_invariants(&layout(u64::MAX, &[("a", u64::MAX, 2)]));
        assert_eq!(v[0].kind, LayoutViolationKind::OutOfBounds);
    }

    #[test]
    fn decreasing_offset_is_out_of_order() {
        let v = check_invariants(&layout(16, &[("b", 8, 8), ("a", 0, 4)]));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, LayoutViolationKind::OutOfOrder);
    }

    #[test]
    fn shared_bytes_are_an_overlap() {
        let v = check_invariants(&layout(16, &[("a", 0, 8), ("b", 4, 4)]));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, LayoutViolationKind::Overlap);
    }

    #[test]
    fn zero_width_fields_never_overlap() {
        assert!(check_invariants(&layout(8, &[("a", 0, 8), ("tail", 8, 0)])).is_empty());
        assert!(check_invariants(&layout(8, &[("zst", 0, 0), ("a", 0, 8)])).is_empty());
    }

    #[test]
    fn zero_width_field_does_not_hide_an_overlap() {
        let v = check_invariants(&layout(16, &[("a", 0, 16), ("zst", 4, 0), ("c", 8, 4)]));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].kind, LayoutViolationKind::Overlap);
        assert!(v[0].message.contains("S::c"));
        assert!(v[0].message.contains("S::a (bytes 0..16)"));
    }

    #[test]
    fn overlap_with_an_earlier_wide_field_is_reported() {
        let v = check_invariants(&layout(16, &[("a", 0, 16), ("b", 4, 2), ("c", 8, 4)]));
        assert_eq!(v.iter().filter(|v| v.kind == LayoutViolationKind::Overlap).count(), 2);
    }
}
