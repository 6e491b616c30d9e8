use crate::types::StructLayout;

/// One `[Structure::field @ offset-width]` line per probed field.
pub struct ProbeFormatter;

impl ProbeFormatter {
    pub fn format(&self, layouts: &[StructLayout]) -> String {
        layouts
            .iter()
            .flat_map(|l| &l.fields)
            .map(|f| format!("{}\n", f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldLayout;

    #[test]
    fn one_line_per_field_in_order() {
        let a = StructLayout::new("A", 16, 8).with_fields(vec![
            FieldLayout::new("A", "x", "i32", 0, 4),
            FieldLayout::new("A", "y", "i64", 8, 8),
        ]);
        let b = StructLayout::new("B", 1, 1)
            .with_fields(vec![FieldLayout::new("B", "z", "u8", 0, 1)]);

        assert_eq!(
            ProbeFormatter.format(&[a, b]),
            "[A::x @ 0-4]\n[A::y @ 8-8]\n[B::z @ 0-1]\n"
        );
    }

    #[test]
    fn no_fields_no_output() {
        assert_eq!(ProbeFormatter.format(&[StructLayout::new("A", 0, 1)]), "");
    }
}
