use crate::types::StructLayout;
use colored::Colorize;
use comfy_table::{Cell, Color, Table, presets::UTF8_FULL_CONDENSED};

pub struct TableFormatter {
    no_color: bool,
}

enum TableEntry<'a> {
    Field { offset: u64, width: u64, type_name: &'a str, name: &'a str },
    Gap { offset: u64, size: u64 },
}

impl TableEntry<'_> {
    fn offset(&self) -> u64 {
        match self {
            TableEntry::Field { offset, .. } | TableEntry::Gap { offset, .. } => *offset,
        }
    }
}

impl TableFormatter {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    pub fn format(&self, layouts: &[StructLayout]) -> String {
        let mut output = String::new();

        for (i, layout) in layouts.iter().enumerate() {
            if i > 0 {
                output.push_str("\n\n");
            }
            output.push_str(&self.format_struct(layout));
        }

        output
    }

    fn format_struct(&self, layout: &StructLayout) -> String {
        let mut output = String::new();

        let header = format!(
            "struct {} ({} bytes, align {}, {:.1}% probed)",
            layout.name, layout.size, layout.alignment, layout.metrics.coverage_percentage
        );

        if self.no_color {
            output.push_str(&header);
        } else {
            output.push_str(&header.bold().to_string());
        }
        output.push_str("\n\n");

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec!["Offset", "Width", "Type", "Field"]);

        let mut entries: Vec<TableEntry> = layout
            .fields
            .iter()
            .map(|f| TableEntry::Field {
                offset: f.offset,
                width: f.width,
                type_name: &f.type_name,
                name: &f.field,
            })
            .collect();
        entries.extend(
            layout.metrics.gaps.iter().map(|g| TableEntry::Gap { offset: g.offset, size: g.size }),
        );
        // Stable sort: fields keep table order among equal offsets.
        entries.sort_by_key(|e| e.offset());

        for entry in &entries {
            match entry {
                TableEntry::Field { offset, width, type_name, name } => {
                    table.add_row(vec![
                        Cell::new(offset),
                        Cell::new(width),
                        Cell::new(type_name),
                        Cell::new(name),
                    ]);
                }
                TableEntry::Gap { offset, size } => {
                    let cells = [
                        offset.to_string(),
                        format!("[{} bytes]", size),
                        "---".to_string(),
                        "[unprobed]".to_string(),
                    ];
                    let row: Vec<Cell> = if self.no_color {
                        cells.into_iter().map(Cell::new).collect()
                    } else {
                        cells.into_iter().map(|c| Cell::new(c).fg(Color::DarkGrey)).collect()
                    };
                    table.add_row(row);
                }
            }
        }

        output.push_str(&table.to_string());

        output.push_str(&format!(
            "\n\nSummary: {} fields, {} of {} bytes probed ({:.1}%), {} unprobed range{}\n",
            layout.fields.len(),
            layout.metrics.covered_bytes,
            layout.size,
            layout.metrics.coverage_percentage,
            layout.metrics.gaps.len(),
            if layout.metrics.gaps.len() == 1 { "" } else { "s" }
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_layout;
    use crate::types::FieldLayout;

    fn example() -> StructLayout {
        let mut layout = StructLayout::new("Example", 16, 8).with_fields(vec![
            FieldLayout::new("Example", "a", "i32", 0, 4),
            FieldLayout::new("Example", "b", "i64", 8, 8),
        ]);
        analyze_layout(&mut layout);
        layout
    }

    #[test]
    fn header_and_summary() {
        let out = TableFormatter::new(true).format(&[example()]);
        assert!(out.starts_with("struct Example (16 bytes, align 8, 75.0% probed)"));
        assert!(out.contains("Summary: 2 fields, 12 of 16 bytes probed (75.0%), 1 unprobed range\n"));
    }

    #[test]
    fn gap_rows_sit_between_fields() {
        let out = TableFormatter::new(true).format(&[example()]);
        let a = out.find("i32").expect("field a row");
        let gap = out.find("[unprobed]").expect("gap row");
        let b = out.find("i64").expect("field b row");
        assert!(a < gap && gap < b);
        assert!(out.contains("[4 bytes]"));
    }

    #[test]
    fn no_color_has_no_escape_codes() {
        let out = TableFormatter::new(true).format(&[example(), example()]);
        assert!(!out.contains('\u{1b}'));
        assert_eq!(out.matches("struct Example").count(), 2);
    }
}
