use crate::types::{Gap, LayoutMetrics, StructLayout};

/// Computes how much of the structure the probed fields cover and where the
/// unprobed gaps lie.
pub fn analyze_layout(layout: &mut StructLayout) {
    #[derive(Clone)]
    struct Span {
        start: u64,
        end: u64,
        field: String,
    }

    let mut spans: Vec<Span> = layout
        .fields
        .iter()
        .filter(|f| f.width > 0)
        .map(|f| Span {
            start: f.offset,
            end: f.offset.saturating_add(f.width),
            field: f.field.clone(),
        })
        .collect();

    spans.sort_by_key(|s| (s.start, s.end));

    if spans.is_empty() {
        layout.metrics = LayoutMetrics { total_size: layout.size, ..LayoutMetrics::default() };
        return;
    }

    let mut gaps = Vec::new();
    let mut covered_bytes: u64 = 0;

    // Leading gap: the first probed field need not start at offset 0.
    if spans[0].start > 0 {
        gaps.push(Gap { offset: 0, size: spans[0].start, after_field: None });
    }

    // Merge overlapping spans so shared bytes are counted once.
    let mut current_start = spans[0].start;
    let mut current_end = spans[0].end;
    let mut current_end_field = spans[0].field.clone();

    for span in spans.into_iter().skip(1) {
        if span.start > current_end {
            covered_bytes = covered_bytes.saturating_add(current_end - current_start);
            gaps.push(Gap {
                offset: current_end,
                size: span.start - current_end,
                after_field: Some(current_end_field.clone()),
            });

            current_start = span.start;
            current_end = span.end;
            current_end_field = span.field;
            continue;
        }

        if span.end >= current_end {
            current_end = span.end;
            current_end_field = span.field;
        }
    }

    covered_bytes = covered_bytes.saturating_add(current_end - current_start);

    if current_end < layout.size {
        gaps.push(Gap {
            offset: current_end,
            size: layout.size - current_end,
            after_field: Some(current_end_field),
        });
    }

    let coverage_percentage = if layout.size > 0 {
        (covered_bytes.min(layout.size) as f64 / layout.size as f64) * 100.0
    } else {
        0.0
    };

    layout.metrics =
        LayoutMetrics { total_size: layout.size, covered_bytes, coverage_percentage, gaps };
}
