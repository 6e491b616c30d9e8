mod coverage;
mod invariants;

pub use coverage::analyze_layout;
pub use invariants::{LayoutViolation, LayoutViolationKind, check_invariants};
