pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod ffi;
pub mod output;
pub mod parse;
pub mod probe;
pub mod types;

pub use analysis::{LayoutViolation, LayoutViolationKind, analyze_layout, check_invariants};
pub use catalog::{probed_layouts, probed_structs};
pub use cli::{Cli, Commands, OutputFormat, ReportFormat};
pub use config::{CheckReport, CheckViolation, CheckViolationKind, Config};
pub use diff::{FieldMismatch, MismatchKind, VerifyResult, verify_layouts};
pub use error::{Error, Result};
pub use ffi::Target;
pub use output::{
    JsonFormatter, ProbeFormatter, TableFormatter, VerifyJsonFormatter, VerifyTableFormatter,
};
pub use parse::{ProbeLine, parse_line, parse_probe_output, read_probe_output};
pub use types::{FieldLayout, Gap, LayoutMetrics, StructLayout};
