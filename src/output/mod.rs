mod json;
mod probe;
mod table;
mod verify;

pub use json::JsonFormatter;
pub use probe::ProbeFormatter;
pub use table::TableFormatter;
pub use verify::{VerifyJsonFormatter, VerifyTableFormatter};
