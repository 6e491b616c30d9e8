//! Reading probe lines back, typically from the C program that prints the same
//! `[Structure::field @ offset-width]` lines from the real header.

use crate::error::{Error, Result};
use crate::types::FieldLayout;
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProbeLine {
    pub structure: String,
    pub field: String,
    pub offset: u64,
    pub width: u64,
}

impl ProbeLine {
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.structure, self.field)
    }

    pub fn matches(&self, field: &FieldLayout) -> bool {
        self.offset == field.offset && self.width == field.width
    }
}

impl fmt::Display for ProbeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}::{} @ {}-{}]", self.structure, self.field, self.offset, self.width)
    }
}

impl From<&FieldLayout> for ProbeLine {
    fn from(field: &FieldLayout) -> Self {
        Self {
            structure: field.structure.clone(),
            field: field.field.clone(),
            offset: field.offset,
            width: field.width,
        }
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Plain unsigned decimal. `u64::from_str` would also take a leading `+`.
fn parse_decimal(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parses one probe line. Returns `None` when the text is not a well-formed
/// probe line.
pub fn parse_line(line: &str) -> Option<ProbeLine> {
    let inner = line.trim().strip_prefix('[')?.strip_suffix(']')?;
    let (name, position) = inner.split_once(" @ ")?;
    let (structure, field) = name.split_once("::")?;
    let (offset, width) = position.split_once('-')?;

    if !is_identifier(structure) || !is_identifier(field) {
        return None;
    }

    Some(ProbeLine {
        structure: structure.to_string(),
        field: field.to_string(),
        offset: parse_decimal(offset)?,
        width: parse_decimal(width)?,
    })
}

/// Parses every probe line in `text`.
///
/// Lines that do not look like probe lines at all are skipped, since build
/// tools and shells interleave their own output. A line that starts like a
/// probe line (`[` ... ` @ `) but does not parse is an error.
pub fn parse_probe_output(text: &str) -> Result<Vec<ProbeLine>> {
    let mut lines = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if !(trimmed.starts_with('[') && trimmed.contains(" @ ")) {
            continue;
        }
        match parse_line(trimmed) {
            Some(line) => lines.push(line),
            None => return Err(Error::Parse { line: idx + 1, content: trimmed.to_string() }),
        }
    }

    Ok(lines)
}

/// Reads probe output from `path`, or from stdin when `path` is `-`.
pub fn read_probe_output(path: &Path) -> Result<Vec<ProbeLine>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    parse_probe_output(&text)
}
