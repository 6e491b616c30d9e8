//! Pinned layout expectations for the `check` command.
//!
//! ```yaml
//! structs:
//!   AVCodecContext:
//!     max_size: 1200
//!     fields:
//!       codec_id: { offset: 56, width: 4 }
//!   "AV*":
//!     alignment: 8
//! ```

use crate::analysis::{LayoutViolationKind, check_invariants};
use crate::error::{Error, Result};
use crate::types::StructLayout;
use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub structs: IndexMap<String, Expectation>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    pub max_size: Option<u64>,
    pub alignment: Option<u64>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldPin>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
#[serde(deny_unknown_fields)]
pub struct FieldPin {
    pub offset: Option<u64>,
    pub width: Option<u64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckViolation {
    pub struct_name: String,
    pub kind: CheckViolationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckViolationKind {
    MaxSize,
    Alignment,
    FieldOffset,
    FieldWidth,
    UnknownField,
    Invariant(LayoutViolationKind),
}

/// Outcome of checking every probed structure.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub violations: Vec<CheckViolation>,
    /// Exact names in the config that match no probed structure.
    pub unmatched_names: Vec<String>,
    /// Glob patterns in the config that match no probed structure.
    pub unmatched_patterns: Vec<String>,
}

impl Expectation {
    fn validate(&self, name: &str) -> Result<()> {
        if self.max_size == Some(0) {
            return Err(Error::Config(format!(
                "expectation for '{}': max_size must be greater than 0",
                name
            )));
        }
        if let Some(align) = self.alignment
            && !align.is_power_of_two()
        {
            return Err(Error::Config(format!(
                "expectation for '{}': alignment must be a power of two (got {})",
                name, align
            )));
        }
        for (field, pin) in &self.fields {
            if pin.offset.is_none() && pin.width.is_none() {
                return Err(Error::Config(format!(
                    "expectation for '{}::{}' pins neither offset nor width",
                    name, field
                )));
            }
        }
        Ok(())
    }
}

/// Check if a pattern string contains glob metacharacters
fn is_glob_pattern(s: &str) -> bool {
    s.contains('*') || s.contains('?') || s.contains('[') || s.contains('{')
}

/// Expectations split into exact names and glob patterns.
pub struct CompiledExpectations {
    exact: HashMap<String, Expectation>,
    /// Glob patterns in declaration order
    patterns: Vec<CompiledPattern>,
}

struct CompiledPattern {
    glob: GlobMatcher,
    expectation: Expectation,
    pattern: String,
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Validates every entry and separates exact names from glob patterns.
    pub fn compile(&self) -> Result<CompiledExpectations> {
        let mut exact = HashMap::new();
        let mut patterns = Vec::new();

        for (name, expectation) in &self.structs {
            if name.is_empty() {
                return Err(Error::Config("empty struct name is not allowed".to_string()));
            }

            expectation.validate(name)?;

            if is_glob_pattern(name) {
                let glob = GlobBuilder::new(name)
                    .literal_separator(false) // * matches ::
                    .build()?
                    .compile_matcher();

                patterns.push(CompiledPattern {
                    glob,
                    expectation: expectation.clone(),
                    pattern: name.clone(),
                });
            } else {
                exact.insert(name.clone(), expectation.clone());
            }
        }

        Ok(CompiledExpectations { exact, patterns })
    }
}

impl CompiledExpectations {
    /// Finds the expectation for a struct name. Exact names take priority,
    /// then the first matching glob. The index is set for glob matches.
    pub fn find(&self, struct_name: &str) -> Option<(&Expectation, Option<usize>)> {
        if let Some(expectation) = self.exact.get(struct_name) {
            return Some((expectation, None));
        }
        self.patterns
            .iter()
            .enumerate()
            .find(|(_, p)| p.glob.is_match(struct_name))
            .map(|(i, p)| (&p.expectation, Some(i)))
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.patterns.is_empty()
    }

    /// Checks every layout against its expectation, and every layout against
    /// the structural invariants whether or not it has one.
    pub fn check(&self, layouts: &[StructLayout]) -> CheckReport {
        let mut report = CheckReport::default();
        let mut pattern_matched = vec![false; self.patterns.len()];

        for layout in layouts {
            for v in check_invariants(layout) {
                report.violations.push(CheckViolation {
                    struct_name: v.structure,
                    kind: CheckViolationKind::Invariant(v.kind),
                    message: v.message,
                });
            }

            let Some((expectation, pattern_idx)) = self.find(&layout.name) else {
                continue;
            };
            if let Some(idx) = pattern_idx {
                pattern_matched[idx] = true;
            }
            check_expectation(layout, expectation, &mut report.violations);
        }

        let names: HashSet<&str> = layouts.iter().map(|l| l.name.as_str()).collect();
        let mut unmatched: Vec<String> =
            self.exact.keys().filter(|n| !names.contains(n.as_str())).cloned().collect();
        unmatched.sort();
        report.unmatched_names = unmatched;

        report.unmatched_patterns = self
            .patterns
            .iter()
            .zip(&pattern_matched)
            .filter(|(_, matched)| !**matched)
            .map(|(p, _)| p.pattern.clone())
            .collect();

        report
    }
}

fn check_expectation(
    layout: &StructLayout,
    expectation: &Expectation,
    violations: &mut Vec<CheckViolation>,
) {
    let mut push = |kind, message| {
        violations.push(CheckViolation { struct_name: layout.name.clone(), kind, message })
    };

    if let Some(max_size) = expectation.max_size
        && layout.size > max_size
    {
        push(
            CheckViolationKind::MaxSize,
            format!(
                "{}: size {} exceeds limit {} (+{} bytes)",
                layout.name,
                layout.size,
                max_size,
                layout.size - max_size
            ),
        );
    }

    if let Some(alignment) = expectation.alignment
        && layout.alignment != alignment
    {
        push(
            CheckViolationKind::Alignment,
            format!("{}: alignment {} (expected {})", layout.name, layout.alignment, alignment),
        );
    }

    for (name, pin) in &expectation.fields {
        let Some(field) = layout.field(name) else {
            push(
                CheckViolationKind::UnknownField,
                format!("{}::{} is pinned but not probed", layout.name, name),
            );
            continue;
        };

        if let Some(offset) = pin.offset
            && field.offset != offset
        {
            push(
                CheckViolationKind::FieldOffset,
                format!("{}: offset {} (expected {})", field.qualified_name(), field.offset, offset),
            );
        }
        if let Some(width) = pin.width
            && field.width != width
        {
            push(
                CheckViolationKind::FieldWidth,
                format!("{}: width {} (expected {})", field.qualified_name(), field.width, width),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldLayout;

    fn example() -> StructLayout {
        StructLayout::new("Example", 16, 8).with_fields(vec![
            FieldLayout::new("Example", "a", "i32", 0, 4),
            FieldLayout::new("Example", "b", "i64", 8, 8),
        ])
    }

    fn compile(yaml: &str) -> CompiledExpectations {
        Config::from_yaml(yaml).expect("valid yaml").compile().expect("valid config")
    }

    #[test]
    fn matching_pins_pass() {
        let compiled = compile(
            r#"
structs:
  Example:
    max_size: 16
    alignment: 8
    fields:
      a: { offset: 0, width: 4 }
      b: { offset: 8 }
"#,
        );
        let report = compiled.check(&[example()]);
        assert!(report.violations.is_empty(), "{:?}", report.violations);
        assert!(report.unmatched_names.is_empty());
    }

    #[test]
    fn wrong_pins_are_violations() {
        let compiled = compile(
            r#"
structs:
  Example:
    max_size: 12
    fields:
      b: { offset: 4, width: 4 }
      c: { offset: 16 }
"#,
        );
        let kinds: Vec<_> = compiled.check(&[example()]).violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CheckViolationKind::MaxSize,
                CheckViolationKind::FieldOffset,
                CheckViolationKind::FieldWidth,
                CheckViolationKind::UnknownField,
            ]
        );
    }

    #[test]
    fn exact_name_beats_glob() {
        let compiled = compile(
            r#"
structs:
  "Ex*":
    max_size: 1
  Example:
    max_size: 64
"#,
        );
        let (expectation, idx) = compiled.find("Example").expect("matched");
        assert_eq!(expectation.max_size, Some(64));
        assert_eq!(idx, None);
        assert!(compiled.check(&[example()]).violations.is_empty());
    }

    #[test]
    fn first_matching_glob_wins() {
        let compiled = compile(
            r#"
structs:
  "E*":
    max_size: 64
  "Ex*":
    max_size: 1
"#,
        );
        let report = compiled.check(&[example()]);
        assert!(report.violations.is_empty());
        assert_eq!(report.unmatched_patterns, vec!["Ex*".to_string()]);
    }

    #[test]
    fn unmatched_exact_names_are_listed() {
        let compiled = compile("structs:\n  Missing:\n    max_size: 8\n");
        let report = compiled.check(&[example()]);
        assert_eq!(report.unmatched_names, vec!["Missing".to_string()]);
    }

    #[test]
    fn invariant_violations_need_no_config() {
        let broken = StructLayout::new("Broken", 8, 8)
            .with_fields(vec![FieldLayout::new("Broken", "a", "u64", 4, 8)]);
        let report = compile("structs: {}\n").check(&[broken]);
        assert_eq!(
            report.violations[0].kind,
            CheckViolationKind::Invariant(LayoutViolationKind::OutOfBounds)
        );
    }

    #[test]
    fn invalid_entries_are_rejected() {
        for yaml in [
            "structs:\n  Example:\n    max_size: 0\n",
            "structs:\n  Example:\n    alignment: 3\n",
            "structs:\n  Example:\n    fields:\n      a: {}\n",
            "structs:\n  \"\":\n    max_size: 8\n",
        ] {
            let config = Config::from_yaml(yaml).expect("valid yaml");
            assert!(matches!(config.compile(), Err(Error::Config(_))), "{yaml}");
        }
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let config = Config::from_yaml("structs:\n  \"AV[\":\n    max_size: 8\n").expect("yaml");
        assert!(matches!(config.compile(), Err(Error::Glob(_))));
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        assert!(matches!(Config::from_yaml("structs: [[["), Err(Error::Yaml(_))));
    }
}
