use crate::diff::VerifyResult;
use crate::ffi::Target;
use colored::Colorize;
use serde::Serialize;

pub struct VerifyTableFormatter {
    no_color: bool,
}

impl VerifyTableFormatter {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    fn paint(&self, text: &str, style: fn(&str) -> colored::ColoredString) -> String {
        if self.no_color { text.to_string() } else { style(text).to_string() }
    }

    pub fn format(&self, result: &VerifyResult) -> String {
        let mut output = String::new();

        if !result.matching.is_empty() {
            output.push_str("These struct fields have matching position/size in Rust and C code:\n");
            for line in &result.matching {
                output.push_str(&format!("  - {}\n", line));
            }
        }

        if !result.mismatched.is_empty() {
            output.push('\n');
            output.push_str(&self.paint("Mismatched fields:", |s| s.red().bold()));
            output.push('\n');
            for m in &result.mismatched {
                output.push_str(&format!("  ~ {}\n", m.message()));
            }
        }

        if !result.missing.is_empty() {
            output.push('\n');
            output.push_str(&self.paint("Missing from C output:", |s| s.red().bold()));
            output.push('\n');
            for line in &result.missing {
                output.push_str(&format!("  - {}\n", line));
            }
        }

        if !result.extra.is_empty() {
            output.push('\n');
            output.push_str(&self.paint("Only in C output:", |s| s.yellow().bold()));
            output.push('\n');
            for line in &result.extra {
                output.push_str(&format!("  + {}\n", line));
            }
        }

        output.push_str(&format!(
            "\nSummary: {} matching, {} mismatched, {} missing, {} only in C\n",
            result.matching.len(),
            result.mismatched.len(),
            result.missing.len(),
            result.extra.len()
        ));

        output
    }
}

#[derive(Serialize)]
struct Output<'a> {
    version: &'static str,
    target: Target,
    consistent: bool,
    #[serde(flatten)]
    result: &'a VerifyResult,
}

pub struct VerifyJsonFormatter {
    pretty: bool,
}

impl VerifyJsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format(&self, result: &VerifyResult) -> String {
        let output = Output {
            version: env!("CARGO_PKG_VERSION"),
            target: Target::current(),
            consistent: result.is_consistent(),
            result,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        };
        json.unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}
