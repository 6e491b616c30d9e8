use crate::ffi::Target;
use crate::types::StructLayout;
use serde::Serialize;

#[derive(Serialize)]
struct Output<'a> {
    version: &'static str,
    target: Target,
    structs: &'a [StructLayout],
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn format(&self, layouts: &[StructLayout]) -> String {
        let output = Output {
            version: env!("CARGO_PKG_VERSION"),
            target: Target::current(),
            structs: layouts,
        };

        if self.pretty {
            serde_json::to_string_pretty(&output)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string(&output).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldLayout;

    fn layout(name: &str) -> StructLayout {
        StructLayout::new(name, 8, 8)
            .with_fields(vec![FieldLayout::new(name, "value", "u64", 0, 8)])
    }

    #[test]
    fn json_formatter_pretty() {
        let formatter = JsonFormatter::new(true);
        let out = formatter.format(&[layout("Foo")]);
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        assert!(parsed["structs"].is_array());
        assert_eq!(parsed["structs"][0]["fields"][0]["width"], 8);
        assert!(out.contains('\n'));
    }

    #[test]
    fn json_formatter_describes_target() {
        let out = JsonFormatter::new(false).format(&[layout("Foo")]);
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
        let target = &parsed["target"];
        assert_eq!(target["arch"], std::env::consts::ARCH);
        assert_eq!(target["pointer_width"], usize::BITS);
        assert_eq!(target["binding"], crate::ffi::binding_source());
    }

    #[test]
    fn json_formatter_compact() {
        let formatter = JsonFormatter::new(false);
        let out = formatter.format(&[layout("Foo")]);
        assert!(out.contains("\"structs\""));
        assert!(!out.contains('\n'));
    }
}
