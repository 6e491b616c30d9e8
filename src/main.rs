use anyhow::{Context, Result, bail};
use clap::Parser;
use codec_layout::{
    CheckViolation, Cli, Commands, Config, JsonFormatter, OutputFormat, ProbeFormatter,
    ReportFormat, StructLayout, TableFormatter, VerifyJsonFormatter, VerifyTableFormatter,
    analyze_layout, probed_layouts, probed_structs, read_probe_output, verify_layouts,
};
use colored::Colorize;
use std::path::Path;

fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        None => run_report(ReportFormat::Probe, None, false, true),
        Some(Commands::Report { output, filter, pretty, no_color }) => {
            run_report(output, filter.as_deref(), pretty, no_color)
        }
        Some(Commands::Verify { c_output, output, pretty, no_color }) => {
            run_verify(&c_output, output, pretty, no_color)
        }
        Some(Commands::Check { config, output }) => run_check(&config, output),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run_cli(cli)
}

fn run_report(
    output_format: ReportFormat,
    filter: Option<&str>,
    pretty: bool,
    no_color: bool,
) -> Result<()> {
    let mut layouts = probed_structs();

    if let Some(f) = filter {
        for layout in &mut layouts {
            layout.fields.retain(|field| field.qualified_name().contains(f));
        }
        layouts.retain(|l| !l.fields.is_empty());

        if layouts.is_empty() {
            eprintln!("No fields found matching filter: {}", f);
            return Ok(());
        }
    }

    // Coverage describes only the fields that are shown.
    for layout in &mut layouts {
        analyze_layout(layout);
    }

    let output_str = match output_format {
        // Probe lines already end in a newline.
        ReportFormat::Probe => {
            print!("{}", ProbeFormatter.format(&layouts));
            return Ok(());
        }
        ReportFormat::Table => TableFormatter::new(no_color).format(&layouts),
        ReportFormat::Json => JsonFormatter::new(pretty).format(&layouts),
    };

    println!("{}", output_str);

    Ok(())
}

fn run_verify(
    c_output: &Path,
    output_format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<()> {
    let c_lines = read_probe_output(c_output)
        .with_context(|| format!("Failed to read C probe output: {}", c_output.display()))?;

    if c_lines.is_empty() {
        bail!("No probe lines found in {}", c_output.display());
    }

    let layouts = probed_layouts();
    let result = verify_layouts(&layouts, &c_lines);

    match output_format {
        OutputFormat::Table => print!("{}", VerifyTableFormatter::new(no_color).format(&result)),
        OutputFormat::Json => println!("{}", VerifyJsonFormatter::new(pretty).format(&result)),
    }

    if !result.is_consistent() {
        bail!(
            "Layout verification failed: {} mismatched, {} missing",
            result.mismatched.len(),
            result.missing.len()
        );
    }

    Ok(())
}

fn run_check(config_path: &Path, output_format: OutputFormat) -> Result<()> {
    if !config_path.exists() {
        bail!(
            "Config file not found: {}\n\nCreate a .codec-layout.yaml with pinned expectations:\n\n\
            structs:\n  AVCodecContext:\n    max_size: 1200\n    fields:\n      codec_id: {{ offset: 56, width: 4 }}\n\n\
            Glob patterns are supported:\n  \"AV*\":\n    alignment: 8",
            config_path.display()
        );
    }

    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

    let compiled = config
        .compile()
        .with_context(|| format!("Invalid config: {}", config_path.display()))?;

    if compiled.is_empty() {
        eprintln!("Warning: No expectations defined in config file");
    }

    let layouts: Vec<StructLayout> = probed_layouts();
    let report = compiled.check(&layouts);

    for name in &report.unmatched_names {
        eprintln!("Warning: Expectation defined for '{}' but struct is not probed", name);
    }
    for pattern in &report.unmatched_patterns {
        eprintln!("Warning: Pattern '{}' did not match any structs", pattern);
    }

    let violations = &report.violations;

    match output_format {
        OutputFormat::Table => {
            if violations.is_empty() {
                println!("All structs match their expected layout");
                return Ok(());
            }
            eprintln!("{}", "Layout violations:".red().bold());
            for v in violations {
                eprintln!("  {}", v.message);
            }
        }
        OutputFormat::Json => {
            let output = CheckJsonOutput {
                version: env!("CARGO_PKG_VERSION"),
                violations,
                summary: CheckSummary { total_violations: violations.len() },
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            if violations.is_empty() {
                return Ok(());
            }
        }
    }

    bail!("Layout check failed: {} violation(s)", violations.len());
}

#[derive(serde::Serialize)]
struct CheckJsonOutput<'a> {
    version: &'static str,
    violations: &'a [CheckViolation],
    summary: CheckSummary,
}

#[derive(serde::Serialize)]
struct CheckSummary {
    total_violations: usize,
}
