use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codec-layout")]
#[command(
    author,
    version,
    about = "Report the byte offset and width of AVCodecContext fields as laid out by the Rust binding"
)]
#[command(
    long_about = "codec-layout prints, for a fixed list of AVCodecContext members, each member's \
byte offset and width as the compiler laid out the FFI binding on this target. The numbers are \
only valid for the binding, target and toolchain the tool was built with.\n\n\
With no subcommand it prints one `[Struct::field @ offset-width]` line per member.\n\n\
Example:\n  codec-layout verify ffmpeg-structs.out"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the probed layouts
    Report {
        /// Output format (probe, table, json)
        #[arg(short, long, value_enum, default_value = "probe")]
        output: ReportFormat,

        /// Only report fields whose `Struct::field` name contains this substring
        #[arg(short, long)]
        filter: Option<String>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Compare the probed layouts against probe lines printed by a C program
    Verify {
        /// File holding the C program's output, or `-` for stdin
        #[arg(value_name = "C_OUTPUT")]
        c_output: PathBuf,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Check the probed layouts against pinned expectations
    Check {
        /// Path to config file (.codec-layout.yaml)
        #[arg(short, long, default_value = ".codec-layout.yaml")]
        config: PathBuf,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// `[Struct::field @ offset-width]` lines
    Probe,
    Table,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
