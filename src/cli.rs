use clap::{Parser, Subcommand};

// Display order for log level option (placed at end of help text)
const LOG_LEVEL_DISPLAY_ORDER: usize = 100;

/// CLI arguments
#[derive(Parser)]
#[command(name = "misrakit", version, about = "Command-line utilities for a MISRA C++ review workflow", long_about = None)]
pub struct Cli {
    /// Log level (see https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
    /// [env: MISRAKIT_LOG=] [default: info]
    #[arg(
        long,
        env = "MISRAKIT_LOG",
        default_value = "info",
        global = true,
        hide_default_value = true,
        hide_env = true,
        display_order = LOG_LEVEL_DISPLAY_ORDER,
        verbatim_doc_comment
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Prefix each line of a text file with its 1-based line number
    Number(NumberArgs),
    /// Remove leading line-number tokens from a text file
    Denumber(DenumberArgs),
    /// Extract violation rows for one source file from a findings spreadsheet
    Violations(ViolationsArgs),
    /// Extract line-numbered code snippets from a model response
    Snippets(SnippetsArgs),
}

/// Arguments for the number command
#[derive(Parser, Debug)]
pub struct NumberArgs {
    /// Path to the text file to number
    pub input_file: String,

    /// Path the numbered copy is written to
    pub output_file: String,
}

/// Arguments for the denumber command
#[derive(Parser, Debug)]
pub struct DenumberArgs {
    /// Path to the numbered text file
    pub input_file: String,

    /// Path the denumbered copy is written to
    pub output_file: String,
}

/// Arguments for the violations command
#[derive(Parser, Debug)]
pub struct ViolationsArgs {
    /// Path to the findings spreadsheet workbook
    pub excel_path: String,

    /// Source file name to keep rows for (exact match against the File column)
    pub target_file: String,
}

/// Arguments for the snippets command
#[derive(Parser, Debug)]
pub struct SnippetsArgs {
    /// Full response text to scan for fenced code blocks
    pub response_text: String,

    /// Also write the mapping to a JSON file (default file name when no path given)
    #[arg(long, num_args = 0..=1, default_missing_value = "temp_snippets.json")]
    pub output: Option<String>,
}
