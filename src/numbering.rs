use anyhow::Result;
use regex::Regex;
use std::fs;
use std::sync::LazyLock;
use tracing::debug;

// Leading line-number token: digits, optional sub-line letters (12, 12a, 45b),
// a colon, and at most one whitespace separator.
static LINE_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[a-zA-Z]*:\s?").unwrap());

/// Prefix each line with its 1-based line number and ": ".
///
/// Line order, count, and terminator style are preserved exactly.
pub fn add_line_numbers(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for (i, line) in text.split_inclusive('\n').enumerate() {
        output.push_str(&format!("{}: {}", i + 1, line));
    }
    output
}

/// Remove a leading line-number token from every line that carries one.
///
/// Lines without a token pass through byte-identical. The token pattern is
/// matched against the line content only, never its terminator, so a bare
/// `12:` line keeps its newline and the 1:1 line mapping holds.
pub fn strip_line_numbers(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (content, terminator) = split_terminator(line);
        output.push_str(&LINE_NUMBER_PREFIX.replace(content, ""));
        output.push_str(terminator);
    }
    output
}

/// Split a line into its content and terminator ("\r\n", "\n", or "").
fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// Rewrite a text file with line-number prefixes added.
pub fn number_file(input_file: &str, output_file: &str) -> Result<()> {
    debug!("Numbering {} into {}", input_file, output_file);
    let text = fs::read_to_string(input_file)?;
    fs::write(output_file, add_line_numbers(&text))?;
    Ok(())
}

/// Rewrite a text file with line-number prefixes removed.
pub fn denumber_file(input_file: &str, output_file: &str) -> Result<()> {
    debug!("Denumbering {} into {}", input_file, output_file);
    let text = fs::read_to_string(input_file)?;
    fs::write(output_file, strip_line_numbers(&text))?;
    Ok(())
}
