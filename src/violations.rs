use crate::types::Violation;
use anyhow::{Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, error};

// Only the first six spreadsheet columns are consulted for headers,
// matching the analysis export layout.
const HEADER_COLUMNS: usize = 6;

// Combined "[Line N] message" cell as produced by the analysis export.
static LINE_AND_WARNING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[Line (\d+)\]\s*(.+)").unwrap());

/// Column indices resolved from the sheet's header row.
struct Columns {
    file: usize,
    path: usize,
    line_warning: usize,
    level: Option<usize>,
    misra: usize,
}

impl Columns {
    /// Resolve the expected columns by exact header name. Level is optional;
    /// every other column must be present.
    fn from_header(header: &[Data]) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .take(HEADER_COLUMNS)
                .position(|cell| cell_text(cell) == name)
        };

        Ok(Self {
            file: find("File").ok_or_else(|| anyhow!("missing column: File"))?,
            path: find("Path").ok_or_else(|| anyhow!("missing column: Path"))?,
            line_warning: find("Line and Warning")
                .ok_or_else(|| anyhow!("missing column: Line and Warning"))?,
            level: find("Level"),
            misra: find("Misra").ok_or_else(|| anyhow!("missing column: Misra"))?,
        })
    }
}

/// Extract all findings for one source file from a spreadsheet workbook.
///
/// Never fails: any I/O or format error is reported on the log channel and
/// degraded to an empty list, so a malformed workbook reads as "no findings".
pub fn extract_violations_for_file(excel_path: &str, target_file: &str) -> Vec<Violation> {
    match try_extract(excel_path, target_file) {
        Ok(violations) => violations,
        Err(e) => {
            error!("Error parsing spreadsheet {}: {:#}", excel_path, e);
            Vec::new()
        }
    }
}

fn try_extract(excel_path: &str, target_file: &str) -> Result<Vec<Violation>> {
    debug!("Opening workbook {}", excel_path);
    let mut workbook = open_workbook_auto(excel_path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook has no sheets"))??;
    violations_from_rows(range.rows(), target_file)
}

/// Collect violation records for `target_file` from a sheet's rows.
///
/// The first row is the header; data rows are kept only when their File cell
/// equals the target exactly.
fn violations_from_rows<'a, I>(mut rows: I, target_file: &str) -> Result<Vec<Violation>>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows.next().ok_or_else(|| anyhow!("spreadsheet is empty"))?;
    let columns = Columns::from_header(header)?;

    let mut violations = Vec::new();
    for row in rows {
        let file = row.get(columns.file).map(cell_text).unwrap_or_default();
        if file != target_file {
            continue;
        }

        let cell = row
            .get(columns.line_warning)
            .map(cell_text)
            .unwrap_or_default();
        let (line, warning) = parse_line_warning(&cell);

        violations.push(Violation {
            file,
            path: row.get(columns.path).map(cell_text).unwrap_or_default(),
            line,
            warning,
            level: columns
                .level
                .and_then(|i| row.get(i))
                .map(cell_text)
                .unwrap_or_default(),
            misra: row.get(columns.misra).map(cell_text).unwrap_or_default(),
        });
    }

    debug!(
        "Matched {} rows for target {}",
        violations.len(),
        target_file
    );
    Ok(violations)
}

/// Split a combined "[Line N] message" cell into line number and message.
/// Cells that do not follow the pattern keep their full text as the warning.
fn parse_line_warning(text: &str) -> (Option<u32>, String) {
    match LINE_AND_WARNING.captures(text) {
        Some(caps) => (caps[1].parse().ok(), caps[2].to_string()),
        None => (None, text.to_string()),
    }
}

/// Render a spreadsheet cell as the text the review pipeline compares on.
/// Integral floats print without a fractional part since the export writes
/// numeric cells for what the pipeline treats as strings.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
