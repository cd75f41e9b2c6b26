use serde::Serialize;

/// One static-analysis finding row from the review spreadsheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Violation {
    /// Source file name the finding belongs to
    pub file: String,
    /// Path of the source file within the analyzed tree
    pub path: String,
    /// 1-indexed source line, None when the sheet cell carries no line number
    pub line: Option<u32>,
    /// Warning message text
    pub warning: String,
    /// Severity level, empty when the sheet has no Level column
    pub level: String,
    /// MISRA rule identifier
    pub misra: String,
}
