use anyhow::Result;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

// Fenced code block, optionally tagged cpp or c++. The body is non-greedy so
// the first closing fence terminates a block; an unterminated opening fence
// matches nothing.
static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:cpp|c\+\+)?\s*\n(.*?)```").unwrap());

// One snippet line: label (digits plus optional sub-line letters), colon,
// at most one separator space, then the code.
static SNIPPET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+[a-zA-Z]*): ?(.*)$").unwrap());

/// Extract line-numbered code from the fenced blocks of a model response.
///
/// Returns a mapping from line-number label ("12", "12a") to code text with
/// trailing whitespace removed. Indentation and backslashes inside the code
/// are preserved verbatim. A label appearing more than once keeps the last
/// occurrence. Lines without a label are skipped with a diagnostic and
/// extraction continues.
pub fn extract_snippets(response_text: &str) -> HashMap<String, String> {
    let blocks: Vec<_> = CODE_BLOCK.captures_iter(response_text).collect();
    debug!("Found {} fenced code blocks", blocks.len());

    let mut snippets = HashMap::new();
    for block in &blocks {
        for line in block[1].trim().lines() {
            match SNIPPET_LINE.captures(line) {
                Some(caps) => {
                    let label = caps[1].trim().to_string();
                    let code = caps[2].trim_end().to_string();
                    snippets.insert(label, code);
                }
                None => warn!("Skipping line without a number label: {}", line),
            }
        }
    }

    snippets
}

/// Write the snippet mapping as pretty-printed JSON to the given file.
pub fn save_snippets(snippets: &HashMap<String, String>, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(snippets)?;
    fs::write(path, json)?;
    info!("Snippets written to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_snippets_basic_block() {
        let response = "Here is the fix:\n```cpp\n1: int x = 1;\n2: // done\n```\n";
        let snippets = extract_snippets(response);
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets["1"], "int x = 1;");
        assert_eq!(snippets["2"], "// done");
    }

    #[test]
    fn test_extract_snippets_accepts_all_fence_tags() {
        let response = "```cpp\n1: a();\n```\ntext\n```c++\n2: b();\n```\nmore\n```\n3: c();\n```\n";
        let snippets = extract_snippets(response);
        assert_eq!(snippets.len(), 3);
        assert_eq!(snippets["1"], "a();");
        assert_eq!(snippets["2"], "b();");
        assert_eq!(snippets["3"], "c();");
    }

    #[test]
    fn test_extract_snippets_sub_line_labels() {
        let response = "```cpp\n12: foo();\n12a: bar();\n12b: baz();\n```\n";
        let snippets = extract_snippets(response);
        assert_eq!(snippets["12"], "foo();");
        assert_eq!(snippets["12a"], "bar();");
        assert_eq!(snippets["12b"], "baz();");
    }

    #[test]
    fn test_extract_snippets_preserves_trailing_backslash() {
        let response = "```cpp\n12a: foo(); \\\n```\n";
        let snippets = extract_snippets(response);
        assert_eq!(snippets["12a"], "foo(); \\");
    }

    #[test]
    fn test_extract_snippets_preserves_indentation() {
        // One space after the colon is the separator; the rest is code
        let response = "```cpp\n3:     return 0;\n```\n";
        let snippets = extract_snippets(response);
        assert_eq!(snippets["3"], "    return 0;");
    }

    #[test]
    fn test_extract_snippets_strips_trailing_whitespace() {
        let response = "```cpp\n4: int y = 2;   \n```\n";
        let snippets = extract_snippets(response);
        assert_eq!(snippets["4"], "int y = 2;");
    }

    // Duplicate labels overwrite across blocks, later block wins
    #[test]
    fn test_extract_snippets_duplicate_label_last_block_wins() {
        let response = "```cpp\n7: first();\n```\nrevised:\n```cpp\n7: second();\n```\n";
        let snippets = extract_snippets(response);
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets["7"], "second();");
    }

    #[test]
    fn test_extract_snippets_no_blocks_is_empty() {
        let snippets = extract_snippets("No code here, just prose.");
        assert!(snippets.is_empty());
    }

    #[test]
    fn test_extract_snippets_skips_unlabeled_lines() {
        let response = "```cpp\n1: kept();\njust a comment\n  indented, no label\n2: also_kept();\n```\n";
        let snippets = extract_snippets(response);
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets["1"], "kept();");
        assert_eq!(snippets["2"], "also_kept();");
    }

    #[test]
    fn test_extract_snippets_unterminated_fence_is_empty() {
        let snippets = extract_snippets("```cpp\n1: never_closed();\n");
        assert!(snippets.is_empty());
    }

    #[test]
    fn test_save_snippets_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippets.json");
        let snippets = extract_snippets("```cpp\n1: int x = 1;\n```\n");

        save_snippets(&snippets, path.to_str().unwrap()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: HashMap<String, String> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, snippets);
    }
}
