//! Span extraction and body trimming for signatures and class declarations.

use once_cell::sync::Lazy;
use regex::Regex;

use super::capture::BodyStart;

/// Line endings that close a signature header, across grammars
const SIGNATURE_TERMINATORS: &[&str] = &["{", "=>", "->", ":", ";"];

/// Terminators that open a body and get cut off the last signature line.
/// `:` and `;` are the natural end of the header and stay.
const BODY_MARKERS: &[&str] = &["{", "=>", "->"];

static INHERITANCE_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:extends|implements)\b").expect("valid inheritance regex"));

/// Last valid row of a span, clamped to the line count
fn clamp_end(lines: &[&str], start_row: usize, end_row: usize) -> usize {
    end_row.min(lines.len().saturating_sub(1)).max(start_row)
}

/// Everything before the first occurrence of `marker`
fn cut_at<'a>(line: &'a str, marker: &str) -> &'a str {
    match line.find(marker) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Rows `start_row..=end_row` joined by newline, trimmed at both ends.
///
/// `start_row` must index into `lines`; `end_row` is clamped.
pub(crate) fn extract_span(lines: &[&str], start_row: usize, end_row: usize) -> String {
    let end = clamp_end(lines, start_row, end_row);
    lines[start_row..=end].join("\n").trim().to_string()
}

/// Keep a function/method header, drop its body.
///
/// Scans for the first row that contains `)` and ends in a terminator. When
/// the body start is known the scan stops at its row; otherwise it covers the
/// whole span. With no qualifying row the scanned range is kept, minus the
/// body's opening text on its first row.
pub(crate) fn trim_signature(
    lines: &[&str],
    start_row: usize,
    end_row: usize,
    body: Option<BodyStart>,
) -> String {
    let last = clamp_end(lines, start_row, end_row);
    let limit = body.map_or(last, |body| body.row.clamp(start_row, last));

    let mut signature_end = limit;
    let mut terminator = None;
    for (row, line) in lines.iter().enumerate().take(limit + 1).skip(start_row) {
        let trimmed = line.trim();
        if !trimmed.contains(')') {
            continue;
        }
        if let Some(marker) = SIGNATURE_TERMINATORS.iter().find(|m| trimmed.ends_with(*m)) {
            signature_end = row;
            terminator = Some(*marker);
            break;
        }
    }

    let mut selected: Vec<&str> = lines[start_row..=signature_end].to_vec();
    match terminator {
        Some(marker) if BODY_MARKERS.contains(&marker) => {
            if let Some(last_line) = selected.pop() {
                selected.push(cut_at(last_line, marker).trim_end());
            }
        }
        Some(_) => {}
        None => {
            // The body opens on the last kept row: keep only what precedes it
            if let Some(body) = body.filter(|body| body.row == signature_end) {
                if let Some(last_line) = selected.pop() {
                    let head = last_line.get(..body.column).unwrap_or(last_line).trim_end();
                    if !head.trim().is_empty() || selected.is_empty() {
                        selected.push(head);
                    }
                }
            }
        }
    }

    selected.join("\n").trim().to_string()
}

/// Keep a class declaration line plus an immediately following
/// `extends`/`implements` line, each cut at its first `{`.
pub(crate) fn trim_class_signature(lines: &[&str], start_row: usize, end_row: usize) -> String {
    let mut selected = vec![lines[start_row]];

    if start_row < end_row {
        if let Some(&next) = lines.get(start_row + 1) {
            if INHERITANCE_CLAUSE.is_match(next.trim()) {
                selected.push(next);
            }
        }
    }

    selected
        .iter()
        .map(|line| cut_at(line, "{").trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_span_trims_ends() {
        let lines = ["", "  /**", "   * Docs", "   */  ", ""];
        assert_eq!(extract_span(&lines, 1, 3), "/**\n   * Docs\n   */");
    }

    #[test]
    fn test_extract_span_clamps_end() {
        let lines = ["type A = string;"];
        assert_eq!(extract_span(&lines, 0, 7), "type A = string;");
    }

    #[test]
    fn test_signature_brace() {
        let lines = [
            "function add(a: number, b: number): number {",
            "  return a + b;",
            "}",
        ];
        assert_eq!(trim_signature(&lines, 0, 2, None), "function add(a: number, b: number): number");
    }

    #[test]
    fn test_signature_multiline_params() {
        let lines = [
            "export async function load(",
            "  path: string,",
            "  options?: Options,",
            "): Promise<Data> {",
            "  const x = read(path);",
            "}",
        ];
        assert_eq!(
            trim_signature(&lines, 0, 5, None),
            "export async function load(\n  path: string,\n  options?: Options,\n): Promise<Data>"
        );
    }

    #[test]
    fn test_signature_arrow() {
        let lines = ["const double = (x: number) =>", "  x * 2;"];
        assert_eq!(trim_signature(&lines, 0, 1, None), "const double = (x: number)");
    }

    #[test]
    fn test_signature_return_arrow() {
        let lines = ["fn parse(input: &str) ->", "    Result<Ast> {", "}"];
        assert_eq!(trim_signature(&lines, 0, 2, None), "fn parse(input: &str)");
    }

    #[test]
    fn test_signature_colon_kept() {
        let lines = ["def area(self) -> float:", "    return self.w * self.h"];
        assert_eq!(trim_signature(&lines, 0, 1, None), "def area(self) -> float:");
    }

    #[test]
    fn test_signature_semicolon_kept() {
        let lines = ["int max(int a, int b);"];
        assert_eq!(trim_signature(&lines, 0, 0, None), "int max(int a, int b);");
    }

    #[test]
    fn test_signature_stops_at_first_qualifying_row() {
        let lines = ["function run() {", "  if (ready()) {", "  }", "}"];
        assert_eq!(trim_signature(&lines, 0, 3, None), "function run()");
    }

    #[test]
    fn test_signature_fallback_keeps_span() {
        let lines = ["fn weird", "    <T>", "    where T: Copy"];
        assert_eq!(trim_signature(&lines, 0, 2, None), "fn weird\n    <T>\n    where T: Copy");
    }

    #[test]
    fn test_signature_body_start_bounds_scan() {
        let lines = [
            "fn build<T>(value: T)",
            "where",
            "    T: Clone",
            "{",
            "    call(value) {",
            "}",
        ];
        let body = BodyStart { row: 3, column: 0 };
        assert_eq!(
            trim_signature(&lines, 0, 5, Some(body)),
            "fn build<T>(value: T)\nwhere\n    T: Clone"
        );
    }

    #[test]
    fn test_signature_allman_brace_dropped() {
        let lines = ["int main(void)", "{", "    return 0;", "}"];
        let body = BodyStart { row: 1, column: 0 };
        assert_eq!(trim_signature(&lines, 0, 3, Some(body)), "int main(void)");
    }

    #[test]
    fn test_signature_body_cut_at_column() {
        let lines = ["def f(x): return x"];
        let body = BodyStart { row: 0, column: 10 };
        assert_eq!(trim_signature(&lines, 0, 0, Some(body)), "def f(x):");
    }

    #[test]
    fn test_class_with_inheritance_on_same_line() {
        let lines = ["class Dog extends Animal implements Runnable {", "  bark() {}", "}"];
        assert_eq!(trim_class_signature(&lines, 0, 2), "class Dog extends Animal implements Runnable");
    }

    #[test]
    fn test_class_with_inheritance_on_next_line() {
        let lines = ["export class Repo", "    extends Base<User> {", "  find() {}", "}"];
        assert_eq!(trim_class_signature(&lines, 0, 3), "export class Repo\nextends Base<User>");
    }

    #[test]
    fn test_class_ignores_unrelated_next_line() {
        let lines = ["class Point {", "  x = 0;", "}"];
        assert_eq!(trim_class_signature(&lines, 0, 2), "class Point");
    }

    #[test]
    fn test_class_single_row_span() {
        let lines = ["class Empty {}", "  implements nothing"];
        assert_eq!(trim_class_signature(&lines, 0, 0), "class Empty");
    }

    #[test]
    fn test_inheritance_requires_whole_word() {
        let lines = ["class Config {", "  extendsDefaults = true;", "}"];
        assert_eq!(trim_class_signature(&lines, 0, 2), "class Config");
    }
}
