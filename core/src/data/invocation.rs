//! Invocation line extraction and the quote-aware argument splitter.
//!
//! `displayplacer list` ends with a line such as
//!
//! ```text
//! displayplacer "id:37D8832A res:1440x900 origin:(0,0) degree:0" "id:A1B2 res:2560x1440 origin:(1440,-200) degree:0"
//! ```
//!
//! which reproduces the current arrangement verbatim. Each quoted group is one
//! display and becomes one argument.

/// Executable name that starts the invocation line.
pub const PLACER_PREFIX: &str = "displayplacer";

/// Extract the argument list from the first `displayplacer ...` line.
///
/// Lines are scanned lazily and only the first match is used. Returns an
/// empty vector when no line matches.
pub fn extract_invocation_arguments(raw: &str) -> Vec<String> {
    let marker = format!("{} ", PLACER_PREFIX);
    raw.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(marker.as_str()))
        .map(split_quoted)
        .unwrap_or_default()
}

/// Split on whitespace, treating `"` as a toggle for literal whitespace.
///
/// Quote characters are dropped, empty tokens are never produced, and an
/// unbalanced quote simply leaves the rest of the input in quoted mode.
pub fn split_quoted(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;

    for ch in input.chars() {
        if ch == '"' {
            inside_quotes = !inside_quotes;
        } else if ch.is_whitespace() && !inside_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }

    if !current.is_empty() {
        args.push(current);
    }
    args
}

/// Render arguments back into a single command-line string, quoting any
/// token that contains whitespace.
pub fn join_quoted(args: &[String]) -> String {
    args.iter()
        .map(|a| {
            if a.is_empty() || a.chars().any(char::is_whitespace) {
                format!("\"{}\"", a)
            } else {
                a.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
