//! Read-only detection of EJS output tags and string literals split across lines.

use once_cell::sync::Lazy;
use regex::Regex;

static SPLIT_STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r"'[^']*\n[^']*'").unwrap());

/// Named patterns reported by `check`, in report order.
static SUSPICIOUS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("'over budget' split string", r"'over\s+budget'"),
        ("multi-line toFixed call", r"<%=\s*[^%]+\n[^%]*toFixed"),
        ("multi-line date formatting", r"<%=\s*new\s+Date[^%]*\n[^%]*%>"),
        ("multi-line ternary", r"<%=\s*[^%]*\?\s*\n[^%]*:"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).unwrap()))
    .collect()
});

/// Matches of one suspicious pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub name: &'static str,
    pub samples: Vec<String>,
}

/// An output tag opened on `start_line` and closed on `end_line` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanningTag {
    pub start_line: usize,
    pub end_line: usize,
}

/// Single-quoted literals that contain a line break.
pub fn split_strings(content: &str) -> Vec<&str> {
    SPLIT_STRING.find_iter(content).map(|m| m.as_str()).collect()
}

/// Runs every named pattern over `content`, keeping only those that matched.
pub fn find_suspicious(content: &str) -> Vec<Finding> {
    SUSPICIOUS
        .iter()
        .filter_map(|(name, re)| {
            let samples: Vec<String> = re
                .find_iter(content)
                .map(|m| m.as_str())
                // an already-joined 'over budget' is fine
                .filter(|s| s.contains('\n'))
                .map(str::to_string)
                .collect();
            (!samples.is_empty()).then_some(Finding {
                name: *name,
                samples,
            })
        })
        .collect()
}

/// Line scan for `<%=` tags whose `%>` sits on a later line.
pub fn spanning_tags(content: &str) -> Vec<SpanningTag> {
    let mut tags = Vec::new();
    let mut open: Option<usize> = None;
    for (i, line) in content.lines().enumerate() {
        if line.contains("<%=") && !line.contains("%>") {
            open = Some(i + 1);
        } else if let Some(start_line) = open
            && line.contains("%>")
        {
            tags.push(SpanningTag {
                start_line,
                end_line: i + 1,
            });
            open = None;
        }
    }
    tags
}

/// Shortens `s` to `max` characters and shows line breaks as `↵`.
pub fn preview(s: &str, max: usize) -> String {
    s.chars()
        .take(max)
        .map(|c| if c == '\n' { '↵' } else { c })
        .collect()
}
