//! Commit classification and summarization.
//!
//! Turns a day's raw commit subjects into one bounded, human-readable
//! note suitable for a timesheet field. Subjects are cleaned of noise,
//! deduplicated, classified by a keyword table, and composed into a
//! `Category: desc, desc; Category: desc` string.

use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Maximum length of a single commit description in the summary.
const MAX_DESCRIPTION_LEN: usize = 100;
/// Maximum length of the whole day summary.
const MAX_SUMMARY_LEN: usize = 200;
/// Marker appended to truncated text.
const ELLIPSIS: &str = "...";

/// Subjects that carry no reportable work and are dropped outright.
static DROP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(merge\s|fixup!|squash!)").unwrap());

/// Markers stripped from the front of an otherwise useful subject.
static STRIP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(wip[:\s]+|\[skip\s+ci\]\s*|\[ci\s+skip\]\s*)").unwrap()
});

/// Work category derived from a commit subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Features,
    Fixes,
    Refactoring,
    Documentation,
    Tests,
    Chores,
    Other,
}

impl Category {
    /// String representation used in composed summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Features => "Features",
            Category::Fixes => "Fixes",
            Category::Refactoring => "Refactoring",
            Category::Documentation => "Documentation",
            Category::Tests => "Tests",
            Category::Chores => "Chores",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered (category, keywords) table. Evaluated top-down against the
/// lowercased subject; the first category with a matching prefix wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Features,
        &["feat", "add", "implement", "create", "new", "introduce"],
    ),
    (
        Category::Fixes,
        &["fix", "bug", "hotfix", "patch", "resolve", "correct"],
    ),
    (
        Category::Refactoring,
        &["refactor", "clean", "improve", "optimize", "simplify", "rework"],
    ),
    (Category::Documentation, &["doc", "readme", "comment"]),
    (Category::Tests, &["test", "spec"]),
    (
        Category::Chores,
        &["chore", "bump", "release", "upgrade", "ci:", "build:"],
    ),
];

/// Category order in a composed summary.
const DISPLAY_ORDER: &[Category] = &[
    Category::Features,
    Category::Fixes,
    Category::Refactoring,
    Category::Documentation,
    Category::Tests,
    Category::Chores,
    Category::Other,
];

/// Classify a subject by case-insensitive prefix match against the
/// keyword table. Unmatched subjects fall into [`Category::Other`].
pub fn classify(subject: &str) -> Category {
    let lowered = subject.trim().to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| lowered.starts_with(keyword)) {
            return *category;
        }
    }

    Category::Other
}

/// Clean one subject: keep the first line only, drop noise commits,
/// strip leading markers. Returns `None` when nothing useful remains.
fn clean_subject(subject: &str) -> Option<String> {
    let first_line = subject.lines().next().unwrap_or("").trim();

    if first_line.is_empty() || DROP_PATTERN.is_match(first_line) {
        return None;
    }

    let cleaned = STRIP_PATTERN.replace(first_line, "").trim().to_string();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Truncate to `max` characters, appending an ellipsis when cut.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}{}", head, ELLIPSIS)
    }
}

/// Summarize a day's commit subjects into one bounded note.
///
/// Subjects are cleaned, deduplicated case-insensitively (first
/// occurrence wins), classified, and grouped in display order. An empty
/// input yields an empty string; callers substitute their default notes.
pub fn summarize<S: AsRef<str>>(subjects: &[S]) -> String {
    let mut seen = HashSet::new();
    let mut groups: Vec<(Category, Vec<String>)> = DISPLAY_ORDER
        .iter()
        .map(|category| (*category, Vec::new()))
        .collect();

    for subject in subjects {
        let Some(cleaned) = clean_subject(subject.as_ref()) else {
            continue;
        };
        if !seen.insert(cleaned.to_lowercase()) {
            continue;
        }

        let category = classify(&cleaned);
        let description = truncate_chars(&cleaned, MAX_DESCRIPTION_LEN);
        if let Some((_, descriptions)) = groups.iter_mut().find(|(c, _)| *c == category) {
            descriptions.push(description);
        }
    }

    let joined = groups
        .iter()
        .filter(|(_, descriptions)| !descriptions.is_empty())
        .map(|(category, descriptions)| format!("{}: {}", category, descriptions.join(", ")))
        .collect::<Vec<_>>()
        .join("; ");

    if joined.chars().count() > MAX_SUMMARY_LEN {
        truncate_chars(&joined, MAX_SUMMARY_LEN - ELLIPSIS.chars().count())
    } else {
        joined
    }
}
