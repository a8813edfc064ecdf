//! Fixed pattern and keyword sets used by the text heuristics.
//!
//! All patterns are matched against lowercased text. `.` does not cross
//! newlines, so a phrase split across lines does not match.

use once_cell::sync::Lazy;
use regex::Regex;

/// Urgency and scam phrasing.
pub const SCAM_PATTERNS: &[&str] = &[
    r"urgent.*action.*required",
    r"click.*here.*immediately",
    r"verify.*account.*now",
    r"limited.*time.*offer",
    r"act.*now.*or.*lose",
    r"congratulations.*winner",
    r"free.*money.*guaranteed",
];

/// Clauses in terms of service that are worth a reader's attention.
///
/// The pattern source doubles as the clause identifier in responses.
pub const CLAUSE_PATTERNS: &[&str] = &[
    r"we.*not.*liable.*for.*any.*damages",
    r"we.*reserve.*right.*to.*change.*terms",
    r"you.*agree.*to.*arbitration",
    r"we.*may.*sell.*your.*data",
    r"we.*collect.*personal.*information",
    r"third.*party.*access.*to.*your.*data",
];

/// Phrases that flag video metadata as possible misinformation.
pub const MISINFORMATION_KEYWORDS: &[&str] = &[
    "fake news",
    "conspiracy",
    "hoax",
    "misleading",
    "unverified",
    "rumor",
    "false claim",
];

pub(crate) static COMPILED_SCAM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    SCAM_PATTERNS
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

pub(crate) static COMPILED_CLAUSE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    CLAUSE_PATTERNS
        .iter()
        .map(|p| (*p, Regex::new(p).unwrap()))
        .collect()
});

/// Misinformation keywords present in `text`, in declaration order.
pub fn misinformation_keywords(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    MISINFORMATION_KEYWORDS
        .iter()
        .copied()
        .filter(|k| lower.contains(k))
        .collect()
}

/// Identifiers of the clause patterns that match `text` at least once.
pub fn matched_clauses(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    COMPILED_CLAUSE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(&lower))
        .map(|(id, _)| *id)
        .collect()
}
