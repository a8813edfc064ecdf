//! Free-text heuristics.
//!
//! The scorer combines three signals into one suspicion score:
//!
//! - number of scam phrases matched (weight 0.3 each, not normalised)
//! - fraction of characters that are uppercase (weight 0.3)
//! - fraction of characters that are `!` or `?` (weight 0.4)
//!
//! Because the phrase count is unbounded, pattern-dense text can score
//! above 1.0. The score is reported as the confidence without clamping.

mod content;
pub mod patterns;

pub use content::{ContentAnalysis, ContentAnalyzer, ContentCategory};
pub use patterns::{matched_clauses, misinformation_keywords};

use regex::Regex;

use crate::policy::ContentType;
use crate::verdict::{Classification, Verdict};
use crate::Error;

const PATTERN_WEIGHT: f64 = 0.3;
const CAPS_WEIGHT: f64 = 0.3;
const PUNCT_WEIGHT: f64 = 0.4;

const SUSPICIOUS_THRESHOLD: f64 = 0.6;
const MODERATE_THRESHOLD: f64 = 0.3;

/// Signals extracted from one piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextScore {
    /// Number of distinct scam patterns that matched.
    pub pattern_matches: usize,
    pub caps_ratio: f64,
    pub punct_ratio: f64,
    pub score: f64,
}

impl TextScore {
    pub fn verdict(&self) -> Verdict {
        if self.score > SUSPICIOUS_THRESHOLD {
            Verdict::Suspicious
        } else if self.score > MODERATE_THRESHOLD {
            Verdict::Moderate
        } else {
            Verdict::Benign
        }
    }

    pub fn into_classification(self) -> Classification {
        let verdict = self.verdict();
        let label = match verdict {
            Verdict::Suspicious => "High",
            Verdict::Moderate => "Moderate",
            _ => "Low",
        };
        Classification::new(
            verdict,
            format!("{} suspicious content score: {:.2}", label, self.score),
            self.score,
        )
    }
}

/// Scores text against a fixed set of scam patterns.
#[derive(Debug, Clone)]
pub struct TextScorer {
    patterns: Vec<Regex>,
}

impl TextScorer {
    /// Scorer using the built-in scam patterns.
    pub fn new() -> Self {
        Self {
            patterns: patterns::COMPILED_SCAM_PATTERNS.clone(),
        }
    }

    /// Scorer using custom patterns, matched against lowercased text.
    pub fn with_patterns(sources: &[&str]) -> Result<Self, Error> {
        let patterns = sources
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Compute the raw signals and score for `text`.
    pub fn score(&self, text: &str) -> TextScore {
        let lower = text.to_lowercase();
        let pattern_matches = self.patterns.iter().filter(|re| re.is_match(&lower)).count();

        let total = text.chars().count().max(1) as f64;
        let caps = text.chars().filter(|c| c.is_uppercase()).count() as f64;
        let punct = text.chars().filter(|c| matches!(c, '!' | '?')).count() as f64;
        let caps_ratio = caps / total;
        let punct_ratio = punct / total;

        let score = pattern_matches as f64 * PATTERN_WEIGHT
            + caps_ratio * CAPS_WEIGHT
            + punct_ratio * PUNCT_WEIGHT;

        TextScore {
            pattern_matches,
            caps_ratio,
            punct_ratio,
            score,
        }
    }

    /// Classify `text`. The content type is recorded for tracing only.
    pub fn analyze(&self, text: &str, content_type: ContentType) -> Classification {
        let score = self.score(text);
        tracing::debug!(
            content_type = content_type.as_str(),
            patterns = score.pattern_matches,
            score = score.score,
            "text scored"
        );
        score.into_classification()
    }
}

impl Default for TextScorer {
    fn default() -> Self {
        Self::new()
    }
}
