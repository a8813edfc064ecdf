//! Keyword-based content category analysis.
//!
//! Scores text against four keyword families and reports the strongest.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Points added per distinct keyword present.
const KEYWORD_POINTS: u32 = 2;

/// Kind of content suggested by its wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentCategory {
    Factual,
    Misleading,
    Satire,
    Opinion,
}

impl ContentCategory {
    /// All categories, in tie-break order.
    pub const ALL: [ContentCategory; 4] = [
        ContentCategory::Factual,
        ContentCategory::Misleading,
        ContentCategory::Satire,
        ContentCategory::Opinion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Factual => "factual",
            ContentCategory::Misleading => "misleading",
            ContentCategory::Satire => "satire",
            ContentCategory::Opinion => "opinion",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ContentCategory::Factual => &["research", "study", "evidence", "data", "scientific"],
            ContentCategory::Misleading => &[
                "conspiracy",
                "shocking truth",
                "they dont want you to know",
                "secret",
            ],
            ContentCategory::Satire => &["parody", "humor", "comedy", "funny", "joke"],
            ContentCategory::Opinion => &["i think", "review", "reaction", "my thoughts", "opinion"],
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-category keyword scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub factual: u32,
    pub misleading: u32,
    pub satire: u32,
    pub opinion: u32,
}

impl CategoryScores {
    pub fn get(&self, category: ContentCategory) -> u32 {
        match category {
            ContentCategory::Factual => self.factual,
            ContentCategory::Misleading => self.misleading,
            ContentCategory::Satire => self.satire,
            ContentCategory::Opinion => self.opinion,
        }
    }

    fn add(&mut self, category: ContentCategory, points: u32) {
        match category {
            ContentCategory::Factual => self.factual += points,
            ContentCategory::Misleading => self.misleading += points,
            ContentCategory::Satire => self.satire += points,
            ContentCategory::Opinion => self.opinion += points,
        }
    }
}

/// Result of a content category analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub classification: ContentCategory,
    /// `high`, `medium` or `low`.
    pub confidence_level: String,
    pub explanation: String,
    pub scores: CategoryScores,
}

/// Keyword family scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentAnalyzer;

impl ContentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, text: &str) -> ContentAnalysis {
        let lower = text.to_lowercase();

        let mut scores = CategoryScores::default();
        for category in ContentCategory::ALL {
            let hits = category
                .keywords()
                .iter()
                .filter(|k| lower.contains(*k))
                .count() as u32;
            scores.add(category, hits * KEYWORD_POINTS);
        }

        // First category wins ties.
        let mut best = ContentCategory::Factual;
        for category in ContentCategory::ALL {
            if scores.get(category) > scores.get(best) {
                best = category;
            }
        }
        let max = scores.get(best);

        let confidence_level = if max > 6 {
            "high"
        } else if max > 3 {
            "medium"
        } else {
            "low"
        };

        ContentAnalysis {
            classification: best,
            confidence_level: confidence_level.to_string(),
            explanation: format!(
                "Content analysis suggests this is {} content based on keyword analysis",
                best
            ),
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factual_high() {
        let analysis = ContentAnalyzer::new()
            .analyze("New scientific study: research data and evidence on sleep");
        assert_eq!(analysis.classification, ContentCategory::Factual);
        assert_eq!(analysis.scores.factual, 10);
        assert_eq!(analysis.confidence_level, "high");
    }

    #[test]
    fn test_misleading_medium() {
        let analysis =
            ContentAnalyzer::new().analyze("The SHOCKING TRUTH about the secret moon base");
        assert_eq!(analysis.classification, ContentCategory::Misleading);
        assert_eq!(analysis.scores.misleading, 4);
        assert_eq!(analysis.confidence_level, "medium");
    }

    #[test]
    fn test_tie_goes_to_first_category() {
        let analysis = ContentAnalyzer::new().analyze("a funny review");
        assert_eq!(analysis.scores.satire, 2);
        assert_eq!(analysis.scores.opinion, 2);
        assert_eq!(analysis.classification, ContentCategory::Satire);
        assert_eq!(analysis.confidence_level, "low");
    }

    #[test]
    fn test_no_keywords_defaults_to_factual_low() {
        let analysis = ContentAnalyzer::new().analyze("hello");
        assert_eq!(analysis.classification, ContentCategory::Factual);
        assert_eq!(analysis.scores, CategoryScores::default());
        assert_eq!(analysis.confidence_level, "low");
    }

    #[test]
    fn test_serializes_uppercase_classification() {
        let analysis = ContentAnalyzer::new().analyze("my thoughts, my opinion, i think");
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["classification"], "OPINION");
        assert_eq!(value["scores"]["opinion"], 6);
        assert_eq!(
            value["explanation"],
            "Content analysis suggests this is opinion content based on keyword analysis"
        );
    }
}
