//! Verdict vocabulary and the classification result returned to callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The categorical outcome of a classification.
///
/// Each content type uses a subset of this vocabulary: URLs produce
/// `phishing`/`suspicious`/`benign`, videos `misleading`/`reliable`,
/// terms of service `problematic`/`moderate`/`acceptable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Benign,
    Moderate,
    Suspicious,
    Phishing,
    Misleading,
    Reliable,
    Acceptable,
    Problematic,
    /// Classification could not be completed.
    Unknown,
    /// The request itself was rejected.
    Error,
}

impl Verdict {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Benign => "benign",
            Verdict::Moderate => "moderate",
            Verdict::Suspicious => "suspicious",
            Verdict::Phishing => "phishing",
            Verdict::Misleading => "misleading",
            Verdict::Reliable => "reliable",
            Verdict::Acceptable => "acceptable",
            Verdict::Problematic => "problematic",
            Verdict::Unknown => "unknown",
            Verdict::Error => "error",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "benign" => Some(Verdict::Benign),
            "moderate" => Some(Verdict::Moderate),
            "suspicious" => Some(Verdict::Suspicious),
            "phishing" => Some(Verdict::Phishing),
            "misleading" => Some(Verdict::Misleading),
            "reliable" => Some(Verdict::Reliable),
            "acceptable" => Some(Verdict::Acceptable),
            "problematic" => Some(Verdict::Problematic),
            "unknown" => Some(Verdict::Unknown),
            "error" => Some(Verdict::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sub-results attached to a composite classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub url_analysis: Classification,
    pub content_analysis: Classification,
    /// Channel name, echoed back for video classifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

/// Result of classifying a URL, listing, video or legal text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub verdict: Verdict,
    /// Human-readable explanation of the verdict.
    pub reason: String,
    /// How strongly the verdict is held. Not a calibrated probability, and
    /// text scores may exceed 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<Details>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problematic_clauses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_length: Option<usize>,
}

impl Classification {
    /// Create a result carrying a confidence value.
    pub fn new(verdict: Verdict, reason: impl Into<String>, confidence: f64) -> Self {
        Self {
            verdict,
            reason: reason.into(),
            confidence: Some(confidence),
            details: None,
            problematic_clauses: None,
            text_length: None,
        }
    }

    /// Create a result with no confidence value.
    pub fn bare(verdict: Verdict, reason: impl Into<String>) -> Self {
        Self {
            verdict,
            reason: reason.into(),
            confidence: None,
            details: None,
            problematic_clauses: None,
            text_length: None,
        }
    }

    /// A failed classification: verdict `unknown`, confidence 0.0.
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self::new(Verdict::Unknown, reason, 0.0)
    }

    /// A rejected request: verdict `error`.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::bare(Verdict::Error, reason)
    }

    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(Box::new(details));
        self
    }
}
