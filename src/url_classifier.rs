//! URL classification.
//!
//! Decision order:
//! 1. Known-bad domain list (short-circuits everything else)
//! 2. Score model, when one is loaded
//! 3. Rule-based fallback

use std::panic::{self, AssertUnwindSafe};

use crate::features::UrlFeatures;
use crate::reputation::{DomainMatch, Reputation};
use crate::scoring::{heuristic_classification, panic_message, ScoreProvider, UrlScorer};
use crate::verdict::{Classification, Verdict};
use crate::Error;

/// Confidence for a host found on the known-bad list.
const LISTED_CONFIDENCE: f64 = 0.95;

/// Scores above this are suspicious.
const SCORE_THRESHOLD: f64 = 0.5;

/// Classifies single URLs. Read-only after construction.
#[derive(Debug)]
pub struct UrlClassifier {
    reputation: Reputation,
    scorer: UrlScorer,
}

impl UrlClassifier {
    pub fn new(reputation: Reputation, scorer: UrlScorer) -> Self {
        Self { reputation, scorer }
    }

    /// Classifier with no reputation data and no model.
    pub fn heuristic_only() -> Self {
        Self::new(Reputation::Unavailable, UrlScorer::Heuristic)
    }

    pub fn reputation(&self) -> &Reputation {
        &self.reputation
    }

    pub fn scorer(&self) -> &UrlScorer {
        &self.scorer
    }

    /// Classify a URL. Failures become an `unknown` verdict with 0.0
    /// confidence.
    pub fn classify(&self, url: &str) -> Classification {
        let result = match self.try_classify(url) {
            Ok(result) => result,
            Err(e) => Classification::unknown(format!("Classification error: {}", e)),
        };
        tracing::debug!(url, verdict = %result.verdict, "url classified");
        result
    }

    /// Classify a URL, surfacing unexpected failures as errors.
    ///
    /// Score model failures are not errors here: they yield an `unknown`
    /// result naming the model error. A panicking provider counts as a
    /// failure too.
    pub fn try_classify(&self, url: &str) -> Result<Classification, Error> {
        if let DomainMatch::Listed(host) = self.reputation.check(url) {
            return Ok(Classification::new(
                Verdict::Phishing,
                format!("Domain {} matches known phishing list.", host),
                LISTED_CONFIDENCE,
            ));
        }

        let features = UrlFeatures::extract(url);

        if let UrlScorer::Model(provider) = &self.scorer {
            // Nothing to score for an unparseable URL; the rules still apply.
            if !features.is_empty() {
                return Ok(match score_guarded(provider.as_ref(), &features) {
                    Ok(score) => score_classification(score),
                    Err(e) => {
                        tracing::warn!(url, provider = provider.name(), error = %e, "score model failed");
                        Classification::unknown(format!("Model error: {}", e))
                    }
                });
            }
        }

        Ok(heuristic_classification(&features))
    }
}

/// Run a provider, turning a panic into a model error.
fn score_guarded(provider: &dyn ScoreProvider, features: &UrlFeatures) -> Result<f64, Error> {
    panic::catch_unwind(AssertUnwindSafe(|| provider.score(features))).unwrap_or_else(|payload| {
        Err(Error::Model(format!(
            "provider panicked: {}",
            panic_message(payload.as_ref())
        )))
    })
}

/// Distance of a score from the decision boundary, scaled to [0, 1].
pub fn confidence_from_score(score: f64) -> f64 {
    ((score - SCORE_THRESHOLD).abs() * 2.0).min(1.0)
}

/// Map a model score to a verdict.
pub fn score_classification(score: f64) -> Classification {
    let verdict = if score > SCORE_THRESHOLD {
        Verdict::Suspicious
    } else {
        Verdict::Benign
    };
    Classification::new(
        verdict,
        format!("ML model score: {:.3}", score),
        confidence_from_score(score),
    )
}
