//! URL suspicion scoring.
//!
//! A [`ScoreProvider`] turns URL features into a scalar suspicion score.
//! The classifier holds a [`UrlScorer`], which either wraps a provider or
//! marks that only the rule-based fallback is available.

mod heuristic;
mod onnx;

pub use heuristic::{heuristic_classification, suspicious_count};
pub use onnx::{check_schema, OnnxOptions, OnnxScoreProvider};

use std::any::Any;

use crate::features::UrlFeatures;
use crate::Error;

/// A pre-fitted model that scores URL features.
///
/// Implementations build their input from the named feature layout, so
/// the positional order is fixed in one place.
pub trait ScoreProvider: Send + Sync {
    /// The name of this provider (for logging).
    fn name(&self) -> &'static str;

    /// Suspicion score for the given features.
    ///
    /// Calibrated models return the positive-class probability in [0, 1];
    /// others return their raw decision output.
    fn score(&self, features: &UrlFeatures) -> Result<f64, Error>;
}

/// Scoring capability available to the URL classifier.
pub enum UrlScorer {
    /// A loaded model.
    Model(Box<dyn ScoreProvider>),
    /// No model; the rule-based fallback decides.
    Heuristic,
}

impl UrlScorer {
    /// Wrap a provider.
    pub fn model<P: ScoreProvider + 'static>(provider: P) -> Self {
        UrlScorer::Model(Box::new(provider))
    }

    /// Load the ONNX model described by `options`.
    ///
    /// A missing file, a feature schema mismatch or a runtime failure all
    /// degrade to [`UrlScorer::Heuristic`] instead of failing startup.
    pub fn load_or_heuristic(options: &OnnxOptions) -> Self {
        if !options.model_path.exists() {
            tracing::warn!(
                path = %options.model_path.display(),
                "score model not found, using heuristic URL scoring"
            );
            return UrlScorer::Heuristic;
        }

        match OnnxScoreProvider::load(options) {
            Ok(provider) => {
                tracing::info!(path = %options.model_path.display(), "score model loaded");
                UrlScorer::model(provider)
            }
            Err(e) => {
                tracing::warn!(
                    path = %options.model_path.display(),
                    error = %e,
                    "score model unavailable, using heuristic URL scoring"
                );
                UrlScorer::Heuristic
            }
        }
    }

    pub fn has_model(&self) -> bool {
        matches!(self, UrlScorer::Model(_))
    }

    /// The wrapped provider, if any.
    pub fn provider(&self) -> Option<&dyn ScoreProvider> {
        match self {
            UrlScorer::Model(provider) => Some(provider.as_ref()),
            UrlScorer::Heuristic => None,
        }
    }
}

impl std::fmt::Debug for UrlScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlScorer::Model(provider) => write!(f, "UrlScorer::Model({})", provider.name()),
            UrlScorer::Heuristic => write!(f, "UrlScorer::Heuristic"),
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}
