//! Bare URL policy.

use crate::policy::{ClassifyError, ContentPolicy, ContentType, Engine, Payload};
use crate::verdict::Classification;

/// Delegates straight to the URL classifier.
pub struct UrlPolicy;

impl ContentPolicy for UrlPolicy {
    fn content_type(&self) -> ContentType {
        ContentType::Url
    }

    fn classify(&self, payload: &Payload, engine: &Engine) -> Result<Classification, ClassifyError> {
        let url = payload.text("url");
        if url.is_empty() {
            return Err(ClassifyError::MissingField("URL"));
        }
        Ok(engine.urls().classify(&url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Verdict;

    #[test]
    fn test_missing_url() {
        let err = UrlPolicy
            .classify(&Payload::new(), &Engine::heuristic_only())
            .unwrap_err();
        assert_eq!(err.to_string(), "No URL provided");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_delegates_to_classifier() {
        let payload = Payload::new().with("url", "https://example.com/");
        let result = UrlPolicy.classify(&payload, &Engine::heuristic_only()).unwrap();
        assert_eq!(result.verdict, Verdict::Benign);
        assert_eq!(result.confidence, Some(0.4));
    }
}
