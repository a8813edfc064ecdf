//! Content-type policies and request dispatch.
//!
//! Each content type has a policy that combines the URL classifier and the
//! text heuristics into one verdict. The [`Engine`] owns the shared,
//! read-only analyzers and routes a request to the policy for its type.
//!
//! # Example
//!
//! ```
//! use aegis::policy::{ClassifyRequest, Engine};
//! use aegis::verdict::Verdict;
//!
//! let engine = Engine::heuristic_only();
//! let request: ClassifyRequest = serde_json::from_value(serde_json::json!({
//!     "type": "url",
//!     "payload": {"url": "http://paypal-secure-login.tk/verify"}
//! }))
//! .unwrap();
//!
//! let result = engine.classify(&request).unwrap();
//! assert_eq!(result.verdict, Verdict::Suspicious);
//! ```

mod ebay;
mod tos;
mod url;
mod youtube;


pub use ebay::EbayPolicy;
pub use tos::TosPolicy;
pub use self::url::UrlPolicy;
pub use youtube::YoutubePolicy;

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::text::{ContentAnalyzer, TextScorer};
use crate::url_classifier::UrlClassifier;
use crate::verdict::Classification;

/// Declared type of a classification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Url,
    Ebay,
    Youtube,
    Tos,
}

impl ContentType {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Ebay => "ebay",
            ContentType::Youtube => "youtube",
            ContentType::Tos => "tos",
        }
    }

    /// Parse from a request type tag. Tags are case-sensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "url" => Some(ContentType::Url),
            "ebay" => Some(ContentType::Ebay),
            "youtube" => Some(ContentType::Youtube),
            "tos" => Some(ContentType::Tos),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request-level failures. Each one still produces an `error` verdict.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// A required payload field is missing or empty.
    #[error("No {0} provided")]
    MissingField(&'static str),
    #[error("Unknown classification type: {0}")]
    UnknownType(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Server error: {0}")]
    Internal(String),
}

impl ClassifyError {
    /// True for problems with the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ClassifyError::Internal(_))
    }

    pub fn to_classification(&self) -> Classification {
        Classification::error(self.to_string())
    }
}

/// Type-specific request fields.
///
/// Missing fields and JSON `null` read as empty strings. Non-string values
/// read as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a string field.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), Value::String(value.into()));
        self
    }

    pub fn text(&self, key: &str) -> Cow<'_, str> {
        match self.0.get(key) {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            None | Some(Value::Null) => Cow::Borrowed(""),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A classification request: `{type, payload}`.
///
/// The type tag is kept as raw JSON so a tag of the wrong JSON type is
/// reported as an unknown type rather than a malformed request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifyRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    #[serde(default)]
    pub payload: Payload,
}

impl ClassifyRequest {
    pub fn new(kind: &str, payload: Payload) -> Self {
        Self {
            kind: Some(Value::String(kind.to_string())),
            payload,
        }
    }

    /// The type tag as text. Non-string tags read as their JSON text.
    pub fn tag(&self) -> Cow<'_, str> {
        match &self.kind {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            None | Some(Value::Null) => Cow::Borrowed("<missing>"),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }
}

/// Combines the shared analyzers into a verdict for one content type.
pub trait ContentPolicy: Send + Sync {
    /// The content type this policy handles.
    fn content_type(&self) -> ContentType;

    /// Classify a payload.
    ///
    /// Returns `Err` only for request problems such as a missing required
    /// field. Analysis failures are reported inside the result.
    fn classify(&self, payload: &Payload, engine: &Engine) -> Result<Classification, ClassifyError>;
}

/// Shared analyzers plus dispatch by content type.
#[derive(Debug)]
pub struct Engine {
    urls: UrlClassifier,
    text: TextScorer,
    content: ContentAnalyzer,
}

impl Engine {
    pub fn new(urls: UrlClassifier, text: TextScorer) -> Self {
        Self {
            urls,
            text,
            content: ContentAnalyzer::new(),
        }
    }

    /// Engine with no reputation data and no score model.
    pub fn heuristic_only() -> Self {
        Self::new(UrlClassifier::heuristic_only(), TextScorer::new())
    }

    pub fn urls(&self) -> &UrlClassifier {
        &self.urls
    }

    pub fn text(&self) -> &TextScorer {
        &self.text
    }

    pub fn content(&self) -> &ContentAnalyzer {
        &self.content
    }

    /// Policy responsible for a content type.
    pub fn policy_for(content_type: ContentType) -> &'static dyn ContentPolicy {
        match content_type {
            ContentType::Url => &UrlPolicy,
            ContentType::Ebay => &EbayPolicy,
            ContentType::Youtube => &YoutubePolicy,
            ContentType::Tos => &TosPolicy,
        }
    }

    /// Route a request to its policy.
    pub fn classify(&self, request: &ClassifyRequest) -> Result<Classification, ClassifyError> {
        let tag = request.tag();
        let content_type = ContentType::from_str(&tag)
            .ok_or_else(|| ClassifyError::UnknownType(tag.into_owned()))?;
        self.classify_as(content_type, &request.payload)
    }

    pub fn classify_as(
        &self,
        content_type: ContentType,
        payload: &Payload,
    ) -> Result<Classification, ClassifyError> {
        let result = Self::policy_for(content_type).classify(payload, self)?;
        tracing::debug!(content_type = content_type.as_str(), verdict = %result.verdict, "request classified");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Verdict;
    use serde_json::json;

    fn request(value: Value) -> ClassifyRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_content_type_round_trip_names() {
        for ct in [ContentType::Url, ContentType::Ebay, ContentType::Youtube, ContentType::Tos] {
            assert_eq!(ContentType::from_str(ct.as_str()), Some(ct));
        }
        assert_eq!(ContentType::from_str("URL"), None);
    }

    #[test]
    fn test_policy_for_matches_type() {
        for ct in [ContentType::Url, ContentType::Ebay, ContentType::Youtube, ContentType::Tos] {
            assert_eq!(Engine::policy_for(ct).content_type(), ct);
        }
    }

    #[test]
    fn test_unknown_type_names_tag() {
        let engine = Engine::heuristic_only();
        let err = engine
            .classify(&request(json!({"type": "tiktok", "payload": {"url": "https://x.example/"}})))
            .unwrap_err();
        assert!(err.is_client_error());
        let result = err.to_classification();
        assert_eq!(result.verdict, Verdict::Error);
        assert_eq!(result.reason, "Unknown classification type: tiktok");
    }

    #[test]
    fn test_missing_type_is_unknown() {
        let engine = Engine::heuristic_only();
        let err = engine.classify(&request(json!({"payload": {}}))).unwrap_err();
        assert!(matches!(err, ClassifyError::UnknownType(_)));
    }

    #[test]
    fn test_non_string_type_names_tag() {
        let engine = Engine::heuristic_only();
        let err = engine
            .classify(&request(json!({"type": 5, "payload": {}})))
            .unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Unknown classification type: 5");

        let err = engine
            .classify(&request(json!({"type": ["url"], "payload": {}})))
            .unwrap_err();
        assert_eq!(err.to_string(), r#"Unknown classification type: ["url"]"#);
    }

    #[test]
    fn test_null_type_is_missing() {
        let req = request(json!({"type": null}));
        assert_eq!(req.tag(), "<missing>");
    }

    #[test]
    fn test_missing_payload_defaults_empty() {
        let req = request(json!({"type": "url"}));
        assert_eq!(req.payload, Payload::new());
    }

    #[test]
    fn test_payload_text_coercion() {
        let payload: Payload = serde_json::from_value(json!({
            "title": "Lamp",
            "price": 12.5,
            "seller": null
        }))
        .unwrap();
        assert_eq!(payload.text("title"), "Lamp");
        assert_eq!(payload.text("price"), "12.5");
        assert_eq!(payload.text("seller"), "");
        assert_eq!(payload.text("desc"), "");
    }

    #[test]
    fn test_internal_error_is_not_client_error() {
        let err = ClassifyError::Internal("boom".to_string());
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "Server error: boom");
    }
}
