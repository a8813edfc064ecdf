//! Terms of service policy.

use crate::policy::{ClassifyError, ContentPolicy, ContentType, Engine, Payload};
use crate::text::matched_clauses;
use crate::verdict::{Classification, Verdict};

/// Distinct clause patterns needed for a `problematic` verdict.
const PROBLEMATIC_CLAUSES: usize = 3;

/// Counts which of the fixed clause patterns occur in the text.
pub struct TosPolicy;

impl ContentPolicy for TosPolicy {
    fn content_type(&self) -> ContentType {
        ContentType::Tos
    }

    fn classify(&self, payload: &Payload, _engine: &Engine) -> Result<Classification, ClassifyError> {
        let text = payload.text("text");
        if text.is_empty() {
            return Err(ClassifyError::MissingField("text"));
        }

        let clauses = matched_clauses(&text);
        let found = clauses.len();

        let (verdict, reason) = if found >= PROBLEMATIC_CLAUSES {
            (
                Verdict::Problematic,
                format!("Found {} potentially problematic clauses", found),
            )
        } else if found >= 1 {
            (
                Verdict::Moderate,
                format!("Found {} potentially problematic clauses", found),
            )
        } else {
            (
                Verdict::Acceptable,
                "No obviously problematic clauses detected".to_string(),
            )
        };

        let mut result = Classification::bare(verdict, reason);
        result.problematic_clauses = Some(clauses.into_iter().map(String::from).collect());
        result.text_length = Some(text.chars().count());
        Ok(result)
    }
}
