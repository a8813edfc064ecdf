//! Marketplace listing policy.

use crate::policy::{ClassifyError, ContentPolicy, ContentType, Engine, Payload};
use crate::verdict::{Classification, Details, Verdict};

/// Listing URL plus title/description/seller text.
///
/// A phishing URL outranks suspicious text; anything else is benign.
pub struct EbayPolicy;

impl ContentPolicy for EbayPolicy {
    fn content_type(&self) -> ContentType {
        ContentType::Ebay
    }

    fn classify(&self, payload: &Payload, engine: &Engine) -> Result<Classification, ClassifyError> {
        let url = payload.text("url");
        let combined = format!(
            "{} {} {}",
            payload.text("title"),
            payload.text("desc"),
            payload.text("seller")
        );
        let combined = combined.trim();

        let url_result = url_analysis(engine, &url);
        let text_result = engine.text().analyze(combined, ContentType::Ebay);

        let result = if url_result.verdict == Verdict::Phishing {
            Classification::bare(Verdict::Phishing, format!("URL flagged: {}", url_result.reason))
        } else if text_result.verdict == Verdict::Suspicious {
            Classification::bare(
                Verdict::Suspicious,
                format!("Content analysis: {}", text_result.reason),
            )
        } else {
            Classification::bare(Verdict::Benign, "No suspicious patterns detected")
        };

        Ok(result.with_details(Details {
            url_analysis: url_result,
            content_analysis: text_result,
            channel: None,
        }))
    }
}

/// URL sub-result, or a placeholder when the payload has no URL.
pub(super) fn url_analysis(engine: &Engine, url: &str) -> Classification {
    if url.is_empty() {
        Classification::bare(Verdict::Unknown, "No URL")
    } else {
        engine.urls().classify(url)
    }
}
