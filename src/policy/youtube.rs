//! Video metadata policy.

use crate::policy::ebay::url_analysis;
use crate::policy::{ClassifyError, ContentPolicy, ContentType, Engine, Payload};
use crate::text::misinformation_keywords;
use crate::verdict::{Classification, Details, Verdict};

/// Title and description text plus a misinformation keyword check.
///
/// The channel name is not scored, only echoed back in the details.
pub struct YoutubePolicy;

impl ContentPolicy for YoutubePolicy {
    fn content_type(&self) -> ContentType {
        ContentType::Youtube
    }

    fn classify(&self, payload: &Payload, engine: &Engine) -> Result<Classification, ClassifyError> {
        let url = payload.text("url");
        let channel = payload.text("channel");
        let combined = format!("{} {}", payload.text("title"), payload.text("desc"));
        let combined = combined.trim();

        let url_result = url_analysis(engine, &url);
        let text_result = engine.text().analyze(combined, ContentType::Youtube);
        let keywords = misinformation_keywords(combined);

        let result = if !keywords.is_empty() || text_result.verdict == Verdict::Suspicious {
            Classification::bare(
                Verdict::Misleading,
                format!("Potential misinformation detected: {}", text_result.reason),
            )
        } else {
            Classification::bare(Verdict::Reliable, "No obvious misinformation patterns detected")
        };

        Ok(result.with_details(Details {
            url_analysis: url_result,
            content_analysis: text_result,
            channel: Some(channel.into_owned()),
        }))
    }
}
