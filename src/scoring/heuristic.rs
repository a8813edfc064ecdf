//! Rule-based URL scoring used when no model is loaded.

use crate::features::UrlFeatures;
use crate::verdict::{Classification, Verdict};

/// Number of red flags needed to call a URL suspicious.
const SUSPICIOUS_THRESHOLD: usize = 2;

/// Count the red flags raised by a URL's features.
///
/// Flags: a phishing keyword, an abused TLD, and a host carrying both a
/// hyphen and a digit.
pub fn suspicious_count(features: &UrlFeatures) -> usize {
    [
        features.suspicious_keywords,
        features.suspicious_tld,
        features.has_hyphen && features.has_numbers,
    ]
    .iter()
    .filter(|&&flag| flag)
    .count()
}

/// Verdict from the red-flag count alone.
pub fn heuristic_classification(features: &UrlFeatures) -> Classification {
    let count = suspicious_count(features);
    if count >= SUSPICIOUS_THRESHOLD {
        Classification::new(
            Verdict::Suspicious,
            format!("Heuristic analysis: {} suspicious features detected", count),
            0.6,
        )
    } else {
        Classification::new(
            Verdict::Benign,
            "Heuristic analysis: no significant suspicious features",
            0.4,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(url: &str) -> Classification {
        heuristic_classification(&UrlFeatures::extract(url))
    }

    #[test]
    fn test_keyword_and_tld_is_suspicious() {
        let result = classify("http://paypal-secure-login.tk/verify");
        assert_eq!(result.verdict, Verdict::Suspicious);
        assert_eq!(result.confidence, Some(0.6));
        assert_eq!(result.reason, "Heuristic analysis: 2 suspicious features detected");
    }

    #[test]
    fn test_all_three_flags() {
        let f = UrlFeatures::extract("http://bank-24.ga/");
        assert_eq!(suspicious_count(&f), 3);
        assert_eq!(heuristic_classification(&f).verdict, Verdict::Suspicious);
    }

    #[test]
    fn test_hyphen_without_digit_is_not_a_flag() {
        let f = UrlFeatures::extract("http://my-site.com/");
        assert_eq!(suspicious_count(&f), 0);
    }

    #[test]
    fn test_single_flag_is_benign() {
        let result = classify("https://example.com/login");
        assert_eq!(result.verdict, Verdict::Benign);
        assert_eq!(result.confidence, Some(0.4));
    }

    #[test]
    fn test_empty_features_are_benign() {
        let result = heuristic_classification(&UrlFeatures::default());
        assert_eq!(result.verdict, Verdict::Benign);
    }
}
