//! URL feature extraction.
//!
//! Turns a raw URL into a fixed set of lexical features. The order in which
//! those features are handed to a score model is defined once, by name, in
//! [`FEATURE_LAYOUT`]; models are checked against it when they are loaded.

use url::Url;

/// Feature names in the exact order they appear in the model input vector.
pub const FEATURE_LAYOUT: &[&str] = &[
    "url_length",          // 0: characters in the full URL
    "domain_length",       // 1: characters in the authority (host, port, userinfo)
    "path_length",         // 2: characters in the path
    "has_subdomain",       // 3: host has more than two labels
    "has_hyphen",          // 4: '-' in host
    "has_numbers",         // 5: digit in host
    "suspicious_keywords", // 6: phishing keyword anywhere in the URL
    "suspicious_tld",      // 7: free/abused TLD in host
    "path_depth",          // 8: non-empty path segments
    "has_query",           // 9: non-empty query string
    "has_fragment",        // 10: non-empty fragment
];

/// Number of features in the model input vector.
pub const FEATURE_COUNT: usize = 11;

/// Keywords commonly found in credential-phishing URLs.
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "secure", "account", "login", "verify", "update", "confirm", "bank", "paypal",
];

/// TLDs with a high rate of abuse, matched as host substrings.
pub const SUSPICIOUS_TLDS: &[&str] = &[".tk", ".ml", ".ga", ".cf"];

/// Lexical features of a single URL.
///
/// A URL that fails to parse yields the default (all-zero) record. That
/// record means "no signal", not "benign"; see [`UrlFeatures::is_empty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlFeatures {
    pub url_length: usize,
    pub domain_length: usize,
    pub path_length: usize,
    pub has_subdomain: bool,
    pub has_hyphen: bool,
    pub has_numbers: bool,
    pub suspicious_keywords: bool,
    pub suspicious_tld: bool,
    pub path_depth: usize,
    pub has_query: bool,
    pub has_fragment: bool,
}

impl UrlFeatures {
    /// Extract features from a URL string.
    pub fn extract(raw: &str) -> Self {
        let parsed = match Url::parse(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(url = raw, error = %e, "URL did not parse, no features");
                return Self::default();
            }
        };

        // Lengths are measured on the text as written, not on the
        // normalised form the parser produces
        let (netloc, path) = split_raw(raw);
        let host = netloc.to_lowercase();
        let path = path.to_lowercase();
        let lower = raw.to_lowercase();

        Self {
            url_length: raw.chars().count(),
            domain_length: host.chars().count(),
            path_length: path.chars().count(),
            has_subdomain: host.split('.').count() > 2,
            has_hyphen: host.contains('-'),
            has_numbers: host.chars().any(|c| c.is_ascii_digit()),
            suspicious_keywords: SUSPICIOUS_KEYWORDS.iter().any(|k| lower.contains(k)),
            suspicious_tld: SUSPICIOUS_TLDS.iter().any(|t| host.contains(t)),
            path_depth: path.split('/').filter(|s| !s.is_empty()).count(),
            has_query: parsed.query().is_some_and(|q| !q.is_empty()),
            has_fragment: parsed.fragment().is_some_and(|f| !f.is_empty()),
        }
    }

    /// True for the record produced by an unparseable URL.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Look up a feature by its layout name.
    pub fn get(&self, name: &str) -> Option<f32> {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let value = match name {
            "url_length" => self.url_length as f32,
            "domain_length" => self.domain_length as f32,
            "path_length" => self.path_length as f32,
            "has_subdomain" => flag(self.has_subdomain),
            "has_hyphen" => flag(self.has_hyphen),
            "has_numbers" => flag(self.has_numbers),
            "suspicious_keywords" => flag(self.suspicious_keywords),
            "suspicious_tld" => flag(self.suspicious_tld),
            "path_depth" => self.path_depth as f32,
            "has_query" => flag(self.has_query),
            "has_fragment" => flag(self.has_fragment),
            _ => return None,
        };
        Some(value)
    }

    /// Numeric vector ordered by [`FEATURE_LAYOUT`].
    pub fn to_vector(&self) -> [f32; FEATURE_COUNT] {
        let mut vector = [0.0f32; FEATURE_COUNT];
        for (slot, name) in vector.iter_mut().zip(FEATURE_LAYOUT) {
            *slot = self.get(name).unwrap_or(0.0);
        }
        vector
    }
}

/// Authority and path of a URL exactly as written.
///
/// `scheme://authority/path?query#fragment` yields `(authority, /path)`. A
/// URL with no `//` after the scheme has an empty authority.
fn split_raw(raw: &str) -> (&str, &str) {
    let rest = raw.split_once(':').map_or(raw, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or("");

    match rest.strip_prefix("//") {
        Some(after) => match after.find('/') {
            Some(slash) => after.split_at(slash),
            None => (after, ""),
        },
        None => ("", rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_every_layout_name_resolves() {
        let features = UrlFeatures::default();
        for name in FEATURE_LAYOUT {
            assert!(features.get(name).is_some(), "unresolved feature {name}");
        }
        assert!(features.get("nonsense").is_none());
    }

    #[test]
    fn test_phishing_style_url() {
        let f = UrlFeatures::extract("http://paypal-secure-login.tk/verify");
        assert_eq!(f.url_length, 36);
        assert_eq!(f.domain_length, 22);
        assert_eq!(f.path_length, 7);
        assert!(!f.has_subdomain);
        assert!(f.has_hyphen);
        assert!(!f.has_numbers);
        assert!(f.suspicious_keywords);
        assert!(f.suspicious_tld);
        assert_eq!(f.path_depth, 1);
        assert!(!f.has_query);
        assert!(!f.has_fragment);
    }

    #[test]
    fn test_subdomain_query_and_fragment() {
        let f = UrlFeatures::extract("https://www.example.co.uk/a/b/c?x=1#top");
        assert!(f.has_subdomain);
        assert_eq!(f.path_depth, 3);
        assert!(f.has_query);
        assert!(f.has_fragment);
        assert!(!f.suspicious_keywords);
    }

    #[test]
    fn test_host_is_lowercased() {
        let f = UrlFeatures::extract("http://Login-365.EXAMPLE.ML/");
        assert!(f.has_numbers);
        assert!(f.has_hyphen);
        assert!(f.suspicious_tld);
        assert!(f.suspicious_keywords);
    }

    #[test]
    fn test_keyword_matches_anywhere_case_insensitive() {
        let f = UrlFeatures::extract("https://example.com/Account/Settings");
        assert!(f.suspicious_keywords);
        assert!(!f.suspicious_tld);
    }

    #[test]
    fn test_empty_query_is_not_a_query() {
        let f = UrlFeatures::extract("https://example.com/?");
        assert!(!f.has_query);
    }

    #[test]
    fn test_malformed_url_yields_default() {
        let f = UrlFeatures::extract("not a url at all");
        assert!(f.is_empty());
        assert_eq!(f.to_vector(), [0.0; FEATURE_COUNT]);
    }

    #[test]
    fn test_vector_follows_layout() {
        let f = UrlFeatures::extract("http://paypal-secure-login.tk/verify");
        let v = f.to_vector();
        assert_eq!(v[0], 36.0);
        assert_eq!(v[1], 22.0);
        assert_eq!(v[4], 1.0);
        assert_eq!(v[5], 0.0);
        assert_eq!(v[6], 1.0);
        assert_eq!(v[7], 1.0);
        assert_eq!(v[8], 1.0);
    }

    #[test]
    fn test_bare_host_has_empty_path() {
        let f = UrlFeatures::extract("https://example.com");
        assert_eq!(f.path_length, 0);
        assert_eq!(f.path_depth, 0);
        assert_eq!(f.domain_length, 11);
    }

    #[test]
    fn test_lengths_use_raw_text() {
        let f = UrlFeatures::extract("http://example.com/a b");
        assert_eq!(f.path_length, 4);

        let f = UrlFeatures::extract("http://bücher.example/");
        assert_eq!(f.domain_length, 14);
        assert_eq!(f.path_length, 1);
    }

    #[test]
    fn test_port_counts_toward_domain() {
        let f = UrlFeatures::extract("http://example.com:8080/login");
        assert_eq!(f.domain_length, 16);
        assert!(f.has_numbers);
        assert_eq!(f.path_length, 6);
    }

    #[test]
    fn test_split_raw() {
        assert_eq!(split_raw("https://a.example/x/y?q=1#f"), ("a.example", "/x/y"));
        assert_eq!(split_raw("https://a.example?q=1"), ("a.example", ""));
        assert_eq!(split_raw("mailto:someone@example.com"), ("", "someone@example.com"));
    }
}
