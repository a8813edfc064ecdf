//! Known-bad domain lookup.
//!
//! The table is loaded once at startup from a CSV dataset and then only read.
//! An absent table is a distinct state from a domain that is not listed, so
//! callers can tell "not known bad" apart from "no data".

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use url::Url;

use crate::Error;

/// Outcome of checking a URL against the reputation data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainMatch {
    /// Host is on the known-bad list.
    Listed(String),
    /// Table is loaded and the host is not on it.
    NotListed,
    /// No table was loaded.
    Unavailable,
}

/// Read-only set of lowercased hosts known to serve phishing content.
#[derive(Debug, Clone, Default)]
pub struct DomainTable {
    domains: HashSet<String>,
}

impl DomainTable {
    /// Build a table from an iterator of domains.
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    /// Load a table from a CSV file with a `domain` column.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Parse CSV records and collect the `domain` column.
    ///
    /// Quoted fields may contain commas, `""` escapes and line breaks. A
    /// dataset without a `domain` column is accepted and yields an empty
    /// table.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut reader = BufReader::new(reader);

        let header = read_record(&mut reader)?
            .ok_or_else(|| Error::Dataset("empty reputation dataset".to_string()))?;
        let column = header.iter().position(|name| {
            name.trim_start_matches('\u{feff}')
                .trim()
                .eq_ignore_ascii_case("domain")
        });

        let Some(column) = column else {
            tracing::warn!("reputation dataset has no `domain` column, table is empty");
            return Ok(Self::default());
        };

        let mut domains = Vec::new();
        while let Some(record) = read_record(&mut reader)? {
            if let Some(domain) = record.into_iter().nth(column) {
                domains.push(domain);
            }
        }

        Ok(Self::from_domains(domains))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Exact, case-insensitive membership test for a host.
    pub fn contains_host(&self, host: &str) -> bool {
        self.domains.contains(&host.to_lowercase())
    }

    /// Check a URL's host against the table.
    pub fn lookup(&self, url: &str) -> DomainMatch {
        match host_of(url) {
            Some(host) if self.domains.contains(&host) => DomainMatch::Listed(host),
            _ => DomainMatch::NotListed,
        }
    }
}

/// Reputation data as seen by the classifier: either loaded or absent.
#[derive(Debug, Clone, Default)]
pub enum Reputation {
    Loaded(DomainTable),
    #[default]
    Unavailable,
}

impl Reputation {
    /// Load the dataset at `path`, degrading to `Unavailable` on failure.
    pub fn load_or_unavailable<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "reputation dataset not found, domain lookup disabled");
            return Reputation::Unavailable;
        }
        match DomainTable::load_csv(path) {
            Ok(table) => {
                tracing::info!(path = %path.display(), domains = table.len(), "reputation dataset loaded");
                Reputation::Loaded(table)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load reputation dataset");
                Reputation::Unavailable
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Reputation::Loaded(_))
    }

    /// Number of listed domains, zero when unavailable.
    pub fn len(&self) -> usize {
        match self {
            Reputation::Loaded(table) => table.len(),
            Reputation::Unavailable => 0,
        }
    }

    pub fn check(&self, url: &str) -> DomainMatch {
        match self {
            Reputation::Loaded(table) => table.lookup(url),
            Reputation::Unavailable => DomainMatch::Unavailable,
        }
    }
}

/// Lowercased host of a URL, if it parses and has one.
fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(|h| h.to_lowercase())
}

/// Read one CSV record, joining physical lines while a quoted field is open.
///
/// Returns `None` at end of input. An unterminated quote runs to the end of
/// the input.
fn read_record<R: BufRead>(reader: &mut R) -> Result<Option<Vec<String>>, Error> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = String::new();
    let mut started = false;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            if !started {
                return Ok(None);
            }
            break;
        }
        started = true;

        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
                '\r' | '\n' if !in_quotes => {}
                _ => field.push(c),
            }
        }

        if !in_quotes {
            break;
        }
    }

    fields.push(field);
    Ok(Some(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(domains: &[&str]) -> DomainTable {
        DomainTable::from_domains(domains.iter().copied())
    }

    #[test]
    fn test_lookup_listed_host() {
        let t = table(&["evil.example"]);
        assert_eq!(
            t.lookup("https://evil.example/login"),
            DomainMatch::Listed("evil.example".to_string())
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let t = table(&["Evil.Example"]);
        assert_eq!(
            t.lookup("HTTPS://EVIL.EXAMPLE/"),
            DomainMatch::Listed("evil.example".to_string())
        );
        assert!(t.contains_host("EVIL.example"));
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let t = table(&["evil.example"]);
        assert_eq!(t.lookup("https://sub.evil.example/"), DomainMatch::NotListed);
        assert_eq!(t.lookup("https://notevil.example/"), DomainMatch::NotListed);
    }

    #[test]
    fn test_unparseable_url_is_not_listed() {
        let t = table(&["evil.example"]);
        assert_eq!(t.lookup("evil.example"), DomainMatch::NotListed);
    }

    #[test]
    fn test_unavailable_is_distinct_from_not_listed() {
        assert_eq!(
            Reputation::Unavailable.check("https://evil.example/"),
            DomainMatch::Unavailable
        );
        let loaded = Reputation::Loaded(table(&["other.example"]));
        assert_eq!(loaded.check("https://evil.example/"), DomainMatch::NotListed);
        assert!(loaded.is_loaded());
        assert!(!Reputation::Unavailable.is_loaded());
    }

    #[test]
    fn test_csv_domain_column() {
        let csv = "url,domain,label\n\
                   http://a.example/x,A.Example,bad\n\
                   \"http://b.example/?q=1,2\",b.example,bad\n\
                   \n\
                   http://c.example/,,good\n";
        let t = DomainTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(t.len(), 2);
        assert!(t.contains_host("a.example"));
        assert!(t.contains_host("b.example"));
    }

    #[test]
    fn test_csv_without_domain_column_is_empty() {
        let csv = "URL,Label\nhttp://a.example/,bad\n";
        let t = DomainTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn test_csv_empty_input_is_error() {
        assert!(DomainTable::from_csv_reader("".as_bytes()).is_err());
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let reputation = Reputation::load_or_unavailable("/nonexistent/phishing.csv");
        assert!(!reputation.is_loaded());
        assert_eq!(reputation.len(), 0);
    }

    #[test]
    fn test_load_csv_from_disk() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "domain").unwrap();
        writeln!(file, "phish.example").unwrap();
        let reputation = Reputation::load_or_unavailable(file.path());
        assert!(reputation.is_loaded());
        assert_eq!(reputation.len(), 1);
    }

    #[test]
    fn test_read_quoted_fields() {
        let mut input = r#"a,"b,c","d""e""#.as_bytes();
        assert_eq!(
            read_record(&mut input).unwrap(),
            Some(vec!["a".to_string(), "b,c".to_string(), "d\"e".to_string()])
        );
        assert_eq!(read_record(&mut input).unwrap(), None);
    }

    #[test]
    fn test_quoted_line_break_stays_in_field() {
        let csv = "url,domain\r\n\
                   \"http://a.example/\nsecond line\",a.example\r\n\
                   http://b.example/,b.example\r\n";
        let t = DomainTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(t.len(), 2);
        assert!(t.contains_host("a.example"));
        assert!(t.contains_host("b.example"));
    }

    #[test]
    fn test_header_with_bom() {
        let csv = "\u{feff}domain\nphish.example\n";
        let t = DomainTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert!(t.contains_host("phish.example"));
    }
}
