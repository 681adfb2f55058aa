//! Normalizes a URL-ish input string into a `(stem, tld)` pair, mirroring
//! `dnstwist.py`'s `UrlParser` + `DomainGenerator.domain_tld`.

use crate::error::AppError;
use crate::suffix::PublicSuffixIndex;
use regex::Regex;

lazy_static::lazy_static! {
    // scheme/authority/path/query/fragment, matching the original's
    // hand-rolled RFC 3986-ish regex exactly.
    static ref URI: Regex = Regex::new(
        r"(?x)
        ^
        (?:(?P<scheme>[^:/?\#\s]+):)?
        (?://(?P<authority>[^/?\#\s]*))?
        (?P<path>[^?\#\s]*)
        (?:\?(?P<query>[^\#\s]*))?
        (?:\#(?P<fragment>[^\s]*))?
        $
        ",
    )
    .unwrap();

    static ref HOST: Regex = Regex::new(r"(?i)^([a-z0-9]+(-[a-z0-9]+)*\.)+[a-z]{2,}$").unwrap();
}

/// `(stem, tld)`. Invariant: `stem + "." + tld` is a valid DNS name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub stem: String,
    pub tld: String,
}

impl Split {
    pub fn joined(&self) -> String {
        format!("{}.{}", self.stem, self.tld)
    }
}

pub struct DomainSplitter;

impl DomainSplitter {
    /// Strip a leading scheme if present, otherwise prepend a dummy one;
    /// parse; keep the host portion of the authority (without port);
    /// lowercase; validate; then split on the public suffix index.
    pub fn split(input: &str, psl: &PublicSuffixIndex) -> Result<Split, AppError> {
        let host = Self::extract_host(input)?;
        Self::split_host(&host, psl)
    }

    fn extract_host(input: &str) -> Result<String, AppError> {
        let url = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{}", input)
        };

        let caps = URI
            .captures(&url)
            .ok_or_else(|| AppError::InvalidDomain(input.to_string()))?;

        let authority = caps
            .name("authority")
            .map(|m| m.as_str())
            .ok_or_else(|| AppError::InvalidDomain(input.to_string()))?;

        // Strip a trailing port, keeping only the host.
        let host = authority.split(':').next().unwrap_or("").to_lowercase();

        if host.len() > 255 || !HOST.is_match(&host) {
            return Err(AppError::InvalidDomain(input.to_string()));
        }

        Ok(host)
    }

    fn split_host(host: &str, psl: &PublicSuffixIndex) -> Result<Split, AppError> {
        let labels: Vec<&str> = host.split('.').collect();

        if labels.len() == 2 {
            return Ok(Split {
                stem: labels[0].to_string(),
                tld: labels[1].to_string(),
            });
        }

        let last = labels[labels.len() - 1];
        let second_last = labels[labels.len() - 2];
        if psl.is_known_tld(last) && psl.contains(last, second_last) {
            let stem = labels[..labels.len() - 2].join(".");
            return Ok(Split {
                stem,
                tld: format!("{}.{}", second_last, last),
            });
        }

        let stem = labels[..labels.len() - 1].join(".");
        Ok(Split {
            stem,
            tld: last.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn psl_with_uk() -> PublicSuffixIndex {
        PublicSuffixIndex::from_str("co.uk\norg.uk\n")
    }

    #[test]
    fn two_labels() {
        let psl = PublicSuffixIndex::empty();
        let split = DomainSplitter::split("example.com", &psl).unwrap();
        assert_eq!(split, Split { stem: "example".into(), tld: "com".into() });
    }

    #[test]
    fn compound_tld_via_psl() {
        let psl = psl_with_uk();
        let split = DomainSplitter::split("example.co.uk", &psl).unwrap();
        assert_eq!(split, Split { stem: "example".into(), tld: "co.uk".into() });
    }

    #[test]
    fn unknown_three_label_falls_back_to_last_label() {
        let psl = PublicSuffixIndex::empty();
        let split = DomainSplitter::split("www.example.com", &psl).unwrap();
        assert_eq!(split, Split { stem: "www.example".into(), tld: "com".into() });
    }

    #[test]
    fn accepts_bare_domain_without_scheme() {
        let psl = PublicSuffixIndex::empty();
        let split = DomainSplitter::split("https://example.com/path?q=1", &psl).unwrap();
        assert_eq!(split, Split { stem: "example".into(), tld: "com".into() });
    }

    #[test]
    fn strips_port() {
        let psl = PublicSuffixIndex::empty();
        let split = DomainSplitter::split("example.com:8080", &psl).unwrap();
        assert_eq!(split, Split { stem: "example".into(), tld: "com".into() });
    }

    #[test]
    fn rejects_invalid_domain() {
        let psl = PublicSuffixIndex::empty();
        assert!(DomainSplitter::split("not a domain", &psl).is_err());
        assert!(DomainSplitter::split("nodotatall", &psl).is_err());
    }
}
