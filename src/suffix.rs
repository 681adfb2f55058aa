//! Splits the two-letter-country-TLD portion of the public suffix list into
//! a lookup table of `tld -> [second-level labels]`, mirroring
//! `dnstwist.py`'s `parse_effective_tld_names`.

use regex::Regex;
use std::collections::HashMap;

lazy_static::lazy_static! {
    static ref TLD_LINE: Regex = Regex::new(r"(?i)^[a-z]{2,4}\.[a-z]{2}$").unwrap();
}

/// `tld -> second-level labels registered under it`, e.g. `uk -> [co, org, me, ...]`.
#[derive(Debug, Default, Clone)]
pub struct PublicSuffixIndex {
    cc_tld: HashMap<String, Vec<String>>,
}

impl PublicSuffixIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index from the raw contents of an effective-TLD-names file.
    /// Only lines matching `^[a-z]{2,4}\.[a-z]{2}$` (case-insensitive) are
    /// consumed; everything else is ignored. Reading the file itself is the
    /// caller's concern (it's the external collaborator spec.md §1 excludes
    /// from the core).
    pub fn from_str(contents: &str) -> Self {
        let mut cc_tld: HashMap<String, Vec<String>> = HashMap::new();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if !TLD_LINE.is_match(line) {
                continue;
            }
            let lower = line.to_ascii_lowercase();
            if let Some((sld, tld)) = lower.split_once('.') {
                cc_tld.entry(tld.to_string()).or_default().push(sld.to_string());
            }
        }
        Self { cc_tld }
    }

    /// True if `sld` is a registered second-level label under `tld`.
    pub fn contains(&self, tld: &str, sld: &str) -> bool {
        self.cc_tld
            .get(tld)
            .map(|slds| slds.iter().any(|s| s == sld))
            .unwrap_or(false)
    }

    pub fn is_known_tld(&self, tld: &str) -> bool {
        self.cc_tld.contains_key(tld)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_matching_lines() {
        let idx = PublicSuffixIndex::from_str(
            "co.uk\n\
             org.uk\n\
             # a comment line that should never match\n\
             toolong.ukx\n\
             com\n\
             ab.cd\n",
        );
        assert!(idx.contains("uk", "co"));
        assert!(idx.contains("uk", "org"));
        assert!(idx.contains("cd", "ab"));
        assert!(!idx.contains("uk", "toolong"));
        assert!(!idx.is_known_tld("com"));
    }

    #[test]
    fn case_insensitive() {
        let idx = PublicSuffixIndex::from_str("CO.UK\n");
        assert!(idx.contains("uk", "co"));
    }
}
