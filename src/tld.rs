//! Swaps the TLD against a fixed candidate list, mirroring
//! `dnstwist.py::TldDict`. The TLD list itself is lifted verbatim from
//! `h4x0r-DomFuzz::generate_tld_variations`.

use crate::candidate::{Algorithm, Candidate};
use crate::generator::Generator;
use crate::split::Split;

pub const DEFAULT_TLDS: &[&str] = &[
    "com", "net", "org", "info", "biz", "us", "co", "io", "me", "app", "dev", "tech", "online",
    "site", "store", "shop", "uk", "ca", "de", "fr", "ru", "cn", "jp", "au", "br", "tk", "ml",
    "ga", "cf",
];

pub struct TldSwapper {
    split: Split,
    tlds: Vec<String>,
}

impl TldSwapper {
    pub fn new(split: Split) -> Self {
        Self { split, tlds: DEFAULT_TLDS.iter().map(|s| s.to_string()).collect() }
    }

    pub fn with_tlds(split: Split, tlds: Vec<String>) -> Self {
        Self { split, tlds }
    }
}

impl Generator for TldSwapper {
    fn generate(&self) -> Vec<Candidate> {
        self.tlds
            .iter()
            .filter(|t| t.as_str() != self.split.tld)
            .map(|t| Candidate::new(Algorithm::TldSwap, format!("{}.{}", self.split.stem, t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_original_tld() {
        let split = Split { stem: "example".into(), tld: "com".into() };
        let swapper = TldSwapper::new(split);
        let names: Vec<_> = swapper.generate().into_iter().map(|c| c.name).collect();
        assert!(!names.contains(&"example.com".to_string()));
        assert!(names.contains(&"example.net".to_string()));
    }
}
