//! Renders the frozen SuccessList in one of four shapes (spec.md §4.8).
//! `Styler` replaces the original's module-level `FG_*`/`ST_*` ANSI
//! constants (spec.md §9) with a collaborator built once from terminal
//! capability.

use std::io::IsTerminal;

use serde::Serialize;

use crate::candidate::{Candidate, RecordKind};

const RECORD_ORDER: [RecordKind; 3] = [RecordKind::A, RecordKind::Ns, RecordKind::Mx];

/// ANSI styling, resolved once from whether stdout is a terminal.
/// Mirrors the original's `FG_*`/`ST_*` globals without module state.
pub struct Styler {
    bright: &'static str,
    reset: &'static str,
    yellow: &'static str,
}

impl Styler {
    pub fn new() -> Self {
        if std::io::stdout().is_terminal() {
            Self { bright: "\x1b[1m", reset: "\x1b[0m", yellow: "\x1b[33m" }
        } else {
            Self { bright: "", reset: "", yellow: "" }
        }
    }

    fn heading(&self, text: &str) -> String {
        format!("{}{}{}", self.bright, text, self.reset)
    }

    fn highlight(&self, text: &str) -> String {
        format!("{}{}{}", self.yellow, text, self.reset)
    }
}

impl Default for Styler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonRow {
    fuzzer: String,
    #[serde(rename = "domain-name")]
    domain_name: String,
    #[serde(rename = "dns-a", skip_serializing_if = "Vec::is_empty")]
    dns_a: Vec<String>,
    #[serde(rename = "dns-ns", skip_serializing_if = "Vec::is_empty")]
    dns_ns: Vec<String>,
    #[serde(rename = "dns-mx", skip_serializing_if = "Vec::is_empty")]
    dns_mx: Vec<String>,
}

pub struct Reporter {
    show_all: bool,
    styler: Styler,
}

impl Reporter {
    pub fn new(show_all: bool) -> Self {
        Self { show_all, styler: Styler::new() }
    }

    /// One IDNA-encoded name per line, no resolution performed; used by
    /// `-f idle` before the worker pool runs.
    pub fn render_idle(&self, candidates: &[Candidate]) -> String {
        let mut out = String::new();
        for candidate in candidates {
            if let Ok(encoded) = idna::domain_to_ascii(&candidate.name) {
                out.push_str(&encoded);
                out.push('\n');
            }
        }
        out
    }

    /// Columns `algorithm`, `name`, `info`, width-aligned to the widest
    /// value present.
    pub fn render_cli(&self, successes: &[Candidate]) -> String {
        if successes.is_empty() {
            return format!("{}\n", self.styler.heading("No live variants found."));
        }

        let rows: Vec<(String, String, String)> = successes
            .iter()
            .map(|c| (c.algorithm.to_string(), c.name.clone(), self.info_column(c)))
            .collect();

        let algo_width = rows.iter().map(|(a, _, _)| a.len()).max().unwrap_or(0);
        let name_width = rows.iter().map(|(_, n, _)| n.len()).max().unwrap_or(0);

        let mut out = String::new();
        for (algorithm, name, info) in rows {
            out.push_str(&format!(
                "{:<awidth$} {:<nwidth$} {}\n",
                self.styler.heading(&algorithm),
                name,
                info,
                awidth = algo_width + (self.styler.bright.len() + self.styler.reset.len()),
                nwidth = name_width,
            ));
        }
        out
    }

    fn info_column(&self, candidate: &Candidate) -> String {
        let mut parts = Vec::new();
        for kind in RECORD_ORDER {
            if let Some(values) = candidate.records_of(kind) {
                if values.is_empty() {
                    continue;
                }
                let rendered = if self.show_all {
                    values.join(";")
                } else {
                    values[0].clone()
                };
                parts.push(format!("{}:{}", kind.csv_column(), rendered));
            }
        }
        if parts.is_empty() {
            String::new()
        } else {
            self.styler.highlight(&parts.join(" "))
        }
    }

    /// Header `fuzzer,domain-name,dns-a,dns-aaaa,dns-mx,dns-ns,
    /// geoip-country,whois-created,whois-updated,ssdeep-score`. The last
    /// five columns are always blank: those probes are out of scope
    /// (spec.md §1).
    pub fn render_csv(&self, successes: &[Candidate]) -> String {
        let mut writer = csv::WriterBuilder::new().from_writer(vec![]);
        let _ = writer.write_record([
            "fuzzer",
            "domain-name",
            "dns-a",
            "dns-aaaa",
            "dns-mx",
            "dns-ns",
            "geoip-country",
            "whois-created",
            "whois-updated",
            "ssdeep-score",
        ]);

        for candidate in successes {
            let a = self.joined(candidate, RecordKind::A);
            let mx = self.joined(candidate, RecordKind::Mx);
            let ns = self.joined(candidate, RecordKind::Ns);
            let _ = writer.write_record([
                candidate.algorithm.to_string(),
                candidate.name.clone(),
                a,
                String::new(),
                mx,
                ns,
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ]);
        }

        String::from_utf8(writer.into_inner().unwrap_or_default()).unwrap_or_default()
    }

    fn joined(&self, candidate: &Candidate, kind: RecordKind) -> String {
        candidate
            .records_of(kind)
            .map(|values| {
                if values.is_empty() {
                    String::new()
                } else if self.show_all {
                    values.join(";")
                } else {
                    values[0].clone()
                }
            })
            .unwrap_or_default()
    }

    /// Pretty-printed array, IDNA-encoded `domain-name`, lowercased
    /// `fuzzer` tag, lowercased record arrays. Keys are sorted
    /// alphabetically (spec.md §4.8): `JsonRow` is serialized through
    /// `serde_json::Value`, whose `Map` is a `BTreeMap` without the
    /// `preserve_order` feature, rather than relying on struct field
    /// declaration order.
    pub fn render_json(&self, successes: &[Candidate]) -> serde_json::Result<String> {
        let rows: Vec<serde_json::Value> = successes
            .iter()
            .map(|c| {
                serde_json::to_value(JsonRow {
                    fuzzer: c.algorithm.to_string().to_lowercase(),
                    domain_name: idna::domain_to_ascii(&c.name).unwrap_or_else(|_| c.name.clone()),
                    dns_a: self.lowered(c, RecordKind::A),
                    dns_ns: self.lowered(c, RecordKind::Ns),
                    dns_mx: self.lowered(c, RecordKind::Mx),
                })
            })
            .collect::<serde_json::Result<_>>()?;
        serde_json::to_string_pretty(&rows)
    }

    fn lowered(&self, candidate: &Candidate, kind: RecordKind) -> Vec<String> {
        candidate
            .records_of(kind)
            .map(|values| values.iter().map(|v| v.to_lowercase()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Algorithm;

    fn success(name: &str, ip: &str) -> Candidate {
        let mut c = Candidate::new(Algorithm::Bitsquatting, name);
        c.push_record(RecordKind::A, ip.to_string());
        c
    }

    #[test]
    fn idle_emits_idna_names_only() {
        let reporter = Reporter::new(false);
        let out = reporter.render_idle(&[Candidate::new(Algorithm::Original, "example.com")]);
        assert_eq!(out, "example.com\n");
    }

    #[test]
    fn csv_header_has_ten_columns_and_blank_side_channels() {
        let reporter = Reporter::new(false);
        let out = reporter.render_csv(&[success("examp1e.com", "1.2.3.4")]);
        let mut lines = out.lines();
        let header = lines.next().unwrap();
        assert_eq!(header.split(',').count(), 10);
        let row = lines.next().unwrap();
        assert!(row.starts_with("Bitsquatting,examp1e.com,1.2.3.4,,,,,,,"));
    }

    #[test]
    fn csv_shows_first_value_unless_show_all() {
        let mut c = success("examp1e.com", "1.2.3.4");
        c.push_record(RecordKind::A, "5.6.7.8".to_string());

        let first_only = Reporter::new(false).render_csv(std::slice::from_ref(&c));
        let row = first_only.lines().nth(1).unwrap();
        assert!(row.starts_with("Bitsquatting,examp1e.com,1.2.3.4,"));
        assert!(!row.contains("5.6.7.8"));

        let all = Reporter::new(true).render_csv(&[c]);
        let row = all.lines().nth(1).unwrap();
        assert!(row.starts_with("Bitsquatting,examp1e.com,1.2.3.4;5.6.7.8,"));
    }

    #[test]
    fn json_lowercases_fuzzer_tag_and_idna_encodes_name() {
        let reporter = Reporter::new(false);
        let out = reporter.render_json(&[success("examp1e.com", "1.2.3.4")]).unwrap();
        assert!(out.contains("\"fuzzer\": \"bitsquatting\""));
        assert!(out.contains("\"domain-name\": \"examp1e.com\""));
    }

    #[test]
    fn cli_shows_first_value_unless_show_all() {
        let mut c = success("examp1e.com", "1.2.3.4");
        c.push_record(RecordKind::A, "5.6.7.8".to_string());

        let first_only = Reporter::new(false).render_cli(std::slice::from_ref(&c));
        assert!(first_only.contains("1.2.3.4"));
        assert!(!first_only.contains("5.6.7.8"));

        let all = Reporter::new(true).render_cli(&[c]);
        assert!(all.contains("1.2.3.4;5.6.7.8"));
    }
}
