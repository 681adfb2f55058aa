//! Command-line flag surface, mirroring `h4x0r-DomFuzz`'s `clap` derive
//! usage. Parsing itself is an external collaborator (spec.md §1); this
//! module only defines the shape.

use clap::{Parser, ValueEnum};

use crate::error::AppError;
use crate::pipeline::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Cli,
    Csv,
    Json,
    Idle,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Cli => OutputFormat::Cli,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Idle => OutputFormat::Idle,
        }
    }
}

/// Detects domain-abuse infrastructure by generating and resolving
/// typosquatting variants of a domain name.
#[derive(Debug, Parser)]
#[command(name = "dnsquat", version, about)]
pub struct Cli {
    /// URL or bare domain to analyze, e.g. example.com
    pub domain: String,

    /// In CLI/CSV output, show every record not just the first
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Path to a word-per-line dictionary for DictionaryComposer
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary: Option<String>,

    /// Output shape
    #[arg(short = 'f', long = "format", default_value = "cli")]
    pub format: FormatArg,

    /// Worker count (floor 1)
    #[arg(short = 'k', long = "workers", default_value_t = 10)]
    pub workers: usize,

    /// Comma-separated resolver IPs
    #[arg(long = "nameservers", default_value = "8.8.8.8")]
    pub nameservers: String,

    /// Resolver UDP/TCP port
    #[arg(long = "port", default_value_t = 53)]
    pub port: u16,

    /// Print per-algorithm candidate counts and diagnostic notices
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Parses `--nameservers` into `(IpAddr, port)` pairs. Each non-blank
    /// entry must parse as an IP address; a malformed entry is a fatal
    /// startup error rather than a silently dropped one, since an empty
    /// resulting list would panic the resolver pool's round-robin cursor
    /// (modulo-by-zero).
    pub fn nameserver_list(&self) -> Result<Vec<(std::net::IpAddr, u16)>, AppError> {
        let mut resolvers = Vec::new();
        for entry in self.nameservers.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let ip = entry
                .parse::<std::net::IpAddr>()
                .map_err(|_| AppError::InvalidNameserver(entry.to_string()))?;
            resolvers.push((ip, self.port));
        }

        if resolvers.is_empty() {
            return Err(AppError::InvalidNameserver(self.nameservers.clone()));
        }

        Ok(resolvers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli_with_nameservers(nameservers: &str) -> Cli {
        Cli::parse_from(["dnsquat", "example.com", "--nameservers", nameservers])
    }

    #[test]
    fn parses_multiple_valid_nameservers() {
        let cli = cli_with_nameservers("8.8.8.8,1.1.1.1");
        let resolvers = cli.nameserver_list().unwrap();
        assert_eq!(resolvers, vec![
            ("8.8.8.8".parse().unwrap(), 53),
            ("1.1.1.1".parse().unwrap(), 53),
        ]);
    }

    #[test]
    fn rejects_malformed_entry_instead_of_dropping_it() {
        let cli = cli_with_nameservers("8.8.8.8,not-an-ip");
        assert!(matches!(cli.nameserver_list(), Err(AppError::InvalidNameserver(_))));
    }

    #[test]
    fn rejects_empty_nameserver_list_instead_of_panicking_downstream() {
        let cli = cli_with_nameservers("");
        assert!(matches!(cli.nameserver_list(), Err(AppError::InvalidNameserver(_))));
    }
}
