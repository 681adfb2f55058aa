use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use dnsquat::cli::Cli;
use dnsquat::error::AppError;
use dnsquat::pipeline::{self, PipelineConfig};
use dnsquat::suffix::PublicSuffixIndex;

/// Default location of the effective-TLD-names file, relative to the
/// binary's own directory (spec.md §6).
fn default_psl_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap_or_default();
    path.pop();
    path.push("database");
    path.push("effective_tld_names.dat");
    path
}

fn load_psl() -> Result<PublicSuffixIndex, AppError> {
    let path = default_psl_path();
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| AppError::MissingFile(path.display().to_string(), e))?;
    Ok(PublicSuffixIndex::from_str(&contents))
}

fn load_dictionary(path: &Option<String>) -> Result<Vec<String>, AppError> {
    match path {
        None => Ok(dnsquat::dictionary::DEFAULT_DICTIONARY.iter().map(|s| s.to_string()).collect()),
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| AppError::MissingFile(path.clone(), e))?;
            Ok(dnsquat::dictionary::parse_dictionary(&contents))
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let start = Instant::now();

    let verbose = cli.verbose;
    let reports_elapsed = verbose && !matches!(cli.format, dnsquat::cli::FormatArg::Idle);

    if reports_elapsed {
        eprintln!("dnsquat starting against {}", cli.domain);
    }

    match run(cli).await {
        Ok(report) => {
            print!("{}", report);
            if reports_elapsed {
                eprintln!("  done in {:.1}s", start.elapsed().as_secs_f64());
            }
        }
        Err(err) => {
            eprintln!("dnsquat: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<String, AppError> {
    let psl = load_psl()?;
    let dictionary = load_dictionary(&cli.dictionary)?;
    let nameservers = cli.nameserver_list()?;

    let config = PipelineConfig {
        domain: cli.domain.clone(),
        dictionary,
        format: cli.format.into(),
        workers: cli.workers.max(1),
        nameservers,
        show_all: cli.all,
        verbose: cli.verbose,
    };

    pipeline::run(config, &psl).await
}
