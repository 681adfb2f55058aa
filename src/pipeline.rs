//! Wires the whole data flow together: split → generators → filter →
//! worker pool / progress reporter → report rendering. Mirrors
//! `dnstwist.py::DNSTwister.run`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;

use crate::candidate::Candidate;
use crate::dictionary::DictionaryComposer;
use crate::error::AppResult;
use crate::filter::CandidateFilter;
use crate::fuzz::FuzzEngine;
use crate::generator::Generator;
use crate::progress::ProgressReporter;
use crate::reporter::Reporter;
use crate::resolver::ResolverPool;
use crate::split::{DomainSplitter, Split};
use crate::suffix::PublicSuffixIndex;
use crate::tld::TldSwapper;
use crate::worker::WorkerPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Idle,
    Cli,
    Csv,
    Json,
}

pub struct PipelineConfig {
    pub domain: String,
    pub dictionary: Vec<String>,
    pub format: OutputFormat,
    pub workers: usize,
    pub nameservers: Vec<(std::net::IpAddr, u16)>,
    pub show_all: bool,
    pub verbose: bool,
}

/// Runs the full pipeline and returns the rendered report. `Err` surfaces
/// only startup-time failures (spec.md §7); per-candidate problems never
/// propagate here.
pub async fn run(config: PipelineConfig, psl: &PublicSuffixIndex) -> AppResult<String> {
    let split: Split = DomainSplitter::split(&config.domain, psl)?;

    let candidates = generate_candidates(&split, &config);
    let filtered = CandidateFilter::new(config.verbose).filter(candidates);

    if config.verbose {
        eprintln!("Processing {} domain variants", filtered.len());
    }

    let reporter = Reporter::new(config.show_all);

    if config.format == OutputFormat::Idle {
        return Ok(reporter.render_idle(&filtered));
    }

    let successes = resolve(filtered, &config).await;

    Ok(match config.format {
        OutputFormat::Idle => unreachable!(),
        OutputFormat::Cli => reporter.render_cli(&successes),
        OutputFormat::Csv => reporter.render_csv(&successes),
        OutputFormat::Json => reporter
            .render_json(&successes)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
    })
}

fn generate_candidates(split: &Split, config: &PipelineConfig) -> Vec<Candidate> {
    let fuzz = FuzzEngine::new(split.clone(), config.verbose);
    let dict = DictionaryComposer::new(split.clone(), config.dictionary.clone());
    let tlds = TldSwapper::new(split.clone());

    let mut candidates = fuzz.generate();
    candidates.extend(dict.generate());
    candidates.extend(tlds.generate());
    candidates
}

async fn resolve(filtered: Vec<Candidate>, config: &PipelineConfig) -> Vec<Candidate> {
    let resolver = Arc::new(ResolverPool::new(&config.nameservers));
    let remaining = Arc::new(AtomicUsize::new(filtered.len()));
    let hits = Arc::new(AtomicUsize::new(0));
    let successes = Arc::new(AsyncMutex::new(Vec::new()));
    let cancelled = Arc::new(AtomicBool::new(false));

    let quiet = matches!(config.format, OutputFormat::Csv | OutputFormat::Json);
    let progress = ProgressReporter::new(filtered.len(), Arc::clone(&remaining), Arc::clone(&hits), quiet);
    let pool = WorkerPool::new(config.workers);

    // Run the worker pool as its own task so it keeps draining in-flight
    // queries even if the `select!` below resolves via the cancellation
    // branch; `pool_task` is always awaited afterward so the Reporter only
    // ever sees a SuccessList the pool has actually finished writing to.
    let pool_task = tokio::spawn({
        let resolver = Arc::clone(&resolver);
        let remaining = Arc::clone(&remaining);
        let hits = Arc::clone(&hits);
        let successes = Arc::clone(&successes);
        let cancelled = Arc::clone(&cancelled);
        async move {
            pool.run(filtered, resolver, remaining, hits, successes, cancelled).await;
        }
    });

    tokio::select! {
        biased;
        _ = tokio::signal::ctrl_c() => {
            // Cancellation: stop the progress task immediately. Workers
            // finish whatever query is already in flight (or let it time
            // out) and then stop picking up new candidates (spec.md §5),
            // which `pool_task.await` below waits out before the Reporter
            // runs over the partial SuccessList.
            cancelled.store(true, Ordering::Relaxed);
        }
        _ = progress.watch() => {}
    }

    let _ = pool_task.await;

    let guard = successes.lock().await;
    guard.clone()
}
