//! Overwrites a single stderr line with live resolution counts every
//! 500ms, mirroring `dnstwist.py::DNSTwister.status`'s plain-line style
//! so the CLI/CSV/JSON formats stay byte-clean on stdout.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::interval;

const TICK: Duration = Duration::from_millis(500);

pub struct ProgressReporter {
    total: usize,
    remaining: Arc<AtomicUsize>,
    hits: Arc<AtomicUsize>,
    quiet: bool,
}

impl ProgressReporter {
    pub fn new(total: usize, remaining: Arc<AtomicUsize>, hits: Arc<AtomicUsize>, quiet: bool) -> Self {
        Self { total, remaining, hits, quiet }
    }

    /// Ticks until `remaining` hits zero, printing `"<remaining> remaining.
    /// <hits> hits (<pct>%)"` to one overwritten stderr line. Returns the
    /// elapsed time, printed by the caller once the final report is ready.
    /// No-op when `quiet` (idle/csv/json formats run silently per
    /// spec.md §4.8).
    pub async fn watch(&self) -> Duration {
        let start = Instant::now();
        if self.quiet {
            while self.remaining.load(Ordering::Relaxed) > 0 {
                tokio::time::sleep(TICK).await;
            }
            return start.elapsed();
        }

        let mut ticker = interval(TICK);
        loop {
            ticker.tick().await;
            let remaining = self.remaining.load(Ordering::Relaxed);
            self.render(remaining);
            if remaining == 0 {
                break;
            }
        }
        eprintln!();
        start.elapsed()
    }

    fn render(&self, remaining: usize) {
        let hits = self.hits.load(Ordering::Relaxed);
        let done = self.total.saturating_sub(remaining);
        let pct = if self.total == 0 { 100 } else { done * 100 / self.total };
        eprint!("\r\x1b[K{} remaining. {} hits ({}%)", remaining, hits, pct);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_at_completion_is_full() {
        let remaining = Arc::new(AtomicUsize::new(0));
        let hits = Arc::new(AtomicUsize::new(3));
        let reporter = ProgressReporter::new(10, remaining, hits, true);
        assert_eq!(reporter.total, 10);
    }
}
