//! K cooperative workers draining a shared candidate queue against the
//! ResolverPool, mirroring `dnstwist.py::DNSTwister.start_worker`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex as AsyncMutex;

use crate::candidate::{Candidate, SuccessList};
use crate::resolver::{Outcome, ResolverPool};

pub struct WorkerPool {
    worker_count: usize,
}

impl WorkerPool {
    /// `worker_count` is floored at 1, per spec.md §4.6.
    pub fn new(worker_count: usize) -> Self {
        Self { worker_count: worker_count.max(1) }
    }

    /// Drains `queue` concurrently across `self.worker_count` tasks, issuing
    /// one A/IN query per candidate via `resolver`. `remaining`/`hits` are
    /// shared with the ProgressReporter; `successes` is shared with the
    /// caller so a cancelled run can still read whatever accumulated so
    /// far (spec.md §5 "flush partial results"). `cancelled` is checked
    /// before each candidate pop: once set, a worker finishes whatever
    /// query is already in flight (or lets it time out) and then stops
    /// picking up new work, rather than draining the whole queue
    /// (spec.md §5 "stops workers after their current in-flight query
    /// completes or times out").
    pub async fn run(
        &self,
        queue: Vec<Candidate>,
        resolver: Arc<ResolverPool>,
        remaining: Arc<AtomicUsize>,
        hits: Arc<AtomicUsize>,
        successes: Arc<AsyncMutex<SuccessList>>,
        cancelled: Arc<AtomicBool>,
    ) {
        let queue = Arc::new(AsyncMutex::new(VecDeque::from(queue)));

        let mut tasks = Vec::with_capacity(self.worker_count);
        for _ in 0..self.worker_count {
            let queue = Arc::clone(&queue);
            let successes = Arc::clone(&successes);
            let resolver = Arc::clone(&resolver);
            let remaining = Arc::clone(&remaining);
            let hits = Arc::clone(&hits);
            let cancelled = Arc::clone(&cancelled);

            tasks.push(tokio::spawn(async move {
                loop {
                    if cancelled.load(Ordering::Relaxed) {
                        break;
                    }

                    let candidate = {
                        let mut q = queue.lock().await;
                        q.pop_front()
                    };
                    let Some(mut candidate) = candidate else { break };

                    match resolver.lookup(&candidate.name).await {
                        Ok(reply) => {
                            for (kind, value) in reply.records {
                                candidate.push_record(kind, value);
                            }
                            hits.fetch_add(1, Ordering::Relaxed);
                            successes.lock().await.push(candidate);
                        }
                        Err(Outcome::NxDomain) => {
                            // discarded, per spec.md §4.6 step 3
                        }
                        Err(Outcome::QueryFailed) => {
                            // treated as "no records," candidate discarded
                        }
                    }

                    remaining.fetch_sub(1, Ordering::Relaxed);
                }
            }));
        }

        for task in tasks {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_worker_count_at_one() {
        assert_eq!(WorkerPool::new(0).worker_count, 1);
        assert_eq!(WorkerPool::new(5).worker_count, 5);
    }
}
