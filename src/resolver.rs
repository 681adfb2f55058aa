//! Round-robins DNS `A`/`AAAA`/`NS`/`MX`/`IN` queries across N configured
//! resolver endpoints, mirroring `dnstwist.py::DNSTwister`'s use of
//! `asyncdns.RoundRobinServer`. One fixed 5s per-query timeout, no retries
//! (spec.md §4.5).

use hickory_resolver::config::{NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::candidate::RecordKind;

const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `rcode == NXDOMAIN`: discard the candidate.
    NxDomain,
    /// Timeout, network error, or any other failure: treated as "no
    /// records," candidate discarded per spec.md §7.
    QueryFailed,
}

/// One resolved answer, classified into the three buckets the worker
/// pool cares about (spec.md §4.6 step 4).
pub struct Reply {
    pub records: Vec<(RecordKind, String)>,
}

pub struct ResolverPool {
    resolvers: Vec<TokioAsyncResolver>,
    cursor: AtomicUsize,
}

impl ResolverPool {
    /// `endpoints` is the ordered list of `(host, port)` resolver pairs.
    pub fn new(endpoints: &[(IpAddr, u16)]) -> Self {
        let resolvers = endpoints
            .iter()
            .map(|&(ip, port)| {
                let mut group = NameServerConfigGroup::new();
                let socket = SocketAddr::new(ip, port);
                group.push(NameServerConfig::new(socket, Protocol::Udp));
                let config = ResolverConfig::from_parts(None, vec![], group);

                let mut opts = ResolverOpts::default();
                opts.timeout = QUERY_TIMEOUT;
                opts.attempts = 1;
                opts.num_concurrent_reqs = 1;

                TokioAsyncResolver::tokio(config, opts)
            })
            .collect();

        Self { resolvers, cursor: AtomicUsize::new(0) }
    }

    fn next_resolver(&self) -> &TokioAsyncResolver {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed) % self.resolvers.len();
        &self.resolvers[i]
    }

    /// Issues one query of `record_type`/IN against the next resolver in
    /// round-robin order. NXDOMAIN is surfaced distinctly from any other
    /// failure (timeout, network error, refusal); a NOERROR response with
    /// an empty answer section is `Ok(vec![])`.
    async fn query(&self, name: &str, record_type: RecordType) -> Result<Vec<RData>, Outcome> {
        let resolver = self.next_resolver();

        match resolver.lookup(name, record_type).await {
            Ok(lookup) => Ok(lookup.record_iter().filter_map(|r| r.data().cloned()).collect()),
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { response_code, .. } => {
                    if *response_code == ResponseCode::NXDomain {
                        Err(Outcome::NxDomain)
                    } else {
                        Ok(Vec::new())
                    }
                }
                _ => Err(Outcome::QueryFailed),
            },
        }
    }

    fn as_address(data: RData) -> Option<(RecordKind, String)> {
        match data {
            RData::A(ip) => Some((RecordKind::A, ip.to_string())),
            RData::AAAA(ip) => Some((RecordKind::A, ip.to_string())),
            _ => None,
        }
    }

    /// Resolves `name` against A/AAAA/NS/MX, merging every answer into one
    /// `Reply` (spec.md §3/§4.6 step 4). Liveness is decided by the A
    /// query alone, per spec.md §4.6 steps 2-3 ("Issue an A-class IN
    /// query" / "If rcode == NXDOMAIN, discard the Candidate"): its
    /// NXDOMAIN or failure short-circuits the whole lookup. AAAA/NS/MX are
    /// enrichment queries layered on top of that liveness check — most
    /// domains don't publish NS or MX glue at the apex, so an empty bucket
    /// from one of those doesn't discard an otherwise-live candidate. Each
    /// of the four queries independently round-robins across resolvers
    /// and carries its own fixed 5s timeout with no retries (spec.md
    /// §4.5).
    pub async fn lookup(&self, name: &str) -> Result<Reply, Outcome> {
        let mut records = Vec::new();

        let a_answers = self.query(name, RecordType::A).await?;
        records.extend(a_answers.into_iter().filter_map(Self::as_address));

        if let Ok(answers) = self.query(name, RecordType::AAAA).await {
            records.extend(answers.into_iter().filter_map(Self::as_address));
        }
        if let Ok(answers) = self.query(name, RecordType::NS).await {
            records.extend(answers.into_iter().filter_map(|r| match r {
                RData::NS(ns) => Some((RecordKind::Ns, ns.to_string())),
                _ => None,
            }));
        }
        if let Ok(answers) = self.query(name, RecordType::MX).await {
            records.extend(answers.into_iter().filter_map(|r| match r {
                RData::MX(mx) => Some((RecordKind::Mx, mx.exchange().to_string())),
                _ => None,
            }));
        }

        Ok(Reply { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_cursor_wraps() {
        let pool = ResolverPool::new(&[
            ("8.8.8.8".parse().unwrap(), 53),
            ("1.1.1.1".parse().unwrap(), 53),
        ]);
        assert_eq!(pool.resolvers.len(), 2);
        // fetch_add cycles through both indices regardless of query success.
        let first = pool.cursor.fetch_add(1, Ordering::Relaxed) % pool.resolvers.len();
        let second = pool.cursor.fetch_add(1, Ordering::Relaxed) % pool.resolvers.len();
        assert_ne!(first, second);
    }
}
