use crate::ports::{AnswerCache, UpstreamResolver};
use crate::services::ForwarderSelector;
use hickory_proto::rr::{RData, Record};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use udns_domain::{DnsQuery, RecordType};

/// Answers the questions of one request from the cache, forwarding misses.
pub struct HandleDnsQueryUseCase {
    cache: Arc<dyn AnswerCache>,
    selector: Arc<ForwarderSelector>,
    upstream: Arc<dyn UpstreamResolver>,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        cache: Arc<dyn AnswerCache>,
        selector: Arc<ForwarderSelector>,
        upstream: Arc<dyn UpstreamResolver>,
    ) -> Self {
        Self {
            cache,
            selector,
            upstream,
        }
    }

    /// Answers for every question, in question order. A question that
    /// cannot be answered contributes nothing and never stops the others.
    pub async fn execute(&self, queries: &[DnsQuery]) -> Vec<Record> {
        let mut answers = Vec::new();
        for query in queries {
            answers.extend(self.answer(query).await);
        }
        answers
    }

    pub async fn answer(&self, query: &DnsQuery) -> Vec<Record> {
        let start = Instant::now();

        if let Some(cached) = self.cache.lookup(&query.domain, query.record_type) {
            let answers = self.chase_cnames(cached);
            debug!(
                domain = %query.domain,
                record_type = %query.record_type,
                answers = answers.len(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "Cache hit"
            );
            return answers;
        }

        let answers = self.forward(query).await;
        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            answers = answers.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Cache miss resolved upstream"
        );
        answers
    }

    /// Appends the cached A answers of every CNAME target. One hop, cache only.
    fn chase_cnames(&self, cached: Vec<Record>) -> Vec<Record> {
        let targets: Vec<String> = cached
            .iter()
            .filter_map(|record| match record.data() {
                RData::CNAME(canonical) => Some(canonical.to_ascii()),
                _ => None,
            })
            .collect();

        let mut answers = cached;
        for target in targets {
            if let Some(chained) = self.cache.lookup_target(&target, RecordType::A) {
                debug!(target = %target, answers = chained.len(), "CNAME target served from cache");
                answers.extend(chained);
            }
        }
        answers
    }

    async fn forward(&self, query: &DnsQuery) -> Vec<Record> {
        let upstream = match self.selector.upstream_for(&query.domain) {
            Some(upstream) => upstream,
            None => {
                warn!(domain = %query.domain, "No upstream configured");
                return vec![];
            }
        };

        let records = match self.upstream.resolve(query, upstream).await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    upstream = %upstream,
                    error = %e,
                    "Upstream exchange failed"
                );
                return vec![];
            }
        };

        for record in &records {
            self.cache.insert(record);
        }

        records
    }
}
