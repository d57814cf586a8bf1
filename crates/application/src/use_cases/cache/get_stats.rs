use crate::ports::{AnswerCache, CacheMetricsSnapshot};
use std::sync::Arc;

pub struct GetCacheStatsUseCase {
    cache: Arc<dyn AnswerCache>,
}

impl GetCacheStatsUseCase {
    pub fn new(cache: Arc<dyn AnswerCache>) -> Self {
        Self { cache }
    }

    pub fn execute(&self) -> CacheMetricsSnapshot {
        self.cache.metrics_snapshot()
    }
}
