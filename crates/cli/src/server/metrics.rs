use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;
use udns_application::use_cases::GetCacheStatsUseCase;

const REPORT_INTERVAL: Duration = Duration::from_secs(60);

pub fn spawn_metrics_reporter(stats: Arc<GetCacheStatsUseCase>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REPORT_INTERVAL);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let snapshot = stats.execute();
            debug!(
                entries = snapshot.total_entries,
                hits = snapshot.hits,
                misses = snapshot.misses,
                insertions = snapshot.insertions,
                refreshes = snapshot.refreshes,
                lazy_evictions = snapshot.lazy_evictions,
                hit_rate = %format!("{:.1}%", snapshot.hit_rate),
                "Cache metrics"
            );
        }
    })
}
