use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::{ContentPerformanceAnalyzer, RecommendationEngine};

/// Periodic maintenance for a session: memo sweeps and content score refreshes.
pub struct WorkerManager {
    scheduler: Mutex<JobScheduler>,
    shutdown_tx: broadcast::Sender<()>,
    started: AtomicBool,
    engine: Arc<RecommendationEngine>,
    analyzer: Arc<ContentPerformanceAnalyzer>,
}

impl WorkerManager {
    pub async fn new(
        engine: Arc<RecommendationEngine>,
        analyzer: Arc<ContentPerformanceAnalyzer>,
    ) -> Result<Self, WorkerError> {
        let scheduler = JobScheduler::new().await.map_err(WorkerError::Scheduler)?;
        let (shutdown_tx, _) = broadcast::channel(1);
        Ok(Self {
            scheduler: Mutex::new(scheduler),
            shutdown_tx,
            started: AtomicBool::new(false),
            engine,
            analyzer,
        })
    }

    pub async fn start(&self, config: &Config) -> Result<(), WorkerError> {
        if !config.maintenance_workers_enabled {
            info!("ENABLE_MAINTENANCE_WORKERS=false, skipping worker startup");
            return Ok(());
        }

        let scheduler = self.scheduler.lock().await;

        {
            let engine = Arc::clone(&self.engine);
            let shutdown_rx = self.shutdown_tx.subscribe();
            let job = Job::new_async(config.cache_sweep_schedule.as_str(), move |_uuid, _lock| {
                let engine = Arc::clone(&engine);
                let mut rx = shutdown_rx.resubscribe();
                Box::pin(async move {
                    tokio::select! {
                        _ = rx.recv() => {},
                        _ = async {
                            let removed = engine.purge_expired();
                            if removed > 0 {
                                info!(removed, remaining = engine.cache_len(), "memo cache sweep");
                            } else {
                                debug!("memo cache sweep found nothing expired");
                            }
                        } => {}
                    }
                })
            })
            .map_err(WorkerError::Scheduler)?;
            scheduler.add(job).await.map_err(WorkerError::Scheduler)?;
            info!(schedule = %config.cache_sweep_schedule, "memo cache sweep scheduled");
        }

        {
            let analyzer = Arc::clone(&self.analyzer);
            let shutdown_rx = self.shutdown_tx.subscribe();
            let job = Job::new_async(
                config.content_refresh_schedule.as_str(),
                move |_uuid, _lock| {
                    let analyzer = Arc::clone(&analyzer);
                    let mut rx = shutdown_rx.resubscribe();
                    Box::pin(async move {
                        tokio::select! {
                            _ = rx.recv() => {},
                            _ = async {
                                let scores = analyzer.analyze();
                                info!(
                                    programs = scores.len(),
                                    top_program = scores.first().map(|s| s.program_id),
                                    "content scores refreshed"
                                );
                            } => {}
                        }
                    })
                },
            )
            .map_err(WorkerError::Scheduler)?;
            scheduler.add(job).await.map_err(WorkerError::Scheduler)?;
            info!(schedule = %config.content_refresh_schedule, "content refresh scheduled");
        }

        scheduler.start().await.map_err(WorkerError::Scheduler)?;
        self.started.store(true, Ordering::SeqCst);
        info!("All workers started");

        Ok(())
    }

    pub async fn stop(&self) {
        if !self.started.swap(false, Ordering::SeqCst) {
            return;
        }

        info!("Stopping workers...");
        let _ = self.shutdown_tx.send(());

        let mut scheduler = self.scheduler.lock().await;
        if let Err(e) = scheduler.shutdown().await {
            warn!(error = %e, "Error shutting down scheduler");
        }

        info!("Workers stopped");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::{ContentConfig, RecommendationConfig, StoreConfig};
    use crate::store::MockStore;

    fn config(enabled: bool) -> Config {
        Config {
            log_level: "info".to_string(),
            demo_user_id: 1,
            demo_duration_secs: 0,
            maintenance_workers_enabled: enabled,
            cache_sweep_schedule: "0 * * * * *".to_string(),
            content_refresh_schedule: "0 */10 * * * *".to_string(),
        }
    }

    fn every_second() -> Config {
        Config {
            cache_sweep_schedule: "* * * * * *".to_string(),
            content_refresh_schedule: "* * * * * *".to_string(),
            ..config(true)
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn disabled_workers_do_not_start() {
        let store = Arc::new(MockStore::new(
            Arc::new(ManualClock::from_millis(0)),
            &StoreConfig::default(),
        ));
        let engine = Arc::new(RecommendationEngine::new(
            store.clone(),
            RecommendationConfig::default(),
        ));
        let analyzer = Arc::new(ContentPerformanceAnalyzer::new(store, ContentConfig::default()));

        let manager = WorkerManager::new(engine, analyzer).await.unwrap();
        manager.start(&config(false)).await.unwrap();
        assert!(!manager.started.load(Ordering::SeqCst));
        manager.stop().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn enabled_workers_sweep_memo_and_refresh_scores() {
        let clock = Arc::new(ManualClock::from_millis(1_700_000_000_000));
        let store = Arc::new(MockStore::new(clock.clone(), &StoreConfig::default()));
        crate::seed::populate(&store);
        let engine = Arc::new(RecommendationEngine::new(
            store.clone(),
            RecommendationConfig::default(),
        ));
        let analyzer = Arc::new(ContentPerformanceAnalyzer::new(store, ContentConfig::default()));

        assert!(engine.score(1, 1).is_some());
        assert_eq!(engine.cache_len(), 1);
        clock.advance_ms(RecommendationConfig::default().memo_ttl_ms + 1);

        let manager = WorkerManager::new(engine.clone(), analyzer.clone())
            .await
            .unwrap();
        manager.start(&every_second()).await.unwrap();
        assert!(manager.started.load(Ordering::SeqCst));

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while (engine.cache_len() > 0 || analyzer.content_score(1).is_none())
            && std::time::Instant::now() < deadline
        {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
        assert_eq!(engine.cache_len(), 0);
        assert!(analyzer.content_score(1).is_some());

        manager.stop().await;
        assert!(!manager.started.load(Ordering::SeqCst));
        manager.stop().await;
    }
}
