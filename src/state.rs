use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::engine::{ContentAdaptation, ContentPerformanceAnalyzer, RecommendationEngine};
use crate::notifications::{NotificationError, NotificationScheduler, ToastSink};
use crate::seed;
use crate::store::MockStore;

/// Everything one user session owns. Built on app start, reset on logout.
#[derive(Clone)]
pub struct MentorSession {
    started_at: Instant,
    store: Arc<MockStore>,
    engine: Arc<RecommendationEngine>,
    analyzer: Arc<ContentPerformanceAnalyzer>,
    adaptation: Arc<ContentAdaptation>,
    notifications: Arc<NotificationScheduler>,
}

impl MentorSession {
    pub fn new(
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn ToastSink>,
    ) -> Result<Self, NotificationError> {
        let store = Arc::new(MockStore::new(Arc::clone(&clock), &config.store));
        let engine = Arc::new(RecommendationEngine::new(
            Arc::clone(&store),
            config.recommendation.clone(),
        ));
        let analyzer = Arc::new(ContentPerformanceAnalyzer::new(
            Arc::clone(&store),
            config.content.clone(),
        ));
        let adaptation = Arc::new(ContentAdaptation::new(
            Arc::clone(&engine),
            Arc::clone(&analyzer),
        ));
        let notifications = Arc::new(NotificationScheduler::new(
            config.notification.clone(),
            clock,
            sink,
            seed::NOTIFICATION_NAMES,
        )?);

        Ok(Self {
            started_at: Instant::now(),
            store,
            engine,
            analyzer,
            adaptation,
            notifications,
        })
    }

    /// Session preloaded with the synthetic reference data.
    pub fn seeded(
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn ToastSink>,
    ) -> Result<Self, NotificationError> {
        let session = Self::new(config, clock, sink)?;
        seed::populate(&session.store);
        Ok(session)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn store(&self) -> Arc<MockStore> {
        Arc::clone(&self.store)
    }

    pub fn engine(&self) -> Arc<RecommendationEngine> {
        Arc::clone(&self.engine)
    }

    pub fn analyzer(&self) -> Arc<ContentPerformanceAnalyzer> {
        Arc::clone(&self.analyzer)
    }

    pub fn adaptation(&self) -> Arc<ContentAdaptation> {
        Arc::clone(&self.adaptation)
    }

    pub fn notifications(&self) -> Arc<NotificationScheduler> {
        Arc::clone(&self.notifications)
    }

    pub fn set_notifications_enabled(&self, enabled: bool) {
        self.notifications.set_enabled(enabled);
    }

    /// Session end: stops notifications and drops every derived cache.
    pub fn reset(&self) {
        self.notifications.stop();
        self.notifications.reset_rate_limit();
        self.engine.clear();
        self.analyzer.clear();
        info!(uptime_secs = self.uptime_seconds(), "session reset");
    }
}
