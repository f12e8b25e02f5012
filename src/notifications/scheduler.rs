use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{FixedOffset, Offset, Timelike, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use super::greetings::GreetingBucket;
use super::rate_limit::{DropReason, NotificationRateLimiter, RateLimitDecision};
use super::rotator::NameRotator;
use super::toast::{Toast, ToastSink, ToastVariant};
use crate::clock::Clock;
use crate::config::NotificationConfig;

const TOAST_CLASS: &str = "social-proof-toast";

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification loop already running")]
    AlreadyRunning,
    #[error("invalid reschedule delay range [{min_ms}, {max_ms})")]
    InvalidDelayRange { min_ms: u64, max_ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FireOutcome {
    Shown(Toast),
    Dropped(DropReason),
    Disabled,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStats {
    pub attempts: u64,
    pub shown: u64,
    pub dropped: u64,
}

/// Periodic social-proof notifications.
///
/// Each firing composes a greeting plus one or two names and tries to show it
/// through the rate limiter; drops are silent. The background loop reschedules
/// itself after a random delay. `stop` bumps a generation counter under the
/// limiter lock, so nothing from an older loop is shown once it returns.
pub struct NotificationScheduler {
    config: NotificationConfig,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn ToastSink>,
    limiter: Mutex<NotificationRateLimiter>,
    rotator: Mutex<NameRotator>,
    rng: Mutex<StdRng>,
    enabled: AtomicBool,
    running: AtomicBool,
    generation: AtomicU64,
    shutdown_tx: broadcast::Sender<()>,
    attempts: AtomicU64,
    shown: AtomicU64,
    dropped: AtomicU64,
}

impl NotificationScheduler {
    pub fn new(
        config: NotificationConfig,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn ToastSink>,
        names: &[&str],
    ) -> Result<Self, NotificationError> {
        Self::with_rng(config, clock, sink, names, StdRng::from_os_rng())
    }

    pub fn with_rng(
        config: NotificationConfig,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn ToastSink>,
        names: &[&str],
        mut rng: StdRng,
    ) -> Result<Self, NotificationError> {
        if config.min_delay_ms >= config.max_delay_ms {
            return Err(NotificationError::InvalidDelayRange {
                min_ms: config.min_delay_ms,
                max_ms: config.max_delay_ms,
            });
        }

        let rotator = NameRotator::new(names.iter().copied(), &mut rng);
        let (shutdown_tx, _) = broadcast::channel(1);

        Ok(Self {
            limiter: Mutex::new(NotificationRateLimiter::from_config(&config)),
            rotator: Mutex::new(rotator),
            rng: Mutex::new(rng),
            enabled: AtomicBool::new(config.enabled),
            running: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            shutdown_tx,
            attempts: AtomicU64::new(0),
            shown: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            config,
            clock,
            sink,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn stats(&self) -> NotificationStats {
        NotificationStats {
            attempts: self.attempts.load(Ordering::Relaxed),
            shown: self.shown.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }

    /// Random delay in `[min_delay_ms, max_delay_ms)`.
    pub fn next_delay(&self) -> Duration {
        let ms = self
            .rng
            .lock()
            .random_range(self.config.min_delay_ms..self.config.max_delay_ms);
        Duration::from_millis(ms)
    }

    /// One firing attempt at the current clock time.
    pub fn fire(&self) -> FireOutcome {
        self.fire_inner(None)
    }

    fn fire_inner(&self, generation: Option<u64>) -> FireOutcome {
        self.attempts.fetch_add(1, Ordering::Relaxed);

        if !self.is_enabled() {
            return FireOutcome::Disabled;
        }

        let now = self.clock.now();
        let toast = self.compose(now);

        let mut limiter = self.limiter.lock();
        if let Some(expected) = generation {
            if self.generation.load(Ordering::SeqCst) != expected {
                return FireOutcome::Cancelled;
            }
        }

        match limiter.try_acquire(now.timestamp_millis()) {
            RateLimitDecision::Allowed => {
                self.sink.show(&toast);
                self.shown.fetch_add(1, Ordering::Relaxed);
                FireOutcome::Shown(toast)
            }
            RateLimitDecision::Dropped(reason) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!(reason = ?reason, "notification dropped by rate limit");
                FireOutcome::Dropped(reason)
            }
        }
    }

    fn compose(&self, now: chrono::DateTime<Utc>) -> Toast {
        let offset = self
            .config
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        let bucket = GreetingBucket::for_hour(now.with_timezone(&offset).hour());
        debug!(bucket = bucket.as_str(), "composing notification");

        let (greeting, names) = {
            let mut rng = self.rng.lock();
            let greeting = bucket
                .greetings()
                .choose(&mut *rng)
                .copied()
                .unwrap_or("Hello!");
            let count = rng.random_range(1..=2);
            let names = self.rotator.lock().pick(count, &mut *rng);
            (greeting, names)
        };

        let who = match names.as_slice() {
            [] => "Someone".to_string(),
            [one] => one.clone(),
            [first, second, ..] => format!("{first} and {second}"),
        };

        Toast {
            id: Uuid::new_v4(),
            title: greeting.to_string(),
            description: format!("{who} just enrolled in a mentorship program."),
            duration_ms: Some(self.config.toast_duration_ms),
            variant: Some(ToastVariant::Default),
            class_name: Some(TOAST_CLASS.to_string()),
            shown_at: now,
        }
    }

    /// Spawns the self-rescheduling loop on the current tokio runtime.
    pub fn start(self: &Arc<Self>) -> Result<(), NotificationError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(NotificationError::AlreadyRunning);
        }

        let generation = {
            let _limiter = self.limiter.lock();
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let scheduler = Arc::clone(self);

        tokio::spawn(async move {
            info!(generation, "notification loop started");
            loop {
                let delay = scheduler.next_delay();
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
                if let FireOutcome::Cancelled = scheduler.fire_inner(Some(generation)) {
                    break;
                }
            }
            debug!(generation, "notification loop exited");
        });

        Ok(())
    }

    /// Halts the loop. No notification from the stopped loop is shown after this returns.
    pub fn stop(&self) {
        {
            let _limiter = self.limiter.lock();
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
        let _ = self.shutdown_tx.send(());
        if self.running.swap(false, Ordering::SeqCst) {
            info!("notification loop stopped");
        }
    }

    pub fn reset_rate_limit(&self) {
        self.limiter.lock().reset();
    }
}
