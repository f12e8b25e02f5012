use serde::{Deserialize, Serialize};

use crate::store::UserId;

const MINUTES_PER_DAY: i32 = 1_440;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub demo_user_id: UserId,
    pub demo_duration_secs: u64,
    pub maintenance_workers_enabled: bool,
    pub cache_sweep_schedule: String,
    pub content_refresh_schedule: String,
}

impl Config {
    pub fn from_env() -> Self {
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let demo_user_id = std::env::var("DEMO_USER_ID")
            .ok()
            .and_then(|value| value.parse::<UserId>().ok())
            .unwrap_or(1);

        let demo_duration_secs = std::env::var("DEMO_DURATION_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(0);

        let maintenance_workers_enabled = std::env::var("ENABLE_MAINTENANCE_WORKERS")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let cache_sweep_schedule =
            std::env::var("CACHE_SWEEP_SCHEDULE").unwrap_or_else(|_| "0 * * * * *".to_string());

        let content_refresh_schedule = std::env::var("CONTENT_REFRESH_SCHEDULE")
            .unwrap_or_else(|_| "0 */10 * * * *".to_string());

        Self {
            log_level,
            demo_user_id,
            demo_duration_secs,
            maintenance_workers_enabled,
            cache_sweep_schedule,
            content_refresh_schedule,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub interest_weight: f64,
    pub level_step_weight: f64,
    pub recent_multiplier: f64,
    pub recent_cap: f64,
    pub recent_window_days: f64,
    pub style_weight: f64,
    pub memo_ttl_ms: i64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            interest_weight: 30.0,
            level_step_weight: 20.0,
            recent_multiplier: 2.0,
            recent_cap: 30.0,
            recent_window_days: 7.0,
            style_weight: 20.0,
            memo_ttl_ms: 5 * 60 * 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub decay_hours: f64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self { decay_hours: 168.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub min_interval_ms: i64,
    pub max_per_window: u32,
    pub window_ms: i64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub toast_duration_ms: u64,
    pub utc_offset_minutes: i32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_interval_ms: 3_000,
            max_per_window: 4,
            window_ms: 60_000,
            min_delay_ms: 3_000,
            max_delay_ms: 8_000,
            toast_duration_ms: 5_000,
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub interaction_log_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            interaction_log_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub recommendation: RecommendationConfig,
    pub content: ContentConfig,
    pub notification: NotificationConfig,
    pub store: StoreConfig,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RECOMMENDATION_MEMO_TTL_MS") {
            config.recommendation.memo_ttl_ms = val
                .parse::<i64>()
                .map(|ttl| ttl.max(0))
                .unwrap_or(config.recommendation.memo_ttl_ms);
        }
        if let Ok(val) = std::env::var("CONTENT_DECAY_HOURS") {
            config.content.decay_hours = val.parse().unwrap_or(config.content.decay_hours);
        }
        if let Ok(val) = std::env::var("NOTIFICATIONS_ENABLED") {
            config.notification.enabled = val.parse().unwrap_or(true);
        }
        if let Ok(val) = std::env::var("NOTIFICATION_MIN_INTERVAL_MS") {
            config.notification.min_interval_ms =
                val.parse().unwrap_or(config.notification.min_interval_ms);
        }
        if let Ok(val) = std::env::var("NOTIFICATION_MAX_PER_WINDOW") {
            config.notification.max_per_window =
                val.parse().unwrap_or(config.notification.max_per_window);
        }
        if let Ok(val) = std::env::var("NOTIFICATION_WINDOW_MS") {
            config.notification.window_ms = val.parse().unwrap_or(config.notification.window_ms);
        }
        if let Ok(val) = std::env::var("NOTIFICATION_MIN_DELAY_MS") {
            config.notification.min_delay_ms =
                val.parse().unwrap_or(config.notification.min_delay_ms);
        }
        if let Ok(val) = std::env::var("NOTIFICATION_MAX_DELAY_MS") {
            config.notification.max_delay_ms =
                val.parse().unwrap_or(config.notification.max_delay_ms);
        }
        if let Ok(val) = std::env::var("NOTIFICATION_UTC_OFFSET_MINUTES") {
            config.notification.utc_offset_minutes = val
                .parse::<i32>()
                .ok()
                .filter(|m| m.abs() < MINUTES_PER_DAY)
                .unwrap_or(config.notification.utc_offset_minutes);
        }
        if let Ok(val) = std::env::var("INTERACTION_LOG_CAPACITY") {
            config.store.interaction_log_capacity =
                val.parse().unwrap_or(config.store.interaction_log_capacity);
        }

        config
    }
}
