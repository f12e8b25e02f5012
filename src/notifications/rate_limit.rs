use serde::{Deserialize, Serialize};

use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    TooSoon,
    WindowFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Dropped(DropReason),
}

/// Minimum spacing plus a per-window cap on shown notifications.
///
/// The window counter resets only once more than `window_ms` has passed since
/// the last shown notification, not on a true rolling window.
#[derive(Debug, Clone)]
pub struct NotificationRateLimiter {
    min_interval_ms: i64,
    max_per_window: u32,
    window_ms: i64,
    last_shown_ms: Option<i64>,
    shown_in_window: u32,
}

impl NotificationRateLimiter {
    pub fn new(min_interval_ms: i64, max_per_window: u32, window_ms: i64) -> Self {
        Self {
            min_interval_ms,
            max_per_window,
            window_ms,
            last_shown_ms: None,
            shown_in_window: 0,
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(config.min_interval_ms, config.max_per_window, config.window_ms)
    }

    pub fn try_acquire(&mut self, now_ms: i64) -> RateLimitDecision {
        if let Some(last) = self.last_shown_ms {
            let elapsed = now_ms - last;
            if elapsed < self.min_interval_ms {
                return RateLimitDecision::Dropped(DropReason::TooSoon);
            }
            if elapsed > self.window_ms {
                self.shown_in_window = 0;
            }
        }

        if self.shown_in_window >= self.max_per_window {
            return RateLimitDecision::Dropped(DropReason::WindowFull);
        }

        self.shown_in_window += 1;
        self.last_shown_ms = Some(now_ms);
        RateLimitDecision::Allowed
    }

    pub fn last_shown_ms(&self) -> Option<i64> {
        self.last_shown_ms
    }

    pub fn reset(&mut self) {
        self.last_shown_ms = None;
        self.shown_in_window = 0;
    }
}
