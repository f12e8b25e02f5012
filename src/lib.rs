pub mod clock;
pub mod config;
pub mod engine;
pub mod logging;
pub mod notifications;
pub mod seed;
pub mod state;
pub mod store;
pub mod workers;

use std::sync::Arc;

use crate::clock::SystemClock;
use crate::config::EngineConfig;
use crate::notifications::{NotificationError, TracingToastSink};
use crate::state::MentorSession;

/// Seeded session on the wall clock, with toasts written to the log.
pub fn create_session(config: EngineConfig) -> Result<MentorSession, NotificationError> {
    MentorSession::seeded(config, Arc::new(SystemClock), Arc::new(TracingToastSink))
}
