pub mod greetings;
pub mod rate_limit;
pub mod rotator;
pub mod scheduler;
pub mod toast;

pub use greetings::GreetingBucket;
pub use rate_limit::{DropReason, NotificationRateLimiter, RateLimitDecision};
pub use rotator::NameRotator;
pub use scheduler::{FireOutcome, NotificationError, NotificationScheduler, NotificationStats};
pub use toast::{MemoryToastSink, Toast, ToastSink, ToastVariant, TracingToastSink};
