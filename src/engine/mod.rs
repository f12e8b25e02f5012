pub mod adaptation;
pub mod content_performance;
pub mod recommendation;
pub mod topics;

pub use adaptation::{AdaptiveRecommendation, ContentAdaptation};
pub use content_performance::{ContentPerformanceAnalyzer, ContentScore};
pub use recommendation::{Recommendation, RecommendationEngine, ScoreBreakdown};
