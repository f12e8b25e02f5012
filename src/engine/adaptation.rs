use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::content_performance::ContentPerformanceAnalyzer;
use super::recommendation::RecommendationEngine;
use crate::store::{Program, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveRecommendation {
    pub program: Program,
    pub personalized_score: f64,
    pub trending_score: f64,
    pub total_score: f64,
}

/// Blends personalized affinity with trending popularity by plain addition.
pub struct ContentAdaptation {
    engine: Arc<RecommendationEngine>,
    analyzer: Arc<ContentPerformanceAnalyzer>,
}

impl ContentAdaptation {
    pub fn new(
        engine: Arc<RecommendationEngine>,
        analyzer: Arc<ContentPerformanceAnalyzer>,
    ) -> Self {
        Self { engine, analyzer }
    }

    pub fn adaptive_recommendations(&self, user_id: UserId) -> Vec<AdaptiveRecommendation> {
        let personalized = self.engine.personalized_recommendations(user_id);
        if personalized.is_empty() {
            return Vec::new();
        }

        let trending: HashMap<_, _> = self
            .analyzer
            .analyze()
            .into_iter()
            .map(|score| (score.program_id, score.score))
            .collect();

        let mut combined: Vec<AdaptiveRecommendation> = personalized
            .into_iter()
            .map(|rec| {
                let trending_score = trending.get(&rec.program.id).copied().unwrap_or(0.0);
                AdaptiveRecommendation {
                    total_score: rec.score + trending_score,
                    personalized_score: rec.score,
                    trending_score,
                    program: rec.program,
                }
            })
            .collect();

        combined.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(user_id, count = combined.len(), "adaptive recommendations computed");
        combined
    }
}
