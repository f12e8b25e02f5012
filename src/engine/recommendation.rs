use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::topics::topic_suits_style;
use crate::config::RecommendationConfig;
use crate::store::{MockStore, Program, ProgramId, User, UserId};

const MS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub interest: f64,
    pub level: f64,
    pub recent: f64,
    pub style: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub program: Program,
    pub score: f64,
}

#[derive(Debug, Clone, Copy)]
struct MemoEntry {
    score: f64,
    expires_at_ms: i64,
}

/// Ranks programs for a user by affinity.
///
/// Scores are memoized per (user, program). Each entry carries its own expiry
/// and is checked on read, so a cached score is never older than the TTL.
pub struct RecommendationEngine {
    store: Arc<MockStore>,
    config: RecommendationConfig,
    memo: RwLock<HashMap<(UserId, ProgramId), MemoEntry>>,
}

impl RecommendationEngine {
    pub fn new(store: Arc<MockStore>, config: RecommendationConfig) -> Self {
        Self {
            store,
            config,
            memo: RwLock::new(HashMap::new()),
        }
    }

    /// Uncached score with each term exposed.
    ///
    /// The level term is `(2 - distance) * step`, so an exact match earns twice
    /// the step weight. The total is not normalized.
    pub fn score_breakdown(&self, user: &User, program: &Program) -> ScoreBreakdown {
        let prefs = &user.preferences;

        let interest = if program.topics.iter().any(|t| prefs.interests.contains(t)) {
            self.config.interest_weight
        } else {
            0.0
        };

        let distance = (program.difficulty.rank() - prefs.experience_level.rank()).abs();
        let level = f64::from(2 - distance) * self.config.level_step_weight;

        let recent = self.recent_interaction_score(user.id, program.id);

        let style = if program
            .topics
            .iter()
            .any(|t| topic_suits_style(t, prefs.learning_style))
        {
            self.config.style_weight
        } else {
            0.0
        };

        ScoreBreakdown {
            interest,
            level,
            recent,
            style,
            total: interest + level + recent + style,
        }
    }

    fn recent_interaction_score(&self, user_id: UserId, program_id: ProgramId) -> f64 {
        let now = self.store.clock().now();
        let window = self.config.recent_window_days;

        let decayed: f64 = self
            .store
            .interactions(user_id, program_id)
            .iter()
            .filter_map(|record| {
                let age_ms = (now - record.timestamp).num_milliseconds();
                let days = (age_ms as f64 / MS_PER_DAY).max(0.0);
                (days < window).then(|| f64::from(record.weight) * (1.0 - days / window))
            })
            .sum();

        (decayed * self.config.recent_multiplier).min(self.config.recent_cap)
    }

    /// Memoized score. `None` when either id is unknown.
    pub fn score(&self, user_id: UserId, program_id: ProgramId) -> Option<f64> {
        let user = self.store.get_user(user_id)?;
        let program = self.store.get_program(program_id)?;
        Some(self.cached_score(&user, &program))
    }

    fn cached_score(&self, user: &User, program: &Program) -> f64 {
        let key = (user.id, program.id);
        let now_ms = self.store.clock().now_ms();

        if let Some(entry) = self.memo.read().get(&key) {
            if now_ms < entry.expires_at_ms {
                return entry.score;
            }
        }

        let score = self.score_breakdown(user, program).total;
        self.memo.write().insert(
            key,
            MemoEntry {
                score,
                expires_at_ms: now_ms.saturating_add(self.config.memo_ttl_ms),
            },
        );
        score
    }

    /// All programs ranked for the user, best first. Ties keep catalogue order.
    pub fn personalized_recommendations(&self, user_id: UserId) -> Vec<Recommendation> {
        let Some(user) = self.store.get_user(user_id) else {
            debug!(user_id, "unknown user, no recommendations");
            return Vec::new();
        };

        let mut ranked: Vec<Recommendation> = self
            .store
            .list_programs()
            .into_iter()
            .map(|program| {
                let score = self.cached_score(&user, &program);
                Recommendation { program, score }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            user_id,
            count = ranked.len(),
            top_score = ranked.first().map(|r| r.score),
            "personalized recommendations computed"
        );

        ranked
    }

    pub fn top_recommendations(&self, user_id: UserId, limit: usize) -> Vec<Recommendation> {
        let mut ranked = self.personalized_recommendations(user_id);
        ranked.truncate(limit);
        ranked
    }

    /// Drops expired memo entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now_ms = self.store.clock().now_ms();
        let mut memo = self.memo.write();
        let before = memo.len();
        memo.retain(|_, entry| now_ms < entry.expires_at_ms);
        before - memo.len()
    }

    pub fn clear(&self) {
        self.memo.write().clear();
    }

    pub fn cache_len(&self) -> usize {
        self.memo.read().len()
    }
}
