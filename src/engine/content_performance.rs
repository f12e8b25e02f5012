use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ContentConfig;
use crate::store::{MockStore, ProgramId};

const MS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentScore {
    pub program_id: ProgramId,
    pub score: f64,
    pub last_updated: DateTime<Utc>,
    pub engagement_rate: f64,
}

/// Ranks programs by recent enrollment popularity.
///
/// `score = (enrollments / users) * (1 + Σ max(0, 1 - hours_since / horizon))`.
/// With no users every score is 0.
pub struct ContentPerformanceAnalyzer {
    store: Arc<MockStore>,
    config: ContentConfig,
    scores: RwLock<HashMap<ProgramId, ContentScore>>,
}

impl ContentPerformanceAnalyzer {
    pub fn new(store: Arc<MockStore>, config: ContentConfig) -> Self {
        Self {
            store,
            config,
            scores: RwLock::new(HashMap::new()),
        }
    }

    /// Recomputes every program's score, overwriting previous values.
    pub fn analyze(&self) -> Vec<ContentScore> {
        let now = self.store.clock().now();
        let total_users = self.store.user_count();
        let horizon = self.config.decay_hours.max(f64::EPSILON);

        if total_users == 0 {
            debug!("no users in store, content scores default to zero");
        }

        let mut by_program: HashMap<ProgramId, (usize, f64)> = HashMap::new();
        for enrollment in self.store.list_enrollments() {
            let hours = ((now - enrollment.enrolled_at).num_milliseconds() as f64 / MS_PER_HOUR)
                .max(0.0);
            let entry = by_program.entry(enrollment.program_id).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += (1.0 - hours / horizon).max(0.0);
        }

        let mut results: Vec<ContentScore> = self
            .store
            .list_programs()
            .into_iter()
            .map(|program| {
                let (count, recency) = by_program.get(&program.id).copied().unwrap_or((0, 0.0));
                let engagement_rate = if total_users == 0 {
                    0.0
                } else {
                    count as f64 / total_users as f64
                };
                let time_weight = 1.0 + recency;
                ContentScore {
                    program_id: program.id,
                    score: engagement_rate * time_weight,
                    last_updated: now,
                    engagement_rate,
                }
            })
            .collect();

        {
            let mut scores = self.scores.write();
            for score in &results {
                scores.insert(score.program_id, score.clone());
            }
        }

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            programs = results.len(),
            total_users,
            "content performance analyzed"
        );

        results
    }

    /// Last computed score for a program, if `analyze` has run.
    pub fn content_score(&self, program_id: ProgramId) -> Option<ContentScore> {
        self.scores.read().get(&program_id).cloned()
    }

    pub fn top_content(&self, limit: usize) -> Vec<ContentScore> {
        let mut ranked = self.analyze();
        ranked.truncate(limit);
        ranked
    }

    pub fn clear(&self) {
        self.scores.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::config::StoreConfig;
    use crate::store::{Enrollment, LearningStyle, Program, SkillLevel, User, UserPreferences};
    use chrono::Duration;
    use std::collections::BTreeSet;

    fn program(id: ProgramId) -> Program {
        Program {
            id,
            name: format!("program-{id}"),
            difficulty: SkillLevel::Beginner,
            topics: BTreeSet::new(),
            required_skills: BTreeSet::new(),
        }
    }

    fn user(id: u64, clock: &dyn Clock) -> User {
        User {
            id,
            name: format!("user-{id}"),
            joined_at: clock.now(),
            preferences: UserPreferences {
                interests: BTreeSet::new(),
                learning_style: LearningStyle::Visual,
                experience_level: SkillLevel::Beginner,
                engagement_history: Vec::new(),
            },
        }
    }

    fn enrollment(id: u64, program_id: ProgramId, at: DateTime<Utc>) -> Enrollment {
        Enrollment {
            id,
            program_id,
            user_id: 1,
            enrolled_at: at,
            progress: 0.0,
            completed_tasks: 0,
        }
    }

    fn fixture() -> (Arc<ManualClock>, Arc<MockStore>) {
        let clock = Arc::new(ManualClock::from_millis(1_700_000_000_000));
        let store = Arc::new(MockStore::new(clock.clone(), &StoreConfig::default()));
        store.insert_program(program(1));
        store.insert_program(program(2));
        (clock, store)
    }

    #[test]
    fn zero_users_yield_zero_scores() {
        let (clock, store) = fixture();
        store.insert_enrollment(enrollment(1, 1, clock.now()));
        let analyzer = ContentPerformanceAnalyzer::new(store, ContentConfig::default());

        let scores = analyzer.analyze();
        assert_eq!(scores.len(), 2);
        for score in scores {
            assert_eq!(score.score, 0.0);
            assert_eq!(score.engagement_rate, 0.0);
        }
    }

    #[test]
    fn recent_enrollments_outrank_old_ones() {
        let (clock, store) = fixture();
        store.insert_user(user(1, clock.as_ref()));
        store.insert_user(user(2, clock.as_ref()));
        let now = clock.now();
        store.insert_enrollment(enrollment(1, 1, now - Duration::hours(200)));
        store.insert_enrollment(enrollment(2, 2, now - Duration::hours(84)));
        let analyzer = ContentPerformanceAnalyzer::new(store, ContentConfig::default());

        let scores = analyzer.analyze();
        assert_eq!(scores[0].program_id, 2);
        assert!((scores[0].score - 0.75).abs() < 1e-9);
        assert!((scores[1].score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn analyze_overwrites_previous_scores() {
        let (clock, store) = fixture();
        store.insert_user(user(1, clock.as_ref()));
        let analyzer = ContentPerformanceAnalyzer::new(store.clone(), ContentConfig::default());
        assert!(analyzer.content_score(1).is_none());

        analyzer.analyze();
        assert_eq!(analyzer.content_score(1).map(|s| s.score), Some(0.0));

        store.insert_enrollment(enrollment(1, 1, clock.now()));
        clock.advance_ms(1_000);
        analyzer.analyze();
        let updated = analyzer.content_score(1).unwrap();
        assert!(updated.score > 0.0);
        assert_eq!(updated.last_updated, clock.now());
    }
}
