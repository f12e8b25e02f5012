pub mod models;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::clock::Clock;
use crate::config::StoreConfig;

pub use models::{
    EngagementEntry, Enrollment, InteractionKind, InteractionRecord, LearningStyle, Program,
    ProgramId, SkillLevel, User, UserId, UserPreferences,
};

#[derive(Default)]
struct StoreInner {
    users: HashMap<UserId, User>,
    user_order: Vec<UserId>,
    programs: HashMap<ProgramId, Program>,
    program_order: Vec<ProgramId>,
    enrollments: Vec<Enrollment>,
    interactions: HashMap<(UserId, ProgramId), VecDeque<InteractionRecord>>,
    next_enrollment_id: u64,
}

/// In-memory reference data for one session.
///
/// Lookups by id are O(1). The interaction log is bounded per (user, program)
/// key; once a key reaches capacity the oldest record is evicted.
pub struct MockStore {
    clock: Arc<dyn Clock>,
    log_capacity: usize,
    inner: RwLock<StoreInner>,
}

impl MockStore {
    pub fn new(clock: Arc<dyn Clock>, config: &StoreConfig) -> Self {
        Self {
            clock,
            log_capacity: config.interaction_log_capacity.max(1),
            inner: RwLock::new(StoreInner {
                next_enrollment_id: 1,
                ..Default::default()
            }),
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn insert_user(&self, user: User) {
        let mut inner = self.inner.write();
        if inner.users.insert(user.id, user.clone()).is_none() {
            inner.user_order.push(user.id);
        }
    }

    pub fn insert_program(&self, program: Program) {
        let mut inner = self.inner.write();
        if inner.programs.insert(program.id, program.clone()).is_none() {
            inner.program_order.push(program.id);
        }
    }

    pub fn insert_enrollment(&self, enrollment: Enrollment) {
        let mut inner = self.inner.write();
        inner.next_enrollment_id = inner.next_enrollment_id.max(enrollment.id + 1);
        inner.enrollments.push(enrollment);
    }

    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.inner.read().users.get(&id).cloned()
    }

    pub fn get_program(&self, id: ProgramId) -> Option<Program> {
        self.inner.read().programs.get(&id).cloned()
    }

    pub fn list_users(&self) -> Vec<User> {
        let inner = self.inner.read();
        inner
            .user_order
            .iter()
            .filter_map(|id| inner.users.get(id).cloned())
            .collect()
    }

    pub fn list_programs(&self) -> Vec<Program> {
        let inner = self.inner.read();
        inner
            .program_order
            .iter()
            .filter_map(|id| inner.programs.get(id).cloned())
            .collect()
    }

    pub fn list_enrollments(&self) -> Vec<Enrollment> {
        self.inner.read().enrollments.clone()
    }

    pub fn user_count(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn program_count(&self) -> usize {
        self.inner.read().programs.len()
    }

    /// Appends an interaction for the pair. Unknown ids are not rejected:
    /// the record is still stored, only the engagement history update is skipped.
    pub fn record_interaction(
        &self,
        user_id: UserId,
        program_id: ProgramId,
        kind: InteractionKind,
    ) -> InteractionRecord {
        let now = self.clock.now();
        let record = InteractionRecord {
            kind,
            timestamp: now,
            weight: kind.weight(),
        };

        let mut inner = self.inner.write();
        let log = inner
            .interactions
            .entry((user_id, program_id))
            .or_default();
        if log.len() >= self.log_capacity {
            log.pop_front();
        }
        log.push_back(record.clone());

        if let Some(user) = inner.users.get_mut(&user_id) {
            let history = &mut user.preferences.engagement_history;
            match history.iter_mut().find(|e| e.program_id == program_id) {
                Some(entry) => {
                    entry.engagement_score += f64::from(record.weight);
                    entry.last_interaction = now;
                }
                None => history.push(EngagementEntry {
                    program_id,
                    engagement_score: f64::from(record.weight),
                    last_interaction: now,
                }),
            }
        }

        debug!(
            user_id,
            program_id,
            kind = kind.as_str(),
            weight = record.weight,
            "interaction recorded"
        );

        record
    }

    pub fn interactions(&self, user_id: UserId, program_id: ProgramId) -> Vec<InteractionRecord> {
        self.inner
            .read()
            .interactions
            .get(&(user_id, program_id))
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Checkout completion: creates the enrollment and logs an `enroll` interaction.
    pub fn enroll(&self, user_id: UserId, program_id: ProgramId) -> Option<Enrollment> {
        let enrollment = {
            let mut inner = self.inner.write();
            if !inner.users.contains_key(&user_id) || !inner.programs.contains_key(&program_id) {
                return None;
            }
            let enrollment = Enrollment {
                id: inner.next_enrollment_id,
                program_id,
                user_id,
                enrolled_at: self.clock.now(),
                progress: 0.0,
                completed_tasks: 0,
            };
            inner.next_enrollment_id += 1;
            inner.enrollments.push(enrollment.clone());
            enrollment
        };

        self.record_interaction(user_id, program_id, InteractionKind::Enroll);
        Some(enrollment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::collections::BTreeSet;

    fn store_with_capacity(capacity: usize) -> (Arc<ManualClock>, MockStore) {
        let clock = Arc::new(ManualClock::from_millis(1_700_000_000_000));
        let store = MockStore::new(
            clock.clone(),
            &StoreConfig {
                interaction_log_capacity: capacity,
            },
        );
        (clock, store)
    }

    fn user(id: UserId) -> User {
        User {
            id,
            name: format!("user-{id}"),
            joined_at: chrono::DateTime::from_timestamp_millis(0).unwrap_or_default(),
            preferences: UserPreferences {
                interests: BTreeSet::new(),
                learning_style: LearningStyle::Visual,
                experience_level: SkillLevel::Beginner,
                engagement_history: Vec::new(),
            },
        }
    }

    fn program(id: ProgramId) -> Program {
        Program {
            id,
            name: format!("program-{id}"),
            difficulty: SkillLevel::Beginner,
            topics: BTreeSet::new(),
            required_skills: BTreeSet::new(),
        }
    }

    #[test]
    fn lookups_miss_return_none() {
        let (_, store) = store_with_capacity(8);
        assert!(store.get_user(42).is_none());
        assert!(store.get_program(42).is_none());
    }

    #[test]
    fn unknown_ids_still_append_interactions() {
        let (_, store) = store_with_capacity(8);
        store.record_interaction(99, 98, InteractionKind::Click);
        let log = store.interactions(99, 98);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].weight, 2);
    }

    #[test]
    fn interaction_log_is_bounded_and_keeps_append_order() {
        let (clock, store) = store_with_capacity(3);
        for _ in 0..5 {
            store.record_interaction(1, 1, InteractionKind::View);
            clock.advance_ms(1_000);
        }
        let log = store.interactions(1, 1);
        assert_eq!(log.len(), 3);
        assert!(log.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(log[0].timestamp.timestamp_millis(), 1_700_000_002_000);
    }

    #[test]
    fn interactions_fold_into_engagement_history() {
        let (_, store) = store_with_capacity(8);
        store.insert_user(user(1));
        store.record_interaction(1, 5, InteractionKind::Click);
        store.record_interaction(1, 5, InteractionKind::Complete);

        let history = store.get_user(1).unwrap().preferences.engagement_history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].program_id, 5);
        assert!((history[0].engagement_score - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn enroll_requires_known_ids() {
        let (_, store) = store_with_capacity(8);
        store.insert_user(user(1));
        store.insert_program(program(2));

        assert!(store.enroll(1, 3).is_none());
        let enrollment = store.enroll(1, 2).unwrap();
        assert_eq!(enrollment.id, 1);
        assert_eq!(store.list_enrollments().len(), 1);
        assert_eq!(store.interactions(1, 2)[0].kind, InteractionKind::Enroll);
    }

    #[test]
    fn listing_preserves_insertion_order() {
        let (_, store) = store_with_capacity(8);
        for id in [3, 1, 2] {
            store.insert_program(program(id));
        }
        store.insert_program(program(1));
        let ids: Vec<_> = store.list_programs().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
