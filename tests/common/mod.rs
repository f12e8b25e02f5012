#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use mentor_engine::clock::ManualClock;
use mentor_engine::config::EngineConfig;
use mentor_engine::notifications::MemoryToastSink;
use mentor_engine::state::MentorSession;
use mentor_engine::store::{LearningStyle, Program, SkillLevel, User, UserPreferences};

pub const T0_MS: i64 = 1_700_000_000_000;

pub struct Harness {
    pub clock: Arc<ManualClock>,
    pub sink: Arc<MemoryToastSink>,
    pub session: MentorSession,
}

fn build(seeded: bool) -> Harness {
    let clock = Arc::new(ManualClock::from_millis(T0_MS));
    let sink = Arc::new(MemoryToastSink::new());
    let session = if seeded {
        MentorSession::seeded(EngineConfig::default(), clock.clone(), sink.clone())
    } else {
        MentorSession::new(EngineConfig::default(), clock.clone(), sink.clone())
    }
    .expect("default notification config is valid");
    Harness {
        clock,
        sink,
        session,
    }
}

pub fn empty_harness() -> Harness {
    build(false)
}

pub fn seeded_harness() -> Harness {
    build(true)
}

fn tags(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn learner(id: u64, interests: &[&str], style: LearningStyle, level: SkillLevel) -> User {
    User {
        id,
        name: format!("learner-{id}"),
        joined_at: chrono::DateTime::from_timestamp_millis(T0_MS).unwrap_or_default(),
        preferences: UserPreferences {
            interests: tags(interests),
            learning_style: style,
            experience_level: level,
            engagement_history: Vec::new(),
        },
    }
}

pub fn program(id: u64, difficulty: SkillLevel, topics: &[&str]) -> Program {
    Program {
        id,
        name: format!("program-{id}"),
        difficulty,
        topics: tags(topics),
        required_skills: BTreeSet::new(),
    }
}
