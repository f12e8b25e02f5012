use chrono::Duration;

use crate::store::{
    EngagementEntry, Enrollment, LearningStyle, MockStore, Program, SkillLevel, User,
    UserPreferences,
};

struct SeedUser {
    id: u64,
    name: &'static str,
    joined_days_ago: i64,
    interests: &'static [&'static str],
    style: LearningStyle,
    level: SkillLevel,
}

struct SeedProgram {
    id: u64,
    name: &'static str,
    difficulty: SkillLevel,
    topics: &'static [&'static str],
    required_skills: &'static [&'static str],
}

struct SeedEnrollment {
    program_id: u64,
    user_id: u64,
    hours_ago: i64,
    progress: f64,
    completed_tasks: u32,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        id: 1,
        name: "Aarav Sharma",
        joined_days_ago: 45,
        interests: &["AI", "Machine Learning"],
        style: LearningStyle::Practical,
        level: SkillLevel::Intermediate,
    },
    SeedUser {
        id: 2,
        name: "Priya Patel",
        joined_days_ago: 30,
        interests: &["Web Development", "Design"],
        style: LearningStyle::Visual,
        level: SkillLevel::Beginner,
    },
    SeedUser {
        id: 3,
        name: "Rohan Mehta",
        joined_days_ago: 120,
        interests: &["Database", "Cloud"],
        style: LearningStyle::Theoretical,
        level: SkillLevel::Advanced,
    },
    SeedUser {
        id: 4,
        name: "Sneha Iyer",
        joined_days_ago: 12,
        interests: &["Career", "Interview Prep"],
        style: LearningStyle::Practical,
        level: SkillLevel::Beginner,
    },
    SeedUser {
        id: 5,
        name: "Karan Verma",
        joined_days_ago: 75,
        interests: &["DevOps", "Cloud"],
        style: LearningStyle::Practical,
        level: SkillLevel::Advanced,
    },
    SeedUser {
        id: 6,
        name: "Ananya Reddy",
        joined_days_ago: 5,
        interests: &["Data Science", "AI"],
        style: LearningStyle::Visual,
        level: SkillLevel::Intermediate,
    },
];

const PROGRAMS: &[SeedProgram] = &[
    SeedProgram {
        id: 1,
        name: "AI Career Accelerator",
        difficulty: SkillLevel::Intermediate,
        topics: &["AI", "Machine Learning"],
        required_skills: &["Python", "Statistics"],
    },
    SeedProgram {
        id: 2,
        name: "Full-Stack Web Mentorship",
        difficulty: SkillLevel::Beginner,
        topics: &["Web Development", "JavaScript"],
        required_skills: &["HTML", "CSS"],
    },
    SeedProgram {
        id: 3,
        name: "Data Engineering Bootcamp",
        difficulty: SkillLevel::Advanced,
        topics: &["Database", "Data Science"],
        required_skills: &["SQL", "Python"],
    },
    SeedProgram {
        id: 4,
        name: "Interview Mastery",
        difficulty: SkillLevel::Intermediate,
        topics: &["Interview Prep", "Career"],
        required_skills: &["Data Structures"],
    },
    SeedProgram {
        id: 5,
        name: "Cloud & DevOps Track",
        difficulty: SkillLevel::Advanced,
        topics: &["Cloud", "DevOps"],
        required_skills: &["Linux", "Networking"],
    },
    SeedProgram {
        id: 6,
        name: "UI/UX Design Studio",
        difficulty: SkillLevel::Beginner,
        topics: &["Design"],
        required_skills: &[],
    },
];

const ENROLLMENTS: &[SeedEnrollment] = &[
    SeedEnrollment {
        program_id: 1,
        user_id: 1,
        hours_ago: 6,
        progress: 0.35,
        completed_tasks: 4,
    },
    SeedEnrollment {
        program_id: 1,
        user_id: 6,
        hours_ago: 30,
        progress: 0.1,
        completed_tasks: 1,
    },
    SeedEnrollment {
        program_id: 2,
        user_id: 2,
        hours_ago: 96,
        progress: 0.6,
        completed_tasks: 9,
    },
    SeedEnrollment {
        program_id: 3,
        user_id: 3,
        hours_ago: 400,
        progress: 0.9,
        completed_tasks: 18,
    },
    SeedEnrollment {
        program_id: 4,
        user_id: 4,
        hours_ago: 12,
        progress: 0.2,
        completed_tasks: 2,
    },
    SeedEnrollment {
        program_id: 4,
        user_id: 1,
        hours_ago: 150,
        progress: 0.75,
        completed_tasks: 7,
    },
    SeedEnrollment {
        program_id: 5,
        user_id: 5,
        hours_ago: 48,
        progress: 0.45,
        completed_tasks: 6,
    },
];

/// Loads the synthetic users, programs and enrollments, timed relative to the store clock.
pub fn populate(store: &MockStore) {
    let now = store.clock().now();

    for seed in USERS {
        let engagement_history = ENROLLMENTS
            .iter()
            .filter(|e| e.user_id == seed.id)
            .map(|e| EngagementEntry {
                program_id: e.program_id,
                engagement_score: f64::from(e.completed_tasks),
                last_interaction: now - Duration::hours(e.hours_ago),
            })
            .collect();

        store.insert_user(User {
            id: seed.id,
            name: seed.name.to_string(),
            joined_at: now - Duration::days(seed.joined_days_ago),
            preferences: UserPreferences {
                interests: seed.interests.iter().map(|s| s.to_string()).collect(),
                learning_style: seed.style,
                experience_level: seed.level,
                engagement_history,
            },
        });
    }

    for seed in PROGRAMS {
        store.insert_program(Program {
            id: seed.id,
            name: seed.name.to_string(),
            difficulty: seed.difficulty,
            topics: seed.topics.iter().map(|s| s.to_string()).collect(),
            required_skills: seed.required_skills.iter().map(|s| s.to_string()).collect(),
        });
    }

    for (idx, seed) in ENROLLMENTS.iter().enumerate() {
        store.insert_enrollment(Enrollment {
            id: idx as u64 + 1,
            program_id: seed.program_id,
            user_id: seed.user_id,
            enrolled_at: now - Duration::hours(seed.hours_ago),
            progress: seed.progress,
            completed_tasks: seed.completed_tasks,
        });
    }

    tracing::info!(
        users = USERS.len(),
        programs = PROGRAMS.len(),
        enrollments = ENROLLMENTS.len(),
        "seeded reference data"
    );
}

/// First names used by social-proof notifications.
pub const NOTIFICATION_NAMES: &[&str] = &[
    "Aarav", "Priya", "Rohan", "Sneha", "Karan", "Ananya", "Vikram", "Isha", "Arjun", "Meera",
    "Kabir", "Diya", "Aditya", "Neha", "Siddharth", "Pooja",
];
