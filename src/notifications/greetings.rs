use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreetingBucket {
    LateNight,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl GreetingBucket {
    /// [0,5) late night, [5,12) morning, [12,17) afternoon, [17,21) evening, [21,24) night.
    pub fn for_hour(hour: u32) -> Self {
        match hour % 24 {
            0..=4 => Self::LateNight,
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LateNight => "late_night",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    pub fn greetings(&self) -> &'static [&'static str] {
        match self {
            Self::LateNight => &[
                "Burning the midnight oil?",
                "Night owls are learning too!",
                "Still up and leveling up?",
            ],
            Self::Morning => &["Good morning!", "Rise and shine!", "Fresh start today!"],
            Self::Afternoon => &["Good afternoon!", "Midday momentum!", "Hello there!"],
            Self::Evening => &[
                "Good evening!",
                "Evening learners are busy!",
                "Winding down with some growth?",
            ],
            Self::Night => &[
                "Hello, night owl!",
                "Late learners unite!",
                "One more study session?",
            ],
        }
    }
}
