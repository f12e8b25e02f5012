use crate::store::LearningStyle;

use LearningStyle::{Practical, Theoretical, Visual};

const TOPIC_STYLES: &[(&str, &[LearningStyle])] = &[
    ("AI", &[Practical, Theoretical]),
    ("Machine Learning", &[Practical, Theoretical]),
    ("Data Science", &[Visual, Practical, Theoretical]),
    ("Database", &[Practical, Theoretical]),
    ("Web Development", &[Visual, Practical]),
    ("JavaScript", &[Practical]),
    ("Cloud", &[Practical]),
    ("DevOps", &[Practical]),
    ("Design", &[Visual]),
    ("Career", &[Theoretical, Visual]),
    ("Interview Prep", &[Practical]),
    ("System Design", &[Visual, Theoretical]),
];

/// Styles a topic suits. Unknown topics suit no style.
pub fn compatible_styles(topic: &str) -> &'static [LearningStyle] {
    TOPIC_STYLES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(topic))
        .map(|(_, styles)| *styles)
        .unwrap_or(&[])
}

pub fn topic_suits_style(topic: &str, style: LearningStyle) -> bool {
    compatible_styles(topic).contains(&style)
}
