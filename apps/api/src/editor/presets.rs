use crate::editor::collection::contains_value;

/// Suggestions offered next to the interests input. Chosen presets go through
/// the same add path as typed values.
pub const PRESET_INTERESTS: &[&str] = &[
    "Reading",
    "Travel",
    "Photography",
    "Music",
    "Sports",
    "Cooking",
    "Hiking",
    "Gaming",
    "Volunteering",
    "Art",
    "Writing",
    "Technology",
];

pub const PRESET_SKILLS: &[&str] = &[
    "Communication",
    "Leadership",
    "Problem Solving",
    "Teamwork",
    "Time Management",
    "Project Management",
    "Critical Thinking",
    "Adaptability",
];

/// Presets not yet present in `existing`, in preset order.
pub fn remaining<'a>(presets: &[&'a str], existing: &[String]) -> Vec<&'a str> {
    presets
        .iter()
        .copied()
        .filter(|p| !contains_value(existing, p))
        .collect()
}
