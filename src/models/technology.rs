use serde::{Deserialize, Serialize};

/// A source-ecosystem pattern the platform knows how to analyze.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnologyProfile {
    pub id: i64,
    pub name: String,
    pub technology: String,
    pub format_permission: String,
    pub description: String,
    pub enabled: bool,
}

/// Resolve a user-supplied technology name to its catalog id.
///
/// Matching is a case-insensitive exact comparison on the profile name.
pub fn resolve(profiles: &[TechnologyProfile], name: &str) -> Option<i64> {
    profiles
        .iter()
        .find(|profile| profile.name.eq_ignore_ascii_case(name))
        .map(|profile| profile.id)
}
