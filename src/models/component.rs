use serde::{Deserialize, Serialize};
use std::path::Path;

/// Body posted to the component-creation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRequest {
    pub name: String,
    pub technology: i64,
}

/// Response from the component-creation endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentCreated {
    pub id: i64,
    pub message: String,
}

/// Derive the default component name from a working directory path: the two
/// innermost segments joined with a hyphen (`.../org/project` → `org-project`).
pub fn default_component_name(path: &Path) -> String {
    let mut segments: Vec<&str> = path
        .components()
        .filter_map(|component| match component {
            std::path::Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .collect();

    let tail = segments.split_off(segments.len().saturating_sub(2));
    tail.join("-")
}
