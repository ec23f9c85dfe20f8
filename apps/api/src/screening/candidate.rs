//! Candidate records as handed to the ranker by the profile store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const ATTR_ROLE: &str = "role";
pub const ATTR_LOCATION: &str = "location";
pub const ATTR_SKILLS: &str = "skills";
pub const ATTR_YEARS_EXPERIENCE: &str = "years_experience";
pub const ATTR_EDUCATION: &str = "education";

/// Rendering order for well-known attributes. Anything else follows, sorted by key.
pub const PREFERRED_ATTRIBUTES: [(&str, &str); 5] = [
    (ATTR_ROLE, "Role"),
    (ATTR_LOCATION, "Location"),
    (ATTR_SKILLS, "Skills"),
    (ATTR_YEARS_EXPERIENCE, "Years of Experience"),
    (ATTR_EDUCATION, "Education"),
];

/// A single retrievable candidate profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub raw_text: String,
    /// Similarity the repository attached at query time. Never used for scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f32>,
}

impl CandidateRecord {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: None,
            attributes: BTreeMap::new(),
            raw_text: String::new(),
            relevance: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[cfg(test)]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the attribute value if present and non-blank.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Display name, falling back to the identifier. Never an invented name.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.identifier)
    }

    /// Present attributes as `(label, value)` pairs in rendering order.
    pub fn present_attributes(&self) -> Vec<(String, &str)> {
        let mut out: Vec<(String, &str)> = PREFERRED_ATTRIBUTES
            .iter()
            .filter_map(|(key, label)| self.attribute(key).map(|v| (label.to_string(), v)))
            .collect();

        let preferred: Vec<&str> = PREFERRED_ATTRIBUTES.iter().map(|(k, _)| *k).collect();
        for key in self.attributes.keys() {
            if preferred.contains(&key.as_str()) {
                continue;
            }
            if let Some(value) = self.attribute(key) {
                out.push((attribute_label(key), value));
            }
        }
        out
    }
}

/// `years_experience` → `Years Experience`
fn attribute_label(key: &str) -> String {
    key.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
