use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::lenient::{list_from_value, render_scalar};

/// Contact details pulled from the top of a resume. Empty strings when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "mobile_number")]
    pub phone: String,
}

/// A category value in a categorized skills block. Some resumes store a
/// single skill as a bare string instead of a one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Many(Vec<String>),
    One(String),
}

impl CategoryValue {
    pub fn items(&self) -> &[String] {
        match self {
            CategoryValue::Many(items) => items,
            CategoryValue::One(item) => std::slice::from_ref(item),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(_) => Some(CategoryValue::Many(list_from_value(value))),
            other => render_scalar(other).map(CategoryValue::One),
        }
    }
}

/// Skills are either one flat list or a mapping of category -> skills.
///
/// Decoding is lenient: null entries (and null categories) are dropped,
/// numbers and booleans are rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Skills {
    Flat(Vec<String>),
    Categorized(BTreeMap<String, CategoryValue>),
}

impl<'de> Deserialize<'de> for Skills {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Skills::from_value(&value))
    }
}

impl Default for Skills {
    fn default() -> Self {
        Skills::Flat(Vec::new())
    }
}

impl Skills {
    /// Every skill across both shapes, in declaration order (categories in key order).
    /// Values are returned verbatim; matching applies its own normalization.
    pub fn flatten(&self) -> Vec<&str> {
        match self {
            Skills::Flat(items) => items.iter().map(String::as_str).collect(),
            Skills::Categorized(categories) => categories
                .values()
                .flat_map(|v| v.items().iter().map(String::as_str))
                .collect(),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(categories) => Skills::Categorized(
                categories
                    .iter()
                    .filter_map(|(name, v)| Some((name.clone(), CategoryValue::from_value(v)?)))
                    .collect(),
            ),
            other => Skills::Flat(list_from_value(other)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flatten().iter().all(|s| s.trim().is_empty())
    }
}

/// A structured role with its own bullets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// One experience item. The segmenter emits `Line`; callers that hold
/// structured roles send `Role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceItem {
    Role(ExperienceEntry),
    Line(String),
}

/// The parsed resume. Every section is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub summary: Vec<String>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
}

impl ResumeRecord {
    /// True when no section and no contact field carries content.
    pub fn is_blank(&self) -> bool {
        self.contact == ContactInfo::default()
            && self.summary.is_empty()
            && self.skills.is_empty()
            && self.experience.is_empty()
            && self.projects.is_empty()
            && self.education.is_empty()
    }
}
