use serde::{Deserialize, Serialize};

/// A rostered worker.
///
/// `name` is both the record key and the value shifts reference, so a
/// rename is a migration, not an edit (see `AppState::rename_worker`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Free text ("Mon-Fri 08:00-16:00"). Never parsed.
    #[serde(default)]
    pub working_hours: String,
    /// Skill tags. Order is preserved; the pickers treat it as a set.
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub target_hours: f64,
    /// ISO dates ("YYYY-MM-DD"), compared to the viewed day by exact
    /// string match. Duplicates are tolerated.
    #[serde(default)]
    pub pto: Vec<String>,
}

/// A scheduled shift.
///
/// `id` is assigned by the store on first save and absent until then.
/// `name` points at the owning worker and is not enforced against the
/// roster at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// ISO date the shift occurs on.
    pub date: String,
    /// Role tag. Free text; may fall outside the ability vocabulary.
    #[serde(default)]
    pub role: String,
    /// Minutes since midnight, `0 <= start < end <= 1440`.
    pub start: u16,
    pub end: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Shift {
    pub fn duration_minutes(&self) -> u16 {
        self.end.saturating_sub(self.start)
    }
}

/// The session skill vocabulary.
///
/// Seeded from disk at startup, grown only by explicit adds, reset on
/// restart. Never written back as a whole; tags reach disk only inside
/// the worker records that carry them.
#[derive(Debug, Clone, Default)]
pub struct AbilityVocabulary {
    tags: Vec<String>,
}

impl AbilityVocabulary {
    pub fn new(seed: impl IntoIterator<Item = String>) -> Self {
        let mut vocabulary = Self::default();
        for tag in seed {
            vocabulary.add(&tag);
        }
        vocabulary
    }

    /// Append a tag unless it is already present. Returns whether the
    /// vocabulary changed. Tags are trimmed; empty tags are dropped.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}
