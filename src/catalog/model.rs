use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical yes/no capability flag.
///
/// Defaults to [`Support::No`]: a capability is never claimed unless the source says so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Support {
    Yes,
    #[default]
    No,
}

impl Support {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Support::Yes => "Yes",
            Support::No => "No",
        }
    }

    #[inline]
    pub fn is_yes(&self) -> bool {
        matches!(self, Support::Yes)
    }
}

impl std::fmt::Display for Support {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable catalog entry.
///
/// Built by [`normalize`](super::normalize::normalize); `test_types` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub url: String,
    pub name: String,
    pub description: String,
    /// Minutes; `0` means unknown.
    pub duration: u32,
    pub adaptive_support: Support,
    pub remote_support: Support,
    pub test_types: Vec<String>,
}

impl AssessmentRecord {
    /// Metadata shape persisted alongside the vector in the catalog store.
    ///
    /// Test types are joined with `", "` so the payload stays scalar-only; the
    /// normalizer splits them back on read.
    pub fn to_metadata(&self) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("url".to_string(), Value::from(self.url.clone()));
        meta.insert("name".to_string(), Value::from(self.name.clone()));
        meta.insert(
            "description".to_string(),
            Value::from(self.description.clone()),
        );
        meta.insert("duration".to_string(), Value::from(self.duration));
        meta.insert(
            "adaptive_support".to_string(),
            Value::from(self.adaptive_support.as_str()),
        );
        meta.insert(
            "remote_support".to_string(),
            Value::from(self.remote_support.as_str()),
        );
        meta.insert(
            "test_type".to_string(),
            Value::from(self.test_types.join(", ")),
        );
        meta
    }
}
