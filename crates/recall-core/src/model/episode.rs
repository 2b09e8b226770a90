use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::CoreError;

/// A unique identifier for an episode.
/// Seeded episodes use readable slugs; new ones get a UUID v4 hex (no dashes).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeId(pub String);

impl EpisodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().as_simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EpisodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EpisodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EpisodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Current time as an ISO-8601 string, the format stored in `created` fields.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A single unit of stored knowledge.
///
/// `created` is kept verbatim as read from disk so documents written by other
/// tools survive a load/save cycle unchanged. Unknown fields are carried in
/// `extra` for the same reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub id: EpisodeId,
    pub title: String,
    pub content: String,
    pub entities: Vec<String>,
    pub category: String,
    pub created: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Episode {
    /// Build a new episode stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        entities: Vec<String>,
    ) -> Result<Self, CoreError> {
        let episode = Self {
            id: EpisodeId::new(),
            title: title.into(),
            content: content.into(),
            entities,
            category: category.into(),
            created: now_timestamp(),
            extra: Map::new(),
        };
        episode.validate()?;
        Ok(episode)
    }

    /// Title and content must both carry text.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::InvalidEpisode(format!(
                "episode '{}' has an empty title",
                self.id
            )));
        }
        if self.content.trim().is_empty() {
            return Err(CoreError::InvalidEpisode(format!(
                "episode '{}' has empty content",
                self.id
            )));
        }
        Ok(())
    }

    /// The date part (`YYYY-MM-DD`) of the creation timestamp.
    pub fn created_date(&self) -> &str {
        self.created.get(..10).unwrap_or(&self.created)
    }
}
