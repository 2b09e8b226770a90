use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::episode::Episode;
use crate::error::CoreError;

/// Informational header of a knowledge base document.
///
/// `total_episodes` is whatever the document declares; it is not kept in sync
/// with the episode list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub created: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub description: String,
    pub total_episodes: usize,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The full collection of episodes plus metadata, as persisted to one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeBase {
    pub metadata: Metadata,
    pub episodes: Vec<Episode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KnowledgeBase {
    pub fn len(&self) -> usize {
        self.episodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Append an episode. Duplicate ids are not detected.
    pub fn add_episode(&mut self, episode: Episode) -> Result<&Episode, CoreError> {
        episode.validate()?;
        tracing::debug!(id = %episode.id, category = %episode.category, "episode added");
        self.episodes.push(episode);
        let last = self.episodes.len() - 1;
        Ok(&self.episodes[last])
    }

    /// Find an episode by exact id, 1-based display position, or unique id prefix.
    pub fn resolve(&self, selector: &str) -> Result<&Episode, CoreError> {
        let selector = selector.trim();
        let not_found = || CoreError::NotFound {
            id: selector.to_string(),
        };
        if selector.is_empty() {
            return Err(not_found());
        }

        if let Some(ep) = self.episodes.iter().find(|e| e.id.as_str() == selector) {
            return Ok(ep);
        }

        if let Ok(position) = selector.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|i| self.episodes.get(i))
                .ok_or_else(not_found);
        }

        let matches: Vec<&Episode> = self
            .episodes
            .iter()
            .filter(|e| e.id.as_str().starts_with(selector))
            .collect();
        match matches.as_slice() {
            [only] => Ok(*only),
            [] => Err(not_found()),
            many => Err(CoreError::NotFound {
                id: format!("{selector} (ambiguous: {} matches)", many.len()),
            }),
        }
    }
}
