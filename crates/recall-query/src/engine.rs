use std::path::PathBuf;

use recall_core::model::{now_timestamp, Episode, EpisodeDraft, KnowledgeBase};
use recall_core::storage::JsonStore;

use crate::categories::{episodes_in_category, group_by_category, CategoryGroup};
use crate::error::QueryError;
use crate::scoring::Weights;
use crate::search::{SearchHit, Searcher};

const OVERVIEW_LIMIT: usize = 3;
const PREFERENCES_LIMIT: usize = 2;
const PREFERENCES_QUERY: &str = "user preferences UI guidelines git workflow";
const RECENT_CHANGES_QUERY: &str = "bug fixes solutions recent changes";

/// Canned query for a named project aspect; unknown aspects are searched verbatim.
pub fn overview_query(aspect: &str) -> &str {
    match aspect {
        "all" => "Toastmasters project architecture components React TypeScript Firebase",
        "preferences" => PREFERENCES_QUERY,
        "bugs" => "bug fixes solutions month selection logic",
        "business_logic" => "Toastmasters business logic meeting structure member management",
        "technical" => "technical implementation data models Firebase collections",
        other => other,
    }
}

/// The local fallback knowledge service: a loaded knowledge base plus the store it came from.
///
/// Reads are served from memory. [`KnowledgeEngine::add`] is the only write and
/// persists immediately.
pub struct KnowledgeEngine {
    store: JsonStore,
    knowledge: KnowledgeBase,
    searcher: Searcher,
}

impl KnowledgeEngine {
    /// Open the knowledge base at `path`, seeding it if missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, QueryError> {
        let store = JsonStore::new(path);
        let knowledge = store.load()?;
        Ok(Self::from_parts(store, knowledge))
    }

    pub fn from_parts(store: JsonStore, knowledge: KnowledgeBase) -> Self {
        Self {
            store,
            knowledge,
            searcher: Searcher::default(),
        }
    }

    pub fn with_searcher(mut self, searcher: Searcher) -> Self {
        self.searcher = searcher;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    pub fn weights(&self) -> &Weights {
        self.searcher.weights()
    }

    /// Ranked keyword search, at most `limit` hits.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit<'_>> {
        self.searcher
            .clone()
            .with_limit(limit)
            .search(&self.knowledge.episodes, query)
    }

    /// Store a draft as a new episode and save the knowledge base.
    /// On a failed save the episode is dropped again.
    pub fn add(&mut self, draft: EpisodeDraft) -> Result<&Episode, QueryError> {
        let episode = draft.into_episode(now_timestamp())?;
        let id = episode.id.clone();
        self.knowledge.add_episode(episode)?;

        if let Err(e) = self.store.save(&self.knowledge) {
            self.knowledge.episodes.pop();
            return Err(e.into());
        }
        tracing::info!(%id, path = %self.store.path().display(), "episode stored");

        let last = self.knowledge.len() - 1;
        Ok(&self.knowledge.episodes[last])
    }

    pub fn show(&self, selector: &str) -> Result<&Episode, QueryError> {
        Ok(self.knowledge.resolve(selector)?)
    }

    pub fn categories(&self) -> Vec<CategoryGroup> {
        group_by_category(&self.knowledge.episodes)
    }

    pub fn category(&self, name: &str) -> Result<Vec<&Episode>, QueryError> {
        let episodes = episodes_in_category(&self.knowledge.episodes, name);
        if episodes.is_empty() {
            return Err(QueryError::UnknownCategory(name.to_string()));
        }
        Ok(episodes)
    }

    pub fn overview(&self, aspect: &str) -> Vec<SearchHit<'_>> {
        self.search(overview_query(aspect), OVERVIEW_LIMIT)
    }

    pub fn preferences(&self) -> Vec<SearchHit<'_>> {
        self.search(PREFERENCES_QUERY, PREFERENCES_LIMIT)
    }

    pub fn recent_changes(&self, limit: usize) -> Vec<SearchHit<'_>> {
        self.search(RECENT_CHANGES_QUERY, limit)
    }
}
