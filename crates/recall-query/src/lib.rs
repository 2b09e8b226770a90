pub mod categories;
pub mod engine;
pub mod error;
pub mod scoring;
pub mod search;

pub use categories::{episodes_in_category, group_by_category, CategoryGroup};
pub use engine::KnowledgeEngine;
pub use error::QueryError;
pub use scoring::{score_episode, Query, Weights};
pub use search::{search, SearchHit, Searcher};
