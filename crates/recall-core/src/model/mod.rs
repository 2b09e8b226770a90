pub mod draft;
pub mod episode;
pub mod knowledge_base;
pub mod seed;

pub use draft::{EpisodeDraft, Section};
pub use episode::{now_timestamp, Episode, EpisodeId};
pub use knowledge_base::{KnowledgeBase, Metadata};
pub use seed::default_knowledge_base;
