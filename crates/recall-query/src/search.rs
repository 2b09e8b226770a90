use serde::Serialize;

use recall_core::model::Episode;

use crate::scoring::{score_episode, Query, Weights};

/// An episode paired with its relevance score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchHit<'a> {
    #[serde(flatten)]
    pub episode: &'a Episode,
    #[serde(rename = "relevance_score")]
    pub score: u32,
}

/// Ranks episodes against free-text queries.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    weights: Weights,
    limit: Option<usize>,
}

impl Searcher {
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            limit: None,
        }
    }

    /// Cap the number of hits returned.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Score every episode, drop zero scores and sort by descending score.
    /// Ties keep the original episode order.
    pub fn search<'a>(&self, episodes: &'a [Episode], query: &str) -> Vec<SearchHit<'a>> {
        let query = Query::parse(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'a>> = episodes
            .iter()
            .filter_map(|episode| {
                let score = score_episode(episode, &query, &self.weights);
                (score > 0).then_some(SearchHit { episode, score })
            })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score));

        if let Some(limit) = self.limit {
            hits.truncate(limit);
        }
        tracing::debug!(query = query.phrase(), hits = hits.len(), "keyword search");
        hits
    }
}

/// Search with the default weights and no limit.
pub fn search<'a>(episodes: &'a [Episode], query: &str) -> Vec<SearchHit<'a>> {
    Searcher::default().search(episodes, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::model::default_knowledge_base;

    fn seed() -> Vec<Episode> {
        default_knowledge_base("2025-09-25T00:00:00Z").episodes
    }

    #[test]
    fn test_month_selection_ranks_bug_fix_first() {
        let episodes = seed();
        let hits = search(&episodes, "month selection");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].episode.title, "Month Selection Logic Bug Fix");
        assert_eq!(hits[0].score, 7);
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let episodes = seed();
        assert!(search(&episodes, "").is_empty());
        assert!(search(&episodes, "   \t ").is_empty());
    }

    #[test]
    fn test_results_sorted_and_stable() {
        let episodes = seed();
        let hits = search(&episodes, "firebase");
        assert!(hits.len() > 1);
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                let pos = |ep: &Episode| episodes.iter().position(|e| e.id == ep.id).unwrap();
                assert!(pos(pair[0].episode) < pos(pair[1].episode));
            }
        }
    }

    #[test]
    fn test_title_substring_scores_at_least_three() {
        let episodes = seed();
        for ep in &episodes {
            let hits = search(&episodes, &ep.title);
            let hit = hits.iter().find(|h| h.episode.id == ep.id).unwrap();
            assert!(hit.score >= 3, "{} scored {}", ep.title, hit.score);
        }
    }

    #[test]
    fn test_no_match_excluded() {
        let episodes = seed();
        assert!(search(&episodes, "kubernetes").is_empty());
    }

    #[test]
    fn test_limit_truncates() {
        let episodes = seed();
        let all = search(&episodes, "firebase");
        let limited = Searcher::default().with_limit(2).search(&episodes, "firebase");
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].episode.id, all[0].episode.id);
        assert_eq!(limited[1].episode.id, all[1].episode.id);
    }

    #[test]
    fn test_hit_serializes_with_relevance_score() {
        let episodes = seed();
        let hits = search(&episodes, "month selection");
        let json = serde_json::to_value(hits[0]).unwrap();
        assert_eq!(json["id"], "month_selection_bug_fix");
        assert_eq!(json["relevance_score"], 7);
    }
}
