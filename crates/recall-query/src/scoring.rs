//! Keyword relevance scoring.
//!
//! The weights are inherited from the original viewer and are a tunable, not
//! a principled ranking function.

use recall_core::model::Episode;

/// Points awarded per kind of match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    /// Whole query found in the title.
    pub title_phrase: u32,
    /// Whole query found in the content.
    pub content_phrase: u32,
    /// Any single query term found in the content.
    pub content_term: u32,
    /// Any single query term found in the joined entity list.
    pub entity_term: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            title_phrase: 3,
            content_phrase: 2,
            content_term: 1,
            entity_term: 1,
        }
    }
}

impl Weights {
    pub fn max_score(&self) -> u32 {
        self.title_phrase + self.content_phrase + self.content_term + self.entity_term
    }
}

/// A lower-cased query split into its phrase and whitespace-separated terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    phrase: String,
    terms: Vec<String>,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let phrase = raw.trim().to_lowercase();
        let terms = phrase.split_whitespace().map(str::to_string).collect();
        Self { phrase, terms }
    }

    /// A blank query matches nothing.
    pub fn is_empty(&self) -> bool {
        self.phrase.is_empty()
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn any_term_in(&self, haystack: &str) -> bool {
        self.terms.iter().any(|t| haystack.contains(t.as_str()))
    }
}

/// Score one episode against a parsed query. Zero means no match.
pub fn score_episode(episode: &Episode, query: &Query, weights: &Weights) -> u32 {
    if query.is_empty() {
        return 0;
    }

    let title = episode.title.to_lowercase();
    let content = episode.content.to_lowercase();
    let entities = episode.entities.join(" ").to_lowercase();

    let mut score = 0;
    if title.contains(query.phrase()) {
        score += weights.title_phrase;
    }
    if content.contains(query.phrase()) {
        score += weights.content_phrase;
    }
    if query.any_term_in(&content) {
        score += weights.content_term;
    }
    if query.any_term_in(&entities) {
        score += weights.entity_term;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, content: &str, entities: &[&str]) -> Episode {
        let entities = entities.iter().map(|e| e.to_string()).collect();
        Episode::new(title, content, "general", entities).unwrap()
    }

    #[test]
    fn test_parse_lowercases_and_splits() {
        let q = Query::parse("  Month   SELECTION ");
        assert_eq!(q.phrase(), "month   selection");
        assert_eq!(q.terms(), ["month", "selection"]);
    }

    #[test]
    fn test_blank_query_scores_zero() {
        let ep = episode("Anything", "Anything at all", &["Anything"]);
        for raw in ["", "   ", "\t\n"] {
            let q = Query::parse(raw);
            assert!(q.is_empty());
            assert_eq!(score_episode(&ep, &q, &Weights::default()), 0);
        }
    }

    #[test]
    fn test_full_match_scores_seven() {
        let ep = episode(
            "Month Selection Logic Bug Fix",
            "Default Month Selection Logic",
            &["Month Selection Logic"],
        );
        let q = Query::parse("month selection");
        assert_eq!(score_episode(&ep, &q, &Weights::default()), 7);
        assert_eq!(Weights::default().max_score(), 7);
    }

    #[test]
    fn test_individual_bonuses() {
        let w = Weights::default();
        let q = Query::parse("firebase rules");

        // title phrase only
        let ep = episode("Firebase Rules", "nothing here", &[]);
        assert_eq!(score_episode(&ep, &q, &w), 3);

        // content phrase implies a content term match
        let ep = episode("Other", "see firebase rules doc", &[]);
        assert_eq!(score_episode(&ep, &q, &w), 3);

        // one term in content, none in entities
        let ep = episode("Other", "uses Firebase", &["Hosting"]);
        assert_eq!(score_episode(&ep, &q, &w), 1);

        // entity term only
        let ep = episode("Other", "unrelated", &["Security Rules"]);
        assert_eq!(score_episode(&ep, &q, &w), 1);
    }

    #[test]
    fn test_entities_are_joined_with_spaces() {
        let q = Query::parse("react typescript");
        let ep = episode("Other", "unrelated", &["React", "TypeScript"]);
        // each term matches the joined string, but only one bonus applies
        assert_eq!(score_episode(&ep, &q, &Weights::default()), 1);
    }

    #[test]
    fn test_custom_weights() {
        let w = Weights {
            title_phrase: 10,
            content_phrase: 0,
            content_term: 0,
            entity_term: 0,
        };
        let ep = episode("Firebase Rules", "firebase rules", &["Firebase"]);
        assert_eq!(score_episode(&ep, &Query::parse("firebase rules"), &w), 10);
    }
}
