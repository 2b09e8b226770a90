use serde::{Deserialize, Serialize};

use super::episode::Episode;
use crate::error::CoreError;

const TITLE_SUBJECT_MAX: usize = 50;
const NO_TESTING_NOTES: &str = "No specific testing notes provided.";

/// One labelled block of an episode body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub body: String,
}

impl Section {
    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            heading: None,
            body: body.into(),
        }
    }

    pub fn labelled(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            body: body.into(),
        }
    }

    fn list(heading: &str, items: &[String]) -> Self {
        let body = items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n");
        Self::labelled(heading, body)
    }
}

/// Structured knowledge waiting to be stored.
///
/// Drafts keep their parts separate; [`EpisodeDraft::render_content`] is the
/// only place they are flattened into episode text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpisodeDraft {
    pub title: String,
    pub category: String,
    pub entities: Vec<String>,
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl EpisodeDraft {
    /// A free-form insight with a single unlabelled body.
    pub fn insight(
        title: impl Into<String>,
        body: impl Into<String>,
        category: impl Into<String>,
        entities: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            entities,
            sections: vec![Section::plain(body)],
            tags: Vec::new(),
        }
    }

    pub fn bug_fix(
        description: &str,
        solution: &str,
        files_changed: &[String],
        testing_notes: Option<&str>,
    ) -> Self {
        let notes = testing_notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(NO_TESTING_NOTES);

        let mut entities = strings(&["Bug Fix", "Solution", "Code Change"]);
        entities.extend(files_changed.iter().cloned());

        Self {
            title: format!("Bug Fix: {}", abbreviate(description)),
            category: "bug_fix".into(),
            entities,
            sections: vec![
                Section::labelled("Bug Description", description),
                Section::labelled("Solution Implemented", solution),
                Section::list("Files Modified", files_changed),
                Section::labelled("Testing Notes", notes),
            ],
            tags: strings(&["bug", "fix", "solution"]),
        }
    }

    pub fn feature(
        name: &str,
        description: &str,
        implementation: &str,
        files_created: &[String],
        files_modified: &[String],
    ) -> Self {
        let mut entities = strings(&["Feature", "Implementation", name]);
        entities.extend(files_created.iter().cloned());
        entities.extend(files_modified.iter().cloned());

        Self {
            title: format!("Feature: {name}"),
            category: "feature".into(),
            entities,
            sections: vec![
                Section::labelled("Feature Description", description),
                Section::labelled("Implementation Details", implementation),
                Section::list("Files Created", files_created),
                Section::list("Files Modified", files_modified),
            ],
            tags: strings(&["feature", "implementation", "new"]),
        }
    }

    pub fn user_feedback(kind: &str, content: &str, action_taken: &str) -> Self {
        Self {
            title: format!("User Feedback: {kind}"),
            category: "user_feedback".into(),
            entities: strings(&["User Feedback", kind, "Action Taken"]),
            sections: vec![
                Section::labelled("Feedback Type", kind),
                Section::labelled("User Input", content),
                Section::labelled("Action Taken", action_taken),
            ],
            tags: strings(&["feedback", "user", "action"]),
        }
    }

    pub fn architecture_decision(
        decision: &str,
        rationale: &str,
        alternatives: &[String],
        impact: &str,
    ) -> Self {
        Self {
            title: format!("Architecture Decision: {}", abbreviate(decision)),
            category: "architecture".into(),
            entities: strings(&["Architecture Decision", "Rationale", "Impact"]),
            sections: vec![
                Section::labelled("Decision", decision),
                Section::labelled("Rationale", rationale),
                Section::list("Alternatives Considered", alternatives),
                Section::labelled("Impact", impact),
            ],
            tags: strings(&["architecture", "decision", "design"]),
        }
    }

    /// Flatten sections and tags into episode body text.
    pub fn render_content(&self) -> String {
        let mut blocks: Vec<String> = self
            .sections
            .iter()
            .filter(|s| !s.body.trim().is_empty())
            .map(|s| match &s.heading {
                Some(heading) => format!("{heading}:\n{}", s.body.trim()),
                None => s.body.trim().to_string(),
            })
            .collect();
        if !self.tags.is_empty() {
            blocks.push(format!("Tags: {}", self.tags.join(", ")));
        }
        blocks.join("\n\n")
    }

    /// Turn the draft into a stored episode created at `created`.
    pub fn into_episode(self, created: impl Into<String>) -> Result<Episode, CoreError> {
        let content = self.render_content();
        let mut episode = Episode::new(self.title.trim(), content, self.category, self.entities)?;
        episode.created = created.into();
        Ok(episode)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn abbreviate(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= TITLE_SUBJECT_MAX {
        return text.to_string();
    }
    let head: String = text.chars().take(TITLE_SUBJECT_MAX).collect();
    format!("{}...", head.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bug_fix_draft() {
        let files = vec!["Context/ToastmastersContext.tsx".to_string()];
        let draft = EpisodeDraft::bug_fix(
            "October not showing as default month after September 24th",
            "Switch to next month when no future meetings remain",
            &files,
            None,
        );
        assert_eq!(
            draft.title,
            "Bug Fix: October not showing as default month after Septemb..."
        );
        assert_eq!(draft.category, "bug_fix");
        assert_eq!(
            draft.entities,
            vec![
                "Bug Fix",
                "Solution",
                "Code Change",
                "Context/ToastmastersContext.tsx"
            ]
        );

        let content = draft.render_content();
        assert!(content.starts_with("Bug Description:\nOctober not showing"));
        assert!(content.contains("Files Modified:\n- Context/ToastmastersContext.tsx"));
        assert!(content.contains("Testing Notes:\nNo specific testing notes provided."));
        assert!(content.ends_with("Tags: bug, fix, solution"));
    }

    #[test]
    fn test_short_subject_is_not_abbreviated() {
        let draft = EpisodeDraft::architecture_decision("Keep Firestore", "One store", &[], "None");
        assert_eq!(draft.title, "Architecture Decision: Keep Firestore");
        // empty alternatives list is dropped from the body
        assert!(!draft.render_content().contains("Alternatives Considered"));
    }

    #[test]
    fn test_feature_entities_include_files() {
        let draft = EpisodeDraft::feature(
            "Mentorship",
            "Pair new members with mentors",
            "New collection and screens",
            &["components/Mentorship.tsx".to_string()],
            &["App.tsx".to_string()],
        );
        assert_eq!(draft.title, "Feature: Mentorship");
        assert_eq!(draft.entities.len(), 5);
        assert_eq!(draft.entities[2], "Mentorship");
    }

    #[test]
    fn test_insight_into_episode() {
        let draft = EpisodeDraft::insight(
            "Deploys",
            "  Deploy with git tags  ",
            "preferences",
            vec!["Git Workflow".into()],
        );
        let ep = draft.into_episode("2025-10-01T12:00:00Z").unwrap();
        assert_eq!(ep.content, "Deploy with git tags");
        assert_eq!(ep.created, "2025-10-01T12:00:00Z");
        assert_eq!(ep.category, "preferences");
    }

    #[test]
    fn test_empty_draft_is_rejected() {
        let draft = EpisodeDraft::insight("Title", "   ", "general", Vec::new());
        assert!(matches!(
            draft.into_episode("2025-10-01"),
            Err(CoreError::InvalidEpisode(_))
        ));
    }

    #[test]
    fn test_user_feedback_sections() {
        let draft = EpisodeDraft::user_feedback(
            "UI Preference",
            "Buttons right-aligned on desktop",
            "Updated button layout",
        );
        assert_eq!(draft.category, "user_feedback");
        assert_eq!(draft.sections.len(), 3);
        assert_eq!(draft.entities[1], "UI Preference");
    }
}
