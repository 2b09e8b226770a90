use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use recall_core::model::EpisodeDraft;
use recall_core::RecallConfig;

use crate::output::format::format_episode_full;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct AddArgs {
    #[command(subcommand)]
    pub kind: AddKind,
}

#[derive(Subcommand)]
pub enum AddKind {
    /// A free-form insight
    Insight {
        /// Short title
        #[arg(long)]
        title: String,
        /// Episode body
        #[arg(long)]
        content: String,
        /// Category tag
        #[arg(long, default_value = "general")]
        category: String,
        /// Related topic (repeatable)
        #[arg(short, long = "entity")]
        entities: Vec<String>,
    },
    /// A bug and how it was fixed
    BugFix {
        /// What was wrong
        #[arg(long)]
        description: String,
        /// What was changed
        #[arg(long)]
        solution: String,
        /// File touched by the fix (repeatable)
        #[arg(long = "file")]
        files: Vec<String>,
        /// How the fix was verified
        #[arg(long)]
        testing_notes: Option<String>,
    },
    /// A newly implemented feature
    Feature {
        /// Feature name
        #[arg(long)]
        name: String,
        /// What the feature does
        #[arg(long)]
        description: String,
        /// How it was built
        #[arg(long)]
        implementation: String,
        /// File created (repeatable)
        #[arg(long = "created")]
        files_created: Vec<String>,
        /// File modified (repeatable)
        #[arg(long = "modified")]
        files_modified: Vec<String>,
    },
    /// User feedback and the action taken
    Feedback {
        /// Kind of feedback, e.g. "UI Preference"
        #[arg(long)]
        kind: String,
        /// What the user said
        #[arg(long)]
        content: String,
        /// What was done about it
        #[arg(long)]
        action: String,
    },
    /// An architecture decision and its rationale
    Decision {
        /// The decision taken
        #[arg(long)]
        decision: String,
        /// Why
        #[arg(long)]
        rationale: String,
        /// Alternative considered (repeatable)
        #[arg(long = "alternative")]
        alternatives: Vec<String>,
        /// Expected impact
        #[arg(long)]
        impact: String,
    },
}

impl AddKind {
    fn to_draft(&self) -> EpisodeDraft {
        match self {
            AddKind::Insight {
                title,
                content,
                category,
                entities,
            } => EpisodeDraft::insight(
                title.as_str(),
                content.as_str(),
                category.as_str(),
                entities.clone(),
            ),
            AddKind::BugFix {
                description,
                solution,
                files,
                testing_notes,
            } => EpisodeDraft::bug_fix(description, solution, files, testing_notes.as_deref()),
            AddKind::Feature {
                name,
                description,
                implementation,
                files_created,
                files_modified,
            } => EpisodeDraft::feature(
                name,
                description,
                implementation,
                files_created,
                files_modified,
            ),
            AddKind::Feedback {
                kind,
                content,
                action,
            } => EpisodeDraft::user_feedback(kind, content, action),
            AddKind::Decision {
                decision,
                rationale,
                alternatives,
                impact,
            } => EpisodeDraft::architecture_decision(decision, rationale, alternatives, impact),
        }
    }
}

pub fn run(args: &AddArgs, config: &RecallConfig, format: OutputFormat) -> Result<()> {
    let mut engine = super::open_engine(config)?;
    let episode = engine
        .add(args.kind.to_draft())
        .context("Failed to add episode")?;

    match format {
        OutputFormat::Json => println!("{}", format_episode_full(episode, format)),
        OutputFormat::Text => println!("Added episode {}: {}", episode.id, episode.title),
    }
    Ok(())
}
