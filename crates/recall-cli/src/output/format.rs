use recall_core::model::{Episode, KnowledgeBase};
use recall_query::{CategoryGroup, SearchHit};

use super::OutputFormat;

const ENTITIES_FIRST_LINE: usize = 5;
const SEARCH_PREVIEW_CHARS: usize = 150;
const RULE_WIDTH: usize = 80;

pub fn format_episode_full(episode: &Episode, fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(episode).unwrap_or_default(),
        OutputFormat::Text => format_episode_full_text(episode),
    }
}

fn format_episode_full_text(ep: &Episode) -> String {
    let mut out = String::new();
    out.push_str(&format!("\u{25c6} {}\n", ep.title));
    out.push_str(&format!("   Id:       {}\n", ep.id));
    out.push_str(&format!("   Category: {}\n", ep.category));

    let (first, rest) = ep
        .entities
        .split_at(ENTITIES_FIRST_LINE.min(ep.entities.len()));
    out.push_str(&format!("   Entities: {}\n", first.join(", ")));
    if !rest.is_empty() {
        out.push_str(&format!("             {}\n", rest.join(", ")));
    }
    out.push_str(&format!("   Created:  {}\n", ep.created_date()));

    out.push('\n');
    out.push_str(ep.content.trim());
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

pub fn format_episode_list(episodes: &[&Episode], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(episodes).unwrap_or_default(),
        OutputFormat::Text => {
            if episodes.is_empty() {
                return "No episodes found.\n".to_string();
            }
            episodes
                .iter()
                .map(|ep| format_episode_full_text(ep))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

pub fn format_hits(
    hits: &[SearchHit<'_>],
    query: &str,
    max_score: u32,
    fmt: OutputFormat,
) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(hits).unwrap_or_default(),
        OutputFormat::Text => {
            let mut out = format!("Found {} result(s) for '{query}':\n", hits.len());
            for (i, hit) in hits.iter().enumerate() {
                let ep = hit.episode;
                out.push_str(&format!("\n{}. {}\n", i + 1, ep.title));
                out.push_str(&format!("   Id:        {}\n", ep.id));
                out.push_str(&format!("   Category:  {}\n", ep.category));
                out.push_str(&format!("   Relevance: {}/{max_score}\n", hit.score));
                out.push_str(&format!(
                    "   Preview:   {}\n",
                    preview(&ep.content, SEARCH_PREVIEW_CHARS)
                ));
            }
            out
        }
    }
}

pub fn format_summary(kb: &KnowledgeBase, groups: &[CategoryGroup], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "total_episodes": kb.len(),
                "created": kb.metadata.created,
                "description": kb.metadata.description,
                "categories": groups,
            });
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        }
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("{}\n", kb.metadata.description));
            out.push_str(&"=".repeat(60));
            out.push('\n');
            out.push_str(&format!("Total episodes: {}\n", kb.len()));
            out.push_str(&format!(
                "Created:        {}\n",
                kb.metadata.created.get(..10).unwrap_or(&kb.metadata.created)
            ));
            out.push('\n');
            out.push_str("Categories:\n");
            out.push_str(&format_category_groups_text(groups));
            out
        }
    }
}

pub fn format_categories(groups: &[CategoryGroup], fmt: OutputFormat) -> String {
    match fmt {
        OutputFormat::Json => serde_json::to_string_pretty(groups).unwrap_or_default(),
        OutputFormat::Text => format_category_groups_text(groups),
    }
}

fn format_category_groups_text(groups: &[CategoryGroup]) -> String {
    if groups.is_empty() {
        return "  (none)\n".to_string();
    }
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            "  {}: {} episode(s)\n",
            group.category,
            group.titles.len()
        ));
        for title in &group.titles {
            out.push_str(&format!("      \u{2022} {title}\n"));
        }
    }
    out
}

/// First `max` characters of the trimmed text, with an ellipsis when cut.
/// Line breaks are flattened so previews stay on one line.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let head: String = flat.chars().take(max).collect();
    format!("{}...", head.trim_end())
}
