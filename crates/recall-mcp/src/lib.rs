use std::path::PathBuf;

use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    tool, tool_handler, tool_router, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

use recall_core::model::EpisodeDraft;
use recall_query::{KnowledgeEngine, SearchHit};

const DEFAULT_LIMIT: usize = 5;
const SEARCH_PREVIEW_CHARS: usize = 200;
const RECENT_PREVIEW_CHARS: usize = 300;
const ENTITY_PREVIEW: usize = 3;

/// MCP server exposing the local knowledge base to AI agents.
///
/// Holds the store path rather than a loaded engine so every request sees the
/// latest file content, including writes made by the CLI.
#[derive(Debug, Clone)]
pub struct RecallMcpServer {
    store_path: PathBuf,
    tool_router: ToolRouter<Self>,
}

impl RecallMcpServer {
    pub fn new(store_path: PathBuf) -> Self {
        Self {
            store_path,
            tool_router: Self::tool_router(),
        }
    }

    fn open_engine(&self) -> Result<KnowledgeEngine, String> {
        KnowledgeEngine::open(&self.store_path)
            .map_err(|e| format!("Failed to open knowledge base: {e}"))
    }
}

// -- Tool parameter structs --

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search query about the project
    pub query: String,
    /// Maximum number of results (default: 5)
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddParams {
    /// Knowledge content to add
    pub content: String,
    /// Entities/topics this knowledge relates to
    pub entities: Vec<String>,
    /// Short title (default: first line of the content)
    pub title: Option<String>,
    /// Category tag (default: "general")
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShowParams {
    /// Episode id, id prefix, or 1-based position
    pub selector: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct OverviewParams {
    /// Aspect to focus on: all, preferences, bugs, business_logic, technical, or free text
    pub aspect: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RecentParams {
    /// Number of recent changes to retrieve (default: 5)
    pub limit: Option<usize>,
}

// -- Tool implementations --

#[tool_router]
impl RecallMcpServer {
    #[tool(
        description = "Search the project knowledge base by keywords. Results are ranked by relevance."
    )]
    fn knowledge_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<String, String> {
        if params.query.trim().is_empty() {
            return Err("Query must not be empty".to_string());
        }
        let engine = self.open_engine()?;
        let hits = engine.search(&params.query, params.limit.unwrap_or(DEFAULT_LIMIT));
        if hits.is_empty() {
            return Ok("No relevant information found.".to_string());
        }

        let mut out = format!("Found {} relevant result(s):\n\n", hits.len());
        for (i, hit) in hits.iter().enumerate() {
            let ep = hit.episode;
            out.push_str(&format!(
                "{}. {} [{}] (score: {})\n   {}\n",
                i + 1,
                ep.title,
                ep.category,
                hit.score,
                preview(&ep.content, SEARCH_PREVIEW_CHARS)
            ));
            if !ep.entities.is_empty() {
                let shown: Vec<&str> = ep
                    .entities
                    .iter()
                    .take(ENTITY_PREVIEW)
                    .map(String::as_str)
                    .collect();
                out.push_str(&format!("   Entities: {}\n", shown.join(", ")));
            }
            out.push('\n');
        }
        Ok(out)
    }

    #[tool(description = "Add new knowledge about the project as an episode.")]
    fn knowledge_add(&self, Parameters(params): Parameters<AddParams>) -> Result<String, String> {
        let title = params
            .title
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                params
                    .content
                    .lines()
                    .map(str::trim)
                    .find(|l| !l.is_empty())
                    .map(|l| preview(l, 80))
            })
            .ok_or_else(|| "Content must not be empty".to_string())?;
        let category = params
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "general".to_string());

        let mut engine = self.open_engine()?;
        let draft = EpisodeDraft::insight(title, params.content, category, params.entities);
        let episode = engine
            .add(draft)
            .map_err(|e| format!("Failed to add knowledge: {e}"))?;
        Ok(format!(
            "Knowledge successfully added to the base as '{}' ({}).",
            episode.title, episode.id
        ))
    }

    #[tool(
        description = "Show the full content of one episode by id, id prefix, or 1-based position."
    )]
    fn knowledge_show(&self, Parameters(params): Parameters<ShowParams>) -> Result<String, String> {
        let engine = self.open_engine()?;
        let ep = engine
            .show(&params.selector)
            .map_err(|e| format!("Failed to resolve '{}': {e}", params.selector))?;

        let mut out = String::new();
        out.push_str(&format!("Episode: {}\n", ep.title));
        out.push_str(&format!("Id: {}\n", ep.id));
        out.push_str(&format!("Category: {}\n", ep.category));
        out.push_str(&format!("Created: {}\n", ep.created_date()));
        if !ep.entities.is_empty() {
            out.push_str(&format!("Entities: {}\n", ep.entities.join(", ")));
        }
        out.push('\n');
        out.push_str(ep.content.trim());
        out.push('\n');
        Ok(out)
    }

    #[tool(description = "List knowledge categories with the titles of their episodes.")]
    fn knowledge_categories(&self) -> Result<String, String> {
        let engine = self.open_engine()?;
        let groups = engine.categories();
        if groups.is_empty() {
            return Ok("Knowledge base is empty.".to_string());
        }
        let mut out = String::new();
        for group in &groups {
            out.push_str(&format!(
                "{}: {} episode(s)\n",
                group.category,
                group.titles.len()
            ));
            for title in &group.titles {
                out.push_str(&format!("  - {title}\n"));
            }
        }
        Ok(out)
    }

    #[tool(
        description = "Get an overview of the project. Aspects: all, preferences, bugs, business_logic, technical."
    )]
    fn project_overview(
        &self,
        Parameters(params): Parameters<OverviewParams>,
    ) -> Result<String, String> {
        let aspect = params.aspect.unwrap_or_else(|| "all".to_string());
        let engine = self.open_engine()?;
        let hits = engine.overview(&aspect);
        if hits.is_empty() {
            return Ok("No information found for the requested aspect.".to_string());
        }
        let mut out = format!("Project Overview - {}:\n\n", aspect.to_uppercase());
        push_full(&mut out, &hits);
        Ok(out)
    }

    #[tool(description = "Get user preferences and guidelines for the project.")]
    fn user_preferences(&self) -> Result<String, String> {
        let engine = self.open_engine()?;
        let hits = engine.preferences();
        if hits.is_empty() {
            return Ok("No user preferences found in knowledge base.".to_string());
        }
        let mut out = "User Preferences and Guidelines:\n\n".to_string();
        push_full(&mut out, &hits);
        Ok(out)
    }

    #[tool(description = "Get information about recent bug fixes and changes.")]
    fn recent_changes(
        &self,
        Parameters(params): Parameters<RecentParams>,
    ) -> Result<String, String> {
        let engine = self.open_engine()?;
        let hits = engine.recent_changes(params.limit.unwrap_or(DEFAULT_LIMIT));
        if hits.is_empty() {
            return Ok("No recent changes found in knowledge base.".to_string());
        }
        let mut out = "Recent Changes and Bug Fixes:\n\n".to_string();
        for (i, hit) in hits.iter().enumerate() {
            out.push_str(&format!(
                "{}. {}\n{}\n\n",
                i + 1,
                hit.episode.title,
                preview(&hit.episode.content, RECENT_PREVIEW_CHARS)
            ));
        }
        Ok(out)
    }
}

#[tool_handler]
impl ServerHandler for RecallMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Recall MCP Server - Query the project knowledge base. \
                 Search episodes, read them in full, and record new knowledge."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn push_full(out: &mut String, hits: &[SearchHit<'_>]) {
    for hit in hits {
        out.push_str(&format!(
            "\u{2022} {}\n{}\n\n",
            hit.episode.title,
            hit.episode.content.trim()
        ));
    }
}

/// First `max` characters of `text`, with an ellipsis when cut.
fn preview(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{}...", head.trim_end())
}

/// Start the MCP server on stdio transport.
pub async fn run_stdio(store_path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::transport::stdio;
    use rmcp::ServiceExt;

    tracing::info!(path = %store_path.display(), "starting MCP server on stdio");
    let server = RecallMcpServer::new(store_path);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn server(tmp: &TempDir) -> RecallMcpServer {
        RecallMcpServer::new(tmp.path().join("kb.json"))
    }

    #[test]
    fn test_preview_truncates_on_chars() {
        assert_eq!(preview("  short  ", 10), "short");
        assert_eq!(preview("abcdefghij", 4), "abcd...");
        assert_eq!(preview("ééééé", 2), "éé...");
    }

    #[test]
    fn test_search_tool() {
        let tmp = TempDir::new().unwrap();
        let out = server(&tmp)
            .knowledge_search(Parameters(SearchParams {
                query: "month selection".into(),
                limit: Some(1),
            }))
            .unwrap();
        assert!(out.starts_with("Found 1 relevant result(s)"));
        assert!(out.contains("Month Selection Logic Bug Fix"));
        assert!(
            out.contains("Entities: Bug Fix, Month Selection Logic, getAppropriateScheduleId\n")
        );
    }

    #[test]
    fn test_search_tool_rejects_blank_query() {
        let tmp = TempDir::new().unwrap();
        let err = server(&tmp)
            .knowledge_search(Parameters(SearchParams {
                query: "  ".into(),
                limit: None,
            }))
            .unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn test_add_then_show() {
        let tmp = TempDir::new().unwrap();
        let srv = server(&tmp);
        let out = srv
            .knowledge_add(Parameters(AddParams {
                content: "\nAgendas export to TSV for spreadsheets\nMore detail".into(),
                entities: vec!["Agenda".into()],
                title: None,
                category: None,
            }))
            .unwrap();
        assert!(out.contains("Agendas export to TSV for spreadsheets"));

        let shown = srv
            .knowledge_show(Parameters(ShowParams {
                selector: "7".into(),
            }))
            .unwrap();
        assert!(shown.contains("Category: general"));
        assert!(shown.contains("Entities: Agenda"));
    }

    #[test]
    fn test_show_missing_is_error_not_panic() {
        let tmp = TempDir::new().unwrap();
        let err = server(&tmp)
            .knowledge_show(Parameters(ShowParams {
                selector: "42".into(),
            }))
            .unwrap_err();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_overview_and_preferences() {
        let tmp = TempDir::new().unwrap();
        let srv = server(&tmp);
        let out = srv
            .project_overview(Parameters(OverviewParams {
                aspect: Some("bugs".into()),
            }))
            .unwrap();
        assert!(out.starts_with("Project Overview - BUGS:"));

        let prefs = srv.user_preferences().unwrap();
        assert!(prefs.contains("User Preferences and Guidelines"));

        let cats = srv.knowledge_categories().unwrap();
        assert!(cats.starts_with("architecture: 2 episode(s)"));
    }
}
