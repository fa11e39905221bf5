//! Notes Tool — remote note management over the ml-notes API.
//!
//! Single tool with `action` parameter: create, search, get, list, stats,
//! health. Every action is one facade call; output is a formatted summary
//! for a conversational surface, never raw JSON.

use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolGroup, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use mlnotes_types::Note;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

const SEARCH_PREVIEW_CHARS: usize = 150;
const LIST_PREVIEW_CHARS: usize = 100;

pub struct NotesTool {
    definition: ToolDefinition,
}

impl NotesTool {
    pub fn new() -> Self {
        let mut properties = HashMap::new();

        properties.insert(
            "action".to_string(),
            PropertySchema {
                schema_type: "string".to_string(),
                description: "Action to perform on notes.".to_string(),
                default: None,
                items: None,
                enum_values: Some(vec![
                    "create".to_string(),
                    "search".to_string(),
                    "get".to_string(),
                    "list".to_string(),
                    "stats".to_string(),
                    "health".to_string(),
                ]),
            },
        );

        properties.insert(
            "title".to_string(),
            PropertySchema {
                schema_type: "string".to_string(),
                description: "Note title (required for create).".to_string(),
                default: None,
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "content".to_string(),
            PropertySchema {
                schema_type: "string".to_string(),
                description: "Note body content (required for create).".to_string(),
                default: None,
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "tags".to_string(),
            PropertySchema {
                schema_type: "string".to_string(),
                description:
                    "Comma-separated tags for create. E.g. 'ml, embeddings'. The server merges \
                     AI-suggested tags on top unless auto_tag is false."
                        .to_string(),
                default: None,
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "auto_tag".to_string(),
            PropertySchema {
                schema_type: "boolean".to_string(),
                description: "Let the server auto-tag the new note (create only).".to_string(),
                default: Some(json!(true)),
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "query".to_string(),
            PropertySchema {
                schema_type: "string".to_string(),
                description: "Search query (required for search).".to_string(),
                default: None,
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "use_vector".to_string(),
            PropertySchema {
                schema_type: "boolean".to_string(),
                description:
                    "Semantic similarity ranking instead of literal text matching (search only)."
                        .to_string(),
                default: Some(json!(true)),
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "id".to_string(),
            PropertySchema {
                schema_type: "integer".to_string(),
                description: "Note ID (required for get).".to_string(),
                default: None,
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "limit".to_string(),
            PropertySchema {
                schema_type: "integer".to_string(),
                description: "Max results for search (default: 5) / list (default: 10)."
                    .to_string(),
                default: None,
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "offset".to_string(),
            PropertySchema {
                schema_type: "integer".to_string(),
                description: "Pagination offset for list (default: 0).".to_string(),
                default: Some(json!(0)),
                items: None,
                enum_values: None,
            },
        );

        Self {
            definition: ToolDefinition {
                name: "notes".to_string(),
                description:
                    "Create, search, and browse notes stored on the ml-notes server. Search \
                     uses AI-powered vector similarity when the server supports it."
                        .to_string(),
                input_schema: ToolInputSchema {
                    schema_type: "object".to_string(),
                    properties,
                    required: vec!["action".to_string()],
                },
                group: ToolGroup::Notes,
            },
        }
    }
}

impl Default for NotesTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotesParams {
    action: String,
    title: Option<String>,
    content: Option<String>,
    tags: Option<String>,
    auto_tag: Option<bool>,
    query: Option<String>,
    use_vector: Option<bool>,
    id: Option<i64>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Truncate to a character budget, appending an ellipsis when cut.
pub(crate) fn preview(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let cut: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", cut)
    } else {
        cut
    }
}

pub(crate) fn join_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "none".to_string()
    } else {
        tags.join(", ")
    }
}

/// The server sends RFC 3339 timestamps; the date part is enough for chat.
fn created_date(note: &Note) -> &str {
    let ts = note.created_at.as_str();
    ts.get(..10).unwrap_or(ts)
}

#[async_trait]
impl Tool for NotesTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: NotesParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        match params.action.as_str() {
            "create" => {
                let title = match &params.title {
                    Some(t) if !t.trim().is_empty() => t.trim(),
                    _ => return ToolResult::error("Title is required for create action."),
                };
                let content = params.content.as_deref().unwrap_or("");
                let tags = params.tags.as_deref().unwrap_or("");
                let auto_tag = params.auto_tag.unwrap_or(true);

                let result = context.api.create_note(title, content, tags, auto_tag).await;
                match (result.success, result.data) {
                    (true, Some(note)) => ToolResult::success(format!(
                        "✅ Created note '{}' (ID: {})\nTags: {}",
                        note.title,
                        note.id,
                        join_tags(&note.tags)
                    ))
                    .with_metadata(json!({
                        "action": "create",
                        "note_id": note.id,
                    })),
                    _ => ToolResult::error(format!(
                        "❌ Failed to create note: {}",
                        result.error.as_deref().unwrap_or("unknown error")
                    )),
                }
            }

            "search" => {
                let query = match &params.query {
                    Some(q) if !q.trim().is_empty() => q.trim().to_string(),
                    _ => return ToolResult::error("Query is required for search action."),
                };
                let limit = params
                    .limit
                    .unwrap_or(crate::notes_api::DEFAULT_SEARCH_LIMIT)
                    .clamp(1, 50);
                let use_vector = params.use_vector.unwrap_or(true);

                let result = context.api.search_notes(&query, limit, use_vector).await;
                match (result.success, result.data) {
                    (true, Some(notes)) if notes.is_empty() => ToolResult::success(format!(
                        "No notes found matching '{}'",
                        query
                    )),
                    (true, Some(notes)) => {
                        let mut output =
                            format!("Found {} notes matching '{}':\n\n", notes.len(), query);
                        for (i, note) in notes.iter().enumerate() {
                            output.push_str(&format!(
                                "{}. **{}** (ID: {})\n   Tags: {}\n   {}\n\n",
                                i + 1,
                                note.title,
                                note.id,
                                join_tags(&note.tags),
                                preview(&note.content, SEARCH_PREVIEW_CHARS)
                            ));
                        }
                        ToolResult::success(output).with_metadata(json!({
                            "action": "search",
                            "query": query,
                            "result_count": notes.len(),
                        }))
                    }
                    (_, _) => ToolResult::error(format!(
                        "❌ Search failed: {}",
                        result.error.as_deref().unwrap_or("unknown error")
                    )),
                }
            }

            "get" => {
                let id = match params.id {
                    Some(id) => id,
                    None => return ToolResult::error("Id is required for get action."),
                };

                let result = context.api.get_note(id).await;
                match (result.success, result.data) {
                    (true, Some(note)) => ToolResult::success(format!(
                        "**{}** (ID: {})\nTags: {}\nCreated: {}\n\n{}",
                        note.title,
                        note.id,
                        join_tags(&note.tags),
                        created_date(&note),
                        note.content
                    ))
                    .with_metadata(json!({
                        "action": "get",
                        "note_id": note.id,
                    })),
                    _ => ToolResult::error(format!(
                        "❌ Failed to get note {}: {}",
                        id,
                        result.error.as_deref().unwrap_or("unknown error")
                    )),
                }
            }

            "list" => {
                let limit = params
                    .limit
                    .unwrap_or(crate::notes_api::DEFAULT_LIST_LIMIT)
                    .clamp(1, 100);
                let offset = params.offset.unwrap_or(0).max(0);

                let result = context.api.list_notes(limit, offset).await;
                match (result.success, result.data) {
                    (true, Some(notes)) if notes.is_empty() => {
                        ToolResult::success("No notes found")
                    }
                    (true, Some(notes)) => {
                        let mut output =
                            format!("📝 Your {} most recent notes:\n\n", notes.len());
                        for (i, note) in notes.iter().enumerate() {
                            output.push_str(&format!(
                                "{}. **{}** (ID: {})\n   Tags: {}\n   Created: {}\n   {}\n\n",
                                i + 1,
                                note.title,
                                note.id,
                                join_tags(&note.tags),
                                created_date(note),
                                preview(&note.content, LIST_PREVIEW_CHARS)
                            ));
                        }
                        ToolResult::success(output).with_metadata(json!({
                            "action": "list",
                            "shown": notes.len(),
                        }))
                    }
                    (_, _) => ToolResult::error(format!(
                        "❌ Failed to list notes: {}",
                        result.error.as_deref().unwrap_or("unknown error")
                    )),
                }
            }

            "stats" => {
                let result = context.api.get_stats().await;
                match (result.success, result.data) {
                    (true, Some(stats)) => ToolResult::success(format!(
                        "📊 Database has {} notes and {} tags\n🔍 Vector search: {}\n🤖 Auto-tagging: {}",
                        stats.total_notes,
                        stats.total_tags,
                        if stats.vector_search_enabled { "enabled" } else { "disabled" },
                        if stats.auto_tagging_enabled { "enabled" } else { "disabled" },
                    ))
                    .with_metadata(json!({
                        "action": "stats",
                        "total_notes": stats.total_notes,
                        "total_tags": stats.total_tags,
                    })),
                    _ => ToolResult::error(format!(
                        "❌ Failed to get stats: {}",
                        result.error.as_deref().unwrap_or("unknown error")
                    )),
                }
            }

            "health" => {
                let result = context.api.health_check().await;
                if result.success {
                    ToolResult::success("✅ Connected to ml-notes server successfully!")
                } else {
                    ToolResult::error(format!(
                        "❌ Failed to connect: {}",
                        result.error.as_deref().unwrap_or("unknown error")
                    ))
                }
            }

            other => ToolResult::error(format!(
                "Unknown action: '{}'. Valid actions: create, search, get, list, stats, health",
                other
            )),
        }
    }
}
