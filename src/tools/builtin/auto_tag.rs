//! Auto-Tag Tool — AI tag suggestions over the ml-notes API.
//!
//! Two shapes of invocation: `note_id` asks for suggestions on a single
//! note (always advisory), while `note_ids`/`recent`/`all` run a batch
//! pass that previews by default and commits only with `apply=true`.

use crate::autotag::{self, AutoTagOptions};
use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolGroup, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use mlnotes_types::AutoTagReport;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use super::notes::join_tags;

pub struct AutoTagTool {
    definition: ToolDefinition,
}

impl AutoTagTool {
    pub fn new() -> Self {
        let mut properties = HashMap::new();

        properties.insert(
            "note_id".to_string(),
            PropertySchema {
                schema_type: "integer".to_string(),
                description:
                    "Suggest tags for this single note without applying anything. Mutually \
                     exclusive with the batch parameters below."
                        .to_string(),
                default: None,
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "note_ids".to_string(),
            PropertySchema {
                schema_type: "array".to_string(),
                description: "Explicit note IDs to batch-tag.".to_string(),
                default: None,
                items: Some(Box::new(PropertySchema {
                    schema_type: "integer".to_string(),
                    description: "A note ID.".to_string(),
                    default: None,
                    items: None,
                    enum_values: None,
                })),
                enum_values: None,
            },
        );

        properties.insert(
            "recent".to_string(),
            PropertySchema {
                schema_type: "integer".to_string(),
                description:
                    "Batch-tag the N most recent notes. Takes priority over note_ids."
                        .to_string(),
                default: None,
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "all".to_string(),
            PropertySchema {
                schema_type: "boolean".to_string(),
                description: "Batch-tag every note. Takes priority over recent and note_ids."
                    .to_string(),
                default: Some(json!(false)),
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "apply".to_string(),
            PropertySchema {
                schema_type: "boolean".to_string(),
                description:
                    "Actually store the suggested tags. Default false: preview only, nothing \
                     is mutated."
                        .to_string(),
                default: Some(json!(false)),
                items: None,
                enum_values: None,
            },
        );

        properties.insert(
            "overwrite".to_string(),
            PropertySchema {
                schema_type: "boolean".to_string(),
                description:
                    "When applying, replace existing tags instead of merging (default: merge)."
                        .to_string(),
                default: Some(json!(false)),
                items: None,
                enum_values: None,
            },
        );

        Self {
            definition: ToolDefinition {
                name: "auto_tag".to_string(),
                description:
                    "Use AI to suggest or apply tags for notes on the ml-notes server. Preview \
                     by default; pass apply=true to commit.".to_string(),
                input_schema: ToolInputSchema {
                    schema_type: "object".to_string(),
                    properties,
                    required: vec![],
                },
                group: ToolGroup::Notes,
            },
        }
    }
}

impl Default for AutoTagTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AutoTagParams {
    note_id: Option<i64>,
    note_ids: Option<Vec<i64>>,
    recent: Option<i64>,
    all: Option<bool>,
    apply: Option<bool>,
    overwrite: Option<bool>,
}

/// Whether any batch-selection field carries a value.
fn has_batch_selection(params: &AutoTagParams) -> bool {
    params.all.unwrap_or(false)
        || params.recent.unwrap_or(0) > 0
        || params.note_ids.as_ref().is_some_and(|ids| !ids.is_empty())
}

fn format_report(report: &AutoTagReport, apply: bool) -> String {
    let action = if apply { "Applied" } else { "Suggested" };
    let mut output = format!(
        "🤖 {} AI tags for {} notes:\n\n",
        action, report.processed_count
    );

    for (i, outcome) in report.results.iter().enumerate() {
        if outcome.success {
            output.push_str(&format!(
                "{}. **{}**\n   Suggested: {}\n",
                i + 1,
                outcome.note_title,
                join_tags(&outcome.suggested_tags)
            ));
            if apply {
                let applied = outcome.final_tags.as_deref().unwrap_or(&[]);
                output.push_str(&format!("   Applied: {}\n", join_tags(applied)));
            }
            output.push('\n');
        } else {
            output.push_str(&format!(
                "{}. **{}**: {}\n\n",
                i + 1,
                outcome.note_title,
                outcome.error.as_deref().unwrap_or("Failed")
            ));
        }
    }

    if !apply {
        output.push_str("💡 To actually apply these tags, run again with apply=true");
    }
    output
}

#[async_trait]
impl Tool for AutoTagTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: AutoTagParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        // Single-note suggest path: advisory only. Same shadowing policy
        // as batch selection: the narrower explicit target wins with a
        // warning, never a silent combination.
        if let Some(note_id) = params.note_id {
            if has_batch_selection(&params) || params.apply.unwrap_or(false) {
                log::warn!(
                    "auto-tag: 'note_id' takes the single-note suggest path; ignoring batch parameters"
                );
            }
            let result = context.api.suggest_tags(note_id).await;
            return match (result.success, result.data) {
                (true, Some(suggestions)) => ToolResult::success(format!(
                    "🏷️ Suggested tags for '{}' (ID: {}):\n   Suggested: {}\n   Existing: {}",
                    suggestions.note_title,
                    suggestions.note_id,
                    join_tags(&suggestions.suggested_tags),
                    join_tags(&suggestions.existing_tags)
                ))
                .with_metadata(json!({
                    "note_id": suggestions.note_id,
                    "suggested_count": suggestions.suggested_tags.len(),
                })),
                _ => ToolResult::error(format!(
                    "❌ Failed to suggest tags for note {}: {}",
                    note_id,
                    result.error.as_deref().unwrap_or("unknown error")
                )),
            };
        }

        let apply = params.apply.unwrap_or(false);
        let options = AutoTagOptions {
            note_ids: params.note_ids.unwrap_or_default(),
            recent: params.recent.unwrap_or(0),
            all: params.all.unwrap_or(false),
            apply,
            overwrite: params.overwrite.unwrap_or(false),
        };

        match autotag::auto_tag_notes(&context.api, &options).await {
            // Invalid targeting: nothing was sent to the server.
            Err(e) => ToolResult::error(format!("❌ Auto-tagging failed: {}", e)),
            Ok(result) => match (result.success, result.data) {
                (true, Some(report)) => {
                    let output = format_report(&report, apply);
                    ToolResult::success(output).with_metadata(json!({
                        "processed_count": report.processed_count,
                        "success_count": report.success_count,
                        "applied": apply,
                    }))
                }
                (_, _) => ToolResult::error(format!(
                    "❌ Auto-tagging failed: {}",
                    result.error.as_deref().unwrap_or("unknown error")
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlnotes_types::TagOutcome;

    fn sample_report(apply: bool) -> AutoTagReport {
        AutoTagReport {
            processed_count: 2,
            success_count: 1,
            results: vec![
                TagOutcome {
                    note_id: 1,
                    note_title: "Transformers".to_string(),
                    suggested_tags: vec!["ml".to_string(), "attention".to_string()],
                    final_tags: apply.then(|| vec!["ml".to_string(), "attention".to_string()]),
                    success: true,
                    error: None,
                },
                TagOutcome {
                    note_id: 2,
                    note_title: "Broken".to_string(),
                    suggested_tags: vec![],
                    final_tags: None,
                    success: false,
                    error: Some("model unavailable".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_auto_tag_definition() {
        let tool = AutoTagTool::new();
        let def = tool.definition();

        assert_eq!(def.name, "auto_tag");
        assert!(def.input_schema.required.is_empty());
        assert!(def.input_schema.properties.contains_key("note_ids"));
        assert!(def.input_schema.properties.contains_key("apply"));
        assert!(def.input_schema.properties.contains_key("overwrite"));
    }

    #[test]
    fn single_note_path_detects_shadowed_batch_parameters() {
        let shadowed: AutoTagParams =
            serde_json::from_value(json!({"note_id": 1, "recent": 3})).unwrap();
        assert!(has_batch_selection(&shadowed));

        let alone: AutoTagParams = serde_json::from_value(json!({"note_id": 1})).unwrap();
        assert!(!has_batch_selection(&alone));

        // apply alone is not a selection; an empty id list is not either.
        let no_selection: AutoTagParams =
            serde_json::from_value(json!({"note_id": 1, "apply": true, "note_ids": []})).unwrap();
        assert!(!has_batch_selection(&no_selection));
    }

    #[test]
    fn preview_report_mentions_neither_applied_tags_nor_silence() {
        let output = format_report(&sample_report(false), false);
        assert!(output.starts_with("🤖 Suggested AI tags for 2 notes:"));
        assert!(output.contains("Suggested: ml, attention"));
        assert!(!output.contains("Applied:"));
        assert!(output.contains("apply=true"));
        // Per-note failure is reported, not swallowed.
        assert!(output.contains("model unavailable"));
    }

    #[test]
    fn commit_report_shows_applied_tags_without_hint() {
        let output = format_report(&sample_report(true), true);
        assert!(output.starts_with("🤖 Applied AI tags for 2 notes:"));
        assert!(output.contains("Applied: ml, attention"));
        assert!(!output.contains("apply=true"));
    }
}
