//! Shared wire types for the ml-notes module and its API client.

use serde::{Deserialize, Serialize};

// =====================================================
// Response Envelope
// =====================================================

/// Uniform envelope every ml-notes endpoint responds with.
///
/// Exactly one of `data`/`error` is meaningful, as indicated by `success`.
/// Transport failures are folded into the same shape by the client, so
/// callers branch on `success` without exception handling at every site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }

    /// The error message, or a placeholder when the server omitted one.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown error")
    }
}

// =====================================================
// Request Types
// =====================================================

/// POST /notes/search
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: i64,
    pub use_vector: bool,
}

/// POST /notes
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    /// Comma-separated labels supplied by the caller.
    pub tags: String,
    /// When true the server computes and merges suggested tags on create.
    pub auto_tag: bool,
}

/// POST /auto-tag/apply
///
/// Exactly one of `all`/`recent`/`note_ids` is present per request; absent
/// selection keys are omitted from the JSON payload entirely.
#[derive(Debug, Serialize, Deserialize)]
pub struct AutoTagBatchRequest {
    pub apply: bool,
    pub overwrite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_ids: Option<Vec<i64>>,
}

// =====================================================
// Domain Types
// =====================================================

/// A note as stored by the remote service. Read-only on this side; every
/// read is a fresh round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Per-note outcome inside an auto-tag batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagOutcome {
    pub note_id: i64,
    #[serde(default)]
    pub note_title: String,
    #[serde(default)]
    pub suggested_tags: Vec<String>,
    /// Only present after a commit pass; preview passes leave it unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_tags: Option<Vec<String>>,
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result of POST /auto-tag/apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoTagReport {
    #[serde(default)]
    pub processed_count: usize,
    #[serde(default)]
    pub success_count: usize,
    #[serde(default)]
    pub results: Vec<TagOutcome>,
}

/// Advisory result of POST /auto-tag/suggest/{id}. Nothing is mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSuggestions {
    pub note_id: i64,
    #[serde(default)]
    pub note_title: String,
    #[serde(default)]
    pub suggested_tags: Vec<String>,
    #[serde(default)]
    pub existing_tags: Vec<String>,
}

/// Snapshot of GET /stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStats {
    #[serde(default)]
    pub total_notes: i64,
    #[serde(default)]
    pub total_tags: i64,
    #[serde(default, rename = "vector_search")]
    pub vector_search_enabled: bool,
    #[serde(default, rename = "auto_tagging")]
    pub auto_tagging_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_result_constructors() {
        let ok: ApiResult<i32> = ApiResult::ok(7);
        assert!(ok.success);
        assert_eq!(ok.data, Some(7));
        assert!(ok.error.is_none());

        let err: ApiResult<i32> = ApiResult::err("boom");
        assert!(!err.success);
        assert!(err.data.is_none());
        assert_eq!(err.error_message(), "boom");
    }

    #[test]
    fn batch_request_omits_absent_selection_keys() {
        let req = AutoTagBatchRequest {
            apply: false,
            overwrite: false,
            all: None,
            recent: Some(3),
            note_ids: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("recent"));
        assert!(!obj.contains_key("all"));
        assert!(!obj.contains_key("note_ids"));
    }

    #[test]
    fn note_tolerates_missing_optional_fields() {
        let note: Note =
            serde_json::from_str(r#"{"id": 1, "title": "Test"}"#).unwrap();
        assert_eq!(note.id, 1);
        assert!(note.tags.is_empty());
        assert!(note.created_at.is_empty());
    }

    #[test]
    fn stats_uses_wire_field_names() {
        let stats: ServerStats = serde_json::from_str(
            r#"{"total_notes": 12, "total_tags": 4, "vector_search": true, "auto_tagging": false}"#,
        )
        .unwrap();
        assert_eq!(stats.total_notes, 12);
        assert!(stats.vector_search_enabled);
        assert!(!stats.auto_tagging_enabled);
    }

    #[test]
    fn preview_outcome_has_no_final_tags() {
        let outcome: TagOutcome = serde_json::from_str(
            r#"{"note_id": 5, "note_title": "x", "suggested_tags": ["ml"], "success": true}"#,
        )
        .unwrap();
        assert!(outcome.final_tags.is_none());
        assert_eq!(outcome.suggested_tags, vec!["ml"]);
    }
}
