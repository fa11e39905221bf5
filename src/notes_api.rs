//! Typed facade over the ml-notes HTTP API.
//!
//! Each domain operation is exactly one transport call with a well-defined
//! payload; no business logic lives here beyond payload assembly and
//! decoding the `data` payload into typed values.

use crate::client::ApiClient;
use crate::config::ModuleConfig;
use mlnotes_types::{
    ApiResult, AutoTagBatchRequest, AutoTagReport, CreateNoteRequest, Note, SearchRequest,
    ServerStats, TagSuggestions,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_SEARCH_LIMIT: i64 = 5;
pub const DEFAULT_LIST_LIMIT: i64 = 10;

pub struct NotesApi {
    client: ApiClient,
    autotag_timeout: Duration,
}

impl NotesApi {
    pub fn new(config: &ModuleConfig) -> Self {
        Self {
            client: ApiClient::new(&config.base_url, config.timeout()),
            autotag_timeout: config.autotag_timeout(),
        }
    }

    /// Connectivity probe. The payload is informational only.
    pub async fn health_check(&self) -> ApiResult<Value> {
        self.client.get("/health", &[]).await
    }

    /// Search notes by text match, or by semantic similarity when
    /// `use_vector` is set and the server supports it. Ranking is a remote
    /// responsibility.
    pub async fn search_notes(
        &self,
        query: &str,
        limit: i64,
        use_vector: bool,
    ) -> ApiResult<Vec<Note>> {
        let body = SearchRequest {
            query: query.to_string(),
            limit,
            use_vector,
        };
        decode_or_default(self.client.post("/notes/search", &body).await)
    }

    /// Create a note. `tags` is a comma-separated label string; with
    /// `auto_tag` the server additionally computes and merges suggested
    /// tags. Title/content validation is the server's job.
    pub async fn create_note(
        &self,
        title: &str,
        content: &str,
        tags: &str,
        auto_tag: bool,
    ) -> ApiResult<Note> {
        let body = CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.to_string(),
            auto_tag,
        };
        decode(self.client.post("/notes", &body).await)
    }

    pub async fn get_note(&self, id: i64) -> ApiResult<Note> {
        decode(self.client.get(&format!("/notes/{}", id), &[]).await)
    }

    /// List a page of notes in the server's default order; the ordering is
    /// opaque to this module.
    pub async fn list_notes(&self, limit: i64, offset: i64) -> ApiResult<Vec<Note>> {
        let query = [("limit", limit.to_string()), ("offset", offset.to_string())];
        decode_or_default(self.client.get("/notes", &query).await)
    }

    /// Ask for tag suggestions without applying them. Purely advisory.
    pub async fn suggest_tags(&self, note_id: i64) -> ApiResult<TagSuggestions> {
        decode(
            self.client
                .post(&format!("/auto-tag/suggest/{}", note_id), &json!({}))
                .await,
        )
    }

    pub async fn get_stats(&self) -> ApiResult<ServerStats> {
        decode(self.client.get("/stats", &[]).await)
    }

    /// Run one auto-tag batch. Selection-mode resolution lives in
    /// [`crate::autotag`]; this is the single downstream call it delegates
    /// to, with the long timeout.
    pub async fn auto_tag(&self, batch: &AutoTagBatchRequest) -> ApiResult<AutoTagReport> {
        decode(
            self.client
                .post_with_timeout("/auto-tag/apply", batch, self.autotag_timeout)
                .await,
        )
    }
}

/// Decode a successful payload into a typed value. A shape mismatch is
/// reported as a failed result, never a panic.
fn decode<T: DeserializeOwned>(res: ApiResult<Value>) -> ApiResult<T> {
    if !res.success {
        return ApiResult {
            success: false,
            data: None,
            error: res.error,
        };
    }
    match res.data {
        Some(value) => match serde_json::from_value(value) {
            Ok(t) => ApiResult::ok(t),
            Err(e) => ApiResult::err(format!("Unexpected response shape: {}", e)),
        },
        None => ApiResult::err("Response carried no data payload"),
    }
}

/// Like [`decode`], but a missing or `null` payload becomes the default
/// value. The server omits `data` entirely for empty result lists.
fn decode_or_default<T: DeserializeOwned + Default>(res: ApiResult<Value>) -> ApiResult<T> {
    match &res.data {
        None | Some(Value::Null) if res.success => ApiResult::ok(T::default()),
        _ => decode(res),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_maps_payload_into_typed_value() {
        let raw = ApiResult::ok(json!({"id": 3, "title": "T", "content": "c"}));
        let note: ApiResult<Note> = decode(raw);
        assert!(note.success);
        assert_eq!(note.data.unwrap().id, 3);
    }

    #[test]
    fn decode_propagates_remote_error() {
        let raw: ApiResult<Value> = ApiResult::err("note not found");
        let note: ApiResult<Note> = decode(raw);
        assert!(!note.success);
        assert_eq!(note.error_message(), "note not found");
    }

    #[test]
    fn decode_reports_shape_mismatch_as_failure() {
        let raw = ApiResult::ok(json!("not an object"));
        let note: ApiResult<Note> = decode(raw);
        assert!(!note.success);
        assert!(note.error_message().contains("Unexpected response shape"));
    }

    #[test]
    fn empty_corpus_search_decodes_to_empty_list() {
        let missing = ApiResult {
            success: true,
            data: None,
            error: None,
        };
        let notes: ApiResult<Vec<Note>> = decode_or_default(missing);
        assert!(notes.success);
        assert!(notes.data.unwrap().is_empty());

        let null = ApiResult::ok(Value::Null);
        let notes: ApiResult<Vec<Note>> = decode_or_default(null);
        assert!(notes.success);
        assert!(notes.data.unwrap().is_empty());
    }
}
