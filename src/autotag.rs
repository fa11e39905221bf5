//! Auto-tag orchestration: resolve which notes a tagging request targets,
//! then delegate one batch call to the facade.
//!
//! Selection modes are strictly prioritized: `all` dominates `recent`
//! dominates explicit IDs (broadest scope wins). Lower-priority fields
//! supplied alongside a higher-priority mode are ignored with a warning,
//! never combined.

use crate::notes_api::NotesApi;
use mlnotes_types::{ApiResult, AutoTagBatchRequest, AutoTagReport};
use thiserror::Error;

/// Invalid auto-tag targeting, detected before any network call. Distinct
/// from a remote-origin failure: when this is returned, zero requests were
/// made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("must specify notes to tag")]
    NoTargets,
}

/// The resolved target set for one auto-tag request. Constructed once per
/// request, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Recent(i64),
    ByIds(Vec<i64>),
}

impl Selection {
    /// Resolve raw request fields into exactly one selection mode.
    pub fn resolve(all: bool, recent: i64, note_ids: &[i64]) -> Result<Self, SelectionError> {
        if all {
            if recent > 0 || !note_ids.is_empty() {
                log::warn!(
                    "auto-tag: 'all' takes priority; ignoring recent={} and {} explicit id(s)",
                    recent,
                    note_ids.len()
                );
            }
            return Ok(Selection::All);
        }
        if recent > 0 {
            if !note_ids.is_empty() {
                log::warn!(
                    "auto-tag: 'recent' takes priority; ignoring {} explicit id(s)",
                    note_ids.len()
                );
            }
            return Ok(Selection::Recent(recent));
        }
        if !note_ids.is_empty() {
            return Ok(Selection::ByIds(note_ids.to_vec()));
        }
        Err(SelectionError::NoTargets)
    }

    /// Shape the batch payload. Exactly one selection key is present.
    pub fn into_request(self, apply: bool, overwrite: bool) -> AutoTagBatchRequest {
        let mut req = AutoTagBatchRequest {
            apply,
            overwrite,
            all: None,
            recent: None,
            note_ids: None,
        };
        match self {
            Selection::All => req.all = Some(true),
            Selection::Recent(count) => req.recent = Some(count),
            Selection::ByIds(ids) => req.note_ids = Some(ids),
        }
        req
    }
}

/// Caller-facing knobs for one auto-tag request.
#[derive(Debug, Clone, Default)]
pub struct AutoTagOptions {
    pub note_ids: Vec<i64>,
    pub recent: i64,
    pub all: bool,
    /// false = preview (suggestions only, nothing mutated remotely);
    /// true = commit the suggested tags.
    pub apply: bool,
    /// Commit-mode flag: replace existing tags instead of merging. The
    /// merge itself is a remote decision; this is forwarded verbatim.
    pub overwrite: bool,
}

/// Resolve the target set and make exactly one downstream batch call.
/// Per-note failures inside the batch never abort it; the report carries
/// one independent outcome per note.
pub async fn auto_tag_notes(
    api: &NotesApi,
    options: &AutoTagOptions,
) -> Result<ApiResult<AutoTagReport>, SelectionError> {
    let selection = Selection::resolve(options.all, options.recent, &options.note_ids)?;
    let batch = selection.into_request(options.apply, options.overwrite);
    Ok(api.auto_tag(&batch).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_dominates_every_other_mode() {
        let sel = Selection::resolve(true, 5, &[1, 2]).unwrap();
        assert_eq!(sel, Selection::All);
    }

    #[test]
    fn recent_dominates_explicit_ids() {
        let sel = Selection::resolve(false, 3, &[1, 2]).unwrap();
        assert_eq!(sel, Selection::Recent(3));
    }

    #[test]
    fn explicit_ids_used_when_nothing_broader_set() {
        let sel = Selection::resolve(false, 0, &[4, 8]).unwrap();
        assert_eq!(sel, Selection::ByIds(vec![4, 8]));
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = Selection::resolve(false, 0, &[]).unwrap_err();
        assert_eq!(err, SelectionError::NoTargets);
        assert_eq!(err.to_string(), "must specify notes to tag");
    }

    #[test]
    fn negative_recent_does_not_count_as_a_mode() {
        assert_eq!(
            Selection::resolve(false, -1, &[]),
            Err(SelectionError::NoTargets)
        );
    }

    #[test]
    fn request_payload_carries_exactly_one_selection_key() {
        for (sel, key) in [
            (Selection::All, "all"),
            (Selection::Recent(3), "recent"),
            (Selection::ByIds(vec![1]), "note_ids"),
        ] {
            let json = serde_json::to_value(sel.into_request(false, false)).unwrap();
            let obj = json.as_object().unwrap();
            let selection_keys: Vec<&str> = ["all", "recent", "note_ids"]
                .into_iter()
                .filter(|k| obj.contains_key(*k))
                .collect();
            assert_eq!(selection_keys, vec![key]);
        }
    }

    #[test]
    fn preview_and_overwrite_flags_are_forwarded() {
        let req = Selection::Recent(3).into_request(true, true);
        assert!(req.apply);
        assert!(req.overwrite);
        assert_eq!(req.recent, Some(3));
    }
}
