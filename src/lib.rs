//! Chat-agent integration module for the ml-notes server.
//!
//! Layers, bottom up: [`client::ApiClient`] performs one HTTP call per
//! invocation and folds every failure mode into the service's
//! success/data/error envelope; [`notes_api::NotesApi`] exposes the domain
//! operations as typed calls; [`autotag`] resolves which notes a tagging
//! request targets and forwards one batch call; [`tools`] is the
//! host-facing function surface that renders results for a chat
//! conversation.

pub mod autotag;
pub mod client;
pub mod config;
pub mod notes_api;
pub mod tools;

pub use autotag::{auto_tag_notes, AutoTagOptions, Selection, SelectionError};
pub use client::ApiClient;
pub use config::ModuleConfig;
pub use notes_api::NotesApi;
