//! Connection test for the ml-notes integration.
//!
//! Probes the configured server, reports stats and feature flags, and
//! lists the tools the module exposes to the chat host. Exits non-zero
//! when the server is unreachable.

use mlnotes_module::tools::ToolRegistry;
use mlnotes_module::{ModuleConfig, NotesApi};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ModuleConfig::from_env();
    log::info!("ml-notes server: {}", config.base_url);

    let api = NotesApi::new(&config);

    let health = api.health_check().await;
    if !health.success {
        log::error!("Failed to connect: {}", health.error_message());
        log::error!("Make sure the ml-notes server is running on {}", config.base_url);
        std::process::exit(1);
    }
    log::info!("Connected to ml-notes server successfully");

    let stats = api.get_stats().await;
    if let Some(data) = &stats.data {
        log::info!(
            "Database has {} notes and {} tags",
            data.total_notes,
            data.total_tags
        );
        log::info!(
            "Vector search: {} | Auto-tagging: {}",
            if data.vector_search_enabled { "enabled" } else { "disabled" },
            if data.auto_tagging_enabled { "enabled" } else { "disabled" },
        );
    } else {
        log::warn!("Could not fetch stats: {}", stats.error_message());
    }

    let registry = ToolRegistry::builtin();
    for def in registry.definitions() {
        log::info!("Tool available: {} — {}", def.name, def.description);
    }
}
