use std::env;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const BASE_URL: &str = "ML_NOTES_BASE_URL";
    pub const TIMEOUT_SECS: &str = "ML_NOTES_TIMEOUT_SECS";
    pub const AUTOTAG_TIMEOUT_SECS: &str = "ML_NOTES_AUTOTAG_TIMEOUT_SECS";
}

/// Default values
pub mod defaults {
    pub const BASE_URL: &str = "http://localhost:8080/api/v1";
    pub const TIMEOUT_SECS: u64 = 30;
    /// Auto-tagging runs an AI pass per note, so the batch call gets a
    /// longer budget than ordinary operations.
    pub const AUTOTAG_TIMEOUT_SECS: u64 = 60;
}

#[derive(Clone, Debug)]
pub struct ModuleConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub autotag_timeout_secs: u64,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            timeout_secs: defaults::TIMEOUT_SECS,
            autotag_timeout_secs: defaults::AUTOTAG_TIMEOUT_SECS,
        }
    }
}

impl ModuleConfig {
    pub fn from_env() -> Self {
        let base_url =
            env::var(env_vars::BASE_URL).unwrap_or_else(|_| defaults::BASE_URL.to_string());

        let timeout_secs = env::var(env_vars::TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::TIMEOUT_SECS);

        let autotag_timeout_secs = env::var(env_vars::AUTOTAG_TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::AUTOTAG_TIMEOUT_SECS);

        Self {
            base_url,
            timeout_secs,
            autotag_timeout_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn autotag_timeout(&self) -> Duration {
        Duration::from_secs(self.autotag_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_local_api() {
        let cfg = ModuleConfig::default();
        assert_eq!(cfg.base_url, "http://localhost:8080/api/v1");
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(cfg.autotag_timeout(), Duration::from_secs(60));
    }
}
