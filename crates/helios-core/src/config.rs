//! Configuration management for Helios.
//!
//! Loads configuration from ${HELIOS_HOME}/config.toml with sensible defaults.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::Npc;

/// Which backend contract the client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Player created on startup, NPC chat, realtime-driven echo chamber.
    #[default]
    Prism,
    /// Character creation form followed by scene dialogue.
    Scene,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Prism => "prism",
            Variant::Scene => "scene",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prism" => Ok(Variant::Prism),
            "scene" => Ok(Variant::Scene),
            other => anyhow::bail!("Unknown variant '{other}' (expected 'prism' or 'scene')"),
        }
    }
}

/// Backend endpoint paths, relative to `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub create_character: String,
    pub chat: String,
    pub enter_echo_chamber: String,
    pub resolve_echo_chamber: String,
    pub scene_create_character: String,
    pub scene_dialogue: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            create_character: "/api/create_character".to_string(),
            chat: "/api/chat".to_string(),
            enter_echo_chamber: "/api/enter_echo_chamber".to_string(),
            resolve_echo_chamber: "/api/resolve_echo_chamber".to_string(),
            scene_create_character: "/api/v1/characters".to_string(),
            scene_dialogue: "/api/v1/scene/dialogue".to_string(),
        }
    }
}

/// Game backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub endpoints: EndpointsConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BACKEND_URL.to_string(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl BackendConfig {
    /// Joins `base_url` and an endpoint path without doubling slashes.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() {
            return format!("{base}/");
        }
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

/// Realtime (Supabase) push configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RealtimeConfig {
    /// Project URL; empty disables the status subscription.
    pub url: String,
    pub api_key: String,
    pub schema: String,
    pub table: String,
    pub heartbeat_secs: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            schema: "public".to_string(),
            table: "players".to_string(),
            heartbeat_secs: 25,
        }
    }
}

impl RealtimeConfig {
    pub fn is_enabled(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend contract to speak.
    pub variant: Variant,

    /// Display name sent when the prism variant creates a player.
    pub username: String,

    /// Log filter directive (overridden by `HELIOS_LOG`).
    pub log_level: String,

    pub backend: BackendConfig,

    pub realtime: RealtimeConfig,

    /// Conversational partners, in the order they are offered.
    pub npcs: Vec<Npc>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            username: Self::DEFAULT_USERNAME.to_string(),
            log_level: "info".to_string(),
            backend: BackendConfig::default(),
            realtime: RealtimeConfig::default(),
            npcs: default_npcs(),
        }
    }
}

fn default_npcs() -> Vec<Npc> {
    vec![
        Npc {
            id: "a1b2c3d4-e5f6-7890-1234-567890abcdef".to_string(),
            name: "Gaia".to_string(),
        },
        Npc {
            id: "b2c3d4e5-f6a7-8901-2345-67890abcdef0".to_string(),
            name: "Ling Xiao".to_string(),
        },
    ]
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Helios configuration and data directories.
    //!
    //! HELIOS_HOME resolution order:
    //! 1. HELIOS_HOME environment variable (if set)
    //! 2. ~/.config/helios (default)
    //! 3. ./.helios when no home directory can be found

    use std::path::PathBuf;

    /// Returns the Helios home directory.
    pub fn helios_home() -> PathBuf {
        if let Ok(home) = std::env::var("HELIOS_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".helios"),
            |h| h.join(".config").join("helios"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        helios_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        helios_home().join("logs")
    }
}

impl Config {
    const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
    const DEFAULT_USERNAME: &str = "Alex";

    /// Loads configuration from the default config path and applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// - `HELIOS_BACKEND_URL` -> `backend.base_url`
    /// - `SUPABASE_URL` -> `realtime.url`
    /// - `SUPABASE_ANON_KEY` -> `realtime.api_key`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("HELIOS_BACKEND_URL") {
            self.backend.base_url = url.trim().to_string();
        }
        if let Some(url) = non_empty("SUPABASE_URL") {
            self.realtime.url = url.trim().to_string();
        }
        if let Some(key) = non_empty("SUPABASE_ANON_KEY") {
            self.realtime.api_key = key.trim().to_string();
        }
    }

    /// Rejects configs the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.backend.base_url)
            .with_context(|| format!("Invalid backend base URL: {}", self.backend.base_url))?;
        if self.realtime.is_enabled() {
            url::Url::parse(&self.realtime.url)
                .with_context(|| format!("Invalid realtime URL: {}", self.realtime.url))?;
        }
        if self.npcs.is_empty() {
            anyhow::bail!("Config must list at least one entry under [[npcs]]");
        }
        Ok(())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to move {} into place at {}",
                tmp_path.display(),
                path.display()
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.variant, Variant::Prism);
        assert_eq!(config.username, "Alex");
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.npcs.len(), 2);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "variant = \"scene\"\n[backend.endpoints]\nchat = \"/v2/chat\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.variant, Variant::Scene);
        assert_eq!(config.backend.endpoints.chat, "/v2/chat");
        assert_eq!(
            config.backend.endpoints.enter_echo_chamber,
            "/api/enter_echo_chamber"
        );
        assert_eq!(config.realtime.table, "players");
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.variant, defaults.variant);
        assert_eq!(config.username, defaults.username);
        assert_eq!(config.npcs, defaults.npcs);
        assert_eq!(config.realtime.heartbeat_secs, 25);
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("variant = \"prism\""));
        assert!(contents.contains("[[npcs]]"));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("HELIOS_BACKEND_URL", "http://game.local:9000 "),
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", ""),
        ]);
        let mut config = Config::default();
        config.realtime.api_key = "from-file".to_string();

        config.apply_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.backend.base_url, "http://game.local:9000");
        assert_eq!(config.realtime.url, "https://abc.supabase.co");
        assert_eq!(config.realtime.api_key, "from-file");
    }

    #[test]
    fn test_validate_rejects_bad_backend_url() {
        let mut config = Config::default();
        config.backend.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_npcs() {
        let config = Config {
            npcs: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_url_join() {
        let backend = BackendConfig {
            base_url: "http://127.0.0.1:8000/".to_string(),
            ..Default::default()
        };
        assert_eq!(backend.url("/api/chat"), "http://127.0.0.1:8000/api/chat");
        assert_eq!(backend.url("api/chat"), "http://127.0.0.1:8000/api/chat");
        assert_eq!(backend.url(""), "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Scene".parse::<Variant>().unwrap(), Variant::Scene);
        assert!("web".parse::<Variant>().is_err());
    }
}
