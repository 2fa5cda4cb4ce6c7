//! Configuration system for pyjs.
//!
//! Loads config from:
//! 1. Global: ~/.config/pyjs/config.toml
//! 2. Per-project: .pyjs/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [translate]
//! indent_width = 4
//!
//! [serve]
//! host = "127.0.0.1"
//! port = 5000
//! ```

use pyjs_translate::TranslateOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Translation configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TranslateConfig {
    /// Spaces per nesting level in generated JavaScript.
    pub indent_width: Option<usize>,
}

/// HTTP service configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ServeConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PyjsConfig {
    pub translate: TranslateConfig,
    pub serve: ServeConfig,
}

impl PyjsConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/pyjs/config.toml,
    /// then merges with per-project config from .pyjs/config.toml.
    pub fn load(root: &Path) -> Self {
        Self::load_from(Self::global_config_path().as_deref(), root)
    }

    /// Load with an explicit global config path.
    pub fn load_from(global_path: Option<&Path>, root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = global_path.and_then(Self::load_file) {
            config = config.merge(global);
        }

        let project_path = root.join(".pyjs").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    pub fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("pyjs").join("config.toml"))
    }

    /// Load config from a file path. Missing files are skipped silently,
    /// malformed ones with a warning.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config file");
                None
            }
        }
    }

    /// Merge another config into this one. Fields set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            translate: TranslateConfig {
                indent_width: other.translate.indent_width.or(self.translate.indent_width),
            },
            serve: ServeConfig {
                host: other.serve.host.or(self.serve.host),
                port: other.serve.port.or(self.serve.port),
            },
        }
    }

    pub fn translate_options(&self) -> TranslateOptions {
        let mut options = TranslateOptions::default();
        if let Some(width) = self.translate.indent_width {
            options.indent_width = width;
        }
        options
    }

    pub fn host(&self) -> &str {
        self.serve.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.serve.port.unwrap_or(DEFAULT_PORT)
    }
}
