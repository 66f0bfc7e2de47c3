use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::view::ViewType;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Defaults applied to every list unless its own config overrides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Records requested per fetch (default: 50).
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Hold the first data fetch until the object schema has loaded
    /// (default: true).
    #[serde(default = "default_require_schema")]
    pub require_schema: bool,
    /// Remember the last chosen view type per list (default: false).
    #[serde(default)]
    pub persist_view_type: bool,
    /// View type used when neither the list nor a preference picks one.
    #[serde(default)]
    pub default_view: ViewType,
}

/// Where view preferences are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// TOML file for the file-backed preference store. Defaults to
    /// `preferences.toml` next to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences_path: Option<PathBuf>,
}

fn default_page_size() -> usize {
    50
}

fn default_require_schema() -> bool {
    true
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            require_schema: default_require_schema(),
            persist_view_type: false,
            default_view: ViewType::default(),
        }
    }
}
