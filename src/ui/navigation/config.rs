use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a row click is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    #[default]
    Page,
    Drawer,
    Modal,
    Split,
    Popover,
    NewWindow,
    None,
}

/// Overlay surfaces that keep the list on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayMode {
    Drawer,
    Modal,
    Split,
    Popover,
}

impl NavigationMode {
    pub fn overlay(&self) -> Option<OverlayMode> {
        match self {
            Self::Drawer => Some(OverlayMode::Drawer),
            Self::Modal => Some(OverlayMode::Modal),
            Self::Split => Some(OverlayMode::Split),
            Self::Popover => Some(OverlayMode::Popover),
            Self::Page | Self::NewWindow | Self::None => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationConfig {
    #[serde(default)]
    pub mode: NavigationMode,
    /// Overlay width, either pixels or a CSS length string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Value>,
    #[serde(default)]
    pub prevent_navigation: bool,
    #[serde(default)]
    pub open_new_tab: bool,
}

impl NavigationConfig {
    pub fn with_mode(mode: NavigationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}
