use serde_json::Value;

use crate::fetch::Record;
use crate::ui::mvi::Intent;

use super::config::OverlayMode;

#[derive(Debug, Clone)]
pub enum NavigationIntent {
    /// Show `record` in an overlay, replacing any record already shown.
    Open {
        record: Record,
        mode: OverlayMode,
        width: Option<Value>,
    },
    /// Overlay dismissed or the user navigated away.
    Close,
}

impl Intent for NavigationIntent {}
