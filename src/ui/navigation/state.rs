use serde_json::Value;

use crate::fetch::Record;
use crate::ui::mvi::UiState;

use super::config::OverlayMode;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum NavigationState {
    #[default]
    Idle,
    /// A detail overlay is showing `record`. The record is owned here and
    /// dropped on close.
    OverlayOpen {
        record: Record,
        mode: OverlayMode,
        width: Option<Value>,
    },
}

impl UiState for NavigationState {}

impl NavigationState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::OverlayOpen { .. })
    }

    pub fn selected_record(&self) -> Option<&Record> {
        match self {
            Self::OverlayOpen { record, .. } => Some(record),
            Self::Idle => None,
        }
    }

    pub fn mode(&self) -> Option<OverlayMode> {
        match self {
            Self::OverlayOpen { mode, .. } => Some(*mode),
            Self::Idle => None,
        }
    }
}
