//! Row-click handling.

use crate::fetch::{record_id, Record};
use crate::ui::mvi::Reducer;

use super::config::{NavigationConfig, NavigationMode, OverlayMode};
use super::intent::NavigationIntent;
use super::reducer::NavigationReducer;
use super::state::NavigationState;

/// Side effect requested by a row click. The controller never performs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEffect {
    /// Open `url` in a new browser tab or window.
    OpenUrl(String),
    /// Ask the router to show the record.
    Navigate { record_id: String, action: String },
}

/// What a click means under the current configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickAction {
    Ignore,
    OpenUrl,
    Navigate,
    Overlay(OverlayMode),
}

/// Pure mapping from configuration to click behaviour.
pub fn click_action(config: Option<&NavigationConfig>, can_read: bool) -> ClickAction {
    let Some(config) = config else {
        return if can_read {
            ClickAction::Overlay(OverlayMode::Drawer)
        } else {
            ClickAction::Ignore
        };
    };

    if config.prevent_navigation || config.mode == NavigationMode::None {
        return ClickAction::Ignore;
    }
    if config.open_new_tab || config.mode == NavigationMode::NewWindow {
        return ClickAction::OpenUrl;
    }
    match config.mode.overlay() {
        Some(mode) => ClickAction::Overlay(mode),
        None => ClickAction::Navigate,
    }
}

/// Owns the selected record for one list.
pub struct NavigationController {
    object_name: String,
    config: Option<NavigationConfig>,
    can_read: bool,
    state: NavigationState,
}

impl NavigationController {
    pub fn new(object_name: impl Into<String>, config: Option<NavigationConfig>) -> Self {
        Self {
            object_name: object_name.into(),
            config,
            can_read: true,
            state: NavigationState::Idle,
        }
    }

    /// Whether the "read" operation is permitted. Only consulted when no
    /// navigation config is present.
    pub fn with_read_permission(mut self, can_read: bool) -> Self {
        self.can_read = can_read;
        self
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.state.selected_record()
    }

    /// Handle a row click; returns the effect the host must carry out.
    pub fn record_click(&mut self, record: Record) -> Option<NavigationEffect> {
        let action = click_action(self.config.as_ref(), self.can_read);
        tracing::debug!(object = %self.object_name, ?action, "Record clicked");

        match action {
            ClickAction::Ignore => None,
            ClickAction::OpenUrl => {
                let id = record_id(&record)?;
                Some(NavigationEffect::OpenUrl(format!("/{}/{}", self.object_name, id)))
            }
            ClickAction::Navigate => {
                let id = record_id(&record)?;
                self.dispatch(NavigationIntent::Close);
                Some(NavigationEffect::Navigate {
                    record_id: id,
                    action: "view".to_string(),
                })
            }
            ClickAction::Overlay(mode) => {
                let width = self.config.as_ref().and_then(|c| c.width.clone());
                self.dispatch(NavigationIntent::Open {
                    record,
                    mode,
                    width,
                });
                None
            }
        }
    }

    pub fn close(&mut self) {
        self.dispatch(NavigationIntent::Close);
    }

    fn dispatch(&mut self, intent: NavigationIntent) {
        let state = std::mem::take(&mut self.state);
        self.state = NavigationReducer::reduce(state, intent);
    }
}
