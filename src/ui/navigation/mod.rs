//! Record navigation feature module.
//!
//! Maps a row click plus the configured navigation mode to either an
//! overlay state (drawer, modal, split, popover) or an effect for the host
//! (open URL, router navigation).
//!
//! # Architecture
//!
//! Uses MVI:
//! - `state.rs` - `Idle` / `OverlayOpen { record, mode }`
//! - `intent.rs` - `Open`, `Close`
//! - `reducer.rs` - pure transitions
//! - `controller.rs` - click interpretation and effects

mod config;
mod controller;
mod intent;
mod reducer;
mod state;

pub use config::{NavigationConfig, NavigationMode, OverlayMode};
pub use controller::{click_action, ClickAction, NavigationController, NavigationEffect};
pub use intent::NavigationIntent;
pub use reducer::NavigationReducer;
pub use state::NavigationState;
