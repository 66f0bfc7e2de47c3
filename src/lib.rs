//! View orchestration core for declaratively configured object lists.
//!
//! Turns list interactions (filter bar, quick filters, search, sort headers,
//! view switches, row clicks) into one consistent query against a
//! [`fetch::DataSource`], resolves per-view-type options, evaluates
//! conditional formatting and drives record navigation.

pub mod config;
pub mod fetch;
pub mod filter;
pub mod formatting;
pub mod logging;
pub mod preference;
pub mod session;
pub mod ui;
pub mod view;

pub use session::{ListSession, SessionOptions};
