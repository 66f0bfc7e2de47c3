//! Model-View-Intent (MVI) primitives for list-view state.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Query / Renderer
//!    ↑                               │
//!    └───────────────────────────────┘
//! ```
//!
//! - **State**: immutable snapshot of one list's interaction state
//! - **Intent**: user interactions (clicks, toggles, search input)
//! - **Reducer**: pure transition function; effects stay with the caller

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
