//! List interaction state: filter bar, quick filters, search, sort and the
//! active view type.

mod intent;
mod reducer;
mod state;

pub use intent::ListIntent;
pub use reducer::ListReducer;
pub use state::ListState;
