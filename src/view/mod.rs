//! View types and per-type configuration resolution.
//!
//! Precedence per option, highest first:
//!
//! ```text
//! view instance ─→ named view options.<type> ─→ list options.<type>
//!     ─→ list flat fields (deprecated) ─→ built-in fallback
//! ```

mod layers;
mod options;
mod resolver;
mod view_type;

pub use layers::{ConfigLayers, LayerSource};
pub use options::{
    CalendarOptions, GalleryOptions, GanttOptions, GridOptions, KanbanOptions, MapOptions,
    TimelineOptions, ViewOptions,
};
pub use resolver::{fallback, resolve, Diagnostic, PrecedenceChain, ResolvedViewSchema};
pub use view_type::ViewType;
