//! Filter trees, normalization, source merging and sort state.

mod merge;
mod node;
mod normalize;
mod sort;

pub use merge::{merge_filters, search_filter, FilterMerger};
pub use node::{
    conditions_from_value, FilterCondition, FilterGroup, FilterNode, FilterOperator, Logic,
};
pub use normalize::{normalize, normalize_filters, normalize_value};
pub use sort::{sort_to_value, toggle_sort, SortOrder, SortSpec};
