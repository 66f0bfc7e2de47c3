use crate::filter::{FilterNode, SortSpec};
use crate::ui::mvi::Intent;
use crate::view::ViewType;

#[derive(Debug, Clone)]
pub enum ListIntent {
    /// Filter bar applied a new set of conditions.
    SetUserFilters(Vec<FilterNode>),
    ToggleQuickFilter(String),
    SetSearch(String),
    /// Sort header clicked: asc, then desc, then unsorted.
    ClickSortHeader(String),
    SetSort(Vec<SortSpec>),
    SwitchViewType(ViewType),
    /// A named view was picked (or cleared). Carries the view's type and
    /// initial sort so the reducer stays free of config lookups.
    SelectNamedView {
        id: Option<String>,
        view_type: ViewType,
        sort: Vec<SortSpec>,
    },
}

impl Intent for ListIntent {}
