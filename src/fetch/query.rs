use crate::filter::{sort_to_value, FilterNode, SortSpec};

use super::source::FindParams;

/// The "current query" of a list: everything that determines which records
/// are shown. Any change produces a new value and a new fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub object_name: String,
    pub filter: Option<FilterNode>,
    pub sort: Vec<SortSpec>,
    /// Columns requested by the active view; drives expansion.
    pub columns: Vec<String>,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            ..Self::default()
        }
    }

    pub fn find_params(&self, expand: Vec<String>) -> FindParams {
        FindParams {
            filter: self.filter.as_ref().map(FilterNode::to_value),
            sort: (!self.sort.is_empty()).then(|| sort_to_value(&self.sort)),
            limit: self.limit,
            expand,
        }
    }
}
