use crate::config::ListConfig;
use crate::fetch::ListQuery;
use crate::filter::{search_filter, FilterMerger, FilterNode, SortSpec};
use crate::ui::mvi::UiState;
use crate::view::ViewType;

/// Interaction state of one list. Together with its [`ListConfig`] it fully
/// determines the query sent to the data source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListState {
    pub view_type: ViewType,
    /// Id of the selected named view, if any.
    pub named_view: Option<String>,
    /// Conditions built in the filter bar.
    pub user_filters: Vec<FilterNode>,
    /// Ids of active quick filters.
    pub active_quick_filters: Vec<String>,
    pub search: String,
    pub sort: Vec<SortSpec>,
}

impl UiState for ListState {}

impl ListState {
    /// State before any interaction.
    pub fn initial(config: &ListConfig, view_type: ViewType) -> Self {
        let named_view = config.default_named_view.clone();
        Self {
            view_type,
            sort: config.base_sort(named_view.as_deref()),
            named_view,
            user_filters: Vec::new(),
            active_quick_filters: config.default_quick_filters(),
            search: String::new(),
        }
    }

    pub fn is_quick_filter_active(&self, id: &str) -> bool {
        self.active_quick_filters.iter().any(|active| active == id)
    }

    /// Merge every filter source into the query for `config`.
    ///
    /// Source order: base filter, filter bar, quick filters (declaration
    /// order), search.
    pub fn query(&self, config: &ListConfig) -> ListQuery {
        let named = self.named_view.as_deref();

        let mut merger = FilterMerger::new()
            .source("base", &config.base_filters(named))
            .source("user", &self.user_filters);
        for quick in &config.quick_filters {
            if self.is_quick_filter_active(&quick.id) {
                merger = merger.source(format!("quick:{}", quick.id), &quick.conditions());
            }
        }
        let search = search_filter(&self.search, &config.searchable_fields);
        merger = merger.optional("search", search.as_ref());

        let columns = named
            .and_then(|id| config.named_view(id))
            .filter(|view| !view.columns.is_empty())
            .map(|view| view.columns.clone())
            .unwrap_or_else(|| config.columns.clone());

        ListQuery {
            object_name: config.object_name.clone(),
            filter: merger.merge(),
            sort: self.sort.clone(),
            columns,
            limit: config.page_size,
        }
    }
}
