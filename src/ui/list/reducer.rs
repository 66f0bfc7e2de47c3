use crate::filter::toggle_sort;
use crate::ui::mvi::Reducer;

use super::intent::ListIntent;
use super::state::ListState;

pub struct ListReducer;

impl Reducer for ListReducer {
    type State = ListState;
    type Intent = ListIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListIntent::SetUserFilters(user_filters) => ListState {
                user_filters,
                ..state
            },
            ListIntent::ToggleQuickFilter(id) => {
                let mut active = state.active_quick_filters;
                if let Some(pos) = active.iter().position(|a| *a == id) {
                    active.remove(pos);
                } else {
                    active.push(id);
                }
                ListState {
                    active_quick_filters: active,
                    ..state
                }
            }
            ListIntent::SetSearch(search) => ListState { search, ..state },
            ListIntent::ClickSortHeader(field) => ListState {
                sort: toggle_sort(&state.sort, &field),
                ..state
            },
            ListIntent::SetSort(sort) => ListState { sort, ..state },
            ListIntent::SwitchViewType(view_type) => ListState { view_type, ..state },
            ListIntent::SelectNamedView {
                id,
                view_type,
                sort,
            } => ListState {
                named_view: id,
                view_type,
                sort,
                ..state
            },
        }
    }
}
