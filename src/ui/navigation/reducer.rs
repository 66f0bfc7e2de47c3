use crate::ui::mvi::Reducer;

use super::intent::NavigationIntent;
use super::state::NavigationState;

pub struct NavigationReducer;

impl Reducer for NavigationReducer {
    type State = NavigationState;
    type Intent = NavigationIntent;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            NavigationIntent::Open {
                record,
                mode,
                width,
            } => NavigationState::OverlayOpen {
                record,
                mode,
                width,
            },
            NavigationIntent::Close => NavigationState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::navigation::OverlayMode;
    use serde_json::json;

    fn record(id: &str) -> crate::fetch::Record {
        json!({"id": id, "name": format!("rec {id}")})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn open_from_idle() {
        let state = NavigationReducer::reduce(
            NavigationState::Idle,
            NavigationIntent::Open {
                record: record("1"),
                mode: OverlayMode::Drawer,
                width: None,
            },
        );
        assert_eq!(state.selected_record(), Some(&record("1")));
        assert_eq!(state.mode(), Some(OverlayMode::Drawer));
    }

    #[test]
    fn open_while_open_replaces_record() {
        let open = NavigationState::OverlayOpen {
            record: record("1"),
            mode: OverlayMode::Modal,
            width: None,
        };
        let state = NavigationReducer::reduce(
            open,
            NavigationIntent::Open {
                record: record("2"),
                mode: OverlayMode::Split,
                width: Some(json!(640)),
            },
        );
        assert_eq!(state.selected_record(), Some(&record("2")));
        assert_eq!(state.mode(), Some(OverlayMode::Split));
    }

    #[test]
    fn close_discards_record() {
        let open = NavigationState::OverlayOpen {
            record: record("1"),
            mode: OverlayMode::Popover,
            width: None,
        };
        let state = NavigationReducer::reduce(open, NavigationIntent::Close);
        assert_eq!(state, NavigationState::Idle);
        assert!(state.selected_record().is_none());
    }

    #[test]
    fn close_when_idle_is_noop() {
        let state = NavigationReducer::reduce(NavigationState::Idle, NavigationIntent::Close);
        assert_eq!(state, NavigationState::Idle);
    }
}
