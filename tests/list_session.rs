mod common;

use std::sync::Arc;

use common::{record, tasks_schema, ScriptedSource};
use objectview::config::{Config, ListConfig};
use objectview::fetch::{DataSource, FetchOutcome};
use objectview::filter::{FilterNode, FilterOperator};
use objectview::formatting::StyleFragment;
use objectview::preference::{MemoryPreferenceStore, PreferenceStore};
use objectview::ui::list::ListIntent;
use objectview::ui::navigation::{NavigationEffect, NavigationState, OverlayMode};
use objectview::view::{ViewOptions, ViewType};
use objectview::{ListSession, SessionOptions};
use serde_json::json;

fn list_config() -> ListConfig {
    serde_json::from_value(json!({
        "objectName": "tasks",
        "columns": ["name", "owner", "amount"],
        "filter": [["region", "=", "US"]],
        "searchableFields": ["name", "description"],
        "quickFilters": [
            {"id": "active", "label": "Active", "filters": [["status", "=", "active"]]}
        ],
        "views": {
            "board": {
                "label": "Board",
                "type": "kanban",
                "sort": [{"field": "priority", "order": "desc"}],
                "options": {"kanban": {"groupField": "stage"}}
            }
        },
        "navigation": {"mode": "drawer", "width": 600},
        "conditionalFormatting": [
            {"field": "amount", "operator": "greater_than", "value": 1000, "backgroundColor": "#fee"},
            {"expression": "${status === 'blocked'}", "textColor": "#c00"}
        ]
    }))
    .unwrap()
}

fn session(source: &Arc<ScriptedSource>, options: SessionOptions) -> ListSession {
    let source: Arc<dyn DataSource> = source.clone();
    ListSession::new(list_config(), source, options)
}

#[tokio::test]
async fn quick_filter_toggle_refetches_with_merged_filter() {
    let source = ScriptedSource::responding(tasks_schema(), json!([{"id": 1}]));
    let mut session = session(&source, SessionOptions::default());

    assert_eq!(session.refresh().await, FetchOutcome::Applied { count: 1 });
    assert_eq!(
        source.seen_params()[0].filter,
        Some(json!(["region", "=", "US"]))
    );

    let outcome = session
        .dispatch(ListIntent::ToggleQuickFilter("active".to_string()))
        .await;
    assert_eq!(outcome, Some(FetchOutcome::Applied { count: 1 }));
    assert_eq!(
        source.seen_params()[1].filter,
        Some(json!(["and", ["region", "=", "US"], ["status", "=", "active"]]))
    );
}

#[tokio::test]
async fn overlapping_session_fetches_keep_the_latest_result() {
    let source = ScriptedSource::new(tasks_schema());
    let mut session = session(&source, SessionOptions::default());

    let first = session
        .apply(ListIntent::ToggleQuickFilter("active".to_string()))
        .unwrap();
    let older = tokio::spawn({
        let fetcher = session.fetcher();
        async move { fetcher.fetch(&first).await }
    });
    let find_older = source.next_find().await;

    let second = session
        .apply(ListIntent::SetSearch("report".to_string()))
        .unwrap();
    let newer = tokio::spawn({
        let fetcher = session.fetcher();
        async move { fetcher.fetch(&second).await }
    });
    let find_newer = source.next_find().await;
    assert!(session.is_loading());

    find_newer.reply(json!([{"id": "new"}]));
    assert_eq!(newer.await.unwrap(), FetchOutcome::Applied { count: 1 });
    assert!(!session.is_loading());

    find_older.reply(json!([{"id": "old-1"}, {"id": "old-2"}]));
    assert_eq!(older.await.unwrap(), FetchOutcome::Stale);

    let ids: Vec<_> = session.records().iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![json!("new")]);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn search_and_user_filters_follow_quick_filters() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let mut session = session(&source, SessionOptions::default());

    session.apply(ListIntent::SetUserFilters(vec![FilterNode::condition(
        "owner",
        FilterOperator::In,
        json!(["u1", "u2"]),
    )]));
    session.apply(ListIntent::SetSearch("report".to_string()));

    assert_eq!(
        session.query().filter.unwrap().to_value(),
        json!([
            "and",
            ["region", "=", "US"],
            ["or", ["owner", "=", "u1"], ["owner", "=", "u2"]],
            ["or", ["name", "contains", "report"], ["description", "contains", "report"]]
        ])
    );
}

#[tokio::test]
async fn unchanged_query_does_not_refetch() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let mut session = session(&source, SessionOptions::default());

    assert_eq!(session.dispatch(ListIntent::SetSearch("   ".to_string())).await, None);
    assert_eq!(session.dispatch(ListIntent::SwitchViewType(ViewType::Gallery)).await, None);
    assert_eq!(source.find_calls(), 0);
    assert_eq!(session.view_type(), ViewType::Gallery);
}

#[tokio::test]
async fn sort_header_clicks_reach_the_data_source() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let mut session = session(&source, SessionOptions::default());

    session
        .dispatch(ListIntent::ClickSortHeader("amount".to_string()))
        .await;
    session
        .dispatch(ListIntent::ClickSortHeader("amount".to_string()))
        .await;
    session
        .dispatch(ListIntent::ClickSortHeader("amount".to_string()))
        .await;

    let params = source.seen_params();
    assert_eq!(params[0].sort, Some(json!([["amount", "asc"]])));
    assert_eq!(params[1].sort, Some(json!([["amount", "desc"]])));
    assert_eq!(params[2].sort, None);
}

#[tokio::test]
async fn named_view_switches_type_sort_and_options() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let mut session = session(&source, SessionOptions::default());

    let outcome = session.select_named_view(Some("board")).await;
    assert!(outcome.is_some());
    assert_eq!(session.view_type(), ViewType::Kanban);
    assert_eq!(
        source.seen_params()[0].sort,
        Some(json!([["priority", "desc"]]))
    );

    let resolved = session.resolved_view();
    assert_eq!(resolved.label.as_deref(), Some("Board"));
    let ViewOptions::Kanban(options) = resolved.options else {
        panic!("expected kanban options");
    };
    assert_eq!(options.group_field, "stage");

    assert_eq!(session.select_named_view(Some("missing")).await, None);
}

#[tokio::test]
async fn instance_fields_override_named_view_options() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let mut session = session(&source, SessionOptions::default());
    session.select_named_view(Some("board")).await;

    let instance = json!({"groupField": "owner"}).as_object().cloned().unwrap();
    let ViewOptions::Kanban(options) = session.resolved_view_with(Some(&instance)).options else {
        panic!("expected kanban options");
    };
    assert_eq!(options.group_field, "owner");
}

#[tokio::test]
async fn styles_follow_record_order() {
    let source = ScriptedSource::responding(
        tasks_schema(),
        json!([
            {"id": 1, "amount": 5000, "status": "blocked"},
            {"id": 2, "amount": 10, "status": "blocked"},
            {"id": 3, "amount": "5000", "status": "open"}
        ]),
    );
    let session = session(&source, SessionOptions::default());
    session.refresh().await;

    let styles = session.styles();
    assert_eq!(styles.len(), 3);
    assert_eq!(styles[0].get("backgroundColor"), Some(&json!("#fee")));
    assert_eq!(styles[1].get("color"), Some(&json!("#c00")));
    assert_eq!(styles[2], StyleFragment::new());
}

#[tokio::test]
async fn row_click_opens_drawer_and_close_discards_record() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let mut session = session(&source, SessionOptions::default());

    assert_eq!(session.row_click(record(json!({"id": "7"}))), None);
    assert_eq!(
        session.navigation(),
        &NavigationState::OverlayOpen {
            record: record(json!({"id": "7"})),
            mode: OverlayMode::Drawer,
            width: Some(json!(600)),
        }
    );

    session.row_click(record(json!({"id": "8"})));
    assert_eq!(
        session.navigation().selected_record(),
        Some(&record(json!({"id": "8"})))
    );

    session.close_detail();
    assert_eq!(session.navigation(), &NavigationState::Idle);
}

#[tokio::test]
async fn row_click_without_config_respects_read_permission() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let mut config = list_config();
    config.navigation = None;

    let dyn_source: Arc<dyn DataSource> = source.clone();
    let mut denied = ListSession::new(
        config.clone(),
        dyn_source.clone(),
        SessionOptions {
            can_read: false,
            ..SessionOptions::default()
        },
    );
    assert_eq!(denied.row_click(record(json!({"id": "1"}))), None);
    assert_eq!(denied.navigation(), &NavigationState::Idle);

    let mut allowed = ListSession::new(config, dyn_source, SessionOptions::default());
    allowed.row_click(record(json!({"id": "1"})));
    assert_eq!(allowed.navigation().mode(), Some(OverlayMode::Drawer));
}

#[tokio::test]
async fn new_window_click_emits_url() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let mut config = list_config();
    config.navigation = Some(serde_json::from_value(json!({"mode": "new_window"})).unwrap());
    let dyn_source: Arc<dyn DataSource> = source.clone();
    let mut session = ListSession::new(config, dyn_source, SessionOptions::default());

    assert_eq!(
        session.row_click(record(json!({"id": "42"}))),
        Some(NavigationEffect::OpenUrl("/tasks/42".to_string()))
    );
    assert_eq!(session.navigation(), &NavigationState::Idle);
}

#[tokio::test]
async fn view_type_preference_persists_across_sessions_when_enabled() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());

    let mut config = Config::default();
    config.defaults.persist_view_type = true;

    let mut first = session(&source, SessionOptions::from_config(&config, store.clone()));
    assert_eq!(first.view_type(), ViewType::Grid);
    first.apply(ListIntent::SwitchViewType(ViewType::Calendar));

    let second = session(&source, SessionOptions::from_config(&config, store.clone()));
    assert_eq!(second.view_type(), ViewType::Calendar);

    config.defaults.persist_view_type = false;
    let third = session(&source, SessionOptions::from_config(&config, store));
    assert_eq!(third.view_type(), ViewType::Grid);
}

#[tokio::test]
async fn configured_default_view_applies_without_preference() {
    let source = ScriptedSource::responding(tasks_schema(), json!([]));
    let mut config = Config::default();
    config.defaults.default_view = ViewType::Timeline;
    let store: Arc<dyn PreferenceStore> = Arc::new(MemoryPreferenceStore::new());

    let session = session(&source, SessionOptions::from_config(&config, store));
    assert_eq!(session.view_type(), ViewType::Timeline);
}
