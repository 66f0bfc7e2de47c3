//! End-to-end behaviour across the public modules.

use objectview::config::ListConfig;
use objectview::filter::{
    conditions_from_value, merge_filters, normalize_value, FilterMerger, FilterNode,
};
use objectview::formatting::{evaluate, FormattingRule};
use objectview::ui::navigation::{
    NavigationConfig, NavigationController, NavigationEffect, NavigationMode, NavigationState,
};
use objectview::view::{resolve, PrecedenceChain, ViewOptions, ViewType};
use serde_json::json;

#[test]
fn in_with_single_value_becomes_equality() {
    assert_eq!(
        normalize_value(&json!(["status", "in", ["active"]])),
        json!(["status", "=", "active"])
    );
}

#[test]
fn in_with_several_values_becomes_or_group() {
    assert_eq!(
        normalize_value(&json!(["status", "in", ["active", "pending"]])),
        json!(["or", ["status", "=", "active"], ["status", "=", "pending"]])
    );
}

#[test]
fn base_and_quick_filter_merge_into_and_group() {
    let base = conditions_from_value(&json!([["region", "=", "US"]]));
    let quick = conditions_from_value(&json!([["status", "=", "active"]]));
    let user: Vec<FilterNode> = Vec::new();

    let merged = FilterMerger::new()
        .source("base", &base)
        .source("user", &user)
        .source("quick", &quick)
        .merge()
        .unwrap();
    assert_eq!(
        merged.to_value(),
        json!(["and", ["region", "=", "US"], ["status", "=", "active"]])
    );

    assert_eq!(merge_filters(&[base, user, quick]), Some(merged));
}

#[test]
fn first_matching_formatting_rule_wins() {
    let rules: Vec<FormattingRule> = serde_json::from_value(json!([
        {"field": "amount", "operator": "greater_than", "value": 1000, "backgroundColor": "#fee"},
        {"field": "status", "operator": "equals", "value": "active", "backgroundColor": "#cce"}
    ]))
    .unwrap();
    let record = json!({"amount": 500, "status": "active"})
        .as_object()
        .cloned()
        .unwrap();

    let style = evaluate(&record, &rules);
    assert_eq!(
        serde_json::to_value(&style).unwrap(),
        json!({"backgroundColor": "#cce"})
    );
}

#[test]
fn new_window_click_opens_record_url() {
    let mut nav = NavigationController::new(
        "orders",
        Some(NavigationConfig::with_mode(NavigationMode::NewWindow)),
    );
    let record = json!({"id": "42"}).as_object().cloned().unwrap();

    assert_eq!(
        nav.record_click(record),
        Some(NavigationEffect::OpenUrl("/orders/42".to_string()))
    );
    assert_eq!(nav.state(), &NavigationState::Idle);
}

#[test]
fn kanban_without_group_field_uses_status() {
    let list = ListConfig::new("tasks");
    let resolved = resolve(ViewType::Kanban, &PrecedenceChain::new(&list));
    let ViewOptions::Kanban(options) = resolved.options else {
        panic!("expected kanban options");
    };
    assert_eq!(options.group_field, "status");
}
