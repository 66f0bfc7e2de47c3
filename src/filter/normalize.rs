//! Canonicalization of filter trees.
//!
//! List operators are expanded into single-value comparisons so that data
//! sources only ever see `=`, `!=`, `>`, `>=`, `<`, `<=`, `contains` and
//! `notcontains`.

use serde_json::Value;

use super::node::{FilterCondition, FilterGroup, FilterNode, FilterOperator, Logic};

/// Normalize a single node. Malformed fragments come back unchanged.
pub fn normalize(node: &FilterNode) -> FilterNode {
    match node {
        FilterNode::Condition(condition) => normalize_condition(condition),
        FilterNode::Group(group) => normalize_group(group),
        FilterNode::Empty => FilterNode::Empty,
        FilterNode::Raw(value) => FilterNode::Raw(value.clone()),
    }
}

/// Normalize a wire-form filter.
pub fn normalize_value(value: &Value) -> Value {
    normalize(&FilterNode::from_value(value)).to_value()
}

/// Normalize each element of an independent condition list and drop the
/// ones that turned out to be unconstrained.
pub fn normalize_filters(nodes: &[FilterNode]) -> Vec<FilterNode> {
    nodes
        .iter()
        .map(normalize)
        .filter(|node| !node.is_empty())
        .collect()
}

fn normalize_condition(condition: &FilterCondition) -> FilterNode {
    let (scalar_op, logic) = match condition.operator {
        FilterOperator::In => (FilterOperator::Eq, Logic::Or),
        FilterOperator::NotIn => (FilterOperator::Ne, Logic::And),
        _ => return FilterNode::Condition(condition.clone()),
    };

    let values = match &condition.value {
        Value::Array(values) => values.clone(),
        Value::Null => Vec::new(),
        scalar => vec![scalar.clone()],
    };

    let mut expanded: Vec<FilterNode> = values
        .into_iter()
        .map(|value| FilterNode::condition(condition.field.clone(), scalar_op, value))
        .collect();

    match expanded.len() {
        0 => FilterNode::Empty,
        1 => expanded.remove(0),
        _ => FilterNode::Group(FilterGroup {
            logic,
            children: expanded,
        }),
    }
}

fn normalize_group(group: &FilterGroup) -> FilterNode {
    let children = normalize_filters(&group.children);
    if children.is_empty() {
        return FilterNode::Empty;
    }
    FilterNode::Group(FilterGroup {
        logic: group.logic,
        children,
    })
}
