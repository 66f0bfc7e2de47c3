//! Combining independent filter sources into one query filter.

use super::node::{FilterNode, FilterOperator};
use super::normalize::normalize_filters;

/// Collects filter sources in declaration order and merges them.
///
/// Each source is normalized on its own. A source with several conditions
/// becomes one implicit `and` group; the sources are then joined with `and`.
#[derive(Debug, Clone, Default)]
pub struct FilterMerger {
    sources: Vec<(String, FilterNode)>,
}

impl FilterMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named source made of a list of conditions. Unconstrained
    /// sources are skipped.
    pub fn source(mut self, name: impl Into<String>, nodes: &[FilterNode]) -> Self {
        let mut normalized = normalize_filters(nodes);
        let node = match normalized.len() {
            0 => return self,
            1 => normalized.remove(0),
            _ => FilterNode::and(normalized),
        };
        self.sources.push((name.into(), node));
        self
    }

    /// Add an optional single-node source.
    pub fn optional(self, name: impl Into<String>, node: Option<&FilterNode>) -> Self {
        match node {
            Some(node) => self.source(name, std::slice::from_ref(node)),
            None => self,
        }
    }

    /// Names of the non-empty sources, in merge order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// `None` when nothing constrains the query.
    pub fn merge(self) -> Option<FilterNode> {
        let mut nodes: Vec<FilterNode> = self.sources.into_iter().map(|(_, node)| node).collect();
        match nodes.len() {
            0 => None,
            1 => nodes.pop(),
            _ => Some(FilterNode::and(nodes)),
        }
    }
}

/// Merge anonymous sources in the given order.
pub fn merge_filters(sources: &[Vec<FilterNode>]) -> Option<FilterNode> {
    sources
        .iter()
        .enumerate()
        .fold(FilterMerger::new(), |merger, (index, nodes)| {
            merger.source(format!("source{index}"), nodes)
        })
        .merge()
}

/// Translate a free-text search into a `contains` filter over the
/// searchable fields.
pub fn search_filter(term: &str, fields: &[String]) -> Option<FilterNode> {
    let term = term.trim();
    if term.is_empty() || fields.is_empty() {
        return None;
    }

    let mut conditions: Vec<FilterNode> = fields
        .iter()
        .map(|field| FilterNode::condition(field.clone(), FilterOperator::Contains, term))
        .collect();

    if conditions.len() == 1 {
        conditions.pop()
    } else {
        Some(FilterNode::or(conditions))
    }
}
