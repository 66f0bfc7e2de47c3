//! Filter AST and its JSON wire form.
//!
//! Conditions travel as `["field", "op", value]`, groups as
//! `["and" | "or", child, child, ...]`. Anything else is kept verbatim as
//! [`FilterNode::Raw`] so partially-specified UI state never gets lost.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators accepted in a filter condition.
///
/// The set is closed; `In`/`NotIn` never survive normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    NotContains,
    In,
    NotIn,
}

impl FilterOperator {
    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Contains => "contains",
            Self::NotContains => "notcontains",
            Self::In => "in",
            Self::NotIn => "not in",
        }
    }

    /// Parse an operator, accepting a few common aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "==" => Some(Self::Eq),
            "!=" | "<>" => Some(Self::Ne),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Gte),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Lte),
            "contains" => Some(Self::Contains),
            "notcontains" | "not_contains" => Some(Self::NotContains),
            "in" => Some(Self::In),
            "not in" | "notin" | "nin" => Some(Self::NotIn),
            _ => None,
        }
    }

    /// True for operators that take a list operand.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

/// Boolean connective of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Logic {
    And,
    Or,
}

impl Logic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "and" | "AND" => Some(Self::And),
            "or" | "OR" => Some(Self::Or),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterGroup {
    pub logic: Logic,
    pub children: Vec<FilterNode>,
}

/// A node of the filter tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FilterNode {
    Condition(FilterCondition),
    Group(FilterGroup),
    /// No constraint. Serialized as `[]`.
    Empty,
    /// Unrecognized fragment, passed through untouched.
    Raw(Value),
}

impl FilterNode {
    pub fn condition(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<Value>,
    ) -> Self {
        Self::Condition(FilterCondition::new(field, operator, value))
    }

    pub fn and(children: Vec<FilterNode>) -> Self {
        Self::Group(FilterGroup {
            logic: Logic::And,
            children,
        })
    }

    pub fn or(children: Vec<FilterNode>) -> Self {
        Self::Group(FilterGroup {
            logic: Logic::Or,
            children,
        })
    }

    /// True when the node places no constraint on the result set.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Group(group) => group.children.is_empty(),
            Self::Condition(_) | Self::Raw(_) => false,
        }
    }

    /// Best-effort decoding of the wire form. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let Value::Array(items) = value else {
            return Self::Raw(value.clone());
        };
        if items.is_empty() {
            return Self::Empty;
        }

        if items.len() == 3 {
            if let (Some(field), Some(operator)) = (
                items[0].as_str(),
                items[1].as_str().and_then(FilterOperator::parse),
            ) {
                return Self::Condition(FilterCondition {
                    field: field.to_string(),
                    operator,
                    value: items[2].clone(),
                });
            }
        }

        // Malformed children stay as `Raw` inside the group.
        if let Some(logic) = items[0].as_str().and_then(Logic::parse) {
            return Self::Group(FilterGroup {
                logic,
                children: items[1..].iter().map(Self::from_value).collect(),
            });
        }

        Self::Raw(value.clone())
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Condition(c) => Value::Array(vec![
                Value::String(c.field.clone()),
                Value::String(c.operator.as_str().to_string()),
                c.value.clone(),
            ]),
            Self::Group(g) => {
                let mut items = Vec::with_capacity(g.children.len() + 1);
                items.push(Value::String(g.logic.as_str().to_string()));
                items.extend(g.children.iter().map(FilterNode::to_value));
                Value::Array(items)
            }
            Self::Empty => Value::Array(Vec::new()),
            Self::Raw(value) => value.clone(),
        }
    }
}

impl From<Value> for FilterNode {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<FilterNode> for Value {
    fn from(node: FilterNode) -> Self {
        node.to_value()
    }
}

/// Decode a configured filter that may be either a single node or a list of
/// nodes (`[["a","=",1], ["b","=",2]]`, an implicit `and`).
pub fn conditions_from_value(value: &Value) -> Vec<FilterNode> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) if items.first().is_some_and(Value::is_array) => {
            items.iter().map(FilterNode::from_value).collect()
        }
        other => match FilterNode::from_value(other) {
            FilterNode::Empty => Vec::new(),
            node => vec![node],
        },
    }
}
