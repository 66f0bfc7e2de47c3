use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::expression::strict_equals;
use super::style::StyleFragment;

/// Operators available to field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    In,
    IsEmpty,
    IsNotEmpty,
    /// Any operator name not listed above. Never matches.
    #[serde(other)]
    Unknown,
}

/// Style carried by a rule: explicit colors plus a free-form `style` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Map<String, Value>>,
}

impl RuleStyle {
    /// Merge `style` with the explicit colors; explicit colors win.
    pub fn to_fragment(&self) -> StyleFragment {
        let mut fragment = StyleFragment::default();
        if let Some(style) = &self.style {
            for (key, value) in style {
                fragment.insert(key.clone(), value.clone());
            }
        }
        if let Some(bg) = &self.background_color {
            fragment.insert("backgroundColor", Value::String(bg.clone()));
        }
        if let Some(text) = self.text_color.as_ref().or(self.color.as_ref()) {
            fragment.insert("color", Value::String(text.clone()));
        }
        if let Some(border) = &self.border_color {
            fragment.insert("borderColor", Value::String(border.clone()));
        }
        fragment
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: String,
    pub operator: FieldOperator,
    #[serde(default)]
    pub value: Value,
    #[serde(flatten)]
    pub style: RuleStyle,
}

impl FieldRule {
    /// Operand types that don't fit the operator never match.
    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        let actual = record.get(&self.field).unwrap_or(&Value::Null);
        let expected = &self.value;

        match self.operator {
            FieldOperator::Equals => strict_equals(actual, expected),
            FieldOperator::NotEquals => !strict_equals(actual, expected),
            FieldOperator::Contains => match (actual, expected) {
                (Value::String(a), Value::String(e)) => a.contains(e.as_str()),
                _ => false,
            },
            FieldOperator::NotContains => match (actual, expected) {
                (Value::String(a), Value::String(e)) => !a.contains(e.as_str()),
                _ => false,
            },
            FieldOperator::GreaterThan => compare(actual, expected, |a, e| a > e),
            FieldOperator::LessThan => compare(actual, expected, |a, e| a < e),
            FieldOperator::GreaterThanOrEqual => compare(actual, expected, |a, e| a >= e),
            FieldOperator::LessThanOrEqual => compare(actual, expected, |a, e| a <= e),
            FieldOperator::In => match expected {
                Value::Array(items) => items.iter().any(|item| strict_equals(item, actual)),
                _ => false,
            },
            FieldOperator::IsEmpty => is_blank(actual),
            FieldOperator::IsNotEmpty => !is_blank(actual),
            FieldOperator::Unknown => {
                tracing::debug!(
                    field = %self.field,
                    "Unknown formatting operator; rule never matches"
                );
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionRule {
    #[serde(alias = "condition")]
    pub expression: String,
    #[serde(flatten)]
    pub style: RuleStyle,
}

/// One conditional-formatting rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormattingRule {
    Expression(ExpressionRule),
    Field(FieldRule),
}

impl FormattingRule {
    pub fn style(&self) -> &RuleStyle {
        match self {
            Self::Expression(rule) => &rule.style,
            Self::Field(rule) => &rule.style,
        }
    }
}

fn compare(actual: &Value, expected: &Value, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(e)) => match (a.as_f64(), e.as_f64()) {
            (Some(a), Some(e)) => cmp(a, e),
            _ => false,
        },
        _ => false,
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
