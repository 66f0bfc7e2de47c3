//! Conditional formatting of records.
//!
//! Rules are checked in declaration order and the first matching rule
//! supplies the whole style fragment. Expression rules that fail to parse
//! or evaluate simply don't match.

mod expression;
mod rule;
mod style;

pub use expression::{evaluate_condition, BinaryOp, Expr, ExpressionError};
pub use rule::{ExpressionRule, FieldOperator, FieldRule, FormattingRule, RuleStyle};
pub use style::StyleFragment;

use serde_json::{Map, Value};

/// Evaluate `rules` against one record.
pub fn evaluate(record: &Map<String, Value>, rules: &[FormattingRule]) -> StyleFragment {
    ConditionalFormatter::new(rules).style_for(record)
}

enum CompiledRule<'a> {
    Field(&'a FieldRule),
    Expression {
        rule: &'a ExpressionRule,
        compiled: Result<Expr, ExpressionError>,
    },
}

/// Rule list compiled once per render pass.
pub struct ConditionalFormatter<'a> {
    rules: Vec<CompiledRule<'a>>,
}

impl<'a> ConditionalFormatter<'a> {
    pub fn new(rules: &'a [FormattingRule]) -> Self {
        let rules = rules
            .iter()
            .map(|rule| match rule {
                FormattingRule::Field(field) => CompiledRule::Field(field),
                FormattingRule::Expression(expr) => {
                    let compiled = Expr::parse(&expr.expression);
                    if let Err(err) = &compiled {
                        tracing::debug!(
                            expression = %expr.expression,
                            error = %err,
                            "Formatting expression does not parse; rule will never match"
                        );
                    }
                    CompiledRule::Expression {
                        rule: expr,
                        compiled,
                    }
                }
            })
            .collect();
        Self { rules }
    }

    /// Style of the first matching rule, or an empty fragment.
    pub fn style_for(&self, record: &Map<String, Value>) -> StyleFragment {
        for rule in &self.rules {
            let (matched, style) = match rule {
                CompiledRule::Field(field) => (field.matches(record), &field.style),
                CompiledRule::Expression { rule, compiled } => {
                    let matched = match compiled {
                        Ok(expr) => match expr.eval(record) {
                            Ok(value) => expression::truthy(&value),
                            Err(err) => {
                                tracing::trace!(
                                    expression = %rule.expression,
                                    error = %err,
                                    "Formatting expression failed"
                                );
                                false
                            }
                        },
                        Err(_) => false,
                    };
                    (matched, &rule.style)
                }
            };
            if matched {
                return style.to_fragment();
            }
        }
        StyleFragment::default()
    }
}
