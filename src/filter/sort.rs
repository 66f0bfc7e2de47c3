use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// Sort-header click: unsorted → ascending → descending → unsorted.
///
/// Clicking a different column replaces the sort with that column
/// ascending.
pub fn toggle_sort(current: &[SortSpec], field: &str) -> Vec<SortSpec> {
    match current.first() {
        Some(spec) if spec.field == field => match spec.order {
            SortOrder::Asc => vec![SortSpec::desc(field)],
            SortOrder::Desc => Vec::new(),
        },
        _ => vec![SortSpec::asc(field)],
    }
}

/// Wire form sent to the data source: `[["field", "asc"], ...]`.
pub fn sort_to_value(sort: &[SortSpec]) -> Value {
    Value::Array(
        sort.iter()
            .map(|spec| {
                Value::Array(vec![
                    Value::String(spec.field.clone()),
                    Value::String(spec.order.as_str().to_string()),
                ])
            })
            .collect(),
    )
}
