use serde_json::{Map, Value};

/// One record as returned by the data source.
pub type Record = Map<String, Value>;

/// The record's identifier as a string (`id`, falling back to `_id`).
pub fn record_id(record: &Record) -> Option<String> {
    ["id", "_id"]
        .iter()
        .filter_map(|key| record.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Records and optional total count extracted from a `find` response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FindResult {
    pub records: Vec<Record>,
    pub total: Option<u64>,
}

/// Accepts `[...]`, `{"data": [...]}` and `{"records": [...]}`.
/// Non-object array items are skipped. Any other shape yields `None`.
pub fn normalize_find_result(response: Value) -> Option<FindResult> {
    match response {
        Value::Array(items) => Some(FindResult {
            records: collect_records(items),
            total: None,
        }),
        Value::Object(mut object) => {
            let total = ["total", "count"]
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_u64));
            let items = ["data", "records"]
                .iter()
                .find_map(|key| match object.remove(*key) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                })?;
            Some(FindResult {
                records: collect_records(items),
                total,
            })
        }
        _ => None,
    }
}

fn collect_records(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(record) => Some(record),
            _ => None,
        })
        .collect()
}
