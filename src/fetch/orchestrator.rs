//! Sequence-guarded data fetching.
//!
//! Every call to [`DataFetchOrchestrator::fetch`] takes the next sequence
//! number before doing any async work. When a response arrives it is
//! applied only if its sequence is still the latest one issued, so a slow
//! response to a superseded query can never overwrite a newer result.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use super::query::ListQuery;
use super::record::{normalize_find_result, FindResult, Record};
use super::schema::ObjectSchema;
use super::source::{DataSource, FindParams};

/// Errors recorded in the snapshot when a fetch fails.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("schema lookup for '{object}' failed: {error:#}")]
    Schema { object: String, error: anyhow::Error },

    #[error("find on '{object}' failed: {error:#}")]
    Data { object: String, error: anyhow::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Hold the data fetch until the object schema is known.
    pub require_schema: bool,
    /// Limit applied when the query carries none.
    pub page_size: Option<usize>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            require_schema: true,
            page_size: None,
        }
    }
}

/// One issued request. Exactly one is current at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub sequence: u64,
    pub object_name: String,
    pub params: FindParams,
}

/// Observable fetch state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchSnapshot {
    pub records: Vec<Record>,
    pub loading: bool,
    pub last_error: Option<String>,
    /// Sequence of the response currently shown; 0 before the first one.
    pub applied_sequence: u64,
    /// Sequence of the most recently issued request.
    pub issued_sequence: u64,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { count: usize },
    /// A newer request was issued while this one was in flight.
    Stale,
    Failed,
    SchemaUnavailable,
}

/// Issues `find` calls for a list and keeps the latest result.
///
/// Clones share state, so a clone can be moved into a spawned task.
#[derive(Clone)]
pub struct DataFetchOrchestrator {
    source: Arc<dyn DataSource>,
    config: FetchConfig,
    inner: Arc<Mutex<OrchestratorInner>>,
}

#[derive(Default)]
struct OrchestratorInner {
    snapshot: FetchSnapshot,
    schemas: HashMap<String, ObjectSchema>,
}

impl DataFetchOrchestrator {
    pub fn new(source: Arc<dyn DataSource>, config: FetchConfig) -> Self {
        Self {
            source,
            config,
            inner: Arc::new(Mutex::new(OrchestratorInner::default())),
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn snapshot(&self) -> FetchSnapshot {
        self.inner.lock().snapshot.clone()
    }

    pub fn records(&self) -> Vec<Record> {
        self.inner.lock().snapshot.records.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().snapshot.loading
    }

    /// Cached schema for `object_name`, if one has been loaded.
    pub fn schema(&self, object_name: &str) -> Option<ObjectSchema> {
        self.inner.lock().schemas.get(object_name).cloned()
    }

    /// Fetch records for `query` and apply them if still current.
    pub async fn fetch(&self, query: &ListQuery) -> FetchOutcome {
        let sequence = self.begin();
        let object = query.object_name.as_str();

        let expand = match self.expansion(object, &query.columns).await {
            Ok(expand) => expand,
            Err(err) => return self.complete(sequence, Err(err)),
        };

        let mut params = query.find_params(expand);
        if params.limit.is_none() {
            params.limit = self.config.page_size;
        }
        let request = FetchRequest {
            sequence,
            object_name: object.to_string(),
            params,
        };

        let result = self.execute(&request).await;
        self.complete(sequence, result)
    }

    /// Issue the next sequence number and mark the list as loading.
    pub fn begin(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.snapshot.issued_sequence += 1;
        inner.snapshot.loading = true;
        inner.snapshot.issued_sequence
    }

    /// Apply the result of request `sequence` unless a newer request exists.
    ///
    /// Failures keep the previously applied records.
    pub fn complete(&self, sequence: u64, result: Result<FindResult, FetchError>) -> FetchOutcome {
        let mut inner = self.inner.lock();
        let snapshot = &mut inner.snapshot;

        if sequence != snapshot.issued_sequence {
            tracing::debug!(
                sequence,
                latest = snapshot.issued_sequence,
                "Discarding stale fetch response"
            );
            return FetchOutcome::Stale;
        }

        snapshot.loading = false;
        match result {
            Ok(found) => {
                let count = found.records.len();
                snapshot.records = found.records;
                snapshot.total = found.total;
                snapshot.last_error = None;
                snapshot.applied_sequence = sequence;
                tracing::info!(sequence, count, "Fetch applied");
                FetchOutcome::Applied { count }
            }
            Err(err) => {
                tracing::error!(sequence, error = %err, "Fetch failed");
                let outcome = match err {
                    FetchError::Schema { .. } => FetchOutcome::SchemaUnavailable,
                    FetchError::Data { .. } => FetchOutcome::Failed,
                };
                snapshot.last_error = Some(err.to_string());
                outcome
            }
        }
    }

    async fn execute(&self, request: &FetchRequest) -> Result<FindResult, FetchError> {
        tracing::debug!(
            sequence = request.sequence,
            object = %request.object_name,
            expand = ?request.params.expand,
            "Issuing find"
        );

        let response = self
            .source
            .find(&request.object_name, &request.params)
            .await
            .map_err(|error| FetchError::Data {
                object: request.object_name.clone(),
                error,
            })?;

        Ok(normalize_find_result(response).unwrap_or_else(|| {
            tracing::warn!(
                object = %request.object_name,
                "Unrecognized find response shape, treating as empty"
            );
            FindResult::default()
        }))
    }

    /// Reference fields to expand, loading and caching the schema on first use.
    async fn expansion(&self, object: &str, columns: &[String]) -> Result<Vec<String>, FetchError> {
        if let Some(schema) = self.schema(object) {
            return Ok(schema.expansion_fields(columns));
        }

        match self.source.get_object_schema(object).await {
            Ok(schema) => {
                let expand = schema.expansion_fields(columns);
                self.inner.lock().schemas.insert(object.to_string(), schema);
                Ok(expand)
            }
            Err(error) if self.config.require_schema => Err(FetchError::Schema {
                object: object.to_string(),
                error,
            }),
            Err(error) => {
                tracing::warn!(
                    object,
                    error = %format!("{error:#}"),
                    "Schema unavailable, fetching without expansion"
                );
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct NoSource;

    #[async_trait]
    impl DataSource for NoSource {
        async fn find(&self, _object: &str, _params: &FindParams) -> anyhow::Result<Value> {
            anyhow::bail!("unused")
        }

        async fn get_object_schema(&self, _object: &str) -> anyhow::Result<ObjectSchema> {
            anyhow::bail!("unused")
        }
    }

    fn orchestrator() -> DataFetchOrchestrator {
        DataFetchOrchestrator::new(Arc::new(NoSource), FetchConfig::default())
    }

    fn found(id: u64) -> Result<FindResult, FetchError> {
        Ok(normalize_find_result(json!([{ "id": id }])).unwrap())
    }

    #[test]
    fn sequences_increase_and_mark_loading() {
        let orch = orchestrator();
        assert_eq!(orch.begin(), 1);
        assert_eq!(orch.begin(), 2);
        let snap = orch.snapshot();
        assert!(snap.loading);
        assert_eq!(snap.issued_sequence, 2);
        assert_eq!(snap.applied_sequence, 0);
    }

    #[test]
    fn superseded_response_is_discarded() {
        let orch = orchestrator();
        let a = orch.begin();
        let b = orch.begin();

        assert_eq!(orch.complete(b, found(2)), FetchOutcome::Applied { count: 1 });
        assert_eq!(orch.complete(a, found(1)), FetchOutcome::Stale);

        let snap = orch.snapshot();
        assert_eq!(snap.records[0]["id"], json!(2));
        assert_eq!(snap.applied_sequence, b);
        assert!(!snap.loading);
    }

    #[test]
    fn older_response_alone_does_not_clear_loading() {
        let orch = orchestrator();
        let a = orch.begin();
        let _b = orch.begin();
        assert_eq!(orch.complete(a, found(1)), FetchOutcome::Stale);
        assert!(orch.is_loading());
        assert!(orch.records().is_empty());
    }

    #[test]
    fn failure_keeps_previous_records() {
        let orch = orchestrator();
        let first = orch.begin();
        orch.complete(first, found(7));

        let second = orch.begin();
        let outcome = orch.complete(
            second,
            Err(FetchError::Data {
                object: "tasks".to_string(),
                error: anyhow::anyhow!("offline"),
            }),
        );

        assert_eq!(outcome, FetchOutcome::Failed);
        let snap = orch.snapshot();
        assert_eq!(snap.records.len(), 1);
        assert!(!snap.loading);
        assert_eq!(snap.applied_sequence, first);
        assert!(snap.last_error.unwrap().contains("offline"));
    }
}
