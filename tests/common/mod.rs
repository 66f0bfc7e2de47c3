//! Shared test utilities and a scripted data source.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use objectview::fetch::{DataSource, FindParams, ObjectSchema, Record};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// A `find` call waiting for the test to answer it.
pub struct PendingFind {
    pub object: String,
    pub params: FindParams,
    respond: oneshot::Sender<Result<Value, String>>,
}

impl PendingFind {
    pub fn reply(self, response: Value) {
        let _ = self.respond.send(Ok(response));
    }

    pub fn fail(self, message: &str) {
        let _ = self.respond.send(Err(message.to_string()));
    }
}

/// Data source whose responses are released by the test, in any order.
///
/// With [`ScriptedSource::responding`] every `find` answers immediately
/// instead.
pub struct ScriptedSource {
    pending: Mutex<Vec<PendingFind>>,
    immediate: Mutex<Option<Value>>,
    schema: Mutex<Result<ObjectSchema, String>>,
    schema_gate: Mutex<Option<oneshot::Receiver<()>>>,
    find_calls: AtomicUsize,
    schema_calls: AtomicUsize,
    seen_params: Mutex<Vec<FindParams>>,
}

impl ScriptedSource {
    pub fn new(schema: ObjectSchema) -> Arc<Self> {
        Arc::new(Self {
            pending: Mutex::new(Vec::new()),
            immediate: Mutex::new(None),
            schema: Mutex::new(Ok(schema)),
            schema_gate: Mutex::new(None),
            find_calls: AtomicUsize::new(0),
            schema_calls: AtomicUsize::new(0),
            seen_params: Mutex::new(Vec::new()),
        })
    }

    pub fn responding(schema: ObjectSchema, response: Value) -> Arc<Self> {
        let source = Self::new(schema);
        *source.immediate.lock() = Some(response);
        source
    }

    pub fn set_response(&self, response: Value) {
        *self.immediate.lock() = Some(response);
    }

    pub fn fail_schema(&self, message: &str) {
        *self.schema.lock() = Err(message.to_string());
    }

    /// Hold schema lookups until the returned sender fires.
    pub fn gate_schema(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.schema_gate.lock() = Some(rx);
        tx
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn schema_calls(&self) -> usize {
        self.schema_calls.load(Ordering::SeqCst)
    }

    /// Params of every `find` call so far, in call order.
    pub fn seen_params(&self) -> Vec<FindParams> {
        self.seen_params.lock().clone()
    }

    /// Wait for the oldest unanswered `find` call.
    pub async fn next_find(&self) -> PendingFind {
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            {
                let mut pending = self.pending.lock();
                if !pending.is_empty() {
                    return pending.remove(0);
                }
            }
            assert!(
                std::time::Instant::now() < deadline,
                "timed out waiting for a find call"
            );
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn find(&self, object_name: &str, params: &FindParams) -> anyhow::Result<Value> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_params.lock().push(params.clone());

        let immediate = self.immediate.lock().clone();
        if let Some(response) = immediate {
            return Ok(response);
        }

        let (tx, rx) = oneshot::channel();
        self.pending.lock().push(PendingFind {
            object: object_name.to_string(),
            params: params.clone(),
            respond: tx,
        });

        match rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(anyhow::anyhow!(message)),
            Err(_) => Err(anyhow::anyhow!("request dropped")),
        }
    }

    async fn get_object_schema(&self, _object_name: &str) -> anyhow::Result<ObjectSchema> {
        self.schema_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.schema_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.schema
            .lock()
            .clone()
            .map_err(|message| anyhow::anyhow!(message))
    }
}

/// Schema for `tasks`: `owner` is a lookup, `project` master-detail.
pub fn tasks_schema() -> ObjectSchema {
    serde_json::from_value(json!({
        "name": "tasks",
        "fields": {
            "name": {"type": "text"},
            "status": {"type": "select"},
            "amount": {"type": "number"},
            "owner": {"type": "lookup", "reference_to": "users"},
            "project": {"type": "master_detail", "reference_to": "projects"}
        }
    }))
    .expect("valid schema")
}

pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record must be an object")
}

/// Let spawned tasks run until they block.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}
