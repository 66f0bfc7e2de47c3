//! The data-source port.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use super::record::Record;
use super::schema::ObjectSchema;

/// Query arguments passed to [`DataSource::find`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FindParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
}

/// Transport to the records of an object. Implemented by the host.
///
/// `find` may answer with a plain array, `{"data": [...]}` or
/// `{"records": [...]}`; the orchestrator normalizes all three.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn find(&self, object_name: &str, params: &FindParams) -> anyhow::Result<Value>;

    async fn get_object_schema(&self, object_name: &str) -> anyhow::Result<ObjectSchema>;

    async fn create(&self, object_name: &str, _data: Record) -> anyhow::Result<Record> {
        anyhow::bail!("create is not supported for '{}'", object_name)
    }

    async fn update(&self, object_name: &str, _id: &str, _data: Record) -> anyhow::Result<Record> {
        anyhow::bail!("update is not supported for '{}'", object_name)
    }

    async fn delete(&self, object_name: &str, _id: &str) -> anyhow::Result<()> {
        anyhow::bail!("delete is not supported for '{}'", object_name)
    }
}
