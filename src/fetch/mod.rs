//! Data fetching against an external [`DataSource`].

mod orchestrator;
mod query;
mod record;
mod schema;
mod source;

pub use orchestrator::{
    DataFetchOrchestrator, FetchConfig, FetchError, FetchOutcome, FetchRequest, FetchSnapshot,
};
pub use query::ListQuery;
pub use record::{normalize_find_result, record_id, FindResult, Record};
pub use schema::{FieldDef, FieldKind, ObjectSchema};
pub use source::{DataSource, FindParams};
