use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field kinds the orchestrator cares about. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
    Datetime,
    Select,
    Lookup,
    MasterDetail,
    #[serde(other)]
    Other,
}

impl FieldKind {
    /// Single reference or master-detail relationship.
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Lookup | Self::MasterDetail)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_to: Option<String>,
}

/// Object metadata returned by `get_object_schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDef>,
}

impl ObjectSchema {
    /// Reference fields to embed for the requested columns, in column
    /// order. With no columns every reference field is expanded.
    pub fn expansion_fields(&self, columns: &[String]) -> Vec<String> {
        if columns.is_empty() {
            return self
                .fields
                .iter()
                .filter(|(_, def)| def.kind.is_reference())
                .map(|(name, _)| name.clone())
                .collect();
        }

        let mut expand: Vec<String> = Vec::new();
        for column in columns {
            let is_reference = self
                .fields
                .get(column)
                .is_some_and(|def| def.kind.is_reference());
            if is_reference && !expand.contains(column) {
                expand.push(column.clone());
            }
        }
        expand
    }
}
