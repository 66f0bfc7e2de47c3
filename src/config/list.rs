//! Declarative configuration of one list instance.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::loader::ConfigError;
use crate::filter::{conditions_from_value, FilterNode, SortSpec};
use crate::formatting::FormattingRule;
use crate::ui::navigation::NavigationConfig;
use crate::view::ViewType;

/// A saved, selectable view of the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedListView {
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub view_type: ViewType,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub filter: Value,
    #[serde(default)]
    pub sort: Vec<SortSpec>,
    /// Type options keyed by view type name (`"kanban"`, `"calendar"`, ...).
    #[serde(default)]
    pub options: BTreeMap<String, Map<String, Value>>,
    /// Fields set directly on the view; they win over `options`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickFilter {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Conditions in wire form; a list of several means "all of them".
    #[serde(default)]
    pub filters: Value,
    #[serde(default)]
    pub default_active: bool,
}

impl QuickFilter {
    pub fn conditions(&self) -> Vec<FilterNode> {
        conditions_from_value(&self.filters)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfig {
    pub object_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
    /// Static base filter in wire form.
    #[serde(default)]
    pub filter: Value,
    #[serde(default)]
    pub sort: Vec<SortSpec>,
    #[serde(default, alias = "viewType", skip_serializing_if = "Option::is_none")]
    pub default_view: Option<ViewType>,
    #[serde(default)]
    pub views: BTreeMap<String, NamedListView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_named_view: Option<String>,
    #[serde(default)]
    pub quick_filters: Vec<QuickFilter>,
    #[serde(default)]
    pub searchable_fields: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationConfig>,
    #[serde(default)]
    pub conditional_formatting: Vec<FormattingRule>,
    /// List-level type options keyed by view type name.
    #[serde(default)]
    pub options: BTreeMap<String, Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Distinguishes several lists over the same object when persisting
    /// preferences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    /// Anything else, including deprecated flat type options.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListConfig {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            ..Self::default()
        }
    }

    /// Parses a list config from a `.json` file, or TOML for any other
    /// extension, and validates it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let list: ListConfig = if is_json {
            serde_json::from_str(&content).map_err(|e| ConfigError::JsonError {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        };

        list.validate()?;
        Ok(list)
    }

    /// Checks:
    /// - `objectName` is set
    /// - `defaultNamedView` names an existing view
    /// - quick filter ids are non-empty and unique
    /// - `pageSize`, when set, is positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::ValidationError { message });

        if self.object_name.trim().is_empty() {
            return invalid("objectName must not be empty".to_string());
        }

        if let Some(id) = &self.default_named_view {
            if !self.views.contains_key(id) {
                return invalid(format!("defaultNamedView '{}' is not defined in views", id));
            }
        }

        let mut seen = HashSet::new();
        for quick in &self.quick_filters {
            if quick.id.is_empty() {
                return invalid("quick filter id must not be empty".to_string());
            }
            if !seen.insert(quick.id.as_str()) {
                return invalid(format!("duplicate quick filter id '{}'", quick.id));
            }
        }

        if self.page_size == Some(0) {
            return invalid("pageSize must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn named_view(&self, id: &str) -> Option<&NamedListView> {
        self.views.get(id)
    }

    pub fn quick_filter(&self, id: &str) -> Option<&QuickFilter> {
        self.quick_filters.iter().find(|quick| quick.id == id)
    }

    /// Ids of the quick filters active before any user interaction.
    pub fn default_quick_filters(&self) -> Vec<String> {
        self.quick_filters
            .iter()
            .filter(|quick| quick.default_active)
            .map(|quick| quick.id.clone())
            .collect()
    }

    /// Base filter: the named view's when it sets one, else the list's.
    pub fn base_filters(&self, named_view: Option<&str>) -> Vec<FilterNode> {
        let view_filter = named_view
            .and_then(|id| self.views.get(id))
            .map(|view| &view.filter)
            .filter(|filter| !filter.is_null());
        conditions_from_value(view_filter.unwrap_or(&self.filter))
    }

    /// Initial sort: the named view's when it sets one, else the list's.
    pub fn base_sort(&self, named_view: Option<&str>) -> Vec<SortSpec> {
        named_view
            .and_then(|id| self.views.get(id))
            .filter(|view| !view.sort.is_empty())
            .map(|view| view.sort.clone())
            .unwrap_or_else(|| self.sort.clone())
    }
}
