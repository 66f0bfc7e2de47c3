//! Resolution of the concrete configuration for the active view type.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{ListConfig, NamedListView};

use super::layers::{ConfigLayers, LayerSource};
use super::options::{
    CalendarOptions, GalleryOptions, GanttOptions, GridOptions, KanbanOptions, MapOptions,
    TimelineOptions, ViewOptions,
};
use super::view_type::ViewType;

/// Non-fatal findings reported while resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A type-specific option sat flat on the list instead of under
    /// `options.<type>`. It was still honored.
    DeprecatedFlatOption { view_type: ViewType, field: String },
    /// A required option was set nowhere and took the built-in default.
    FallbackUsed {
        view_type: ViewType,
        field: String,
        value: String,
    },
    /// An option had the wrong JSON type and was skipped.
    InvalidOption {
        view_type: ViewType,
        field: String,
        expected: &'static str,
    },
}

/// Everything a renderer needs for one view type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedViewSchema {
    pub view_type: ViewType,
    pub object_name: String,
    pub label: Option<String>,
    pub columns: Vec<String>,
    pub options: ViewOptions,
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

/// The configuration sources consulted for one resolution.
#[derive(Debug, Clone, Copy)]
pub struct PrecedenceChain<'a> {
    pub list: &'a ListConfig,
    pub named_view: Option<&'a NamedListView>,
    /// Fields explicitly set on the rendered view instance.
    pub instance: Option<&'a Map<String, Value>>,
}

impl<'a> PrecedenceChain<'a> {
    pub fn new(list: &'a ListConfig) -> Self {
        Self {
            list,
            named_view: None,
            instance: None,
        }
    }

    pub fn named_view(mut self, view: Option<&'a NamedListView>) -> Self {
        self.named_view = view;
        self
    }

    pub fn instance(mut self, fields: Option<&'a Map<String, Value>>) -> Self {
        self.instance = fields;
        self
    }

    /// Stack the layers for `view_type`, reporting deprecated flat options.
    pub fn layers(&self, view_type: ViewType, diagnostics: &mut Vec<Diagnostic>) -> ConfigLayers {
        let keys = view_type.option_keys();
        let mut layers = ConfigLayers::new();

        if let Some(instance) = self.instance {
            layers.push(LayerSource::Instance, instance.clone());
        }
        if let Some(view) = self.named_view {
            layers.push(LayerSource::Instance, pick(&view.extra, keys));
            if let Some(options) = view.options.get(view_type.as_str()) {
                layers.push(LayerSource::NamedView, options.clone());
            }
        }
        if let Some(options) = self.list.options.get(view_type.as_str()) {
            layers.push(LayerSource::ListOptions, options.clone());
        }

        let flat = pick(&self.list.extra, keys);
        for field in flat.keys() {
            tracing::warn!(
                object = %self.list.object_name,
                view_type = %view_type,
                field = %field,
                "Flat view option is deprecated; move it under options.{}",
                view_type
            );
            diagnostics.push(Diagnostic::DeprecatedFlatOption {
                view_type,
                field: field.clone(),
            });
        }
        layers.push(LayerSource::ListFlat, flat);
        layers.push(LayerSource::Fallback, fallback(view_type));
        layers
    }
}

/// Resolve the schema for `view_type` from `chain`.
pub fn resolve(view_type: ViewType, chain: &PrecedenceChain<'_>) -> ResolvedViewSchema {
    let mut diagnostics = Vec::new();
    let layers = chain.layers(view_type, &mut diagnostics);
    let mut reader = OptionReader {
        layers: &layers,
        view_type,
        diagnostics: &mut diagnostics,
    };

    let options = match view_type {
        ViewType::Grid => ViewOptions::Grid(resolve_grid(&mut reader)),
        ViewType::Kanban => ViewOptions::Kanban(resolve_kanban(&mut reader)),
        ViewType::Calendar => ViewOptions::Calendar(resolve_calendar(&mut reader)),
        ViewType::Gallery => ViewOptions::Gallery(resolve_gallery(&mut reader)),
        ViewType::Timeline => ViewOptions::Timeline(resolve_timeline(&mut reader)),
        ViewType::Gantt => ViewOptions::Gantt(resolve_gantt(&mut reader)),
        ViewType::Map => ViewOptions::Map(resolve_map(&mut reader)),
    };

    ResolvedViewSchema {
        view_type,
        object_name: chain.list.object_name.clone(),
        label: chain
            .named_view
            .map(|view| view.label.clone())
            .or_else(|| chain.list.label.clone()),
        columns: resolve_columns(chain),
        options,
        diagnostics,
    }
}

/// Hardcoded defaults for the required fields of each type.
pub fn fallback(view_type: ViewType) -> Map<String, Value> {
    let pairs: &[(&str, &str)] = match view_type {
        ViewType::Grid => &[],
        ViewType::Kanban => &[("groupField", "status")],
        ViewType::Calendar => &[("startDateField", "start_date")],
        ViewType::Gallery => &[("titleField", "name")],
        ViewType::Timeline => &[("dateField", "created_at")],
        ViewType::Gantt => &[("startDateField", "start_date"), ("endDateField", "end_date")],
        ViewType::Map => &[("locationField", "location")],
    };
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect()
}

fn resolve_columns(chain: &PrecedenceChain<'_>) -> Vec<String> {
    if let Some(columns) = chain
        .instance
        .and_then(|fields| fields.get("columns"))
        .and_then(string_list)
    {
        return columns;
    }
    match chain.named_view {
        Some(view) if !view.columns.is_empty() => view.columns.clone(),
        _ => chain.list.columns.clone(),
    }
}

fn resolve_grid(r: &mut OptionReader<'_>) -> GridOptions {
    GridOptions {
        row_height: r.string("rowHeight"),
        frozen_columns: r.unsigned("frozenColumns"),
        striped: r.boolean("striped"),
    }
}

fn resolve_kanban(r: &mut OptionReader<'_>) -> KanbanOptions {
    KanbanOptions {
        group_field: r.required("groupField"),
        title_field: r.string("titleField"),
        card_fields: r.strings("cardFields"),
        column_order: r.strings("columnOrder"),
    }
}

fn resolve_calendar(r: &mut OptionReader<'_>) -> CalendarOptions {
    CalendarOptions {
        start_date_field: r.required("startDateField"),
        end_date_field: r.string("endDateField"),
        title_field: r.string("titleField"),
        color_field: r.string("colorField"),
        all_day_field: r.string("allDayField"),
    }
}

fn resolve_gallery(r: &mut OptionReader<'_>) -> GalleryOptions {
    GalleryOptions {
        title_field: r.required("titleField"),
        image_field: r.string("imageField"),
        subtitle_field: r.string("subtitleField"),
        card_size: r.string("cardSize"),
    }
}

fn resolve_timeline(r: &mut OptionReader<'_>) -> TimelineOptions {
    TimelineOptions {
        date_field: r.required("dateField"),
        title_field: r.string("titleField"),
        description_field: r.string("descriptionField"),
    }
}

fn resolve_gantt(r: &mut OptionReader<'_>) -> GanttOptions {
    GanttOptions {
        start_date_field: r.required("startDateField"),
        end_date_field: r.required("endDateField"),
        title_field: r.string("titleField"),
        progress_field: r.string("progressField"),
        dependencies_field: r.string("dependenciesField"),
    }
}

fn resolve_map(r: &mut OptionReader<'_>) -> MapOptions {
    MapOptions {
        location_field: r.required("locationField"),
        latitude_field: r.string("latitudeField"),
        longitude_field: r.string("longitudeField"),
        title_field: r.string("titleField"),
    }
}

/// Typed reads over the layers. Values of the wrong type are skipped in
/// favour of the next layer and reported.
struct OptionReader<'a> {
    layers: &'a ConfigLayers,
    view_type: ViewType,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl OptionReader<'_> {
    fn typed<T>(
        &mut self,
        key: &str,
        expected: &'static str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Option<(T, LayerSource)> {
        for (value, source) in self.layers.candidates(key) {
            match convert(value) {
                Some(converted) => return Some((converted, source)),
                None => self.diagnostics.push(Diagnostic::InvalidOption {
                    view_type: self.view_type,
                    field: key.to_string(),
                    expected,
                }),
            }
        }
        None
    }

    fn string(&mut self, key: &str) -> Option<String> {
        self.typed(key, "non-empty string", non_empty_string)
            .map(|(value, _)| value)
    }

    /// Required fields always resolve: the fallback layer carries them.
    fn required(&mut self, key: &str) -> String {
        match self.typed(key, "non-empty string", non_empty_string) {
            Some((value, LayerSource::Fallback)) => {
                self.diagnostics.push(Diagnostic::FallbackUsed {
                    view_type: self.view_type,
                    field: key.to_string(),
                    value: value.clone(),
                });
                value
            }
            Some((value, _)) => value,
            None => fallback(self.view_type)
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }

    fn strings(&mut self, key: &str) -> Vec<String> {
        self.typed(key, "array of strings", string_list)
            .map(|(value, _)| value)
            .unwrap_or_default()
    }

    fn boolean(&mut self, key: &str) -> Option<bool> {
        self.typed(key, "boolean", Value::as_bool).map(|(value, _)| value)
    }

    fn unsigned(&mut self, key: &str) -> Option<u64> {
        self.typed(key, "unsigned integer", Value::as_u64)
            .map(|(value, _)| value)
    }
}

fn pick(source: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    source
        .iter()
        .filter(|(key, _)| keys.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}
