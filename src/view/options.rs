//! Typed per-view-type options handed to renderers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub row_height: Option<String>,
    pub frozen_columns: Option<u64>,
    pub striped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanOptions {
    pub group_field: String,
    pub title_field: Option<String>,
    pub card_fields: Vec<String>,
    /// Explicit lane order; empty means "order of first appearance".
    pub column_order: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarOptions {
    pub start_date_field: String,
    pub end_date_field: Option<String>,
    pub title_field: Option<String>,
    pub color_field: Option<String>,
    pub all_day_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryOptions {
    pub title_field: String,
    pub image_field: Option<String>,
    pub subtitle_field: Option<String>,
    pub card_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineOptions {
    pub date_field: String,
    pub title_field: Option<String>,
    pub description_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttOptions {
    pub start_date_field: String,
    pub end_date_field: String,
    pub title_field: Option<String>,
    pub progress_field: Option<String>,
    pub dependencies_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub location_field: String,
    pub latitude_field: Option<String>,
    pub longitude_field: Option<String>,
    pub title_field: Option<String>,
}

/// Resolved options, one variant per view type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ViewOptions {
    Grid(GridOptions),
    Kanban(KanbanOptions),
    Calendar(CalendarOptions),
    Gallery(GalleryOptions),
    Timeline(TimelineOptions),
    Gantt(GanttOptions),
    Map(MapOptions),
}

impl ViewOptions {
    pub fn view_type(&self) -> super::ViewType {
        use super::ViewType;
        match self {
            Self::Grid(_) => ViewType::Grid,
            Self::Kanban(_) => ViewType::Kanban,
            Self::Calendar(_) => ViewType::Calendar,
            Self::Gallery(_) => ViewType::Gallery,
            Self::Timeline(_) => ViewType::Timeline,
            Self::Gantt(_) => ViewType::Gantt,
            Self::Map(_) => ViewType::Map,
        }
    }
}
