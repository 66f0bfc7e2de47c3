use std::fmt;

use serde::{Deserialize, Serialize};

/// Every view type a list can be rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Grid,
    Kanban,
    Calendar,
    Gallery,
    Timeline,
    Gantt,
    Map,
}

impl ViewType {
    /// Stable name, also used as the persisted preference value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Kanban => "kanban",
            Self::Calendar => "calendar",
            Self::Gallery => "gallery",
            Self::Timeline => "timeline",
            Self::Gantt => "gantt",
            Self::Map => "map",
        }
    }

    /// Unknown names return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "grid" => Some(Self::Grid),
            "kanban" => Some(Self::Kanban),
            "calendar" => Some(Self::Calendar),
            "gallery" => Some(Self::Gallery),
            "timeline" => Some(Self::Timeline),
            "gantt" => Some(Self::Gantt),
            "map" => Some(Self::Map),
            _ => None,
        }
    }

    pub fn all() -> &'static [ViewType] {
        &[
            Self::Grid,
            Self::Kanban,
            Self::Calendar,
            Self::Gallery,
            Self::Timeline,
            Self::Gantt,
            Self::Map,
        ]
    }

    /// Option keys that belong under `options.<type>`.
    pub fn option_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Grid => &["rowHeight", "frozenColumns", "striped"],
            Self::Kanban => &["groupField", "titleField", "cardFields", "columnOrder"],
            Self::Calendar => &[
                "startDateField",
                "endDateField",
                "titleField",
                "colorField",
                "allDayField",
            ],
            Self::Gallery => &["titleField", "imageField", "subtitleField", "cardSize"],
            Self::Timeline => &["dateField", "titleField", "descriptionField"],
            Self::Gantt => &[
                "startDateField",
                "endDateField",
                "titleField",
                "progressField",
                "dependenciesField",
            ],
            Self::Map => &["locationField", "latitudeField", "longitudeField", "titleField"],
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for view_type in ViewType::all() {
            assert_eq!(ViewType::parse(view_type.as_str()), Some(*view_type));
        }
        assert_eq!(ViewType::parse("table"), None);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let value = serde_json::to_value(ViewType::Kanban).unwrap();
        assert_eq!(value, serde_json::json!("kanban"));
    }
}
