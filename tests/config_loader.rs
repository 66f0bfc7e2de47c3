use std::path::PathBuf;

use objectview::config::{Config, ConfigError, ConfigStore, ListConfig};
use objectview::view::ViewType;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config");
    path
}

/// Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.defaults.page_size, 50);
    assert!(config.defaults.require_schema);
    assert!(!config.defaults.persist_view_type);
    assert_eq!(config.defaults.default_view, ViewType::Grid);
    assert!(config.storage.preferences_path.is_none());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("objectview/config.toml"));
}

#[test]
fn test_preferences_path_defaults_next_to_config() {
    let config = Config::default();
    assert!(config.preferences_path().ends_with("objectview/preferences.toml"));
}

#[test]
fn test_partial_toml_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "config.toml",
        r#"[defaults]
persist_view_type = true
default_view = "kanban"

[storage]
preferences_path = "/var/lib/objectview/prefs.toml"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert!(config.defaults.persist_view_type);
    assert_eq!(config.defaults.default_view, ViewType::Kanban);
    assert_eq!(config.defaults.page_size, 50);
    assert!(config.defaults.require_schema);
    assert_eq!(
        config.preferences_path(),
        PathBuf::from("/var/lib/objectview/prefs.toml")
    );
}

#[test]
fn test_empty_file_is_default_config() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "");
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_zero_page_size_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "[defaults]\npage_size = 0\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "[defaults\npage_size = ");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_unknown_view_type_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "[defaults]\ndefault_view = \"pivot\"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load_from(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::ReadError { .. })));
}

#[test]
fn test_store_reload_keeps_old_config_on_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "config.toml", "[defaults]\npage_size = 10\n");
    let store = ConfigStore::new(Config::load_from(&path).unwrap(), path.clone());

    std::fs::write(&path, "[defaults]\npage_size = 20\n").unwrap();
    store.reload().unwrap();
    assert_eq!(store.get().defaults.page_size, 20);

    std::fs::write(&path, "[defaults]\npage_size = 0\n").unwrap();
    assert!(store.reload().is_err());
    assert_eq!(store.get().defaults.page_size, 20);
}

#[test]
fn test_list_config_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "tasks.toml",
        r#"objectName = "tasks"
columns = ["name", "owner"]
viewType = "calendar"
searchableFields = ["name"]
startDateField = "due"

[options.calendar]
titleField = "name"

[views.board]
label = "Board"
type = "kanban"

[[quickFilters]]
id = "mine"
filters = [["owner", "=", "me"]]
defaultActive = true
"#,
    );

    let list = ListConfig::load_from(&path).unwrap();
    assert_eq!(list.object_name, "tasks");
    assert_eq!(list.default_view, Some(ViewType::Calendar));
    assert_eq!(list.views["board"].view_type, ViewType::Kanban);
    assert_eq!(list.default_quick_filters(), vec!["mine".to_string()]);
    assert!(list.extra.contains_key("startDateField"));
}

#[test]
fn test_list_config_from_json_validates() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "tasks.json",
        r#"{"objectName": "", "columns": ["name"]}"#,
    );
    assert!(matches!(
        ListConfig::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));

    let path = write(&dir, "broken.json", "{");
    assert!(matches!(
        ListConfig::load_from(&path),
        Err(ConfigError::JsonError { .. })
    ));
}

#[test]
fn test_list_config_with_unknown_formatting_operator_loads() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "tasks.json",
        r##"{
  "objectName": "tasks",
  "columns": ["name"],
  "conditionalFormatting": [
    {"field": "name", "operator": "starts_with", "value": "a", "color": "red"},
    {"field": "name", "operator": "equals", "value": "abc", "color": "green"}
  ]
}"##,
    );

    let list = ListConfig::load_from(&path).unwrap();
    assert_eq!(list.conditional_formatting.len(), 2);

    let record = serde_json::json!({"name": "abc"}).as_object().cloned().unwrap();
    let style = objectview::formatting::evaluate(&record, &list.conditional_formatting);
    assert_eq!(style.get("color"), Some(&serde_json::json!("green")));
}
