use super::*;
use tempfile::tempdir;

#[test]
fn defaults_match_the_runtime_constants() {
    let config = UiConfig::default();
    assert_eq!(config.drag_threshold, 4);
    assert_eq!(config.click_ms, 200);
    assert_eq!(config.cascade_offset, 32);
    assert_eq!(config.wheel_step, 1);
    assert!(config.skin.is_none());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = UiConfig::from_json_str(r#"{ "click_ms": 350, "skin": "skins/dark.json" }"#).unwrap();
    assert_eq!(config.click_ms, 350);
    assert_eq!(config.skin, Some(PathBuf::from("skins/dark.json")));
    assert_eq!(config.drag_threshold, 4);
    assert_eq!(config.log_filter, "grusin=info");
}

#[test]
fn malformed_json_is_an_error() {
    assert!(UiConfig::from_json_str("{ \"click_ms\": \"soon\" }").is_err());
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join(CONFIG_FILE);
    let config = UiConfig {
        drag_threshold: 8,
        log_dir: Some(dir.path().join("logs")),
        ..UiConfig::default()
    };
    config.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("\"skin\""));
    assert_eq!(UiConfig::load(&path).unwrap(), config);
}

#[test]
fn explicit_log_dir_wins() {
    let config = UiConfig {
        log_dir: Some(PathBuf::from("/tmp/grusin-logs")),
        ..UiConfig::default()
    };
    assert_eq!(
        config.resolved_log_dir(),
        Some(PathBuf::from("/tmp/grusin-logs"))
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = UiConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, crate::ui::core::error::UiError::Io(_)));
}
