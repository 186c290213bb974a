use super::*;

#[test]
fn test_settings_path_location() {
    let path = get_settings_path().unwrap();
    assert!(path.ends_with(".webcode/setting.json"));
}

#[test]
fn test_load_settings_from_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("setting.json");
    std::fs::write(&path, r#"{"history_limit": 5, "seed_default_tree": false}"#).unwrap();

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.history_limit, 5);
    assert!(!settings.seed_default_tree);
    assert_eq!(settings.user_id, "local");
}

#[test]
fn test_load_settings_rejects_bad_json() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("setting.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(load_settings_from(&path).is_none());
    assert!(load_settings_from(&tmp.path().join("missing.json")).is_none());
}
