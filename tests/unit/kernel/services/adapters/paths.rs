use super::*;

#[test]
fn test_get_storage_dir() {
    let dir = get_storage_dir();
    // 在测试环境中应该能获取到目录
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.to_string_lossy().contains(STORAGE_DIR));
}

#[test]
fn test_get_log_dir() {
    let dir = get_log_dir();
    assert!(dir.is_some());
    let dir = dir.unwrap();
    assert!(dir.to_string_lossy().contains(APP_NAME));
    assert!(dir.to_string_lossy().contains(LOG_DIR));
}

#[test]
fn test_ensure_data_dir_honours_override() {
    let tmp = tempfile::tempdir().unwrap();
    let wanted = tmp.path().join("nested").join("state");
    let dir = ensure_data_dir(Some(wanted.clone())).unwrap();
    assert_eq!(dir, wanted);
    assert!(wanted.is_dir());
}

#[test]
fn test_get_settings_dir_sits_under_cache() {
    let dir = get_settings_dir().unwrap();
    assert!(dir.ends_with(SETTINGS_DIR));
    assert_ne!(Some(dir), get_data_dir());
}
