use super::*;

#[test]
fn test_set_reports_change() {
    let mut sel = Selection::default();
    assert!(sel.set(Some("/a".into())));
    assert!(!sel.set(Some("/a".into())));
    assert!(sel.clear());
    assert!(!sel.clear());
}

#[test]
fn test_clear_if_under() {
    let mut sel = Selection::default();
    sel.set(Some("/src/lib/a.rs".into()));

    assert!(!sel.clear_if_under("/srcx"));
    assert_eq!(sel.path(), Some("/src/lib/a.rs"));

    assert!(sel.clear_if_under("/src"));
    assert_eq!(sel.path(), None);
}

#[test]
fn test_rewrite_prefix_follows_rename() {
    let mut sel = Selection::default();
    sel.set(Some("/notes/today.md".into()));

    assert!(sel.rewrite_prefix("/notes", "/tasks"));
    assert_eq!(sel.path(), Some("/tasks/today.md"));

    assert!(!sel.rewrite_prefix("/other", "/else"));
    assert_eq!(sel.path(), Some("/tasks/today.md"));
}

#[test]
fn test_clipboard_entry_serde() {
    let entry = ClipboardEntry {
        op: ClipboardOp::Cut,
        source_id: NodeUid::new(),
        source_path: "/a.txt".into(),
        snapshot: NodeSnapshot::file("a.txt", "hi"),
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["op"], "cut");
    assert_eq!(json["snapshot"]["type"], "file");

    let back: ClipboardEntry = serde_json::from_value(json).unwrap();
    assert!(back.is_cut());
    assert_eq!(back, entry);
}
