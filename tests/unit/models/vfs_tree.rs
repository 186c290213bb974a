use super::*;

fn sample() -> VfsTree {
    let mut tree = VfsTree::new();
    tree.create_directory("/", "src").unwrap();
    tree.create_file("/src", "index.js", "console.log(1)").unwrap();
    tree.create_directory("/src", "lib").unwrap();
    tree.create_file("/src/lib", "util.js", "").unwrap();
    tree.create_file("/", "README.md", "# hi").unwrap();
    tree
}

#[test]
fn test_new_tree() {
    let tree = VfsTree::new();
    let root = tree.root();
    assert!(root.is_dir());
    assert_eq!(root.path(), "/");
    assert_eq!(root.name(), DEFAULT_ROOT_NAME);
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_create_and_lookup() {
    let tree = sample();
    let file = tree.lookup("/src/index.js").unwrap();
    assert!(file.is_file());
    assert_eq!(file.content(), Some("console.log(1)"));
    assert_eq!(file.extension(), Some("js"));
    assert_eq!(file.path(), "/src/index.js");

    let dir = tree.lookup("/src/lib").unwrap();
    assert_eq!(dir.extension(), None);
    assert_eq!(dir.content(), None);

    assert!(tree.lookup("/missing").is_none());
    assert!(tree.lookup("src").is_none());
}

#[test]
fn test_create_errors() {
    let mut tree = sample();
    assert_eq!(
        tree.create_file("/nope", "a", ""),
        Err(VfsError::ParentNotFound("/nope".into()))
    );
    assert_eq!(
        tree.create_file("/README.md", "a", ""),
        Err(VfsError::ParentNotFound("/README.md".into()))
    );
    assert_eq!(
        tree.create_directory("/", "src"),
        Err(VfsError::NameCollision {
            dir: "/".into(),
            name: "src".into()
        })
    );
    assert_eq!(
        tree.create_file("/", "a/b", ""),
        Err(VfsError::InvalidName("a/b".into()))
    );
}

#[test]
fn test_create_bumps_parent_modified() {
    let mut tree = sample();
    let before = tree.lookup("/src").unwrap().modified_at();
    std::thread::sleep(std::time::Duration::from_millis(2));
    tree.create_file("/src", "new.js", "").unwrap();
    assert!(tree.lookup("/src").unwrap().modified_at() > before);
}

fn modified(tree: &VfsTree, path: &str) -> u64 {
    tree.lookup(path).unwrap().modified_at()
}

fn tick() {
    std::thread::sleep(std::time::Duration::from_millis(2));
}

#[test]
fn test_delete_bumps_parent_modified() {
    let mut tree = sample();
    let root = modified(&tree, "/");
    let src = modified(&tree, "/src");
    tick();
    tree.delete_node("/src/lib").unwrap();
    assert!(modified(&tree, "/src") > src);
    tree.delete_node("/README.md").unwrap();
    assert!(modified(&tree, "/") > root);
}

#[test]
fn test_move_bumps_both_parents() {
    let mut tree = sample();
    let old_parent = modified(&tree, "/src");
    let new_parent = modified(&tree, "/src/lib");
    tick();
    tree.move_node("/src/index.js", "/src/lib").unwrap();
    assert!(modified(&tree, "/src") > old_parent);
    assert!(modified(&tree, "/src/lib") > new_parent);
}

#[test]
fn test_rename_bumps_parent_and_recomputes_extension() {
    let mut tree = VfsTree::new();
    tree.create_directory("/", "notes").unwrap();
    tree.create_file("/notes", "todo.txt", "buy milk").unwrap();
    assert_eq!(tree.lookup("/notes/todo.txt").unwrap().extension(), Some("txt"));

    let parent = modified(&tree, "/notes");
    tick();
    assert_eq!(tree.rename_node("/notes/todo.txt", "todo.md").unwrap(), "/notes/todo.md");
    assert!(modified(&tree, "/notes") > parent);
    let file = tree.lookup("/notes/todo.md").unwrap();
    assert_eq!(file.extension(), Some("md"));
    assert_eq!(file.content(), Some("buy milk"));

    tree.rename_node("/notes/todo.md", "TODO").unwrap();
    assert_eq!(tree.lookup("/notes/TODO").unwrap().extension(), Some(""));
}

#[test]
fn test_directory_rename_keeps_file_intact() {
    let mut tree = VfsTree::new();
    tree.create_directory("/", "notes").unwrap();
    tree.create_file("/notes", "todo.txt", "buy milk").unwrap();

    assert_eq!(tree.rename_node("/notes", "tasks").unwrap(), "/tasks");
    assert!(tree.lookup("/notes/todo.txt").is_none());
    let file = tree.lookup("/tasks/todo.txt").unwrap();
    assert_eq!(file.path(), "/tasks/todo.txt");
    assert_eq!(file.extension(), Some("txt"));
    assert_eq!(file.content(), Some("buy milk"));
}

#[test]
fn test_delete_subtree() {
    let mut tree = sample();
    let count = tree.node_count();
    tree.select(Some("/src/lib/util.js"));

    assert_eq!(tree.delete_node("/src").unwrap(), "/src");
    assert_eq!(tree.node_count(), count - 4);
    assert!(tree.lookup("/src/lib/util.js").is_none());
    assert_eq!(tree.selected_path(), None);
}

#[test]
fn test_delete_root_and_missing() {
    let mut tree = sample();
    assert_eq!(tree.delete_node("/"), Err(VfsError::CannotDeleteRoot));
    assert_eq!(
        tree.delete_node("/ghost"),
        Err(VfsError::NotFound("/ghost".into()))
    );
}

#[test]
fn test_rename_rewrites_descendants() {
    let mut tree = sample();
    let id = tree.lookup("/src/lib/util.js").unwrap().id();
    tree.select(Some("/src/lib/util.js"));

    assert_eq!(tree.rename_node("/src", "app").unwrap(), "/app");
    let moved = tree.lookup("/app/lib/util.js").unwrap();
    assert_eq!(moved.id(), id);
    assert!(tree.lookup("/src").is_none());
    assert_eq!(tree.selected_path(), Some("/app/lib/util.js"));
}

#[test]
fn test_rename_errors_and_noop() {
    let mut tree = sample();
    assert_eq!(tree.rename_node("/", "x"), Err(VfsError::CannotRenameRoot));
    assert!(matches!(
        tree.rename_node("/README.md", "src"),
        Err(VfsError::NameCollision { .. })
    ));
    assert_eq!(
        tree.rename_node("/README.md", ""),
        Err(VfsError::InvalidName(String::new()))
    );

    let before = tree.snapshot();
    assert_eq!(tree.rename_node("/README.md", "README.md").unwrap(), "/README.md");
    assert_eq!(tree.snapshot(), before);
}

#[test]
fn test_move_node() {
    let mut tree = sample();
    let id = tree.lookup("/README.md").unwrap().id();
    assert_eq!(tree.move_node("/README.md", "/src/lib").unwrap(), "/src/lib/README.md");
    assert_eq!(tree.lookup("/src/lib/README.md").unwrap().id(), id);
    assert!(tree.lookup("/README.md").is_none());
}

#[test]
fn test_move_rejects_cycles() {
    let mut tree = sample();
    let before = tree.snapshot();
    for (src, dst) in [("/src", "/src"), ("/src", "/src/lib"), ("/", "/src")] {
        assert!(
            matches!(tree.move_node(src, dst), Err(VfsError::InvalidTarget { .. })),
            "{src} -> {dst}"
        );
    }
    assert_eq!(tree.snapshot(), before);
}

#[test]
fn test_move_errors() {
    let mut tree = sample();
    assert_eq!(
        tree.move_node("/ghost", "/src"),
        Err(VfsError::SourceNotFound("/ghost".into()))
    );
    assert_eq!(
        tree.move_node("/README.md", "/ghost"),
        Err(VfsError::TargetNotFound("/ghost".into()))
    );
    assert_eq!(
        tree.move_node("/src", "/README.md"),
        Err(VfsError::NotADirectory("/README.md".into()))
    );
    tree.create_file("/src/lib", "README.md", "").unwrap();
    assert!(matches!(
        tree.move_node("/README.md", "/src/lib"),
        Err(VfsError::NameCollision { .. })
    ));
}

#[test]
fn test_update_file_content() {
    let mut tree = sample();
    assert!(tree.update_file_content("/README.md", "new"));
    assert_eq!(tree.lookup("/README.md").unwrap().content(), Some("new"));
    assert!(!tree.update_file_content("/src", "x"));
    assert!(!tree.update_file_content("/ghost", "x"));
}

#[test]
fn test_copy_paste_collision_names() {
    let mut tree = VfsTree::new();
    tree.create_file("/", "x.js", "a").unwrap();
    tree.create_directory("/", "dir").unwrap();

    tree.copy_to_clipboard("/x.js", ClipboardOp::Copy).unwrap();
    assert_eq!(tree.paste("/").unwrap(), "/x (1).js");
    assert_eq!(tree.paste("/").unwrap(), "/x (2).js");
    assert!(tree.clipboard().is_some());

    tree.copy_to_clipboard("/dir", ClipboardOp::Copy).unwrap();
    assert_eq!(tree.paste("/").unwrap(), "/dir (1)");
}

#[test]
fn test_paste_dotfile_and_plain_names() {
    let mut tree = VfsTree::new();
    tree.create_file("/", ".env", "").unwrap();
    tree.create_file("/", "Makefile", "").unwrap();

    tree.copy_to_clipboard("/.env", ClipboardOp::Copy).unwrap();
    assert_eq!(tree.paste("/").unwrap(), "/.env (1)");
    tree.copy_to_clipboard("/Makefile", ClipboardOp::Copy).unwrap();
    assert_eq!(tree.paste("/").unwrap(), "/Makefile (1)");
}

#[test]
fn test_paste_assigns_fresh_ids() {
    let mut tree = sample();
    tree.copy_to_clipboard("/src", ClipboardOp::Copy).unwrap();
    tree.create_directory("/", "dst").unwrap();
    tree.paste("/dst").unwrap();

    let original = tree.lookup("/src/lib/util.js").unwrap().id();
    let copy = tree.lookup("/dst/src/lib/util.js").unwrap().id();
    assert_ne!(original, copy);
}

#[test]
fn test_clipboard_is_a_snapshot() {
    let mut tree = sample();
    tree.copy_to_clipboard("/README.md", ClipboardOp::Copy).unwrap();
    tree.update_file_content("/README.md", "changed");
    tree.paste("/src").unwrap();
    assert_eq!(tree.lookup("/src/README.md").unwrap().content(), Some("# hi"));
}

#[test]
fn test_cut_paste_moves() {
    let mut tree = sample();
    tree.copy_to_clipboard("/src/lib", ClipboardOp::Cut).unwrap();
    assert_eq!(tree.paste("/").unwrap(), "/lib");
    assert!(tree.lookup("/src/lib").is_none());
    assert!(tree.lookup("/lib/util.js").is_some());
    assert!(tree.clipboard().is_none());
}

#[test]
fn test_cut_paste_follows_renamed_source() {
    let mut tree = sample();
    tree.copy_to_clipboard("/README.md", ClipboardOp::Cut).unwrap();
    tree.rename_node("/README.md", "NOTES.md").unwrap();
    tree.paste("/src").unwrap();
    assert!(tree.lookup("/NOTES.md").is_none());
    assert_eq!(tree.lookup("/src/README.md").unwrap().content(), Some("# hi"));
}

#[test]
fn test_cut_paste_into_same_dir_is_noop() {
    let mut tree = sample();
    let before = tree.snapshot();
    tree.copy_to_clipboard("/src/index.js", ClipboardOp::Cut).unwrap();
    assert_eq!(tree.paste("/src").unwrap(), "/src/index.js");
    assert_eq!(tree.snapshot(), before);
    assert!(tree.clipboard().is_none());
}

#[test]
fn test_cut_paste_into_own_subtree_fails() {
    let mut tree = sample();
    tree.copy_to_clipboard("/src", ClipboardOp::Cut).unwrap();
    assert!(matches!(
        tree.paste("/src/lib"),
        Err(VfsError::InvalidTarget { .. })
    ));
    assert!(tree.clipboard().is_some());
}

#[test]
fn test_clipboard_errors() {
    let mut tree = sample();
    assert_eq!(tree.paste("/"), Err(VfsError::EmptyClipboard));
    assert_eq!(
        tree.copy_to_clipboard("/", ClipboardOp::Cut),
        Err(VfsError::CannotDeleteRoot)
    );
    tree.copy_to_clipboard("/README.md", ClipboardOp::Copy).unwrap();
    assert_eq!(
        tree.paste("/README.md"),
        Err(VfsError::NotADirectory("/README.md".into()))
    );
}

#[test]
fn test_snapshot_round_trip_keeps_identity() {
    let tree = sample();
    let snap = tree.snapshot();
    let rebuilt = VfsTree::from_snapshot(&snap).unwrap();
    assert_eq!(rebuilt.snapshot(), snap);
    assert_eq!(rebuilt.paths(), tree.paths());
}

#[test]
fn test_from_snapshot_rejects_duplicates() {
    let snap = NodeSnapshot::directory(
        "root",
        vec![NodeSnapshot::file("a", ""), NodeSnapshot::file("a", "")],
    );
    assert!(matches!(
        VfsTree::from_snapshot(&snap),
        Err(VfsError::InvalidSnapshot(_))
    ));
    assert!(matches!(
        VfsTree::from_snapshot(&NodeSnapshot::file("a", "")),
        Err(VfsError::InvalidSnapshot(_))
    ));
}

#[test]
fn test_rows_preorder() {
    let tree = sample();
    let rows = tree.rows();
    let names: Vec<_> = rows.iter().map(|r| (r.depth, r.name.as_str())).collect();
    assert_eq!(
        names,
        vec![
            (0, "root"),
            (1, "src"),
            (2, "index.js"),
            (2, "lib"),
            (3, "util.js"),
            (1, "README.md"),
        ]
    );
}

#[test]
fn test_replace_root_drops_selection_and_clipboard() {
    let mut tree = sample();
    tree.select(Some("/src"));
    tree.copy_to_clipboard("/src", ClipboardOp::Copy).unwrap();

    tree.replace_root(VfsTree::with_root_name("project"));
    assert_eq!(tree.root().name(), "project");
    assert_eq!(tree.selected_path(), None);
    assert!(tree.clipboard().is_none());
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_path_of_tracks_moves() {
    let mut tree = sample();
    let id = tree.lookup("/src/lib/util.js").unwrap().id();
    tree.move_node("/src/lib", "/").unwrap();
    assert_eq!(tree.path_of(id).as_deref(), Some("/lib/util.js"));
    tree.delete_node("/lib").unwrap();
    assert_eq!(tree.path_of(id), None);
}
