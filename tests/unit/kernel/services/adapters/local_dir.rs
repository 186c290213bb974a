use super::*;

fn fixture() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::create_dir_all(root.join(".git")).unwrap();
    std::fs::write(root.join("b.txt"), "b").unwrap();
    std::fs::write(root.join("a.txt"), "a").unwrap();
    std::fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
    std::fs::write(root.join("blob.bin"), [0xff, 0xfe, 0x00]).unwrap();
    tmp
}

#[tokio::test]
async fn test_values_sorted_and_ignored() {
    let tmp = fixture();
    let handle = LocalDirectoryHandle::open(tmp.path()).with_ignore(vec![".git".into()]);

    let entries = handle.values().await.unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "blob.bin", "src"]);
    assert_eq!(entries[3].kind, EntryKind::Directory);
    assert_eq!(entries[0].kind, EntryKind::File);
}

#[tokio::test]
async fn test_descend_and_read() {
    let tmp = fixture();
    let handle = LocalDirectoryHandle::open(tmp.path());
    let src = handle.get_directory_handle("src").await.unwrap();
    assert_eq!(src.name(), "src");
    assert_eq!(src.read_file_text("main.rs").await.unwrap(), "fn main() {}");
}

#[tokio::test]
async fn test_read_errors() {
    let tmp = fixture();
    let handle = LocalDirectoryHandle::open(tmp.path());
    assert!(matches!(
        handle.read_file_text("blob.bin").await,
        Err(HandleError::NotText(_))
    ));
    assert!(matches!(
        handle.get_directory_handle("a.txt").await,
        Err(HandleError::NotFound(_))
    ));
    assert!(matches!(
        handle.get_directory_handle("missing").await,
        Err(HandleError::Io(_))
    ));
}

#[test]
fn test_handle_named_after_directory() {
    let handle = LocalDirectoryHandle::open("/tmp/project");
    assert_eq!(handle.name(), "project");
}
