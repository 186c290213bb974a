use super::*;

#[test]
fn test_parent_of() {
    assert_eq!(parent_of("/"), None);
    assert_eq!(parent_of("/src"), Some("/"));
    assert_eq!(parent_of("/src/lib/a.rs"), Some("/src/lib"));
}

#[test]
fn test_join() {
    assert_eq!(join("/", "src"), "/src");
    assert_eq!(join("/src", "main.rs"), "/src/main.rs");
}

#[test]
fn test_is_ancestor_or_self() {
    assert!(is_ancestor_or_self("/", "/"));
    assert!(is_ancestor_or_self("/", "/a/b"));
    assert!(is_ancestor_or_self("/a", "/a"));
    assert!(is_ancestor_or_self("/a", "/a/b/c"));
    assert!(!is_ancestor_or_self("/a", "/ab"));
    assert!(!is_ancestor_or_self("/a/b", "/a"));
}

#[test]
fn test_rewrite_prefix() {
    assert_eq!(rewrite_prefix("/notes/a.md", "/notes", "/tasks"), "/tasks/a.md");
    assert_eq!(rewrite_prefix("/notes", "/notes", "/tasks"), "/tasks");
    assert_eq!(rewrite_prefix("/notesx/a.md", "/notes", "/tasks"), "/notesx/a.md");
    assert_eq!(rewrite_prefix("/a/b", "/a", "/"), "/b");
}

#[test]
fn test_basename_and_segments() {
    assert_eq!(basename("/src/index.js"), "index.js");
    assert_eq!(basename("/"), "");
    assert_eq!(segments("/src/lib").collect::<Vec<_>>(), vec!["src", "lib"]);
    assert_eq!(segments("/").count(), 0);
}

#[test]
fn test_is_valid_name() {
    for name in ["a", "x.js", ".env", "with space"] {
        assert!(is_valid_name(name), "{name}");
    }
    for name in ["", ".", "..", "a/b"] {
        assert!(!is_valid_name(name), "{name:?}");
    }
}

mod laws {
    use super::super::*;
    use proptest::prelude::*;

    fn name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9._-]{0,6}"
    }

    fn vpath() -> impl Strategy<Value = String> {
        proptest::collection::vec(name(), 0..5).prop_map(|parts| {
            parts.iter().fold(ROOT.to_string(), |acc, p| join(&acc, p))
        })
    }

    proptest! {
        #[test]
        fn join_then_split(dir in vpath(), leaf in name()) {
            let p = join(&dir, &leaf);
            prop_assert_eq!(parent_of(&p), Some(dir.as_str()));
            prop_assert_eq!(basename(&p), leaf.as_str());
            prop_assert!(is_ancestor_or_self(&dir, &p));
            prop_assert!(!is_ancestor_or_self(&p, &dir));
        }

        #[test]
        fn rewrite_moves_whole_subtree(base in vpath(), rest in vpath(), to in vpath()) {
            let rest = rest.trim_start_matches('/');
            let p = if rest.is_empty() { base.clone() } else { join(&base, rest) };
            let moved = rewrite_prefix(&p, &base, &to);
            prop_assert!(is_ancestor_or_self(&to, &moved));
            prop_assert_eq!(rewrite_prefix(&moved, &to, &base), p);
        }

        #[test]
        fn segments_rebuild_path(p in vpath()) {
            let rebuilt = segments(&p).fold(ROOT.to_string(), |acc, s| join(&acc, s));
            prop_assert_eq!(rebuilt, p);
        }
    }
}
