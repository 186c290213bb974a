//! 虚拟路径工具
//!
//! Pure helpers over canonical VFS paths: absolute, `/`-separated, no trailing
//! slash except the root itself.

pub const ROOT: &str = "/";

/// Parent of `path`, or `None` for the root.
pub fn parent_of(path: &str) -> Option<&str> {
    if path == ROOT {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some(ROOT),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}

pub fn join(dir: &str, name: &str) -> String {
    if dir == ROOT {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// `true` iff `b` is `a` or lives somewhere below it.
pub fn is_ancestor_or_self(a: &str, b: &str) -> bool {
    if a == ROOT {
        return b.starts_with('/');
    }
    b == a || (b.starts_with(a) && b.as_bytes().get(a.len()) == Some(&b'/'))
}

/// Replaces the leading `old_prefix` of `path` with `new_prefix`.
///
/// Paths outside `old_prefix` come back unchanged.
pub fn rewrite_prefix(path: &str, old_prefix: &str, new_prefix: &str) -> String {
    if !is_ancestor_or_self(old_prefix, path) {
        return path.to_string();
    }
    let rest = if old_prefix == ROOT {
        &path[1..]
    } else {
        path[old_prefix.len()..].trim_start_matches('/')
    };
    if rest.is_empty() {
        new_prefix.to_string()
    } else {
        join(new_prefix, rest)
    }
}

pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A node name is a single non-empty segment.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}

#[cfg(test)]
#[path = "../../tests/unit/models/path.rs"]
mod tests;
