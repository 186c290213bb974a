//! 虚拟文件树
//!
//! Nodes live in a `SlotMap` arena and only store their own name and a parent
//! link; full paths are computed from the parent chain on every read, so a
//! rename or move never leaves a stale descendant path behind.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use super::error::VfsError;
use super::node::{extension_of, now_millis, NodeId, NodeKind, NodeSnapshot, NodeUid, Timestamp};
use super::path;
use super::selection::{ClipboardEntry, ClipboardOp, Selection};

pub const DEFAULT_ROOT_NAME: &str = "root";

#[derive(Debug, Clone)]
struct Node {
    uid: NodeUid,
    kind: NodeKind,
    name: CompactString,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    content: String,
    created_at: Timestamp,
    modified_at: Timestamp,
}

impl Node {
    fn new_file(name: CompactString, content: String) -> Self {
        let now = now_millis();
        Self {
            uid: NodeUid::new(),
            kind: NodeKind::File,
            name,
            parent: None,
            children: Vec::new(),
            content,
            created_at: now,
            modified_at: now,
        }
    }

    fn new_dir(name: CompactString) -> Self {
        let now = now_millis();
        Self {
            uid: NodeUid::new(),
            kind: NodeKind::Directory,
            name,
            parent: None,
            children: Vec::new(),
            content: String::new(),
            created_at: now,
            modified_at: now,
        }
    }
}

/// How `instantiate` treats ids and timestamps found in a snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Identity {
    Preserve,
    Fresh,
}

pub struct VfsTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
    id_by_uid: FxHashMap<NodeUid, NodeId>,
    selection: Selection,
    clipboard: Option<ClipboardEntry>,
}

impl Default for VfsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VfsTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VfsTree")
            .field("nodes", &self.arena.len())
            .field("selected", &self.selection.path())
            .field("clipboard", &self.clipboard.as_ref().map(|c| (c.op, &c.source_path)))
            .finish()
    }
}

impl VfsTree {
    pub fn new() -> Self {
        Self::with_root_name(DEFAULT_ROOT_NAME)
    }

    pub fn with_root_name(name: &str) -> Self {
        let mut arena = SlotMap::with_key();
        let root_node = Node::new_dir(name.into());
        let uid = root_node.uid;
        let root = arena.insert(root_node);

        let mut id_by_uid = FxHashMap::default();
        id_by_uid.insert(uid, root);

        Self {
            arena,
            root,
            id_by_uid,
            selection: Selection::default(),
            clipboard: None,
        }
    }

    /// Rebuilds a tree from a full snapshot, keeping ids and timestamps.
    pub fn from_snapshot(root: &NodeSnapshot) -> Result<Self, VfsError> {
        let NodeSnapshot::Directory {
            id,
            name,
            children,
            created_at,
            modified_at,
        } = root
        else {
            return Err(VfsError::InvalidSnapshot("root must be a directory".into()));
        };
        if name.is_empty() || name.contains('/') {
            return Err(VfsError::InvalidSnapshot(format!("bad root name {name:?}")));
        }

        let mut tree = Self::with_root_name(name);
        let root_id = tree.root;
        let placeholder = tree.arena[root_id].uid;
        tree.id_by_uid.remove(&placeholder);
        tree.id_by_uid.insert(*id, root_id);
        if let Some(node) = tree.arena.get_mut(root_id) {
            node.uid = *id;
            node.created_at = *created_at;
        }

        for child in children {
            tree.instantiate(root_id, child, None, Identity::Preserve)?;
        }
        // instantiate bumps the parent; restore what the snapshot recorded
        if let Some(node) = tree.arena.get_mut(root_id) {
            node.modified_at = *modified_at;
        }
        Ok(tree)
    }

    /// Restores the selection and clipboard that were persisted alongside
    /// the tree.
    pub fn restore(mut self, selected: Option<String>, clipboard: Option<ClipboardEntry>) -> Self {
        self.selection.set(selected);
        self.clipboard = clipboard;
        self
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        self.snapshot_of(self.root)
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: self.root,
            node: &self.arena[self.root],
        }
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn lookup(&self, path: &str) -> Option<NodeRef<'_>> {
        let id = self.resolve(path)?;
        Some(NodeRef {
            tree: self,
            id,
            node: self.arena.get(id)?,
        })
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_some()
    }

    /// Current path of the live node with stable id `uid`.
    pub fn path_of(&self, uid: NodeUid) -> Option<String> {
        self.id_by_uid.get(&uid).map(|&id| self.full_path(id))
    }

    /// Every path in the tree, parents before children, siblings in
    /// insertion order.
    pub fn paths(&self) -> Vec<String> {
        self.rows().into_iter().map(|row| row.path).collect()
    }

    pub fn create_file(
        &mut self,
        parent_path: &str,
        name: &str,
        content: impl Into<String>,
    ) -> Result<String, VfsError> {
        let parent = self.check_insert(parent_path, name)?;
        let id = self.arena.insert(Node::new_file(name.into(), content.into()));
        self.register(id);
        self.attach(parent, id);

        let path = self.full_path(id);
        tracing::debug!(path = %path, "file created");
        Ok(path)
    }

    pub fn create_directory(&mut self, parent_path: &str, name: &str) -> Result<String, VfsError> {
        let parent = self.check_insert(parent_path, name)?;
        let id = self.arena.insert(Node::new_dir(name.into()));
        self.register(id);
        self.attach(parent, id);

        let path = self.full_path(id);
        tracing::debug!(path = %path, "directory created");
        Ok(path)
    }

    /// Removes the node and its whole subtree. Returns the removed path.
    pub fn delete_node(&mut self, path: &str) -> Result<String, VfsError> {
        let id = self
            .resolve(path)
            .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
        if id == self.root {
            return Err(VfsError::CannotDeleteRoot);
        }

        let removed = self.full_path(id);
        self.detach(id);
        let count = self.recursive_remove(id);
        self.selection.clear_if_under(&removed);

        tracing::debug!(path = %removed, nodes = count, "node deleted");
        Ok(removed)
    }

    pub fn rename_node(&mut self, path: &str, new_name: &str) -> Result<String, VfsError> {
        let id = self
            .resolve(path)
            .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
        if id == self.root {
            return Err(VfsError::CannotRenameRoot);
        }
        if !path::is_valid_name(new_name) {
            return Err(VfsError::InvalidName(new_name.to_string()));
        }

        let (parent, old_name) = {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
            (node.parent, node.name.clone())
        };
        let old_path = self.full_path(id);
        if old_name == new_name {
            return Ok(old_path);
        }

        if let Some(parent_id) = parent {
            if self.child_named(parent_id, new_name).is_some() {
                return Err(VfsError::NameCollision {
                    dir: self.full_path(parent_id),
                    name: new_name.to_string(),
                });
            }
            self.touch(parent_id);
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.name = new_name.into();
            node.modified_at = now_millis();
        }

        let new_path = self.full_path(id);
        self.selection.rewrite_prefix(&old_path, &new_path);
        tracing::debug!(from = %old_path, to = %new_path, "node renamed");
        Ok(new_path)
    }

    /// Detaches `source_path` and reattaches it under `target_dir_path` in
    /// one step. Collisions are reported, never auto-renamed.
    pub fn move_node(&mut self, source_path: &str, target_dir_path: &str) -> Result<String, VfsError> {
        let source = self
            .resolve(source_path)
            .ok_or_else(|| VfsError::SourceNotFound(source_path.to_string()))?;
        let target = self
            .resolve(target_dir_path)
            .ok_or_else(|| VfsError::TargetNotFound(target_dir_path.to_string()))?;
        if !self.is_dir(target) {
            return Err(VfsError::NotADirectory(target_dir_path.to_string()));
        }
        if source == self.root || self.is_ancestor_or_self(source, target) {
            return Err(VfsError::InvalidTarget {
                from: source_path.to_string(),
                into: target_dir_path.to_string(),
            });
        }

        let name = self
            .arena
            .get(source)
            .map(|n| n.name.clone())
            .ok_or_else(|| VfsError::SourceNotFound(source_path.to_string()))?;
        if self.child_named(target, &name).is_some() {
            return Err(VfsError::NameCollision {
                dir: self.full_path(target),
                name: name.to_string(),
            });
        }

        let old_path = self.full_path(source);
        self.detach(source);
        self.attach(target, source);
        self.touch(source);

        let new_path = self.full_path(source);
        self.selection.rewrite_prefix(&old_path, &new_path);
        tracing::debug!(from = %old_path, to = %new_path, "node moved");
        Ok(new_path)
    }

    /// Replaces a file's content. Stale paths and directories are ignored;
    /// returns whether anything was written.
    pub fn update_file_content(&mut self, path: &str, content: impl Into<String>) -> bool {
        let Some(id) = self.resolve(path) else {
            return false;
        };
        match self.arena.get_mut(id) {
            Some(node) if node.kind == NodeKind::File => {
                node.content = content.into();
                node.modified_at = now_millis();
                true
            }
            _ => false,
        }
    }

    pub fn select(&mut self, path: Option<&str>) -> bool {
        self.selection.set(path.map(str::to_string))
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selection.path()
    }

    /// The selected node, if the selected path still resolves.
    pub fn selected(&self) -> Option<NodeRef<'_>> {
        self.selection.path().and_then(|p| self.lookup(p))
    }

    pub fn clipboard(&self) -> Option<&ClipboardEntry> {
        self.clipboard.as_ref()
    }

    pub fn clear_clipboard(&mut self) -> bool {
        self.clipboard.take().is_some()
    }

    pub fn copy_to_clipboard(&mut self, path: &str, op: ClipboardOp) -> Result<(), VfsError> {
        let id = self
            .resolve(path)
            .ok_or_else(|| VfsError::NotFound(path.to_string()))?;
        if op == ClipboardOp::Cut && id == self.root {
            return Err(VfsError::CannotDeleteRoot);
        }

        let snapshot = self.snapshot_of(id);
        let source_path = self.full_path(id);
        tracing::debug!(path = %source_path, ?op, "clipboard written");
        self.clipboard = Some(ClipboardEntry {
            op,
            source_id: snapshot.id(),
            source_path,
            snapshot,
        });
        Ok(())
    }

    /// Inserts the clipboard snapshot into `target_dir_path`, renaming to
    /// `name (n)` / `base (n).ext` on collision. A cut entry also removes the
    /// original and empties the clipboard.
    pub fn paste(&mut self, target_dir_path: &str) -> Result<String, VfsError> {
        let target = self
            .resolve(target_dir_path)
            .ok_or_else(|| VfsError::TargetNotFound(target_dir_path.to_string()))?;
        if !self.is_dir(target) {
            return Err(VfsError::NotADirectory(target_dir_path.to_string()));
        }
        let entry = self.clipboard.as_ref().ok_or(VfsError::EmptyClipboard)?;

        let live_source = if entry.is_cut() {
            self.id_by_uid.get(&entry.source_id).copied()
        } else {
            None
        };
        if let Some(source) = live_source {
            if self.is_ancestor_or_self(source, target) {
                return Err(VfsError::InvalidTarget {
                    from: self.full_path(source),
                    into: target_dir_path.to_string(),
                });
            }
            if self.arena.get(source).and_then(|n| n.parent) == Some(target) {
                let path = self.full_path(source);
                self.clipboard = None;
                return Ok(path);
            }
        }

        let name = self.unique_child_name(target, &entry.snapshot);
        let snapshot = entry.snapshot.clone();
        let is_cut = entry.is_cut();

        let new_id = self.instantiate(target, &snapshot, Some(name), Identity::Fresh)?;
        let new_path = self.full_path(new_id);

        if is_cut {
            if let Some(source) = live_source {
                let removed = self.full_path(source);
                self.detach(source);
                self.recursive_remove(source);
                self.selection.clear_if_under(&removed);
            }
            self.clipboard = None;
        }

        tracing::debug!(path = %new_path, cut = is_cut, "clipboard pasted");
        Ok(new_path)
    }

    /// Swaps in a whole new tree. Selection and clipboard refer to the old
    /// tree, so both are dropped.
    pub fn replace_root(&mut self, other: VfsTree) {
        self.arena = other.arena;
        self.root = other.root;
        self.id_by_uid = other.id_by_uid;
        self.selection.clear();
        self.clipboard = None;
        tracing::info!(nodes = self.arena.len(), "tree replaced");
    }

    fn resolve(&self, path: &str) -> Option<NodeId> {
        if !path.starts_with('/') {
            return None;
        }
        let mut current = self.root;
        for segment in path::segments(path) {
            current = self.child_named(current, segment)?;
        }
        Some(current)
    }

    fn child_named(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.arena
            .get(dir)?
            .children
            .iter()
            .copied()
            .find(|&child| self.arena.get(child).is_some_and(|n| n.name == name))
    }

    fn is_dir(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .is_some_and(|n| n.kind == NodeKind::Directory)
    }

    fn full_path(&self, id: NodeId) -> String {
        let mut components = Vec::new();
        let mut current = id;
        while let Some(node) = self.arena.get(current) {
            match node.parent {
                Some(parent) => {
                    components.push(node.name.as_str());
                    current = parent;
                }
                None => break,
            }
        }

        if components.is_empty() {
            return path::ROOT.to_string();
        }
        let mut path = String::new();
        for comp in components.iter().rev() {
            path.push('/');
            path.push_str(comp);
        }
        path
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut descendant: NodeId) -> bool {
        loop {
            if descendant == ancestor {
                return true;
            }
            match self.arena.get(descendant).and_then(|n| n.parent) {
                Some(parent) => descendant = parent,
                None => return false,
            }
        }
    }

    fn check_insert(&self, parent_path: &str, name: &str) -> Result<NodeId, VfsError> {
        let parent = self
            .resolve(parent_path)
            .filter(|&id| self.is_dir(id))
            .ok_or_else(|| VfsError::ParentNotFound(parent_path.to_string()))?;
        if !path::is_valid_name(name) {
            return Err(VfsError::InvalidName(name.to_string()));
        }
        if self.child_named(parent, name).is_some() {
            return Err(VfsError::NameCollision {
                dir: self.full_path(parent),
                name: name.to_string(),
            });
        }
        Ok(parent)
    }

    fn register(&mut self, id: NodeId) {
        if let Some(node) = self.arena.get(id) {
            self.id_by_uid.insert(node.uid, id);
        }
    }

    fn touch(&mut self, id: NodeId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.modified_at = now_millis();
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
            node.modified_at = now_millis();
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.arena.get_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.retain(|&c| c != id);
            node.modified_at = now_millis();
        }
    }

    fn recursive_remove(&mut self, id: NodeId) -> usize {
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            if let Some(node) = self.arena.remove(node_id) {
                self.id_by_uid.remove(&node.uid);
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    fn snapshot_of(&self, id: NodeId) -> NodeSnapshot {
        let node = &self.arena[id];
        match node.kind {
            NodeKind::File => NodeSnapshot::File {
                id: node.uid,
                name: node.name.clone(),
                content: node.content.clone(),
                created_at: node.created_at,
                modified_at: node.modified_at,
            },
            NodeKind::Directory => NodeSnapshot::Directory {
                id: node.uid,
                name: node.name.clone(),
                children: node
                    .children
                    .iter()
                    .filter(|&&c| self.arena.contains_key(c))
                    .map(|&c| self.snapshot_of(c))
                    .collect(),
                created_at: node.created_at,
                modified_at: node.modified_at,
            },
        }
    }

    /// Builds `snapshot` under `parent`. With `Identity::Preserve` a bad
    /// snapshot is rejected; callers that need atomicity must instantiate
    /// into a scratch tree first.
    fn instantiate(
        &mut self,
        parent: NodeId,
        snapshot: &NodeSnapshot,
        rename: Option<CompactString>,
        identity: Identity,
    ) -> Result<NodeId, VfsError> {
        let name = rename.unwrap_or_else(|| snapshot.name().into());
        if identity == Identity::Preserve {
            if !path::is_valid_name(&name) {
                return Err(VfsError::InvalidSnapshot(format!("bad name {name:?}")));
            }
            if self.child_named(parent, &name).is_some() {
                return Err(VfsError::InvalidSnapshot(format!(
                    "duplicate name {name:?} in {}",
                    self.full_path(parent)
                )));
            }
            if self.id_by_uid.contains_key(&snapshot.id()) {
                return Err(VfsError::InvalidSnapshot(format!(
                    "duplicate id {}",
                    snapshot.id()
                )));
            }
        }

        let mut node = match snapshot {
            NodeSnapshot::File { content, .. } => Node::new_file(name, content.clone()),
            NodeSnapshot::Directory { .. } => Node::new_dir(name),
        };
        if identity == Identity::Preserve {
            let (uid, created_at, modified_at) = match snapshot {
                NodeSnapshot::File {
                    id,
                    created_at,
                    modified_at,
                    ..
                }
                | NodeSnapshot::Directory {
                    id,
                    created_at,
                    modified_at,
                    ..
                } => (*id, *created_at, *modified_at),
            };
            node.uid = uid;
            node.created_at = created_at;
            node.modified_at = modified_at;
        }

        let id = self.arena.insert(node);
        self.register(id);
        self.attach(parent, id);

        for child in snapshot.children() {
            self.instantiate(id, child, None, identity)?;
        }
        if identity == Identity::Preserve {
            // children were attached after the node, which bumped it
            if let Some(node) = self.arena.get_mut(id) {
                node.modified_at = snapshot_modified_at(snapshot);
            }
        }
        Ok(id)
    }

    fn unique_child_name(&self, dir: NodeId, snapshot: &NodeSnapshot) -> CompactString {
        let name = snapshot.name();
        if self.child_named(dir, name).is_none() {
            return name.into();
        }

        // dotfiles like `.env` have no base to put the counter in front of
        let split = match snapshot.kind() {
            NodeKind::File if !extension_of(name).is_empty() => {
                name.rfind('.').filter(|&idx| idx > 0)
            }
            _ => None,
        };

        let mut counter = 1usize;
        loop {
            let candidate = match split {
                Some(idx) => format!("{} ({counter}).{}", &name[..idx], &name[idx + 1..]),
                None => format!("{name} ({counter})"),
            };
            if self.child_named(dir, &candidate).is_none() {
                return candidate.into();
            }
            counter += 1;
        }
    }
}

fn snapshot_modified_at(snapshot: &NodeSnapshot) -> Timestamp {
    match snapshot {
        NodeSnapshot::File { modified_at, .. } | NodeSnapshot::Directory { modified_at, .. } => {
            *modified_at
        }
    }
}

/// Borrowed view of one live node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a VfsTree,
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeUid {
        self.node.uid
    }

    pub fn name(&self) -> &'a str {
        &self.node.name
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind
    }

    pub fn is_dir(&self) -> bool {
        self.node.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.node.kind == NodeKind::File
    }

    pub fn path(&self) -> String {
        self.tree.full_path(self.id)
    }

    pub fn content(&self) -> Option<&'a str> {
        self.is_file().then_some(self.node.content.as_str())
    }

    pub fn extension(&self) -> Option<&'a str> {
        self.is_file().then(|| extension_of(&self.node.name))
    }

    pub fn created_at(&self) -> Timestamp {
        self.node.created_at
    }

    pub fn modified_at(&self) -> Timestamp {
        self.node.modified_at
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.node.children.iter().filter_map(move |&id| {
            tree.arena.get(id).map(|node| NodeRef { tree, id, node })
        })
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        self.tree.snapshot_of(self.id)
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("path", &self.path())
            .field("kind", &self.node.kind)
            .field("id", &self.node.uid)
            .finish()
    }
}

/// 渲染用的扁平化行结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: u16,
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
}

impl VfsTree {
    /// Pre-order rows for display, root first at depth 0.
    pub fn rows(&self) -> Vec<TreeRow> {
        let mut result = Vec::with_capacity(self.arena.len());
        let mut stack: Vec<(NodeId, u16)> = vec![(self.root, 0)];

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            result.push(TreeRow {
                depth,
                name: node.name.to_string(),
                path: self.full_path(id),
                kind: node.kind,
            });
            for &child in node.children.iter().rev() {
                stack.push((child, depth.saturating_add(1)));
            }
        }

        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/vfs_tree.rs"]
mod tests;
