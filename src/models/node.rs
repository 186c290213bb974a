use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

// arena key; only meaningful inside one VfsTree
new_key_type! { pub struct NodeId; }

/// Stable node identity, survives persistence and never gets reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeUid(Uuid);

impl NodeUid {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeUid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

pub fn now_millis() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

/// Last dot-segment of `name`, empty when there is no dot.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => "",
    }
}

/// Owned, recursive value copy of a subtree.
///
/// Used for clipboard contents, persistence and import staging. Paths and
/// extensions are derived, so neither is stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeSnapshot {
    File {
        id: NodeUid,
        name: CompactString,
        #[serde(default)]
        content: String,
        created_at: Timestamp,
        modified_at: Timestamp,
    },
    Directory {
        id: NodeUid,
        name: CompactString,
        #[serde(default)]
        children: Vec<NodeSnapshot>,
        created_at: Timestamp,
        modified_at: Timestamp,
    },
}

impl NodeSnapshot {
    pub fn file(name: impl Into<CompactString>, content: impl Into<String>) -> Self {
        let now = now_millis();
        NodeSnapshot::File {
            id: NodeUid::new(),
            name: name.into(),
            content: content.into(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn directory(name: impl Into<CompactString>, children: Vec<NodeSnapshot>) -> Self {
        let now = now_millis();
        NodeSnapshot::Directory {
            id: NodeUid::new(),
            name: name.into(),
            children,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn id(&self) -> NodeUid {
        match self {
            NodeSnapshot::File { id, .. } | NodeSnapshot::Directory { id, .. } => *id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NodeSnapshot::File { name, .. } | NodeSnapshot::Directory { name, .. } => name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeSnapshot::File { .. } => NodeKind::File,
            NodeSnapshot::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        match self {
            NodeSnapshot::File { name, .. } => Some(extension_of(name)),
            NodeSnapshot::Directory { .. } => None,
        }
    }

    pub fn children(&self) -> &[NodeSnapshot] {
        match self {
            NodeSnapshot::File { .. } => &[],
            NodeSnapshot::Directory { children, .. } => children,
        }
    }

    /// Number of nodes in the subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(NodeSnapshot::node_count)
            .sum::<usize>()
    }
}
