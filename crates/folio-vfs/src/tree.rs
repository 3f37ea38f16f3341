//! Arena-backed file tree and path resolution.
//!
//! Nodes live in a single `Vec`; parents and children reference each other
//! by index. The arena is append-only during construction and frozen
//! afterwards, so the tree is trivially acyclic and safe to share
//! read-only across a whole session.

use folio_types::error::{FolioError, Result};

/// Index of a node within its [`FileTree`].
///
/// Only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A single named node: directory or leaf.
#[derive(Debug, Clone)]
pub struct FileNode {
    name: String,
    content_ref: Option<String>,
    is_runnable: bool,
    is_directory: bool,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl FileNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque locator displayed when the node is opened.
    pub fn content_ref(&self) -> Option<&str> {
        self.content_ref.as_deref()
    }

    pub fn is_runnable(&self) -> bool {
        self.is_runnable
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Display name: directories carry a trailing `/`.
    pub fn display_name(&self) -> String {
        if self.is_directory {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Reject the tokens that path resolution gives meaning to.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(FolioError::Tree(format!("reserved node name: {name:?}")));
    }
    if name.contains('/') {
        return Err(FolioError::Tree(format!(
            "node name contains '/': {name:?}"
        )));
    }
    Ok(())
}

/// Incremental constructor for a [`FileTree`].
///
/// All structural invariants are enforced here, so a finished tree never
/// needs to re-check them at resolution time.
#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<FileNode>,
}

impl TreeBuilder {
    /// Start a tree whose root directory is called `root_name`.
    pub fn new(root_name: &str) -> Result<Self> {
        validate_name(root_name)?;
        Ok(Self {
            nodes: vec![FileNode {
                name: root_name.to_string(),
                content_ref: None,
                is_runnable: false,
                is_directory: true,
                children: Vec::new(),
                parent: None,
            }],
        })
    }

    /// The root node's id (valid from construction on).
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Add a directory under `parent`.
    pub fn dir(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.insert(parent, name, None, false, true)
    }

    /// Add a leaf under `parent`.
    pub fn leaf(
        &mut self,
        parent: NodeId,
        name: &str,
        content_ref: Option<&str>,
        is_runnable: bool,
    ) -> Result<NodeId> {
        self.insert(parent, name, content_ref, is_runnable, false)
    }

    pub(crate) fn insert(
        &mut self,
        parent: NodeId,
        name: &str,
        content_ref: Option<&str>,
        is_runnable: bool,
        is_directory: bool,
    ) -> Result<NodeId> {
        validate_name(name)?;
        let parent_node = self
            .nodes
            .get(parent.0)
            .ok_or_else(|| FolioError::Tree(format!("no such parent node: {parent:?}")))?;
        if !parent_node.is_directory {
            return Err(FolioError::Tree(format!(
                "cannot add {name:?} under leaf {:?}",
                parent_node.name
            )));
        }
        if parent_node
            .children
            .iter()
            .any(|&c| self.nodes[c.0].name == name)
        {
            return Err(FolioError::Tree(format!(
                "duplicate sibling name {name:?} under {:?}",
                parent_node.name
            )));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(FileNode {
            name: name.to_string(),
            content_ref: content_ref.map(str::to_string),
            is_runnable,
            is_directory,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Freeze the builder into an immutable tree.
    pub fn finish(self) -> FileTree {
        FileTree { nodes: self.nodes }
    }
}

/// The immutable virtual file tree.
#[derive(Debug, Clone)]
pub struct FileTree {
    nodes: Vec<FileNode>,
}

impl FileTree {
    /// The root node. Every tree has exactly one.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &FileNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of `id` in construction order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0].children.iter().copied()
    }

    /// Exact-match child lookup (case-sensitive).
    pub fn child_by_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id).find(|&c| self.nodes[c.0].name == name)
    }

    /// Resolve a slash-delimited path relative to `from`.
    ///
    /// Empty segments and `"."` are no-ops; `".."` moves to the parent and
    /// clamps at the root; anything else is an exact child-name match. The
    /// first segment that fails to match fails the whole resolution -- no
    /// partial result. An empty path resolves to `from` itself.
    pub fn resolve(&self, path: &str, from: NodeId) -> Option<NodeId> {
        let mut cur = from;
        for segment in path.split('/') {
            match segment {
                "" | "." => {},
                ".." => cur = self.nodes[cur.0].parent.unwrap_or(cur),
                name => cur = self.child_by_name(cur, name)?,
            }
        }
        Some(cur)
    }

    /// Path for prompt display: `~` for root, `~/a/b` below it.
    pub fn display_path(&self, id: NodeId) -> String {
        let mut segments: Vec<&str> = Vec::new();
        let mut cur = id;
        while let Some(parent) = self.nodes[cur.0].parent {
            segments.push(&self.nodes[cur.0].name);
            cur = parent;
        }
        if segments.is_empty() {
            "~".to_string()
        } else {
            segments.reverse();
            format!("~/{}", segments.join("/"))
        }
    }

    /// Every externally routable path: all directories plus all runnable
    /// leaves that carry a content reference, as slash-joined paths from
    /// the root (root itself excluded). Used by the static-export layer
    /// to pre-render one route per node.
    pub fn routable_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_routable(self.root(), &mut Vec::new(), &mut paths);
        paths
    }

    fn collect_routable<'a>(
        &'a self,
        id: NodeId,
        prefix: &mut Vec<&'a str>,
        out: &mut Vec<String>,
    ) {
        for child in self.children(id) {
            let node = &self.nodes[child.0];
            prefix.push(&node.name);
            if node.is_directory {
                out.push(prefix.join("/"));
                self.collect_routable(child, prefix, out);
            } else if node.is_runnable && node.content_ref.is_some() {
                out.push(prefix.join("/"));
            }
            prefix.pop();
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
