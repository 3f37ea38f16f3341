//! Route-to-directory bridge.
//!
//! The embedding page keeps its URL in sync with the session: navigating
//! to `/projects/demo?w=800` must behave like landing in that directory
//! or opening that file. Resolution always starts at the root, and an
//! unresolvable route falls back there.

use folio_types::output::OutputMessage;
use folio_vfs::{FileTree, NodeId};

use crate::interpreter::{Action, with_args_query};

/// Outcome of applying an external route to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteChange {
    /// Directory the session lands in.
    pub new_dir: NodeId,
    pub output: Vec<OutputMessage>,
    pub action: Option<Action>,
}

/// Apply a slash-delimited external path plus decoded query parameters.
///
/// A directory becomes the current directory. A runnable leaf emits an
/// opening message and an open action, with each query pair forwarded as
/// a `-key value` argument; the session lands in the leaf's parent. Any
/// other leaf just lands in its parent. An unresolved path reports an
/// error and falls back to the root.
pub fn route_change(tree: &FileTree, path: &str, query: &[(String, String)]) -> RouteChange {
    let root = tree.root();
    let Some(target) = tree.resolve(path, root) else {
        log::warn!("route fell back to root: {path:?} did not resolve");
        return RouteChange {
            new_dir: root,
            output: vec![OutputMessage::error(format!(
                "cd: no such file or directory: /{path}"
            ))],
            action: None,
        };
    };

    let node = tree.node(target);
    if node.is_directory() {
        return RouteChange {
            new_dir: target,
            output: Vec::new(),
            action: None,
        };
    }

    let parent = tree.parent(target).unwrap_or(root);
    if node.is_runnable()
        && let Some(content_ref) = node.content_ref()
    {
        return RouteChange {
            new_dir: parent,
            output: vec![OutputMessage::normal(format!(
                "Opening {}...",
                node.name()
            ))],
            action: Some(Action::Open {
                content_ref: with_args_query(content_ref, &query_args(query)),
            }),
        };
    }

    RouteChange {
        new_dir: parent,
        output: Vec::new(),
        action: None,
    }
}

/// `[(w, 800), (h, 600)]` becomes `["-w", "800", "-h", "600"]`.
fn query_args(query: &[(String, String)]) -> Vec<String> {
    let mut args = Vec::with_capacity(query.len() * 2);
    for (key, value) in query {
        args.push(format!("-{key}"));
        args.push(value.clone());
    }
    args
}
