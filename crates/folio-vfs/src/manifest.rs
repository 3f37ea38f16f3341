//! Declarative site manifest.
//!
//! The content tree is described once, in a small TOML or JSON document,
//! and loaded before any command executes. Loading is the only moment the
//! crate touches the real filesystem; a malformed document fails startup
//! instead of surfacing during command execution.

use std::path::Path;

use serde::Deserialize;

use folio_types::error::{FolioError, Result};

use crate::tree::{FileTree, TreeBuilder};

/// One node in the manifest document.
///
/// JSON documents may use camelCase field spellings.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub name: String,
    /// Content reference opened when the node is run. An empty string
    /// counts as absent.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, alias = "isExecutable")]
    pub is_executable: bool,
    #[serde(default, alias = "isDirectory")]
    pub is_directory: bool,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

/// A parsed site manifest: terminal welcome lines plus the content tree.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Lines shown on startup and after `clear`.
    #[serde(default)]
    pub welcome: Vec<String>,
    pub root: NodeSpec,
}

impl Manifest {
    /// Parse a TOML manifest document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| FolioError::Manifest(format!("TOML manifest: {e}")))
    }

    /// Parse a JSON manifest document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source)
            .map_err(|e| FolioError::Manifest(format!("JSON manifest: {e}")))
    }

    /// Load a manifest from disk, dispatching on the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "toml" => Self::from_toml_str(&source),
            "json" => Self::from_json_str(&source),
            other => Err(FolioError::Manifest(format!(
                "unsupported manifest extension: {other:?} ({})",
                path.display()
            ))),
        }
    }

    /// Build the immutable file tree this manifest describes.
    ///
    /// Structural defects (non-directory root, leaf with children,
    /// reserved or duplicate names) are reported here and abort startup.
    pub fn build_tree(&self) -> Result<FileTree> {
        if !self.root.is_directory {
            return Err(FolioError::Manifest(format!(
                "root node {:?} must be a directory",
                self.root.name
            )));
        }
        let mut builder = TreeBuilder::new(&self.root.name)?;
        let root = builder.root();
        for child in &self.root.children {
            add_spec(&mut builder, root, child)?;
        }
        let tree = builder.finish();
        log::debug!(
            "built content tree: {} nodes, {} routable paths",
            tree.len(),
            tree.routable_paths().len()
        );
        Ok(tree)
    }
}

fn add_spec(
    builder: &mut TreeBuilder,
    parent: crate::tree::NodeId,
    spec: &NodeSpec,
) -> Result<()> {
    if !spec.is_directory && !spec.children.is_empty() {
        return Err(FolioError::Manifest(format!(
            "leaf node {:?} cannot have children",
            spec.name
        )));
    }
    let content_ref = spec.url.as_deref().filter(|u| !u.is_empty());
    let id = builder.insert(
        parent,
        &spec.name,
        content_ref,
        spec.is_executable,
        spec.is_directory,
    )?;
    for child in &spec.children {
        add_spec(builder, id, child)?;
    }
    Ok(())
}
