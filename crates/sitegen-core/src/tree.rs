//! Hierarchical view of a bundle's flat paths for navigation.

use std::collections::BTreeMap;
use sitegen_types::GeneratedCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A directory segment
    Group { name: String, children: Vec<TreeNode> },
    /// A file; `path` is the full original key in the bundle
    Leaf { name: String, path: String },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Group { name, .. } | TreeNode::Leaf { name, .. } => name,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, TreeNode::Group { .. })
    }
}

/// Root level of the tree. Groups come before leaves at every level, each
/// kind sorted by segment name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    pub roots: Vec<TreeNode>,
}

impl FileTree {
    pub fn build(code: &GeneratedCode) -> Self {
        let mut root = Level::default();
        for path in code.paths() {
            let segments: Vec<&str> = path.split('/').collect();
            let (file, dirs) = match segments.split_last() {
                Some(split) => split,
                None => continue,
            };
            let level = dirs.iter().fold(&mut root, |level, dir| {
                level.groups.entry(dir.to_string()).or_default()
            });
            level.leaves.insert(file.to_string(), path.to_string());
        }
        Self {
            roots: root.into_nodes(),
        }
    }

    /// Full paths in display order (depth-first).
    pub fn leaf_paths(&self) -> Vec<&str> {
        fn walk<'a>(nodes: &'a [TreeNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                match node {
                    TreeNode::Group { children, .. } => walk(children, out),
                    TreeNode::Leaf { path, .. } => out.push(path),
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.roots, &mut out);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Builder for one directory level. Files and folders with the same name
/// are kept apart so neither shadows the other.
#[derive(Default)]
struct Level {
    groups: BTreeMap<String, Level>,
    leaves: BTreeMap<String, String>,
}

impl Level {
    fn into_nodes(self) -> Vec<TreeNode> {
        let groups = self.groups.into_iter().map(|(name, level)| TreeNode::Group {
            name,
            children: level.into_nodes(),
        });
        let leaves = self
            .leaves
            .into_iter()
            .map(|(name, path)| TreeNode::Leaf { name, path });
        groups.chain(leaves).collect()
    }
}
