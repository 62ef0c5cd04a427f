//! Selection merging for drag-and-drop imports
//!
//! A drop payload names nodes of an external protocol tree as
//! `row,column,parent` triples, each terminated by `/`. A parent of `-1`
//! means the node sits directly under the root; otherwise the parent is the
//! root's child at that row.
//!
//! Resolved nodes are either groups, which expand to their children, or
//! leaves, which stand for one importable frame source. The merged import
//! list keeps payload order, expands groups in place, and lists every node
//! once: a leaf that is also the child of a selected group takes the
//! position of the group expansion.

use std::collections::HashSet;

use framegen_model::Frame;
use tracing::debug;

use crate::error::EditError;

/// Delimiter terminating each reference in a payload
pub const REFERENCE_DELIMITER: char = '/';

/// Parent value that denotes the tree root
pub const ROOT_PARENT: i64 = -1;

/// Opaque identifier of a node in a [`SelectionTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// One decoded `row,column,parent` triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRef {
    /// Row of the node under its parent
    pub row: usize,
    /// Column of the node (the tree has a single column)
    pub column: usize,
    /// Row of the parent under the root, `None` for the root
    pub parent: Option<usize>,
}

/// Read-only view of the hierarchical tree drops originate from
pub trait SelectionTree {
    /// The root node
    fn root(&self) -> NodeId;

    /// Child of `parent` at `row`, if any
    fn child_at(&self, parent: NodeId, row: usize) -> Option<NodeId>;

    /// Whether the node is a group of other nodes
    fn is_group(&self, node: NodeId) -> bool;

    /// Children of a node in display order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Frames imported for a leaf node; empty for groups
    fn frames(&self, node: NodeId) -> &[Frame];
}

/// Decode a drop payload into selection references
pub fn parse_payload(payload: &str) -> Result<Vec<SelectionRef>, EditError> {
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    let body = payload.strip_suffix(REFERENCE_DELIMITER).ok_or_else(|| {
        EditError::MalformedSelection(format!("missing trailing delimiter in {:?}", payload))
    })?;

    body.split(REFERENCE_DELIMITER).map(parse_reference).collect()
}

fn parse_reference(text: &str) -> Result<SelectionRef, EditError> {
    let malformed = || EditError::MalformedSelection(format!("bad reference {:?}", text));

    let fields: Vec<i64> = text
        .split(',')
        .map(|field| field.trim().parse::<i64>().map_err(|_| malformed()))
        .collect::<Result<_, _>>()?;

    let &[row, column, parent] = fields.as_slice() else {
        return Err(malformed());
    };

    let row = usize::try_from(row).map_err(|_| malformed())?;
    let column = usize::try_from(column).map_err(|_| malformed())?;
    let parent = match parent {
        ROOT_PARENT => None,
        p => Some(usize::try_from(p).map_err(|_| malformed())?),
    };

    Ok(SelectionRef {
        row,
        column,
        parent,
    })
}

/// Resolve one reference against the tree
pub fn resolve_ref<T: SelectionTree + ?Sized>(
    tree: &T,
    reference: &SelectionRef,
) -> Result<NodeId, EditError> {
    let unresolved = || EditError::UnresolvedNode {
        row: reference.row,
        parent: reference.parent,
    };

    let root = tree.root();
    let parent = match reference.parent {
        None => root,
        Some(row) => tree.child_at(root, row).ok_or_else(unresolved)?,
    };

    tree.child_at(parent, reference.row).ok_or_else(unresolved)
}

/// Merge references into a deduplicated, order-preserving import list
///
/// Every reference is resolved before anything is merged, so an unresolved
/// reference fails the whole selection.
pub fn merge_selection<T: SelectionTree + ?Sized>(
    tree: &T,
    refs: &[SelectionRef],
) -> Result<Vec<NodeId>, EditError> {
    let nodes = refs
        .iter()
        .map(|reference| resolve_ref(tree, reference))
        .collect::<Result<Vec<_>, _>>()?;

    let expanded: HashSet<NodeId> = nodes
        .iter()
        .filter(|&&node| tree.is_group(node))
        .flat_map(|&group| tree.children(group))
        .collect();

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for node in nodes {
        if tree.is_group(node) {
            for child in tree.children(node) {
                if seen.insert(child) {
                    merged.push(child);
                }
            }
        } else if !expanded.contains(&node) && seen.insert(node) {
            merged.push(node);
        }
    }

    debug!("Merged {} references into {} nodes", refs.len(), merged.len());
    Ok(merged)
}

#[derive(Debug, Clone)]
enum NodeKind {
    Group,
    Leaf(Vec<Frame>),
}

#[derive(Debug, Clone)]
struct TreeNode {
    name: String,
    kind: NodeKind,
    children: Vec<NodeId>,
}

/// Minimal in-memory protocol tree
///
/// The root is a group; groups hold leaves, leaves hold the frames of one
/// protocol source.
#[derive(Debug, Clone)]
pub struct ProtocolTree {
    nodes: Vec<TreeNode>,
}

impl ProtocolTree {
    /// Create a tree holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode {
                name: String::new(),
                kind: NodeKind::Group,
                children: Vec::new(),
            }],
        }
    }

    /// Append a group under `parent`
    ///
    /// Returns `None` without touching the tree when `parent` is missing or
    /// is a leaf.
    pub fn add_group(&mut self, parent: NodeId, name: impl Into<String>) -> Option<NodeId> {
        self.add_node(parent, name.into(), NodeKind::Group)
    }

    /// Append a leaf holding `frames` under `parent`
    ///
    /// Returns `None` without touching the tree when `parent` is missing or
    /// is a leaf.
    pub fn add_leaf(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        frames: Vec<Frame>,
    ) -> Option<NodeId> {
        self.add_node(parent, name.into(), NodeKind::Leaf(frames))
    }

    /// Display name of a node
    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|n| n.name.as_str())
    }

    fn add_node(&mut self, parent: NodeId, name: String, kind: NodeKind) -> Option<NodeId> {
        let id = NodeId(self.nodes.len());
        let parent = self.nodes.get_mut(parent.0)?;
        if !matches!(parent.kind, NodeKind::Group) {
            return None;
        }
        parent.children.push(id);
        self.nodes.push(TreeNode {
            name,
            kind,
            children: Vec::new(),
        });
        Some(id)
    }
}

impl Default for ProtocolTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTree for ProtocolTree {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn child_at(&self, parent: NodeId, row: usize) -> Option<NodeId> {
        self.nodes.get(parent.0)?.children.get(row).copied()
    }

    fn is_group(&self, node: NodeId) -> bool {
        matches!(
            self.nodes.get(node.0).map(|n| &n.kind),
            Some(NodeKind::Group)
        )
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn frames(&self, node: NodeId) -> &[Frame] {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Leaf(frames)) => frames,
            _ => &[],
        }
    }
}
