//! The projected view tree: one mutable [`VisualNode`] per input record.
//!
//! Nodes live in a flat arena (the [`Forest`]) and refer to each other by
//! [`NodeId`]. Parents are back-linked by index, so deleting a subtree only
//! has to unlink one id from its parent's container and flag the removed
//! nodes; ids held elsewhere (the session, the rename field) never dangle,
//! they just stop resolving.

use super::error::{Result, TreeError};
use super::icons::{IconRef, IconTable};
use super::model::{NodeKind, TreeNode};

// ───────────────────────────────────────── node ──────────────

/// Index into the [`Forest`] arena.
pub type NodeId = usize;

/// Whether a folder shows its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseState {
    Collapsed,
    Expanded,
}

impl CollapseState {
    pub fn toggled(self) -> Self {
        match self {
            CollapseState::Collapsed => CollapseState::Expanded,
            CollapseState::Expanded => CollapseState::Collapsed,
        }
    }
}

/// On-screen counterpart of a [`TreeNode`]; the state of record once built.
#[derive(Debug, Clone)]
pub struct VisualNode {
    pub kind: NodeKind,
    pub label: String,
    /// `Some` for folders only.
    pub collapse: Option<CollapseState>,
    pub active: bool,
    /// Resolved icon, files only.
    pub icon: Option<IconRef>,
    pub parent: Option<NodeId>,
    /// Present iff the folder had children at projection time. Stays `Some`
    /// (possibly empty) after its children are deleted.
    pub children: Option<Vec<NodeId>>,
    /// 0 for top-level nodes.
    pub depth: usize,
    /// Set once the node or one of its ancestors has been deleted.
    pub detached: bool,
}

impl VisualNode {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_expanded(&self) -> bool {
        self.collapse == Some(CollapseState::Expanded)
    }

    /// Child ids in order; empty for files and childless folders.
    pub fn child_ids(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }
}

// ───────────────────────────────────────── arena ─────────────

/// Arena holding every projected node plus the ordered top-level ids.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: Vec<VisualNode>,
    roots: Vec<NodeId>,
}

impl Forest {
    /// Build the view forest from the input forest in one depth-first pass.
    pub fn project(forest: &[TreeNode], icons: &IconTable) -> Self {
        let mut out = Self::default();
        for node in forest {
            let id = out.project_node(node, None, 0, icons);
            out.roots.push(id);
        }
        tracing::debug!(nodes = out.nodes.len(), roots = out.roots.len(), "projected forest");
        out
    }

    fn project_node(
        &mut self,
        node: &TreeNode,
        parent: Option<NodeId>,
        depth: usize,
        icons: &IconTable,
    ) -> NodeId {
        let id = self.nodes.len();
        let (collapse, icon) = match node.kind {
            NodeKind::Folder => (Some(CollapseState::Collapsed), None),
            NodeKind::File => (None, Some(icons.resolve(&node.name))),
        };
        self.nodes.push(VisualNode {
            kind: node.kind,
            label: node.name.clone(),
            collapse,
            active: false,
            icon,
            parent,
            children: None,
            depth,
            detached: false,
        });

        if node.is_folder() && !node.children.is_empty() {
            let children = node
                .children
                .iter()
                .map(|child| self.project_node(child, Some(id), depth + 1, icons))
                .collect();
            self.nodes[id].children = Some(children);
        }
        id
    }

    /// Top-level ids that are still attached, in order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Any node ever projected, detached or not.
    pub fn get(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(id)
    }

    /// A node that is still part of the view.
    pub fn live(&self, id: NodeId) -> Result<&VisualNode> {
        match self.nodes.get(id) {
            None => Err(TreeError::UnknownNode(id)),
            Some(node) if node.detached => Err(TreeError::Detached(id)),
            Some(node) => Ok(node),
        }
    }

    pub fn live_mut(&mut self, id: NodeId) -> Result<&mut VisualNode> {
        match self.nodes.get_mut(id) {
            None => Err(TreeError::UnknownNode(id)),
            Some(node) if node.detached => Err(TreeError::Detached(id)),
            Some(node) => Ok(node),
        }
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.live(id).is_ok()
    }

    /// Number of nodes still in the view.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.detached).count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every live id, depth-first in display order.
    pub fn live_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.collect_subtree(root, &mut out);
        }
        out
    }

    /// `id` followed by all of its descendants, depth-first.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if id < self.nodes.len() {
            self.collect_subtree(id, &mut out);
        }
        out
    }

    fn collect_subtree(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.nodes[id].child_ids() {
            self.collect_subtree(child, out);
        }
    }

    /// Ids that are currently on screen: every root, plus the children of
    /// expanded folders. This is the flattened list the UI renders.
    pub fn visible(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.collect_visible(root, &mut out);
        }
        out
    }

    fn collect_visible(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        let node = &self.nodes[id];
        if node.is_expanded() {
            for &child in node.child_ids() {
                self.collect_visible(child, out);
            }
        }
    }

    /// Unlink `id` from its parent's container (or from the roots) and mark
    /// its whole subtree detached. Returns how many nodes left the view.
    pub fn detach(&mut self, id: NodeId) -> Result<usize> {
        let parent = self.live(id)?.parent;
        match parent {
            Some(parent_id) => {
                if let Some(siblings) = self.nodes[parent_id].children.as_mut() {
                    siblings.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }

        let removed = self.subtree(id);
        for &gone in &removed {
            let node = &mut self.nodes[gone];
            node.detached = true;
            node.active = false;
        }
        Ok(removed.len())
    }
}
