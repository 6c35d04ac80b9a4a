use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

use thiserror::Error;

use super::node::Node;
use crate::profile::Iri;

/// Arena handle of a node inside an [`IpmTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// In-memory package model: a rooted tree of [`Node`]s stored in an arena.
///
/// The children lists are the only ownership path; parent links are plain
/// handles. Nodes are never removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpmTree {
    nodes: Vec<Node>,
    index: HashMap<Iri, NodeId>,
}

impl IpmTree {
    /// Creates a tree holding only `root`.
    #[must_use]
    pub fn new(mut root: Node) -> Self {
        root.parent = None;
        root.children.clear();
        let mut index = HashMap::new();
        index.insert(root.id().clone(), NodeId(0));
        Self {
            nodes: vec![root],
            index,
        }
    }

    /// Appends `node` as the last child of `parent`.
    ///
    /// A child of an ignored parent is ignored as well.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, TreeError> {
        let parent_ignored = self.get(parent).ok_or(TreeError::UnknownNode(parent))?.is_ignored();
        if self.index.contains_key(node.id()) {
            return Err(TreeError::DuplicateNode(node.id().clone()));
        }
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        if parent_ignored {
            let self_ignored = node.is_self_ignored();
            node.set_ignore_flags(true, self_ignored);
        }
        self.index.insert(node.id().clone(), id);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns the node behind a handle issued by this tree.
    ///
    /// # Panics
    ///
    /// Panics when `id` was issued by another tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutable access to the node behind a handle issued by this tree.
    ///
    /// # Panics
    ///
    /// Panics when `id` was issued by another tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Looks a node up by its identifier.
    #[must_use]
    pub fn find(&self, id: &Iri) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Handles in depth-first pre-order starting at the root.
    #[must_use]
    pub fn pre_order(&self) -> Vec<NodeId> {
        self.subtree(self.root())
    }

    /// `id` followed by all of its descendants in pre-order.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        order
    }

    /// Ancestors of `id`, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            ancestors.push(ancestor);
            current = self.parent(ancestor);
        }
        ancestors
    }

    /// Number of children backed by a regular file.
    #[must_use]
    pub fn byte_stream_children(&self, id: NodeId) -> usize {
        self.children(id)
            .iter()
            .filter(|child| self.node(**child).is_byte_stream())
            .count()
    }

    /// Ignores or un-ignores a node.
    ///
    /// Ignoring propagates to every descendant. Un-ignoring also un-ignores
    /// every ignored ancestor; nodes hanging off those ancestors stay ignored
    /// on their own account, and descendants of `id` that were ignored on
    /// their own account keep their flag.
    pub fn set_ignored(&mut self, id: NodeId, ignored: bool) {
        if ignored {
            self.nodes[id.0].set_ignore_flags(true, true);
            for descendant in self.subtree(id).into_iter().skip(1) {
                let self_ignored = self.node(descendant).is_self_ignored();
                self.nodes[descendant.0].set_ignore_flags(true, self_ignored);
            }
            return;
        }

        let mut path = self.ancestors(id);
        path.reverse();
        path.push(id);
        for (position, ancestor) in path.iter().enumerate().take(path.len() - 1) {
            if !self.node(*ancestor).is_ignored() {
                continue;
            }
            self.nodes[ancestor.0].set_ignore_flags(false, false);
            let next = path[position + 1];
            let siblings: Vec<NodeId> = self.children(*ancestor).to_vec();
            for sibling in siblings {
                if sibling != next && self.node(sibling).is_ignored() {
                    self.nodes[sibling.0].set_ignore_flags(true, true);
                }
            }
        }

        self.nodes[id.0].set_ignore_flags(false, false);
        for descendant in self.subtree(id).into_iter().skip(1) {
            let inherited = self
                .parent(descendant)
                .is_some_and(|parent| self.node(parent).is_ignored());
            let self_ignored = self.node(descendant).is_self_ignored();
            self.nodes[descendant.0].set_ignore_flags(self_ignored || inherited, self_ignored);
        }
    }
}

/// Errors raised when building an [`IpmTree`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeId),
    #[error("node `{0}` already exists in the tree")]
    DuplicateNode(Iri),
}

#[cfg(test)]
mod tests {
    use super::{IpmTree, NodeId, TreeError};
    use crate::ipm::{FileInfo, Node};
    use crate::profile::Iri;

    fn node(text: &str) -> Node {
        Node::new(Iri::new(format!("urn:node:{text}")).expect("valid iri"))
    }

    fn sample() -> (IpmTree, Vec<NodeId>) {
        let mut tree = IpmTree::new(node("root"));
        let root = tree.root();
        let a = tree.add_child(root, node("a")).expect("a");
        let a1 = tree.add_child(a, node("a1")).expect("a1");
        let a2 = tree.add_child(a, node("a2")).expect("a2");
        let b = tree
            .add_child(
                root,
                node("b").with_file_info(FileInfo::byte_stream("file:///pkg/b", "b", 3)),
            )
            .expect("b");
        (tree, vec![root, a, a1, a2, b])
    }

    fn assert_monotone(tree: &IpmTree) {
        for id in tree.pre_order() {
            if tree.node(id).is_ignored() {
                for descendant in tree.subtree(id) {
                    assert!(tree.node(descendant).is_ignored());
                }
            }
        }
    }

    #[test]
    fn pre_order_follows_child_order() {
        let (tree, ids) = sample();
        assert_eq!(tree.pre_order(), ids);
        assert_eq!(tree.byte_stream_children(tree.root()), 1);
        assert_eq!(tree.ancestors(ids[2]), vec![ids[1], ids[0]]);
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let (mut tree, _) = sample();
        let root = tree.root();
        let err = tree.add_child(root, node("a")).expect_err("duplicate");
        assert!(matches!(err, TreeError::DuplicateNode(_)));
    }

    #[test]
    fn ignoring_propagates_to_descendants() {
        let (mut tree, ids) = sample();
        tree.set_ignored(ids[1], true);
        assert!(tree.node(ids[1]).is_ignored());
        assert!(tree.node(ids[2]).is_ignored());
        assert!(!tree.node(ids[2]).is_self_ignored());
        assert!(!tree.node(ids[4]).is_ignored());
        assert_monotone(&tree);

        let late = tree.add_child(ids[1], node("a3")).expect("a3");
        assert!(tree.node(late).is_ignored());
    }

    #[test]
    fn unignoring_keeps_independently_ignored_descendants() {
        let (mut tree, ids) = sample();
        tree.set_ignored(ids[3], true);
        tree.set_ignored(ids[1], true);
        tree.set_ignored(ids[1], false);
        assert!(!tree.node(ids[1]).is_ignored());
        assert!(!tree.node(ids[2]).is_ignored());
        assert!(tree.node(ids[3]).is_ignored());
        assert_monotone(&tree);
    }

    #[test]
    fn unignoring_a_descendant_unignores_its_ancestors() {
        let (mut tree, ids) = sample();
        tree.set_ignored(ids[0], true);
        tree.set_ignored(ids[2], false);
        assert!(!tree.node(ids[0]).is_ignored());
        assert!(!tree.node(ids[1]).is_ignored());
        assert!(!tree.node(ids[2]).is_ignored());
        assert!(tree.node(ids[3]).is_ignored());
        assert!(tree.node(ids[3]).is_self_ignored());
        assert!(tree.node(ids[4]).is_ignored());
        assert_monotone(&tree);
    }
}
