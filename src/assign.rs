//! Node-type assignment engine.
//!
//! Depth-first backtracking search giving every tree node a node type of the
//! profile, such that each node satisfies at least one parent constraint
//! against the type chosen for its parent.

use oxrdf::Term;

use crate::{
    ipm::{IpmTree, NodeId},
    profile::{DomainProfile, Iri, NodeConstraint, NodeType},
    rdf::{Resource, TripleGraph},
};

/// Existence check for statements between domain objects.
pub trait RelationshipLookup {
    fn has_relationship(&self, subject: &Iri, predicate: &Iri, object: &Iri) -> bool;
}

impl RelationshipLookup for TripleGraph {
    fn has_relationship(&self, subject: &Iri, predicate: &Iri, object: &Iri) -> bool {
        self.contains(
            &Resource::named(subject),
            predicate.as_named_node(),
            &Term::NamedNode(object.to_named_node()),
        )
    }
}

/// Assigns node types from a single profile.
pub struct NodeTypeAssigner<'a> {
    profile: &'a DomainProfile,
    relationships: Option<&'a dyn RelationshipLookup>,
    prefer_child_count: bool,
}

impl<'a> NodeTypeAssigner<'a> {
    #[must_use]
    pub fn new(profile: &'a DomainProfile) -> Self {
        Self {
            profile,
            relationships: None,
            prefer_child_count: true,
        }
    }

    /// Checks structural relations between already materialized objects
    /// against `relationships`.
    #[must_use]
    pub fn with_relationships(mut self, relationships: &'a dyn RelationshipLookup) -> Self {
        self.relationships = Some(relationships);
        self
    }

    /// Orders candidates by how well their preferred byte-stream child count
    /// matches the node. Enabled by default.
    #[must_use]
    pub fn with_child_count_preference(mut self, enabled: bool) -> Self {
        self.prefer_child_count = enabled;
        self
    }

    /// Types every node of `tree`.
    ///
    /// Returns `false` when no consistent assignment exists. The tree is then
    /// left partially typed and should be discarded.
    pub fn assign_types(&self, tree: &mut IpmTree) -> bool {
        let root = tree.root();
        let assigned = self.assign_node(tree, root);
        if assigned {
            tracing::info!(profile = %self.profile.id(), nodes = tree.len(), "node_types_assigned");
        } else {
            tracing::warn!(profile = %self.profile.id(), nodes = tree.len(), "node_type_assignment_failed");
        }
        assigned
    }

    fn assign_node(&self, tree: &mut IpmTree, id: NodeId) -> bool {
        let candidates = self.candidates(tree, id);
        if candidates.is_empty() {
            tracing::debug!(node = %tree.node(id).id(), "assignment_no_candidate");
            return false;
        }

        let children = tree.children(id).to_vec();
        for candidate in candidates {
            tree.node_mut(id)
                .set_node_type(Some(candidate.id().clone()));
            if children.iter().all(|child| self.assign_node(tree, *child)) {
                return true;
            }
            tracing::debug!(
                node = %tree.node(id).id(),
                candidate = %candidate.id(),
                "assignment_backtrack"
            );
        }
        tree.node_mut(id).set_node_type(None);
        false
    }

    /// Node types admitting `id` under its parent's current type, in
    /// preference order.
    fn candidates(&self, tree: &IpmTree, id: NodeId) -> Vec<&'a NodeType> {
        let node = tree.node(id);
        let mut candidates: Vec<&'a NodeType> = self
            .profile
            .node_types()
            .iter()
            .filter(|node_type| node_type.file_requirement().admits(node.is_byte_stream()))
            .filter(|node_type| {
                node_type
                    .parent_constraints()
                    .iter()
                    .any(|constraint| self.meets_parent_constraint(tree, id, constraint))
            })
            .collect();
        if self.prefer_child_count {
            let byte_streams = tree.byte_stream_children(id);
            candidates.sort_by_key(|node_type| node_type.preference_rank(byte_streams));
        }
        candidates
    }

    /// Whether `constraint` is satisfied by the parent of `node` as currently
    /// typed.
    ///
    /// For a concrete constraint the parent's type must match. When both
    /// nodes already carry domain objects and a relationship lookup is set,
    /// the relation's statements must also hold between the two objects.
    #[must_use]
    pub fn meets_parent_constraint(
        &self,
        tree: &IpmTree,
        node: NodeId,
        constraint: &NodeConstraint,
    ) -> bool {
        let parent = tree.parent(node);
        match (constraint, parent) {
            (NodeConstraint::AnyParent, _) | (NodeConstraint::NoParent, None) => true,
            (NodeConstraint::NoParent, Some(_)) | (NodeConstraint::Parent { .. }, None) => false,
            (
                NodeConstraint::Parent {
                    node_type,
                    relation,
                },
                Some(parent),
            ) => {
                let parent_node = tree.node(parent);
                if parent_node.node_type() != Some(node_type) {
                    return false;
                }
                let child_node = tree.node(node);
                match (
                    self.relationships,
                    child_node.domain_object(),
                    parent_node.domain_object(),
                ) {
                    (Some(graph), Some(child_object), Some(parent_object)) => {
                        graph.has_relationship(child_object, relation.has_parent(), parent_object)
                            && graph.has_relationship(
                                parent_object,
                                relation.has_child(),
                                child_object,
                            )
                    }
                    _ => true,
                }
            }
        }
    }
}
