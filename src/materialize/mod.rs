//! Domain object materializer.
//!
//! Turns a typed tree into domain objects in the triple graph: RDF-type
//! statements from the node type and its sub-types, default and file-supplied
//! property values, and the reciprocal structural relation statements linking
//! each object to its parent's object.

use std::{collections::HashSet, sync::Arc};

use oxrdf::{vocab::rdf, Term};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    assign::RelationshipLookup,
    ipm::{FileInfo, IpmTree, NodeId, TreeError},
    profile::{
        Iri, IriError, NodeConstraint, NodeType, NodeTypeLookup, ProfileError, PropertyType,
        PropertyValue, SuppliedProperty, Value,
    },
    rdf::{Resource, TripleGraph},
    transform::{to_long, TransformError},
};

mod properties;

/// Prefix used for minted domain object identifiers.
pub const DEFAULT_OBJECT_NAMESPACE: &str = "urn:uuid:";

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("node `{0}` has no node type")]
    Untyped(Iri),
    #[error("node type `{0}` is not declared by any loaded profile")]
    UnknownNodeType(Iri),
    #[error("the parent of node `{0}` has no domain object")]
    ParentNotMaterialized(Iri),
    /// The node type declares no structural constraint for the parent's type.
    #[error("node `{node}` of type `{node_type}` cannot be placed under a `{parent_type}` parent")]
    InvariantViolation {
        node: Iri,
        node_type: Iri,
        parent_type: String,
    },
    #[error("complex property `{0}` can only be removed by property type")]
    IllegalMutation(Iri),
    #[error(transparent)]
    Iri(#[from] IriError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Writes and reads domain objects of tree nodes in a [`TripleGraph`].
pub struct DomainObjectMapper<'a, L: ?Sized> {
    types: &'a L,
    graph: &'a mut TripleGraph,
    object_namespace: String,
    skip_ignored: bool,
}

impl<'a, L> DomainObjectMapper<'a, L>
where
    L: NodeTypeLookup + ?Sized,
{
    #[must_use]
    pub fn new(types: &'a L, graph: &'a mut TripleGraph) -> Self {
        Self {
            types,
            graph,
            object_namespace: DEFAULT_OBJECT_NAMESPACE.to_string(),
            skip_ignored: true,
        }
    }

    /// Prefix of minted identifiers; a random UUID is appended.
    #[must_use]
    pub fn with_object_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.object_namespace = namespace.into();
        self
    }

    /// Whether [`Self::update_tree`] leaves ignored nodes alone.
    #[must_use]
    pub fn with_skip_ignored(mut self, skip_ignored: bool) -> Self {
        self.skip_ignored = skip_ignored;
        self
    }

    #[must_use]
    pub fn graph(&self) -> &TripleGraph {
        &*self.graph
    }

    fn resolve(&self, id: &Iri) -> Result<&'a NodeType, MaterializeError> {
        let types: &'a L = self.types;
        types
            .node_type(id)
            .ok_or_else(|| MaterializeError::UnknownNodeType(id.clone()))
    }

    fn mint(&self) -> Result<Iri, MaterializeError> {
        Ok(Iri::new(format!("{}{}", self.object_namespace, Uuid::new_v4()))?)
    }

    /// Materializes the domain object of node `id` and returns its identifier.
    ///
    /// A node without a domain object gets a fresh identifier. An existing
    /// object keeps its identifier; its type statements and the statements
    /// connecting it to the parent's object are cleared and rewritten, other
    /// statements about it stay. Calling this twice in a row leaves the graph
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Fails when the node is untyped, its type is unknown, its parent has no
    /// domain object yet, or its type declares no constraint for the parent's
    /// type.
    pub fn update_object(&mut self, tree: &mut IpmTree, id: NodeId) -> Result<Iri, MaterializeError> {
        let node = tree.get(id).ok_or(TreeError::UnknownNode(id))?;
        let type_id = node
            .node_type()
            .ok_or_else(|| MaterializeError::Untyped(node.id().clone()))?;
        let node_type = self.resolve(type_id)?;
        let mut sub_types = Vec::new();
        for sub_type in node.sub_types() {
            sub_types.push(self.resolve(sub_type)?);
        }

        let parent = match node.parent() {
            Some(parent) => {
                let parent_node = tree.node(parent);
                let parent_object = parent_node
                    .domain_object()
                    .ok_or_else(|| MaterializeError::ParentNotMaterialized(node.id().clone()))?;
                Some((parent_object.clone(), parent_node.node_type().cloned()))
            }
            None => None,
        };

        let relation = match &parent {
            None => None,
            Some((_, parent_type)) => {
                let constraint = parent_type
                    .as_ref()
                    .and_then(|parent_type| node_type.constraint_for_parent(parent_type));
                match constraint {
                    Some(NodeConstraint::Parent { relation, .. }) => Some(relation.clone()),
                    _ if node_type.accepts_any_parent() => None,
                    _ => {
                        return Err(MaterializeError::InvariantViolation {
                            node: node.id().clone(),
                            node_type: node_type.id().clone(),
                            parent_type: parent_type
                                .as_ref()
                                .map_or_else(|| "untyped".to_string(), ToString::to_string),
                        })
                    }
                }
            }
        };

        let file_info = node.file_info().cloned();
        let node_id = node.id().clone();
        let (object, fresh) = match node.domain_object() {
            Some(object) => (object.clone(), false),
            None => (self.mint()?, true),
        };
        let subject = Resource::named(&object);
        let object_term = Term::NamedNode(object.to_named_node());

        if !fresh {
            self.graph
                .remove_matching(Some(&subject), Some(rdf::TYPE), None);
            if let Some((parent_object, _)) = &parent {
                let parent_subject = Resource::named(parent_object);
                let parent_term = Term::NamedNode(parent_object.to_named_node());
                let declared = std::iter::once(node_type)
                    .chain(sub_types.iter().copied())
                    .flat_map(NodeType::parent_constraints)
                    .filter_map(NodeConstraint::relation);
                for relation in declared {
                    self.graph.remove_matching(
                        Some(&subject),
                        Some(relation.has_parent().as_named_node()),
                        Some(&parent_term),
                    );
                    self.graph.remove_matching(
                        Some(&parent_subject),
                        Some(relation.has_child().as_named_node()),
                        Some(&object_term),
                    );
                }
            }
        }

        let mut domain_types = HashSet::new();
        for declared in std::iter::once(node_type).chain(sub_types) {
            for domain_type in declared.domain_types() {
                if domain_types.insert(domain_type) {
                    self.graph
                        .insert_type(&subject, domain_type.as_named_node());
                }
            }
        }

        for value in node_type.default_values() {
            self.write_default(&subject, value)?;
        }

        if let Some(file_info) = &file_info {
            for (property_type, source) in node_type.supplied_properties() {
                self.write_supplied(&subject, property_type, *source, file_info)?;
            }
        }

        if let (Some((parent_object, _)), Some(relation)) = (&parent, relation) {
            let parent_subject = Resource::named(parent_object);
            self.graph.insert(
                &subject,
                relation.has_parent().as_named_node(),
                Term::NamedNode(parent_object.to_named_node()),
            );
            self.graph
                .insert(&parent_subject, relation.has_child().as_named_node(), object_term);
        }

        if fresh {
            tree.node_mut(id).set_domain_object(object.clone());
        }
        tracing::debug!(node = %node_id, object = %object, fresh, "domain_object_updated");
        Ok(object)
    }

    fn write_default(&mut self, subject: &Resource, value: &PropertyValue) -> Result<(), MaterializeError> {
        if matches!(value.value(), Value::Complex(_)) {
            let existing = properties::read_values(&*self.graph, subject, value.property_type())?;
            if existing.iter().any(|present| present.equivalent(value)) {
                return Ok(());
            }
        }
        properties::write_value(self.graph, subject, value);
        Ok(())
    }

    /// Replaces the values of a supplied property with those computed from
    /// `file_info`.
    fn write_supplied(
        &mut self,
        subject: &Resource,
        property_type: &Arc<PropertyType>,
        source: SuppliedProperty,
        file_info: &FileInfo,
    ) -> Result<(), MaterializeError> {
        let values = match source {
            SuppliedProperty::FileName => vec![Value::String(file_info.name.clone())],
            SuppliedProperty::FileSize => {
                vec![Value::Long(to_long("file size", file_info.size)?)]
            }
            SuppliedProperty::FileCreatedDate => {
                file_info.created.map(Value::DateTime).into_iter().collect()
            }
            SuppliedProperty::FileModifiedDate => {
                file_info.modified.map(Value::DateTime).into_iter().collect()
            }
            SuppliedProperty::FileFormatUri => file_info
                .formats
                .iter()
                .map(|format| Value::String(format.clone()))
                .collect(),
        };
        properties::remove_values(self.graph, subject, property_type);
        for value in values {
            let value = PropertyValue::new(Arc::clone(property_type), value)?;
            properties::write_value(self.graph, subject, &value);
        }
        Ok(())
    }

    /// Materializes every node top-down, skipping ignored nodes when
    /// configured to. Returns the number of objects written.
    ///
    /// # Errors
    ///
    /// Stops at the first node that fails to materialize.
    pub fn update_tree(&mut self, tree: &mut IpmTree) -> Result<usize, MaterializeError> {
        let mut written = 0;
        for id in tree.pre_order() {
            if self.skip_ignored && tree.node(id).is_ignored() {
                continue;
            }
            self.update_object(tree, id)?;
            written += 1;
        }
        tracing::info!(objects = written, statements = self.graph.len(), "tree_materialized");
        Ok(written)
    }

    /// Adds one property value to `object`.
    pub fn add_property(&mut self, object: &Iri, value: &PropertyValue) {
        properties::write_value(self.graph, &Resource::named(object), value);
    }

    /// Removes one simple property value from `object`.
    ///
    /// # Errors
    ///
    /// Complex values have no identity to match on and are rejected with
    /// [`MaterializeError::IllegalMutation`]; remove them with
    /// [`Self::remove_property_type`].
    pub fn remove_property_value(
        &mut self,
        object: &Iri,
        value: &PropertyValue,
    ) -> Result<bool, MaterializeError> {
        properties::remove_value(self.graph, &Resource::named(object), value)
    }

    /// Removes every value of `property_type` from `object`.
    pub fn remove_property_type(&mut self, object: &Iri, property_type: &PropertyType) -> usize {
        properties::remove_values(self.graph, &Resource::named(object), property_type)
    }

    /// Values of every property constrained by `node_type`, in constraint
    /// order.
    ///
    /// # Errors
    ///
    /// Fails when a stored value does not decode as its declared kind.
    pub fn get_properties_for_node_type(
        &self,
        object: &Iri,
        node_type: &NodeType,
    ) -> Result<Vec<PropertyValue>, MaterializeError> {
        let subject = Resource::named(object);
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for constraint in node_type.property_constraints() {
            let property_type = constraint.property_type();
            if seen.insert(property_type.predicate()) {
                values.extend(properties::read_values(&*self.graph, &subject, property_type)?);
            }
        }
        Ok(values)
    }

    /// Values of `property_type` on `object`.
    ///
    /// # Errors
    ///
    /// Fails when a stored value does not decode as its declared kind.
    pub fn get_properties(
        &self,
        object: &Iri,
        property_type: &Arc<PropertyType>,
    ) -> Result<Vec<PropertyValue>, MaterializeError> {
        properties::read_values(&*self.graph, &Resource::named(object), property_type)
    }

    #[must_use]
    pub fn has_relationship(&self, subject: &Iri, predicate: &Iri, object: &Iri) -> bool {
        self.graph.has_relationship(subject, predicate, object)
    }
}

#[cfg(test)]
mod tests {
    use oxrdf::{vocab::rdf, NamedNodeRef, Term};

    use super::{DomainObjectMapper, MaterializeError};
    use crate::{
        assign::NodeTypeAssigner,
        ipm::{FileInfo, IpmTree, Node},
        profile::{Iri, NodeConstraint, NodeType},
        rdf::{Resource, TripleGraph},
        tests_cfg,
        transform::TransformError,
    };

    #[test]
    fn objects_keep_their_identifier() {
        let profile = tests_cfg::profile::collection_data_file();
        let mut tree = tests_cfg::tree::typed_collection();
        let mut graph = TripleGraph::new();
        let mut mapper = DomainObjectMapper::new(&profile, &mut graph)
            .with_object_namespace("urn:example:object:");

        let root = tree.root();
        let first = mapper.update_object(&mut tree, root).expect("first");
        assert!(first.as_str().starts_with("urn:example:object:"));
        let second = mapper.update_object(&mut tree, root).expect("second");
        assert_eq!(first, second);
        assert_eq!(tree.node(root).domain_object(), Some(&first));
    }

    #[test]
    fn children_need_a_materialized_parent() {
        let profile = tests_cfg::profile::collection_data_file();
        let mut tree = tests_cfg::tree::typed_collection();
        let child = tree.children(tree.root())[0];
        let mut graph = TripleGraph::new();
        let err = DomainObjectMapper::new(&profile, &mut graph)
            .update_object(&mut tree, child)
            .expect_err("parent first");
        assert!(matches!(err, MaterializeError::ParentNotMaterialized(_)));
    }

    #[test]
    fn untyped_nodes_are_rejected() {
        let profile = tests_cfg::profile::collection_data_file();
        let mut tree = tests_cfg::tree::collection();
        let root = tree.root();
        let mut graph = TripleGraph::new();
        let err = DomainObjectMapper::new(&profile, &mut graph)
            .update_object(&mut tree, root)
            .expect_err("untyped");
        assert!(matches!(err, MaterializeError::Untyped(_)));
    }

    #[test]
    fn mismatched_parent_type_violates_the_invariant() {
        let profile = tests_cfg::profile::collection_data_file();
        let mut tree = IpmTree::new(
            Node::new(Iri::new("urn:node:root").expect("iri"))
                .with_node_type(tests_cfg::profile::data_file_type()),
        );
        let root = tree.root();
        let child = tree
            .add_child(
                root,
                Node::new(Iri::new("urn:node:child").expect("iri"))
                    .with_node_type(tests_cfg::profile::data_file_type()),
            )
            .expect("child");
        let mut graph = TripleGraph::new();
        let mut mapper = DomainObjectMapper::new(&profile, &mut graph);
        mapper.update_object(&mut tree, root).expect("root");
        let err = mapper.update_object(&mut tree, child).expect_err("violation");
        assert!(matches!(err, MaterializeError::InvariantViolation { .. }));
    }

    #[test]
    fn any_parent_types_write_no_relation() {
        let mut profile = tests_cfg::profile::collection_data_file();
        let mut note = NodeType::new(Iri::new("https://example.org/Note").expect("iri"));
        note.add_parent_constraint(NodeConstraint::AnyParent);
        note.add_domain_type(Iri::new("http://purl.org/dc/dcmitype/Text").expect("iri"));
        profile.add_node_type(note).expect("note");

        let mut tree = tests_cfg::tree::typed_collection();
        let root = tree.root();
        let note = tree
            .add_child(
                root,
                Node::new(Iri::new("urn:node:note").expect("iri"))
                    .with_node_type(Iri::new("https://example.org/Note").expect("iri")),
            )
            .expect("note");

        let mut graph = TripleGraph::new();
        let mut mapper = DomainObjectMapper::new(&profile, &mut graph);
        mapper.update_object(&mut tree, root).expect("root");
        let before = mapper.graph().len();
        let object = mapper.update_object(&mut tree, note).expect("note");
        assert_eq!(mapper.graph().len(), before + 1);
        assert_eq!(
            mapper
                .graph()
                .matching(Some(&crate::rdf::Resource::named(&object)), Some(rdf::TYPE), None)
                .len(),
            1
        );
    }

    #[test]
    fn assigned_trees_materialize_completely() {
        let profile = tests_cfg::profile::collection_data_file();
        let mut tree = tests_cfg::tree::collection();
        assert!(NodeTypeAssigner::new(&profile).assign_types(&mut tree));
        let mut graph = TripleGraph::new();
        let written = DomainObjectMapper::new(&profile, &mut graph)
            .update_tree(&mut tree)
            .expect("materialized");
        assert_eq!(written, 3);
        assert!(tree
            .pre_order()
            .into_iter()
            .all(|id| tree.node(id).domain_object().is_some()));
    }

    #[test]
    fn rematerializing_clears_only_declared_relations() {
        let profile = tests_cfg::profile::collection_data_file();
        let mut tree = tests_cfg::tree::typed_collection();
        let child = tree.children(tree.root())[0];
        let references = NamedNodeRef::new_unchecked("http://purl.org/dc/terms/references");
        let member = tests_cfg::profile::member_relation();

        let mut graph = TripleGraph::new();
        let mut mapper = DomainObjectMapper::new(&profile, &mut graph);
        mapper.update_tree(&mut tree).expect("materialized");
        let parent_object = tree.node(tree.root()).domain_object().expect("parent").clone();
        let child_object = tree.node(child).domain_object().expect("child").clone();
        drop(mapper);
        graph.insert(
            &Resource::named(&child_object),
            references,
            Term::NamedNode(parent_object.to_named_node()),
        );

        let mut mapper = DomainObjectMapper::new(&profile, &mut graph);
        mapper.update_object(&mut tree, child).expect("again");
        assert!(mapper.has_relationship(
            &child_object,
            &Iri::from(references.into_owned()),
            &parent_object
        ));
        assert!(mapper.has_relationship(&child_object, member.has_parent(), &parent_object));
        assert!(mapper.has_relationship(&parent_object, member.has_child(), &child_object));
    }

    #[test]
    fn file_sizes_past_the_long_range_are_rejected() {
        let profile = tests_cfg::profile::collection_data_file();
        let mut tree = tests_cfg::tree::typed_collection();
        let root = tree.root();
        let huge = tree
            .add_child(
                root,
                Node::new(Iri::new("urn:node:huge").expect("iri"))
                    .with_node_type(tests_cfg::profile::data_file_type())
                    .with_file_info(FileInfo::byte_stream(
                        "file:///data/package/huge.bin",
                        "huge.bin",
                        u64::MAX,
                    )),
            )
            .expect("huge");

        let mut graph = TripleGraph::new();
        let mut mapper = DomainObjectMapper::new(&profile, &mut graph);
        mapper.update_object(&mut tree, root).expect("root");
        let err = mapper.update_object(&mut tree, huge).expect_err("out of range");
        assert!(matches!(
            err,
            MaterializeError::Transform(TransformError::OutOfRange { .. })
        ));
    }
}
