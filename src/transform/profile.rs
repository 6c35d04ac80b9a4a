use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use oxrdf::NamedNodeRef;

use super::{
    bool_literal, long_literal, to_long, value_literal, Claim, GraphReader, Identities,
    TransformError,
};
use crate::{
    profile::{
        CardinalityConstraint, DomainProfile, Iri, NodeConstraint, NodeTransform, NodeType,
        PropertyCategory, PropertyConstraint, PropertyType, PropertyValue, StructuralRelation,
        Value, ValueKind,
    },
    rdf::{string_literal, Resource, TripleGraph},
    vocab::profile as vocab,
};

/// Maps a [`DomainProfile`] to the graph and back.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfileGraphTransform;

impl ProfileGraphTransform {
    /// Writes `profile` into `graph` and returns its graph node.
    ///
    /// A profile already present in the graph is rewritten in place. Node
    /// types and categories owned by another profile are linked without
    /// being rewritten.
    ///
    /// # Errors
    ///
    /// Fails when a node type position does not fit a long literal.
    pub fn transform_to_graph(
        &self,
        profile: &DomainProfile,
        graph: &mut TripleGraph,
    ) -> Result<Resource, TransformError> {
        let mut writer = ProfileWriter {
            profile,
            graph,
            identities: Identities::default(),
        };
        let resource = writer.write_profile()?;
        tracing::debug!(profile = %profile.id(), statements = writer.graph.len(), "profile_written");
        Ok(resource)
    }

    /// Reads the only profile stored in `graph`.
    ///
    /// # Errors
    ///
    /// Fails when the graph holds zero or several profiles, or when any
    /// element of the profile is malformed.
    pub fn transform_to_profile(&self, graph: &TripleGraph) -> Result<DomainProfile, TransformError> {
        let mut profiles = graph.instances_of(vocab::DOMAIN_PROFILE);
        if profiles.len() != 1 {
            return Err(TransformError::ExpectedSingle {
                what: "domain profile".to_string(),
                found: profiles.len(),
            });
        }
        let resource = profiles.remove(0);
        ProfileReader::new(graph).read_profile(&resource)
    }

    /// Reads the profile with identifier `id` from a graph that may hold
    /// several profiles.
    ///
    /// # Errors
    ///
    /// Fails when no profile or more than one profile carries `id`.
    pub fn transform_to_profile_with_id(
        &self,
        graph: &TripleGraph,
        id: &Iri,
    ) -> Result<DomainProfile, TransformError> {
        let reader = GraphReader::new(graph);
        let mut matches = Vec::new();
        for resource in graph.instances_of(vocab::DOMAIN_PROFILE) {
            if reader.iri(&resource, vocab::HAS_IDENTIFIER)?.as_ref() == Some(id) {
                matches.push(resource);
            }
        }
        if matches.len() != 1 {
            return Err(TransformError::ExpectedSingle {
                what: format!("domain profile `{id}`"),
                found: matches.len(),
            });
        }
        ProfileReader::new(graph).read_profile(&matches[0])
    }
}

struct ProfileWriter<'a> {
    profile: &'a DomainProfile,
    graph: &'a mut TripleGraph,
    identities: Identities,
}

impl ProfileWriter<'_> {
    fn claim(&mut self, class: NamedNodeRef<'_>, id: &Iri) -> Claim {
        self.identities
            .claim(self.graph, class, vocab::HAS_IDENTIFIER, id)
    }

    fn describe(&mut self, resource: &Resource, label: Option<&str>, description: Option<&str>) {
        if let Some(label) = label {
            self.graph
                .insert(resource, vocab::HAS_LABEL, string_literal(label));
        }
        if let Some(description) = description {
            self.graph
                .insert(resource, vocab::HAS_DESCRIPTION, string_literal(description));
        }
    }

    fn write_profile(&mut self) -> Result<Resource, TransformError> {
        let profile = self.profile;
        let resource = match self.claim(vocab::DOMAIN_PROFILE, profile.id()) {
            Claim::Visited(resource) | Claim::Fresh(resource) => resource,
        };
        self.describe(&resource, profile.label(), profile.description());

        for (position, node_type) in profile.node_types().iter().enumerate() {
            let node = self.write_node_type(node_type);
            self.graph
                .insert(&resource, vocab::HAS_NODE_TYPE, node.clone());
            self.graph.insert(
                &node,
                vocab::HAS_POSITION,
                long_literal(to_long("node type position", position)?),
            );
        }
        for property_type in profile.property_types() {
            let node = self.write_property_type(property_type);
            self.graph.insert(&resource, vocab::HAS_PROPERTY_TYPE, node);
        }
        for category in profile.property_categories() {
            let node = self.write_category(category);
            self.graph
                .insert(&resource, vocab::HAS_PROPERTY_CATEGORY, node);
        }
        for transform in profile.node_transforms() {
            let node = self.write_transform(transform);
            self.graph.insert(&resource, vocab::HAS_NODE_TRANSFORM, node);
        }
        Ok(resource)
    }

    /// Graph node of a referenced node type. Types outside the profile are
    /// linked as they stand, or as identifier stubs when absent.
    fn node_type_ref(&mut self, id: &Iri) -> Resource {
        let profile = self.profile;
        match profile.node_type(id) {
            Some(node_type) => self.write_node_type(node_type),
            None => self
                .identities
                .reference(self.graph, vocab::NODE_TYPE, vocab::HAS_IDENTIFIER, id),
        }
    }

    fn write_node_type(&mut self, node_type: &NodeType) -> Resource {
        let resource = match self.claim(vocab::NODE_TYPE, node_type.id()) {
            Claim::Visited(resource) => return resource,
            Claim::Fresh(resource) => resource,
        };
        self.describe(&resource, node_type.label(), node_type.description());

        for domain_type in node_type.domain_types() {
            self.graph
                .insert(&resource, vocab::HAS_DOMAIN_TYPE, domain_type.to_named_node());
        }
        for constraint in node_type.parent_constraints() {
            let node = self.write_node_constraint(constraint);
            self.graph
                .insert(&resource, vocab::HAS_PARENT_CONSTRAINT, node);
        }
        for constraint in node_type.property_constraints() {
            let node = self.write_property_constraint(constraint);
            self.graph
                .insert(&resource, vocab::HAS_PROPERTY_CONSTRAINT, node);
        }
        for property_type in node_type.inheritable_properties() {
            let node = self.write_property_type(property_type);
            self.graph
                .insert(&resource, vocab::HAS_INHERITABLE_PROPERTY, node);
        }
        for value in node_type.default_values() {
            let node = self.write_value(value);
            self.graph.insert(&resource, vocab::HAS_DEFAULT_VALUE, node);
        }
        for (property_type, source) in node_type.supplied_properties() {
            let node = Resource::blank();
            self.graph.insert_type(&node, vocab::SUPPLIED_PROPERTY);
            let target = self.write_property_type(property_type);
            self.graph
                .insert(&node, vocab::CONSTRAINS_PROPERTY_TYPE, target);
            self.graph
                .insert(&node, vocab::SUPPLIED_BY, string_literal(source.as_str()));
            self.graph
                .insert(&resource, vocab::HAS_SUPPLIED_PROPERTY, node);
        }
        self.graph.insert(
            &resource,
            vocab::HAS_FILE_REQUIREMENT,
            string_literal(node_type.file_requirement().as_str()),
        );
        if let Some(cardinality) = node_type.child_file_constraint() {
            let node = Resource::blank();
            self.write_cardinality(&node, cardinality);
            self.graph
                .insert(&resource, vocab::HAS_CHILD_FILE_CONSTRAINT, node);
        }
        resource
    }

    fn write_node_constraint(&mut self, constraint: &NodeConstraint) -> Resource {
        let node = Resource::blank();
        self.graph.insert_type(&node, vocab::NODE_CONSTRAINT);
        match constraint {
            NodeConstraint::AnyParent => {
                self.graph
                    .insert(&node, vocab::MATCHES_ANY, bool_literal(true));
            }
            NodeConstraint::NoParent => {
                self.graph
                    .insert(&node, vocab::MATCHES_NONE, bool_literal(true));
            }
            NodeConstraint::Parent {
                node_type,
                relation,
            } => {
                let target = self.node_type_ref(node_type);
                self.graph
                    .insert(&node, vocab::CONSTRAINS_NODE_TYPE, target);
                let relation_node = Resource::blank();
                self.graph
                    .insert_type(&relation_node, vocab::STRUCTURAL_RELATION);
                self.graph.insert(
                    &relation_node,
                    vocab::HAS_PARENT_PREDICATE,
                    relation.has_parent().to_named_node(),
                );
                self.graph.insert(
                    &relation_node,
                    vocab::HAS_CHILD_PREDICATE,
                    relation.has_child().to_named_node(),
                );
                self.graph
                    .insert(&node, vocab::HAS_STRUCTURAL_RELATION, relation_node);
            }
        }
        node
    }

    fn write_cardinality(&mut self, node: &Resource, cardinality: CardinalityConstraint) {
        self.graph.insert(
            node,
            vocab::HAS_MINIMUM,
            long_literal(i64::from(cardinality.min())),
        );
        if let Some(max) = cardinality.max() {
            self.graph
                .insert(node, vocab::HAS_MAXIMUM, long_literal(i64::from(max)));
        }
    }

    fn write_property_constraint(&mut self, constraint: &PropertyConstraint) -> Resource {
        let node = Resource::blank();
        self.graph.insert_type(&node, vocab::PROPERTY_CONSTRAINT);
        let target = self.write_property_type(constraint.property_type());
        self.graph
            .insert(&node, vocab::CONSTRAINS_PROPERTY_TYPE, target);
        self.write_cardinality(&node, constraint.cardinality());
        node
    }

    fn write_property_type(&mut self, property_type: &PropertyType) -> Resource {
        let resource = match self.claim(vocab::PROPERTY_TYPE, property_type.predicate()) {
            Claim::Visited(resource) => return resource,
            Claim::Fresh(resource) => resource,
        };
        self.describe(&resource, property_type.label(), property_type.description());
        self.graph.insert(
            &resource,
            vocab::HAS_VALUE_KIND,
            string_literal(property_type.kind().as_str()),
        );
        if let Some(hint) = property_type.hint() {
            self.graph
                .insert(&resource, vocab::HAS_VALUE_HINT, string_literal(hint.as_str()));
        }
        self.graph.insert(
            &resource,
            vocab::IS_READ_ONLY,
            bool_literal(property_type.is_read_only()),
        );
        if let Some(category) = property_type.category() {
            let node = self.category_ref(category);
            self.graph.insert(&resource, vocab::HAS_CATEGORY, node);
        }
        for allowed in property_type.allowed_values() {
            self.graph
                .insert(&resource, vocab::HAS_ALLOWED_VALUE, string_literal(allowed.as_str()));
        }
        for constraint in property_type.nested() {
            let node = self.write_property_constraint(constraint);
            self.graph
                .insert(&resource, vocab::HAS_NESTED_CONSTRAINT, node);
        }
        resource
    }

    fn category_ref(&mut self, id: &Iri) -> Resource {
        let profile = self.profile;
        match profile.property_category(id) {
            Some(category) => self.write_category(category),
            None => self.identities.reference(
                self.graph,
                vocab::PROPERTY_CATEGORY,
                vocab::HAS_IDENTIFIER,
                id,
            ),
        }
    }

    fn write_category(&mut self, category: &PropertyCategory) -> Resource {
        let resource = match self.claim(vocab::PROPERTY_CATEGORY, category.id()) {
            Claim::Visited(resource) => return resource,
            Claim::Fresh(resource) => resource,
        };
        self.describe(&resource, category.label(), category.description());
        resource
    }

    fn write_transform(&mut self, transform: &NodeTransform) -> Resource {
        let resource = match self.claim(vocab::NODE_TRANSFORM, transform.id()) {
            Claim::Visited(resource) => return resource,
            Claim::Fresh(resource) => resource,
        };
        self.describe(&resource, transform.label(), transform.description());
        let references = [
            (vocab::HAS_SOURCE_TYPE, transform.source_type()),
            (vocab::HAS_SOURCE_PARENT_TYPE, transform.source_parent_type()),
            (vocab::HAS_RESULT_TYPE, transform.result_type()),
            (vocab::HAS_RESULT_PARENT_TYPE, transform.result_parent_type()),
            (vocab::HAS_INSERT_PARENT_TYPE, transform.insert_parent_type()),
        ];
        for (predicate, node_type) in references {
            if let Some(node_type) = node_type {
                let node = self.node_type_ref(node_type);
                self.graph.insert(&resource, predicate, node);
            }
        }
        resource
    }

    fn write_value(&mut self, value: &PropertyValue) -> Resource {
        let node = Resource::blank();
        self.graph.insert_type(&node, vocab::PROPERTY_VALUE);
        let property_type = self.write_property_type(value.property_type());
        self.graph.insert(&node, vocab::VALUE_OF, property_type);
        match value.value() {
            Value::Complex(parts) => {
                for part in parts {
                    let nested = self.write_value(part);
                    self.graph.insert(&node, vocab::HAS_NESTED_VALUE, nested);
                }
            }
            simple => {
                if let Some(literal) = value_literal(simple) {
                    self.graph.insert(&node, vocab::HAS_VALUE, literal);
                }
            }
        }
        node
    }
}

struct ProfileReader<'g> {
    reader: GraphReader<'g>,
    property_types: HashMap<Iri, Arc<PropertyType>>,
    in_progress: HashSet<Iri>,
}

impl<'g> ProfileReader<'g> {
    fn new(graph: &'g TripleGraph) -> Self {
        Self {
            reader: GraphReader::new(graph),
            property_types: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn identifier(&self, resource: &Resource) -> Result<Iri, TransformError> {
        self.reader
            .iri(resource, vocab::HAS_IDENTIFIER)?
            .ok_or_else(|| TransformError::MissingStatement {
                subject: resource.to_string(),
                predicate: vocab::HAS_IDENTIFIER.as_str().to_string(),
            })
    }

    fn read_profile(&mut self, resource: &Resource) -> Result<DomainProfile, TransformError> {
        let mut profile = DomainProfile::new(self.identifier(resource)?);
        if let Some(label) = self.reader.string(resource, vocab::HAS_LABEL)? {
            profile = profile.with_label(label);
        }
        if let Some(description) = self.reader.string(resource, vocab::HAS_DESCRIPTION)? {
            profile = profile.with_description(description);
        }

        let mut node_types = Vec::new();
        for node in self.reader.resources(resource, vocab::HAS_NODE_TYPE)? {
            let position = self
                .reader
                .long(&node, vocab::HAS_POSITION)?
                .unwrap_or(i64::MAX);
            node_types.push((position, node));
        }
        node_types.sort_by_key(|(position, _)| *position);
        for (_, node) in node_types {
            let node_type = self.read_node_type(&node)?;
            profile.add_node_type(node_type)?;
        }

        for node in self.reader.resources(resource, vocab::HAS_PROPERTY_TYPE)? {
            let property_type = self.read_property_type(&node)?;
            profile.add_property_type(property_type)?;
        }
        for node in self
            .reader
            .resources(resource, vocab::HAS_PROPERTY_CATEGORY)?
        {
            let category = self.read_category(&node)?;
            profile.add_property_category(category)?;
        }
        for node in self.reader.resources(resource, vocab::HAS_NODE_TRANSFORM)? {
            let transform = self.read_transform(&node)?;
            profile.add_node_transform(transform)?;
        }

        tracing::debug!(
            profile = %profile.id(),
            node_types = profile.node_types().len(),
            property_types = profile.property_types().len(),
            "profile_read"
        );
        Ok(profile)
    }

    fn read_node_type(&mut self, resource: &Resource) -> Result<NodeType, TransformError> {
        let mut node_type = NodeType::new(self.identifier(resource)?);
        if let Some(label) = self.reader.string(resource, vocab::HAS_LABEL)? {
            node_type = node_type.with_label(label);
        }
        if let Some(description) = self.reader.string(resource, vocab::HAS_DESCRIPTION)? {
            node_type = node_type.with_description(description);
        }
        if let Some(requirement) = self.reader.string(resource, vocab::HAS_FILE_REQUIREMENT)? {
            node_type = node_type.with_file_requirement(requirement.parse()?);
        }
        if let Some(node) = self
            .reader
            .resource(resource, vocab::HAS_CHILD_FILE_CONSTRAINT)?
        {
            node_type = node_type.with_child_file_constraint(self.read_cardinality(&node)?);
        }

        for domain_type in self.reader.iris(resource, vocab::HAS_DOMAIN_TYPE)? {
            node_type.add_domain_type(domain_type);
        }
        for node in self
            .reader
            .resources(resource, vocab::HAS_PARENT_CONSTRAINT)?
        {
            node_type.add_parent_constraint(self.read_node_constraint(&node)?);
        }
        for node in self
            .reader
            .resources(resource, vocab::HAS_PROPERTY_CONSTRAINT)?
        {
            node_type.add_property_constraint(self.read_property_constraint(&node)?);
        }
        for node in self
            .reader
            .resources(resource, vocab::HAS_INHERITABLE_PROPERTY)?
        {
            node_type.add_inheritable_property(self.read_property_type(&node)?);
        }
        for node in self.reader.resources(resource, vocab::HAS_DEFAULT_VALUE)? {
            node_type.add_default_value(self.read_value(&node)?);
        }
        for node in self
            .reader
            .resources(resource, vocab::HAS_SUPPLIED_PROPERTY)?
        {
            let target = self
                .reader
                .required_resource(&node, vocab::CONSTRAINS_PROPERTY_TYPE)?;
            let property_type = self.read_property_type(&target)?;
            let source = self
                .reader
                .string(&node, vocab::SUPPLIED_BY)?
                .ok_or_else(|| TransformError::MissingStatement {
                    subject: node.to_string(),
                    predicate: vocab::SUPPLIED_BY.as_str().to_string(),
                })?;
            node_type.supply_property(property_type, source.parse()?);
        }
        Ok(node_type)
    }

    fn read_node_constraint(&self, resource: &Resource) -> Result<NodeConstraint, TransformError> {
        if self.reader.boolean(resource, vocab::MATCHES_ANY)? == Some(true) {
            return Ok(NodeConstraint::AnyParent);
        }
        if self.reader.boolean(resource, vocab::MATCHES_NONE)? == Some(true) {
            return Ok(NodeConstraint::NoParent);
        }
        let target = self
            .reader
            .required_resource(resource, vocab::CONSTRAINS_NODE_TYPE)?;
        let relation = self
            .reader
            .required_resource(resource, vocab::HAS_STRUCTURAL_RELATION)?;
        let has_parent = self
            .reader
            .iri(&relation, vocab::HAS_PARENT_PREDICATE)?
            .ok_or_else(|| TransformError::MissingStatement {
                subject: relation.to_string(),
                predicate: vocab::HAS_PARENT_PREDICATE.as_str().to_string(),
            })?;
        let has_child = self
            .reader
            .iri(&relation, vocab::HAS_CHILD_PREDICATE)?
            .ok_or_else(|| TransformError::MissingStatement {
                subject: relation.to_string(),
                predicate: vocab::HAS_CHILD_PREDICATE.as_str().to_string(),
            })?;
        Ok(NodeConstraint::parent(
            self.identifier(&target)?,
            StructuralRelation::new(has_parent, has_child),
        ))
    }

    fn read_cardinality(&self, resource: &Resource) -> Result<CardinalityConstraint, TransformError> {
        let bound = |value: i64| {
            u32::try_from(value).map_err(|_| TransformError::UnexpectedTerm {
                subject: resource.to_string(),
                predicate: vocab::HAS_MINIMUM.as_str().to_string(),
                expected: "non-negative bound",
                found: value.to_string(),
            })
        };
        let min = self
            .reader
            .long(resource, vocab::HAS_MINIMUM)?
            .map(bound)
            .transpose()?
            .unwrap_or(0);
        let max = self
            .reader
            .long(resource, vocab::HAS_MAXIMUM)?
            .map(bound)
            .transpose()?;
        Ok(CardinalityConstraint::new(min, max))
    }

    fn read_property_constraint(
        &mut self,
        resource: &Resource,
    ) -> Result<PropertyConstraint, TransformError> {
        let target = self
            .reader
            .required_resource(resource, vocab::CONSTRAINS_PROPERTY_TYPE)?;
        let property_type = self.read_property_type(&target)?;
        Ok(PropertyConstraint::new(
            property_type,
            self.read_cardinality(resource)?,
        ))
    }

    fn read_property_type(
        &mut self,
        resource: &Resource,
    ) -> Result<Arc<PropertyType>, TransformError> {
        let predicate = self.identifier(resource)?;
        if let Some(cached) = self.property_types.get(&predicate) {
            return Ok(Arc::clone(cached));
        }
        if !self.in_progress.insert(predicate.clone()) {
            return Err(TransformError::CyclicPropertyType(predicate));
        }

        let kind: ValueKind = self
            .reader
            .string(resource, vocab::HAS_VALUE_KIND)?
            .ok_or_else(|| TransformError::MissingStatement {
                subject: resource.to_string(),
                predicate: vocab::HAS_VALUE_KIND.as_str().to_string(),
            })?
            .parse()?;
        let mut property_type = PropertyType::new(predicate.clone(), kind);
        if let Some(label) = self.reader.string(resource, vocab::HAS_LABEL)? {
            property_type = property_type.with_label(label);
        }
        if let Some(description) = self.reader.string(resource, vocab::HAS_DESCRIPTION)? {
            property_type = property_type.with_description(description);
        }
        if let Some(hint) = self.reader.string(resource, vocab::HAS_VALUE_HINT)? {
            property_type = property_type.with_hint(hint.parse()?);
        }
        if let Some(read_only) = self.reader.boolean(resource, vocab::IS_READ_ONLY)? {
            property_type = property_type.read_only(read_only);
        }
        if let Some(category) = self.reader.resource(resource, vocab::HAS_CATEGORY)? {
            property_type = property_type.with_category(self.identifier(&category)?);
        }
        for allowed in self.reader.strings(resource, vocab::HAS_ALLOWED_VALUE)? {
            property_type = property_type.with_allowed_value(allowed);
        }
        for node in self
            .reader
            .resources(resource, vocab::HAS_NESTED_CONSTRAINT)?
        {
            property_type = property_type.with_nested(self.read_property_constraint(&node)?);
        }

        self.in_progress.remove(&predicate);
        let property_type = Arc::new(property_type);
        self.property_types
            .insert(predicate, Arc::clone(&property_type));
        Ok(property_type)
    }

    fn read_category(&self, resource: &Resource) -> Result<PropertyCategory, TransformError> {
        let mut category = PropertyCategory::new(self.identifier(resource)?);
        if let Some(label) = self.reader.string(resource, vocab::HAS_LABEL)? {
            category = category.with_label(label);
        }
        if let Some(description) = self.reader.string(resource, vocab::HAS_DESCRIPTION)? {
            category = category.with_description(description);
        }
        Ok(category)
    }

    fn read_transform(&self, resource: &Resource) -> Result<NodeTransform, TransformError> {
        let mut transform = NodeTransform::new(self.identifier(resource)?);
        if let Some(label) = self.reader.string(resource, vocab::HAS_LABEL)? {
            transform = transform.with_label(label);
        }
        if let Some(description) = self.reader.string(resource, vocab::HAS_DESCRIPTION)? {
            transform = transform.with_description(description);
        }
        if let Some(node) = self.reader.resource(resource, vocab::HAS_SOURCE_TYPE)? {
            transform = transform.with_source_type(self.identifier(&node)?);
        }
        if let Some(node) = self
            .reader
            .resource(resource, vocab::HAS_SOURCE_PARENT_TYPE)?
        {
            transform = transform.with_source_parent_type(self.identifier(&node)?);
        }
        if let Some(node) = self.reader.resource(resource, vocab::HAS_RESULT_TYPE)? {
            transform = transform.with_result_type(self.identifier(&node)?);
        }
        if let Some(node) = self
            .reader
            .resource(resource, vocab::HAS_RESULT_PARENT_TYPE)?
        {
            transform = transform.with_result_parent_type(self.identifier(&node)?);
        }
        if let Some(node) = self
            .reader
            .resource(resource, vocab::HAS_INSERT_PARENT_TYPE)?
        {
            transform = transform.with_insert_parent_type(self.identifier(&node)?);
        }
        Ok(transform)
    }

    fn read_value(&mut self, resource: &Resource) -> Result<PropertyValue, TransformError> {
        let target = self.reader.required_resource(resource, vocab::VALUE_OF)?;
        let property_type = self.read_property_type(&target)?;
        let value = match property_type.kind() {
            ValueKind::Complex => {
                let mut parts = Vec::new();
                for node in self.reader.resources(resource, vocab::HAS_NESTED_VALUE)? {
                    parts.push(self.read_value(&node)?);
                }
                Value::Complex(parts)
            }
            kind => {
                let term = self.reader.required(resource, vocab::HAS_VALUE)?;
                self.reader
                    .value(resource, vocab::HAS_VALUE, &term, kind)?
            }
        };
        Ok(PropertyValue::new(property_type, value)?)
    }
}
