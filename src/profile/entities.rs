use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
    sync::Arc,
};

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use super::value_objects::Iri;

/// Inclusive occurrence bounds. A missing maximum means unbounded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CardinalityConstraint {
    min: u32,
    max: Option<u32>,
}

impl CardinalityConstraint {
    /// Creates a new constraint with the supplied bounds.
    #[must_use]
    pub const fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Exactly `count` occurrences.
    #[must_use]
    pub const fn exactly(count: u32) -> Self {
        Self::new(count, Some(count))
    }

    /// At least `count` occurrences, no upper bound.
    #[must_use]
    pub const fn at_least(count: u32) -> Self {
        Self::new(count, None)
    }

    /// Zero or one occurrence.
    #[must_use]
    pub const fn optional() -> Self {
        Self::new(0, Some(1))
    }

    #[must_use]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Option<u32> {
        self.max
    }

    /// Returns `true` when `count` lies within the bounds.
    #[must_use]
    pub fn contains(&self, count: usize) -> bool {
        count >= self.min as usize && self.max.map_or(true, |max| count <= max as usize)
    }

    /// Distance from `count` to the nearest admitted value, `0` when admitted.
    #[must_use]
    pub fn distance(&self, count: usize) -> usize {
        let min = self.min as usize;
        if count < min {
            return min - count;
        }
        match self.max {
            Some(max) if count > max as usize => count - max as usize,
            _ => 0,
        }
    }
}

/// Kind of value a [`PropertyType`] holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Long,
    DateTime,
    /// Values made of nested property values.
    Complex,
}

impl ValueKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Long => "long",
            Self::DateTime => "date-time",
            Self::Complex => "complex",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "long" => Ok(Self::Long),
            "date-time" => Ok(Self::DateTime),
            "complex" => Ok(Self::Complex),
            other => Err(ProfileError::UnknownKeyword {
                what: "value kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Presentation hint attached to a property type. Only carried, never
/// interpreted by the modeler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueHint {
    PhoneNumber,
    Email,
    Url,
    FileSize,
    Text,
}

impl ValueHint {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PhoneNumber => "phone-number",
            Self::Email => "email",
            Self::Url => "url",
            Self::FileSize => "file-size",
            Self::Text => "text",
        }
    }
}

impl FromStr for ValueHint {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone-number" => Ok(Self::PhoneNumber),
            "email" => Ok(Self::Email),
            "url" => Ok(Self::Url),
            "file-size" => Ok(Self::FileSize),
            "text" => Ok(Self::Text),
            other => Err(ProfileError::UnknownKeyword {
                what: "value hint",
                value: other.to_string(),
            }),
        }
    }
}

/// Declares a domain predicate, the kind of its values and, for complex
/// properties, the nested properties a value is made of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyType {
    predicate: Iri,
    label: Option<String>,
    description: Option<String>,
    kind: ValueKind,
    nested: Vec<PropertyConstraint>,
    hint: Option<ValueHint>,
    read_only: bool,
    category: Option<Iri>,
    allowed_values: Vec<String>,
}

impl PropertyType {
    /// Creates a property type for the given domain predicate.
    #[must_use]
    pub fn new(predicate: Iri, kind: ValueKind) -> Self {
        Self {
            predicate,
            label: None,
            description: None,
            kind,
            nested: Vec::new(),
            hint: None,
            read_only: false,
            category: None,
            allowed_values: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: ValueHint) -> Self {
        self.hint = Some(hint);
        self
    }

    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Iri) -> Self {
        self.category = Some(category);
        self
    }

    /// Declares a nested property for complex values.
    #[must_use]
    pub fn with_nested(mut self, constraint: PropertyConstraint) -> Self {
        self.nested.push(constraint);
        self
    }

    /// Restricts string values to a fixed vocabulary.
    #[must_use]
    pub fn with_allowed_value(mut self, value: impl Into<String>) -> Self {
        self.allowed_values.push(value.into());
        self
    }

    /// Domain predicate, also the identity of the property type.
    #[must_use]
    pub fn predicate(&self) -> &Iri {
        &self.predicate
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Nested property constraints; empty unless the kind is complex.
    #[must_use]
    pub fn nested(&self) -> &[PropertyConstraint] {
        &self.nested
    }

    #[must_use]
    pub fn hint(&self) -> Option<ValueHint> {
        self.hint
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn category(&self) -> Option<&Iri> {
        self.category.as_ref()
    }

    #[must_use]
    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }
}

/// Cardinality of a property type on a node type or inside a complex value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyConstraint {
    property_type: Arc<PropertyType>,
    cardinality: CardinalityConstraint,
}

impl PropertyConstraint {
    #[must_use]
    pub fn new(property_type: Arc<PropertyType>, cardinality: CardinalityConstraint) -> Self {
        Self {
            property_type,
            cardinality,
        }
    }

    #[must_use]
    pub fn property_type(&self) -> &Arc<PropertyType> {
        &self.property_type
    }

    #[must_use]
    pub fn cardinality(&self) -> CardinalityConstraint {
        self.cardinality
    }
}

/// Payload of a [`PropertyValue`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    String(String),
    Long(i64),
    DateTime(DateTime<Utc>),
    Complex(Vec<PropertyValue>),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Long(_) => ValueKind::Long,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Complex(_) => ValueKind::Complex,
        }
    }

    /// Lexical form used as literal text; complex values render their nested
    /// values recursively.
    #[must_use]
    pub fn lexical(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            Self::Long(value) => value.to_string(),
            Self::DateTime(value) => value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Self::Complex(values) => {
                let parts: Vec<String> = values
                    .iter()
                    .map(|value| format!("{}={}", value.predicate(), value.value().lexical()))
                    .collect();
                format!("[{}]", parts.join(";"))
            }
        }
    }
}

/// A value bound to the property type it populates.
#[derive(Clone, Debug)]
pub struct PropertyValue {
    property_type: Arc<PropertyType>,
    value: Value,
}

impl PropertyValue {
    /// Binds `value` to `property_type`, checking the value kind, the nested
    /// predicates of complex values and the allowed vocabulary.
    pub fn new(property_type: Arc<PropertyType>, value: Value) -> Result<Self, ProfileError> {
        if value.kind() != property_type.kind() {
            return Err(ProfileError::ValueKindMismatch {
                predicate: property_type.predicate().clone(),
                expected: property_type.kind(),
                found: value.kind(),
            });
        }
        match &value {
            Value::String(text) => {
                let allowed = property_type.allowed_values();
                if !allowed.is_empty() && !allowed.iter().any(|candidate| candidate == text) {
                    return Err(ProfileError::DisallowedValue {
                        predicate: property_type.predicate().clone(),
                        value: text.clone(),
                    });
                }
            }
            Value::Complex(values) => {
                for nested in values {
                    let declared = property_type
                        .nested()
                        .iter()
                        .any(|constraint| constraint.property_type().predicate() == nested.predicate());
                    if !declared {
                        return Err(ProfileError::UnexpectedNestedProperty {
                            predicate: property_type.predicate().clone(),
                            nested: nested.predicate().clone(),
                        });
                    }
                }
            }
            Value::Long(_) | Value::DateTime(_) => {}
        }
        Ok(Self {
            property_type,
            value,
        })
    }

    pub fn string(
        property_type: Arc<PropertyType>,
        value: impl Into<String>,
    ) -> Result<Self, ProfileError> {
        Self::new(property_type, Value::String(value.into()))
    }

    pub fn long(property_type: Arc<PropertyType>, value: i64) -> Result<Self, ProfileError> {
        Self::new(property_type, Value::Long(value))
    }

    pub fn date_time(
        property_type: Arc<PropertyType>,
        value: DateTime<Utc>,
    ) -> Result<Self, ProfileError> {
        Self::new(property_type, Value::DateTime(value))
    }

    pub fn complex(
        property_type: Arc<PropertyType>,
        values: Vec<PropertyValue>,
    ) -> Result<Self, ProfileError> {
        Self::new(property_type, Value::Complex(values))
    }

    #[must_use]
    pub fn property_type(&self) -> &Arc<PropertyType> {
        &self.property_type
    }

    #[must_use]
    pub fn predicate(&self) -> &Iri {
        self.property_type.predicate()
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Copy with nested values sorted, so complex values compare equal
    /// regardless of the order their parts were read in.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let value = match &self.value {
            Value::Complex(values) => {
                let mut nested: Vec<PropertyValue> = values.iter().map(Self::canonical).collect();
                nested.sort_by_cached_key(|value| {
                    (value.predicate().clone(), value.value().lexical())
                });
                Value::Complex(nested)
            }
            other => other.clone(),
        };
        Self {
            property_type: Arc::clone(&self.property_type),
            value,
        }
    }

    /// Order-insensitive equality for complex values.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        self.predicate() == other.predicate() && self.value == other.value
    }
}

impl Eq for PropertyValue {}

/// Grouping of property types for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyCategory {
    id: Iri,
    label: Option<String>,
    description: Option<String>,
}

impl PropertyCategory {
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            label: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Reciprocal predicate pair linking a child domain object to its parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructuralRelation {
    has_parent: Iri,
    has_child: Iri,
}

impl StructuralRelation {
    #[must_use]
    pub fn new(has_parent: Iri, has_child: Iri) -> Self {
        Self {
            has_parent,
            has_child,
        }
    }

    /// Predicate written from the child object to the parent object.
    #[must_use]
    pub fn has_parent(&self) -> &Iri {
        &self.has_parent
    }

    /// Predicate written from the parent object to the child object.
    #[must_use]
    pub fn has_child(&self) -> &Iri {
        &self.has_child
    }
}

/// Acceptable parent for a node type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeConstraint {
    /// Any parent, including none.
    AnyParent,
    /// Only the root position.
    NoParent,
    /// A parent of the given node type, linked through `relation`.
    Parent {
        node_type: Iri,
        relation: StructuralRelation,
    },
}

impl NodeConstraint {
    #[must_use]
    pub fn parent(node_type: Iri, relation: StructuralRelation) -> Self {
        Self::Parent {
            node_type,
            relation,
        }
    }

    /// Node type a concrete constraint points at.
    #[must_use]
    pub fn target_type(&self) -> Option<&Iri> {
        match self {
            Self::Parent { node_type, .. } => Some(node_type),
            Self::AnyParent | Self::NoParent => None,
        }
    }

    #[must_use]
    pub fn relation(&self) -> Option<&StructuralRelation> {
        match self {
            Self::Parent { relation, .. } => Some(relation),
            Self::AnyParent | Self::NoParent => None,
        }
    }
}

/// Whether a node type must, may or must not be backed by a byte stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Requirement {
    Must,
    #[default]
    May,
    MustNot,
}

impl Requirement {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::May => "may",
            Self::MustNot => "must-not",
        }
    }

    /// Returns `true` when a node with the given file kind satisfies the
    /// requirement.
    #[must_use]
    pub fn admits(self, is_byte_stream: bool) -> bool {
        match self {
            Self::Must => is_byte_stream,
            Self::May => true,
            Self::MustNot => !is_byte_stream,
        }
    }
}

impl FromStr for Requirement {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "must" => Ok(Self::Must),
            "may" => Ok(Self::May),
            "must-not" => Ok(Self::MustNot),
            other => Err(ProfileError::UnknownKeyword {
                what: "file requirement",
                value: other.to_string(),
            }),
        }
    }
}

/// File metadata a property value can be computed from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SuppliedProperty {
    FileCreatedDate,
    FileModifiedDate,
    FileName,
    FileSize,
    FileFormatUri,
}

impl SuppliedProperty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileCreatedDate => "file-created-date",
            Self::FileModifiedDate => "file-modified-date",
            Self::FileName => "file-name",
            Self::FileSize => "file-size",
            Self::FileFormatUri => "file-format-uri",
        }
    }
}

impl FromStr for SuppliedProperty {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file-created-date" => Ok(Self::FileCreatedDate),
            "file-modified-date" => Ok(Self::FileModifiedDate),
            "file-name" => Ok(Self::FileName),
            "file-size" => Ok(Self::FileSize),
            "file-format-uri" => Ok(Self::FileFormatUri),
            other => Err(ProfileError::UnknownKeyword {
                what: "supplied property",
                value: other.to_string(),
            }),
        }
    }
}

/// Semantic category a tree node can be assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeType {
    id: Iri,
    label: Option<String>,
    description: Option<String>,
    domain_types: Vec<Iri>,
    parent_constraints: Vec<NodeConstraint>,
    property_constraints: Vec<PropertyConstraint>,
    inheritable_properties: Vec<Arc<PropertyType>>,
    default_values: Vec<PropertyValue>,
    supplied_properties: Vec<(Arc<PropertyType>, SuppliedProperty)>,
    file_requirement: Requirement,
    child_file_constraint: Option<CardinalityConstraint>,
}

impl NodeType {
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            label: None,
            description: None,
            domain_types: Vec::new(),
            parent_constraints: Vec::new(),
            property_constraints: Vec::new(),
            inheritable_properties: Vec::new(),
            default_values: Vec::new(),
            supplied_properties: Vec::new(),
            file_requirement: Requirement::May,
            child_file_constraint: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_file_requirement(mut self, requirement: Requirement) -> Self {
        self.file_requirement = requirement;
        self
    }

    /// Preferred number of byte-stream children, used to rank candidates.
    #[must_use]
    pub fn with_child_file_constraint(mut self, constraint: CardinalityConstraint) -> Self {
        self.child_file_constraint = Some(constraint);
        self
    }

    /// Adds an RDF class the materialized domain object carries.
    pub fn add_domain_type(&mut self, domain_type: Iri) -> bool {
        if self.domain_types.contains(&domain_type) {
            return false;
        }
        self.domain_types.push(domain_type);
        true
    }

    pub fn add_parent_constraint(&mut self, constraint: NodeConstraint) {
        self.parent_constraints.push(constraint);
    }

    pub fn add_property_constraint(&mut self, constraint: PropertyConstraint) {
        self.property_constraints.push(constraint);
    }

    pub fn add_inheritable_property(&mut self, property_type: Arc<PropertyType>) {
        self.inheritable_properties.push(property_type);
    }

    pub fn add_default_value(&mut self, value: PropertyValue) {
        self.default_values.push(value);
    }

    /// Maps a property type to the file metadata supplying it, replacing any
    /// previous mapping for the same predicate.
    pub fn supply_property(&mut self, property_type: Arc<PropertyType>, source: SuppliedProperty) {
        self.supplied_properties
            .retain(|(existing, _)| existing.predicate() != property_type.predicate());
        self.supplied_properties.push((property_type, source));
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn domain_types(&self) -> &[Iri] {
        &self.domain_types
    }

    #[must_use]
    pub fn parent_constraints(&self) -> &[NodeConstraint] {
        &self.parent_constraints
    }

    #[must_use]
    pub fn property_constraints(&self) -> &[PropertyConstraint] {
        &self.property_constraints
    }

    #[must_use]
    pub fn inheritable_properties(&self) -> &[Arc<PropertyType>] {
        &self.inheritable_properties
    }

    #[must_use]
    pub fn default_values(&self) -> &[PropertyValue] {
        &self.default_values
    }

    #[must_use]
    pub fn supplied_properties(&self) -> &[(Arc<PropertyType>, SuppliedProperty)] {
        &self.supplied_properties
    }

    #[must_use]
    pub fn file_requirement(&self) -> Requirement {
        self.file_requirement
    }

    #[must_use]
    pub fn child_file_constraint(&self) -> Option<CardinalityConstraint> {
        self.child_file_constraint
    }

    /// First concrete constraint targeting `parent_type`.
    #[must_use]
    pub fn constraint_for_parent(&self, parent_type: &Iri) -> Option<&NodeConstraint> {
        self.parent_constraints
            .iter()
            .find(|constraint| constraint.target_type() == Some(parent_type))
    }

    #[must_use]
    pub fn accepts_any_parent(&self) -> bool {
        self.parent_constraints
            .iter()
            .any(|constraint| matches!(constraint, NodeConstraint::AnyParent))
    }

    /// Candidate rank for a node with `byte_stream_children` file children:
    /// `0` when the preferred count admits it, `1` without a preference, and
    /// `1 + distance` otherwise.
    #[must_use]
    pub fn preference_rank(&self, byte_stream_children: usize) -> usize {
        match self.child_file_constraint {
            Some(constraint) if constraint.contains(byte_stream_children) => 0,
            Some(constraint) => 1 + constraint.distance(byte_stream_children),
            None => 1,
        }
    }
}

/// Structural rewrite rule. Stored and persisted only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeTransform {
    id: Iri,
    label: Option<String>,
    description: Option<String>,
    source_type: Option<Iri>,
    source_parent_type: Option<Iri>,
    result_type: Option<Iri>,
    result_parent_type: Option<Iri>,
    insert_parent_type: Option<Iri>,
}

impl NodeTransform {
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            label: None,
            description: None,
            source_type: None,
            source_parent_type: None,
            result_type: None,
            result_parent_type: None,
            insert_parent_type: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_source_type(mut self, node_type: Iri) -> Self {
        self.source_type = Some(node_type);
        self
    }

    #[must_use]
    pub fn with_source_parent_type(mut self, node_type: Iri) -> Self {
        self.source_parent_type = Some(node_type);
        self
    }

    #[must_use]
    pub fn with_result_type(mut self, node_type: Iri) -> Self {
        self.result_type = Some(node_type);
        self
    }

    #[must_use]
    pub fn with_result_parent_type(mut self, node_type: Iri) -> Self {
        self.result_parent_type = Some(node_type);
        self
    }

    #[must_use]
    pub fn with_insert_parent_type(mut self, node_type: Iri) -> Self {
        self.insert_parent_type = Some(node_type);
        self
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn source_type(&self) -> Option<&Iri> {
        self.source_type.as_ref()
    }

    #[must_use]
    pub fn source_parent_type(&self) -> Option<&Iri> {
        self.source_parent_type.as_ref()
    }

    #[must_use]
    pub fn result_type(&self) -> Option<&Iri> {
        self.result_type.as_ref()
    }

    #[must_use]
    pub fn result_parent_type(&self) -> Option<&Iri> {
        self.result_parent_type.as_ref()
    }

    #[must_use]
    pub fn insert_parent_type(&self) -> Option<&Iri> {
        self.insert_parent_type.as_ref()
    }
}

/// Declarative schema of node types and property types used to classify a
/// tree.
///
/// Node types keep their insertion order, which is the tie-break order used by
/// the assignment engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainProfile {
    id: Iri,
    label: Option<String>,
    description: Option<String>,
    node_types: Vec<NodeType>,
    property_types: Vec<Arc<PropertyType>>,
    property_categories: Vec<PropertyCategory>,
    node_transforms: Vec<NodeTransform>,
}

impl DomainProfile {
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            label: None,
            description: None,
            node_types: Vec::new(),
            property_types: Vec::new(),
            property_categories: Vec::new(),
            node_transforms: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a node type, enforcing unique identifiers.
    pub fn add_node_type(&mut self, node_type: NodeType) -> Result<(), ProfileError> {
        if self.node_type(node_type.id()).is_some() {
            return Err(ProfileError::DuplicateNodeType(node_type.id().clone()));
        }
        self.node_types.push(node_type);
        Ok(())
    }

    /// Adds a property type, enforcing unique predicates.
    pub fn add_property_type(
        &mut self,
        property_type: Arc<PropertyType>,
    ) -> Result<(), ProfileError> {
        if self.property_type(property_type.predicate()).is_some() {
            return Err(ProfileError::DuplicatePropertyType(
                property_type.predicate().clone(),
            ));
        }
        self.property_types.push(property_type);
        Ok(())
    }

    pub fn add_property_category(&mut self, category: PropertyCategory) -> Result<(), ProfileError> {
        if self.property_category(category.id()).is_some() {
            return Err(ProfileError::DuplicateCategory(category.id().clone()));
        }
        self.property_categories.push(category);
        Ok(())
    }

    pub fn add_node_transform(&mut self, transform: NodeTransform) -> Result<(), ProfileError> {
        if self
            .node_transforms
            .iter()
            .any(|existing| existing.id() == transform.id())
        {
            return Err(ProfileError::DuplicateTransform(transform.id().clone()));
        }
        self.node_transforms.push(transform);
        Ok(())
    }

    /// Checks that every concrete parent constraint targets a node type of
    /// this profile.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for node_type in &self.node_types {
            for constraint in node_type.parent_constraints() {
                if let Some(target) = constraint.target_type() {
                    if self.node_type(target).is_none() {
                        return Err(ProfileError::MissingNodeType {
                            profile: self.id.clone(),
                            node_type: target.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn node_types(&self) -> &[NodeType] {
        &self.node_types
    }

    #[must_use]
    pub fn node_type(&self, id: &Iri) -> Option<&NodeType> {
        self.node_types.iter().find(|node_type| node_type.id() == id)
    }

    #[must_use]
    pub fn property_types(&self) -> &[Arc<PropertyType>] {
        &self.property_types
    }

    #[must_use]
    pub fn property_type(&self, predicate: &Iri) -> Option<&Arc<PropertyType>> {
        self.property_types
            .iter()
            .find(|property_type| property_type.predicate() == predicate)
    }

    #[must_use]
    pub fn property_categories(&self) -> &[PropertyCategory] {
        &self.property_categories
    }

    #[must_use]
    pub fn property_category(&self, id: &Iri) -> Option<&PropertyCategory> {
        self.property_categories
            .iter()
            .find(|category| category.id() == id)
    }

    #[must_use]
    pub fn node_transforms(&self) -> &[NodeTransform] {
        &self.node_transforms
    }
}

/// Errors raised when building or validating a domain profile.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("node type `{0}` already exists")]
    DuplicateNodeType(Iri),
    #[error("property type `{0}` already exists")]
    DuplicatePropertyType(Iri),
    #[error("property category `{0}` already exists")]
    DuplicateCategory(Iri),
    #[error("node transform `{0}` already exists")]
    DuplicateTransform(Iri),
    /// A parent constraint references a node type the profile lacks.
    #[error("node type `{node_type}` does not exist in profile `{profile}`")]
    MissingNodeType { profile: Iri, node_type: Iri },
    #[error("property `{predicate}` expects {expected} values, got {found}")]
    ValueKindMismatch {
        predicate: Iri,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("property `{nested}` is not declared inside complex property `{predicate}`")]
    UnexpectedNestedProperty { predicate: Iri, nested: Iri },
    #[error("value `{value}` is not allowed for property `{predicate}`")]
    DisallowedValue { predicate: Iri, value: String },
    #[error("unknown {what} `{value}`")]
    UnknownKeyword { what: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid iri")
    }

    fn title() -> Arc<PropertyType> {
        Arc::new(PropertyType::new(
            iri("http://purl.org/dc/terms/title"),
            ValueKind::String,
        ))
    }

    #[rstest]
    #[case(CardinalityConstraint::exactly(1), 1, 0)]
    #[case(CardinalityConstraint::exactly(1), 3, 2)]
    #[case(CardinalityConstraint::at_least(2), 0, 2)]
    #[case(CardinalityConstraint::at_least(2), 40, 0)]
    #[case(CardinalityConstraint::optional(), 2, 1)]
    fn cardinality_distance(
        #[case] constraint: CardinalityConstraint,
        #[case] count: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(constraint.distance(count), expected);
        assert_eq!(constraint.contains(count), expected == 0);
    }

    #[rstest]
    #[case(Requirement::Must, true, true)]
    #[case(Requirement::Must, false, false)]
    #[case(Requirement::May, false, true)]
    #[case(Requirement::MustNot, true, false)]
    #[case(Requirement::MustNot, false, true)]
    fn requirement_admits_file_kind(
        #[case] requirement: Requirement,
        #[case] is_byte_stream: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(requirement.admits(is_byte_stream), expected);
    }

    #[test]
    fn property_value_rejects_wrong_kind() {
        let err = PropertyValue::long(title(), 3).expect_err("kind mismatch");
        assert!(matches!(
            err,
            ProfileError::ValueKindMismatch {
                expected: ValueKind::String,
                found: ValueKind::Long,
                ..
            }
        ));
    }

    #[test]
    fn property_value_enforces_allowed_values() {
        let status = Arc::new(
            PropertyType::new(iri("https://example.org/status"), ValueKind::String)
                .with_allowed_value("draft")
                .with_allowed_value("final"),
        );
        assert!(PropertyValue::string(Arc::clone(&status), "final").is_ok());
        let err = PropertyValue::string(status, "lost").expect_err("disallowed");
        assert!(matches!(err, ProfileError::DisallowedValue { value, .. } if value == "lost"));
    }

    #[test]
    fn complex_values_only_accept_declared_parts() {
        let name = Arc::new(PropertyType::new(
            iri("http://xmlns.com/foaf/0.1/name"),
            ValueKind::String,
        ));
        let creator = Arc::new(
            PropertyType::new(iri("http://purl.org/dc/terms/creator"), ValueKind::Complex)
                .with_nested(PropertyConstraint::new(
                    Arc::clone(&name),
                    CardinalityConstraint::exactly(1),
                )),
        );
        let part = PropertyValue::string(name, "Ada").expect("name");
        assert!(PropertyValue::complex(Arc::clone(&creator), vec![part]).is_ok());

        let stray = PropertyValue::string(title(), "stray").expect("title");
        let err = PropertyValue::complex(creator, vec![stray]).expect_err("undeclared part");
        assert!(matches!(err, ProfileError::UnexpectedNestedProperty { .. }));
    }

    #[test]
    fn complex_equivalence_ignores_part_order() {
        let name = Arc::new(PropertyType::new(
            iri("http://xmlns.com/foaf/0.1/name"),
            ValueKind::String,
        ));
        let mbox = Arc::new(PropertyType::new(
            iri("http://xmlns.com/foaf/0.1/mbox"),
            ValueKind::String,
        ));
        let contact = Arc::new(
            PropertyType::new(iri("https://example.org/contact"), ValueKind::Complex)
                .with_nested(PropertyConstraint::new(
                    Arc::clone(&name),
                    CardinalityConstraint::optional(),
                ))
                .with_nested(PropertyConstraint::new(
                    Arc::clone(&mbox),
                    CardinalityConstraint::optional(),
                )),
        );
        let first = PropertyValue::complex(
            Arc::clone(&contact),
            vec![
                PropertyValue::string(Arc::clone(&name), "Ada").expect("name"),
                PropertyValue::string(Arc::clone(&mbox), "ada@example.org").expect("mbox"),
            ],
        )
        .expect("contact");
        let second = PropertyValue::complex(
            contact,
            vec![
                PropertyValue::string(mbox, "ada@example.org").expect("mbox"),
                PropertyValue::string(name, "Ada").expect("name"),
            ],
        )
        .expect("contact");
        assert_ne!(first, second);
        assert!(first.equivalent(&second));
    }

    #[test]
    fn profile_rejects_duplicates_and_dangling_constraints() {
        let mut profile = DomainProfile::new(iri("https://example.org/profile"));
        profile
            .add_node_type(NodeType::new(iri("https://example.org/Collection")))
            .expect("collection");
        let err = profile
            .add_node_type(NodeType::new(iri("https://example.org/Collection")))
            .expect_err("duplicate");
        assert!(matches!(err, ProfileError::DuplicateNodeType(_)));

        let mut file = NodeType::new(iri("https://example.org/DataFile"));
        file.add_parent_constraint(NodeConstraint::parent(
            iri("https://example.org/Missing"),
            StructuralRelation::new(
                iri("http://purl.org/dc/terms/isPartOf"),
                iri("http://purl.org/dc/terms/hasPart"),
            ),
        ));
        profile.add_node_type(file).expect("file");
        let err = profile.validate().expect_err("dangling");
        assert!(matches!(err, ProfileError::MissingNodeType { .. }));
    }

    #[test]
    fn preference_rank_prefers_admitted_counts() {
        let hinted = NodeType::new(iri("https://example.org/DataItem"))
            .with_child_file_constraint(CardinalityConstraint::at_least(1));
        let plain = NodeType::new(iri("https://example.org/Collection"));
        assert_eq!(hinted.preference_rank(3), 0);
        assert_eq!(plain.preference_rank(3), 1);
        assert_eq!(hinted.preference_rank(0), 2);
    }

    #[test]
    fn supplying_a_property_twice_replaces_the_mapping() {
        let name = Arc::new(PropertyType::new(
            iri("https://example.org/fileName"),
            ValueKind::String,
        ));
        let mut file = NodeType::new(iri("https://example.org/DataFile"));
        file.supply_property(Arc::clone(&name), SuppliedProperty::FileName);
        file.supply_property(name, SuppliedProperty::FileFormatUri);
        assert_eq!(file.supplied_properties().len(), 1);
        assert_eq!(
            file.supplied_properties()[0].1,
            SuppliedProperty::FileFormatUri
        );
        assert_eq!(
            "file-format-uri".parse::<SuppliedProperty>().expect("keyword"),
            SuppliedProperty::FileFormatUri
        );
    }
}
