//! Domain profile schema model.
//!
//! A domain profile declares the node types a package tree can be classified
//! into, the property types their domain objects carry and the structural
//! constraints tying a node type to acceptable parents. Everything here is
//! plain data; behavior lives in the assignment, materialization and transform
//! modules.

pub mod entities;
pub mod store;
pub mod value_objects;

pub use entities::{
    CardinalityConstraint, DomainProfile, NodeConstraint, NodeTransform, NodeType,
    ProfileError, PropertyCategory, PropertyConstraint, PropertyType, PropertyValue,
    Requirement, StructuralRelation, SuppliedProperty, Value, ValueHint, ValueKind,
};
pub use store::{DomainProfileStore, NodeTypeLookup};
pub use value_objects::{Iri, IriError};
