use std::sync::Arc;

use tracing::debug;

use super::entities::{DomainProfile, NodeType, ProfileError, PropertyType};
use super::value_objects::Iri;

/// Contract describing read-only resolution of node type identifiers.
///
/// The assignment engine consults a single profile; the materializer and the
/// tree transform resolve through this trait so a store layering several
/// profiles can stand in.
pub trait NodeTypeLookup {
    /// Resolves a node type by identifier.
    fn node_type(&self, id: &Iri) -> Option<&NodeType>;
}

impl NodeTypeLookup for DomainProfile {
    fn node_type(&self, id: &Iri) -> Option<&NodeType> {
        DomainProfile::node_type(self, id)
    }
}

/// Primary profile plus an optional secondary profile consulted only when the
/// primary has no match.
#[derive(Clone, Debug)]
pub struct DomainProfileStore {
    primary: Arc<DomainProfile>,
    secondary: Option<Arc<DomainProfile>>,
}

impl DomainProfileStore {
    #[must_use]
    pub fn new(primary: DomainProfile) -> Self {
        Self {
            primary: Arc::new(primary),
            secondary: None,
        }
    }

    #[must_use]
    pub fn with_secondary(mut self, secondary: DomainProfile) -> Self {
        self.secondary = Some(Arc::new(secondary));
        self
    }

    #[must_use]
    pub fn primary(&self) -> &DomainProfile {
        &self.primary
    }

    #[must_use]
    pub fn secondary(&self) -> Option<&DomainProfile> {
        self.secondary.as_deref()
    }

    /// Loaded profiles, primary first.
    pub fn profiles(&self) -> impl Iterator<Item = &DomainProfile> {
        std::iter::once(self.primary.as_ref()).chain(self.secondary.as_deref())
    }

    /// Checks that every concrete parent constraint of every loaded profile
    /// targets a node type some loaded profile declares.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::MissingNodeType`] for the first dangling
    /// target.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for profile in self.profiles() {
            for node_type in profile.node_types() {
                for constraint in node_type.parent_constraints() {
                    if let Some(target) = constraint.target_type() {
                        if NodeTypeLookup::node_type(self, target).is_none() {
                            return Err(ProfileError::MissingNodeType {
                                profile: profile.id().clone(),
                                node_type: target.clone(),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolves a property type by predicate, primary profile first.
    #[must_use]
    pub fn property_type(&self, predicate: &Iri) -> Option<&Arc<PropertyType>> {
        self.primary
            .property_type(predicate)
            .or_else(|| self.secondary.as_ref()?.property_type(predicate))
    }
}

impl NodeTypeLookup for DomainProfileStore {
    fn node_type(&self, id: &Iri) -> Option<&NodeType> {
        if let Some(node_type) = self.primary.node_type(id) {
            return Some(node_type);
        }
        let found = self.secondary.as_ref()?.node_type(id);
        if found.is_some() {
            debug!(node_type = %id, "node_type_resolved_from_secondary_profile");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainProfileStore, NodeTypeLookup};
    use crate::profile::{
        DomainProfile, Iri, NodeConstraint, NodeType, ProfileError, StructuralRelation,
    };

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid iri")
    }

    #[test]
    fn primary_profile_wins_over_secondary() {
        let mut primary = DomainProfile::new(iri("https://example.org/primary"));
        primary
            .add_node_type(NodeType::new(iri("https://example.org/Collection")).with_label("primary"))
            .expect("collection");

        let mut secondary = DomainProfile::new(iri("https://example.org/secondary"));
        secondary
            .add_node_type(
                NodeType::new(iri("https://example.org/Collection")).with_label("secondary"),
            )
            .expect("collection");
        secondary
            .add_node_type(NodeType::new(iri("https://example.org/Metadata")))
            .expect("metadata");

        let store = DomainProfileStore::new(primary).with_secondary(secondary);

        let collection = store
            .node_type(&iri("https://example.org/Collection"))
            .expect("resolved");
        assert_eq!(collection.label(), Some("primary"));
        assert!(store.node_type(&iri("https://example.org/Metadata")).is_some());
        assert!(store.node_type(&iri("https://example.org/Unknown")).is_none());
        assert_eq!(store.profiles().count(), 2);
    }

    #[test]
    fn constraints_may_target_the_other_profile() {
        let collection = iri("https://example.org/Collection");
        let mut primary = DomainProfile::new(iri("https://example.org/primary"));
        primary
            .add_node_type(NodeType::new(collection.clone()))
            .expect("collection");

        let mut extra = NodeType::new(iri("https://example.org/Extra"));
        extra.add_parent_constraint(NodeConstraint::parent(
            collection,
            StructuralRelation::new(
                iri("http://purl.org/dc/terms/isPartOf"),
                iri("http://purl.org/dc/terms/hasPart"),
            ),
        ));
        let mut secondary = DomainProfile::new(iri("https://example.org/secondary"));
        secondary.add_node_type(extra).expect("extra");
        assert!(secondary.validate().is_err());

        let store = DomainProfileStore::new(primary.clone()).with_secondary(secondary.clone());
        store.validate().expect("resolvable across profiles");

        let err = DomainProfileStore::new(secondary)
            .validate()
            .expect_err("dangling");
        assert!(matches!(err, ProfileError::MissingNodeType { .. }));
        DomainProfileStore::new(primary).validate().expect("valid");
    }
}
