//! Vocabulary of the persisted session document.
//!
//! Profile elements and tree nodes are anonymous graph nodes identified by an
//! identifier statement; these constants name the classes and predicates
//! connecting them.

use oxrdf::NamedNodeRef;

/// Domain profile vocabulary.
pub mod profile {
    use super::NamedNodeRef;

    pub const NAMESPACE: &str = "https://w3id.org/ipm/profile#";

    pub const DOMAIN_PROFILE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#DomainProfile");
    pub const NODE_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#NodeType");
    pub const NODE_CONSTRAINT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#NodeConstraint");
    pub const STRUCTURAL_RELATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#StructuralRelation");
    pub const PROPERTY_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#PropertyType");
    pub const PROPERTY_CONSTRAINT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#PropertyConstraint");
    pub const PROPERTY_CATEGORY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#PropertyCategory");
    pub const PROPERTY_VALUE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#PropertyValue");
    pub const SUPPLIED_PROPERTY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#SuppliedProperty");
    pub const NODE_TRANSFORM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#NodeTransform");

    pub const HAS_IDENTIFIER: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasIdentifier");
    pub const HAS_LABEL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasLabel");
    pub const HAS_DESCRIPTION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasDescription");
    pub const HAS_POSITION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasPosition");

    pub const HAS_NODE_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasNodeType");
    pub const HAS_PROPERTY_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasPropertyType");
    pub const HAS_PROPERTY_CATEGORY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasPropertyCategory");
    pub const HAS_NODE_TRANSFORM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasNodeTransform");

    pub const HAS_DOMAIN_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasDomainType");
    pub const HAS_PARENT_CONSTRAINT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasParentConstraint");
    pub const HAS_PROPERTY_CONSTRAINT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasPropertyConstraint");
    pub const HAS_INHERITABLE_PROPERTY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasInheritableProperty");
    pub const HAS_DEFAULT_VALUE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasDefaultValue");
    pub const HAS_SUPPLIED_PROPERTY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasSuppliedProperty");
    pub const SUPPLIED_BY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#suppliedBy");
    pub const HAS_FILE_REQUIREMENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasFileRequirement");
    pub const HAS_CHILD_FILE_CONSTRAINT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasChildFileConstraint");

    pub const MATCHES_ANY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#matchesAny");
    pub const MATCHES_NONE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#matchesNone");
    pub const CONSTRAINS_NODE_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#constrainsNodeType");
    pub const HAS_STRUCTURAL_RELATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasStructuralRelation");
    pub const HAS_PARENT_PREDICATE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasParentPredicate");
    pub const HAS_CHILD_PREDICATE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasChildPredicate");

    pub const CONSTRAINS_PROPERTY_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#constrainsPropertyType");
    pub const HAS_MINIMUM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasMinimum");
    pub const HAS_MAXIMUM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasMaximum");

    pub const HAS_VALUE_KIND: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasValueKind");
    pub const HAS_VALUE_HINT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasValueHint");
    pub const IS_READ_ONLY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#isReadOnly");
    pub const HAS_CATEGORY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasCategory");
    pub const HAS_ALLOWED_VALUE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasAllowedValue");
    pub const HAS_NESTED_CONSTRAINT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasNestedConstraint");

    pub const VALUE_OF: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#valueOf");
    pub const HAS_VALUE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasValue");
    pub const HAS_NESTED_VALUE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasNestedValue");

    pub const HAS_SOURCE_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasSourceType");
    pub const HAS_SOURCE_PARENT_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasSourceParentType");
    pub const HAS_RESULT_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasResultType");
    pub const HAS_RESULT_PARENT_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasResultParentType");
    pub const HAS_INSERT_PARENT_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/profile#hasInsertParentType");
}

/// Internal package model vocabulary.
pub mod ipm {
    use super::NamedNodeRef;

    pub const NAMESPACE: &str = "https://w3id.org/ipm/tree#";

    pub const IPM_NODE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#IPMNode");
    pub const FILE_INFO: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#FileInfo");
    pub const CHECKSUM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#Checksum");

    pub const HAS_ID: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasId");
    pub const HAS_PARENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasParent");
    pub const HAS_CHILD: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasChild");
    pub const HAS_CHILD_INDEX: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasChildIndex");
    pub const HAS_NODE_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasNodeType");
    pub const HAS_SUB_TYPE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasSubType");
    pub const HAS_FILE_INFO: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasFileInfo");
    pub const HAS_DOMAIN_OBJECT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasDomainObject");
    pub const IS_ROOT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#isRoot");
    pub const IS_IGNORED: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#isIgnored");
    /// Set when the node was ignored on its own account rather than through
    /// an ignored ancestor.
    pub const IS_SELF_IGNORED: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#isSelfIgnored");

    pub const FILE_LOCATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#fileLocation");
    pub const FILE_NAME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#fileName");
    pub const FILE_SIZE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#fileSize");
    pub const IS_BYTE_STREAM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#isByteStream");
    pub const IS_DIRECTORY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#isDirectory");
    pub const HAS_CHECKSUM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasChecksum");
    pub const CHECKSUM_ALGORITHM: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#checksumAlgorithm");
    pub const CHECKSUM_VALUE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#checksumValue");
    pub const HAS_FORMAT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#hasFormat");
    pub const CREATED: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#created");
    pub const MODIFIED: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("https://w3id.org/ipm/tree#modified");
}
