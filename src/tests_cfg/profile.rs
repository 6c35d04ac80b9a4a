use std::sync::Arc;

use crate::profile::{
    CardinalityConstraint, DomainProfile, Iri, NodeConstraint, NodeTransform, NodeType,
    PropertyCategory, PropertyConstraint, PropertyType, PropertyValue, Requirement,
    StructuralRelation, SuppliedProperty, ValueHint, ValueKind,
};

pub const IS_MEMBER_OF: &str = "https://example.org/terms/isMemberOf";
pub const HAS_MEMBER: &str = "https://example.org/terms/hasMember";
pub const COLLECTION_CLASS: &str = "http://pcdm.org/models#Collection";
pub const FILE_CLASS: &str = "http://pcdm.org/models#File";

fn iri(text: &str) -> Iri {
    Iri::new(text).expect("fixture iri")
}

#[must_use]
pub fn collection_type() -> Iri {
    iri("https://example.org/ipm/Collection")
}

#[must_use]
pub fn data_file_type() -> Iri {
    iri("https://example.org/ipm/DataFile")
}

#[must_use]
pub fn member_relation() -> StructuralRelation {
    StructuralRelation::new(iri(IS_MEMBER_OF), iri(HAS_MEMBER))
}

#[must_use]
pub fn title_property() -> Arc<PropertyType> {
    Arc::new(
        PropertyType::new(iri("http://purl.org/dc/terms/title"), ValueKind::String)
            .with_label("Title")
            .with_hint(ValueHint::Text),
    )
}

#[must_use]
pub fn extent_property() -> Arc<PropertyType> {
    Arc::new(
        PropertyType::new(iri("http://purl.org/dc/terms/extent"), ValueKind::Long)
            .with_label("Size")
            .with_hint(ValueHint::FileSize)
            .read_only(true),
    )
}

#[must_use]
pub fn format_property() -> Arc<PropertyType> {
    Arc::new(
        PropertyType::new(iri("http://purl.org/dc/terms/format"), ValueKind::String)
            .with_label("Format")
            .read_only(true),
    )
}

#[must_use]
pub fn name_property() -> Arc<PropertyType> {
    Arc::new(PropertyType::new(
        iri("http://xmlns.com/foaf/0.1/name"),
        ValueKind::String,
    ))
}

#[must_use]
pub fn mbox_property() -> Arc<PropertyType> {
    Arc::new(
        PropertyType::new(iri("http://xmlns.com/foaf/0.1/mbox"), ValueKind::String)
            .with_hint(ValueHint::Email),
    )
}

/// Complex creator made of a name and an optional mailbox.
#[must_use]
pub fn creator_property() -> Arc<PropertyType> {
    Arc::new(
        PropertyType::new(iri("http://purl.org/dc/terms/creator"), ValueKind::Complex)
            .with_label("Creator")
            .with_nested(PropertyConstraint::new(
                name_property(),
                CardinalityConstraint::exactly(1),
            ))
            .with_nested(PropertyConstraint::new(
                mbox_property(),
                CardinalityConstraint::optional(),
            )),
    )
}

#[must_use]
pub fn creator_value(name: &str, mbox: &str) -> PropertyValue {
    PropertyValue::complex(
        creator_property(),
        vec![
            PropertyValue::string(name_property(), name).expect("name"),
            PropertyValue::string(mbox_property(), mbox).expect("mbox"),
        ],
    )
    .expect("creator")
}

/// `Collection` at the root holding `DataFile` members.
#[must_use]
pub fn collection_data_file() -> DomainProfile {
    let mut collection = NodeType::new(collection_type())
        .with_label("Collection")
        .with_file_requirement(Requirement::MustNot);
    collection.add_domain_type(iri(COLLECTION_CLASS));
    collection.add_parent_constraint(NodeConstraint::NoParent);
    collection.add_property_constraint(PropertyConstraint::new(
        title_property(),
        CardinalityConstraint::optional(),
    ));
    collection.add_property_constraint(PropertyConstraint::new(
        creator_property(),
        CardinalityConstraint::at_least(0),
    ));
    collection.add_default_value(creator_value("Packaging Unit", "packaging@example.org"));

    let mut data_file = NodeType::new(data_file_type())
        .with_label("Data file")
        .with_file_requirement(Requirement::Must);
    data_file.add_domain_type(iri(FILE_CLASS));
    data_file.add_parent_constraint(NodeConstraint::parent(
        collection_type(),
        member_relation(),
    ));
    for property_type in [title_property(), extent_property(), format_property()] {
        data_file.add_property_constraint(PropertyConstraint::new(
            property_type,
            CardinalityConstraint::at_least(0),
        ));
    }
    data_file.supply_property(title_property(), SuppliedProperty::FileName);
    data_file.supply_property(extent_property(), SuppliedProperty::FileSize);
    data_file.supply_property(format_property(), SuppliedProperty::FileFormatUri);

    let mut profile = DomainProfile::new(iri("https://example.org/profiles/collection"))
        .with_label("Collections of data files");
    profile.add_node_type(collection).expect("collection");
    profile.add_node_type(data_file).expect("data file");
    for property_type in [
        title_property(),
        extent_property(),
        format_property(),
        creator_property(),
    ] {
        profile.add_property_type(property_type).expect("property type");
    }
    profile.validate().expect("valid profile");
    profile
}

/// Folders nesting inside folders, items holding files, and every optional
/// schema feature populated.
#[must_use]
pub fn nested_collections() -> DomainProfile {
    let descriptive = PropertyCategory::new(iri("https://example.org/categories/descriptive"))
        .with_label("Descriptive");
    let technical = PropertyCategory::new(iri("https://example.org/categories/technical"))
        .with_label("Technical")
        .with_description("Computed from files");

    let status = Arc::new(
        PropertyType::new(iri("https://example.org/terms/status"), ValueKind::String)
            .with_category(descriptive.id().clone())
            .with_allowed_value("draft")
            .with_allowed_value("final"),
    );
    let created = Arc::new(
        PropertyType::new(iri("http://purl.org/dc/terms/created"), ValueKind::DateTime)
            .with_category(technical.id().clone())
            .read_only(true),
    );
    let modified = Arc::new(
        PropertyType::new(iri("http://purl.org/dc/terms/modified"), ValueKind::DateTime)
            .with_category(technical.id().clone())
            .read_only(true),
    );
    let part_of = StructuralRelation::new(
        iri("http://purl.org/dc/terms/isPartOf"),
        iri("http://purl.org/dc/terms/hasPart"),
    );

    let folder_type = iri("https://example.org/ipm/Folder");
    let item_type = iri("https://example.org/ipm/Item");
    let file_type = iri("https://example.org/ipm/File");

    let mut folder = NodeType::new(folder_type.clone())
        .with_label("Folder")
        .with_description("Directory grouping items and other folders")
        .with_file_requirement(Requirement::MustNot);
    folder.add_domain_type(iri(COLLECTION_CLASS));
    folder.add_parent_constraint(NodeConstraint::NoParent);
    folder.add_parent_constraint(NodeConstraint::parent(folder_type.clone(), part_of.clone()));
    folder.add_property_constraint(PropertyConstraint::new(
        Arc::clone(&status),
        CardinalityConstraint::exactly(1),
    ));
    folder.add_property_constraint(PropertyConstraint::new(
        creator_property(),
        CardinalityConstraint::at_least(0),
    ));
    folder.add_inheritable_property(creator_property());
    folder.add_default_value(PropertyValue::string(Arc::clone(&status), "draft").expect("status"));
    folder.add_default_value(creator_value("Archivist", "archives@example.org"));

    let mut item = NodeType::new(item_type.clone())
        .with_label("Item")
        .with_file_requirement(Requirement::MustNot)
        .with_child_file_constraint(CardinalityConstraint::at_least(1));
    item.add_domain_type(iri("http://pcdm.org/models#Object"));
    item.add_parent_constraint(NodeConstraint::parent(
        folder_type.clone(),
        member_relation(),
    ));

    let mut file = NodeType::new(file_type.clone())
        .with_label("File")
        .with_file_requirement(Requirement::Must);
    file.add_domain_type(iri(FILE_CLASS));
    file.add_domain_type(iri("http://www.w3.org/ns/dcat#Distribution"));
    file.add_parent_constraint(NodeConstraint::AnyParent);
    file.add_property_constraint(PropertyConstraint::new(
        Arc::clone(&created),
        CardinalityConstraint::optional(),
    ));
    file.add_property_constraint(PropertyConstraint::new(
        Arc::clone(&modified),
        CardinalityConstraint::optional(),
    ));
    file.supply_property(Arc::clone(&created), SuppliedProperty::FileCreatedDate);
    file.supply_property(Arc::clone(&modified), SuppliedProperty::FileModifiedDate);

    let mut profile = DomainProfile::new(iri("https://example.org/profiles/nested"))
        .with_label("Nested folders")
        .with_description("Folders, items and files");
    profile.add_node_type(folder).expect("folder");
    profile.add_node_type(item).expect("item");
    profile.add_node_type(file).expect("file");
    for property_type in [status, created, modified, creator_property()] {
        profile.add_property_type(property_type).expect("property type");
    }
    profile.add_property_category(descriptive).expect("descriptive");
    profile.add_property_category(technical).expect("technical");
    profile
        .add_node_transform(
            NodeTransform::new(iri("https://example.org/transforms/wrap-file"))
                .with_label("Wrap file in item")
                .with_source_type(file_type.clone())
                .with_source_parent_type(folder_type.clone())
                .with_result_type(file_type)
                .with_result_parent_type(item_type.clone())
                .with_insert_parent_type(item_type),
        )
        .expect("transform");
    profile.validate().expect("valid profile");
    profile
}
