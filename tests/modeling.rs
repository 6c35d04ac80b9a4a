use std::collections::HashSet;

use ipm_modeler::{
    assign::NodeTypeAssigner,
    config::ModelerSettings,
    ipm::{FileInfo, IpmTree, Node},
    materialize::DomainObjectMapper,
    profile::{DomainProfileStore, Iri, NodeConstraint, PropertyValue},
    rdf::{Resource, Statement, TripleGraph},
    session::ModelingSession,
    tests_cfg::{config::test_config, profile, tree},
    Error,
};
use oxrdf::{vocab::rdf, NamedNodeRef};

fn statement_set(graph: &TripleGraph) -> HashSet<Statement> {
    graph.iter().cloned().collect()
}

fn count_predicate(graph: &TripleGraph, predicate: &str) -> usize {
    graph
        .matching(None, Some(NamedNodeRef::new_unchecked(predicate)), None)
        .len()
}

#[test]
fn collection_with_two_files_materializes_member_relations() {
    let profile = profile::collection_data_file();
    let mut tree = tree::collection();
    assert!(NodeTypeAssigner::new(&profile).assign_types(&mut tree));

    let root = tree.root();
    assert_eq!(tree.node(root).node_type(), Some(&profile::collection_type()));
    for child in tree.children(root) {
        assert_eq!(tree.node(*child).node_type(), Some(&profile::data_file_type()));
    }

    let mut graph = TripleGraph::new();
    let mut mapper = DomainObjectMapper::new(&profile, &mut graph);
    for id in tree.pre_order() {
        mapper.update_object(&mut tree, id).expect("materialized");
    }
    let relation = profile::member_relation();
    let root_object = tree.node(root).domain_object().expect("root object");
    for child in tree.children(root) {
        let child_object = tree.node(*child).domain_object().expect("child object");
        assert!(mapper.has_relationship(child_object, relation.has_parent(), root_object));
        assert!(mapper.has_relationship(root_object, relation.has_child(), child_object));
    }

    assert_eq!(count_predicate(&graph, profile::IS_MEMBER_OF), 2);
    assert_eq!(count_predicate(&graph, profile::HAS_MEMBER), 2);

    for id in tree.pre_order() {
        let node = tree.node(id);
        let object = Resource::named(node.domain_object().expect("object"));
        let types = graph.matching(Some(&object), Some(rdf::TYPE), None);
        assert_eq!(types.len(), 1);
        let expected = if id == root {
            profile::COLLECTION_CLASS
        } else {
            profile::FILE_CLASS
        };
        assert!(graph.has_type(&object, NamedNodeRef::new_unchecked(expected)));
    }
}

#[test]
fn byte_stream_root_cannot_be_typed() {
    let profile = profile::collection_data_file();
    assert!(profile
        .node_types()
        .iter()
        .all(|node_type| !node_type.accepts_any_parent()));

    let mut tree = IpmTree::new(
        Node::new(Iri::new("urn:ipm:node:single").expect("iri")).with_file_info(
            FileInfo::byte_stream("file:///data/single.bin", "single.bin", 10),
        ),
    );
    assert!(!NodeTypeAssigner::new(&profile).assign_types(&mut tree));

    let session = ModelingSession::new(
        DomainProfileStore::new(profile),
        ModelerSettings::default(),
    );
    let err = session.assign(&mut tree).expect_err("inconsistent");
    assert!(matches!(err, Error::SchemaInconsistency { .. }));
}

#[test]
fn assigned_trees_satisfy_parent_constraints() {
    let profile = profile::nested_collections();
    let mut tree = IpmTree::new(Node::new(Iri::new("urn:ipm:node:archive").expect("iri")));
    let root = tree.root();
    let series = tree
        .add_child(root, Node::new(Iri::new("urn:ipm:node:series").expect("iri")))
        .expect("series");
    let item = tree
        .add_child(series, Node::new(Iri::new("urn:ipm:node:item").expect("iri")))
        .expect("item");
    for name in ["page-1.tif", "page-2.tif"] {
        tree.add_child(
            item,
            Node::new(Iri::new(format!("urn:ipm:node:{name}")).expect("iri")).with_file_info(
                FileInfo::byte_stream(format!("file:///archive/series/item/{name}"), name, 512),
            ),
        )
        .expect("page");
    }
    tree.add_child(
        root,
        Node::new(Iri::new("urn:ipm:node:readme").expect("iri"))
            .with_file_info(FileInfo::byte_stream("file:///archive/README", "README", 64)),
    )
    .expect("readme");

    assert!(NodeTypeAssigner::new(&profile).assign_types(&mut tree));

    for id in tree.pre_order().into_iter().skip(1) {
        let node_type = profile
            .node_type(tree.node(id).node_type().expect("typed"))
            .expect("declared");
        let parent_type = tree
            .node(tree.parent(id).expect("parent"))
            .node_type()
            .expect("typed parent");
        let satisfied = node_type.parent_constraints().iter().any(|constraint| {
            matches!(constraint, NodeConstraint::AnyParent)
                || constraint.target_type() == Some(parent_type)
        });
        assert!(satisfied, "{} breaks its parent constraints", tree.node(id).id());
    }
    assert_eq!(
        tree.node(item).node_type().map(Iri::as_str),
        Some("https://example.org/ipm/Item")
    );
}

#[test]
fn materializing_twice_changes_nothing() {
    let profile = profile::collection_data_file();
    let mut tree = tree::typed_collection();
    let mut graph = TripleGraph::new();
    let mut mapper = DomainObjectMapper::new(&profile, &mut graph);
    mapper.update_tree(&mut tree).expect("first pass");
    let first = statement_set(mapper.graph());
    let objects: Vec<_> = tree
        .pre_order()
        .into_iter()
        .map(|id| tree.node(id).domain_object().cloned())
        .collect();

    for id in tree.pre_order() {
        mapper.update_object(&mut tree, id).expect("again");
        mapper.update_object(&mut tree, id).expect("and again");
    }
    assert_eq!(statement_set(mapper.graph()), first);
    let again: Vec<_> = tree
        .pre_order()
        .into_iter()
        .map(|id| tree.node(id).domain_object().cloned())
        .collect();
    assert_eq!(objects, again);
}

#[test]
fn rematerializing_keeps_unrelated_statements() {
    let profile = profile::collection_data_file();
    let mut tree = tree::typed_collection();
    let mut graph = TripleGraph::new();
    let mut mapper = DomainObjectMapper::new(&profile, &mut graph);
    mapper.update_tree(&mut tree).expect("materialized");

    let root = tree.root();
    let root_object = tree.node(root).domain_object().expect("object").clone();
    let title = profile::title_property();
    let value = PropertyValue::string(title.clone(), "Annual report").expect("title");
    mapper.add_property(&root_object, &value);

    mapper.update_object(&mut tree, root).expect("rematerialized");
    assert_eq!(
        mapper.get_properties(&root_object, &title).expect("titles"),
        vec![value]
    );
}

#[test]
fn ignored_subtrees_are_not_materialized() {
    let profile = profile::collection_data_file();
    let mut tree = tree::typed_collection();
    let ignored = tree.children(tree.root())[1];
    tree.set_ignored(ignored, true);

    let mut session = ModelingSession::from_config(DomainProfileStore::new(profile), &test_config());
    let written = session.materialize(&mut tree).expect("materialized");
    assert_eq!(written, 2);
    assert!(tree.node(ignored).domain_object().is_none());
    assert!(tree
        .node(tree.root())
        .domain_object()
        .is_some_and(|object| object.as_str().starts_with("urn:example:object:")));
}
