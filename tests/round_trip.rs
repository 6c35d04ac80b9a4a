use ipm_modeler::{
    config::ModelerSettings,
    profile::DomainProfileStore,
    rdf::TripleGraph,
    session::ModelingSession,
    tests_cfg::{profile, tree},
    transform::{ProfileGraphTransform, TreeGraphTransform},
};

#[test]
fn profiles_survive_the_graph() {
    for original in [profile::collection_data_file(), profile::nested_collections()] {
        let mut graph = TripleGraph::new();
        ProfileGraphTransform
            .transform_to_graph(&original, &mut graph)
            .expect("written");
        let restored = ProfileGraphTransform
            .transform_to_profile(&graph)
            .expect("profile");
        assert_eq!(restored, original);
    }
}

#[test]
fn two_profiles_share_a_graph() {
    let collection = profile::collection_data_file();
    let nested = profile::nested_collections();
    let mut graph = TripleGraph::new();
    ProfileGraphTransform
        .transform_to_graph(&collection, &mut graph)
        .expect("written");
    ProfileGraphTransform
        .transform_to_graph(&nested, &mut graph)
        .expect("written");

    assert!(ProfileGraphTransform.transform_to_profile(&graph).is_err());
    assert_eq!(
        ProfileGraphTransform
            .transform_to_profile_with_id(&graph, nested.id())
            .expect("nested"),
        nested
    );
    assert_eq!(
        ProfileGraphTransform
            .transform_to_profile_with_id(&graph, collection.id())
            .expect("collection"),
        collection
    );
}

#[test]
fn ignored_trees_survive_the_graph() {
    let profile = profile::collection_data_file();
    let mut original = tree::typed_collection();
    let report = original.children(original.root())[0];
    original.set_ignored(report, true);

    let mut graph = TripleGraph::new();
    TreeGraphTransform
        .transform_to_graph(&original, &mut graph)
        .expect("written");
    let restored = TreeGraphTransform
        .transform_to_tree(&graph, &profile)
        .expect("tree");
    assert_eq!(restored, original);
    assert!(restored.node(restored.children(restored.root())[0]).is_self_ignored());
}

#[test]
fn session_restores_profiles_tree_and_objects() {
    let profile = profile::collection_data_file();
    let profile_id = profile.id().clone();
    let mut session = ModelingSession::new(
        DomainProfileStore::new(profile).with_secondary(profile::nested_collections()),
        ModelerSettings::default(),
    );
    let mut tree = tree::collection();
    session.assign(&mut tree).expect("assigned");
    session.materialize(&mut tree).expect("materialized");
    session.save_profiles().expect("saved");
    session.save_tree(&tree).expect("saved");

    let secondary_id = profile::nested_collections().id().clone();
    let restored = ModelingSession::restore(
        session.graph().clone(),
        &profile_id,
        Some(&secondary_id),
        ModelerSettings::default(),
    )
    .expect("restored");
    assert_eq!(restored.store().primary().id(), &profile_id);
    assert_eq!(
        restored.store().secondary().map(|secondary| secondary.id()),
        Some(&secondary_id)
    );

    let loaded = restored.load_tree().expect("tree");
    assert_eq!(loaded, tree);
    for id in loaded.pre_order() {
        assert!(loaded.node(id).domain_object().is_some());
    }

    let mut ntriples = Vec::new();
    restored.write_ntriples(&mut ntriples).expect("written");
    let text = String::from_utf8(ntriples).expect("utf-8");
    assert_eq!(text.lines().count(), restored.graph().len());
}

#[test]
fn saving_twice_reuses_the_persisted_nodes() {
    let mut session = ModelingSession::new(
        DomainProfileStore::new(profile::collection_data_file()),
        ModelerSettings::default(),
    );
    let tree = tree::typed_collection();
    session.save_profiles().expect("saved");
    session.save_tree(&tree).expect("saved");
    let statements = session.graph().len();

    session.save_profiles().expect("saved");
    session.save_tree(&tree).expect("saved");
    assert_eq!(session.graph().len(), statements);
}

#[test]
fn self_ignored_children_stay_ignored_after_restoring() {
    let profile = profile::collection_data_file();
    let mut original = tree::typed_collection();
    let root = original.root();
    let report = original.children(root)[0];
    original.set_ignored(report, true);
    original.set_ignored(root, true);

    let mut graph = TripleGraph::new();
    TreeGraphTransform
        .transform_to_graph(&original, &mut graph)
        .expect("written");
    let mut restored = TreeGraphTransform
        .transform_to_tree(&graph, &profile)
        .expect("tree");
    assert_eq!(restored, original);
    assert!(restored.node(restored.children(restored.root())[0]).is_self_ignored());

    original.set_ignored(root, false);
    let restored_root = restored.root();
    restored.set_ignored(restored_root, false);
    assert!(original.node(report).is_ignored());
    assert!(restored.node(restored.children(restored_root)[0]).is_ignored());
    assert!(!restored.node(restored.children(restored_root)[1]).is_ignored());
    assert_eq!(restored, original);
}

#[test]
fn session_restores_from_an_ntriples_document() {
    let profile = profile::collection_data_file();
    let profile_id = profile.id().clone();
    let mut session = ModelingSession::new(DomainProfileStore::new(profile), ModelerSettings::default());
    let mut tree = tree::collection();
    session.assign(&mut tree).expect("assigned");
    session.materialize(&mut tree).expect("materialized");
    session.save_profiles().expect("saved");
    session.save_tree(&tree).expect("saved");

    let mut document = Vec::new();
    session.write_ntriples(&mut document).expect("written");
    let restored = ModelingSession::restore_from_reader(
        document.as_slice(),
        &profile_id,
        None,
        ModelerSettings::default(),
    )
    .expect("restored");

    assert_eq!(restored.graph().len(), session.graph().len());
    assert_eq!(restored.store().primary(), session.store().primary());
    assert_eq!(restored.load_tree().expect("tree"), tree);
}
