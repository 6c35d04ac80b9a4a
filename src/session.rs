//! Packaging session wiring the profile store, the triple graph and the
//! modeling engines together.

use std::{
    io::{Read, Write},
    path::Path,
};

use crate::{
    assign::NodeTypeAssigner,
    config::{Config, ModelerSettings},
    environment::Environment,
    ipm::IpmTree,
    logger,
    materialize::DomainObjectMapper,
    profile::{DomainProfileStore, Iri},
    rdf::{Resource, TripleGraph},
    transform::{ProfileGraphTransform, TreeGraphTransform},
    Error, Result,
};

/// One packaging session: the loaded profiles plus the graph holding domain
/// objects and persisted state.
///
/// The session is single-writer. Hosts sharing it across threads must
/// serialize every call.
#[derive(Clone, Debug)]
pub struct ModelingSession {
    store: DomainProfileStore,
    graph: TripleGraph,
    settings: ModelerSettings,
}

impl ModelingSession {
    #[must_use]
    pub fn new(store: DomainProfileStore, settings: ModelerSettings) -> Self {
        Self {
            store,
            graph: TripleGraph::new(),
            settings,
        }
    }

    /// Builds a session using the `modeler` section of `config`.
    #[must_use]
    pub fn from_config(store: DomainProfileStore, config: &Config) -> Self {
        Self::new(store, config.modeler.clone())
    }

    /// Loads the configuration of `environment` from `config/`, installs the
    /// logger and builds a session.
    ///
    /// # Errors
    ///
    /// Fails when the configuration cannot be loaded, a global subscriber
    /// is already installed, or the profiles do not validate.
    pub fn boot(store: DomainProfileStore, environment: &Environment) -> Result<Self> {
        let config = environment.load()?;
        Self::boot_with_config(store, &config)
    }

    /// Same as [`Self::boot`] with configuration files read from `folder`.
    ///
    /// # Errors
    ///
    /// Fails when the configuration cannot be loaded, a global subscriber
    /// is already installed, or the profiles do not validate.
    pub fn boot_from_folder(
        store: DomainProfileStore,
        environment: &Environment,
        folder: &Path,
    ) -> Result<Self> {
        let config = environment.load_from_folder(folder)?;
        Self::boot_with_config(store, &config)
    }

    fn boot_with_config(store: DomainProfileStore, config: &Config) -> Result<Self> {
        logger::init(&config.logger)?;
        store.validate()?;
        tracing::info!(
            profile = %store.primary().id(),
            namespace = %config.modeler.object_namespace,
            "session_booted"
        );
        Ok(Self::from_config(store, config))
    }

    /// Restores a session from a graph previously filled by
    /// [`Self::save_profiles`] and [`Self::save_tree`].
    ///
    /// # Errors
    ///
    /// Fails when a requested profile is missing or malformed, or when a
    /// parent constraint targets a node type neither profile declares.
    pub fn restore(
        graph: TripleGraph,
        primary: &Iri,
        secondary: Option<&Iri>,
        settings: ModelerSettings,
    ) -> Result<Self> {
        let transform = ProfileGraphTransform;
        let mut store =
            DomainProfileStore::new(transform.transform_to_profile_with_id(&graph, primary)?);
        if let Some(secondary) = secondary {
            store = store.with_secondary(transform.transform_to_profile_with_id(&graph, secondary)?);
        }
        store.validate()?;
        tracing::info!(primary = %primary, statements = graph.len(), "session_restored");
        Ok(Self {
            store,
            graph,
            settings,
        })
    }

    /// Restores a session from an N-Triples document written by
    /// [`Self::write_ntriples`].
    ///
    /// # Errors
    ///
    /// Fails when the document does not parse or [`Self::restore`] fails.
    pub fn restore_from_reader<R: Read>(
        reader: R,
        primary: &Iri,
        secondary: Option<&Iri>,
        settings: ModelerSettings,
    ) -> Result<Self> {
        let graph = TripleGraph::read_ntriples(reader)?;
        Self::restore(graph, primary, secondary, settings)
    }

    #[must_use]
    pub fn store(&self) -> &DomainProfileStore {
        &self.store
    }

    #[must_use]
    pub fn graph(&self) -> &TripleGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut TripleGraph {
        &mut self.graph
    }

    #[must_use]
    pub fn settings(&self) -> &ModelerSettings {
        &self.settings
    }

    /// Types every node of `tree` from the primary profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaInconsistency`] when no consistent assignment
    /// exists. The tree is then partially typed and must be discarded. Fails
    /// before touching the tree when a parent constraint of a loaded profile
    /// targets an undeclared node type.
    pub fn assign(&self, tree: &mut IpmTree) -> Result<()> {
        self.store.validate()?;
        let assigned = NodeTypeAssigner::new(self.store.primary())
            .with_relationships(&self.graph)
            .with_child_count_preference(self.settings.prefer_child_count)
            .assign_types(tree);
        if !assigned {
            return Err(Error::SchemaInconsistency {
                root: tree.node(tree.root()).id().clone(),
            });
        }
        Ok(())
    }

    /// Materializes the domain objects of every node of `tree`.
    ///
    /// # Errors
    ///
    /// Stops at the first node that fails to materialize.
    pub fn materialize(&mut self, tree: &mut IpmTree) -> Result<usize> {
        let written = DomainObjectMapper::new(&self.store, &mut self.graph)
            .with_object_namespace(self.settings.object_namespace.clone())
            .with_skip_ignored(self.settings.skip_ignored)
            .update_tree(tree)?;
        Ok(written)
    }

    /// Mapper over the session graph for property-level edits.
    pub fn mapper(&mut self) -> DomainObjectMapper<'_, DomainProfileStore> {
        DomainObjectMapper::new(&self.store, &mut self.graph)
            .with_object_namespace(self.settings.object_namespace.clone())
            .with_skip_ignored(self.settings.skip_ignored)
    }

    /// Persists every loaded profile into the session graph.
    ///
    /// # Errors
    ///
    /// Fails when a profile cannot be encoded.
    pub fn save_profiles(&mut self) -> Result<Vec<Resource>> {
        let transform = ProfileGraphTransform;
        let graph = &mut self.graph;
        let mut resources = Vec::new();
        for profile in self.store.profiles() {
            resources.push(transform.transform_to_graph(profile, graph)?);
        }
        Ok(resources)
    }

    /// Persists `tree` into the session graph.
    ///
    /// # Errors
    ///
    /// Fails when a node cannot be encoded.
    pub fn save_tree(&mut self, tree: &IpmTree) -> Result<Resource> {
        Ok(TreeGraphTransform.transform_to_graph(tree, &mut self.graph)?)
    }

    /// Reads the persisted tree back, resolving node types through the store.
    ///
    /// # Errors
    ///
    /// Fails when the graph holds no tree or a malformed one.
    pub fn load_tree(&self) -> Result<IpmTree> {
        Ok(TreeGraphTransform.transform_to_tree(&self.graph, &self.store)?)
    }

    /// Writes the session graph as N-Triples.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_ntriples<W: Write>(&self, writer: W) -> Result<()> {
        self.graph.write_ntriples(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::ModelingSession;
    use crate::{
        environment::Environment, profile::DomainProfileStore, tests_cfg, Error,
    };

    #[test]
    fn boots_from_a_config_folder() {
        let folder = std::env::temp_dir().join(format!("ipm-modeler-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&folder).expect("folder");
        fs::write(
            folder.join("test.yaml"),
            "logger:\n  enable: false\n  level: error\n  format: compact\nmodeler:\n  \
             object_namespace: \"urn:example:booted:\"\n",
        )
        .expect("config file");

        let session = ModelingSession::boot_from_folder(
            DomainProfileStore::new(tests_cfg::profile::collection_data_file()),
            &Environment::Test,
            &folder,
        )
        .expect("session");
        assert_eq!(session.settings().object_namespace, "urn:example:booted:");
        assert!(session.graph().is_empty());

        let missing = ModelingSession::boot_from_folder(
            DomainProfileStore::new(tests_cfg::profile::collection_data_file()),
            &Environment::Production,
            &folder,
        );
        assert!(matches!(missing, Err(Error::Message(_))));
        fs::remove_dir_all(&folder).expect("cleanup");
    }
}
