use std::collections::HashSet;

use super::{
    bool_literal, date_time_literal, long_literal, to_long, Claim, GraphReader, Identities,
    TransformError,
};
use crate::{
    ipm::{FileInfo, IpmTree, Node, NodeId},
    profile::{Iri, NodeTypeLookup},
    rdf::{string_literal, Resource, TripleGraph},
    vocab::ipm as vocab,
};

/// Maps an [`IpmTree`] to the graph and back.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeGraphTransform;

impl TreeGraphTransform {
    /// Writes every node of `tree` into `graph` and returns the root's graph
    /// node. Nodes already present in the graph are rewritten in place.
    ///
    /// # Errors
    ///
    /// Fails when a file size or child index does not fit a long literal.
    pub fn transform_to_graph(
        &self,
        tree: &IpmTree,
        graph: &mut TripleGraph,
    ) -> Result<Resource, TransformError> {
        let mut writer = TreeWriter {
            tree,
            graph,
            identities: Identities::default(),
        };
        let root = writer.write_node(tree.root())?;
        for id in tree.pre_order() {
            writer.write_node(id)?;
        }
        tracing::debug!(nodes = tree.len(), statements = writer.graph.len(), "tree_written");
        Ok(root)
    }

    /// Rebuilds the tree stored in `graph`, resolving node types through
    /// `types`.
    ///
    /// # Errors
    ///
    /// Fails unless exactly one node is marked as root, when a node is
    /// reachable twice, when a node type is unknown to `types`, or when any
    /// statement is malformed.
    pub fn transform_to_tree<L>(
        &self,
        graph: &TripleGraph,
        types: &L,
    ) -> Result<IpmTree, TransformError>
    where
        L: NodeTypeLookup + ?Sized,
    {
        let roots: Vec<Resource> = graph
            .subjects(vocab::IS_ROOT, &bool_literal(true))
            .into_iter()
            .filter(|resource| graph.has_type(resource, vocab::IPM_NODE))
            .collect();
        if roots.len() != 1 {
            return Err(TransformError::ExpectedSingle {
                what: "root node".to_string(),
                found: roots.len(),
            });
        }

        let reader = TreeReader {
            reader: GraphReader::new(graph),
            types,
        };
        let root_resource = &roots[0];
        let mut tree = IpmTree::new(reader.read_node(root_resource, false)?);
        let mut visited = HashSet::from([root_resource.clone()]);
        let root = tree.root();
        reader.read_children(&mut tree, root, root_resource, &mut visited)?;
        tracing::debug!(nodes = tree.len(), "tree_read");
        Ok(tree)
    }
}

struct TreeWriter<'a> {
    tree: &'a IpmTree,
    graph: &'a mut TripleGraph,
    identities: Identities,
}

impl TreeWriter<'_> {
    fn write_node(&mut self, id: NodeId) -> Result<Resource, TransformError> {
        let tree = self.tree;
        let node = tree.node(id);
        let resource = match self
            .identities
            .claim(self.graph, vocab::IPM_NODE, vocab::HAS_ID, node.id())
        {
            Claim::Visited(resource) => return Ok(resource),
            Claim::Fresh(resource) => resource,
        };

        if id == tree.root() {
            self.graph.insert(&resource, vocab::IS_ROOT, bool_literal(true));
        }
        self.graph
            .insert(&resource, vocab::IS_IGNORED, bool_literal(node.is_ignored()));
        self.graph.insert(
            &resource,
            vocab::IS_SELF_IGNORED,
            bool_literal(node.is_self_ignored()),
        );
        if let Some(node_type) = node.node_type() {
            self.graph
                .insert(&resource, vocab::HAS_NODE_TYPE, node_type.to_named_node());
        }
        for sub_type in node.sub_types() {
            self.graph
                .insert(&resource, vocab::HAS_SUB_TYPE, sub_type.to_named_node());
        }
        if let Some(domain_object) = node.domain_object() {
            self.graph
                .insert(&resource, vocab::HAS_DOMAIN_OBJECT, domain_object.to_named_node());
        }
        if let Some(file_info) = node.file_info() {
            let info = self.write_file_info(file_info)?;
            self.graph.insert(&resource, vocab::HAS_FILE_INFO, info);
        }

        if let Some(parent) = node.parent() {
            let position = tree
                .children(parent)
                .iter()
                .position(|child| *child == id)
                .unwrap_or_default();
            self.graph.insert(
                &resource,
                vocab::HAS_CHILD_INDEX,
                long_literal(to_long("child index", position)?),
            );
            let parent_resource = self.write_node(parent)?;
            self.graph
                .insert(&resource, vocab::HAS_PARENT, parent_resource);
        }
        for child in node.children() {
            let child_resource = self.write_node(*child)?;
            self.graph.insert(&resource, vocab::HAS_CHILD, child_resource);
        }
        Ok(resource)
    }

    fn write_file_info(&mut self, file_info: &FileInfo) -> Result<Resource, TransformError> {
        let info = Resource::blank();
        self.graph.insert_type(&info, vocab::FILE_INFO);
        self.graph.insert(
            &info,
            vocab::FILE_LOCATION,
            string_literal(file_info.location.as_str()),
        );
        self.graph
            .insert(&info, vocab::FILE_NAME, string_literal(file_info.name.as_str()));
        self.graph.insert(
            &info,
            vocab::FILE_SIZE,
            long_literal(to_long("file size", file_info.size)?),
        );
        self.graph
            .insert(&info, vocab::IS_BYTE_STREAM, bool_literal(file_info.is_file));
        self.graph
            .insert(&info, vocab::IS_DIRECTORY, bool_literal(file_info.is_directory));
        for (algorithm, value) in &file_info.checksums {
            let checksum = Resource::blank();
            self.graph.insert_type(&checksum, vocab::CHECKSUM);
            self.graph.insert(
                &checksum,
                vocab::CHECKSUM_ALGORITHM,
                string_literal(algorithm.as_str()),
            );
            self.graph
                .insert(&checksum, vocab::CHECKSUM_VALUE, string_literal(value.as_str()));
            self.graph.insert(&info, vocab::HAS_CHECKSUM, checksum);
        }
        for format in &file_info.formats {
            self.graph
                .insert(&info, vocab::HAS_FORMAT, string_literal(format.as_str()));
        }
        if let Some(created) = &file_info.created {
            self.graph
                .insert(&info, vocab::CREATED, date_time_literal(created));
        }
        if let Some(modified) = &file_info.modified {
            self.graph
                .insert(&info, vocab::MODIFIED, date_time_literal(modified));
        }
        Ok(info)
    }
}

struct TreeReader<'a, L: ?Sized> {
    reader: GraphReader<'a>,
    types: &'a L,
}

impl<L> TreeReader<'_, L>
where
    L: NodeTypeLookup + ?Sized,
{
    fn resolve(&self, node_type: Iri) -> Result<Iri, TransformError> {
        if self.types.node_type(&node_type).is_none() {
            return Err(TransformError::UnknownNodeType(node_type));
        }
        Ok(node_type)
    }

    fn read_node(&self, resource: &Resource, parent_ignored: bool) -> Result<Node, TransformError> {
        let id = self
            .reader
            .iri(resource, vocab::HAS_ID)?
            .ok_or_else(|| TransformError::MissingStatement {
                subject: resource.to_string(),
                predicate: vocab::HAS_ID.as_str().to_string(),
            })?;
        let ignored = self
            .reader
            .boolean(resource, vocab::IS_IGNORED)?
            .unwrap_or(false);
        let self_ignored = self
            .reader
            .boolean(resource, vocab::IS_SELF_IGNORED)?
            .unwrap_or(ignored && !parent_ignored);

        let mut node = Node::new(id);
        node.set_ignore_flags(ignored || parent_ignored || self_ignored, self_ignored);
        if let Some(node_type) = self.reader.iri(resource, vocab::HAS_NODE_TYPE)? {
            node = node.with_node_type(self.resolve(node_type)?);
        }
        for sub_type in self.reader.iris(resource, vocab::HAS_SUB_TYPE)? {
            node = node.with_sub_type(self.resolve(sub_type)?);
        }
        if let Some(domain_object) = self.reader.iri(resource, vocab::HAS_DOMAIN_OBJECT)? {
            node = node.with_domain_object(domain_object);
        }
        if let Some(info) = self.reader.resource(resource, vocab::HAS_FILE_INFO)? {
            node = node.with_file_info(self.read_file_info(&info)?);
        }
        Ok(node)
    }

    fn read_children(
        &self,
        tree: &mut IpmTree,
        parent: NodeId,
        parent_resource: &Resource,
        visited: &mut HashSet<Resource>,
    ) -> Result<(), TransformError> {
        let mut children = Vec::new();
        for child in self.reader.resources(parent_resource, vocab::HAS_CHILD)? {
            let index = self
                .reader
                .long(&child, vocab::HAS_CHILD_INDEX)?
                .unwrap_or(i64::MAX);
            children.push((index, child));
        }
        children.sort_by_key(|(index, _)| *index);

        let parent_ignored = tree.node(parent).is_ignored();
        for (_, child_resource) in children {
            if !visited.insert(child_resource.clone()) {
                return Err(TransformError::SharedNode {
                    node: child_resource.to_string(),
                });
            }
            let node = self.read_node(&child_resource, parent_ignored)?;
            if let Some(linked) = self.reader.resource(&child_resource, vocab::HAS_PARENT)? {
                if &linked != parent_resource {
                    return Err(TransformError::ParentMismatch {
                        node: node.id().clone(),
                    });
                }
            }
            let child = tree.add_child(parent, node)?;
            self.read_children(tree, child, &child_resource, visited)?;
        }
        Ok(())
    }

    fn read_file_info(&self, resource: &Resource) -> Result<FileInfo, TransformError> {
        let size = self.reader.long(resource, vocab::FILE_SIZE)?.unwrap_or(0);
        let size = u64::try_from(size).map_err(|_| TransformError::UnexpectedTerm {
            subject: resource.to_string(),
            predicate: vocab::FILE_SIZE.as_str().to_string(),
            expected: "non-negative size",
            found: size.to_string(),
        })?;
        let mut info = FileInfo {
            location: self
                .reader
                .string(resource, vocab::FILE_LOCATION)?
                .unwrap_or_default(),
            name: self
                .reader
                .string(resource, vocab::FILE_NAME)?
                .unwrap_or_default(),
            size,
            is_file: self
                .reader
                .boolean(resource, vocab::IS_BYTE_STREAM)?
                .unwrap_or(false),
            is_directory: self
                .reader
                .boolean(resource, vocab::IS_DIRECTORY)?
                .unwrap_or(false),
            formats: self.reader.strings(resource, vocab::HAS_FORMAT)?,
            created: self.reader.date_time(resource, vocab::CREATED)?,
            modified: self.reader.date_time(resource, vocab::MODIFIED)?,
            ..FileInfo::default()
        };
        for checksum in self.reader.resources(resource, vocab::HAS_CHECKSUM)? {
            let algorithm = self
                .reader
                .string(&checksum, vocab::CHECKSUM_ALGORITHM)?
                .unwrap_or_default();
            let value = self
                .reader
                .string(&checksum, vocab::CHECKSUM_VALUE)?
                .unwrap_or_default();
            info.checksums.insert(algorithm, value);
        }
        Ok(info)
    }
}
