use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tree::NodeId;
use crate::profile::Iri;

/// File metadata supplied by the tree builder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Absolute location, usually a `file:` URI.
    pub location: String,
    pub name: String,
    pub size: u64,
    /// The file is a byte stream (regular file).
    pub is_file: bool,
    pub is_directory: bool,
    /// Checksums keyed by algorithm name.
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
    /// Detected format identifiers.
    #[serde(default)]
    pub formats: Vec<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

impl FileInfo {
    /// Metadata for a regular file.
    #[must_use]
    pub fn byte_stream(location: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        Self {
            location: location.into(),
            name: name.into(),
            size,
            is_file: true,
            ..Self::default()
        }
    }

    /// Metadata for a directory.
    #[must_use]
    pub fn directory(location: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            name: name.into(),
            is_directory: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_checksum(mut self, algorithm: impl Into<String>, value: impl Into<String>) -> Self {
        self.checksums.insert(algorithm.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.formats.push(format.into());
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    #[must_use]
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

/// Element of an [`IpmTree`](super::IpmTree).
///
/// Parent and children are arena handles owned by the tree; a node never owns
/// another node directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    id: Iri,
    file_info: Option<FileInfo>,
    node_type: Option<Iri>,
    sub_types: Vec<Iri>,
    ignored: bool,
    self_ignored: bool,
    domain_object: Option<Iri>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    #[must_use]
    pub fn new(id: Iri) -> Self {
        Self {
            id,
            file_info: None,
            node_type: None,
            sub_types: Vec::new(),
            ignored: false,
            self_ignored: false,
            domain_object: None,
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_file_info(mut self, file_info: FileInfo) -> Self {
        self.file_info = Some(file_info);
        self
    }

    #[must_use]
    pub fn with_node_type(mut self, node_type: Iri) -> Self {
        self.node_type = Some(node_type);
        self
    }

    #[must_use]
    pub fn with_sub_type(mut self, sub_type: Iri) -> Self {
        self.sub_types.push(sub_type);
        self
    }

    #[must_use]
    pub fn with_domain_object(mut self, domain_object: Iri) -> Self {
        self.domain_object = Some(domain_object);
        self
    }

    /// Marks the node as ignored on its own account.
    #[must_use]
    pub fn with_ignored(mut self, ignored: bool) -> Self {
        self.ignored = ignored;
        self.self_ignored = ignored;
        self
    }

    #[must_use]
    pub fn id(&self) -> &Iri {
        &self.id
    }

    #[must_use]
    pub fn file_info(&self) -> Option<&FileInfo> {
        self.file_info.as_ref()
    }

    /// `true` when the node is backed by a regular file.
    #[must_use]
    pub fn is_byte_stream(&self) -> bool {
        self.file_info.as_ref().is_some_and(|info| info.is_file)
    }

    #[must_use]
    pub fn node_type(&self) -> Option<&Iri> {
        self.node_type.as_ref()
    }

    /// Replaces the assigned type. Sub-types layered on the previous type are
    /// dropped.
    pub fn set_node_type(&mut self, node_type: Option<Iri>) {
        if self.node_type != node_type {
            self.sub_types.clear();
        }
        self.node_type = node_type;
    }

    #[must_use]
    pub fn sub_types(&self) -> &[Iri] {
        &self.sub_types
    }

    pub fn add_sub_type(&mut self, sub_type: Iri) -> bool {
        if self.sub_types.contains(&sub_type) {
            return false;
        }
        self.sub_types.push(sub_type);
        true
    }

    pub fn remove_sub_type(&mut self, sub_type: &Iri) -> bool {
        let before = self.sub_types.len();
        self.sub_types.retain(|existing| existing != sub_type);
        before != self.sub_types.len()
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// `true` when the ignore was requested on this node rather than
    /// inherited from an ancestor.
    #[must_use]
    pub fn is_self_ignored(&self) -> bool {
        self.self_ignored
    }

    pub(crate) fn set_ignore_flags(&mut self, ignored: bool, self_ignored: bool) {
        self.ignored = ignored;
        self.self_ignored = self_ignored;
    }

    #[must_use]
    pub fn domain_object(&self) -> Option<&Iri> {
        self.domain_object.as_ref()
    }

    pub(crate) fn set_domain_object(&mut self, domain_object: Iri) {
        self.domain_object = Some(domain_object);
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
