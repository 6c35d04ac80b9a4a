use chrono::{TimeZone, Utc};

use super::profile::{collection_type, data_file_type};
use crate::{
    ipm::{FileInfo, IpmTree, Node},
    profile::Iri,
};

fn iri(text: &str) -> Iri {
    Iri::new(text).expect("fixture iri")
}

/// A package directory holding two files. No node is typed.
#[must_use]
pub fn collection() -> IpmTree {
    let created = Utc
        .with_ymd_and_hms(2023, 11, 2, 9, 15, 0)
        .single()
        .expect("created");
    let modified = Utc
        .with_ymd_and_hms(2024, 1, 18, 16, 40, 12)
        .single()
        .expect("modified");

    let mut tree = IpmTree::new(
        Node::new(iri("urn:ipm:node:package"))
            .with_file_info(FileInfo::directory("file:///data/package", "package")),
    );
    let root = tree.root();
    tree.add_child(
        root,
        Node::new(iri("urn:ipm:node:report")).with_file_info(
            FileInfo::byte_stream("file:///data/package/report.pdf", "report.pdf", 48_213)
                .with_format("https://www.nationalarchives.gov.uk/PRONOM/fmt/276")
                .with_checksum(
                    "sha256",
                    "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
                )
                .with_created(created)
                .with_modified(modified),
        ),
    )
    .expect("report");
    tree.add_child(
        root,
        Node::new(iri("urn:ipm:node:data")).with_file_info(
            FileInfo::byte_stream("file:///data/package/data.csv", "data.csv", 1_024)
                .with_format("https://www.nationalarchives.gov.uk/PRONOM/x-fmt/18")
                .with_checksum("md5", "098f6bcd4621d373cade4e832627b4f6"),
        ),
    )
    .expect("data");
    tree
}

/// [`collection`] with the root typed `Collection` and both files typed
/// `DataFile`.
#[must_use]
pub fn typed_collection() -> IpmTree {
    let mut tree = collection();
    let root = tree.root();
    tree.node_mut(root).set_node_type(Some(collection_type()));
    for child in tree.children(root).to_vec() {
        tree.node_mut(child).set_node_type(Some(data_file_type()));
    }
    tree
}
