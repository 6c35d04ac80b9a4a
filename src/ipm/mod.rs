//! Internal package model: the file-system shaped tree being classified.

mod node;
mod tree;

pub use node::{FileInfo, Node};
pub use tree::{IpmTree, NodeId, TreeError};
