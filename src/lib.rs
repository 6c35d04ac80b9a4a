//! Domain-profile driven node typing and linked-data materialization for
//! package trees.
//!
//! A [`profile::DomainProfile`] declares node types and their structural
//! constraints. [`assign::NodeTypeAssigner`] types every node of an
//! [`ipm::IpmTree`], [`materialize::DomainObjectMapper`] writes the typed tree
//! as domain objects into a [`rdf::TripleGraph`], and the mappers in
//! [`transform`] persist profiles and trees into the same graph and read them
//! back. [`session::ModelingSession`] wires them together.

pub use self::errors::Error;

pub mod assign;
pub mod config;
pub mod environment;
pub mod errors;
pub mod ipm;
pub mod logger;
pub mod materialize;
pub mod profile;
pub mod rdf;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod tests_cfg;
pub mod transform;
pub mod vocab;

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
