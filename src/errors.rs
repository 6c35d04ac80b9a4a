//! # Application Error Handling

use crate::{
    ipm::TreeError,
    materialize::MaterializeError,
    profile::{Iri, IriError, ProfileError},
    rdf::ParseError,
    transform::TransformError,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    /// No consistent node type assignment exists for the tree.
    #[error("no consistent node type assignment exists for the tree rooted at `{root}`")]
    SchemaInconsistency { root: Iri },

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error(transparent)]
    Iri(#[from] IriError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    JSON(#[from] serde_json::Error),

    #[error("cannot parse `{1}`: {0}")]
    YAMLFile(#[source] serde_yaml::Error, String),

    #[error(transparent)]
    YAML(#[from] serde_yaml::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Tera(#[from] tera::Error),

    #[error(transparent)]
    Logger(#[from] tracing_subscriber::util::TryInitError),

    #[error(transparent)]
    Any(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn wrap(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Any(Box::new(err))
    }

    pub fn msg(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Message(err.to_string())
    }

    #[must_use]
    pub fn string(s: &str) -> Self {
        Self::Message(s.to_string())
    }
}
