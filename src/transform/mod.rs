//! Bidirectional mapping of domain profiles and package trees to the triple
//! graph.
//!
//! Both mappers identify schema elements and tree nodes through an identifier
//! statement. Before a graph node is created for an element, the graph is
//! searched for a node already carrying that identifier, and the per-call
//! [`Identities`] map remembers every element claimed so far. This keeps cyclic
//! references (a node type allowed under itself, a tree node reachable as a
//! child and as a parent) from recursing forever or duplicating sub-graphs.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, SecondsFormat, Utc};
use oxrdf::{vocab::xsd, NamedNode, NamedNodeRef, Term};
use thiserror::Error;

use crate::{
    ipm::TreeError,
    profile::{Iri, IriError, ProfileError, Value, ValueKind},
    rdf::{string_literal, typed_literal, Resource, TripleGraph},
    vocab,
};

pub mod profile;
pub mod tree;

pub use profile::ProfileGraphTransform;
pub use tree::TreeGraphTransform;

/// Errors raised while mapping between the graph and in-memory structures.
///
/// Every error is fatal to the transform call in progress.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A resource expected to be singular is missing or duplicated.
    #[error("expected exactly one {what}, found {found}")]
    ExpectedSingle { what: String, found: usize },
    #[error("`{subject}` has no `{predicate}` statement")]
    MissingStatement { subject: String, predicate: String },
    #[error("`{subject}` `{predicate}`: expected {expected}, found `{found}`")]
    UnexpectedTerm {
        subject: String,
        predicate: String,
        expected: &'static str,
        found: String,
    },
    #[error("node type `{0}` is not declared by any loaded profile")]
    UnknownNodeType(Iri),
    #[error("property type `{0}` contains itself")]
    CyclicPropertyType(Iri),
    #[error("tree node `{node}` is reachable more than once")]
    SharedNode { node: String },
    #[error("tree node `{node}` points to a parent other than the node listing it")]
    ParentMismatch { node: Iri },
    /// A count does not fit the `xsd:long` range.
    #[error("{what} `{value}` does not fit a long literal")]
    OutOfRange { what: &'static str, value: String },
    #[error(transparent)]
    Iri(#[from] IriError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

#[must_use]
pub(crate) fn long_literal(value: i64) -> Term {
    typed_literal(value.to_string(), xsd::LONG)
}

/// Converts an unsigned count to `i64`, rejecting values past `i64::MAX`.
pub(crate) fn to_long<T>(what: &'static str, value: T) -> Result<i64, TransformError>
where
    T: TryInto<i64> + Copy + std::fmt::Display,
{
    value.try_into().map_err(|_| TransformError::OutOfRange {
        what,
        value: value.to_string(),
    })
}

#[must_use]
pub(crate) fn bool_literal(value: bool) -> Term {
    typed_literal(if value { "true" } else { "false" }, xsd::BOOLEAN)
}

#[must_use]
pub(crate) fn date_time_literal(value: &DateTime<Utc>) -> Term {
    typed_literal(
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        xsd::DATE_TIME,
    )
}

#[must_use]
pub(crate) fn iri_literal(value: &Iri) -> Term {
    typed_literal(value.as_str(), xsd::ANY_URI)
}

/// Literal encoding of a simple value; `None` for complex values, which are
/// written as anonymous nodes.
#[must_use]
pub(crate) fn value_literal(value: &Value) -> Option<Term> {
    match value {
        Value::String(text) => Some(string_literal(text.clone())),
        Value::Long(number) => Some(long_literal(*number)),
        Value::DateTime(instant) => Some(date_time_literal(instant)),
        Value::Complex(_) => None,
    }
}

/// Read access to the graph reporting shape problems as [`TransformError`]s.
#[derive(Clone, Copy)]
pub(crate) struct GraphReader<'g> {
    graph: &'g TripleGraph,
}

impl<'g> GraphReader<'g> {
    pub(crate) fn new(graph: &'g TripleGraph) -> Self {
        Self { graph }
    }

    pub(crate) fn graph(&self) -> &'g TripleGraph {
        self.graph
    }

    pub(crate) fn all(&self, subject: &Resource, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        self.graph.objects(subject, predicate)
    }

    pub(crate) fn optional(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Option<Term>, TransformError> {
        let mut objects = self.graph.objects(subject, predicate);
        match objects.len() {
            0 => Ok(None),
            1 => Ok(objects.pop()),
            found => Err(TransformError::ExpectedSingle {
                what: format!("`{predicate}` value on `{subject}`"),
                found,
            }),
        }
    }

    pub(crate) fn required(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Term, TransformError> {
        self.optional(subject, predicate)?
            .ok_or_else(|| TransformError::MissingStatement {
                subject: subject.to_string(),
                predicate: predicate.as_str().to_string(),
            })
    }

    pub(crate) fn string(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Option<String>, TransformError> {
        self.optional(subject, predicate)?
            .map(|term| literal_text(subject, predicate, &term).map(str::to_string))
            .transpose()
    }

    pub(crate) fn strings(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Vec<String>, TransformError> {
        self.all(subject, predicate)
            .iter()
            .map(|term| literal_text(subject, predicate, term).map(str::to_string))
            .collect()
    }

    pub(crate) fn long(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Option<i64>, TransformError> {
        self.optional(subject, predicate)?
            .map(|term| decode_long(subject, predicate, &term))
            .transpose()
    }

    pub(crate) fn boolean(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Option<bool>, TransformError> {
        self.optional(subject, predicate)?
            .map(|term| {
                let text = literal_text(subject, predicate, &term)?;
                match text {
                    "true" | "1" => Ok(true),
                    "false" | "0" => Ok(false),
                    _ => Err(unexpected(subject, predicate, "boolean literal", &term)),
                }
            })
            .transpose()
    }

    pub(crate) fn date_time(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Option<DateTime<Utc>>, TransformError> {
        self.optional(subject, predicate)?
            .map(|term| decode_date_time(subject, predicate, &term))
            .transpose()
    }

    /// Reads an identifier written either as a named node or as a literal.
    pub(crate) fn iri(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Option<Iri>, TransformError> {
        self.optional(subject, predicate)?
            .map(|term| decode_iri(subject, predicate, &term))
            .transpose()
    }

    pub(crate) fn iris(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Vec<Iri>, TransformError> {
        self.all(subject, predicate)
            .iter()
            .map(|term| decode_iri(subject, predicate, term))
            .collect()
    }

    pub(crate) fn resource(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Option<Resource>, TransformError> {
        self.optional(subject, predicate)?
            .map(|term| decode_resource(subject, predicate, &term))
            .transpose()
    }

    pub(crate) fn required_resource(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Resource, TransformError> {
        let term = self.required(subject, predicate)?;
        decode_resource(subject, predicate, &term)
    }

    pub(crate) fn resources(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Vec<Resource>, TransformError> {
        self.all(subject, predicate)
            .iter()
            .map(|term| decode_resource(subject, predicate, term))
            .collect()
    }

    /// Decodes a simple value of the given kind.
    pub(crate) fn value(
        &self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
        term: &Term,
        kind: ValueKind,
    ) -> Result<Value, TransformError> {
        match kind {
            ValueKind::String => {
                literal_text(subject, predicate, term).map(|text| Value::String(text.to_string()))
            }
            ValueKind::Long => decode_long(subject, predicate, term).map(Value::Long),
            ValueKind::DateTime => decode_date_time(subject, predicate, term).map(Value::DateTime),
            ValueKind::Complex => Err(unexpected(subject, predicate, "simple value", term)),
        }
    }
}

fn unexpected(
    subject: &Resource,
    predicate: NamedNodeRef<'_>,
    expected: &'static str,
    found: &Term,
) -> TransformError {
    TransformError::UnexpectedTerm {
        subject: subject.to_string(),
        predicate: predicate.as_str().to_string(),
        expected,
        found: found.to_string(),
    }
}

fn literal_text<'t>(
    subject: &Resource,
    predicate: NamedNodeRef<'_>,
    term: &'t Term,
) -> Result<&'t str, TransformError> {
    match term {
        Term::Literal(literal) => Ok(literal.value()),
        _ => Err(unexpected(subject, predicate, "literal", term)),
    }
}

fn decode_long(
    subject: &Resource,
    predicate: NamedNodeRef<'_>,
    term: &Term,
) -> Result<i64, TransformError> {
    literal_text(subject, predicate, term)?
        .parse::<i64>()
        .map_err(|_| unexpected(subject, predicate, "integer literal", term))
}

fn decode_date_time(
    subject: &Resource,
    predicate: NamedNodeRef<'_>,
    term: &Term,
) -> Result<DateTime<Utc>, TransformError> {
    DateTime::parse_from_rfc3339(literal_text(subject, predicate, term)?)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| unexpected(subject, predicate, "date-time literal", term))
}

fn decode_iri(
    subject: &Resource,
    predicate: NamedNodeRef<'_>,
    term: &Term,
) -> Result<Iri, TransformError> {
    match term {
        Term::NamedNode(node) => Ok(Iri::from(node.clone())),
        Term::Literal(literal) => Ok(Iri::new(literal.value())?),
        _ => Err(unexpected(subject, predicate, "identifier", term)),
    }
}

fn decode_resource(
    subject: &Resource,
    predicate: NamedNodeRef<'_>,
    term: &Term,
) -> Result<Resource, TransformError> {
    Resource::from_term(term).ok_or_else(|| unexpected(subject, predicate, "resource", term))
}

/// Outcome of claiming an identified element.
pub(crate) enum Claim {
    /// Already claimed during this call; do not expand again.
    Visited(Resource),
    /// Claimed now; the caller writes the element's statements.
    Fresh(Resource),
}

/// Identifier to graph node map threaded through one transform call.
#[derive(Default)]
pub(crate) struct Identities {
    seen: HashMap<(NamedNode, String), Resource>,
}

impl Identities {
    /// Returns the graph node for `id`, reusing a node of `class` that already
    /// carries the identifier statement. A reused node loses the statements it
    /// owns so the caller can rewrite them.
    pub(crate) fn claim(
        &mut self,
        graph: &mut TripleGraph,
        class: NamedNodeRef<'_>,
        identifier: NamedNodeRef<'_>,
        id: &Iri,
    ) -> Claim {
        let key = (class.into_owned(), id.as_str().to_string());
        if let Some(resource) = self.seen.get(&key) {
            return Claim::Visited(resource.clone());
        }

        let resource = match find_identified(graph, class, identifier, id) {
            Some(resource) => {
                clear_owned(graph, &resource);
                resource
            }
            None => Resource::blank(),
        };
        graph.insert_type(&resource, class);
        graph.insert(&resource, identifier, iri_literal(id));

        self.seen.insert(key, resource.clone());
        Claim::Fresh(resource)
    }

    /// Graph node for an element written elsewhere. An existing node keeps
    /// its statements; a missing one becomes a stub carrying only the type
    /// and identifier statements.
    pub(crate) fn reference(
        &self,
        graph: &mut TripleGraph,
        class: NamedNodeRef<'_>,
        identifier: NamedNodeRef<'_>,
        id: &Iri,
    ) -> Resource {
        let key = (class.into_owned(), id.as_str().to_string());
        if let Some(resource) = self.seen.get(&key) {
            return resource.clone();
        }
        if let Some(resource) = find_identified(graph, class, identifier, id) {
            return resource;
        }
        let resource = Resource::blank();
        graph.insert_type(&resource, class);
        graph.insert(&resource, identifier, iri_literal(id));
        resource
    }
}

fn find_identified(
    graph: &TripleGraph,
    class: NamedNodeRef<'_>,
    identifier: NamedNodeRef<'_>,
    id: &Iri,
) -> Option<Resource> {
    graph
        .subjects(identifier, &iri_literal(id))
        .into_iter()
        .find(|candidate| graph.has_type(candidate, class))
}

fn is_identified(graph: &TripleGraph, resource: &Resource) -> bool {
    !graph
        .objects(resource, vocab::profile::HAS_IDENTIFIER)
        .is_empty()
        || !graph.objects(resource, vocab::ipm::HAS_ID).is_empty()
}

/// Removes the statements of `resource` and, recursively, of the anonymous
/// nodes it owns. Identified nodes reached through an object are left alone.
pub(crate) fn clear_owned(graph: &mut TripleGraph, resource: &Resource) {
    let mut visited = HashSet::new();
    let mut pending = vec![resource.clone()];
    while let Some(current) = pending.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        let owned: Vec<Resource> = graph
            .matching(Some(&current), None, None)
            .into_iter()
            .filter_map(|statement| match &statement.object {
                Term::BlankNode(_) => Resource::from_term(&statement.object),
                _ => None,
            })
            .filter(|object| !is_identified(graph, object))
            .collect();
        graph.remove_matching(Some(&current), None, None);
        pending.extend(owned);
    }
}

#[cfg(test)]
mod tests {
    use oxrdf::vocab::xsd;

    use super::{clear_owned, Claim, GraphReader, Identities, TransformError};
    use crate::{
        profile::{Iri, Value, ValueKind},
        rdf::{string_literal, typed_literal, Resource, TripleGraph},
        vocab::profile::{HAS_IDENTIFIER, HAS_LABEL, HAS_MINIMUM, NODE_TYPE},
    };

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid iri")
    }

    #[test]
    fn claiming_twice_reports_visited() {
        let mut graph = TripleGraph::new();
        let mut identities = Identities::default();
        let id = iri("https://example.org/Collection");
        let Claim::Fresh(first) = identities.claim(&mut graph, NODE_TYPE, HAS_IDENTIFIER, &id)
        else {
            panic!("first claim must be fresh");
        };
        let Claim::Visited(second) = identities.claim(&mut graph, NODE_TYPE, HAS_IDENTIFIER, &id)
        else {
            panic!("second claim must be visited");
        };
        assert_eq!(first, second);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn claiming_reuses_and_clears_existing_nodes() {
        let mut graph = TripleGraph::new();
        let id = iri("https://example.org/Collection");
        let Claim::Fresh(original) =
            Identities::default().claim(&mut graph, NODE_TYPE, HAS_IDENTIFIER, &id)
        else {
            panic!("fresh");
        };
        graph.insert(&original, HAS_LABEL, string_literal("stale"));

        let Claim::Fresh(reused) =
            Identities::default().claim(&mut graph, NODE_TYPE, HAS_IDENTIFIER, &id)
        else {
            panic!("fresh");
        };
        assert_eq!(original, reused);
        assert!(graph.objects(&reused, HAS_LABEL).is_empty());
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn clear_owned_stops_at_identified_nodes() {
        let mut graph = TripleGraph::new();
        let owner = Resource::blank();
        let anonymous = Resource::blank();
        let identified = Resource::blank();
        graph.insert(&owner, HAS_LABEL, anonymous.to_term());
        graph.insert(&owner, HAS_LABEL, identified.to_term());
        graph.insert(&anonymous, HAS_MINIMUM, typed_literal("1", xsd::LONG));
        graph.insert(
            &identified,
            HAS_IDENTIFIER,
            typed_literal("https://example.org/x", xsd::ANY_URI),
        );

        clear_owned(&mut graph, &owner);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.objects(&identified, HAS_IDENTIFIER).len(), 1);
    }

    #[test]
    fn reader_reports_wrong_literal_kinds() {
        let mut graph = TripleGraph::new();
        let subject = Resource::blank();
        graph.insert(&subject, HAS_MINIMUM, string_literal("many"));
        let reader = GraphReader::new(&graph);
        let err = reader.long(&subject, HAS_MINIMUM).expect_err("not a number");
        assert!(matches!(err, TransformError::UnexpectedTerm { expected, .. } if expected == "integer literal"));

        let term = string_literal("2024-05-01T10:00:00Z");
        let value = reader
            .value(&subject, HAS_MINIMUM, &term, ValueKind::DateTime)
            .expect("date");
        assert!(matches!(value, Value::DateTime(_)));
    }

    #[test]
    fn reader_rejects_duplicated_singletons() {
        let mut graph = TripleGraph::new();
        let subject = Resource::blank();
        graph.insert(&subject, HAS_LABEL, string_literal("a"));
        graph.insert(&subject, HAS_LABEL, string_literal("b"));
        let err = GraphReader::new(&graph)
            .string(&subject, HAS_LABEL)
            .expect_err("two labels");
        assert!(matches!(err, TransformError::ExpectedSingle { found: 2, .. }));
    }
}
