//! Insertion-ordered triple graph over `oxrdf` terms.
//!
//! The graph is the single mutable resource shared by the materializer and the
//! transforms during a packaging session. Statements form a set; inserting an
//! existing statement is a no-op.

use std::{
    collections::HashSet,
    fmt::{self, Display, Formatter},
    io::{Read, Write},
};

use oxrdf::{vocab::rdf, BlankNode, Graph, Literal, NamedNode, NamedNodeRef, Term, Triple};
use oxttl::{NTriplesParser, TurtleParseError, TurtleParser};
use thiserror::Error;

use crate::profile::Iri;

/// Subject position of a statement: a named node or an anonymous node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Named(NamedNode),
    Blank(BlankNode),
}

impl Resource {
    /// A fresh anonymous node.
    #[must_use]
    pub fn blank() -> Self {
        Self::Blank(BlankNode::default())
    }

    #[must_use]
    pub fn named(iri: &Iri) -> Self {
        Self::Named(iri.to_named_node())
    }

    #[must_use]
    pub fn to_term(&self) -> Term {
        match self {
            Self::Named(node) => Term::NamedNode(node.clone()),
            Self::Blank(node) => Term::BlankNode(node.clone()),
        }
    }

    /// Reads a resource back out of an object position.
    #[must_use]
    pub fn from_term(term: &Term) -> Option<Self> {
        match term {
            Term::NamedNode(node) => Some(Self::Named(node.clone())),
            Term::BlankNode(node) => Some(Self::Blank(node.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(node) => Display::fmt(node, f),
            Self::Blank(node) => Display::fmt(node, f),
        }
    }
}

impl From<&Iri> for Resource {
    fn from(iri: &Iri) -> Self {
        Self::named(iri)
    }
}

impl From<Resource> for Term {
    fn from(resource: Resource) -> Self {
        match resource {
            Resource::Named(node) => Self::NamedNode(node),
            Resource::Blank(node) => Self::BlankNode(node),
        }
    }
}

/// One subject-predicate-object statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: Resource,
    pub predicate: NamedNode,
    pub object: Term,
}

impl Statement {
    #[must_use]
    pub fn new(subject: Resource, predicate: NamedNode, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }

    /// Converts the statement into an `oxrdf` triple.
    #[must_use]
    pub fn to_triple(&self) -> Triple {
        match &self.subject {
            Resource::Named(node) => {
                Triple::new(node.clone(), self.predicate.clone(), self.object.clone())
            }
            Resource::Blank(node) => {
                Triple::new(node.clone(), self.predicate.clone(), self.object.clone())
            }
        }
    }

    fn matches(
        &self,
        subject: Option<&Resource>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<&Term>,
    ) -> bool {
        subject.map_or(true, |subject| &self.subject == subject)
            && predicate.map_or(true, |predicate| self.predicate.as_ref() == predicate)
            && object.map_or(true, |object| &self.object == object)
    }
}

/// Set of statements kept in insertion order.
#[derive(Clone, Debug, Default)]
pub struct TripleGraph {
    statements: Vec<Statement>,
    members: HashSet<Statement>,
}

impl TripleGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Inserts a statement, returning `false` when it was already present.
    pub fn insert(
        &mut self,
        subject: &Resource,
        predicate: NamedNodeRef<'_>,
        object: impl Into<Term>,
    ) -> bool {
        let statement = Statement::new(subject.clone(), predicate.into_owned(), object);
        if self.members.contains(&statement) {
            return false;
        }
        self.members.insert(statement.clone());
        self.statements.push(statement);
        true
    }

    /// Inserts `subject rdf:type class`.
    pub fn insert_type(&mut self, subject: &Resource, class: NamedNodeRef<'_>) -> bool {
        self.insert(subject, rdf::TYPE, class.into_owned())
    }

    #[must_use]
    pub fn contains(&self, subject: &Resource, predicate: NamedNodeRef<'_>, object: &Term) -> bool {
        self.members.contains(&Statement::new(
            subject.clone(),
            predicate.into_owned(),
            object.clone(),
        ))
    }

    /// Removes every statement matching the pattern; `None` is a wildcard.
    /// Returns the number of removed statements.
    pub fn remove_matching(
        &mut self,
        subject: Option<&Resource>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<&Term>,
    ) -> usize {
        let before = self.statements.len();
        let members = &mut self.members;
        self.statements.retain(|statement| {
            if statement.matches(subject, predicate, object) {
                members.remove(statement);
                false
            } else {
                true
            }
        });
        before - self.statements.len()
    }

    /// Statements matching the pattern; `None` is a wildcard.
    #[must_use]
    pub fn matching(
        &self,
        subject: Option<&Resource>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<&Term>,
    ) -> Vec<&Statement> {
        self.statements
            .iter()
            .filter(|statement| statement.matches(subject, predicate, object))
            .collect()
    }

    /// Objects of `subject predicate ?o`, in insertion order.
    #[must_use]
    pub fn objects(&self, subject: &Resource, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        self.matching(Some(subject), Some(predicate), None)
            .into_iter()
            .map(|statement| statement.object.clone())
            .collect()
    }

    /// Subjects of `?s predicate object`, in insertion order.
    #[must_use]
    pub fn subjects(&self, predicate: NamedNodeRef<'_>, object: &Term) -> Vec<Resource> {
        self.matching(None, Some(predicate), Some(object))
            .into_iter()
            .map(|statement| statement.subject.clone())
            .collect()
    }

    /// Subjects typed with `class`.
    #[must_use]
    pub fn instances_of(&self, class: NamedNodeRef<'_>) -> Vec<Resource> {
        self.subjects(rdf::TYPE, &Term::NamedNode(class.into_owned()))
    }

    #[must_use]
    pub fn has_type(&self, subject: &Resource, class: NamedNodeRef<'_>) -> bool {
        self.contains(subject, rdf::TYPE, &Term::NamedNode(class.into_owned()))
    }

    /// Copies the statements into an `oxrdf` graph.
    #[must_use]
    pub fn to_graph(&self) -> Graph {
        let mut graph = Graph::new();
        for statement in &self.statements {
            graph.insert(&statement.to_triple());
        }
        graph
    }

    /// Writes the statements as N-Triples, one line per statement.
    pub fn write_ntriples<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for statement in &self.statements {
            writeln!(writer, "{} .", statement.to_triple())?;
        }
        Ok(())
    }

    /// Reads an N-Triples document, such as one written by
    /// [`Self::write_ntriples`].
    ///
    /// # Errors
    ///
    /// Fails on I/O or syntax errors.
    pub fn read_ntriples<R: Read>(reader: R) -> Result<Self, ParseError> {
        Self::from_triples(NTriplesParser::new().for_reader(reader))
    }

    /// Reads a Turtle document.
    ///
    /// # Errors
    ///
    /// Fails on I/O or syntax errors.
    pub fn read_turtle<R: Read>(reader: R) -> Result<Self, ParseError> {
        Self::from_triples(TurtleParser::new().for_reader(reader))
    }

    fn from_triples(
        triples: impl Iterator<Item = Result<Triple, TurtleParseError>>,
    ) -> Result<Self, ParseError> {
        let mut graph = Self::new();
        for triple in triples {
            let triple = triple?;
            let subject = Term::from(triple.subject);
            let resource = Resource::from_term(&subject)
                .ok_or_else(|| ParseError::UnsupportedSubject(subject.to_string()))?;
            graph.insert(&resource, triple.predicate.as_ref(), triple.object);
        }
        tracing::debug!(statements = graph.len(), "graph_parsed");
        Ok(graph)
    }
}

/// Errors raised while parsing a serialized graph.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Syntax(#[from] TurtleParseError),
    #[error("subject `{0}` is neither a named nor an anonymous node")]
    UnsupportedSubject(String),
}

/// Builds a plain string literal.
#[must_use]
pub fn string_literal(value: impl Into<String>) -> Term {
    Term::Literal(Literal::new_simple_literal(value))
}

/// Builds a literal with the given datatype.
#[must_use]
pub fn typed_literal(value: impl Into<String>, datatype: NamedNodeRef<'_>) -> Term {
    Term::Literal(Literal::new_typed_literal(value, datatype.into_owned()))
}

#[cfg(test)]
mod tests {
    use oxrdf::{vocab::xsd, NamedNodeRef, Term};

    use super::{string_literal, typed_literal, ParseError, Resource, TripleGraph};

    const TITLE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
    const EXTENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://purl.org/dc/terms/extent");

    #[test]
    fn statements_form_a_set() {
        let mut graph = TripleGraph::new();
        let subject = Resource::blank();
        assert!(graph.insert(&subject, TITLE, string_literal("report")));
        assert!(!graph.insert(&subject, TITLE, string_literal("report")));
        assert!(graph.insert(&subject, EXTENT, typed_literal("12", xsd::LONG)));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.objects(&subject, TITLE), vec![string_literal("report")]);
    }

    #[test]
    fn remove_matching_uses_wildcards() {
        let mut graph = TripleGraph::new();
        let first = Resource::blank();
        let second = Resource::blank();
        graph.insert(&first, TITLE, string_literal("a"));
        graph.insert(&first, EXTENT, typed_literal("1", xsd::LONG));
        graph.insert(&second, TITLE, string_literal("b"));

        assert_eq!(graph.remove_matching(None, Some(TITLE), None), 2);
        assert_eq!(graph.len(), 1);
        assert!(graph.contains(&first, EXTENT, &typed_literal("1", xsd::LONG)));
        assert!(!graph.contains(&first, TITLE, &string_literal("a")));
        assert_eq!(graph.to_graph().len(), 1);
    }

    #[test]
    fn subjects_are_found_by_object() {
        let mut graph = TripleGraph::new();
        let subject = Resource::blank();
        let target = Term::NamedNode(TITLE.into_owned());
        graph.insert(&subject, EXTENT, target.clone());
        assert_eq!(graph.subjects(EXTENT, &target), vec![subject]);
    }

    #[test]
    fn ntriples_rendering_is_line_per_statement() {
        let mut graph = TripleGraph::new();
        let subject = Resource::Named(TITLE.into_owned());
        graph.insert(&subject, EXTENT, typed_literal("3", xsd::LONG));
        let mut buffer = Vec::new();
        graph.write_ntriples(&mut buffer).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        insta::assert_snapshot!(
            text.trim_end(),
            @r#"<http://purl.org/dc/terms/title> <http://purl.org/dc/terms/extent> "3"^^<http://www.w3.org/2001/XMLSchema#long> ."#
        );
    }

    #[test]
    fn ntriples_read_back_what_was_written() {
        let mut graph = TripleGraph::new();
        let subject = Resource::Named(TITLE.into_owned());
        let part = Resource::blank();
        graph.insert(&subject, EXTENT, typed_literal("3", xsd::LONG));
        graph.insert(&subject, TITLE, part.clone());
        graph.insert(&part, TITLE, string_literal("line one\nline \"two\""));
        let mut buffer = Vec::new();
        graph.write_ntriples(&mut buffer).expect("write");

        let parsed = TripleGraph::read_ntriples(buffer.as_slice()).expect("parse");
        assert_eq!(parsed.len(), graph.len());
        assert_eq!(
            parsed.objects(&subject, EXTENT),
            vec![typed_literal("3", xsd::LONG)]
        );
        let parsed_part = parsed
            .objects(&subject, TITLE)
            .first()
            .and_then(Resource::from_term)
            .expect("anonymous node");
        assert!(parsed_part.is_blank());
        assert_eq!(
            parsed.objects(&parsed_part, TITLE),
            vec![string_literal("line one\nline \"two\"")]
        );
    }

    #[test]
    fn turtle_documents_are_accepted() {
        let document = "@prefix dc: <http://purl.org/dc/terms/> .\n\
                        dc:title dc:extent \"7\"^^<http://www.w3.org/2001/XMLSchema#long> ;\n\
                        \x20   dc:title [ dc:title \"nested\" ] .\n";
        let graph = TripleGraph::read_turtle(document.as_bytes()).expect("parse");
        assert_eq!(graph.len(), 3);
        let subject = Resource::Named(TITLE.into_owned());
        assert_eq!(graph.objects(&subject, EXTENT), vec![typed_literal("7", xsd::LONG)]);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let err = TripleGraph::read_ntriples("<urn:a> <urn:b> .\n".as_bytes())
            .expect_err("missing object");
        assert!(matches!(err, ParseError::Syntax(_)));
    }
}
