//! Statement-level encoding of property values on domain objects.
//!
//! Simple values are typed literals. A complex value is an anonymous node
//! holding one statement per nested value.

use std::sync::Arc;

use oxrdf::Term;

use crate::{
    profile::{PropertyType, PropertyValue, Value, ValueKind},
    rdf::{Resource, TripleGraph},
    transform::{clear_owned, value_literal, GraphReader, TransformError},
};

use super::MaterializeError;

/// Writes `value` on `subject`. Simple values already present are not
/// duplicated.
pub(crate) fn write_value(graph: &mut TripleGraph, subject: &Resource, value: &PropertyValue) {
    let predicate = value.predicate().as_named_node();
    match value.value() {
        Value::Complex(parts) => {
            let node = Resource::blank();
            graph.insert(subject, predicate, node.clone());
            for part in parts {
                write_value(graph, &node, part);
            }
        }
        simple => {
            if let Some(literal) = value_literal(simple) {
                graph.insert(subject, predicate, literal);
            }
        }
    }
}

/// Reads every value of `property_type` on `subject`, resolving complex
/// values through their declared nested properties.
pub(crate) fn read_values(
    graph: &TripleGraph,
    subject: &Resource,
    property_type: &Arc<PropertyType>,
) -> Result<Vec<PropertyValue>, MaterializeError> {
    let reader = GraphReader::new(graph);
    let predicate = property_type.predicate().as_named_node();
    let mut values = Vec::new();
    for term in reader.all(subject, predicate) {
        let value = match property_type.kind() {
            ValueKind::Complex => {
                let node = Resource::from_term(&term).ok_or_else(|| {
                    TransformError::UnexpectedTerm {
                        subject: subject.to_string(),
                        predicate: predicate.as_str().to_string(),
                        expected: "anonymous node",
                        found: term.to_string(),
                    }
                })?;
                let mut parts = Vec::new();
                for nested in property_type.nested() {
                    parts.extend(read_values(graph, &node, nested.property_type())?);
                }
                Value::Complex(parts)
            }
            kind => reader.value(subject, predicate, &term, kind)?,
        };
        values.push(PropertyValue::new(Arc::clone(property_type), value)?);
    }
    Ok(values)
}

/// Removes one simple value. Returns `true` when a statement was removed.
pub(crate) fn remove_value(
    graph: &mut TripleGraph,
    subject: &Resource,
    value: &PropertyValue,
) -> Result<bool, MaterializeError> {
    let literal = value_literal(value.value())
        .ok_or_else(|| MaterializeError::IllegalMutation(value.predicate().clone()))?;
    let removed = graph.remove_matching(
        Some(subject),
        Some(value.predicate().as_named_node()),
        Some(&literal),
    );
    Ok(removed > 0)
}

/// Removes every value of `property_type`, including the statements of
/// anonymous complex value nodes. Returns the number of values removed.
pub(crate) fn remove_values(
    graph: &mut TripleGraph,
    subject: &Resource,
    property_type: &PropertyType,
) -> usize {
    let predicate = property_type.predicate().as_named_node();
    for term in graph.objects(subject, predicate) {
        if let Term::BlankNode(_) = term {
            if let Some(node) = Resource::from_term(&term) {
                clear_owned(graph, &node);
            }
        }
    }
    graph.remove_matching(Some(subject), Some(predicate), None)
}
