//! Relationship inference
//!
//! Derives typed directed edges between the classes of one run. Pass order
//! per class is fixed: inheritance, method return types, method parameter
//! types, attribute types. An edge only materializes when its target names
//! a class of the current run; targets matching imported identifiers are
//! silently dropped.

use std::collections::HashSet;

use tracing::{debug, span, trace, Level};

use crate::core::TypeDescriptor;
use crate::model::database::{ClassRecord, RelationshipEdge, RelationshipKind};

/// Infer relationship edges from class records.
///
/// Output order is deterministic: classes in record order, passes in the
/// fixed order above, members in body order.
pub fn infer_relationships(classes: &[ClassRecord], imports: &[String]) -> Vec<RelationshipEdge> {
    let infer_span = span!(Level::INFO, "infer_relationships", classes = classes.len());
    let _enter = infer_span.enter();

    let class_names: HashSet<&str> = classes.iter().map(|c| c.name.as_str()).collect();
    let imported: HashSet<&str> = imports.iter().map(|s| s.as_str()).collect();

    let mut edges = Vec::new();
    let mut push_edge = |source: &str, target: &str, kind: RelationshipKind, label: String| {
        if imported.contains(target) {
            trace!(source, target, "Dropping edge to imported identifier");
            return;
        }
        if !class_names.contains(target) {
            trace!(source, target, "Dropping edge to unknown target");
            return;
        }
        edges.push(RelationshipEdge::new(source, target, kind, label));
    };

    for class in classes {
        // Inheritance: one edge to the first listed base
        if let Some(base) = class.bases.first() {
            push_edge(
                &class.name,
                base,
                RelationshipKind::Inherits,
                "Inherits from".to_string(),
            );
        }

        for method in &class.methods {
            match &method.returns {
                Some(container @ TypeDescriptor::Container { outer, .. }) => {
                    let mut seen: HashSet<&str> = HashSet::new();
                    for element in container.flattened_names() {
                        if !seen.insert(element) {
                            continue;
                        }
                        push_edge(
                            &class.name,
                            element,
                            RelationshipKind::ContainerOf,
                            format!(
                                "Function <{}()> Returns container {} of Type",
                                method.name, outer
                            ),
                        );
                    }
                }
                Some(TypeDescriptor::Scalar(name)) => {
                    push_edge(
                        &class.name,
                        name,
                        RelationshipKind::ReturnType,
                        format!("Function <{}()> Return Type", method.name),
                    );
                }
                _ => {}
            }

            for param in &method.params {
                if let Some(name) = param.ty.as_ref().and_then(|ty| ty.scalar_name()) {
                    push_edge(
                        &class.name,
                        name,
                        RelationshipKind::ParamType,
                        format!("Arg ({}) of type", param.name),
                    );
                }
            }
        }

        for attribute in &class.attributes {
            match &attribute.ty {
                Some(TypeDescriptor::Container { inner, .. }) => {
                    push_edge(
                        &class.name,
                        inner,
                        RelationshipKind::ContainerOf,
                        format!("Attribute <{}> container of type", attribute.name),
                    );
                }
                Some(TypeDescriptor::Scalar(name)) => {
                    push_edge(
                        &class.name,
                        name,
                        RelationshipKind::AttributeType,
                        format!("Attribute <{}> of type", attribute.name),
                    );
                }
                _ => {}
            }
        }
    }

    debug!(edges = edges.len(), "Inferred relationships");
    edges
}
