//! Extracted class records and relationship edges
//!
//! The in-memory vocabulary between extraction and layout: class records
//! in source order and the inferred relationship edges.

use std::fmt;

use crate::core::TypeDescriptor;

/// An attribute of a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub name: String,
    pub ty: Option<TypeDescriptor>,
}

impl AttributeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }

    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Single-line rendering used in box panels and width measurement,
    /// e.g. `hp: int` or `tag: None`
    pub fn rendered(&self) -> String {
        match &self.ty {
            Some(ty) => format!("{}: {}", self.name, ty),
            None => format!("{}: None", self.name),
        }
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRecord {
    pub name: String,
    pub ty: Option<TypeDescriptor>,
}

impl ParamRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }

    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.ty = Some(ty);
        self
    }
}

impl fmt::Display for ParamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{}: {}", self.name, ty),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A method of a class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    pub name: String,
    pub returns: Option<TypeDescriptor>,
    /// Reflowed docstring, empty when the source had none
    pub docstring: String,
    pub params: Vec<ParamRecord>,
}

impl MethodRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            returns: None,
            docstring: String::new(),
            params: Vec::new(),
        }
    }

    pub fn with_returns(mut self, ty: TypeDescriptor) -> Self {
        self.returns = Some(ty);
        self
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = docstring.into();
        self
    }

    pub fn with_param(mut self, param: ParamRecord) -> Self {
        self.params.push(param);
        self
    }

    /// Single-line signature used in box panels and width measurement,
    /// e.g. `tick(self, dt: float): Any`
    pub fn signature(&self) -> String {
        let args: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
        let ret = match &self.returns {
            Some(ty) => ty.to_string(),
            None => "Any".to_string(),
        };
        format!("{}({}): {}", self.name, args.join(", "), ret)
    }
}

/// One class definition found in the source unit
///
/// Immutable once created; records appear in source order regardless of
/// nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    /// Reflowed docstring, empty when the source had none
    pub docstring: String,
    pub bases: Vec<String>,
    pub attributes: Vec<AttributeRecord>,
    pub methods: Vec<MethodRecord>,
}

impl ClassRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docstring: String::new(),
            bases: Vec::new(),
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = docstring.into();
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeRecord) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_method(mut self, method: MethodRecord) -> Self {
        self.methods.push(method);
        self
    }
}

/// Kind of a typed relationship between two local classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    Inherits,
    AttributeType,
    ParamType,
    ReturnType,
    ContainerOf,
}

/// A directed edge between two local classes
///
/// Invariant: `target` names a class record of the current run. Targets
/// matching imported identifiers are never materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipEdge {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
    pub label: String,
}

impl RelationshipEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: RelationshipKind,
        label: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_class_record() {
        let class = ClassRecord::new("Empty");
        assert_eq!(class.name, "Empty");
        assert_eq!(class.docstring, "");
        assert!(class.bases.is_empty());
        assert!(class.attributes.is_empty());
        assert!(class.methods.is_empty());
    }

    #[test]
    fn test_attribute_rendering() {
        let typed = AttributeRecord::new("hp").with_type(TypeDescriptor::Scalar("int".into()));
        assert_eq!(typed.rendered(), "hp: int");

        let untyped = AttributeRecord::new("tag");
        assert_eq!(untyped.rendered(), "tag: None");

        let container = AttributeRecord::new("members").with_type(TypeDescriptor::Container {
            outer: "List".into(),
            inner: "Entity".into(),
        });
        assert_eq!(container.rendered(), "members: List[Entity]");
    }

    #[test]
    fn test_method_signature() {
        let method = MethodRecord::new("tick")
            .with_param(ParamRecord::new("self"))
            .with_param(ParamRecord::new("dt").with_type(TypeDescriptor::Scalar("float".into())))
            .with_returns(TypeDescriptor::Scalar("bool".into()));
        assert_eq!(method.signature(), "tick(self, dt: float): bool");
    }

    #[test]
    fn test_method_signature_defaults_to_any() {
        let method = MethodRecord::new("reset");
        assert_eq!(method.signature(), "reset(): Any");
    }

    #[test]
    fn test_relationship_edge_construction() {
        let edge = RelationshipEdge::new(
            "World",
            "Entity",
            RelationshipKind::AttributeType,
            "Attribute <player> of type",
        );
        assert_eq!(edge.source, "World");
        assert_eq!(edge.target, "Entity");
        assert_eq!(edge.kind, RelationshipKind::AttributeType);
    }
}
