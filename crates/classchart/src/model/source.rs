//! Structural facts emitted by an external source parser
//!
//! The pipeline never parses source text itself. A front-end (any
//! language's own parser) describes one source unit as a `SourceModule`:
//! a flat, document-ordered list of imports and class definitions. The
//! whole model derives serde, so a front-end only needs to emit JSON.

use serde::{Deserialize, Serialize};

/// One parsed source unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceModule {
    /// Imports and class definitions in document order
    #[serde(default)]
    pub items: Vec<ModuleItem>,
}

impl SourceModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<ModuleItem>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: ModuleItem) {
        self.items.push(item);
    }
}

/// A top-level statement the extractor cares about
///
/// Imports come in two shapes, folded over as a tagged variant rather than
/// a visitor hierarchy: a plain import carries module names, a from-import
/// carries a module plus the names taken from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleItem {
    /// `import a, b`
    Import { modules: Vec<String> },
    /// `from m import x, y`
    FromImport { module: String, names: Vec<String> },
    /// A class definition
    Class(ClassDef),
}

/// A class definition as reported by the parser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    /// Base-class names in declaration order
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub docstring: Option<String>,
    /// Body members in declaration order
    #[serde(default)]
    pub members: Vec<MemberDef>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            docstring: None,
            members: Vec::new(),
        }
    }

    pub fn with_bases(mut self, bases: Vec<String>) -> Self {
        self.bases = bases;
        self
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    pub fn with_member(mut self, member: MemberDef) -> Self {
        self.members.push(member);
        self
    }
}

/// A class body member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberDef {
    Function(FunctionDef),
    Assign(AssignDef),
}

/// A function-like member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDef>,
    /// Return annotation, when present
    #[serde(default)]
    pub returns: Option<TypeExpr>,
    #[serde(default)]
    pub docstring: Option<String>,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: None,
            docstring: None,
        }
    }

    pub fn with_param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_returns(mut self, returns: TypeExpr) -> Self {
        self.returns = Some(returns);
        self
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }
}

/// A function parameter with an optional annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDef {
    pub name: String,
    #[serde(default)]
    pub annotation: Option<TypeExpr>,
}

impl ParamDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
        }
    }

    pub fn with_annotation(mut self, annotation: TypeExpr) -> Self {
        self.annotation = Some(annotation);
        self
    }
}

/// An assignment member
///
/// `value_type` is the parser's best effort at naming the assigned value's
/// type when the assignment carries no annotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignDef {
    pub target: String,
    #[serde(default)]
    pub annotation: Option<TypeExpr>,
    #[serde(default)]
    pub value_type: Option<String>,
}

impl AssignDef {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            annotation: None,
            value_type: None,
        }
    }

    pub fn with_annotation(mut self, annotation: TypeExpr) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }
}

/// A type annotation expression tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// A bare identifier, e.g. `Entity`
    Name { id: String },
    /// A subscripted form, e.g. `List[Entity]`
    Subscript {
        value: Box<TypeExpr>,
        slice: Box<TypeExpr>,
    },
    /// A string-literal annotation, e.g. `"Entity"`
    Str { value: String },
    /// Anything the parser could not classify, kept as text
    Other { text: String },
}

impl TypeExpr {
    /// Convenience constructor for a bare name
    pub fn name(id: impl Into<String>) -> Self {
        TypeExpr::Name { id: id.into() }
    }

    /// Convenience constructor for a single-argument subscript
    pub fn subscript(value: TypeExpr, slice: TypeExpr) -> Self {
        TypeExpr::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
        }
    }

    /// Textual dump of the full expression, used as the raw fallback
    pub fn dump(&self) -> String {
        match self {
            TypeExpr::Name { id } => id.clone(),
            TypeExpr::Subscript { value, slice } => {
                format!("{}[{}]", value.dump(), slice.dump())
            }
            TypeExpr::Str { value } => format!("'{}'", value),
            TypeExpr::Other { text } => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_expr_dump() {
        assert_eq!(TypeExpr::name("Entity").dump(), "Entity");
        assert_eq!(
            TypeExpr::subscript(TypeExpr::name("List"), TypeExpr::name("Entity")).dump(),
            "List[Entity]"
        );
        assert_eq!(
            TypeExpr::Str {
                value: "Entity".into()
            }
            .dump(),
            "'Entity'"
        );
        assert_eq!(
            TypeExpr::Other {
                text: "Callable[..., int]".into()
            }
            .dump(),
            "Callable[..., int]"
        );
    }

    #[test]
    fn test_class_def_builder() {
        let class = ClassDef::new("Entity")
            .with_docstring("A thing.")
            .with_member(MemberDef::Assign(AssignDef {
                target: "id".into(),
                annotation: Some(TypeExpr::name("int")),
                value_type: None,
            }));
        assert_eq!(class.name, "Entity");
        assert_eq!(class.members.len(), 1);
    }

    #[test]
    fn test_module_deserializes_from_json() {
        let json = r#"{
            "items": [
                {"kind": "import", "modules": ["math"]},
                {"kind": "from_import", "module": "typing", "names": ["List"]},
                {"kind": "class", "name": "Entity", "members": [
                    {"kind": "assign", "target": "hp", "annotation": {"kind": "name", "id": "int"}},
                    {"kind": "function", "name": "tick", "params": [{"name": "self"}]}
                ]}
            ]
        }"#;
        let module: SourceModule = serde_json::from_str(json).unwrap();
        assert_eq!(module.items.len(), 3);
        match &module.items[2] {
            ModuleItem::Class(class) => {
                assert_eq!(class.name, "Entity");
                assert_eq!(class.members.len(), 2);
            }
            other => panic!("expected class item, got {:?}", other),
        }
    }
}
