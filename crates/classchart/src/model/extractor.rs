//! Class model extraction
//!
//! Walks a `SourceModule` in document order and produces ordered
//! `ClassRecord`s plus the flattened list of imported identifiers.

use tracing::{debug, span, Level};

use crate::core::{reflow_docstring, TypeDescriptor, DOC_WRAP_WIDTH};
use crate::model::database::{
    AttributeRecord, ClassRecord, MethodRecord, ParamRecord,
};
use crate::model::resolver::resolve_annotation;
use crate::model::source::{AssignDef, ClassDef, FunctionDef, MemberDef, ModuleItem, SourceModule};

/// Extraction output: class records in source order plus flattened imports
#[derive(Debug, Default)]
pub struct ExtractedModule {
    pub classes: Vec<ClassRecord>,
    /// Module names and from-imported names, flattened into one list
    pub imports: Vec<String>,
}

/// Extract class records and imports from a parsed source unit.
///
/// Classes are visited flat, in document order, regardless of nesting.
/// The flattened import list contains each plainly imported module name,
/// and for from-imports both the module name and every imported name.
pub fn extract_module(module: &SourceModule) -> ExtractedModule {
    let extract_span = span!(Level::INFO, "extract_module", items = module.items.len());
    let _enter = extract_span.enter();

    let mut extracted = ExtractedModule::default();

    for item in &module.items {
        match item {
            ModuleItem::Import { modules } => {
                extracted.imports.extend(modules.iter().cloned());
            }
            ModuleItem::FromImport { module, names } => {
                extracted.imports.push(module.clone());
                extracted.imports.extend(names.iter().cloned());
            }
            ModuleItem::Class(class) => {
                extracted.classes.push(extract_class(class));
            }
        }
    }

    debug!(
        classes = extracted.classes.len(),
        imports = extracted.imports.len(),
        "Extracted class model"
    );
    extracted
}

fn extract_class(class: &ClassDef) -> ClassRecord {
    let mut record = ClassRecord::new(&class.name);
    record.docstring = class
        .docstring
        .as_deref()
        .map(|d| reflow_docstring(d, DOC_WRAP_WIDTH))
        .unwrap_or_default();
    record.bases = class.bases.clone();

    for member in &class.members {
        match member {
            MemberDef::Function(function) => record.methods.push(extract_method(function)),
            MemberDef::Assign(assign) => record.attributes.push(extract_attribute(assign)),
        }
    }

    record
}

fn extract_method(function: &FunctionDef) -> MethodRecord {
    let params = function
        .params
        .iter()
        .map(|p| ParamRecord {
            name: p.name.clone(),
            // Unannotated parameters stay untyped, they never become Raw
            ty: p.annotation.as_ref().map(resolve_annotation),
        })
        .collect();

    MethodRecord {
        name: function.name.clone(),
        returns: function.returns.as_ref().map(resolve_annotation),
        docstring: function
            .docstring
            .as_deref()
            .map(|d| reflow_docstring(d, DOC_WRAP_WIDTH))
            .unwrap_or_default(),
        params,
    }
}

fn extract_attribute(assign: &AssignDef) -> AttributeRecord {
    let ty = match &assign.annotation {
        Some(annotation) => Some(resolve_annotation(annotation)),
        // Plain assignment: fall back to the assigned value's type name
        None => assign
            .value_type
            .as_ref()
            .map(|name| TypeDescriptor::Scalar(name.clone())),
    };

    AttributeRecord {
        name: assign.target.clone(),
        ty,
    }
}
