//! Classchart - Generate UMLet class diagrams from source structure facts
//!
//! A library that turns structural facts about a module (classes, bases,
//! attributes, methods, imports) into a UMLet UXF class diagram: boxes sized
//! to their content, relationships inferred from type annotations, and
//! connections routed between the closest box sides.
//!
//! # Quick Start
//!
//! ```rust
//! use classchart::generate;
//! use classchart::model::{ClassDef, ModuleItem, SourceModule};
//!
//! let module = SourceModule::from_items(vec![
//!     ModuleItem::Class(ClassDef::new("Engine")),
//!     ModuleItem::Class(ClassDef::new("Wheel")),
//! ]);
//! let xml = generate(&module).unwrap();
//! assert!(xml.contains("UMLClass"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, run the pipeline stages yourself:
//!
//! ```rust
//! use classchart::prelude::*;
//! use classchart::model::{ClassDef, ModuleItem, SourceModule};
//!
//! let module = SourceModule::from_items(vec![ModuleItem::Class(ClassDef::new("Engine"))]);
//!
//! let extracted = extract_module(&module);
//! let edges = infer_relationships(&extracted.classes, &extracted.imports);
//!
//! let mut boxes = LayoutEngine::new().arrange(&extracted.classes).unwrap();
//! let routed = ConnectionRouter::new().route(&edges, &mut boxes).unwrap();
//!
//! let xml = UxfSerializer::new()
//!     .to_xml(&extracted.classes, &boxes, &routed)
//!     .unwrap();
//! assert!(xml.contains("Engine"));
//! ```

pub mod core;
pub mod layout;
pub mod model;
pub mod render;
pub mod routing;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{ArrowDirection, DiagramError, Point, Side, TypeDescriptor};
    pub use crate::layout::{LayoutEngine, NodeBox};
    pub use crate::model::{
        extract_module, infer_relationships, ClassRecord, ExtractedModule, RelationshipEdge,
        RelationshipKind, SourceModule,
    };
    pub use crate::render::UxfSerializer;
    pub use crate::routing::{ConnectionRouter, RoutedEdge};
}

/// Generate a UXF diagram document from module facts
///
/// This is the simplest way to produce a diagram: extraction, relationship
/// inference, layout, routing, and serialization in one call.
///
/// # Arguments
/// * `module` - Structural facts about one source module
///
/// # Returns
/// * `Ok(String)` - The UXF XML document
/// * `Err` - If the module holds no classes, a relationship targets an
///   unknown class, or a relationship label cannot be rendered
///
/// # Example
/// ```rust
/// use classchart::generate;
/// use classchart::model::{ClassDef, ModuleItem, SourceModule};
///
/// let module = SourceModule::from_items(vec![ModuleItem::Class(ClassDef::new("Engine"))]);
/// let xml = generate(&module).unwrap();
/// assert!(xml.contains("Engine"));
/// ```
pub fn generate(module: &model::SourceModule) -> Result<String> {
    use crate::layout::LayoutEngine;
    use crate::model::{extract_module, infer_relationships};
    use crate::render::UxfSerializer;
    use crate::routing::ConnectionRouter;

    let extracted = extract_module(module);
    let edges = infer_relationships(&extracted.classes, &extracted.imports);

    let mut boxes = LayoutEngine::new().arrange(&extracted.classes)?;
    let routed = ConnectionRouter::new().route(&edges, &mut boxes)?;

    UxfSerializer::new().to_xml(&extracted.classes, &boxes, &routed)
}

/// Generate a UXF diagram and write it to `path`
///
/// The document is fully serialized before the file is touched, so a
/// rendering failure never leaves a partial diagram on disk.
pub fn generate_to_file(module: &model::SourceModule, path: &std::path::Path) -> Result<()> {
    let xml = generate(module)?;
    std::fs::write(path, xml)?;
    Ok(())
}
