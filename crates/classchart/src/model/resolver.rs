//! Type annotation resolution
//!
//! Normalizes a raw annotation expression into a `TypeDescriptor`. This is
//! the designed fallback path of the pipeline: anything it cannot reduce
//! becomes `Raw`, so resolution never fails.

use crate::core::TypeDescriptor;
use crate::model::source::TypeExpr;

/// Resolve an annotation expression into a type descriptor.
///
/// - A bare name or string-literal annotation becomes `Scalar`.
/// - A subscript whose value reduces to a simple name and whose single
///   argument is a simple name becomes `Container`.
/// - A subscript with a deeper argument collapses one level to its outer
///   name; if even the outer part is not a simple name, the whole
///   expression text is kept as `Raw`.
///
/// # Example
/// ```
/// use classchart::core::TypeDescriptor;
/// use classchart::model::{resolve_annotation, TypeExpr};
///
/// let expr = TypeExpr::subscript(TypeExpr::name("List"), TypeExpr::name("Entity"));
/// assert_eq!(
///     resolve_annotation(&expr),
///     TypeDescriptor::Container { outer: "List".into(), inner: "Entity".into() }
/// );
/// ```
pub fn resolve_annotation(expr: &TypeExpr) -> TypeDescriptor {
    match expr {
        TypeExpr::Name { id } => TypeDescriptor::Scalar(id.clone()),
        TypeExpr::Str { value } => TypeDescriptor::Scalar(value.clone()),
        TypeExpr::Subscript { value, slice } => {
            match (resolve_annotation(value), slice.as_ref()) {
                (TypeDescriptor::Scalar(outer), TypeExpr::Name { id }) => {
                    TypeDescriptor::Container {
                        outer,
                        inner: id.clone(),
                    }
                }
                // Nested argument: collapse one level to the outer name
                (TypeDescriptor::Scalar(outer), _) => TypeDescriptor::Scalar(outer),
                _ => TypeDescriptor::Raw(expr.dump()),
            }
        }
        TypeExpr::Other { text } => TypeDescriptor::Raw(text.clone()),
    }
}
