//! Resolved type descriptors attached to declarations.
//!
//! A [`TypeDesc`] is what a member signature carries after resolution: either
//! a primitive, a reference to a declaration in the graph, or a structural
//! wrapper around one of those. Anything the output surface cannot represent
//! collapses into [`TypeDesc::Unsupported`] holding the offending full name.

use crate::graph::{DeclId, PrimitiveKind};

/// Element count of an array descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArraySize {
    /// Length known only at runtime
    Variable,
    /// Fixed length
    Fixed(u32),
}

/// A resolved type in a declaration signature.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
    /// A primitive type
    Primitive(PrimitiveKind),
    /// One level of indirection around the inner type
    Indirect(Box<TypeDesc>),
    /// An array of the element type
    Array {
        /// Element type
        element: Box<TypeDesc>,
        /// Element count
        size: ArraySize,
    },
    /// A declaration in the graph
    Tag(DeclId),
    /// A type the output surface cannot represent, holding its full name
    Unsupported(String),
}

impl TypeDesc {
    /// Wrap in one level of indirection.
    #[must_use]
    pub fn indirect(self) -> Self {
        TypeDesc::Indirect(Box::new(self))
    }

    /// Wrap into a variable-size array descriptor.
    #[must_use]
    pub fn array(self) -> Self {
        TypeDesc::Array {
            element: Box::new(self),
            size: ArraySize::Variable,
        }
    }

    /// True when this descriptor itself is unsupported.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, TypeDesc::Unsupported(_))
    }

    /// True when an unsupported type sits anywhere in the descriptor.
    #[must_use]
    pub fn contains_unsupported(&self) -> bool {
        match self {
            TypeDesc::Unsupported(_) => true,
            TypeDesc::Indirect(inner) => inner.contains_unsupported(),
            TypeDesc::Array { element, .. } => element.contains_unsupported(),
            TypeDesc::Primitive(_) | TypeDesc::Tag(_) => false,
        }
    }

    /// The primitive kind, when this descriptor is one.
    #[must_use]
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDesc::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The referenced declaration, when this descriptor is a tag.
    #[must_use]
    pub fn tag(&self) -> Option<DeclId> {
        match self {
            TypeDesc::Tag(id) => Some(*id),
            _ => None,
        }
    }
}
