//! # cilbind Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the cilbind library. Import this module to get quick access to the essential
//! types for building metadata universes and binding them into declaration graphs.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilbind operations
pub use crate::Error;

/// The result type used throughout cilbind
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Binding entry points and their options
pub use crate::binder::{bind, BindOptions, BindOutput, Builder};

// ================================================================================================
// Metadata Input Model
// ================================================================================================

/// The metadata universe and its identifiers
pub use crate::metadata::{MetadataUniverse, SystemTypes, TypeEntry, TypeId, UnitEntry, UnitId};

/// Fluent construction of type entries
pub use crate::metadata::{MethodBuilder, PropertyBuilder, TypeEntryBuilder};

/// Type references and classification
pub use crate::metadata::{GenericShape, TypeCode, TypeKind, TypeRef};

/// Member rows attached to type entries
pub use crate::metadata::{EventEntry, FieldEntry, MethodEntry, ParamEntry, PropertyEntry};

/// Typed compile-time constants
pub use crate::metadata::Constant;

/// Attribute flag words and their masks
pub use crate::metadata::{
    FieldAccessFlags, FieldModifiers, MethodAccessFlags, MethodModifiers, TypeSemantics,
    TypeVisibility,
};

// ================================================================================================
// Declaration Graph
// ================================================================================================

/// The graph arena and its identifiers
pub use crate::graph::{DeclGraph, DeclId, NamespaceId, NamespaceNode};

/// Declarations and their kind payloads
pub use crate::graph::{
    Access, BaseSpecifier, ClassDecl, ClassKind, DeclKind, Declaration, EnumDecl, EnumItem,
    EnumValue, FieldDecl, MethodDecl, MethodKind, Owner, ParamDecl, PropertyDecl,
};

/// Type descriptors in signature positions
pub use crate::graph::{ArraySize, PrimitiveKind, TypeDesc};

/// Marshaling plans resolved onto value slots
pub use crate::graph::{ArrayWrapper, MarshalKind, MarshalPlan, Usage};

/// Traversal over a completed graph
pub use crate::graph::{walk, GraphVisitor};

// ================================================================================================
// Diagnostics and Naming
// ================================================================================================

/// Non-fatal findings collected during binding
pub use crate::binder::{Diagnostic, DiagnosticCode};

/// Identifier and reflection-name helpers
pub use crate::binder::{runtime_type_name, sanitize};
