//! The declaration graph output model.
//!
//! Binding produces a [`DeclGraph`]: namespaces owning type declarations,
//! classes owning member declarations, every typed member carrying a resolved
//! [`TypeDesc`] and, after marshal resolution, a [`MarshalPlan`]. The graph is
//! plain data behind index-based identifiers; once built it never changes and
//! is safe to hand to emitters running on other threads.
//!
//! # Key Components
//!
//! - [`DeclGraph`]: Arena owning declarations, namespaces and array wrappers
//! - [`Declaration`]: One node, display name and identity plus kind payload
//! - [`TypeDesc`]: Resolved type shape in a signature position
//! - [`MarshalPlan`]: Boundary representation and direction for one value
//! - [`GraphVisitor`]: Callback traversal for backend emitters
//!
//! # Examples
//!
//! ```rust,no_run
//! use cilbind::graph::{DeclGraph, DeclId, Declaration, GraphVisitor, walk};
//!
//! struct ClassLister(Vec<String>);
//!
//! impl GraphVisitor for ClassLister {
//!     fn visit_class(&mut self, _graph: &DeclGraph, _id: DeclId, decl: &Declaration) {
//!         if decl.emittable() {
//!             self.0.push(decl.display_name.clone());
//!         }
//!     }
//! }
//! ```

mod decl;
mod descriptor;
mod marshal;
mod namespace;
mod primitives;
mod visit;

pub use decl::{
    Access, BaseSpecifier, ClassDecl, ClassKind, DeclGraph, DeclId, DeclKind, Declaration,
    EnumDecl, EnumItem, EnumValue, FieldDecl, MethodDecl, MethodKind, Owner, ParamDecl,
    PropertyDecl,
};
pub use descriptor::{ArraySize, TypeDesc};
pub use marshal::{ArrayWrapper, MarshalKind, MarshalPlan, Usage};
pub use namespace::{NamespaceId, NamespaceNode};
pub use primitives::PrimitiveKind;
pub use visit::{walk, GraphVisitor};

pub(crate) use marshal::resolve_marshaling;
