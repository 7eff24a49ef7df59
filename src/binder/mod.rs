//! Binding pipeline from metadata to the declaration graph.
//!
//! The binder consumes a [`MetadataUniverse`](crate::metadata::MetadataUniverse)
//! and produces the language-neutral [`DeclGraph`](crate::graph::DeclGraph)
//! together with the diagnostics gathered on the way. It owns the member
//! selection policy, identifier sanitizing, signature keys, access mapping,
//! and the duplicate rename pass.
//!
//! # Key Components
//!
//! - [`bind`] / [`Builder`] - Entry points that walk a unit's exported types
//! - [`BindOptions`] - Knobs applied before the walk starts
//! - [`BindOutput`] - The finished graph plus collected [`Diagnostic`]s
//! - [`sanitize`] / [`runtime_type_name`] - Identifier and reflection-name helpers
//!
//! # Examples
//!
//! ```rust
//! use cilbind::binder::bind;
//! use cilbind::metadata::MetadataUniverse;
//!
//! let universe = MetadataUniverse::new();
//! let output = bind(&universe, universe.system_unit())?;
//! for diagnostic in &output.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok::<(), cilbind::Error>(())
//! ```

mod access;
mod builder;
mod diagnostics;
pub(crate) mod naming;
mod options;
mod signature;
mod typemap;

pub use builder::{bind, BindOutput, Builder};
pub use diagnostics::{Diagnostic, DiagnosticCode};
pub use naming::{runtime_type_name, sanitize};
pub use options::BindOptions;
