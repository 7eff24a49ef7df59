// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![allow(clippy::too_many_arguments)]

//! # cilbind
//!
//! [![Crates.io](https://img.shields.io/crates/v/cilbind.svg)](https://crates.io/crates/cilbind)
//! [![Documentation](https://docs.rs/cilbind/badge.svg)](https://docs.rs/cilbind)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/cilbind/blob/main/LICENSE-APACHE)
//!
//! A binding generator front end for managed class libraries. Built in pure Rust, `cilbind`
//! lowers loaded .NET-style metadata into a language-neutral declaration graph with marshaling
//! plans attached, ready for a native-language code emitter to walk.
//!
//! ## Features
//!
//! - **🗂️ Declaration graph** - Namespaces, classes, enums, and members in one arena-backed tree
//! - **🔍 Member selection policy** - Public surface extraction with explicit-interface promotion
//! - **📇 Stable signature keys** - Reflection-style member keys for runtime method lookup
//! - **🔀 Marshaling plans** - Per-slot value, string, object-handle, and array-wrapper strategies
//! - **🧹 Identifier sanitizing** - Deterministic renaming of clashing or unrepresentable names
//! - **🛡️ Memory safe** - Built in Rust with comprehensive error handling
//! - **🧩 Extensible architecture** - Visitor seam for custom emitters and analysis passes
//!
//! ## Quick Start
//!
//! Add `cilbind` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cilbind = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use cilbind::prelude::*;
//!
//! let mut universe = MetadataUniverse::new();
//! let unit = universe.add_unit("acme");
//! let string = universe.system().string;
//!
//! let _ = TypeEntryBuilder::class(&mut universe, unit, "Acme", "Greeter")?
//!     .ctor(|ctor| ctor)
//!     .method("Greet", |method| method.returns(TypeRef::named(string)));
//!
//! let output = bind(&universe, unit)?;
//! println!("Bound {} declarations", output.graph.decl_count());
//! # Ok::<(), cilbind::Error>(())
//! ```
//!
//! ### Walking the Graph
//!
//! Emitters consume the finished graph through the [`graph::GraphVisitor`] seam:
//!
//! ```rust
//! use cilbind::graph::{walk, DeclGraph, DeclId, Declaration, GraphVisitor};
//! use cilbind::prelude::*;
//!
//! struct MethodLister(Vec<String>);
//!
//! impl GraphVisitor for MethodLister {
//!     fn visit_method(&mut self, _graph: &DeclGraph, _id: DeclId, decl: &Declaration) {
//!         if decl.emittable() {
//!             self.0.push(decl.display_name.clone());
//!         }
//!     }
//! }
//!
//! let universe = MetadataUniverse::new();
//! let output = bind(&universe, universe.system_unit())?;
//! let mut lister = MethodLister(Vec::new());
//! walk(&output.graph, &mut lister);
//! # Ok::<(), cilbind::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `cilbind` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata`] - The loaded-metadata model the binder consumes
//! - [`graph`] - The language-neutral declaration graph the binder produces
//! - [`binder`] - The pipeline that turns one into the other
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Binding Pipeline
//!
//! The [`binder::Builder`] walks every exported type of one unit and declares it in the
//! graph, applying on the way:
//!
//! - **Selection**: public members, promoted explicit-interface methods, accessor-backed
//!   properties; root-object members and generic methods stay behind
//! - **Type lowering**: metadata type references become [`graph::TypeDesc`] descriptors,
//!   with everything the native surface cannot carry collapsing to an unsupported marker
//! - **Renaming**: duplicate display names get deterministic numeric suffixes
//! - **Marshaling**: every parameter, return, field, and property slot receives a
//!   [`graph::MarshalPlan`] describing how values cross the boundary
//!
//! Skipped members stay in the graph with their ignore mark set, so diagnostics and
//! emitters see the same picture.
//!
//! ## Diagnostics
//!
//! Non-fatal findings are collected as numbered [`binder::Diagnostic`] warnings rather
//! than errors; a single unbindable signature costs one warning, not the build:
//!
//! ```rust
//! use cilbind::prelude::*;
//!
//! let universe = MetadataUniverse::new();
//! let output = bind(&universe, universe.system_unit())?;
//! for diagnostic in &output.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok::<(), cilbind::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Errors are reserved for invariant
//! violations such as an access mask outside the fixed mapping table; data-dependent
//! limitations surface as unsupported descriptors and warnings instead:
//!
//! ```rust
//! use cilbind::{bind, Error, MetadataUniverse};
//!
//! let universe = MetadataUniverse::new();
//! match bind(&universe, universe.system_unit()) {
//!     Ok(output) => println!("Bound {} declarations", output.graph.decl_count()),
//!     Err(Error::UnmappedAccessMask(mask)) => println!("Unmapped access mask: {mask:#x}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the cilbind library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use cilbind::prelude::*;
///
/// let universe = MetadataUniverse::new();
/// let output = bind(&universe, universe.system_unit())?;
/// assert!(output.graph.decl_count() > 0);
/// # Ok::<(), cilbind::Error>(())
/// ```
pub mod prelude;

/// Binding pipeline from loaded metadata to the declaration graph.
///
/// This module owns the member selection policy, signature keys, identifier
/// sanitizing, access mapping, duplicate renaming, and diagnostics.
///
/// # Key Types
///
/// - [`binder::Builder`] - Walks one unit's exported types into a graph
/// - [`binder::BindOptions`] - Knobs applied before the walk starts
/// - [`binder::BindOutput`] - The finished graph plus collected diagnostics
/// - [`binder::Diagnostic`] - A numbered, non-fatal finding
///
/// # Main Functions
///
/// - [`binder::bind`] - One-call binding with default options
/// - [`binder::sanitize`] - Identifier sanitizing for display names
/// - [`binder::runtime_type_name`] - Reflection-style type name conversion
pub mod binder;

/// The language-neutral declaration graph and its marshaling model.
///
/// The graph is what a code emitter consumes: an arena of declarations
/// organized under a namespace tree, with type descriptors and marshaling
/// plans on every value slot.
///
/// # Key Types
///
/// - [`graph::DeclGraph`] - Arena of declarations plus the namespace tree
/// - [`graph::Declaration`] - One named node with its kind-specific payload
/// - [`graph::TypeDesc`] - Structural descriptor of a value slot's type
/// - [`graph::MarshalPlan`] - How a slot crosses the native boundary
/// - [`graph::GraphVisitor`] - Traversal seam for emitters
pub mod graph;

/// The loaded-metadata model the binder consumes.
///
/// [`metadata::MetadataUniverse`] holds units and type entries the way a
/// metadata loader would hand them over: raw attribute bits, type references,
/// and member rows. [`metadata::TypeEntryBuilder`] offers a fluent way to
/// populate a universe in tests and tooling.
///
/// # Key Types
///
/// - [`metadata::MetadataUniverse`] - Units, type entries, and the system unit
/// - [`metadata::TypeEntryBuilder`] - Fluent construction of type entries
/// - [`metadata::TypeRef`] - Shape-carrying reference to a type
/// - [`metadata::Constant`] - Compile-time constant values for enum items
pub mod metadata;

/// `cilbind` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use cilbind::{bind, BindOutput, MetadataUniverse, Result};
///
/// fn bind_system(universe: &MetadataUniverse) -> Result<BindOutput> {
///     bind(universe, universe.system_unit())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `cilbind` Error type
///
/// The main error type for all operations in this crate. Reserved for invariant
/// violations in the fixed mapping tables and the graph itself; unbindable input
/// surfaces as warnings instead.
///
/// # Examples
///
/// ```rust
/// use cilbind::{bind, Error, MetadataUniverse};
///
/// let universe = MetadataUniverse::new();
/// match bind(&universe, universe.system_unit()) {
///     Ok(_) => println!("Bound"),
///     Err(Error::UnmappedTypeCode(code)) => println!("Unmapped type code: {code:#04x}"),
///     Err(e) => println!("Error: {e}"),
/// }
/// ```
pub use error::Error;

/// Main entry points for binding a unit.
///
/// See [`binder::Builder`] for the configurable form and [`binder::bind`] for
/// the one-call form.
///
/// # Example
///
/// ```rust
/// use cilbind::{bind, MetadataUniverse};
/// let universe = MetadataUniverse::new();
/// let output = bind(&universe, universe.system_unit())?;
/// println!("Bound {} declarations", output.graph.decl_count());
/// # Ok::<(), cilbind::Error>(())
/// ```
pub use binder::{bind, BindOptions, BindOutput, Builder};

/// The metadata model the binder consumes.
///
/// [`metadata::MetadataUniverse`] is re-exported at the crate root since every
/// use of the library starts by constructing or receiving one.
pub use metadata::MetadataUniverse;

/// The declaration graph the binder produces.
///
/// See [`graph::DeclGraph`] for traversal and lookup methods.
pub use graph::DeclGraph;
