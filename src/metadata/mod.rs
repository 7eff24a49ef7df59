//! The managed metadata input model.
//!
//! This module provides the in-memory representation of a set of managed
//! compilation units that declaration building consumes. It deliberately
//! carries only what binding needs: units, type entries with their attribute
//! words and generic shape, member entries, and typed constants.
//!
//! # Key Components
//!
//! - [`MetadataUniverse`]: Arena of units and type entries, system surface pre-seeded
//! - [`TypeEntry`]: A single type with its members and attribute word
//! - [`TypeRef`]: Shape-carrying reference to a type (arrays, pointers, by-refs)
//! - [`TypeEntryBuilder`]: Fluent construction of types and members
//! - [`Constant`]: Typed compile-time constants, UTF-16 decode included
//!
//! # Examples
//!
//! ```rust
//! use cilbind::metadata::{MetadataUniverse, TypeEntryBuilder, TypeRef};
//!
//! let mut universe = MetadataUniverse::new();
//! let unit = universe.add_unit("managed");
//! let sys = *universe.system();
//! let _ = TypeEntryBuilder::class(&mut universe, unit, "Managed", "Widget")?
//!     .method("Reset", |method| method)
//!     .field("Count", TypeRef::named(sys.int32));
//! assert_eq!(universe.exported_types(unit).len(), 1);
//! # Ok::<(), cilbind::Error>(())
//! ```

mod builder;
mod constant;
mod flags;
mod member;
mod typeref;
mod universe;

pub use builder::{MethodBuilder, PropertyBuilder, TypeEntryBuilder};
pub use constant::Constant;
pub use flags::{
    FieldAccessFlags, FieldModifiers, MethodAccessFlags, MethodModifiers, TypeSemantics,
    TypeVisibility, FIELD_ACCESS_MASK, METHOD_ACCESS_MASK, TYPE_VISIBILITY_MASK,
};
pub use member::{EventEntry, FieldEntry, MethodEntry, ParamEntry, PropertyEntry};
pub use typeref::{GenericShape, TypeCode, TypeKind, TypeRef};
pub use universe::{MetadataUniverse, SystemTypes, TypeEntry, TypeId, UnitEntry, UnitId};
