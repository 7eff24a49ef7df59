use thiserror::Error;

use crate::metadata::TypeId;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant here is an invariant violation: one of the fixed mapping tables was handed a
/// value it does not cover, or the declaration graph ended up internally inconsistent. These
/// abort the build and name the offending value. Data-dependent conditions (a foreign-unit
/// type, an open generic, an array of object references) are deliberately *not* errors; they
/// surface as [`TypeDesc::Unsupported`](crate::graph::TypeDesc::Unsupported) descriptors and
/// ignored members, and the build carries on.
///
/// # Error Categories
///
/// ## Mapping Table Errors
/// - [`Error::UnmappedTypeCode`] - Raw primitive type code outside the fixed table
/// - [`Error::UnmappedAccessMask`] - Member access mask outside the fixed table
///
/// ## Graph Consistency Errors
/// - [`Error::MissingNamespace`] - Declaration ended up without an owning namespace
/// - [`Error::TypeNotFound`] - Type handle does not resolve in the metadata universe
/// - [`Error::DuplicateType`] - Same type identity declared twice in one unit
///
/// # Examples
///
/// ```rust,no_run
/// use cilbind::{Builder, Error, MetadataUniverse};
///
/// let universe = MetadataUniverse::new();
/// let unit = universe.system_unit();
/// match Builder::new(&universe, unit).build() {
///     Ok(output) => println!("built {} declarations", output.graph.decl_count()),
///     Err(Error::UnmappedAccessMask(mask)) => eprintln!("unmapped access mask {mask:#x}"),
///     Err(e) => eprintln!("build failed: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A raw primitive type code was outside the fixed, exhaustively-enumerated table.
    ///
    /// The table of primitive type codes is closed; a value outside it means the
    /// metadata loader and this library disagree about the code numbering, not that
    /// the input is unrepresentable. Never downgraded to an unsupported descriptor.
    #[error("Primitive type code outside the fixed table - {0:#04x}")]
    UnmappedTypeCode(u8),

    /// A member access mask was outside the fixed, exhaustively-enumerated table.
    ///
    /// The associated value is the masked access bits that had no mapping to an
    /// access level.
    #[error("Member access mask outside the fixed table - {0:#03x}")]
    UnmappedAccessMask(u32),

    /// A declaration ended up without an owning namespace.
    ///
    /// Must never occur when the walk is implemented correctly; it indicates a
    /// consistency bug in the builder, not a property of the input metadata.
    /// The associated value is the identity name of the orphaned declaration.
    #[error("Declaration has no owning namespace - {0}")]
    MissingNamespace(String),

    /// Failed to find a type in the metadata universe.
    ///
    /// This error occurs when a [`TypeId`] handle does not belong to the universe
    /// it is resolved against, typically because handles from two universes were
    /// mixed up.
    #[error("Failed to find type in the metadata universe - {0}")]
    TypeNotFound(TypeId),

    /// A type with the same identity name was already declared in this unit.
    ///
    /// The associated value is the clashing fully-qualified name.
    #[error("Type is already declared in this unit - {0}")]
    DuplicateType(String),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories, such as malformed
    /// constant blobs or invalid builder input.
    #[error("{0}")]
    Error(String),
}
