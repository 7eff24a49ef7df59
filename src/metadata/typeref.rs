//! Type references and type classification for the metadata universe.
//!
//! A [`TypeRef`] is the shape of a type exactly as it appears in a signature: a named
//! type, possibly wrapped in array, pointer or by-reference modifiers. [`TypeCode`]
//! carries the host primitive type code of a named type, [`TypeKind`] its structural
//! classification, and [`GenericShape`] its generic instantiation state.

use strum::{EnumCount, EnumIter};

use crate::{metadata::TypeId, Result};

/// Host primitive type code of a named type.
///
/// Mirrors the managed runtime's fixed type code numbering. The set is closed:
/// converting a raw byte outside it fails with
/// [`Error::UnmappedTypeCode`](crate::Error::UnmappedTypeCode) rather than being
/// treated as unrepresentable input, since it means the loader and this library
/// disagree about the numbering.
///
/// Note that the code of an enum type is the code of its *underlying* storage
/// type, exactly as the managed runtime reports it.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
pub enum TypeCode {
    /// No type, the null reference
    Empty = 0,
    /// Any type not covered by a dedicated code
    Object = 1,
    /// The database-null marker type
    DBNull = 2,
    /// Boolean
    Boolean = 3,
    /// UTF-16 code unit
    Char = 4,
    /// 8-bit signed integer
    SByte = 5,
    /// 8-bit unsigned integer
    Byte = 6,
    /// 16-bit signed integer
    Int16 = 7,
    /// 16-bit unsigned integer
    UInt16 = 8,
    /// 32-bit signed integer
    Int32 = 9,
    /// 32-bit unsigned integer
    UInt32 = 10,
    /// 64-bit signed integer
    Int64 = 11,
    /// 64-bit unsigned integer
    UInt64 = 12,
    /// 32-bit floating point
    Single = 13,
    /// 64-bit floating point
    Double = 14,
    /// 128-bit scaled decimal
    Decimal = 15,
    /// Date and time
    DateTime = 16,
    /// Immutable string
    String = 18,
}

impl TypeCode {
    /// Convert a raw type code byte into a [`TypeCode`].
    ///
    /// ## Arguments
    /// * 'value' - The raw code as stored by the metadata loader
    ///
    /// # Errors
    /// Returns [`Error::UnmappedTypeCode`](crate::Error::UnmappedTypeCode) for any
    /// value outside the fixed table (including the unassigned code 17).
    pub fn from_raw(value: u8) -> Result<Self> {
        match value {
            0 => Ok(TypeCode::Empty),
            1 => Ok(TypeCode::Object),
            2 => Ok(TypeCode::DBNull),
            3 => Ok(TypeCode::Boolean),
            4 => Ok(TypeCode::Char),
            5 => Ok(TypeCode::SByte),
            6 => Ok(TypeCode::Byte),
            7 => Ok(TypeCode::Int16),
            8 => Ok(TypeCode::UInt16),
            9 => Ok(TypeCode::Int32),
            10 => Ok(TypeCode::UInt32),
            11 => Ok(TypeCode::Int64),
            12 => Ok(TypeCode::UInt64),
            13 => Ok(TypeCode::Single),
            14 => Ok(TypeCode::Double),
            15 => Ok(TypeCode::Decimal),
            16 => Ok(TypeCode::DateTime),
            18 => Ok(TypeCode::String),
            _ => Err(crate::Error::UnmappedTypeCode(value)),
        }
    }
}

impl TryFrom<u8> for TypeCode {
    type Error = crate::Error;

    fn try_from(value: u8) -> Result<Self> {
        TypeCode::from_raw(value)
    }
}

/// Structural classification of a named type.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
pub enum TypeKind {
    /// Reference type
    Class,
    /// Interface type
    Interface,
    /// Value type
    ValueType,
    /// Enumeration type
    Enum,
}

/// Generic instantiation state of a named type.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GenericShape {
    /// Not a generic type
    None,
    /// The open generic definition itself, e.g. `G<>`
    Definition,
    /// An instantiation of `definition`
    ///
    /// `open` is true when the instantiation still contains unresolved type
    /// parameters (e.g. `G<T>` inside another generic type); such references
    /// are unrepresentable across the boundary. A closed instantiation
    /// collapses to the declaration of its definition.
    Instance {
        /// The generic definition this instantiates
        definition: TypeId,
        /// Whether unresolved type parameters remain
        open: bool,
    },
    /// A generic type parameter such as `T`
    Parameter,
}

/// A type reference as written in a signature.
///
/// The shape tree preserves array, pointer and by-reference modifiers around a
/// named type. References are cheap to clone and compare; resolution to a
/// descriptor happens in the binder.
///
/// # Examples
///
/// ```rust
/// use cilbind::metadata::{MetadataUniverse, TypeRef};
///
/// let universe = MetadataUniverse::new();
/// let sys = *universe.system();
///
/// // out int -> by-reference wrapper around Int32
/// let out_int = TypeRef::named(sys.int32).by_ref();
/// assert!(out_int.is_by_ref());
/// assert_eq!(out_int.innermost().named_id(), Some(sys.int32));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// A named type in the universe
    Named(TypeId),
    /// Single-dimensional, zero-based array of the element type
    Array(Box<TypeRef>),
    /// Raw pointer to the element type
    Pointer(Box<TypeRef>),
    /// By-reference wrapper around the element type
    ByRef(Box<TypeRef>),
}

impl TypeRef {
    /// Reference a named type.
    #[must_use]
    pub fn named(id: TypeId) -> Self {
        TypeRef::Named(id)
    }

    /// Wrap the current reference in an array modifier.
    #[must_use]
    pub fn array(self) -> Self {
        TypeRef::Array(Box::new(self))
    }

    /// Wrap the current reference in a pointer modifier.
    #[must_use]
    pub fn pointer(self) -> Self {
        TypeRef::Pointer(Box::new(self))
    }

    /// Wrap the current reference in a by-reference modifier.
    #[must_use]
    pub fn by_ref(self) -> Self {
        TypeRef::ByRef(Box::new(self))
    }

    /// True if the outermost modifier is a by-reference wrapper.
    #[must_use]
    pub fn is_by_ref(&self) -> bool {
        matches!(self, TypeRef::ByRef(_))
    }

    /// True if the reference is a pointer at any level below by-ref.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        match self {
            TypeRef::Pointer(_) => true,
            TypeRef::ByRef(inner) => inner.is_pointer(),
            _ => false,
        }
    }

    /// The element reference of an array/pointer/by-ref wrapper, if any.
    #[must_use]
    pub fn element(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Named(_) => None,
            TypeRef::Array(e) | TypeRef::Pointer(e) | TypeRef::ByRef(e) => Some(e),
        }
    }

    /// Strip all modifiers down to the innermost reference.
    #[must_use]
    pub fn innermost(&self) -> &TypeRef {
        match self {
            TypeRef::Named(_) => self,
            TypeRef::Array(e) | TypeRef::Pointer(e) | TypeRef::ByRef(e) => e.innermost(),
        }
    }

    /// The named type id, if this reference is a plain named type.
    #[must_use]
    pub fn named_id(&self) -> Option<TypeId> {
        match self {
            TypeRef::Named(id) => Some(*id),
            _ => None,
        }
    }
}
