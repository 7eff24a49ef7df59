//! Primitive kinds carried by type descriptors.
//!
//! A [`PrimitiveKind`] is the fully resolved form of a runtime primitive:
//! classification codes from the input model map onto it, and signature
//! rendering uses its canonical token text.

use strum::{EnumCount, EnumIter};

use crate::metadata::TypeCode;

/// Fully resolved primitive type.
///
/// `Void` never comes out of a classification code. It exists for return
/// types and for pointee positions, and resolution produces it by identity.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
pub enum PrimitiveKind {
    /// No value
    Void,
    /// The null classification, produced by the `Empty` code
    Null,
    /// Boolean
    Bool,
    /// UTF-16 code unit
    Char,
    /// Signed 8-bit integer
    I1,
    /// Unsigned 8-bit integer
    U1,
    /// Signed 16-bit integer
    I2,
    /// Unsigned 16-bit integer
    U2,
    /// Signed 32-bit integer
    I4,
    /// Unsigned 32-bit integer
    U4,
    /// Signed 64-bit integer
    I8,
    /// Unsigned 64-bit integer
    U8,
    /// 32-bit floating point
    R4,
    /// 64-bit floating point
    R8,
    /// Immutable string
    String,
    /// 128-bit decimal
    Decimal,
}

impl PrimitiveKind {
    /// Map a classification code onto a primitive kind.
    ///
    /// `Object`, `DBNull` and `DateTime` have no primitive form and return
    /// `None`, leaving their handling to type resolution.
    #[must_use]
    pub fn from_type_code(code: TypeCode) -> Option<Self> {
        match code {
            TypeCode::Empty => Some(PrimitiveKind::Null),
            TypeCode::Boolean => Some(PrimitiveKind::Bool),
            TypeCode::Char => Some(PrimitiveKind::Char),
            TypeCode::SByte => Some(PrimitiveKind::I1),
            TypeCode::Byte => Some(PrimitiveKind::U1),
            TypeCode::Int16 => Some(PrimitiveKind::I2),
            TypeCode::UInt16 => Some(PrimitiveKind::U2),
            TypeCode::Int32 => Some(PrimitiveKind::I4),
            TypeCode::UInt32 => Some(PrimitiveKind::U4),
            TypeCode::Int64 => Some(PrimitiveKind::I8),
            TypeCode::UInt64 => Some(PrimitiveKind::U8),
            TypeCode::Single => Some(PrimitiveKind::R4),
            TypeCode::Double => Some(PrimitiveKind::R8),
            TypeCode::Decimal => Some(PrimitiveKind::Decimal),
            TypeCode::String => Some(PrimitiveKind::String),
            TypeCode::Object | TypeCode::DBNull | TypeCode::DateTime => None,
        }
    }

    /// Canonical signature token for this kind.
    #[must_use]
    pub fn token(&self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::I1 => "sbyte",
            PrimitiveKind::U1 => "byte",
            PrimitiveKind::I2 => "int16",
            PrimitiveKind::U2 => "uint16",
            PrimitiveKind::I4 => "int",
            PrimitiveKind::U4 => "uint",
            PrimitiveKind::I8 => "long",
            PrimitiveKind::U8 => "ulong",
            PrimitiveKind::R4 => "single",
            PrimitiveKind::R8 => "double",
            PrimitiveKind::String => "string",
            PrimitiveKind::Decimal => "System.Decimal",
        }
    }

    /// True for the signed integral kinds.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::I1 | PrimitiveKind::I2 | PrimitiveKind::I4 | PrimitiveKind::I8
        )
    }
}
