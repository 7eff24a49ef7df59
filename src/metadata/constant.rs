//! Compile-time constant values attached to literal fields and defaulted parameters.
//!
//! Enum items carry their numeric value as a [`Constant`], and string constants
//! arrive UTF-16 encoded the way the metadata format stores them. [`Constant::from_utf16`]
//! performs the decode.

use widestring::U16Str;

use crate::{Error, Result};

/// A typed compile-time constant.
///
/// The variants mirror the element types a constant slot can hold. Integer
/// variants keep their original width and signedness so enum item values
/// survive without widening surprises.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Boolean constant
    Bool(bool),
    /// UTF-16 code unit constant
    Char(u16),
    /// Signed 8-bit integer constant
    I1(i8),
    /// Unsigned 8-bit integer constant
    U1(u8),
    /// Signed 16-bit integer constant
    I2(i16),
    /// Unsigned 16-bit integer constant
    U2(u16),
    /// Signed 32-bit integer constant
    I4(i32),
    /// Unsigned 32-bit integer constant
    U4(u32),
    /// Signed 64-bit integer constant
    I8(i64),
    /// Unsigned 64-bit integer constant
    U8(u64),
    /// 32-bit floating point constant
    R4(f32),
    /// 64-bit floating point constant
    R8(f64),
    /// String constant, already decoded from UTF-16
    String(String),
}

impl Constant {
    /// Decode a string constant from its raw little-endian UTF-16 byte form.
    ///
    /// ## Arguments
    /// * 'data' - The raw constant blob, a sequence of little-endian code units
    ///
    /// # Errors
    /// Returns an error if the blob length is odd or the code units are not
    /// valid UTF-16.
    pub fn from_utf16(data: &[u8]) -> Result<Self> {
        if data.len() % 2 != 0 {
            return Err(Error::Error(format!(
                "Invalid UTF-16 constant length - {}",
                data.len()
            )));
        }

        let units: Vec<u16> = data
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        match U16Str::from_slice(&units).to_string() {
            Ok(result) => Ok(Constant::String(result)),
            Err(_) => Err(Error::Error(
                "Invalid UTF-16 code units in constant".to_string(),
            )),
        }
    }

    /// Convert to a signed 64-bit value, if this constant is integral.
    ///
    /// Booleans convert to 0 or 1 and chars to their code unit value. Floating
    /// point and string constants return `None`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Constant::Bool(value) => Some(i64::from(*value)),
            Constant::Char(value) => Some(i64::from(*value)),
            Constant::I1(value) => Some(i64::from(*value)),
            Constant::U1(value) => Some(i64::from(*value)),
            Constant::I2(value) => Some(i64::from(*value)),
            Constant::U2(value) => Some(i64::from(*value)),
            Constant::I4(value) => Some(i64::from(*value)),
            Constant::U4(value) => Some(i64::from(*value)),
            Constant::I8(value) => Some(*value),
            Constant::U8(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    /// Convert to an unsigned 64-bit value, if this constant is integral and
    /// non-negative.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Constant::Bool(value) => Some(u64::from(*value)),
            Constant::Char(value) => Some(u64::from(*value)),
            Constant::I1(value) => u64::try_from(*value).ok(),
            Constant::U1(value) => Some(u64::from(*value)),
            Constant::I2(value) => u64::try_from(*value).ok(),
            Constant::U2(value) => Some(u64::from(*value)),
            Constant::I4(value) => u64::try_from(*value).ok(),
            Constant::U4(value) => Some(u64::from(*value)),
            Constant::I8(value) => u64::try_from(*value).ok(),
            Constant::U8(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow the decoded string, if this is a string constant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Constant::String(value) => Some(value),
            _ => None,
        }
    }
}
