//! Attribute flags and masks for types and members in the metadata universe.
//!
//! This module defines the bitflags and extraction helpers used to classify type
//! visibility and semantics, member access, and member modifiers from the raw
//! attribute words the metadata format stores.
//!
//! # Key Types
//! - [`TypeVisibility`], [`TypeSemantics`]: Type attribute flags
//! - [`MethodAccessFlags`], [`MethodModifiers`]: Method attribute flags
//! - [`FieldAccessFlags`], [`FieldModifiers`]: Field attribute flags

use bitflags::bitflags;

/// Bitmask for type `VISIBILITY` extraction
pub const TYPE_VISIBILITY_MASK: u32 = 0x0007;
/// Bitmask for method `ACCESS` extraction
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for field `ACCESS` extraction
pub const FIELD_ACCESS_MASK: u32 = 0x0007;

bitflags! {
    #[derive(PartialEq)]
    /// Type visibility flags
    pub struct TypeVisibility: u32 {
        /// Not visible outside its unit
        const NOT_PUBLIC = 0x0000;
        /// Visible outside its unit
        const PUBLIC = 0x0001;
        /// Nested type, visible wherever the declaring type is
        const NESTED_PUBLIC = 0x0002;
        /// Nested type, visible only to the declaring type
        const NESTED_PRIVATE = 0x0003;
        /// Nested type, visible to sub-types of the declaring type
        const NESTED_FAMILY = 0x0004;
        /// Nested type, visible within the unit
        const NESTED_ASSEMBLY = 0x0005;
        /// Nested type, visible to sub-types within the unit
        const NESTED_FAM_AND_ASSEM = 0x0006;
        /// Nested type, visible to sub-types or within the unit
        const NESTED_FAM_OR_ASSEM = 0x0007;
    }
}

impl TypeVisibility {
    /// Extract visibility from raw type attributes
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Self {
        let visibility = flags & TYPE_VISIBILITY_MASK;
        Self::from_bits_truncate(visibility)
    }

    /// True for the two visibilities that put a type on the exported surface
    #[must_use]
    pub fn is_exported(&self) -> bool {
        *self == TypeVisibility::PUBLIC || *self == TypeVisibility::NESTED_PUBLIC
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Type semantic and inheritance flags
    pub struct TypeSemantics: u32 {
        /// Type is an interface
        const INTERFACE = 0x0020;
        /// Type does not provide a complete implementation
        const ABSTRACT = 0x0080;
        /// Type cannot be derived from
        const SEALED = 0x0100;
        /// Type name is special
        const SPECIAL_NAME = 0x0400;
    }
}

impl TypeSemantics {
    /// Extract semantic flags from raw type attributes
    #[must_use]
    pub fn from_type_flags(flags: u32) -> Self {
        let semantics = flags & !TYPE_VISIBILITY_MASK;
        Self::from_bits_truncate(semantics)
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this unit
        const FAM_AND_ASSEM = 0x0002;
        /// Accessible by anyone in the unit
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessible by sub-types anywhere, plus anyone in the unit
        const FAM_OR_ASSEM = 0x0005;
        /// Accessible by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let access = flags & METHOD_ACCESS_MASK;
        Self::from_bits_truncate(access)
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// Runtime provides special behavior, depending upon the name
        const RTSPECIAL_NAME = 0x1000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let modifiers = flags & !METHOD_ACCESS_MASK;
        Self::from_bits_truncate(modifiers)
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Field access flags
    pub struct FieldAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this unit
        const FAM_AND_ASSEM = 0x0002;
        /// Accessible by anyone in the unit
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessible by sub-types anywhere, plus anyone in the unit
        const FAM_OR_ASSEM = 0x0005;
        /// Accessible by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl FieldAccessFlags {
    /// Extract access flags from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        let access = flags & FIELD_ACCESS_MASK;
        Self::from_bits_truncate(access)
    }
}

bitflags! {
    #[derive(PartialEq)]
    /// Field modifiers and properties
    pub struct FieldModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field may only be initialized, not written after initialization
        const INIT_ONLY = 0x0020;
        /// Value is a compile-time constant
        const LITERAL = 0x0040;
        /// Field is special
        const SPECIAL_NAME = 0x0200;
    }
}

impl FieldModifiers {
    /// Extract field modifiers from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        let modifiers = flags & !FIELD_ACCESS_MASK;
        Self::from_bits_truncate(modifiers)
    }
}
