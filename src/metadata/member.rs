//! Member entries recorded on types in the metadata universe.
//!
//! Methods, fields, properties and events are stored as plain entries holding
//! their name, raw attribute word and type references. Flag interpretation
//! goes through the typed accessors here rather than through callers poking
//! at bits.

use crate::metadata::{
    Constant, FieldAccessFlags, FieldModifiers, MethodAccessFlags, MethodModifiers, TypeRef,
};

/// A formal parameter of a method entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamEntry {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: TypeRef,
    /// Marked as output-only in metadata
    pub is_out: bool,
    /// Carries a default value, making it optional at call sites
    pub has_default: bool,
}

/// A method recorded on a type, constructors included.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodEntry {
    /// Method name as recorded in metadata, `.ctor` for constructors
    pub name: String,
    /// Raw method attribute word
    pub flags: u32,
    /// Declares its own generic parameters
    pub is_generic: bool,
    /// Return type, `None` for void
    pub return_type: Option<TypeRef>,
    /// Formal parameters in declaration order
    pub params: Vec<ParamEntry>,
}

impl MethodEntry {
    /// Access level extracted from the attribute word
    #[must_use]
    pub fn access(&self) -> MethodAccessFlags {
        MethodAccessFlags::from_method_flags(self.flags)
    }

    /// Modifier flags extracted from the attribute word
    #[must_use]
    pub fn modifiers(&self) -> MethodModifiers {
        MethodModifiers::from_method_flags(self.flags)
    }

    /// True when the access level is public
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.access() == MethodAccessFlags::PUBLIC
    }

    /// True for static methods
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(MethodModifiers::STATIC)
    }

    /// True for virtual methods
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.modifiers().contains(MethodModifiers::VIRTUAL)
    }

    /// True for methods that cannot be overridden further
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers().contains(MethodModifiers::FINAL)
    }

    /// True for methods without an implementation
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers().contains(MethodModifiers::ABSTRACT)
    }

    /// True for methods with special meaning to tooling, accessors and
    /// operators among them
    #[must_use]
    pub fn is_special_name(&self) -> bool {
        self.modifiers().contains(MethodModifiers::SPECIAL_NAME)
    }
}

/// A field recorded on a type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    /// Field name
    pub name: String,
    /// Raw field attribute word
    pub flags: u32,
    /// Field type
    pub ty: TypeRef,
    /// Constant value for literal fields
    pub constant: Option<Constant>,
}

impl FieldEntry {
    /// Access level extracted from the attribute word
    #[must_use]
    pub fn access(&self) -> FieldAccessFlags {
        FieldAccessFlags::from_field_flags(self.flags)
    }

    /// Modifier flags extracted from the attribute word
    #[must_use]
    pub fn modifiers(&self) -> FieldModifiers {
        FieldModifiers::from_field_flags(self.flags)
    }

    /// True when the access level is public
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.access() == FieldAccessFlags::PUBLIC
    }

    /// True for static fields
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers().contains(FieldModifiers::STATIC)
    }

    /// True for compile-time constant fields, enum items among them
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.modifiers().contains(FieldModifiers::LITERAL)
    }
}

/// A property recorded on a type, with its accessor methods attached.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    /// Property name
    pub name: String,
    /// Property type
    pub ty: TypeRef,
    /// Getter accessor, when readable
    pub getter: Option<MethodEntry>,
    /// Setter accessor, when writable
    pub setter: Option<MethodEntry>,
}

impl PropertyEntry {
    /// True when either accessor is static
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.getter.as_ref().is_some_and(MethodEntry::is_static)
            || self.setter.as_ref().is_some_and(MethodEntry::is_static)
    }
}

/// An event recorded on a type.
///
/// Events are carried through the model for completeness but produce no
/// declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct EventEntry {
    /// Event name
    pub name: String,
    /// Delegate type of the event handler
    pub handler: TypeRef,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TypeId;

    fn entry(flags: u32) -> MethodEntry {
        MethodEntry {
            name: "M".to_string(),
            flags,
            is_generic: false,
            return_type: None,
            params: Vec::new(),
        }
    }

    #[test]
    fn test_method_flag_helpers() {
        let method = entry(0x0006 | 0x0010 | 0x0800);
        assert!(method.is_public());
        assert!(method.is_static());
        assert!(method.is_special_name());
        assert!(!method.is_virtual());

        let family = entry(0x0004);
        assert!(!family.is_public());
        assert!(family.access() == MethodAccessFlags::FAMILY);
    }

    #[test]
    fn test_field_literal() {
        let field = FieldEntry {
            name: "One".to_string(),
            flags: 0x0006 | 0x0010 | 0x0040,
            ty: TypeRef::named(TypeId::new(0)),
            constant: Some(Constant::I4(1)),
        };
        assert!(field.is_public());
        assert!(field.is_literal());
        assert!(field.is_static());
    }

    #[test]
    fn test_property_static_from_accessors() {
        let read_only = PropertyEntry {
            name: "Count".to_string(),
            ty: TypeRef::named(TypeId::new(0)),
            getter: Some(entry(0x0006 | 0x0010)),
            setter: None,
        };
        assert!(read_only.is_static());

        let instance = PropertyEntry {
            name: "Name".to_string(),
            ty: TypeRef::named(TypeId::new(0)),
            getter: Some(entry(0x0006)),
            setter: Some(entry(0x0006)),
        };
        assert!(!instance.is_static());
    }
}
