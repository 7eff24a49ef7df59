//! Fluent builders for populating a [`MetadataUniverse`].
//!
//! This module provides [`TypeEntryBuilder`], which offers a fluent API for
//! declaring types and attaching members without touching raw attribute words.
//! Method and property shapes go through [`MethodBuilder`] and
//! [`PropertyBuilder`] closures, so call sites read like the declarations they
//! describe.
//!
//! # Example
//!
//! ```rust
//! use cilbind::metadata::{MetadataUniverse, TypeEntryBuilder, TypeRef};
//!
//! let mut universe = MetadataUniverse::new();
//! let unit = universe.add_unit("managed");
//! let sys = *universe.system();
//! let id = TypeEntryBuilder::class(&mut universe, unit, "Managed", "Greeter")?
//!     .ctor(|ctor| ctor)
//!     .method("Greet", |method| method.returns(TypeRef::named(sys.string)))
//!     .id();
//! assert!(universe.is_exported(id));
//! # Ok::<(), cilbind::Error>(())
//! ```

use crate::metadata::{
    Constant, EventEntry, FieldAccessFlags, FieldEntry, FieldModifiers, GenericShape,
    MetadataUniverse, MethodAccessFlags, MethodEntry, MethodModifiers, ParamEntry, PropertyEntry,
    SystemTypes, TypeCode, TypeId, TypeKind, TypeRef, TypeSemantics, TypeVisibility, UnitId,
    TYPE_VISIBILITY_MASK,
};
use crate::{Error, Result};

/// Provides a fluent API for declaring types and their members
pub struct TypeEntryBuilder<'a> {
    /// Universe receiving the declarations
    universe: &'a mut MetadataUniverse,
    /// Entry being built
    id: TypeId,
}

impl<'a> TypeEntryBuilder<'a> {
    /// Start building a public class
    ///
    /// ## Arguments
    /// * 'universe' - The universe to declare into
    /// * 'unit' - The unit the class belongs to
    /// * 'namespace' - Namespace for the class
    /// * 'name' - Name for the class
    ///
    /// # Errors
    /// Returns an error if the full name collides with an existing type.
    pub fn class(
        universe: &'a mut MetadataUniverse,
        unit: UnitId,
        namespace: &str,
        name: &str,
    ) -> Result<Self> {
        let object = universe.system().object;
        let id = universe.declare_type(unit, namespace, name, TypeKind::Class, TypeCode::Object)?;
        let entry = universe.type_entry_mut(id);
        entry.flags = TypeVisibility::PUBLIC.bits();
        entry.base = Some(TypeRef::named(object));
        Ok(TypeEntryBuilder { universe, id })
    }

    /// Start building a public value type
    ///
    /// ## Arguments
    /// * 'universe' - The universe to declare into
    /// * 'unit' - The unit the value type belongs to
    /// * 'namespace' - Namespace for the value type
    /// * 'name' - Name for the value type
    ///
    /// # Errors
    /// Returns an error if the full name collides with an existing type.
    pub fn value_type(
        universe: &'a mut MetadataUniverse,
        unit: UnitId,
        namespace: &str,
        name: &str,
    ) -> Result<Self> {
        let value_root = universe.system().value_type;
        let id =
            universe.declare_type(unit, namespace, name, TypeKind::ValueType, TypeCode::Object)?;
        let entry = universe.type_entry_mut(id);
        entry.flags = TypeVisibility::PUBLIC.bits() | TypeSemantics::SEALED.bits();
        entry.base = Some(TypeRef::named(value_root));
        Ok(TypeEntryBuilder { universe, id })
    }

    /// Start building a public interface
    ///
    /// ## Arguments
    /// * 'universe' - The universe to declare into
    /// * 'unit' - The unit the interface belongs to
    /// * 'namespace' - Namespace for the interface
    /// * 'name' - Name for the interface
    ///
    /// # Errors
    /// Returns an error if the full name collides with an existing type.
    pub fn interface(
        universe: &'a mut MetadataUniverse,
        unit: UnitId,
        namespace: &str,
        name: &str,
    ) -> Result<Self> {
        let id =
            universe.declare_type(unit, namespace, name, TypeKind::Interface, TypeCode::Object)?;
        let entry = universe.type_entry_mut(id);
        entry.flags = TypeVisibility::PUBLIC.bits()
            | TypeSemantics::INTERFACE.bits()
            | TypeSemantics::ABSTRACT.bits();
        Ok(TypeEntryBuilder { universe, id })
    }

    /// Start building a public enum with the given underlying type
    ///
    /// ## Arguments
    /// * 'universe' - The universe to declare into
    /// * 'unit' - The unit the enum belongs to
    /// * 'namespace' - Namespace for the enum
    /// * 'name' - Name for the enum
    /// * 'underlying' - Integral type code backing the items
    ///
    /// # Errors
    /// Returns an error if 'underlying' is not an integral code or the full
    /// name collides with an existing type.
    pub fn enumeration(
        universe: &'a mut MetadataUniverse,
        unit: UnitId,
        namespace: &str,
        name: &str,
        underlying: TypeCode,
    ) -> Result<Self> {
        let system = *universe.system();
        let Some(backing) = integral_id(&system, underlying) else {
            return Err(Error::Error(format!(
                "Invalid enum underlying type - {underlying:?}"
            )));
        };
        let id = universe.declare_type(unit, namespace, name, TypeKind::Enum, underlying)?;
        let entry = universe.type_entry_mut(id);
        entry.flags = TypeVisibility::PUBLIC.bits() | TypeSemantics::SEALED.bits();
        entry.base = Some(TypeRef::named(system.enum_root));
        entry.underlying = Some(TypeRef::named(backing));
        Ok(TypeEntryBuilder { universe, id })
    }

    /// Start building a nested-public class inside 'declaring'
    ///
    /// ## Arguments
    /// * 'universe' - The universe to declare into
    /// * 'declaring' - The enclosing type
    /// * 'name' - Name for the nested class
    ///
    /// # Errors
    /// Returns an error if 'declaring' is unknown or the nested name collides.
    pub fn nested_class(
        universe: &'a mut MetadataUniverse,
        declaring: TypeId,
        name: &str,
    ) -> Result<Self> {
        let object = universe.system().object;
        let id = universe.declare_nested(declaring, name, TypeKind::Class, TypeCode::Object)?;
        let entry = universe.type_entry_mut(id);
        entry.flags = TypeVisibility::NESTED_PUBLIC.bits();
        entry.base = Some(TypeRef::named(object));
        Ok(TypeEntryBuilder { universe, id })
    }

    /// Declare a generic type parameter placeholder
    ///
    /// The placeholder carries no attributes and never reaches the exported
    /// surface. References to it mark the referencing member as unresolvable.
    ///
    /// ## Arguments
    /// * 'universe' - The universe to declare into
    /// * 'unit' - The unit the placeholder belongs to
    /// * 'name' - Name of the type parameter
    ///
    /// # Errors
    /// Returns an error if the name collides with an existing type.
    pub fn type_parameter(
        universe: &'a mut MetadataUniverse,
        unit: UnitId,
        name: &str,
    ) -> Result<Self> {
        let id = universe.declare_type(unit, "", name, TypeKind::Class, TypeCode::Object)?;
        universe.type_entry_mut(id).generic = GenericShape::Parameter;
        Ok(TypeEntryBuilder { universe, id })
    }

    /// Clear the visibility, keeping the type off the exported surface
    #[must_use]
    pub fn not_exported(self) -> Self {
        let entry = self.universe.type_entry_mut(self.id);
        entry.flags &= !TYPE_VISIBILITY_MASK;
        self
    }

    /// Mark the type sealed
    #[must_use]
    pub fn sealed(self) -> Self {
        self.universe.type_entry_mut(self.id).flags |= TypeSemantics::SEALED.bits();
        self
    }

    /// Mark the type abstract
    #[must_use]
    pub fn abstract_type(self) -> Self {
        self.universe.type_entry_mut(self.id).flags |= TypeSemantics::ABSTRACT.bits();
        self
    }

    /// Mark the type as a generic definition
    #[must_use]
    pub fn generic_definition(self) -> Self {
        self.universe.type_entry_mut(self.id).generic = GenericShape::Definition;
        self
    }

    /// Mark the type as a closed instantiation of 'definition'
    #[must_use]
    pub fn generic_instance_of(self, definition: TypeId) -> Self {
        self.universe.type_entry_mut(self.id).generic = GenericShape::Instance {
            definition,
            open: false,
        };
        self
    }

    /// Mark the type as an open instantiation of 'definition'
    #[must_use]
    pub fn open_generic_instance_of(self, definition: TypeId) -> Self {
        self.universe.type_entry_mut(self.id).generic = GenericShape::Instance {
            definition,
            open: true,
        };
        self
    }

    /// Replace the base type
    #[must_use]
    pub fn extends(self, base: TypeRef) -> Self {
        self.universe.type_entry_mut(self.id).base = Some(base);
        self
    }

    /// Add an implemented interface
    #[must_use]
    pub fn implements(self, interface: TypeRef) -> Self {
        self.universe.type_entry_mut(self.id).interfaces.push(interface);
        self
    }

    /// Add an instance constructor
    ///
    /// ## Arguments
    /// * 'configure' - Closure shaping the constructor via [`MethodBuilder`]
    #[must_use]
    pub fn ctor(self, configure: impl FnOnce(MethodBuilder) -> MethodBuilder) -> Self {
        let entry = configure(MethodBuilder::constructor()).into_entry();
        self.universe.type_entry_mut(self.id).ctors.push(entry);
        self
    }

    /// Add a method
    ///
    /// ## Arguments
    /// * 'name' - Method name
    /// * 'configure' - Closure shaping the method via [`MethodBuilder`]
    #[must_use]
    pub fn method(
        self,
        name: &str,
        configure: impl FnOnce(MethodBuilder) -> MethodBuilder,
    ) -> Self {
        let entry = configure(MethodBuilder::new(name)).into_entry();
        self.universe.type_entry_mut(self.id).methods.push(entry);
        self
    }

    /// Add a public instance field
    #[must_use]
    pub fn field(self, name: &str, ty: TypeRef) -> Self {
        self.push_field(name, FieldAccessFlags::PUBLIC.bits(), ty, None)
    }

    /// Add a public static field
    #[must_use]
    pub fn static_field(self, name: &str, ty: TypeRef) -> Self {
        let flags = FieldAccessFlags::PUBLIC.bits() | FieldModifiers::STATIC.bits();
        self.push_field(name, flags, ty, None)
    }

    /// Add a private instance field
    #[must_use]
    pub fn private_field(self, name: &str, ty: TypeRef) -> Self {
        self.push_field(name, FieldAccessFlags::PRIVATE.bits(), ty, None)
    }

    /// Add a literal field holding a compile-time constant
    ///
    /// The field type is the built type itself, matching how enum items are
    /// recorded.
    #[must_use]
    pub fn literal(self, name: &str, constant: Constant) -> Self {
        let flags = FieldAccessFlags::PUBLIC.bits()
            | FieldModifiers::STATIC.bits()
            | FieldModifiers::LITERAL.bits();
        let ty = TypeRef::named(self.id);
        self.push_field(name, flags, ty, Some(constant))
    }

    fn push_field(
        self,
        name: &str,
        flags: u32,
        ty: TypeRef,
        constant: Option<Constant>,
    ) -> Self {
        self.universe.type_entry_mut(self.id).fields.push(FieldEntry {
            name: name.to_string(),
            flags,
            ty,
            constant,
        });
        self
    }

    /// Add a property with public accessors
    ///
    /// ## Arguments
    /// * 'name' - Property name
    /// * 'ty' - Property type
    /// * 'configure' - Closure shaping the property via [`PropertyBuilder`]
    #[must_use]
    pub fn property(
        self,
        name: &str,
        ty: TypeRef,
        configure: impl FnOnce(PropertyBuilder) -> PropertyBuilder,
    ) -> Self {
        let entry = configure(PropertyBuilder::new(ty)).into_entry(name);
        self.universe.type_entry_mut(self.id).properties.push(entry);
        self
    }

    /// Add an event
    #[must_use]
    pub fn event(self, name: &str, handler: TypeRef) -> Self {
        self.universe.type_entry_mut(self.id).events.push(EventEntry {
            name: name.to_string(),
            handler,
        });
        self
    }

    /// Finish building, returning the identifier of the entry
    #[must_use]
    pub fn id(self) -> TypeId {
        self.id
    }
}

fn integral_id(system: &SystemTypes, code: TypeCode) -> Option<TypeId> {
    match code {
        TypeCode::Boolean => Some(system.boolean),
        TypeCode::Char => Some(system.char),
        TypeCode::SByte => Some(system.sbyte),
        TypeCode::Byte => Some(system.byte),
        TypeCode::Int16 => Some(system.int16),
        TypeCode::UInt16 => Some(system.uint16),
        TypeCode::Int32 => Some(system.int32),
        TypeCode::UInt32 => Some(system.uint32),
        TypeCode::Int64 => Some(system.int64),
        TypeCode::UInt64 => Some(system.uint64),
        _ => None,
    }
}

/// Provides a fluent API for shaping a method entry
pub struct MethodBuilder {
    name: String,
    flags: u32,
    is_generic: bool,
    return_type: Option<TypeRef>,
    params: Vec<ParamEntry>,
}

impl MethodBuilder {
    fn new(name: &str) -> Self {
        MethodBuilder {
            name: name.to_string(),
            flags: MethodAccessFlags::PUBLIC.bits() | MethodModifiers::HIDE_BY_SIG.bits(),
            is_generic: false,
            return_type: None,
            params: Vec::new(),
        }
    }

    fn constructor() -> Self {
        MethodBuilder {
            name: ".ctor".to_string(),
            flags: MethodAccessFlags::PUBLIC.bits()
                | MethodModifiers::HIDE_BY_SIG.bits()
                | MethodModifiers::SPECIAL_NAME.bits()
                | MethodModifiers::RTSPECIAL_NAME.bits(),
            is_generic: false,
            return_type: None,
            params: Vec::new(),
        }
    }

    /// Set the return type, `None` being the default void
    #[must_use]
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Add an input parameter
    #[must_use]
    pub fn param(mut self, name: &str, ty: TypeRef) -> Self {
        self.params.push(ParamEntry {
            name: name.to_string(),
            ty,
            is_out: false,
            has_default: false,
        });
        self
    }

    /// Add an output-only parameter, wrapping the type in a by-ref
    #[must_use]
    pub fn out_param(mut self, name: &str, ty: TypeRef) -> Self {
        self.params.push(ParamEntry {
            name: name.to_string(),
            ty: ty.by_ref(),
            is_out: true,
            has_default: false,
        });
        self
    }

    /// Add a by-ref parameter readable and writable by the callee
    #[must_use]
    pub fn ref_param(mut self, name: &str, ty: TypeRef) -> Self {
        self.params.push(ParamEntry {
            name: name.to_string(),
            ty: ty.by_ref(),
            is_out: false,
            has_default: false,
        });
        self
    }

    /// Add an input parameter carrying a default value
    #[must_use]
    pub fn optional_param(mut self, name: &str, ty: TypeRef) -> Self {
        self.params.push(ParamEntry {
            name: name.to_string(),
            ty,
            is_out: false,
            has_default: true,
        });
        self
    }

    /// Mark the method static
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.flags |= MethodModifiers::STATIC.bits();
        self
    }

    /// Mark the method virtual
    #[must_use]
    pub fn virtual_method(mut self) -> Self {
        self.flags |= MethodModifiers::VIRTUAL.bits();
        self
    }

    /// Mark the method abstract, implying virtual
    #[must_use]
    pub fn abstract_method(mut self) -> Self {
        self.flags |= MethodModifiers::VIRTUAL.bits() | MethodModifiers::ABSTRACT.bits();
        self
    }

    /// Mark the method final
    #[must_use]
    pub fn final_method(mut self) -> Self {
        self.flags |= MethodModifiers::FINAL.bits();
        self
    }

    /// Mark the method name as special
    #[must_use]
    pub fn special_name(mut self) -> Self {
        self.flags |= MethodModifiers::SPECIAL_NAME.bits();
        self
    }

    /// Mark the method as declaring its own generic parameters
    #[must_use]
    pub fn generic(mut self) -> Self {
        self.is_generic = true;
        self
    }

    /// Lower the access level to private
    #[must_use]
    pub fn private(self) -> Self {
        self.with_access(MethodAccessFlags::PRIVATE.bits())
    }

    /// Lower the access level to unit-internal
    #[must_use]
    pub fn internal(self) -> Self {
        self.with_access(MethodAccessFlags::ASSEM.bits())
    }

    /// Lower the access level to type-and-subtypes
    #[must_use]
    pub fn family(self) -> Self {
        self.with_access(MethodAccessFlags::FAMILY.bits())
    }

    /// Lower the access level to subtypes-or-unit
    #[must_use]
    pub fn fam_or_assem(self) -> Self {
        self.with_access(MethodAccessFlags::FAM_OR_ASSEM.bits())
    }

    /// Overwrite the raw access bits
    ///
    /// Unassigned mask values propagate into the entry unchanged, which is
    /// how access mapping failures are exercised.
    #[must_use]
    pub fn raw_access(self, mask: u32) -> Self {
        self.with_access(mask)
    }

    fn with_access(mut self, access: u32) -> Self {
        self.flags = (self.flags & !crate::metadata::METHOD_ACCESS_MASK)
            | (access & crate::metadata::METHOD_ACCESS_MASK);
        self
    }

    pub(crate) fn into_entry(self) -> MethodEntry {
        MethodEntry {
            name: self.name,
            flags: self.flags,
            is_generic: self.is_generic,
            return_type: self.return_type,
            params: self.params,
        }
    }
}

/// Provides a fluent API for shaping a property entry
///
/// Properties start readable and writable with public accessors.
pub struct PropertyBuilder {
    ty: TypeRef,
    readable: bool,
    writable: bool,
    is_static: bool,
}

impl PropertyBuilder {
    fn new(ty: TypeRef) -> Self {
        PropertyBuilder {
            ty,
            readable: true,
            writable: true,
            is_static: false,
        }
    }

    /// Drop the setter
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Drop the getter
    #[must_use]
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    /// Mark both accessors static
    #[must_use]
    pub fn static_property(mut self) -> Self {
        self.is_static = true;
        self
    }

    fn accessor_flags(&self) -> u32 {
        let mut flags = MethodAccessFlags::PUBLIC.bits()
            | MethodModifiers::HIDE_BY_SIG.bits()
            | MethodModifiers::SPECIAL_NAME.bits();
        if self.is_static {
            flags |= MethodModifiers::STATIC.bits();
        }
        flags
    }

    pub(crate) fn into_entry(self, name: &str) -> PropertyEntry {
        let flags = self.accessor_flags();
        let getter = self.readable.then(|| MethodEntry {
            name: format!("get_{name}"),
            flags,
            is_generic: false,
            return_type: Some(self.ty.clone()),
            params: Vec::new(),
        });
        let setter = self.writable.then(|| MethodEntry {
            name: format!("set_{name}"),
            flags,
            is_generic: false,
            return_type: None,
            params: vec![ParamEntry {
                name: "value".to_string(),
                ty: self.ty.clone(),
                is_out: false,
                has_default: false,
            }],
        });
        PropertyEntry {
            name: name.to_string(),
            ty: self.ty,
            getter,
            setter,
        }
    }
}
