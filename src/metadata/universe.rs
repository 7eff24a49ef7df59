//! The metadata universe: units, type entries and the seeded system surface.
//!
//! [`MetadataUniverse`] is an arena of [`TypeEntry`] values grouped into units.
//! Identifiers are plain indices, so lookups never chase pointers and the
//! whole model is trivially `Send + Sync`. A fresh universe arrives with the
//! system unit already seeded, giving every well-known runtime type a stable
//! [`TypeId`] reachable through [`SystemTypes`].
//!
//! # Examples
//!
//! ```rust
//! use cilbind::metadata::{MetadataUniverse, TypeKind, TypeCode};
//!
//! let mut universe = MetadataUniverse::new();
//! let unit = universe.add_unit("managed");
//! let id = universe
//!     .declare_type(unit, "Managed", "Widget", TypeKind::Class, TypeCode::Object)
//!     .unwrap();
//! assert_eq!(universe.full_name(id), "Managed.Widget");
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::metadata::{
    EventEntry, FieldEntry, GenericShape, MethodEntry, PropertyEntry, TypeCode, TypeKind, TypeRef,
    TypeSemantics, TypeVisibility,
};
use crate::{Error, Result};

/// Identifier of a type entry within a [`MetadataUniverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn new(index: u32) -> Self {
        TypeId(index)
    }

    /// Position of the entry in the universe arena
    #[must_use]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// Identifier of a unit within a [`MetadataUniverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(u32);

impl UnitId {
    pub(crate) fn new(index: u32) -> Self {
        UnitId(index)
    }

    /// Position of the unit in the universe
    #[must_use]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

/// A compilation unit, the distribution boundary types belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitEntry {
    /// Unit name, without any file extension
    pub name: String,
}

/// A type recorded in the universe.
///
/// Entries are plain data. Flag interpretation goes through [`TypeEntry::visibility`]
/// and [`TypeEntry::semantics`], and the owning [`MetadataUniverse`] computes
/// derived facts such as full names and export reachability.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEntry {
    /// Unit this type belongs to
    pub unit: UnitId,
    /// Dotted namespace, empty for the global namespace
    pub namespace: String,
    /// Simple type name, without namespace or declaring type
    pub name: String,
    /// Enclosing type for nested types
    pub declaring: Option<TypeId>,
    /// Primitive classification code
    pub type_code: TypeCode,
    /// Structural kind of the type
    pub kind: TypeKind,
    /// Raw type attribute word
    pub flags: u32,
    /// Generic shape of the type
    pub generic: GenericShape,
    /// Base type, absent for interfaces and the object root
    pub base: Option<TypeRef>,
    /// Implemented interfaces
    pub interfaces: Vec<TypeRef>,
    /// Underlying integral type for enums
    pub underlying: Option<TypeRef>,
    /// Instance constructors
    pub ctors: Vec<MethodEntry>,
    /// Plain methods, accessors included
    pub methods: Vec<MethodEntry>,
    /// Fields
    pub fields: Vec<FieldEntry>,
    /// Properties with their accessors attached
    pub properties: Vec<PropertyEntry>,
    /// Events
    pub events: Vec<EventEntry>,
}

impl TypeEntry {
    /// Visibility extracted from the attribute word
    #[must_use]
    pub fn visibility(&self) -> TypeVisibility {
        TypeVisibility::from_type_flags(self.flags)
    }

    /// Semantic flags extracted from the attribute word
    #[must_use]
    pub fn semantics(&self) -> TypeSemantics {
        TypeSemantics::from_type_flags(self.flags)
    }
}

/// Stable identifiers of the seeded system types.
///
/// Every universe starts with these entries in its system unit, so builders
/// and tests can reference runtime types without declaring them first.
#[derive(Debug, Clone, Copy)]
pub struct SystemTypes {
    /// `System.Object`
    pub object: TypeId,
    /// `System.ValueType`, base of all value types
    pub value_type: TypeId,
    /// `System.Enum`, base of all enum types
    pub enum_root: TypeId,
    /// `System.Void`
    pub void: TypeId,
    /// `System.Boolean`
    pub boolean: TypeId,
    /// `System.Char`
    pub char: TypeId,
    /// `System.SByte`
    pub sbyte: TypeId,
    /// `System.Byte`
    pub byte: TypeId,
    /// `System.Int16`
    pub int16: TypeId,
    /// `System.UInt16`
    pub uint16: TypeId,
    /// `System.Int32`
    pub int32: TypeId,
    /// `System.UInt32`
    pub uint32: TypeId,
    /// `System.Int64`
    pub int64: TypeId,
    /// `System.UInt64`
    pub uint64: TypeId,
    /// `System.Single`
    pub single: TypeId,
    /// `System.Double`
    pub double: TypeId,
    /// `System.Decimal`
    pub decimal: TypeId,
    /// `System.DateTime`
    pub datetime: TypeId,
    /// `System.DBNull`
    pub dbnull: TypeId,
    /// `System.String`
    pub string: TypeId,
    /// `System.IntPtr`
    pub intptr: TypeId,
    /// `System.UIntPtr`
    pub uintptr: TypeId,
}

/// Arena of units and type entries forming the input model.
#[derive(Debug)]
pub struct MetadataUniverse {
    units: Vec<UnitEntry>,
    types: Vec<TypeEntry>,
    lookup: HashMap<(UnitId, String), TypeId>,
    system: SystemTypes,
}

impl MetadataUniverse {
    /// Create a universe with the system unit seeded.
    #[must_use]
    pub fn new() -> Self {
        let mut universe = MetadataUniverse {
            units: vec![UnitEntry {
                name: "mscorlib".to_string(),
            }],
            types: Vec::new(),
            lookup: HashMap::new(),
            system: SystemTypes {
                object: TypeId(0),
                value_type: TypeId(0),
                enum_root: TypeId(0),
                void: TypeId(0),
                boolean: TypeId(0),
                char: TypeId(0),
                sbyte: TypeId(0),
                byte: TypeId(0),
                int16: TypeId(0),
                uint16: TypeId(0),
                int32: TypeId(0),
                uint32: TypeId(0),
                int64: TypeId(0),
                uint64: TypeId(0),
                single: TypeId(0),
                double: TypeId(0),
                decimal: TypeId(0),
                datetime: TypeId(0),
                dbnull: TypeId(0),
                string: TypeId(0),
                intptr: TypeId(0),
                uintptr: TypeId(0),
            },
        };
        universe.seed_system();
        universe
    }

    fn seed_system(&mut self) {
        let unit = UnitId(0);

        let object = self.push_seed(unit, "Object", TypeKind::Class, TypeCode::Object, None);
        let value_type = self.push_seed(
            unit,
            "ValueType",
            TypeKind::Class,
            TypeCode::Object,
            Some(object),
        );
        let enum_root = self.push_seed(
            unit,
            "Enum",
            TypeKind::Class,
            TypeCode::Object,
            Some(value_type),
        );

        let value = |universe: &mut Self, name: &str, code: TypeCode| {
            universe.push_seed(unit, name, TypeKind::ValueType, code, Some(value_type))
        };

        self.system = SystemTypes {
            object,
            value_type,
            enum_root,
            void: value(self, "Void", TypeCode::Object),
            boolean: value(self, "Boolean", TypeCode::Boolean),
            char: value(self, "Char", TypeCode::Char),
            sbyte: value(self, "SByte", TypeCode::SByte),
            byte: value(self, "Byte", TypeCode::Byte),
            int16: value(self, "Int16", TypeCode::Int16),
            uint16: value(self, "UInt16", TypeCode::UInt16),
            int32: value(self, "Int32", TypeCode::Int32),
            uint32: value(self, "UInt32", TypeCode::UInt32),
            int64: value(self, "Int64", TypeCode::Int64),
            uint64: value(self, "UInt64", TypeCode::UInt64),
            single: value(self, "Single", TypeCode::Single),
            double: value(self, "Double", TypeCode::Double),
            decimal: value(self, "Decimal", TypeCode::Decimal),
            datetime: value(self, "DateTime", TypeCode::DateTime),
            dbnull: self.push_seed(
                unit,
                "DBNull",
                TypeKind::Class,
                TypeCode::DBNull,
                Some(object),
            ),
            string: self.push_seed(
                unit,
                "String",
                TypeKind::Class,
                TypeCode::String,
                Some(object),
            ),
            intptr: value(self, "IntPtr", TypeCode::Object),
            uintptr: value(self, "UIntPtr", TypeCode::Object),
        };
    }

    fn push_seed(
        &mut self,
        unit: UnitId,
        name: &str,
        kind: TypeKind,
        type_code: TypeCode,
        base: Option<TypeId>,
    ) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeEntry {
            unit,
            namespace: "System".to_string(),
            name: name.to_string(),
            declaring: None,
            type_code,
            kind,
            flags: TypeVisibility::PUBLIC.bits(),
            generic: GenericShape::None,
            base: base.map(TypeRef::named),
            interfaces: Vec::new(),
            underlying: None,
            ctors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
        });
        self.lookup.insert((unit, format!("System.{name}")), id);
        id
    }

    /// The unit holding the seeded system types.
    #[must_use]
    pub fn system_unit(&self) -> UnitId {
        UnitId(0)
    }

    /// Identifiers of the seeded system types.
    #[must_use]
    pub fn system(&self) -> &SystemTypes {
        &self.system
    }

    /// Register a new unit.
    pub fn add_unit(&mut self, name: &str) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        self.units.push(UnitEntry {
            name: name.to_string(),
        });
        id
    }

    /// Name of a unit.
    ///
    /// # Panics
    /// Panics if 'unit' does not belong to this universe.
    #[must_use]
    pub fn unit_name(&self, unit: UnitId) -> &str {
        &self.units[unit.index()].name
    }

    /// Declare a top-level type in a unit.
    ///
    /// The entry starts without attributes or members. Callers normally go
    /// through [`crate::metadata::TypeEntryBuilder`] instead of filling the
    /// entry by hand.
    ///
    /// ## Arguments
    /// * 'unit' - The unit the type belongs to
    /// * 'namespace' - Dotted namespace, empty for the global namespace
    /// * 'name' - Simple type name
    /// * 'kind' - Structural kind of the type
    /// * 'type_code' - Primitive classification code
    ///
    /// # Errors
    /// Returns [`Error::DuplicateType`] if the unit already declares a type
    /// with the same full name.
    pub fn declare_type(
        &mut self,
        unit: UnitId,
        namespace: &str,
        name: &str,
        kind: TypeKind,
        type_code: TypeCode,
    ) -> Result<TypeId> {
        let full = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{namespace}.{name}")
        };
        if self.lookup.contains_key(&(unit, full.clone())) {
            return Err(Error::DuplicateType(full));
        }

        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeEntry {
            unit,
            namespace: namespace.to_string(),
            name: name.to_string(),
            declaring: None,
            type_code,
            kind,
            flags: 0,
            generic: GenericShape::None,
            base: None,
            interfaces: Vec::new(),
            underlying: None,
            ctors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
        });
        self.lookup.insert((unit, full), id);
        Ok(id)
    }

    /// Declare a type nested inside another.
    ///
    /// The nested entry inherits the unit and namespace of its declaring type
    /// and contributes to full names with a `+` separator.
    ///
    /// # Errors
    /// Returns [`Error::TypeNotFound`] if 'declaring' is unknown, or
    /// [`Error::DuplicateType`] if the nested name collides.
    pub fn declare_nested(
        &mut self,
        declaring: TypeId,
        name: &str,
        kind: TypeKind,
        type_code: TypeCode,
    ) -> Result<TypeId> {
        let (unit, namespace) = {
            let outer = self.get(declaring).ok_or(Error::TypeNotFound(declaring))?;
            (outer.unit, outer.namespace.clone())
        };
        let full = format!("{}+{}", self.full_name(declaring), name);
        if self.lookup.contains_key(&(unit, full.clone())) {
            return Err(Error::DuplicateType(full));
        }

        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeEntry {
            unit,
            namespace,
            name: name.to_string(),
            declaring: Some(declaring),
            type_code,
            kind,
            flags: 0,
            generic: GenericShape::None,
            base: None,
            interfaces: Vec::new(),
            underlying: None,
            ctors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
        });
        self.lookup.insert((unit, full), id);
        Ok(id)
    }

    /// Look up an entry, returning `None` for identifiers this universe never
    /// produced.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&TypeEntry> {
        self.types.get(id.index())
    }

    /// Borrow an entry.
    ///
    /// # Panics
    /// Panics if 'id' does not belong to this universe.
    #[must_use]
    pub fn type_entry(&self, id: TypeId) -> &TypeEntry {
        &self.types[id.index()]
    }

    pub(crate) fn type_entry_mut(&mut self, id: TypeId) -> &mut TypeEntry {
        &mut self.types[id.index()]
    }

    /// Resolve a full name within a unit.
    #[must_use]
    pub fn lookup(&self, unit: UnitId, full_name: &str) -> Option<TypeId> {
        self.lookup.get(&(unit, full_name.to_string())).copied()
    }

    /// Number of type entries, seeded system types included.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Full name of a type, namespace-prefixed, with `+` separating nesting
    /// levels.
    ///
    /// # Panics
    /// Panics if 'id' does not belong to this universe.
    #[must_use]
    pub fn full_name(&self, id: TypeId) -> String {
        let entry = self.type_entry(id);
        match entry.declaring {
            Some(outer) => format!("{}+{}", self.full_name(outer), entry.name),
            None => {
                if entry.namespace.is_empty() {
                    entry.name.clone()
                } else {
                    format!("{}.{}", entry.namespace, entry.name)
                }
            }
        }
    }

    /// True when the type sits on the exported surface of its unit.
    ///
    /// Top-level types must be public, nested types must be nested-public
    /// with every enclosing type exported as well.
    ///
    /// # Panics
    /// Panics if 'id' does not belong to this universe.
    #[must_use]
    pub fn is_exported(&self, id: TypeId) -> bool {
        let entry = self.type_entry(id);
        match entry.declaring {
            Some(outer) => {
                entry.visibility() == TypeVisibility::NESTED_PUBLIC && self.is_exported(outer)
            }
            None => entry.visibility() == TypeVisibility::PUBLIC,
        }
    }

    /// Exported types of a unit, in declaration order.
    #[must_use]
    pub fn exported_types(&self, unit: UnitId) -> Vec<TypeId> {
        (0..self.types.len())
            .map(|index| TypeId(index as u32))
            .filter(|id| self.type_entry(*id).unit == unit && self.is_exported(*id))
            .collect()
    }
}

impl Default for MetadataUniverse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_surface_seeded() {
        let universe = MetadataUniverse::new();
        let sys = *universe.system();
        assert_eq!(universe.full_name(sys.int32), "System.Int32");
        assert_eq!(universe.type_entry(sys.int32).type_code, TypeCode::Int32);
        assert_eq!(universe.type_entry(sys.string).kind, TypeKind::Class);
        assert_eq!(universe.type_entry(sys.void).kind, TypeKind::ValueType);
        assert_eq!(
            universe.lookup(universe.system_unit(), "System.Decimal"),
            Some(sys.decimal)
        );
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        universe
            .declare_type(unit, "Ns", "Widget", TypeKind::Class, TypeCode::Object)
            .unwrap();
        let result = universe.declare_type(unit, "Ns", "Widget", TypeKind::Class, TypeCode::Object);
        assert!(matches!(result, Err(Error::DuplicateType(_))));
    }

    #[test]
    fn test_nested_full_name() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        let outer = universe
            .declare_type(unit, "Ns", "Outer", TypeKind::Class, TypeCode::Object)
            .unwrap();
        let inner = universe
            .declare_nested(outer, "Inner", TypeKind::Class, TypeCode::Object)
            .unwrap();
        assert_eq!(universe.full_name(inner), "Ns.Outer+Inner");
        assert_eq!(universe.type_entry(inner).namespace, "Ns");
    }

    #[test]
    fn test_export_requires_public_chain() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        let outer = universe
            .declare_type(unit, "", "Outer", TypeKind::Class, TypeCode::Object)
            .unwrap();
        universe.type_entry_mut(outer).flags = TypeVisibility::PUBLIC.bits();
        let inner = universe
            .declare_nested(outer, "Inner", TypeKind::Class, TypeCode::Object)
            .unwrap();
        universe.type_entry_mut(inner).flags = TypeVisibility::NESTED_PUBLIC.bits();
        let hidden = universe
            .declare_nested(outer, "Hidden", TypeKind::Class, TypeCode::Object)
            .unwrap();
        universe.type_entry_mut(hidden).flags = TypeVisibility::NESTED_PRIVATE.bits();

        assert_eq!(universe.exported_types(unit), vec![outer, inner]);

        universe.type_entry_mut(outer).flags = TypeVisibility::NOT_PUBLIC.bits();
        assert!(universe.exported_types(unit).is_empty());
    }
}
