//! Declarations and the arena graph that owns them.
//!
//! [`DeclGraph`] is the output of binding: a flat arena of [`Declaration`]
//! values plus a namespace tree and the array wrapper registry. Identifiers
//! are plain indices into the arena, so cross-references never chase pointers
//! and sharing a finished graph across threads needs no synchronization.

use crate::graph::{
    ArrayWrapper, MarshalKind, MarshalPlan, NamespaceId, NamespaceNode, PrimitiveKind, TypeDesc,
    Usage,
};
use crate::{Error, Result};
use std::fmt;

/// Identifier of a declaration within a [`DeclGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(u32);

impl DeclId {
    pub(crate) fn new(index: u32) -> Self {
        DeclId(index)
    }

    /// Position of the declaration in the graph arena
    #[must_use]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Access level of a member declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable from anywhere
    Public,
    /// Reachable within the unit
    Internal,
    /// Reachable from sub-types
    Protected,
    /// Reachable only from the declaring type
    Private,
}

/// Owner of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Owned by a namespace node
    Namespace(NamespaceId),
    /// Owned by a class declaration
    Class(DeclId),
    /// Not yet assigned, only valid mid-build
    Pending,
}

/// Structural kind of a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Reference type
    RefType,
    /// Value type
    ValueType,
    /// Interface
    Interface,
}

/// A base entry of a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseSpecifier {
    /// The base declaration
    pub decl: DeclId,
    /// True when the base is an interface
    pub is_interface: bool,
}

/// A class, value type or interface declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Structural kind
    pub kind: ClassKind,
    /// True when the type cannot be derived from
    pub is_final: bool,
    /// Base class first, implemented interfaces after, declared bases only
    pub bases: Vec<BaseSpecifier>,
    /// Member declarations in visit order
    pub members: Vec<DeclId>,
}

/// Numeric value of an enum item, kept in the signedness of the underlying
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumValue {
    /// Value of a signed underlying type
    Signed(i64),
    /// Value of an unsigned underlying type
    Unsigned(u64),
}

/// A single enum item.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumItem {
    /// Item name
    pub name: String,
    /// Item value
    pub value: EnumValue,
}

/// An enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    /// Underlying primitive kind of the items
    pub underlying: PrimitiveKind,
    /// Items in declaration order
    pub items: Vec<EnumItem>,
}

/// Kind of a method declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Instance constructor
    Constructor,
    /// Plain method
    Normal,
}

/// A parameter of a method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    /// Parameter name
    pub name: String,
    /// Data flow direction
    pub usage: Usage,
    /// Resolved parameter type
    pub ty: TypeDesc,
    /// True when the parameter carries a default value
    pub has_default: bool,
    /// True when the parameter is output-only
    pub is_out: bool,
    /// True when the parameter is passed by reference
    pub by_ref: bool,
    /// Marshaling plan, filled by resolution
    pub plan: Option<MarshalPlan>,
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// Constructor or plain method
    pub kind: MethodKind,
    /// Access level
    pub access: Access,
    /// True for static methods
    pub is_static: bool,
    /// True for virtual methods
    pub is_virtual: bool,
    /// True for methods without a body
    pub is_pure: bool,
    /// True for methods that cannot be overridden further
    pub is_final: bool,
    /// Parameters in declaration order
    pub params: Vec<ParamDecl>,
    /// Resolved return type
    pub return_type: TypeDesc,
    /// Identity key of the method within its declaring type
    pub signature: String,
    /// Marshaling plan for the return value, filled by resolution
    pub return_plan: Option<MarshalPlan>,
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Access level
    pub access: Access,
    /// True for static fields
    pub is_static: bool,
    /// Resolved field type
    pub ty: TypeDesc,
    /// Marshaling kind for load and store, filled by resolution
    pub plan: Option<MarshalKind>,
}

/// A property declaration with its accessors referenced by identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    /// Resolved property type
    pub ty: TypeDesc,
    /// Getter method declaration, when readable
    pub getter: Option<DeclId>,
    /// Setter method declaration, when writable
    pub setter: Option<DeclId>,
    /// Marshaling kind for the property value, filled by resolution
    pub plan: Option<MarshalKind>,
}

/// Kind-specific payload of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    /// Class, value type or interface
    Class(ClassDecl),
    /// Enum
    Enumeration(EnumDecl),
    /// Method or constructor
    Method(MethodDecl),
    /// Field
    Field(FieldDecl),
    /// Property
    Property(PropertyDecl),
}

/// A node in the declaration graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Sanitized name used by emitters
    pub display_name: String,
    /// Stable identity key, full names for types and signature keys for
    /// methods
    pub identity: String,
    /// False for shell declarations that exist only to be referenced
    pub is_generated: bool,
    /// True for declarations conjured by post passes rather than metadata
    pub synthesized: bool,
    /// True when the declaration is excluded from emission
    pub ignore: bool,
    /// Owning namespace or class
    pub owner: Owner,
    /// Kind-specific payload
    pub kind: DeclKind,
}

impl Declaration {
    /// True when emitters should produce output for this declaration.
    #[must_use]
    pub fn emittable(&self) -> bool {
        self.is_generated && !self.ignore
    }

    /// The class payload, when this is a class declaration.
    #[must_use]
    pub fn as_class(&self) -> Option<&ClassDecl> {
        match &self.kind {
            DeclKind::Class(class) => Some(class),
            _ => None,
        }
    }

    /// The enum payload, when this is an enum declaration.
    #[must_use]
    pub fn as_enumeration(&self) -> Option<&EnumDecl> {
        match &self.kind {
            DeclKind::Enumeration(decl) => Some(decl),
            _ => None,
        }
    }

    /// The method payload, when this is a method declaration.
    #[must_use]
    pub fn as_method(&self) -> Option<&MethodDecl> {
        match &self.kind {
            DeclKind::Method(method) => Some(method),
            _ => None,
        }
    }

    /// The field payload, when this is a field declaration.
    #[must_use]
    pub fn as_field(&self) -> Option<&FieldDecl> {
        match &self.kind {
            DeclKind::Field(field) => Some(field),
            _ => None,
        }
    }

    /// The property payload, when this is a property declaration.
    #[must_use]
    pub fn as_property(&self) -> Option<&PropertyDecl> {
        match &self.kind {
            DeclKind::Property(property) => Some(property),
            _ => None,
        }
    }

    pub(crate) fn as_class_mut(&mut self) -> Option<&mut ClassDecl> {
        match &mut self.kind {
            DeclKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub(crate) fn as_method_mut(&mut self) -> Option<&mut MethodDecl> {
        match &mut self.kind {
            DeclKind::Method(method) => Some(method),
            _ => None,
        }
    }
}

/// Arena of declarations plus the namespace tree and wrapper registry.
#[derive(Debug, Clone)]
pub struct DeclGraph {
    decls: Vec<Declaration>,
    namespaces: Vec<NamespaceNode>,
    root: NamespaceId,
    array_wrappers: Vec<ArrayWrapper>,
}

impl DeclGraph {
    pub(crate) fn new(root_name: &str) -> Self {
        DeclGraph {
            decls: Vec::new(),
            namespaces: vec![NamespaceNode {
                name: root_name.to_string(),
                parent: None,
                children: Vec::new(),
                decls: Vec::new(),
            }],
            root: NamespaceId::new(0),
            array_wrappers: Vec::new(),
        }
    }

    /// The root namespace, named after the translation unit.
    #[must_use]
    pub fn root(&self) -> NamespaceId {
        self.root
    }

    /// Borrow a declaration.
    ///
    /// # Panics
    /// Panics if 'id' does not belong to this graph.
    #[must_use]
    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    pub(crate) fn decl_mut(&mut self, id: DeclId) -> &mut Declaration {
        &mut self.decls[id.index()]
    }

    /// Borrow a namespace node.
    ///
    /// # Panics
    /// Panics if 'id' does not belong to this graph.
    #[must_use]
    pub fn namespace(&self, id: NamespaceId) -> &NamespaceNode {
        &self.namespaces[id.index()]
    }

    /// Number of declarations in the graph.
    #[must_use]
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// All declaration identifiers in creation order.
    pub fn decl_ids(&self) -> impl Iterator<Item = DeclId> {
        (0..self.decls.len() as u32).map(DeclId::new)
    }

    /// All namespace identifiers in creation order, root first.
    pub fn namespace_ids(&self) -> impl Iterator<Item = NamespaceId> {
        (0..self.namespaces.len() as u32).map(NamespaceId::new)
    }

    /// Registered array wrappers in first-use order.
    #[must_use]
    pub fn array_wrappers(&self) -> &[ArrayWrapper] {
        &self.array_wrappers
    }

    /// Dotted path of a namespace relative to the root, empty for the root
    /// itself.
    ///
    /// # Panics
    /// Panics if 'id' does not belong to this graph.
    #[must_use]
    pub fn namespace_path(&self, id: NamespaceId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.namespace(current);
            if node.parent.is_some() {
                segments.push(node.name.clone());
            }
            cursor = node.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    pub(crate) fn push_decl(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    pub(crate) fn create_namespace(&mut self, parent: NamespaceId, name: &str) -> NamespaceId {
        let id = NamespaceId::new(self.namespaces.len() as u32);
        self.namespaces.push(NamespaceNode {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            decls: Vec::new(),
        });
        self.namespaces[parent.index()].children.push(id);
        id
    }

    pub(crate) fn attach_to_namespace(&mut self, namespace: NamespaceId, decl: DeclId) {
        self.namespaces[namespace.index()].decls.push(decl);
        self.decls[decl.index()].owner = Owner::Namespace(namespace);
    }

    pub(crate) fn attach_to_class(&mut self, class: DeclId, member: DeclId) {
        if let Some(class_decl) = self.decls[class.index()].as_class_mut() {
            class_decl.members.push(member);
        }
        self.decls[member.index()].owner = Owner::Class(class);
    }

    pub(crate) fn set_owner(&mut self, decl: DeclId, owner: Owner) {
        self.decls[decl.index()].owner = owner;
    }

    pub(crate) fn register_array_wrapper(&mut self, wrapper: ArrayWrapper) {
        if !self.array_wrappers.iter().any(|w| w.name == wrapper.name) {
            self.array_wrappers.push(wrapper);
        }
    }

    /// Check that every declaration has an owner.
    ///
    /// # Errors
    /// Returns [`Error::MissingNamespace`] naming the first declaration still
    /// pending.
    pub(crate) fn verify_ownership(&self) -> Result<()> {
        for decl in &self.decls {
            if decl.owner == Owner::Pending {
                return Err(Error::MissingNamespace(decl.identity.clone()));
            }
        }
        Ok(())
    }
}
