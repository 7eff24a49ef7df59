//! Declaration graph construction from loaded metadata.
//!
//! [`Builder`] walks every exported type of one unit and lowers it into the
//! language-neutral declaration graph, applying the member selection policy,
//! duplicate renaming, and the marshaling pass along the way. The entry
//! points are [`bind`] for the common case and [`Builder`] when options
//! need to be adjusted first.

use std::collections::HashMap;

use crate::{
    binder::{
        access::{access_from_field_flags, access_from_method_flags},
        naming::sanitize,
        signature::{member_key, method_signature},
        typemap::{blocking_description, unrepresentable},
        BindOptions, Diagnostic, DiagnosticCode,
    },
    graph::{
        resolve_marshaling, Access, BaseSpecifier, ClassDecl, ClassKind, DeclGraph, DeclId,
        DeclKind, Declaration, EnumDecl, EnumItem, EnumValue, FieldDecl, MethodDecl, MethodKind,
        NamespaceId, Owner, ParamDecl, PrimitiveKind, PropertyDecl, TypeDesc, Usage,
    },
    metadata::{
        FieldEntry, GenericShape, MetadataUniverse, MethodEntry, PropertyEntry, TypeId, TypeKind,
        TypeRef, TypeSemantics, UnitId,
    },
    Result,
};

/// Result of a bind run.
///
/// Couples the finished [`DeclGraph`] with the warnings collected while
/// building it. The graph is complete even when diagnostics are present;
/// skipped members remain in the graph with their ignore mark set.
#[derive(Debug)]
pub struct BindOutput {
    /// The finished declaration graph.
    pub graph: DeclGraph,
    /// Warnings emitted during construction, in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Binds one unit of 'universe' into a declaration graph with default options.
///
/// Convenience wrapper around [`Builder`] for the common case.
///
/// ## Arguments
/// * 'universe' - The metadata universe holding the unit
/// * 'unit' - The unit whose exported types are bound
///
/// # Errors
/// Returns an error for malformed metadata, such as an access mask outside
/// the fixed table or a dangling type reference.
///
/// # Examples
///
/// ```rust
/// use cilbind::binder::bind;
/// use cilbind::metadata::MetadataUniverse;
///
/// let universe = MetadataUniverse::new();
/// let output = bind(&universe, universe.system_unit())?;
/// assert!(output.graph.decl_count() > 0);
/// # Ok::<(), cilbind::Error>(())
/// ```
pub fn bind(universe: &MetadataUniverse, unit: UnitId) -> Result<BindOutput> {
    Builder::new(universe, unit).build()
}

/// Builds a declaration graph from the exported types of a single unit.
///
/// The builder owns the graph while it is under construction and consumes
/// itself on [`build`](Builder::build). Types are declared on demand, so a
/// type referenced from a signature before its own turn in the export order
/// is still declared exactly once.
///
/// # Examples
///
/// ```rust
/// use cilbind::binder::{BindOptions, Builder};
/// use cilbind::metadata::MetadataUniverse;
///
/// let universe = MetadataUniverse::new();
/// let output = Builder::new(&universe, universe.system_unit())
///     .options(BindOptions::new().with_library_name("managed"))
///     .build()?;
/// assert_eq!(output.graph.namespace(output.graph.root()).name, "managed");
/// # Ok::<(), cilbind::Error>(())
/// ```
pub struct Builder<'a> {
    pub(crate) universe: &'a MetadataUniverse,
    pub(crate) unit: UnitId,
    pub(crate) options: BindOptions,
    pub(crate) graph: DeclGraph,
    pub(crate) decl_cache: HashMap<String, DeclId>,
    pub(crate) ns_cache: HashMap<String, NamespaceId>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'a> Builder<'a> {
    /// Creates a builder for 'unit' with default options.
    ///
    /// ## Arguments
    /// * 'universe' - The metadata universe holding the unit
    /// * 'unit' - The unit whose exported types are bound
    pub fn new(universe: &'a MetadataUniverse, unit: UnitId) -> Self {
        Builder {
            universe,
            unit,
            options: BindOptions::default(),
            graph: DeclGraph::new(""),
            decl_cache: HashMap::new(),
            ns_cache: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Replaces the bind options.
    #[must_use]
    pub fn options(mut self, options: BindOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the bind and returns the finished graph with its diagnostics.
    ///
    /// # Errors
    /// Returns an error for malformed metadata, such as an access mask
    /// outside the fixed table, a dangling type reference, or a declaration
    /// left without an owner after construction.
    pub fn build(mut self) -> Result<BindOutput> {
        let root_name = match &self.options.library_name {
            Some(name) => name.clone(),
            None => self.universe.unit_name(self.unit).to_string(),
        };
        self.graph = DeclGraph::new(&root_name);
        for id in self.universe.exported_types(self.unit) {
            self.declare_type(id)?;
        }
        self.synthesize_interface_accessors();
        self.rename_duplicates();
        self.graph.verify_ownership()?;
        resolve_marshaling(&mut self.graph);
        Ok(BindOutput {
            graph: self.graph,
            diagnostics: self.diagnostics,
        })
    }

    /// Declares 'id' in the graph, returning the cached declaration when the
    /// type has already been seen. Closed generic instances collapse onto
    /// their definition.
    pub(crate) fn declare_type(&mut self, id: TypeId) -> Result<DeclId> {
        let universe = self.universe;
        if let GenericShape::Instance {
            definition,
            open: false,
        } = universe.type_entry(id).generic
        {
            return self.declare_type(definition);
        }
        let identity = universe.full_name(id);
        if let Some(&decl_id) = self.decl_cache.get(&identity) {
            return Ok(decl_id);
        }
        match universe.type_entry(id).kind {
            TypeKind::Enum => self.declare_enum(id, identity),
            _ => self.declare_class(id, identity),
        }
    }

    fn declare_enum(&mut self, id: TypeId, identity: String) -> Result<DeclId> {
        let universe = self.universe;
        let entry = universe.type_entry(id);
        let underlying =
            PrimitiveKind::from_type_code(entry.type_code).unwrap_or(PrimitiveKind::I4);
        let mut items = Vec::new();
        for field in &entry.fields {
            if !field.is_literal() {
                continue;
            }
            let Some(constant) = &field.constant else {
                continue;
            };
            let value = if underlying.is_signed() {
                constant.as_i64().map(EnumValue::Signed)
            } else {
                constant.as_u64().map(EnumValue::Unsigned)
            };
            let Some(value) = value else { continue };
            items.push(EnumItem {
                name: sanitize(&field.name),
                value,
            });
        }
        let decl_id = self.graph.push_decl(Declaration {
            display_name: sanitize(&entry.name),
            identity: identity.clone(),
            is_generated: true,
            synthesized: false,
            ignore: false,
            owner: Owner::Pending,
            kind: DeclKind::Enumeration(EnumDecl { underlying, items }),
        });
        self.decl_cache.insert(identity, decl_id);
        self.attach_to_home_namespace(id, decl_id);
        Ok(decl_id)
    }

    fn declare_class(&mut self, id: TypeId, identity: String) -> Result<DeclId> {
        let universe = self.universe;
        let entry = universe.type_entry(id);
        let kind = match entry.kind {
            TypeKind::Interface => ClassKind::Interface,
            TypeKind::ValueType => ClassKind::ValueType,
            TypeKind::Class | TypeKind::Enum => ClassKind::RefType,
        };
        let exported = entry.unit == self.unit && universe.is_exported(id);
        let decl_id = self.graph.push_decl(Declaration {
            display_name: sanitize(&entry.name),
            identity: identity.clone(),
            is_generated: exported,
            synthesized: false,
            ignore: false,
            owner: Owner::Pending,
            kind: DeclKind::Class(ClassDecl {
                kind,
                is_final: entry.semantics().contains(TypeSemantics::SEALED),
                bases: Vec::new(),
                members: Vec::new(),
            }),
        });
        // Cache before descending so self-referential members terminate.
        self.decl_cache.insert(identity, decl_id);
        self.attach_to_home_namespace(id, decl_id);
        if !exported {
            return Ok(decl_id);
        }
        self.attach_bases(id, decl_id)?;
        self.declare_members(id, decl_id)?;
        Ok(decl_id)
    }

    fn effective_declared_id(&self, id: TypeId) -> TypeId {
        match self.universe.type_entry(id).generic {
            GenericShape::Instance {
                definition,
                open: false,
            } => self.effective_declared_id(definition),
            _ => id,
        }
    }

    fn attach_bases(&mut self, id: TypeId, class_id: DeclId) -> Result<()> {
        let universe = self.universe;
        let entry = universe.type_entry(id);
        let sys = universe.system();
        let mut bases = Vec::new();
        if let Some(base_id) = entry.base.as_ref().and_then(TypeRef::named_id) {
            let base_id = self.effective_declared_id(base_id);
            let is_root =
                base_id == sys.object || base_id == sys.value_type || base_id == sys.enum_root;
            if !is_root && self.base_is_declarable(base_id) {
                bases.push(BaseSpecifier {
                    decl: self.declare_type(base_id)?,
                    is_interface: false,
                });
            }
        }
        for interface in &entry.interfaces {
            let Some(iface_id) = interface.named_id() else {
                continue;
            };
            let iface_id = self.effective_declared_id(iface_id);
            if self.base_is_declarable(iface_id) {
                bases.push(BaseSpecifier {
                    decl: self.declare_type(iface_id)?,
                    is_interface: true,
                });
            }
        }
        if let Some(class) = self.graph.decl_mut(class_id).as_class_mut() {
            class.bases = bases;
        }
        Ok(())
    }

    fn base_is_declarable(&self, id: TypeId) -> bool {
        let entry = self.universe.type_entry(id);
        if entry.unit != self.unit {
            return false;
        }
        !matches!(
            entry.generic,
            GenericShape::Parameter | GenericShape::Instance { open: true, .. }
        )
    }

    fn declare_members(&mut self, id: TypeId, class_id: DeclId) -> Result<()> {
        let universe = self.universe;
        let entry = universe.type_entry(id);
        for ctor in &entry.ctors {
            if !ctor.is_public() || ctor.is_static() {
                continue;
            }
            self.declare_ctor(id, class_id, ctor)?;
        }
        for method in &entry.methods {
            if method.is_generic || method.is_special_name() {
                continue;
            }
            let promoted = method.is_virtual() && method.is_final();
            if !method.is_public() && !promoted {
                continue;
            }
            if is_root_object_member(universe, method) {
                continue;
            }
            self.declare_method(id, class_id, method)?;
        }
        for field in &entry.fields {
            if !field.is_public() || field.is_literal() {
                continue;
            }
            self.declare_field(id, class_id, field)?;
        }
        for property in &entry.properties {
            self.declare_property(id, class_id, property)?;
        }
        Ok(())
    }

    fn declare_ctor(&mut self, id: TypeId, class_id: DeclId, entry: &MethodEntry) -> Result<()> {
        let resolved = self.resolve_method(id, entry, MethodKind::Constructor)?;
        for (param, ty) in &resolved.blocked_params {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticCode::SkippedConstructor,
                format!(
                    "Skipping constructor '{}' because of parameter '{param}' of type '{ty}'",
                    resolved.identity
                ),
            ));
        }
        let decl_id = self.graph.push_decl(Declaration {
            display_name: "new".to_string(),
            identity: resolved.identity,
            is_generated: true,
            synthesized: false,
            ignore: resolved.ignore,
            owner: Owner::Pending,
            kind: DeclKind::Method(resolved.decl),
        });
        self.graph.attach_to_class(class_id, decl_id);
        Ok(())
    }

    fn declare_method(&mut self, id: TypeId, class_id: DeclId, entry: &MethodEntry) -> Result<()> {
        let mut resolved = self.resolve_method(id, entry, MethodKind::Normal)?;
        if let Some(ty) = &resolved.blocked_return {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticCode::SkippedMethodReturn,
                format!(
                    "Skipping method '{}' because of return type '{ty}'",
                    resolved.identity
                ),
            ));
        }
        for (param, ty) in &resolved.blocked_params {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticCode::SkippedMethodParameter,
                format!(
                    "Skipping method '{}' because of parameter '{param}' of type '{ty}'",
                    resolved.identity
                ),
            ));
        }
        let display_name = match promoted_simple_name(self.universe, id, entry) {
            Some(simple) => {
                resolved.decl.access = Access::Public;
                sanitize(simple)
            }
            None => sanitize(&entry.name),
        };
        let decl_id = self.graph.push_decl(Declaration {
            display_name,
            identity: resolved.identity,
            is_generated: true,
            synthesized: false,
            ignore: resolved.ignore,
            owner: Owner::Pending,
            kind: DeclKind::Method(resolved.decl),
        });
        self.graph.attach_to_class(class_id, decl_id);
        Ok(())
    }

    fn resolve_method(
        &mut self,
        declaring: TypeId,
        entry: &MethodEntry,
        kind: MethodKind,
    ) -> Result<ResolvedMethod> {
        let universe = self.universe;
        let identity = method_signature(universe, declaring, &entry.name, &entry.params);
        let access = access_from_method_flags(entry.flags)?;
        let return_type = match &entry.return_type {
            Some(ty) => self.resolve_type(ty)?,
            None => TypeDesc::Primitive(PrimitiveKind::Void),
        };
        let blocked_return = if unrepresentable(&return_type) {
            Some(blocking_description(&return_type))
        } else {
            None
        };
        let mut blocked_params = Vec::new();
        let mut params = Vec::with_capacity(entry.params.len());
        for param in &entry.params {
            let desc = self.resolve_type(&param.ty)?;
            if unrepresentable(&desc) {
                blocked_params.push((param.name.clone(), blocking_description(&desc)));
            }
            let by_ref = param.ty.is_by_ref();
            let usage = if param.is_out {
                Usage::Out
            } else if by_ref {
                Usage::InOut
            } else {
                Usage::In
            };
            params.push(ParamDecl {
                name: param.name.clone(),
                usage,
                ty: desc,
                has_default: param.has_default,
                is_out: param.is_out,
                by_ref,
                plan: None,
            });
        }
        let ignore = blocked_return.is_some() || !blocked_params.is_empty();
        Ok(ResolvedMethod {
            identity: identity.clone(),
            ignore,
            blocked_return,
            blocked_params,
            decl: MethodDecl {
                kind,
                access,
                is_static: entry.is_static(),
                is_virtual: entry.is_virtual(),
                is_pure: entry.is_abstract(),
                is_final: entry.is_final(),
                params,
                return_type,
                signature: identity,
                return_plan: None,
            },
        })
    }

    fn declare_field(&mut self, id: TypeId, class_id: DeclId, field: &FieldEntry) -> Result<()> {
        let universe = self.universe;
        let identity = format!("{}:{}", universe.full_name(id), field.name);
        let access = access_from_field_flags(field.flags)?;
        let ty = self.resolve_type(&field.ty)?;
        let ignore = unrepresentable(&ty);
        if ignore {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticCode::SkippedField,
                format!(
                    "Skipping field '{identity}' because of type '{}'",
                    blocking_description(&ty)
                ),
            ));
        }
        let decl_id = self.graph.push_decl(Declaration {
            display_name: sanitize(&field.name),
            identity,
            is_generated: true,
            synthesized: false,
            ignore,
            owner: Owner::Pending,
            kind: DeclKind::Field(FieldDecl {
                access,
                is_static: field.is_static(),
                ty,
                plan: None,
            }),
        });
        self.graph.attach_to_class(class_id, decl_id);
        Ok(())
    }

    fn declare_property(
        &mut self,
        id: TypeId,
        class_id: DeclId,
        property: &PropertyEntry,
    ) -> Result<()> {
        let universe = self.universe;
        let getter = property.getter.as_ref().filter(|method| method.is_public());
        let setter = property.setter.as_ref().filter(|method| method.is_public());
        if getter.is_none() && setter.is_none() {
            return Ok(());
        }
        let identity = format!("{}:{}", universe.full_name(id), property.name);
        let ty = self.resolve_type(&property.ty)?;
        let ignore = unrepresentable(&ty);
        if ignore {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticCode::SkippedProperty,
                format!(
                    "Skipping property '{identity}' because of type '{}'",
                    blocking_description(&ty)
                ),
            ));
        }
        let getter_id = match getter {
            Some(entry) => Some(self.declare_accessor(id, class_id, entry, ignore)?),
            None => None,
        };
        let setter_id = match setter {
            Some(entry) => Some(self.declare_accessor(id, class_id, entry, ignore)?),
            None => None,
        };
        let decl_id = self.graph.push_decl(Declaration {
            display_name: sanitize(&property.name),
            identity,
            is_generated: true,
            synthesized: false,
            ignore,
            owner: Owner::Pending,
            kind: DeclKind::Property(PropertyDecl {
                ty,
                getter: getter_id,
                setter: setter_id,
                plan: None,
            }),
        });
        self.graph.attach_to_class(class_id, decl_id);
        Ok(())
    }

    /// Property accessors hang off their property rather than the member
    /// list, so ownership is recorded directly.
    fn declare_accessor(
        &mut self,
        id: TypeId,
        class_id: DeclId,
        entry: &MethodEntry,
        forced_ignore: bool,
    ) -> Result<DeclId> {
        let resolved = self.resolve_method(id, entry, MethodKind::Normal)?;
        let decl_id = self.graph.push_decl(Declaration {
            display_name: sanitize(&entry.name),
            identity: resolved.identity,
            is_generated: true,
            synthesized: false,
            ignore: forced_ignore || resolved.ignore,
            owner: Owner::Pending,
            kind: DeclKind::Method(resolved.decl),
        });
        self.graph.set_owner(decl_id, Owner::Class(class_id));
        Ok(decl_id)
    }

    fn attach_to_home_namespace(&mut self, id: TypeId, decl_id: DeclId) {
        let namespace = self.universe.type_entry(id).namespace.clone();
        let ns_id = self.find_or_create_namespace(&namespace);
        self.graph.attach_to_namespace(ns_id, decl_id);
    }

    fn find_or_create_namespace(&mut self, dotted: &str) -> NamespaceId {
        if dotted.is_empty() {
            return self.graph.root();
        }
        if let Some(&ns_id) = self.ns_cache.get(dotted) {
            return ns_id;
        }
        let mut current = self.graph.root();
        let mut path = String::new();
        for segment in dotted.split('.') {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(segment);
            current = match self.ns_cache.get(&path) {
                Some(&ns_id) => ns_id,
                None => {
                    let ns_id = self.graph.create_namespace(current, segment);
                    self.ns_cache.insert(path.clone(), ns_id);
                    ns_id
                }
            };
        }
        current
    }

    /// Gives every generated interface a synthesized accessor returning the
    /// implementing object, so callers can recover the concrete instance
    /// behind an interface reference.
    fn synthesize_interface_accessors(&mut self) {
        let interfaces: Vec<DeclId> = self
            .graph
            .decl_ids()
            .filter(|&decl_id| {
                let decl = self.graph.decl(decl_id);
                decl.emittable()
                    && decl
                        .as_class()
                        .is_some_and(|class| class.kind == ClassKind::Interface)
            })
            .collect();
        for class_id in interfaces {
            let identity = format!("{}:get_object()", self.graph.decl(class_id).identity);
            let accessor = self.graph.push_decl(Declaration {
                display_name: "get_object".to_string(),
                identity: identity.clone(),
                is_generated: true,
                synthesized: true,
                ignore: false,
                owner: Owner::Pending,
                kind: DeclKind::Method(MethodDecl {
                    kind: MethodKind::Normal,
                    access: Access::Public,
                    is_static: false,
                    is_virtual: false,
                    is_pure: true,
                    is_final: false,
                    params: Vec::new(),
                    return_type: TypeDesc::Tag(class_id),
                    signature: identity,
                    return_plan: None,
                }),
            });
            self.graph.attach_to_class(class_id, accessor);
        }
    }

    /// Appends a numeric suffix to later declarations that share a display
    /// name with an earlier one in the same scope. Scopes are namespaces for
    /// types and classes for members, with property accessors counted in
    /// their property's scope.
    fn rename_duplicates(&mut self) {
        let namespaces: Vec<NamespaceId> = self.graph.namespace_ids().collect();
        for ns_id in namespaces {
            let scope = self.graph.namespace(ns_id).decls.clone();
            self.rename_scope(&scope);
        }
        let classes: Vec<DeclId> = self
            .graph
            .decl_ids()
            .filter(|&decl_id| self.graph.decl(decl_id).as_class().is_some())
            .collect();
        for class_id in classes {
            let members = match self.graph.decl(class_id).as_class() {
                Some(class) => class.members.clone(),
                None => continue,
            };
            let mut scope = Vec::with_capacity(members.len());
            for member in members {
                scope.push(member);
                if let Some(property) = self.graph.decl(member).as_property() {
                    if let Some(getter) = property.getter {
                        scope.push(getter);
                    }
                    if let Some(setter) = property.setter {
                        scope.push(setter);
                    }
                }
            }
            self.rename_scope(&scope);
        }
    }

    fn rename_scope(&mut self, decls: &[DeclId]) {
        let mut seen: HashMap<String, u32> = HashMap::new();
        for &decl_id in decls {
            if !self.graph.decl(decl_id).emittable() {
                continue;
            }
            let name = self.graph.decl(decl_id).display_name.clone();
            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                let renamed = format!("{}_{}", name, *count - 1);
                let identity = self.graph.decl(decl_id).identity.clone();
                self.graph.decl_mut(decl_id).display_name = renamed.clone();
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::RenamedMember,
                    format!("Renaming '{identity}' to '{renamed}'"),
                ));
            }
        }
    }
}

struct ResolvedMethod {
    identity: String,
    ignore: bool,
    blocked_return: Option<String>,
    blocked_params: Vec<(String, String)>,
    decl: MethodDecl,
}

/// Members every object inherits from the root class are left to the target
/// language rather than projected.
fn is_root_object_member(universe: &MetadataUniverse, method: &MethodEntry) -> bool {
    matches!(
        member_key(universe, &method.name, &method.params).as_str(),
        "Equals(object)" | "ReferenceEquals(object,object)" | "GetHashCode()"
    )
}

/// Explicit interface implementations carry interface-qualified names and
/// non-public access. They surface under the segment after the last `.` as a
/// public member, unless a public instance method already claims that simple
/// name on the declaring type.
fn promoted_simple_name<'a>(
    universe: &MetadataUniverse,
    declaring: TypeId,
    method: &'a MethodEntry,
) -> Option<&'a str> {
    if method.is_public() || !(method.is_virtual() && method.is_final()) {
        return None;
    }
    let simple = match method.name.rfind('.') {
        Some(dot) => &method.name[dot + 1..],
        None => method.name.as_str(),
    };
    let taken = universe
        .type_entry(declaring)
        .methods
        .iter()
        .any(|other| other.is_public() && !other.is_static() && other.name == simple);
    if taken {
        None
    } else {
        Some(simple)
    }
}
