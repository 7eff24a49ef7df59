//! Lowering of metadata type references into graph descriptors.
//!
//! Every [`TypeRef`](crate::metadata::TypeRef) that appears in a signature,
//! field, or property passes through [`Builder::resolve_type`]. References
//! the binding surface cannot carry across the boundary collapse into
//! [`TypeDesc::Unsupported`] here rather than aborting the bind, so one bad
//! signature costs a warning instead of the whole graph.

use crate::{
    binder::Builder,
    graph::{PrimitiveKind, TypeDesc},
    metadata::{GenericShape, TypeCode, TypeId, TypeKind, TypeRef},
    Error, Result,
};

impl Builder<'_> {
    /// Resolves 'ty' into a graph descriptor, declaring referenced types of
    /// the bound unit on demand.
    ///
    /// By-ref strings lose their indirection since the string marshaler
    /// already works through a buffer. Arrays keep their element descriptor
    /// unless the element is an object reference, which has no stable layout
    /// inside a flat array.
    pub(crate) fn resolve_type(&mut self, ty: &TypeRef) -> Result<TypeDesc> {
        match ty {
            TypeRef::ByRef(inner) => {
                let desc = self.resolve_type(inner)?;
                if desc.as_primitive() == Some(PrimitiveKind::String) {
                    return Ok(desc);
                }
                Ok(desc.indirect())
            }
            TypeRef::Pointer(inner) => Ok(self.resolve_type(inner)?.indirect()),
            TypeRef::Array(element) => {
                let desc = self.resolve_type(element)?;
                let class_element = desc
                    .tag()
                    .is_some_and(|decl_id| self.graph.decl(decl_id).as_class().is_some());
                if class_element {
                    return Ok(TypeDesc::Unsupported(format!(
                        "{}[]",
                        self.ref_description(element)
                    )));
                }
                Ok(desc.array())
            }
            TypeRef::Named(id) => self.resolve_named(*id),
        }
    }

    fn resolve_named(&mut self, id: TypeId) -> Result<TypeDesc> {
        let universe = self.universe;
        let entry = universe.get(id).ok_or(Error::TypeNotFound(id))?;
        match entry.generic {
            GenericShape::Parameter => {
                return Ok(TypeDesc::Unsupported(universe.full_name(id)));
            }
            GenericShape::Instance { open: true, .. } => {
                return Ok(TypeDesc::Unsupported(universe.full_name(id)));
            }
            GenericShape::Instance {
                definition,
                open: false,
            } => {
                return self.resolve_named(definition);
            }
            GenericShape::None | GenericShape::Definition => {}
        }
        if entry.kind == TypeKind::Enum {
            if entry.unit != self.unit {
                return Ok(TypeDesc::Unsupported(universe.full_name(id)));
            }
            return Ok(TypeDesc::Tag(self.declare_type(id)?));
        }
        if id == universe.system().void {
            return Ok(TypeDesc::Primitive(PrimitiveKind::Void));
        }
        if let Some(kind) = PrimitiveKind::from_type_code(entry.type_code) {
            return Ok(TypeDesc::Primitive(kind));
        }
        if entry.type_code != TypeCode::Object {
            // DateTime and DBNull carry their own codes but no mapping.
            return Ok(TypeDesc::Unsupported(universe.full_name(id)));
        }
        if entry.unit != self.unit {
            return Ok(TypeDesc::Unsupported(universe.full_name(id)));
        }
        Ok(TypeDesc::Tag(self.declare_type(id)?))
    }

    fn ref_description(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Named(id) => self.universe.full_name(*id),
            TypeRef::Array(element) => format!("{}[]", self.ref_description(element)),
            TypeRef::Pointer(inner) | TypeRef::ByRef(inner) => self.ref_description(inner),
        }
    }
}

/// Whether a resolved descriptor blocks the member that carries it.
pub(crate) fn unrepresentable(desc: &TypeDesc) -> bool {
    match desc {
        TypeDesc::Unsupported(_) => true,
        TypeDesc::Primitive(kind) => *kind == PrimitiveKind::Null,
        TypeDesc::Indirect(inner) => unrepresentable(inner),
        TypeDesc::Array { element, .. } => unrepresentable(element),
        TypeDesc::Tag(_) => false,
    }
}

/// Names the offending type for a skip diagnostic.
pub(crate) fn blocking_description(desc: &TypeDesc) -> String {
    match desc {
        TypeDesc::Unsupported(name) => name.clone(),
        TypeDesc::Indirect(inner) => blocking_description(inner),
        TypeDesc::Array { element, .. } => blocking_description(element),
        TypeDesc::Primitive(kind) => kind.token().to_string(),
        TypeDesc::Tag(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        binder::bind,
        graph::{ArraySize, DeclKind},
        metadata::{Constant, MetadataUniverse, TypeEntryBuilder},
    };

    fn first_method_return(
        output: &crate::binder::BindOutput,
        identity: &str,
    ) -> TypeDesc {
        let graph = &output.graph;
        let class_id = graph
            .decl_ids()
            .find(|&id| graph.decl(id).identity == identity)
            .unwrap();
        let class = graph.decl(class_id).as_class().unwrap();
        let method = graph.decl(class.members[0]).as_method().unwrap();
        method.return_type.clone()
    }

    #[test]
    fn primitive_returns_resolve_to_kinds() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        let double = universe.system().double;
        let _ = TypeEntryBuilder::class(&mut universe, unit, "Math", "Sums")
            .unwrap()
            .method("Mean", |method| method.returns(TypeRef::named(double)));
        let output = bind(&universe, unit).unwrap();
        assert_eq!(
            first_method_return(&output, "Math.Sums"),
            TypeDesc::Primitive(PrimitiveKind::R8)
        );
    }

    #[test]
    fn byte_arrays_stay_while_object_arrays_drop() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        let byte = universe.system().byte;
        let widget = TypeEntryBuilder::class(&mut universe, unit, "Data", "Widget")
            .unwrap()
            .id();
        let _ = TypeEntryBuilder::class(&mut universe, unit, "Data", "Feed")
            .unwrap()
            .method("Raw", |method| method.returns(TypeRef::named(byte).array()))
            .method("Widgets", |method| {
                method.returns(TypeRef::named(widget).array())
            });
        let output = bind(&universe, unit).unwrap();

        let graph = &output.graph;
        let feed_id = graph
            .decl_ids()
            .find(|&id| graph.decl(id).identity == "Data.Feed")
            .unwrap();
        let class = graph.decl(feed_id).as_class().unwrap();
        let raw = graph.decl(class.members[0]).as_method().unwrap();
        assert_eq!(
            raw.return_type,
            TypeDesc::Array {
                element: Box::new(TypeDesc::Primitive(PrimitiveKind::U1)),
                size: ArraySize::Variable,
            }
        );
        let widgets = graph.decl(class.members[1]).as_method().unwrap();
        assert_eq!(
            widgets.return_type,
            TypeDesc::Unsupported("Data.Widget[]".to_string())
        );
        assert!(graph.decl(class.members[1]).ignore);
    }

    #[test]
    fn by_ref_string_drops_its_indirection() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        let sys = *universe.system();
        let _ = TypeEntryBuilder::class(&mut universe, unit, "Text", "Io")
            .unwrap()
            .method("Swap", |method| {
                method
                    .ref_param("text", TypeRef::named(sys.string))
                    .ref_param("count", TypeRef::named(sys.int32))
            });
        let output = bind(&universe, unit).unwrap();

        let graph = &output.graph;
        let io_id = graph
            .decl_ids()
            .find(|&id| graph.decl(id).identity == "Text.Io")
            .unwrap();
        let class = graph.decl(io_id).as_class().unwrap();
        let swap = graph.decl(class.members[0]).as_method().unwrap();
        assert_eq!(swap.params[0].ty, TypeDesc::Primitive(PrimitiveKind::String));
        assert!(swap.params[0].by_ref);
        assert_eq!(
            swap.params[1].ty,
            TypeDesc::Indirect(Box::new(TypeDesc::Primitive(PrimitiveKind::I4)))
        );
    }

    #[test]
    fn closed_generic_instances_collapse_to_their_definition() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        let list = TypeEntryBuilder::class(&mut universe, unit, "Bag", "List`1")
            .unwrap()
            .generic_definition()
            .id();
        let closed = TypeEntryBuilder::class(&mut universe, unit, "Bag", "List`1[System.Int32]")
            .unwrap()
            .not_exported()
            .generic_instance_of(list)
            .id();
        let _ = TypeEntryBuilder::class(&mut universe, unit, "Bag", "User")
            .unwrap()
            .method("Items", |method| method.returns(TypeRef::named(closed)));
        let output = bind(&universe, unit).unwrap();

        let graph = &output.graph;
        let list_decl = graph
            .decl_ids()
            .find(|&id| graph.decl(id).identity == "Bag.List`1")
            .unwrap();
        assert_eq!(
            first_method_return(&output, "Bag.User"),
            TypeDesc::Tag(list_decl)
        );
    }

    #[test]
    fn open_shapes_are_unsupported() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        let param = TypeEntryBuilder::type_parameter(&mut universe, unit, "T")
            .unwrap()
            .id();
        let _ = TypeEntryBuilder::class(&mut universe, unit, "Bag", "Holder")
            .unwrap()
            .method("Get", |method| method.returns(TypeRef::named(param)));
        let output = bind(&universe, unit).unwrap();

        assert_eq!(
            first_method_return(&output, "Bag.Holder"),
            TypeDesc::Unsupported("T".to_string())
        );
        assert_eq!(output.diagnostics.len(), 1);
    }

    #[test]
    fn foreign_classes_and_calendar_types_are_unsupported() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        let sys = *universe.system();
        let _ = TypeEntryBuilder::class(&mut universe, unit, "Time", "Clock")
            .unwrap()
            .method("Now", |method| method.returns(TypeRef::named(sys.datetime)))
            .method("Box", |method| method.returns(TypeRef::named(sys.object)))
            .method("Price", |method| method.returns(TypeRef::named(sys.decimal)))
            .method("Hole", |method| method.returns(TypeRef::named(sys.dbnull)));
        let output = bind(&universe, unit).unwrap();

        let graph = &output.graph;
        let clock_id = graph
            .decl_ids()
            .find(|&id| graph.decl(id).identity == "Time.Clock")
            .unwrap();
        let class = graph.decl(clock_id).as_class().unwrap();
        let returns: Vec<_> = class
            .members
            .iter()
            .map(|&member| graph.decl(member).as_method().unwrap().return_type.clone())
            .collect();
        assert_eq!(
            returns[0],
            TypeDesc::Unsupported("System.DateTime".to_string())
        );
        assert_eq!(
            returns[1],
            TypeDesc::Unsupported("System.Object".to_string())
        );
        assert_eq!(returns[2], TypeDesc::Primitive(PrimitiveKind::Decimal));
        assert_eq!(
            returns[3],
            TypeDesc::Unsupported("System.DBNull".to_string())
        );
    }

    #[test]
    fn enum_references_declare_the_enum() {
        let mut universe = MetadataUniverse::new();
        let unit = universe.add_unit("managed");
        let color =
            TypeEntryBuilder::enumeration(&mut universe, unit, "Paint", "Color", TypeCode::Int32)
                .unwrap()
                .literal("Red", Constant::I4(0))
                .literal("Green", Constant::I4(1))
                .id();
        let _ = TypeEntryBuilder::class(&mut universe, unit, "Paint", "Brush")
            .unwrap()
            .method("Tint", |method| method.returns(TypeRef::named(color)));
        let output = bind(&universe, unit).unwrap();

        let graph = &output.graph;
        let color_decl = graph
            .decl_ids()
            .find(|&id| graph.decl(id).identity == "Paint.Color")
            .unwrap();
        assert!(matches!(
            graph.decl(color_decl).kind,
            DeclKind::Enumeration(_)
        ));
        assert_eq!(
            first_method_return(&output, "Paint.Brush"),
            TypeDesc::Tag(color_decl)
        );
    }
}
