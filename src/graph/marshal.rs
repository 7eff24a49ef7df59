//! Boundary representation planning for typed members.
//!
//! Once the graph is complete, every parameter, return value, field and
//! property receives a [`MarshalPlan`] describing how its value crosses the
//! native boundary. Planning is a pure function of resolved descriptors, so
//! it runs as a single pass over the finished arena.

use crate::binder::naming::{capitalize, sanitize};
use crate::graph::{ClassKind, DeclGraph, DeclKind, PrimitiveKind, TypeDesc};

/// Data flow direction of a parameter or return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// Caller to callee
    In,
    /// Callee to caller
    Out,
    /// Both directions
    InOut,
}

/// Boundary representation of one value.
#[derive(Debug, Clone, PartialEq)]
pub enum MarshalKind {
    /// Passed by value unchanged, numerics, booleans and enum values
    Value,
    /// 16-bit code unit, converted to and from a scalar on the managed side
    Utf16Unit,
    /// Immutable pointer to a null-terminated UTF-8 buffer
    Utf8Ptr,
    /// Owned growable string buffer handle, released by the native caller
    StringBuffer,
    /// Canonical textual round trip in both directions
    DecimalText,
    /// Opaque handle wrapping a managed object reference
    ObjectHandle {
        /// True when the handle comes from an explicit accessor rather than
        /// a direct field, the interface case
        via_accessor: bool,
    },
    /// Generated array wrapper type, one per element kind
    ArrayWrapper {
        /// Name of the wrapper type
        wrapper: String,
    },
    /// No representable plan, the member stays in the graph but is excluded
    /// from emission
    Unrepresentable,
}

/// The resolved representation and directionality decision for one value.
#[derive(Debug, Clone, PartialEq)]
pub struct MarshalPlan {
    /// Data flow direction
    pub usage: Usage,
    /// Boundary representation
    pub kind: MarshalKind,
}

/// A generated array wrapper type registered on the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayWrapper {
    /// Wrapper type name, capitalized element stem plus `Array`
    pub name: String,
    /// Element type the wrapper carries
    pub element: TypeDesc,
}

/// Annotate every typed member of the graph with its marshal plan and
/// register the array wrappers the plans require.
///
/// Plans are computed against the read-only graph first and written back in
/// a second sweep, keeping reads of referenced declarations untangled from
/// the writes.
pub(crate) fn resolve_marshaling(graph: &mut DeclGraph) {
    let mut method_plans = Vec::new();
    let mut field_plans = Vec::new();
    let mut property_plans = Vec::new();
    let mut wrappers: Vec<ArrayWrapper> = Vec::new();

    for id in graph.decl_ids() {
        match &graph.decl(id).kind {
            DeclKind::Method(method) => {
                let return_plan = MarshalPlan {
                    usage: Usage::Out,
                    kind: value_kind(graph, &method.return_type, Usage::Out, &mut wrappers),
                };
                let param_plans: Vec<MarshalPlan> = method
                    .params
                    .iter()
                    .map(|param| MarshalPlan {
                        usage: param.usage,
                        kind: value_kind(graph, &param.ty, param.usage, &mut wrappers),
                    })
                    .collect();
                method_plans.push((id, return_plan, param_plans));
            }
            DeclKind::Field(field) => {
                field_plans.push((id, value_kind(graph, &field.ty, Usage::In, &mut wrappers)));
            }
            DeclKind::Property(property) => {
                property_plans.push((
                    id,
                    value_kind(graph, &property.ty, Usage::In, &mut wrappers),
                ));
            }
            DeclKind::Class(_) | DeclKind::Enumeration(_) => {}
        }
    }

    for (id, return_plan, param_plans) in method_plans {
        if let Some(method) = graph.decl_mut(id).as_method_mut() {
            method.return_plan = Some(return_plan);
            for (param, plan) in method.params.iter_mut().zip(param_plans) {
                param.plan = Some(plan);
            }
        }
    }
    for (id, kind) in field_plans {
        if let DeclKind::Field(field) = &mut graph.decl_mut(id).kind {
            field.plan = Some(kind);
        }
    }
    for (id, kind) in property_plans {
        if let DeclKind::Property(property) = &mut graph.decl_mut(id).kind {
            property.plan = Some(kind);
        }
    }
    for wrapper in wrappers {
        graph.register_array_wrapper(wrapper);
    }
}

fn value_kind(
    graph: &DeclGraph,
    desc: &TypeDesc,
    usage: Usage,
    wrappers: &mut Vec<ArrayWrapper>,
) -> MarshalKind {
    match desc {
        TypeDesc::Primitive(PrimitiveKind::String) => match usage {
            Usage::In => MarshalKind::Utf8Ptr,
            Usage::Out | Usage::InOut => MarshalKind::StringBuffer,
        },
        TypeDesc::Primitive(PrimitiveKind::Decimal) => MarshalKind::DecimalText,
        TypeDesc::Primitive(PrimitiveKind::Char) => MarshalKind::Utf16Unit,
        TypeDesc::Primitive(_) => MarshalKind::Value,
        TypeDesc::Indirect(inner) => value_kind(graph, inner, usage, wrappers),
        TypeDesc::Array { element, .. } => match wrapper_stem(graph, element) {
            Some(stem) => {
                let name = format!("{stem}Array");
                if !wrappers.iter().any(|known| known.name == name) {
                    wrappers.push(ArrayWrapper {
                        name: name.clone(),
                        element: (**element).clone(),
                    });
                }
                MarshalKind::ArrayWrapper { wrapper: name }
            }
            None => MarshalKind::Unrepresentable,
        },
        TypeDesc::Tag(id) => match &graph.decl(*id).kind {
            DeclKind::Enumeration(_) => MarshalKind::Value,
            DeclKind::Class(class) => MarshalKind::ObjectHandle {
                via_accessor: class.kind == ClassKind::Interface,
            },
            _ => MarshalKind::Unrepresentable,
        },
        TypeDesc::Unsupported(_) => MarshalKind::Unrepresentable,
    }
}

fn wrapper_stem(graph: &DeclGraph, element: &TypeDesc) -> Option<String> {
    match element {
        TypeDesc::Primitive(kind) => Some(capitalize(&sanitize(kind.token()))),
        TypeDesc::Tag(id) => {
            let decl = graph.decl(*id);
            match &decl.kind {
                DeclKind::Enumeration(_) => Some(capitalize(&decl.display_name)),
                _ => None,
            }
        }
        TypeDesc::Array { element, .. } => {
            wrapper_stem(graph, element).map(|stem| format!("{stem}Array"))
        }
        TypeDesc::Indirect(_) | TypeDesc::Unsupported(_) => None,
    }
}
