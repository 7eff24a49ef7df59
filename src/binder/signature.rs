//! Signature keys locating method overloads at call time.
//!
//! A key has the shape `DeclaringTypeFullName:MemberName(tok,tok&,tok*)`.
//! Tokens use the canonical lowercase primitive names and full dotted names
//! for everything else, with `[]` appended per array level. An out or by-ref
//! parameter carries `&` and a raw pointer parameter carries `*`; by-ref wins
//! when both apply.

use crate::graph::PrimitiveKind;
use crate::metadata::{MetadataUniverse, ParamEntry, TypeCode, TypeId, TypeKind, TypeRef};

/// Full signature key of a method on its declaring type.
pub(crate) fn method_signature(
    universe: &MetadataUniverse,
    declaring: TypeId,
    name: &str,
    params: &[ParamEntry],
) -> String {
    format!(
        "{}:{}",
        universe.full_name(declaring),
        member_key(universe, name, params)
    )
}

/// Key of a member within its declaring type, `Name(tok,tok)`.
pub(crate) fn member_key(universe: &MetadataUniverse, name: &str, params: &[ParamEntry]) -> String {
    let rendered: Vec<String> = params
        .iter()
        .map(|param| param_sig(universe, param))
        .collect();
    format!("{}({})", name, rendered.join(","))
}

fn param_sig(universe: &MetadataUniverse, param: &ParamEntry) -> String {
    let token = type_token(universe, &param.ty);
    if param.is_out || param.ty.is_by_ref() {
        format!("{token}&")
    } else if param.ty.is_pointer() {
        format!("{token}*")
    } else {
        token
    }
}

fn type_token(universe: &MetadataUniverse, ty: &TypeRef) -> String {
    match ty {
        TypeRef::ByRef(inner) | TypeRef::Pointer(inner) => type_token(universe, inner),
        TypeRef::Array(element) => format!("{}[]", type_token(universe, element)),
        TypeRef::Named(id) => named_token(universe, *id),
    }
}

fn named_token(universe: &MetadataUniverse, id: TypeId) -> String {
    let entry = universe.type_entry(id);
    if entry.kind == TypeKind::Enum {
        return universe.full_name(id);
    }
    match entry.type_code {
        TypeCode::Object => {
            let sys = universe.system();
            if id == sys.intptr {
                "intptr".to_string()
            } else if id == sys.uintptr {
                "uintptr".to_string()
            } else if id == sys.object {
                "object".to_string()
            } else {
                universe.full_name(id)
            }
        }
        code => match PrimitiveKind::from_type_code(code) {
            Some(kind) => kind.token().to_string(),
            None => universe.full_name(id),
        },
    }
}
