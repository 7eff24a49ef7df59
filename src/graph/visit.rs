//! Traversal over a completed declaration graph.
//!
//! Backend emitters consume the graph through [`GraphVisitor`]: namespaces in
//! pre-order, declarations in creation order, class members after their class
//! and property accessors after their property. Callbacks default to doing
//! nothing, so a visitor implements only what it cares about.

use crate::graph::{DeclGraph, DeclId, DeclKind, Declaration, NamespaceId};

/// Callbacks invoked while walking a declaration graph.
///
/// All methods receive the graph itself so implementations can chase
/// cross-references without carrying their own handle.
pub trait GraphVisitor {
    /// Called for every class, value type and interface declaration.
    fn visit_class(&mut self, _graph: &DeclGraph, _id: DeclId, _decl: &Declaration) {}

    /// Called for every enum declaration.
    fn visit_enumeration(&mut self, _graph: &DeclGraph, _id: DeclId, _decl: &Declaration) {}

    /// Called for every method, constructors and property accessors included.
    fn visit_method(&mut self, _graph: &DeclGraph, _id: DeclId, _decl: &Declaration) {}

    /// Called for every field declaration.
    fn visit_field(&mut self, _graph: &DeclGraph, _id: DeclId, _decl: &Declaration) {}

    /// Called for every property declaration, before its accessors.
    fn visit_property(&mut self, _graph: &DeclGraph, _id: DeclId, _decl: &Declaration) {}
}

/// Walk the whole graph, dispatching each declaration to 'visitor'.
pub fn walk<V: GraphVisitor>(graph: &DeclGraph, visitor: &mut V) {
    walk_namespace(graph, graph.root(), visitor);
}

fn walk_namespace<V: GraphVisitor>(graph: &DeclGraph, namespace: NamespaceId, visitor: &mut V) {
    let node = graph.namespace(namespace);
    for decl in &node.decls {
        let declaration = graph.decl(*decl);
        match &declaration.kind {
            DeclKind::Class(class) => {
                visitor.visit_class(graph, *decl, declaration);
                for member in &class.members {
                    walk_member(graph, *member, visitor);
                }
            }
            DeclKind::Enumeration(_) => visitor.visit_enumeration(graph, *decl, declaration),
            _ => walk_member(graph, *decl, visitor),
        }
    }
    for child in &node.children {
        walk_namespace(graph, *child, visitor);
    }
}

fn walk_member<V: GraphVisitor>(graph: &DeclGraph, id: DeclId, visitor: &mut V) {
    let decl = graph.decl(id);
    match &decl.kind {
        DeclKind::Method(_) => visitor.visit_method(graph, id, decl),
        DeclKind::Field(_) => visitor.visit_field(graph, id, decl),
        DeclKind::Property(property) => {
            visitor.visit_property(graph, id, decl);
            if let Some(getter) = property.getter {
                walk_member(graph, getter, visitor);
            }
            if let Some(setter) = property.setter {
                walk_member(graph, setter, visitor);
            }
        }
        DeclKind::Class(_) | DeclKind::Enumeration(_) => {}
    }
}
