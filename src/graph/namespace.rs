//! Namespace tree of the declaration graph.

use std::fmt;

use crate::graph::DeclId;

/// Identifier of a namespace node within a declaration graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceId(u32);

impl NamespaceId {
    pub(crate) fn new(index: u32) -> Self {
        NamespaceId(index)
    }

    /// Position of the node in the graph arena
    #[must_use]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ns#{}", self.0)
    }
}

/// A node in the namespace tree.
///
/// The root node carries the translation unit name. Dotted namespace paths
/// become one node per segment below it.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceNode {
    /// Segment name, or the unit name on the root
    pub name: String,
    /// Enclosing namespace, `None` on the root
    pub parent: Option<NamespaceId>,
    /// Child namespaces in creation order
    pub children: Vec<NamespaceId>,
    /// Type declarations owned by this namespace, in creation order
    pub decls: Vec<DeclId>,
}
