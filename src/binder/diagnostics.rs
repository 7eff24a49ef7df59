//! Warnings collected while building a declaration graph.
//!
//! Recoverable conditions never abort the build. Each one is recorded as a
//! [`Diagnostic`] with a stable numeric code, and the full list rides along
//! with the finished graph.

use std::fmt;

use strum::{EnumCount, EnumIter};

/// Stable code identifying a diagnostic condition.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
pub enum DiagnosticCode {
    /// Constructor excluded because a parameter type has no representation
    SkippedConstructor,
    /// Method excluded because of its return type
    SkippedMethodReturn,
    /// Method excluded because of a parameter type
    SkippedMethodParameter,
    /// Property excluded because of its type
    SkippedProperty,
    /// Field excluded because of its type
    SkippedField,
    /// Member renamed to resolve a display name collision
    RenamedMember,
}

impl DiagnosticCode {
    /// Numeric form of the code, as printed in diagnostics.
    #[must_use]
    pub fn number(&self) -> u32 {
        match self {
            DiagnosticCode::SkippedConstructor => 1020,
            DiagnosticCode::SkippedMethodReturn => 1030,
            DiagnosticCode::SkippedMethodParameter => 1031,
            DiagnosticCode::SkippedProperty => 1040,
            DiagnosticCode::SkippedField => 1050,
            DiagnosticCode::RenamedMember => 1060,
        }
    }
}

/// One warning produced during a bind run.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Condition code
    pub code: DiagnosticCode,
    /// Human-readable description naming the affected declaration
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new(code: DiagnosticCode, message: String) -> Self {
        Diagnostic { code, message }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning CB{:04}: {}", self.code.number(), self.message)
    }
}
