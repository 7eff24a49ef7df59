//! Name sanitization and runtime name rendering.

/// Sanitize a metadata name into an identifier-safe form.
///
/// Every maximal run of non-letter characters collapses into a single
/// underscore. Digits count as non-letters, so arity suffixes and embedded
/// numbers fold away rather than surviving into emitted identifiers.
///
/// # Examples
///
/// ```rust
/// use cilbind::binder::sanitize;
///
/// assert_eq!(sanitize("Widget"), "Widget");
/// assert_eq!(sanitize("List`1"), "List_");
/// assert_eq!(sanitize("Vector3"), "Vector_");
/// assert_eq!(sanitize("My.Type+Inner"), "My_Type_Inner");
/// ```
#[must_use]
pub fn sanitize(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            result.push(c);
            in_run = false;
        } else if !in_run {
            result.push('_');
            in_run = true;
        }
    }
    result
}

/// Render the runtime lookup name of a type from its metadata full name.
///
/// Nesting separators switch from `+` to `/`, everything else passes
/// through untouched.
#[must_use]
pub fn runtime_type_name(full_name: &str) -> String {
    full_name.replace('+', "/")
}

/// Uppercase the first character, used to derive wrapper type stems.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize("Hello"), "Hello");
        assert_eq!(sanitize("List`1"), "List_");
        assert_eq!(sanitize("Dictionary`2[K,V]"), "Dictionary_K_V_");
        assert_eq!(sanitize("Vector3"), "Vector_");
        assert_eq!(sanitize("3D"), "_D");
        assert_eq!(sanitize("a__b"), "a_b");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_runtime_name_nesting() {
        assert_eq!(runtime_type_name("Ns.Outer+Inner"), "Ns.Outer/Inner");
        assert_eq!(runtime_type_name("Ns.Plain"), "Ns.Plain");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("byte"), "Byte");
        assert_eq!(capitalize("int_"), "Int_");
        assert_eq!(capitalize("System.Decimal"), "System.Decimal");
        assert_eq!(capitalize(""), "");
    }
}
