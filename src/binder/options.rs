//! Options controlling a bind run.

/// Tunables for declaration building.
///
/// The defaults bind the unit as-is, naming the root namespace after the
/// unit itself.
#[derive(Debug, Clone, Default)]
pub struct BindOptions {
    /// Name of the produced library, used for the root namespace in place of
    /// the unit name
    pub library_name: Option<String>,
}

impl BindOptions {
    /// Create options with the defaults.
    #[must_use]
    pub fn new() -> Self {
        BindOptions::default()
    }

    /// Use 'name' for the root namespace instead of the unit name.
    #[must_use]
    pub fn with_library_name(mut self, name: &str) -> Self {
        self.library_name = Some(name.to_string());
        self
    }
}
