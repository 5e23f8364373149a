//! Compile options.

/// How names that do not resolve to a local entry are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExternalRefs {
    /// Any unresolved name becomes an external directory entry, to be
    /// looked up by the loader.
    #[default]
    Permissive,
    /// Unresolved names must be qualified with an included namespace.
    Strict,
}

/// Options for one compile.
#[derive(Clone, Debug, Default)]
pub struct CompileOptions {
    pub external_refs: ExternalRefs,
    /// Foreign namespaces external references may point into (strict mode).
    pub includes: Vec<String>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, value: bool) -> Self {
        self.external_refs = if value {
            ExternalRefs::Strict
        } else {
            ExternalRefs::Permissive
        };
        self
    }

    pub fn include(mut self, namespace: impl Into<String>) -> Self {
        self.includes.push(namespace.into());
        self
    }

    pub fn is_strict(&self) -> bool {
        self.external_refs == ExternalRefs::Strict
    }

    pub fn includes(&self, namespace: &str) -> bool {
        self.includes.iter().any(|ns| ns == namespace)
    }
}
