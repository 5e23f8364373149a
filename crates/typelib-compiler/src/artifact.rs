//! Compiled typelib and its load/unload hooks.
//!
//! The runtime type registry is an external collaborator, modeled by the
//! [`Registry`] trait. [`Artifact::load`] hands the bytes over and returns a
//! guard that unregisters the namespace when dropped.

use std::io::Write;

use crate::emit::CompileError;

/// A self-contained typelib for one namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    namespace: String,
    bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(namespace: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            namespace: namespace.into(),
            bytes,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the raw typelib to a sink.
    pub fn write_to(&self, mut sink: impl Write) -> Result<(), CompileError> {
        sink.write_all(&self.bytes)?;
        sink.flush()?;
        Ok(())
    }

    /// Load hook: register the typelib under its namespace.
    pub fn on_load<R: Registry>(&self, registry: &mut R) -> Result<(), R::Error> {
        tracing::debug!("registering typelib `{}`", self.namespace);
        registry.register(&self.namespace, &self.bytes)
    }

    /// Unload hook: drop the namespace from the registry.
    pub fn on_unload<R: Registry>(&self, registry: &mut R) {
        tracing::debug!("unregistering typelib `{}`", self.namespace);
        registry.unregister(&self.namespace);
    }

    /// Register now, unregister when the returned guard is dropped.
    pub fn load<'r, R: Registry>(
        &self,
        registry: &'r mut R,
    ) -> Result<Registration<'r, R>, R::Error> {
        self.on_load(registry)?;
        Ok(Registration {
            registry,
            namespace: self.namespace.clone(),
        })
    }
}

/// Runtime registry that typelibs are loaded into.
pub trait Registry {
    type Error;

    fn register(&mut self, namespace: &str, bytes: &[u8]) -> Result<(), Self::Error>;

    fn unregister(&mut self, namespace: &str);
}

/// Keeps a namespace registered for its lifetime.
#[derive(Debug)]
pub struct Registration<'r, R: Registry> {
    registry: &'r mut R,
    namespace: String,
}

impl<R: Registry> Registration<'_, R> {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn registry(&self) -> &R {
        self.registry
    }
}

impl<R: Registry> Drop for Registration<'_, R> {
    fn drop(&mut self) {
        tracing::debug!("unregistering typelib `{}`", self.namespace);
        self.registry.unregister(&self.namespace);
    }
}
