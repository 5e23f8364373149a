//! Per-compile state.

use std::collections::HashMap;

use typelib_format::DirRef;

use super::CompileError;
use super::deferred::DeferredQueues;
use super::directory::{EntryId, SymbolDirectory};
use super::options::CompileOptions;
use super::section::Section;
use super::string_pool::StringPool;

/// Everything one compile mutates. Dropped as a whole on error; only the
/// assembled bytes outlive it.
#[derive(Debug)]
pub struct CompileContext<'a> {
    pub(crate) options: &'a CompileOptions,
    pub(crate) pool: StringPool,
    pub(crate) directory: SymbolDirectory,
    pub(crate) queues: DeferredQueues<'a>,
    /// Canonical complex-type signature to the entry holding its blob.
    pub(crate) type_cache: HashMap<String, EntryId>,
    pub(crate) body: Section,
    pub(crate) shared_library: Option<u32>,
}

impl<'a> CompileContext<'a> {
    pub fn new(
        namespace: &str,
        shared_library: Option<&str>,
        options: &'a CompileOptions,
    ) -> Self {
        let mut pool = StringPool::new();
        let directory = SymbolDirectory::new(namespace, &mut pool);
        let shared_library = pool.intern_opt(shared_library);

        Self {
            options,
            pool,
            directory,
            queues: DeferredQueues::new(),
            type_cache: HashMap::new(),
            body: Section::new(),
            shared_library,
        }
    }

    pub fn namespace(&self) -> &str {
        self.directory.namespace()
    }

    pub fn pool(&self) -> &StringPool {
        &self.pool
    }

    pub fn directory(&self) -> &SymbolDirectory {
        &self.directory
    }

    pub fn queues(&self) -> &DeferredQueues<'a> {
        &self.queues
    }

    pub fn body(&self) -> &Section {
        &self.body
    }

    /// Number of distinct complex types seen.
    pub fn complex_type_count(&self) -> usize {
        self.type_cache.len()
    }

    pub fn intern(&mut self, s: &str) -> u32 {
        self.pool.intern(s)
    }

    pub fn resolve(&mut self, name: &str) -> Result<DirRef, CompileError> {
        self.directory.resolve(name, &mut self.pool, self.options)
    }

    pub fn allocate_id(&mut self) -> EntryId {
        self.directory.allocate_id()
    }

    /// Write a string reference into the body.
    pub(crate) fn str_field(&mut self, s: &str) {
        let offset = self.pool.intern(s);
        self.body.str_ref(Some(offset));
    }

    pub(crate) fn opt_str_field(&mut self, s: Option<&str>) {
        let offset = self.pool.intern_opt(s);
        self.body.str_ref(offset);
    }

    /// Write a directory reference (`index + 1`) for `name`, 0 for `None`.
    pub(crate) fn dir_field(&mut self, name: Option<&str>) -> Result<(), CompileError> {
        let dir = match name {
            Some(name) => self.resolve(name)?,
            None => DirRef::NONE,
        };
        self.body.u16(dir.raw());
        Ok(())
    }
}
