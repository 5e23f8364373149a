//! Symbol directory: entry ids, directory slots and name resolution.
//!
//! Local entries are registered up front, so they occupy the first
//! directory slots. Names that do not resolve locally become external
//! entries, appended after the locals and memoized by qualified name.

use std::collections::HashMap;

use indexmap::IndexMap;
use typelib_format::{BlobType, DirRef};

use super::options::CompileOptions;
use super::string_pool::StringPool;
use super::CompileError;

/// Identity of one emitted body (entry blob, signature, complex type or
/// constant value). Allocated monotonically, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u32);

impl EntryId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A registered local symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub entry_id: EntryId,
    pub dir: DirRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotTarget {
    Local(EntryId),
    /// Foreign namespace, as a pool offset.
    External { namespace: u32 },
}

/// One directory slot before assembly. String fields are pool offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirSlot {
    pub blob_type: BlobType,
    pub name: u32,
    pub target: SlotTarget,
}

impl DirSlot {
    pub fn is_local(&self) -> bool {
        matches!(self.target, SlotTarget::Local(_))
    }
}

#[derive(Debug)]
pub struct SymbolDirectory {
    /// Namespace being compiled.
    namespace: String,
    /// Pool offset of `namespace`.
    namespace_offset: u32,
    slots: Vec<DirSlot>,
    locals: IndexMap<String, Symbol>,
    /// Qualified `Namespace.Symbol` to slot.
    externals: HashMap<String, DirRef>,
    n_local: usize,
    next_id: u32,
}

impl SymbolDirectory {
    pub fn new(namespace: &str, pool: &mut StringPool) -> Self {
        Self {
            namespace: namespace.to_string(),
            namespace_offset: pool.intern(namespace),
            slots: Vec::new(),
            locals: IndexMap::new(),
            externals: HashMap::new(),
            n_local: 0,
            next_id: 0,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn namespace_offset(&self) -> u32 {
        self.namespace_offset
    }

    /// Fresh entry id.
    pub fn allocate_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> usize {
        self.next_id as usize
    }

    /// Register a local entry under `name`.
    pub fn register_local(
        &mut self,
        name: &str,
        blob_type: BlobType,
        pool: &mut StringPool,
    ) -> Result<Symbol, CompileError> {
        if self.locals.contains_key(name) {
            return Err(CompileError::DuplicateEntry(name.to_string()));
        }
        // locals must occupy the first directory slots
        if self.external_count() > 0 {
            return Err(CompileError::Internal(format!(
                "local `{name}` registered after external entries were created"
            )));
        }

        let entry_id = self.allocate_id();
        let dir = self.push_slot(DirSlot {
            blob_type,
            name: pool.intern(name),
            target: SlotTarget::Local(entry_id),
        })?;
        let symbol = Symbol { entry_id, dir };
        self.locals.insert(name.to_string(), symbol);
        self.n_local += 1;
        Ok(symbol)
    }

    /// Local symbol registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.locals.get(name).copied()
    }

    /// Directory slot for a possibly qualified name.
    ///
    /// Local names win. Anything else becomes a memoized external entry;
    /// strict mode rejects names outside the included namespaces.
    pub fn resolve(
        &mut self,
        name: &str,
        pool: &mut StringPool,
        options: &CompileOptions,
    ) -> Result<DirRef, CompileError> {
        if let Some(symbol) = self.lookup(name) {
            return Ok(symbol.dir);
        }

        let (namespace, symbol) = match name.rsplit_once('.') {
            Some((ns, sym)) if ns == self.namespace => {
                if let Some(local) = self.lookup(sym) {
                    return Ok(local.dir);
                }
                if options.is_strict() {
                    return Err(CompileError::UnresolvedName(name.to_string()));
                }
                (ns, sym)
            }
            Some((ns, sym)) => {
                if options.is_strict() && !options.includes(ns) {
                    return Err(CompileError::UnresolvedName(name.to_string()));
                }
                (ns, sym)
            }
            None => {
                if options.is_strict() {
                    return Err(CompileError::UnresolvedName(name.to_string()));
                }
                tracing::warn!(
                    "unqualified name `{name}` is not defined in `{}`, assuming external",
                    self.namespace
                );
                (self.namespace.as_str(), name)
            }
        };

        let key = format!("{namespace}.{symbol}");
        if let Some(&dir) = self.externals.get(&key) {
            return Ok(dir);
        }

        let slot = DirSlot {
            blob_type: BlobType::Invalid,
            name: pool.intern(symbol),
            target: SlotTarget::External {
                namespace: pool.intern(namespace),
            },
        };
        let dir = self.push_slot(slot)?;
        tracing::debug!("external entry {dir} for `{key}`");
        self.externals.insert(key, dir);
        Ok(dir)
    }

    fn push_slot(&mut self, slot: DirSlot) -> Result<DirRef, CompileError> {
        let dir = DirRef::from_index(self.slots.len())
            .ok_or(CompileError::TooManyEntries(self.slots.len() + 1))?;
        self.slots.push(slot);
        Ok(dir)
    }

    pub fn slots(&self) -> &[DirSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn local_count(&self) -> usize {
        self.n_local
    }

    pub fn external_count(&self) -> usize {
        self.slots.len() - self.n_local
    }

    /// Registered local symbols, in registration order.
    pub fn locals(&self) -> impl Iterator<Item = (&str, Symbol)> {
        self.locals.iter().map(|(name, &symbol)| (name.as_str(), symbol))
    }
}
