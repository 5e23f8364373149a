//! Body section with patchable references.
//!
//! Bodies are written before the final position of the string pool and of
//! the bodies themselves is known. Every string or body reference is
//! written as a zero placeholder and recorded as a relocation, resolved by
//! the assembler.

use std::collections::HashMap;

use typelib_format::{BLOB_ALIGN, TypeRef};

use super::directory::EntryId;

/// What a relocated u32 points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Pool-relative string offset.
    Str(u32),
    /// Start of an emitted body.
    Entry(EntryId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reloc {
    /// Position of the u32 placeholder within the section.
    pub at: usize,
    pub target: Target,
}

#[derive(Debug, Default)]
pub struct Section {
    bytes: Vec<u8>,
    relocs: Vec<Reloc>,
    /// Section-relative start of every written body.
    starts: HashMap<EntryId, usize>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Align and mark the start of the body for `id`.
    pub fn begin_entry(&mut self, id: EntryId) -> usize {
        self.align();
        let start = self.bytes.len();
        let prev = self.starts.insert(id, start);
        self.ensure_first_write(id, prev);
        start
    }

    pub fn start_of(&self, id: EntryId) -> Option<usize> {
        self.starts.get(&id).copied()
    }

    /// Number of bodies written.
    pub fn entry_count(&self) -> usize {
        self.starts.len()
    }

    pub fn align(&mut self) {
        let rem = self.bytes.len() % BLOB_ALIGN;
        if rem != 0 {
            self.bytes.resize(self.bytes.len() + BLOB_ALIGN - rem, 0);
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn u8(&mut self, v: u8) {
        self.bytes.push(v);
    }

    pub fn u16(&mut self, v: u16) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u32(&mut self, v: u32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    pub fn i32(&mut self, v: i32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    pub fn raw(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// String reference; `None` writes 0.
    pub fn str_ref(&mut self, offset: Option<u32>) {
        if let Some(offset) = offset {
            self.reloc(Target::Str(offset));
        }
        self.u32(0);
    }

    /// Reference to the start of a body.
    pub fn entry_ref(&mut self, id: EntryId) {
        self.reloc(Target::Entry(id));
        self.u32(0);
    }

    /// Inline type reference. A complex `target` relocates the offset field.
    pub fn type_ref(&mut self, ty: TypeRef, target: Option<EntryId>) {
        let at = self.bytes.len();
        self.raw(&ty.to_bytes());
        if let Some(id) = target {
            self.relocs.push(Reloc {
                at: at + 4,
                target: Target::Entry(id),
            });
        }
    }

    fn reloc(&mut self, target: Target) {
        self.relocs.push(Reloc {
            at: self.bytes.len(),
            target,
        });
    }

    pub fn relocs(&self) -> &[Reloc] {
        &self.relocs
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<Reloc>, HashMap<EntryId, usize>) {
        (self.bytes, self.relocs, self.starts)
    }
}
