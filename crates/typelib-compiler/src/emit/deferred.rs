//! Work lists for bodies emitted after the entry that references them.
//!
//! Complex types, signatures and constant values are referenced by offset
//! from a fixed-size row, but their own bodies are written later. Each
//! queue is FIFO, and draining an item may push more items onto any queue.

use std::collections::VecDeque;

use typelib_core::{Constant, Signature, Type};

use super::directory::EntryId;

#[derive(Debug, Default)]
pub struct DeferredQueues<'a> {
    types: VecDeque<(&'a Type, EntryId)>,
    signatures: VecDeque<(&'a Signature, EntryId)>,
    constants: VecDeque<(&'a Constant, EntryId)>,
    pushed: PushCounts,
}

/// Items ever pushed per queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushCounts {
    pub types: usize,
    pub signatures: usize,
    pub constants: usize,
}

impl<'a> DeferredQueues<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_type(&mut self, ty: &'a Type, id: EntryId) {
        self.pushed.types += 1;
        self.types.push_back((ty, id));
    }

    pub fn push_signature(&mut self, signature: &'a Signature, id: EntryId) {
        self.pushed.signatures += 1;
        self.signatures.push_back((signature, id));
    }

    pub fn push_constant(&mut self, constant: &'a Constant, id: EntryId) {
        self.pushed.constants += 1;
        self.constants.push_back((constant, id));
    }

    pub fn pop_type(&mut self) -> Option<(&'a Type, EntryId)> {
        self.types.pop_front()
    }

    pub fn pop_signature(&mut self) -> Option<(&'a Signature, EntryId)> {
        self.signatures.pop_front()
    }

    pub fn pop_constant(&mut self) -> Option<(&'a Constant, EntryId)> {
        self.constants.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.signatures.is_empty() && self.constants.is_empty()
    }

    /// Items currently waiting, over all queues.
    pub fn pending(&self) -> usize {
        self.types.len() + self.signatures.len() + self.constants.len()
    }

    pub fn pushed(&self) -> PushCounts {
        self.pushed
    }
}
