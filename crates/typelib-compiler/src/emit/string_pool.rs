//! String pool builder.
//!
//! Strings are stored NUL-terminated in first-use order. Offsets are
//! relative to the start of the pool; the assembler rebases them once the
//! pool's position in the file is known.

use std::collections::HashMap;

use super::CompileError;

/// Deduplicating string interner with stable offsets.
#[derive(Debug, Default)]
pub struct StringPool {
    /// Content to pool-relative offset.
    lookup: HashMap<String, u32>,
    /// Pool bytes, every string followed by NUL.
    bytes: Vec<u8>,
}

impl StringPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of `s`, appending it on first use.
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&offset) = self.lookup.get(s) {
            return offset;
        }

        let offset = self.bytes.len() as u32;
        self.bytes.extend_from_slice(s.as_bytes());
        self.bytes.push(0);
        self.lookup.insert(s.to_string(), offset);
        offset
    }

    pub fn intern_opt(&mut self, s: Option<&str>) -> Option<u32> {
        s.map(|s| self.intern(s))
    }

    /// Offset of `s`, if it was interned.
    pub fn get(&self, s: &str) -> Option<u32> {
        self.lookup.get(s).copied()
    }

    /// Number of distinct strings.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Validate that every offset fits in u32.
    pub fn validate(&self) -> Result<(), CompileError> {
        if u32::try_from(self.bytes.len()).is_err() {
            return Err(CompileError::TooLarge(self.bytes.len()));
        }
        Ok(())
    }
}
