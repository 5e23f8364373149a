//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::context::CompileContext;
use super::directory::EntryId;
use super::section::Section;

impl CompileContext<'_> {
    /// A fixed row must occupy exactly its declared size.
    pub(crate) fn ensure_row(&self, kind: &str, start: usize, size: usize) {
        let written = self.body.len() - start;
        if written != size {
            panic!("{kind} row is {written} bytes, expected {size}");
        }
    }

    /// A child array must hold exactly `count` rows of `size` bytes.
    pub(crate) fn ensure_rows(&self, kind: &str, start: usize, count: usize, size: usize) {
        let written = self.body.len() - start;
        if written != count * size {
            panic!(
                "{kind} rows take {written} bytes, expected {count} x {size}",
            );
        }
    }
}

impl Section {
    pub(crate) fn ensure_first_write(&self, id: EntryId, previous: Option<usize>) {
        if let Some(at) = previous {
            panic!("body {id} written twice (first at +{at:#x})");
        }
    }
}
