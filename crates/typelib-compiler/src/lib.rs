//! Typelib compiler: node forest in, binary typelib out.
//!
//! This crate provides the back half of the interface-description pipeline:
//! - `emit` - string pool, symbol directory, deferred bodies and assembly
//! - `artifact` - the compiled bytes and their load/unload hooks
//! - `c_source` - C rendering with constructor/destructor registration

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod artifact;
pub mod c_source;
pub mod emit;

#[cfg(test)]
mod c_source_tests;
#[cfg(test)]
pub mod test_utils;

pub use artifact::{Artifact, Registration, Registry};
pub use emit::{CompileError, CompileOptions, ExternalRefs, compile, compile_namespace};

/// Result type for compile operations.
pub type Result<T> = std::result::Result<T, CompileError>;
