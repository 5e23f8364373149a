//! Typelib emission from a node forest.
//!
//! Converts validated interface nodes into the binary typelib format:
//! - String pool construction and interning
//! - Directory registration and external name resolution
//! - Deduplication of complex types by canonical signature
//! - Deferred emission of signatures, complex types and constant values
//! - Section assembly, relocation and header generation

mod canon;
mod context;
mod deferred;
mod directory;
mod emitter;
mod error;
mod invariants;
mod options;
mod section;
mod string_pool;
mod value;
mod writers;

#[cfg(test)]
mod deferred_tests;
#[cfg(test)]
mod emit_tests;
#[cfg(test)]
mod section_tests;
#[cfg(test)]
mod string_pool_tests;
#[cfg(test)]
mod value_tests;

pub use canon::{TypeSlot, tag_of};
pub use context::CompileContext;
pub use deferred::{DeferredQueues, PushCounts};
pub use directory::{DirSlot, EntryId, SlotTarget, Symbol, SymbolDirectory};
pub use emitter::{assemble, build, compile, compile_namespace};
pub use error::CompileError;
pub use options::{CompileOptions, ExternalRefs};
pub use section::{Reloc, Section, Target};
pub use string_pool::StringPool;
pub use value::encode_constant;
pub use writers::blob_type_of;
