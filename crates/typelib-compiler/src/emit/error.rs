//! Error types for typelib compilation.

use std::io;

/// Error during typelib compilation.
///
/// Any error aborts the whole compile; no partial artifact is produced.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A member-only node kind appeared at the top level of the namespace.
    #[error("unexpected {kind} node `{name}` at namespace level")]
    UnexpectedNode { kind: &'static str, name: String },

    /// Two top-level nodes share a name.
    #[error("duplicate entry `{0}`")]
    DuplicateEntry(String),

    /// A member reference (vfunc, signal, property) names nothing in its owner.
    #[error("`{owner}` has no {kind} named `{name}`")]
    UnknownMember {
        owner: String,
        kind: &'static str,
        name: String,
    },

    /// A constant literal does not fit its declared type.
    #[error("constant `{name}`: invalid {ty} literal `{value}`")]
    InvalidConstant {
        name: String,
        ty: &'static str,
        value: String,
    },

    /// An enum or flags member outside both the `i32` and `u32` ranges.
    #[error("`{owner}` value `{name}` out of range: {value}")]
    ValueOutOfRange {
        owner: String,
        name: String,
        value: i64,
    },

    /// Strict mode: a name could not be resolved locally or in an included
    /// namespace.
    #[error("unresolved name `{0}`")]
    UnresolvedName(String),

    /// Too many directory entries (exceeds u16 max).
    #[error("too many directory entries: {0} (max 65535)")]
    TooManyEntries(usize),

    /// Too many members of one kind in one entry (exceeds u16 max).
    #[error("`{owner}` has too many {kind}: {count} (max 65535)")]
    TooManyMembers {
        owner: String,
        kind: &'static str,
        count: usize,
    },

    /// Artifact would exceed the 32-bit offset range.
    #[error("typelib too large: {0} bytes")]
    TooLarge(usize),

    /// Broken compiler invariant detected at finalization.
    #[error("internal error: {0}")]
    Internal(String),

    /// Writing the artifact to its sink failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
