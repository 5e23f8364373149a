#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Typelib binary format.
//!
//! This crate contains:
//! - Layout definitions (header, directory entries, blob rows, type tags)
//! - A bounds-checked reader ([`Typelib`]) used by loaders and tests
//! - A human-readable dump

pub mod typelib;

pub use typelib::{
    BLOB_ALIGN, BLOB_SIZES, Blob, BlobType, ByteStorage, DirEntry, DirRef, HEADER_SIZE, Header,
    MAGIC, MAJOR_VERSION, MINOR_VERSION, TypeRef, TypeTag, Typelib, TypelibError, align_blob,
    blobs, dump, flags, type_ref,
};
