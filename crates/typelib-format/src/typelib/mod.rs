//! Typelib binary format.
//!
//! Layout, in file order: header, directory, string pool, entry blobs.
//! All integers are little-endian and every reference is an absolute
//! offset from the start of the file (0 = none).

pub mod blobs;
mod constants;
mod directory;
mod dump;
mod header;
mod kinds;
pub mod type_ref;
mod view;

pub use blobs::{
    ArgBlob, ArrayTypeBlob, Blob, CallbackBlob, ConstantBlob, EnumBlob, ErrorDomainBlob,
    ErrorTypeBlob, FieldBlob, FunctionBlob, InterfaceBlob, ObjectBlob, ParamTypeBlob,
    PropertyBlob, RegisteredHead, SignalBlob, SignatureBlob, StructBlob, UnionBlob, VFuncBlob,
    ValueBlob, flags,
};
pub use constants::{
    BLOB_ALIGN, BLOB_SIZE_COUNT, HEADER_SIZE, MAGIC, MAJOR_VERSION, MINOR_VERSION, align_blob,
};
pub use directory::{DirEntry, DirRef};
pub use dump::dump;
pub use header::{BLOB_SIZE_NAMES, BLOB_SIZES, Header};
pub use kinds::{BlobType, TypeTag};
pub use type_ref::TypeRef;
pub use view::{
    ByteStorage, EnumView, InterfaceView, ObjectView, SignatureView, StructView, Typelib,
    TypelibError, UnionView,
};

#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod kinds_tests;

#[inline]
fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn read_i32_le(bytes: &[u8], offset: usize) -> i32 {
    read_u32_le(bytes, offset) as i32
}
