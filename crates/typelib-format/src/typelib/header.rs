//! Typelib file header (96 bytes).
//!
//! Layout:
//! - 0-15: magic
//! - 16: major version, 17: minor version, 18-19: reserved
//! - 20-21: n_entries, 22-23: n_local_entries
//! - 24-27: directory offset, 28-31: total size
//! - 32-35: namespace string, 36-39: shared library string (0 = none)
//! - 40-81: blob sizes, one u16 per row kind (see [`BLOB_SIZES`])
//! - 82-95: reserved

use super::blobs::{
    ArgBlob, ArrayTypeBlob, Blob, CallbackBlob, ConstantBlob, EnumBlob, ErrorDomainBlob,
    ErrorTypeBlob, FieldBlob, FunctionBlob, InterfaceBlob, ObjectBlob, ParamTypeBlob,
    PropertyBlob, SignalBlob, SignatureBlob, StructBlob, UnionBlob, VFuncBlob, ValueBlob,
};
use super::constants::{BLOB_SIZE_COUNT, HEADER_SIZE, MAGIC, MAJOR_VERSION, MINOR_VERSION};
use super::directory::DirEntry;
use super::type_ref::TypeRef;
use super::{read_u16_le, read_u32_le};

const BLOB_SIZES_AT: usize = 40;

/// Row sizes written by this version of the format, in header order.
pub const BLOB_SIZES: [u16; BLOB_SIZE_COUNT] = [
    DirEntry::SIZE as u16,
    TypeRef::SIZE as u16,
    FunctionBlob::SIZE as u16,
    CallbackBlob::SIZE as u16,
    SignalBlob::SIZE as u16,
    VFuncBlob::SIZE as u16,
    ArgBlob::SIZE as u16,
    SignatureBlob::SIZE as u16,
    PropertyBlob::SIZE as u16,
    FieldBlob::SIZE as u16,
    ValueBlob::SIZE as u16,
    ConstantBlob::SIZE as u16,
    ErrorDomainBlob::SIZE as u16,
    EnumBlob::SIZE as u16,
    StructBlob::SIZE as u16,
    UnionBlob::SIZE as u16,
    ObjectBlob::SIZE as u16,
    InterfaceBlob::SIZE as u16,
    ArrayTypeBlob::SIZE as u16,
    ParamTypeBlob::SIZE as u16,
    ErrorTypeBlob::SIZE as u16,
];

/// Row kind names matching [`BLOB_SIZES`], for diagnostics.
pub const BLOB_SIZE_NAMES: [&str; BLOB_SIZE_COUNT] = [
    "entry",
    "type_ref",
    "function",
    "callback",
    "signal",
    "vfunc",
    "arg",
    "signature",
    "property",
    "field",
    "value",
    "constant",
    "error_domain",
    "enum",
    "struct",
    "union",
    "object",
    "interface",
    "array_type",
    "param_type",
    "error_type",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 16],
    pub major_version: u8,
    pub minor_version: u8,
    /// Total directory entries, local and external.
    pub n_entries: u16,
    /// Local entries occupy the first `n_local_entries` directory slots.
    pub n_local_entries: u16,
    pub directory: u32,
    pub size: u32,
    pub namespace: u32,
    pub shared_library: u32,
    pub blob_sizes: [u16; BLOB_SIZE_COUNT],
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            major_version: MAJOR_VERSION,
            minor_version: MINOR_VERSION,
            n_entries: 0,
            n_local_entries: 0,
            directory: 0,
            size: 0,
            namespace: 0,
            shared_library: 0,
            blob_sizes: BLOB_SIZES,
        }
    }
}

impl Header {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE, "header too short");

        let mut magic = [0u8; 16];
        magic.copy_from_slice(&bytes[0..16]);

        let mut blob_sizes = [0u16; BLOB_SIZE_COUNT];
        for (i, size) in blob_sizes.iter_mut().enumerate() {
            *size = read_u16_le(bytes, BLOB_SIZES_AT + i * 2);
        }

        Self {
            magic,
            major_version: bytes[16],
            minor_version: bytes[17],
            n_entries: read_u16_le(bytes, 20),
            n_local_entries: read_u16_le(bytes, 22),
            directory: read_u32_le(bytes, 24),
            size: read_u32_le(bytes, 28),
            namespace: read_u32_le(bytes, 32),
            shared_library: read_u32_le(bytes, 36),
            blob_sizes,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..16].copy_from_slice(&self.magic);
        bytes[16] = self.major_version;
        bytes[17] = self.minor_version;
        bytes[20..22].copy_from_slice(&self.n_entries.to_le_bytes());
        bytes[22..24].copy_from_slice(&self.n_local_entries.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.directory.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.size.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.namespace.to_le_bytes());
        bytes[36..40].copy_from_slice(&self.shared_library.to_le_bytes());
        for (i, size) in self.blob_sizes.iter().enumerate() {
            let at = BLOB_SIZES_AT + i * 2;
            bytes[at..at + 2].copy_from_slice(&size.to_le_bytes());
        }
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    /// Same major version. Newer minor versions only append fields.
    pub fn validate_version(&self) -> bool {
        self.major_version == MAJOR_VERSION
    }

    /// First row kind whose recorded size differs from ours, as
    /// `(index, found)`.
    pub fn blob_size_mismatch(&self) -> Option<(usize, u16)> {
        self.blob_sizes
            .iter()
            .zip(BLOB_SIZES.iter())
            .position(|(found, expected)| found != expected)
            .map(|i| (i, self.blob_sizes[i]))
    }
}
