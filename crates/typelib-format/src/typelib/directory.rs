//! Directory entries and directory references.

use super::kinds::BlobType;
use super::{read_u16_le, read_u32_le};

/// One directory slot (12 bytes).
///
/// Local entries point at their blob. External entries carry the foreign
/// symbol in `name` and the foreign namespace string in `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirEntry {
    pub blob_type: u16,
    pub local: bool,
    pub name: u32,
    pub offset: u32,
}

impl DirEntry {
    pub const SIZE: usize = 12;

    pub fn blob_type(&self) -> Option<BlobType> {
        BlobType::from_u16(self.blob_type)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            blob_type: read_u16_le(bytes, 0),
            local: read_u16_le(bytes, 2) != 0,
            name: read_u32_le(bytes, 4),
            offset: read_u32_le(bytes, 8),
        }
    }

    pub fn to_bytes(&self) -> [u8; 12] {
        let mut bytes = [0u8; 12];
        bytes[0..2].copy_from_slice(&self.blob_type.to_le_bytes());
        bytes[2..4].copy_from_slice(&u16::from(self.local).to_le_bytes());
        bytes[4..8].copy_from_slice(&self.name.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.offset.to_le_bytes());
        bytes
    }
}

/// Reference to a directory slot as stored in blobs: `index + 1`, with 0
/// meaning "no entry".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirRef(u16);

impl DirRef {
    pub const NONE: Self = Self(0);

    /// Reference to the zero-based directory slot `index`.
    pub fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index + 1).ok().map(Self)
    }

    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Zero-based directory slot, `None` for the empty reference.
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl std::fmt::Display for DirRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
