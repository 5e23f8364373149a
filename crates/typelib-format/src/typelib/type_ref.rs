//! Inline type reference (8 bytes).
//!
//! Layout: `tag u8, flags u8, interface u16, offset u32`.
//! - `interface` is a directory ref for `TypeTag::Interface`, 0 otherwise
//! - `offset` is the absolute offset of the complex type blob, 0 otherwise

use super::kinds::TypeTag;
use super::{read_u16_le, read_u32_le};

/// Flag bit: the value is passed by pointer.
pub const POINTER: u8 = 1 << 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeRef {
    pub tag: u8,
    pub flags: u8,
    pub interface: u16,
    pub offset: u32,
}

impl TypeRef {
    pub const SIZE: usize = 8;

    /// The all-zero reference, used where a type slot is unused.
    pub const NONE: Self = Self {
        tag: 0,
        flags: 0,
        interface: 0,
        offset: 0,
    };

    pub fn simple(tag: TypeTag, pointer: bool) -> Self {
        Self {
            tag: tag as u8,
            flags: if pointer { POINTER } else { 0 },
            interface: 0,
            offset: 0,
        }
    }

    pub fn tag(&self) -> Option<TypeTag> {
        TypeTag::from_u8(self.tag)
    }

    pub fn is_pointer(&self) -> bool {
        self.flags & POINTER != 0
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            tag: bytes[0],
            flags: bytes[1],
            interface: read_u16_le(bytes, 2),
            offset: read_u32_le(bytes, 4),
        }
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0] = self.tag;
        bytes[1] = self.flags;
        bytes[2..4].copy_from_slice(&self.interface.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.offset.to_le_bytes());
        bytes
    }
}
