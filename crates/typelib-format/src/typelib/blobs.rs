//! Fixed-size blob rows.
//!
//! Every row type decodes from the start of a byte slice. Trailing arrays
//! (enum values, object members, signature args, ...) are sequences of
//! rows laid out directly after the owning row, in a fixed order.

use super::type_ref::TypeRef;
use super::{read_i32_le, read_u16_le, read_u32_le};

/// A fixed-size row that can be decoded in place.
pub trait Blob: Sized {
    const SIZE: usize;

    fn from_bytes(bytes: &[u8]) -> Self;
}

impl Blob for TypeRef {
    const SIZE: usize = TypeRef::SIZE;

    fn from_bytes(bytes: &[u8]) -> Self {
        TypeRef::from_bytes(bytes)
    }
}

/// Flag bits, one module per row kind.
pub mod flags {
    pub mod function {
        pub const DEPRECATED: u16 = 1 << 0;
        pub const SETTER: u16 = 1 << 1;
        pub const GETTER: u16 = 1 << 2;
        pub const CONSTRUCTOR: u16 = 1 << 3;
        pub const WRAPS_VFUNC: u16 = 1 << 4;
        pub const METHOD: u16 = 1 << 5;
    }

    pub mod signal {
        pub const DEPRECATED: u16 = 1 << 0;
        pub const RUN_FIRST: u16 = 1 << 1;
        pub const RUN_LAST: u16 = 1 << 2;
        pub const RUN_CLEANUP: u16 = 1 << 3;
        pub const NO_RECURSE: u16 = 1 << 4;
        pub const DETAILED: u16 = 1 << 5;
        pub const ACTION: u16 = 1 << 6;
        pub const NO_HOOKS: u16 = 1 << 7;
        pub const HAS_CLASS_CLOSURE: u16 = 1 << 8;
        pub const TRUE_STOPS_EMIT: u16 = 1 << 9;
    }

    pub mod vfunc {
        pub const MUST_CHAIN_UP: u16 = 1 << 0;
        pub const MUST_BE_IMPLEMENTED: u16 = 1 << 1;
        pub const MUST_NOT_BE_IMPLEMENTED: u16 = 1 << 2;
        pub const CLASS_CLOSURE: u16 = 1 << 3;
        pub const HAS_SIGNAL: u16 = 1 << 4;
    }

    pub mod arg {
        pub const IN: u16 = 1 << 0;
        pub const OUT: u16 = 1 << 1;
        pub const DIPPER: u16 = 1 << 2;
        pub const NULL_OK: u16 = 1 << 3;
        pub const OPTIONAL: u16 = 1 << 4;
        pub const TRANSFER_OWNERSHIP: u16 = 1 << 5;
        pub const TRANSFER_CONTAINER_OWNERSHIP: u16 = 1 << 6;
        pub const RETURN_VALUE: u16 = 1 << 7;
    }

    pub mod signature {
        pub const MAY_RETURN_NULL: u16 = 1 << 0;
        pub const CALLER_OWNS_RETURN_VALUE: u16 = 1 << 1;
        pub const CALLER_OWNS_RETURN_CONTAINER: u16 = 1 << 2;
    }

    pub mod property {
        pub const DEPRECATED: u32 = 1 << 0;
        pub const READABLE: u32 = 1 << 1;
        pub const WRITABLE: u32 = 1 << 2;
        pub const CONSTRUCT: u32 = 1 << 3;
        pub const CONSTRUCT_ONLY: u32 = 1 << 4;
    }

    pub mod field {
        pub const READABLE: u8 = 1 << 0;
        pub const WRITABLE: u8 = 1 << 1;
    }

    /// Shared by value, callback, constant and error domain rows.
    pub const DEPRECATED: u16 = 1 << 0;

    pub mod value {
        pub const DEPRECATED: u32 = 1 << 0;
        /// The stored bits are an unsigned value.
        pub const UNSIGNED: u32 = 1 << 1;
    }

    /// Shared by enum, struct, union, object and interface rows.
    pub mod registered {
        pub const DEPRECATED: u16 = 1 << 0;
        pub const UNREGISTERED: u16 = 1 << 1;
        pub const DISCRIMINATED: u16 = 1 << 2;
    }

    pub mod array {
        pub const POINTER: u8 = 1 << 0;
        pub const ZERO_TERMINATED: u8 = 1 << 1;
        pub const HAS_LENGTH: u8 = 1 << 2;
    }
}

// ============================================================================
// Callables
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionBlob {
    pub blob_type: u16,
    pub flags: u16,
    /// Vfunc index when wrapping a vfunc, property index for accessors.
    pub index: u16,
    pub name: u32,
    pub symbol: u32,
    pub signature: u32,
}

impl Blob for FunctionBlob {
    const SIZE: usize = 20;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            blob_type: read_u16_le(bytes, 0),
            flags: read_u16_le(bytes, 2),
            index: read_u16_le(bytes, 4),
            name: read_u32_le(bytes, 8),
            symbol: read_u32_le(bytes, 12),
            signature: read_u32_le(bytes, 16),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallbackBlob {
    pub blob_type: u16,
    pub flags: u16,
    pub name: u32,
    pub signature: u32,
}

impl Blob for CallbackBlob {
    const SIZE: usize = 12;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            blob_type: read_u16_le(bytes, 0),
            flags: read_u16_le(bytes, 2),
            name: read_u32_le(bytes, 4),
            signature: read_u32_le(bytes, 8),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalBlob {
    pub flags: u16,
    /// Index of the class-closure vfunc within the owner.
    pub class_closure: u16,
    pub name: u32,
    pub signature: u32,
}

impl Blob for SignalBlob {
    const SIZE: usize = 12;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            flags: read_u16_le(bytes, 0),
            class_closure: read_u16_le(bytes, 2),
            name: read_u32_le(bytes, 4),
            signature: read_u32_le(bytes, 8),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VFuncBlob {
    pub name: u32,
    pub flags: u16,
    /// Index of the signal within the owner.
    pub signal: u16,
    pub struct_offset: u16,
    pub signature: u32,
}

impl Blob for VFuncBlob {
    const SIZE: usize = 16;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            name: read_u32_le(bytes, 0),
            flags: read_u16_le(bytes, 4),
            signal: read_u16_le(bytes, 6),
            struct_offset: read_u16_le(bytes, 8),
            signature: read_u32_le(bytes, 12),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArgBlob {
    pub name: u32,
    pub flags: u16,
    pub ty: TypeRef,
}

impl Blob for ArgBlob {
    const SIZE: usize = 16;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            name: read_u32_le(bytes, 0),
            flags: read_u16_le(bytes, 4),
            ty: TypeRef::from_bytes(&bytes[8..]),
        }
    }
}

/// Header of a signature blob, followed by `n_arguments` arg rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureBlob {
    pub return_type: TypeRef,
    pub flags: u16,
    pub n_arguments: u16,
}

impl Blob for SignatureBlob {
    const SIZE: usize = 16;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            return_type: TypeRef::from_bytes(bytes),
            flags: read_u16_le(bytes, 8),
            n_arguments: read_u16_le(bytes, 10),
        }
    }
}

// ============================================================================
// Members
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyBlob {
    pub name: u32,
    pub flags: u32,
    pub ty: TypeRef,
}

impl Blob for PropertyBlob {
    const SIZE: usize = 16;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            name: read_u32_le(bytes, 0),
            flags: read_u32_le(bytes, 4),
            ty: TypeRef::from_bytes(&bytes[8..]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldBlob {
    pub name: u32,
    pub flags: u8,
    pub bits: u8,
    pub struct_offset: u16,
    pub ty: TypeRef,
}

impl Blob for FieldBlob {
    const SIZE: usize = 16;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            name: read_u32_le(bytes, 0),
            flags: bytes[4],
            bits: bytes[5],
            struct_offset: read_u16_le(bytes, 6),
            ty: TypeRef::from_bytes(&bytes[8..]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueBlob {
    pub flags: u32,
    pub name: u32,
    /// Raw bit pattern; see [`ValueBlob::value`].
    pub bits: u32,
}

impl ValueBlob {
    pub fn is_unsigned(&self) -> bool {
        self.flags & flags::value::UNSIGNED != 0
    }

    pub fn value(&self) -> i64 {
        if self.is_unsigned() {
            i64::from(self.bits)
        } else {
            i64::from(self.bits as i32)
        }
    }
}

impl Blob for ValueBlob {
    const SIZE: usize = 12;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            flags: read_u32_le(bytes, 0),
            name: read_u32_le(bytes, 4),
            bits: read_u32_le(bytes, 8),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstantBlob {
    pub blob_type: u16,
    pub flags: u16,
    pub name: u32,
    pub ty: TypeRef,
    /// Byte length of the value.
    pub size: u32,
    /// Absolute offset of the value bytes.
    pub offset: u32,
}

impl Blob for ConstantBlob {
    const SIZE: usize = 24;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            blob_type: read_u16_le(bytes, 0),
            flags: read_u16_le(bytes, 2),
            name: read_u32_le(bytes, 4),
            ty: TypeRef::from_bytes(&bytes[8..]),
            size: read_u32_le(bytes, 16),
            offset: read_u32_le(bytes, 20),
        }
    }
}

// ============================================================================
// Registered types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorDomainBlob {
    pub blob_type: u16,
    pub flags: u16,
    pub name: u32,
    pub get_quark: u32,
    /// Directory ref of the code enum.
    pub error_codes: u16,
}

impl Blob for ErrorDomainBlob {
    const SIZE: usize = 16;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            blob_type: read_u16_le(bytes, 0),
            flags: read_u16_le(bytes, 2),
            name: read_u32_le(bytes, 4),
            get_quark: read_u32_le(bytes, 8),
            error_codes: read_u16_le(bytes, 12),
        }
    }
}

/// The common prefix of enum, struct, union, object and interface rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisteredHead {
    pub blob_type: u16,
    pub flags: u16,
    pub name: u32,
    pub gtype_name: u32,
    pub gtype_init: u32,
}

impl RegisteredHead {
    pub const SIZE: usize = 16;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            blob_type: read_u16_le(bytes, 0),
            flags: read_u16_le(bytes, 2),
            name: read_u32_le(bytes, 4),
            gtype_name: read_u32_le(bytes, 8),
            gtype_init: read_u32_le(bytes, 12),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumBlob {
    pub head: RegisteredHead,
    pub n_values: u16,
}

impl Blob for EnumBlob {
    const SIZE: usize = 20;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            head: RegisteredHead::from_bytes(bytes),
            n_values: read_u16_le(bytes, 16),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructBlob {
    pub head: RegisteredHead,
    pub n_fields: u16,
    pub n_methods: u16,
}

impl Blob for StructBlob {
    const SIZE: usize = 20;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            head: RegisteredHead::from_bytes(bytes),
            n_fields: read_u16_le(bytes, 16),
            n_methods: read_u16_le(bytes, 18),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnionBlob {
    pub head: RegisteredHead,
    pub n_fields: u16,
    pub n_functions: u16,
    pub n_discriminators: u16,
    pub discriminator_offset: i32,
    /// All zero for a union without discriminator.
    pub discriminator_type: TypeRef,
}

impl Blob for UnionBlob {
    const SIZE: usize = 36;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            head: RegisteredHead::from_bytes(bytes),
            n_fields: read_u16_le(bytes, 16),
            n_functions: read_u16_le(bytes, 18),
            n_discriminators: read_u16_le(bytes, 20),
            discriminator_offset: read_i32_le(bytes, 24),
            discriminator_type: TypeRef::from_bytes(&bytes[28..]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectBlob {
    pub head: RegisteredHead,
    pub parent: u16,
    pub n_interfaces: u16,
    pub n_fields: u16,
    pub n_properties: u16,
    pub n_methods: u16,
    pub n_signals: u16,
    pub n_vfuncs: u16,
    pub n_constants: u16,
}

impl Blob for ObjectBlob {
    const SIZE: usize = 36;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            head: RegisteredHead::from_bytes(bytes),
            parent: read_u16_le(bytes, 16),
            n_interfaces: read_u16_le(bytes, 18),
            n_fields: read_u16_le(bytes, 20),
            n_properties: read_u16_le(bytes, 22),
            n_methods: read_u16_le(bytes, 24),
            n_signals: read_u16_le(bytes, 26),
            n_vfuncs: read_u16_le(bytes, 28),
            n_constants: read_u16_le(bytes, 30),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterfaceBlob {
    pub head: RegisteredHead,
    pub n_prerequisites: u16,
    pub n_properties: u16,
    pub n_methods: u16,
    pub n_signals: u16,
    pub n_vfuncs: u16,
    pub n_constants: u16,
}

impl Blob for InterfaceBlob {
    const SIZE: usize = 32;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            head: RegisteredHead::from_bytes(bytes),
            n_prerequisites: read_u16_le(bytes, 16),
            n_properties: read_u16_le(bytes, 18),
            n_methods: read_u16_le(bytes, 20),
            n_signals: read_u16_le(bytes, 22),
            n_vfuncs: read_u16_le(bytes, 24),
            n_constants: read_u16_le(bytes, 26),
        }
    }
}

// ============================================================================
// Complex types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayTypeBlob {
    pub tag: u8,
    pub flags: u8,
    /// Index of the length parameter, valid with `HAS_LENGTH`.
    pub length: u16,
    pub element: TypeRef,
}

impl Blob for ArrayTypeBlob {
    const SIZE: usize = 16;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            tag: bytes[0],
            flags: bytes[1],
            length: read_u16_le(bytes, 2),
            element: TypeRef::from_bytes(&bytes[8..]),
        }
    }
}

/// List, slist or hash: followed by `n_types` type refs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamTypeBlob {
    pub tag: u8,
    pub flags: u8,
    pub n_types: u16,
}

impl Blob for ParamTypeBlob {
    const SIZE: usize = 8;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            tag: bytes[0],
            flags: bytes[1],
            n_types: read_u16_le(bytes, 2),
        }
    }
}

/// Followed by `n_domains` u16 directory refs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorTypeBlob {
    pub tag: u8,
    pub flags: u8,
    pub n_domains: u16,
}

impl Blob for ErrorTypeBlob {
    const SIZE: usize = 8;

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            tag: bytes[0],
            flags: bytes[1],
            n_domains: read_u16_le(bytes, 2),
        }
    }
}
