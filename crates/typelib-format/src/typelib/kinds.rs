//! Blob kinds and type tags.

/// Kind of a directory entry's blob.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u16)]
pub enum BlobType {
    /// Unknown kind. Used by external entries, whose kind is only known
    /// to the namespace that defines them.
    Invalid = 0,
    Function = 1,
    Callback = 2,
    Struct = 3,
    Boxed = 4,
    Enum = 5,
    Flags = 6,
    Object = 7,
    Interface = 8,
    Constant = 9,
    ErrorDomain = 10,
    Union = 11,
}

impl BlobType {
    pub fn from_u16(v: u16) -> Option<Self> {
        match v {
            0 => Some(Self::Invalid),
            1 => Some(Self::Function),
            2 => Some(Self::Callback),
            3 => Some(Self::Struct),
            4 => Some(Self::Boxed),
            5 => Some(Self::Enum),
            6 => Some(Self::Flags),
            7 => Some(Self::Object),
            8 => Some(Self::Interface),
            9 => Some(Self::Constant),
            10 => Some(Self::ErrorDomain),
            11 => Some(Self::Union),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Function => "function",
            Self::Callback => "callback",
            Self::Struct => "struct",
            Self::Boxed => "boxed",
            Self::Enum => "enum",
            Self::Flags => "flags",
            Self::Object => "object",
            Self::Interface => "interface",
            Self::Constant => "constant",
            Self::ErrorDomain => "error-domain",
            Self::Union => "union",
        }
    }
}

/// Type tag stored in inline type references and complex type blobs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum TypeTag {
    Void = 0,
    Boolean = 1,
    Int8 = 2,
    Uint8 = 3,
    Int16 = 4,
    Uint16 = 5,
    Int32 = 6,
    Uint32 = 7,
    Int64 = 8,
    Uint64 = 9,
    Int = 10,
    Uint = 11,
    Long = 12,
    Ulong = 13,
    Ssize = 14,
    Size = 15,
    Float = 16,
    Double = 17,
    Utf8 = 18,
    Filename = 19,
    Array = 20,
    Interface = 21,
    List = 22,
    SList = 23,
    Hash = 24,
    Error = 25,
}

impl TypeTag {
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::Void,
            1 => Self::Boolean,
            2 => Self::Int8,
            3 => Self::Uint8,
            4 => Self::Int16,
            5 => Self::Uint16,
            6 => Self::Int32,
            7 => Self::Uint32,
            8 => Self::Int64,
            9 => Self::Uint64,
            10 => Self::Int,
            11 => Self::Uint,
            12 => Self::Long,
            13 => Self::Ulong,
            14 => Self::Ssize,
            15 => Self::Size,
            16 => Self::Float,
            17 => Self::Double,
            18 => Self::Utf8,
            19 => Self::Filename,
            20 => Self::Array,
            21 => Self::Interface,
            22 => Self::List,
            23 => Self::SList,
            24 => Self::Hash,
            25 => Self::Error,
            _ => return None,
        })
    }

    /// Scalars and strings: fully described by the inline reference.
    pub fn is_basic(self) -> bool {
        (self as u8) <= Self::Filename as u8
    }

    /// Array, list, hash and error: described by a separate type blob.
    pub fn is_complex(self) -> bool {
        matches!(
            self,
            Self::Array | Self::List | Self::SList | Self::Hash | Self::Error
        )
    }

    /// Byte width of a constant value of this type, `None` for strings and
    /// non-basic tags.
    pub fn value_size(self) -> Option<usize> {
        match self {
            Self::Void => Some(0),
            Self::Int8 | Self::Uint8 => Some(1),
            Self::Int16 | Self::Uint16 => Some(2),
            Self::Boolean
            | Self::Int32
            | Self::Uint32
            | Self::Int
            | Self::Uint
            | Self::Float => Some(4),
            Self::Int64
            | Self::Uint64
            | Self::Long
            | Self::Ulong
            | Self::Ssize
            | Self::Size
            | Self::Double => Some(8),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Long => "long",
            Self::Ulong => "ulong",
            Self::Ssize => "ssize",
            Self::Size => "size",
            Self::Float => "float",
            Self::Double => "double",
            Self::Utf8 => "utf8",
            Self::Filename => "filename",
            Self::Array => "array",
            Self::Interface => "interface",
            Self::List => "list",
            Self::SList => "slist",
            Self::Hash => "hash",
            Self::Error => "error",
        }
    }
}
