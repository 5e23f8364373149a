//! Type descriptors attached to fields, properties, params and constants.

use serde::Deserialize;

/// A type as written in the interface description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Type {
    #[serde(default)]
    pub pointer: bool,
    #[serde(flatten)]
    pub kind: TypeKind,
}

/// Shape of a type.
///
/// Scalars are written inline wherever they are used. `Interface` names an
/// entry by its (possibly qualified) name. The remaining variants are
/// complex: they get their own deduplicated entry in the typelib.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum TypeKind {
    Void,
    Boolean,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Int,
    Uint,
    Long,
    Ulong,
    Ssize,
    Size,
    Float,
    Double,
    Utf8,
    Filename,
    Interface {
        name: String,
    },
    Array {
        element: Box<Type>,
        #[serde(default)]
        zero_terminated: bool,
        /// Index of the parameter carrying the array length.
        #[serde(default)]
        length: Option<u16>,
    },
    List {
        element: Box<Type>,
    },
    #[serde(rename = "slist")]
    SList {
        element: Box<Type>,
    },
    Hash {
        key: Box<Type>,
        value: Box<Type>,
    },
    Error {
        #[serde(default)]
        domains: Vec<String>,
    },
}

impl TypeKind {
    /// Array, list, hash and error types.
    pub fn is_complex(&self) -> bool {
        matches!(
            self,
            TypeKind::Array { .. }
                | TypeKind::List { .. }
                | TypeKind::SList { .. }
                | TypeKind::Hash { .. }
                | TypeKind::Error { .. }
        )
    }
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Self {
            pointer: false,
            kind,
        }
    }

    pub fn pointer(mut self) -> Self {
        self.pointer = true;
        self
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface { name: name.into() }).pointer()
    }

    pub fn array(element: Type) -> Self {
        Self::new(TypeKind::Array {
            element: Box::new(element),
            zero_terminated: false,
            length: None,
        })
        .pointer()
    }

    pub fn list(element: Type) -> Self {
        Self::new(TypeKind::List {
            element: Box::new(element),
        })
        .pointer()
    }

    pub fn hash(key: Type, value: Type) -> Self {
        Self::new(TypeKind::Hash {
            key: Box::new(key),
            value: Box::new(value),
        })
        .pointer()
    }

    pub fn error<S: Into<String>>(domains: impl IntoIterator<Item = S>) -> Self {
        Self::new(TypeKind::Error {
            domains: domains.into_iter().map(Into::into).collect(),
        })
        .pointer()
    }
}

impl From<TypeKind> for Type {
    fn from(kind: TypeKind) -> Self {
        Self::new(kind)
    }
}
