//! Interface-description nodes.
//!
//! The forest arrives already validated by an upstream parser. Cross-entity
//! references are plain strings: either a bare local name or a
//! `Namespace.Symbol` qualified name.

use serde::Deserialize;

use crate::types::Type;

// ============================================================================
// Node
// ============================================================================

/// One node of the forest.
///
/// Only the entry kinds (function through constant) may appear at the top
/// level of a namespace. Member kinds exist so that a forest can be handed
/// around generically; the compiler rejects them at the top level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Node {
    Function(Function),
    Callback(Callback),
    Struct(Struct),
    Boxed(Struct),
    Union(Union),
    Enum(Enum),
    Flags(Enum),
    Object(Object),
    Interface(Interface),
    ErrorDomain(ErrorDomain),
    Constant(Constant),
    Field(Field),
    Property(Property),
    Signal(Signal),
    #[serde(rename = "vfunc")]
    VFunc(VFunc),
    Param(Param),
    Value(Value),
    Type(Type),
}

impl Node {
    /// Name of the node. Type nodes are anonymous.
    pub fn name(&self) -> &str {
        match self {
            Node::Function(n) => &n.name,
            Node::Callback(n) => &n.name,
            Node::Struct(n) | Node::Boxed(n) => &n.name,
            Node::Union(n) => &n.name,
            Node::Enum(n) | Node::Flags(n) => &n.name,
            Node::Object(n) => &n.name,
            Node::Interface(n) => &n.name,
            Node::ErrorDomain(n) => &n.name,
            Node::Constant(n) => &n.name,
            Node::Field(n) => &n.name,
            Node::Property(n) => &n.name,
            Node::Signal(n) => &n.name,
            Node::VFunc(n) => &n.name,
            Node::Param(n) => &n.name,
            Node::Value(n) => &n.name,
            Node::Type(_) => "",
        }
    }

    /// Kind label as used in the JSON input.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Function(_) => "function",
            Node::Callback(_) => "callback",
            Node::Struct(_) => "struct",
            Node::Boxed(_) => "boxed",
            Node::Union(_) => "union",
            Node::Enum(_) => "enum",
            Node::Flags(_) => "flags",
            Node::Object(_) => "object",
            Node::Interface(_) => "interface",
            Node::ErrorDomain(_) => "error-domain",
            Node::Constant(_) => "constant",
            Node::Field(_) => "field",
            Node::Property(_) => "property",
            Node::Signal(_) => "signal",
            Node::VFunc(_) => "vfunc",
            Node::Param(_) => "param",
            Node::Value(_) => "value",
            Node::Type(_) => "type",
        }
    }
}

// ============================================================================
// Callables
// ============================================================================

/// Ownership transfer of a value crossing a call boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transfer {
    #[default]
    None,
    Container,
    Full,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    In,
    Out,
    InOut,
}

/// Return value of a callable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReturnValue {
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub may_return_null: bool,
    #[serde(default)]
    pub transfer: Transfer,
}

/// Parameter list and return type shared by every callable kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Signature {
    /// `None` means the callable returns void.
    #[serde(default)]
    pub result: Option<ReturnValue>,
    #[serde(default)]
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub null_ok: bool,
    #[serde(default)]
    pub optional: bool,
    /// Caller allocates the out value.
    #[serde(default)]
    pub dipper: bool,
    /// The parameter carries the logical return value.
    #[serde(default)]
    pub retval: bool,
    #[serde(default)]
    pub transfer: Transfer,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    /// Linker symbol of the implementation.
    pub symbol: String,
    #[serde(default)]
    pub method: bool,
    #[serde(default)]
    pub constructor: bool,
    #[serde(default)]
    pub getter: bool,
    #[serde(default)]
    pub setter: bool,
    /// Name of the vfunc this function invokes, resolved against the owner.
    #[serde(default)]
    pub wraps_vfunc: Option<String>,
    /// Property accessed by a getter or setter, resolved against the owner.
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub signature: Signature,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Callback {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub signature: Signature,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    First,
    #[default]
    Last,
    Cleanup,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Signal {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub run: RunPhase,
    #[serde(default)]
    pub no_recurse: bool,
    #[serde(default)]
    pub detailed: bool,
    #[serde(default)]
    pub action: bool,
    #[serde(default)]
    pub no_hooks: bool,
    #[serde(default)]
    pub true_stops_emit: bool,
    /// Vfunc of the owner acting as class closure.
    #[serde(default)]
    pub class_closure: Option<String>,
    #[serde(default)]
    pub signature: Signature,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VFunc {
    pub name: String,
    #[serde(default)]
    pub must_chain_up: bool,
    #[serde(default)]
    pub must_be_implemented: bool,
    #[serde(default)]
    pub must_not_be_implemented: bool,
    #[serde(default)]
    pub class_closure: bool,
    /// Signal of the owner this vfunc is the default handler for.
    #[serde(default)]
    pub signal: Option<String>,
    #[serde(default)]
    pub struct_offset: u16,
    #[serde(default)]
    pub signature: Signature,
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default)]
    pub writable: bool,
    /// Bitfield width, 0 for a regular field.
    #[serde(default)]
    pub bits: u8,
    #[serde(default)]
    pub struct_offset: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub construct: bool,
    #[serde(default)]
    pub construct_only: bool,
}

/// Enum or flags member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Value {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    /// Signed members and unsigned flag bits (up to `u32::MAX`) share one field.
    pub value: i64,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Entries
// ============================================================================

/// Plain struct or boxed type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Struct {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub gtype_name: Option<String>,
    #[serde(default)]
    pub gtype_init: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Function>,
}

/// Discriminator of a union: where the tag lives, its type, and one
/// constant per field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Discriminator {
    pub offset: i32,
    #[serde(rename = "type")]
    pub ty: Type,
    #[serde(default)]
    pub values: Vec<Constant>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Union {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub gtype_name: Option<String>,
    #[serde(default)]
    pub gtype_init: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub methods: Vec<Function>,
    #[serde(default)]
    pub discriminator: Option<Discriminator>,
}

/// Enum or flags type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub gtype_name: Option<String>,
    #[serde(default)]
    pub gtype_init: Option<String>,
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Object {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub gtype_name: Option<String>,
    #[serde(default)]
    pub gtype_init: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub methods: Vec<Function>,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default)]
    pub vfuncs: Vec<VFunc>,
    #[serde(default)]
    pub constants: Vec<Constant>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub gtype_name: Option<String>,
    #[serde(default)]
    pub gtype_init: Option<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub methods: Vec<Function>,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default)]
    pub vfuncs: Vec<VFunc>,
    #[serde(default)]
    pub constants: Vec<Constant>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorDomain {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    /// Function returning the domain quark.
    pub get_quark: String,
    /// Enum holding the error codes.
    pub codes: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Constant {
    pub name: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(rename = "type")]
    pub ty: Type,
    /// Literal value as written in the source description.
    pub value: String,
}
