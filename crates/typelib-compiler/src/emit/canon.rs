//! Type canonicalization.
//!
//! Every type use becomes an inline 8-byte reference:
//! - scalars carry only tag and pointer flag
//! - interface types carry the directory ref of the named entry
//! - complex types (array, list, slist, hash, error) point at a separate
//!   blob, shared by all structurally identical uses

use std::fmt::Write as _;

use typelib_core::{Type, TypeKind};
use typelib_format::{DirRef, TypeRef, TypeTag, type_ref};

use super::CompileError;
use super::context::CompileContext;
use super::directory::EntryId;

/// Canonical form of one type use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeSlot {
    Simple { tag: TypeTag, pointer: bool },
    Symbol { pointer: bool, dir: DirRef },
    Complex { tag: TypeTag, pointer: bool, entry: EntryId },
}

impl TypeSlot {
    /// Inline reference, plus the body its offset field must point at.
    pub fn to_type_ref(self) -> (TypeRef, Option<EntryId>) {
        match self {
            TypeSlot::Simple { tag, pointer } => (TypeRef::simple(tag, pointer), None),
            TypeSlot::Symbol { pointer, dir } => {
                let mut r = TypeRef::simple(TypeTag::Interface, pointer);
                r.interface = dir.raw();
                (r, None)
            }
            TypeSlot::Complex {
                tag,
                pointer,
                entry,
            } => (TypeRef::simple(tag, pointer), Some(entry)),
        }
    }

    pub fn entry(self) -> Option<EntryId> {
        match self {
            TypeSlot::Complex { entry, .. } => Some(entry),
            _ => None,
        }
    }
}

/// Binary tag for a type shape.
pub fn tag_of(kind: &TypeKind) -> TypeTag {
    match kind {
        TypeKind::Void => TypeTag::Void,
        TypeKind::Boolean => TypeTag::Boolean,
        TypeKind::Int8 => TypeTag::Int8,
        TypeKind::Uint8 => TypeTag::Uint8,
        TypeKind::Int16 => TypeTag::Int16,
        TypeKind::Uint16 => TypeTag::Uint16,
        TypeKind::Int32 => TypeTag::Int32,
        TypeKind::Uint32 => TypeTag::Uint32,
        TypeKind::Int64 => TypeTag::Int64,
        TypeKind::Uint64 => TypeTag::Uint64,
        TypeKind::Int => TypeTag::Int,
        TypeKind::Uint => TypeTag::Uint,
        TypeKind::Long => TypeTag::Long,
        TypeKind::Ulong => TypeTag::Ulong,
        TypeKind::Ssize => TypeTag::Ssize,
        TypeKind::Size => TypeTag::Size,
        TypeKind::Float => TypeTag::Float,
        TypeKind::Double => TypeTag::Double,
        TypeKind::Utf8 => TypeTag::Utf8,
        TypeKind::Filename => TypeTag::Filename,
        TypeKind::Interface { .. } => TypeTag::Interface,
        TypeKind::Array { .. } => TypeTag::Array,
        TypeKind::List { .. } => TypeTag::List,
        TypeKind::SList { .. } => TypeTag::SList,
        TypeKind::Hash { .. } => TypeTag::Hash,
        TypeKind::Error { .. } => TypeTag::Error,
    }
}

impl<'a> CompileContext<'a> {
    /// Error domains as directory refs, sorted and deduplicated by ref so
    /// that aliases of one entry collapse.
    pub(crate) fn resolve_domains(
        &mut self,
        domains: &[String],
    ) -> Result<Vec<DirRef>, CompileError> {
        let mut refs = domains
            .iter()
            .map(|domain| self.resolve(domain))
            .collect::<Result<Vec<_>, _>>()?;
        refs.sort_unstable();
        refs.dedup();
        Ok(refs)
    }

    /// Canonicalize one type use. A complex type seen for the first time is
    /// queued for emission; later uses share its entry.
    pub fn canonicalize(&mut self, ty: &'a Type) -> Result<TypeSlot, CompileError> {
        let tag = tag_of(&ty.kind);
        let pointer = ty.pointer;

        if let TypeKind::Interface { name } = &ty.kind {
            let dir = self.resolve(name)?;
            return Ok(TypeSlot::Symbol { pointer, dir });
        }
        if !ty.kind.is_complex() {
            return Ok(TypeSlot::Simple { tag, pointer });
        }

        let key = self.canonical_signature(ty)?;
        if let Some(&entry) = self.type_cache.get(&key) {
            return Ok(TypeSlot::Complex {
                tag,
                pointer,
                entry,
            });
        }

        let entry = self.allocate_id();
        tracing::trace!("complex type {entry}: {key}");
        self.type_cache.insert(key, entry);
        self.queues.push_type(ty, entry);
        Ok(TypeSlot::Complex {
            tag,
            pointer,
            entry,
        })
    }

    /// Canonicalize and write the inline reference into the body.
    pub(crate) fn type_field(&mut self, ty: &'a Type) -> Result<(), CompileError> {
        let (r, target) = self.canonicalize(ty)?.to_type_ref();
        self.body.type_ref(r, target);
        Ok(())
    }

    /// Structural key of a type. Interface names are keyed by directory
    /// slot so that `Foo` and `Ns.Foo` naming the same entry compare equal.
    pub fn canonical_signature(&mut self, ty: &Type) -> Result<String, CompileError> {
        let mut out = String::new();
        self.write_signature(&mut out, ty)?;
        Ok(out)
    }

    fn write_signature(&mut self, out: &mut String, ty: &Type) -> Result<(), CompileError> {
        out.push_str(tag_of(&ty.kind).name());
        match &ty.kind {
            TypeKind::Interface { name } => {
                let dir = self.resolve(name)?;
                write!(out, "{dir}").unwrap();
            }
            TypeKind::Array {
                element,
                zero_terminated,
                length,
            } => {
                if *zero_terminated {
                    out.push_str("[zt]");
                }
                if let Some(len) = length {
                    write!(out, "[len={len}]").unwrap();
                }
                out.push('(');
                self.write_signature(out, element)?;
                out.push(')');
            }
            TypeKind::List { element } | TypeKind::SList { element } => {
                out.push('(');
                self.write_signature(out, element)?;
                out.push(')');
            }
            TypeKind::Hash { key, value } => {
                out.push('(');
                self.write_signature(out, key)?;
                out.push(',');
                self.write_signature(out, value)?;
                out.push(')');
            }
            TypeKind::Error { domains } => {
                out.push('(');
                for (i, dir) in self.resolve_domains(domains)?.into_iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write!(out, "{dir}").unwrap();
                }
                out.push(')');
            }
            _ => {}
        }
        if ty.pointer {
            out.push('*');
        }
        Ok(())
    }
}

/// Flags byte of a complex type blob.
pub(crate) fn pointer_flag(pointer: bool) -> u8 {
    if pointer { type_ref::POINTER } else { 0 }
}
