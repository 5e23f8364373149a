//! Human-readable typelib dump for debugging and tests.

use std::fmt::Write as _;

use typelib_core::Colors;

use super::blobs::{
    ArrayTypeBlob, CallbackBlob, ConstantBlob, ErrorDomainBlob, ErrorTypeBlob, FieldBlob,
    FunctionBlob, ParamTypeBlob, PropertyBlob, RegisteredHead, SignalBlob, VFuncBlob, flags,
};
use super::directory::DirRef;
use super::kinds::{BlobType, TypeTag};
use super::type_ref::TypeRef;
use super::view::{Typelib, TypelibError};

/// Render a loaded typelib as text.
pub fn dump(lib: &Typelib, colors: Colors) -> Result<String, TypelibError> {
    let mut out = String::new();
    let ctx = DumpContext::new(lib, colors)?;

    dump_header(&mut out, lib, &ctx)?;
    dump_directory(&mut out, lib, &ctx);
    dump_entries(&mut out, lib, &ctx)?;

    Ok(out)
}

struct DumpContext {
    /// Display name per directory slot.
    names: Vec<String>,
    /// Width for directory refs.
    ref_width: usize,
    colors: Colors,
}

impl DumpContext {
    fn new(lib: &Typelib, colors: Colors) -> Result<Self, TypelibError> {
        let names = lib
            .entries()
            .map(|(r, _)| lib.entry_name(r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            ref_width: width_for_count(names.len()),
            names,
            colors,
        })
    }

    fn name_of(&self, r: DirRef) -> &str {
        r.index()
            .and_then(|i| self.names.get(i))
            .map_or("?", String::as_str)
    }

    fn fmt_ref(&self, r: DirRef) -> String {
        let w = self.ref_width;
        format!("#{:0w$}", r.raw())
    }

    fn type_name(&self, lib: &Typelib, ty: &TypeRef) -> Result<String, TypelibError> {
        let star = if ty.is_pointer() { "*" } else { "" };
        let Some(tag) = ty.tag() else {
            return Ok(format!("?{}", ty.tag));
        };

        let base = match tag {
            TypeTag::Interface => self.name_of(DirRef::from_raw(ty.interface)).to_string(),
            TypeTag::Array => {
                let blob: ArrayTypeBlob = lib.blob(ty.offset)?;
                let mut s = format!("array<{}>", self.type_name(lib, &blob.element)?);
                if blob.flags & flags::array::ZERO_TERMINATED != 0 {
                    s.push_str("[zt]");
                }
                if blob.flags & flags::array::HAS_LENGTH != 0 {
                    write!(s, "[len={}]", blob.length).unwrap();
                }
                s
            }
            TypeTag::List | TypeTag::SList | TypeTag::Hash => {
                let blob: ParamTypeBlob = lib.blob(ty.offset)?;
                let params = lib.rows::<TypeRef>(ty.offset + 8, blob.n_types)?;
                let params = params
                    .iter()
                    .map(|p| self.type_name(lib, p))
                    .collect::<Result<Vec<_>, _>>()?;
                format!("{}<{}>", tag.name(), params.join(", "))
            }
            TypeTag::Error => {
                let blob: ErrorTypeBlob = lib.blob(ty.offset)?;
                let domains = lib.dir_refs(ty.offset + 8, blob.n_domains)?;
                if domains.is_empty() {
                    "error".to_string()
                } else {
                    let names: Vec<_> = domains.iter().map(|&d| self.name_of(d)).collect();
                    format!("error<{}>", names.join(", "))
                }
            }
            basic => basic.name().to_string(),
        };

        Ok(format!("{base}{star}"))
    }

    /// `name(args) -> ret` for the signature blob at `offset`.
    fn callable(&self, lib: &Typelib, name: &str, offset: u32) -> Result<String, TypelibError> {
        let sig = lib.signature(offset)?;
        let mut args = Vec::with_capacity(sig.args.len());
        for arg in &sig.args {
            let dir = match (
                arg.flags & flags::arg::IN != 0,
                arg.flags & flags::arg::OUT != 0,
            ) {
                (true, true) => "inout ",
                (false, true) => "out ",
                _ => "",
            };
            args.push(format!(
                "{dir}{}: {}",
                lib.string(arg.name)?,
                self.type_name(lib, &arg.ty)?
            ));
        }
        Ok(format!(
            "{name}({}) -> {}",
            args.join(", "),
            self.type_name(lib, &sig.blob.return_type)?
        ))
    }
}

fn width_for_count(count: usize) -> usize {
    count.max(1).to_string().len()
}

fn dump_header(out: &mut String, lib: &Typelib, ctx: &DumpContext) -> Result<(), TypelibError> {
    let c = &ctx.colors;
    let h = lib.header();

    writeln!(out, "{}[header]{}", c.section, c.reset).unwrap();
    writeln!(out, "namespace {}{}{}", c.name, lib.namespace()?, c.reset).unwrap();
    writeln!(out, "library   {}", lib.shared_library()?.unwrap_or("-")).unwrap();
    writeln!(out, "version   {}.{}", h.major_version, h.minor_version).unwrap();
    writeln!(
        out,
        "entries   {} ({} local)",
        h.n_entries, h.n_local_entries
    )
    .unwrap();
    writeln!(out, "size      {}", h.size).unwrap();
    Ok(())
}

fn dump_directory(out: &mut String, lib: &Typelib, ctx: &DumpContext) {
    let c = &ctx.colors;

    writeln!(out).unwrap();
    writeln!(out, "{}[directory]{}", c.section, c.reset).unwrap();
    for (r, entry) in lib.entries() {
        let kind = if entry.local {
            entry.blob_type().map_or("?", BlobType::name)
        } else {
            "extern"
        };
        writeln!(
            out,
            "{} {}{kind:<12}{} {}",
            ctx.fmt_ref(r),
            c.dim,
            c.reset,
            ctx.name_of(r)
        )
        .unwrap();
    }
}

fn dump_entries(out: &mut String, lib: &Typelib, ctx: &DumpContext) -> Result<(), TypelibError> {
    let c = &ctx.colors;

    writeln!(out).unwrap();
    writeln!(out, "{}[entries]{}", c.section, c.reset).unwrap();
    for (r, entry) in lib.entries().filter(|(_, e)| e.local) {
        let Some(kind) = entry.blob_type() else {
            continue;
        };
        writeln!(
            out,
            "{} {} {}{}{}",
            ctx.fmt_ref(r),
            kind.name(),
            c.name,
            ctx.name_of(r),
            c.reset
        )
        .unwrap();
        dump_entry(out, lib, ctx, kind, entry.offset)?;
    }
    Ok(())
}

fn dump_entry(
    out: &mut String,
    lib: &Typelib,
    ctx: &DumpContext,
    kind: BlobType,
    offset: u32,
) -> Result<(), TypelibError> {
    match kind {
        BlobType::Invalid => {}
        BlobType::Function => {
            let f: FunctionBlob = lib.blob(offset)?;
            writeln!(out, "  symbol {}", lib.string(f.symbol)?).unwrap();
            dump_function(out, lib, ctx, "fn", &f)?;
        }
        BlobType::Callback => {
            let cb: CallbackBlob = lib.blob(offset)?;
            let line = ctx.callable(lib, lib.string(cb.name)?, cb.signature)?;
            writeln!(out, "  fn {line}").unwrap();
        }
        BlobType::Enum | BlobType::Flags => {
            let view = lib.enum_view(offset)?;
            dump_gtype(out, lib, &view.blob.head)?;
            for v in &view.values {
                writeln!(out, "  value {} = {}", lib.string(v.name)?, v.value()).unwrap();
            }
        }
        BlobType::Struct | BlobType::Boxed => {
            let view = lib.struct_view(offset)?;
            dump_gtype(out, lib, &view.blob.head)?;
            dump_fields(out, lib, ctx, &view.fields)?;
            for m in &view.methods {
                dump_function(out, lib, ctx, "method", m)?;
            }
        }
        BlobType::Union => {
            let view = lib.union_view(offset)?;
            dump_gtype(out, lib, &view.blob.head)?;
            dump_fields(out, lib, ctx, &view.fields)?;
            for m in &view.functions {
                dump_function(out, lib, ctx, "method", m)?;
            }
            if view.blob.head.flags & flags::registered::DISCRIMINATED != 0 {
                writeln!(
                    out,
                    "  discriminator {} @ {}",
                    ctx.type_name(lib, &view.blob.discriminator_type)?,
                    view.blob.discriminator_offset
                )
                .unwrap();
            }
            dump_constants(out, lib, ctx, &view.discriminators)?;
        }
        BlobType::Object => {
            let view = lib.object_view(offset)?;
            dump_gtype(out, lib, &view.blob.head)?;
            let parent = DirRef::from_raw(view.blob.parent);
            if !parent.is_none() {
                writeln!(out, "  parent {}", ctx.name_of(parent)).unwrap();
            }
            for &i in &view.interfaces {
                writeln!(out, "  implements {}", ctx.name_of(i)).unwrap();
            }
            dump_fields(out, lib, ctx, &view.fields)?;
            dump_properties(out, lib, ctx, &view.properties)?;
            for m in &view.methods {
                dump_function(out, lib, ctx, "method", m)?;
            }
            dump_signals(out, lib, ctx, &view.signals)?;
            dump_vfuncs(out, lib, ctx, &view.vfuncs)?;
            dump_constants(out, lib, ctx, &view.constants)?;
        }
        BlobType::Interface => {
            let view = lib.interface_view(offset)?;
            dump_gtype(out, lib, &view.blob.head)?;
            for &p in &view.prerequisites {
                writeln!(out, "  requires {}", ctx.name_of(p)).unwrap();
            }
            dump_properties(out, lib, ctx, &view.properties)?;
            for m in &view.methods {
                dump_function(out, lib, ctx, "method", m)?;
            }
            dump_signals(out, lib, ctx, &view.signals)?;
            dump_vfuncs(out, lib, ctx, &view.vfuncs)?;
            dump_constants(out, lib, ctx, &view.constants)?;
        }
        BlobType::Constant => {
            let k: ConstantBlob = lib.blob(offset)?;
            dump_constants(out, lib, ctx, std::slice::from_ref(&k))?;
        }
        BlobType::ErrorDomain => {
            let d: ErrorDomainBlob = lib.blob(offset)?;
            writeln!(out, "  quark {}", lib.string(d.get_quark)?).unwrap();
            writeln!(
                out,
                "  codes {}",
                ctx.name_of(DirRef::from_raw(d.error_codes))
            )
            .unwrap();
        }
    }
    Ok(())
}

fn dump_gtype(out: &mut String, lib: &Typelib, head: &RegisteredHead) -> Result<(), TypelibError> {
    let Some(name) = lib.optional_string(head.gtype_name)? else {
        return Ok(());
    };
    match lib.optional_string(head.gtype_init)? {
        Some(init) => writeln!(out, "  gtype {name} ({init})").unwrap(),
        None => writeln!(out, "  gtype {name}").unwrap(),
    }
    Ok(())
}

fn dump_function(
    out: &mut String,
    lib: &Typelib,
    ctx: &DumpContext,
    label: &str,
    f: &FunctionBlob,
) -> Result<(), TypelibError> {
    let line = ctx.callable(lib, lib.string(f.name)?, f.signature)?;
    writeln!(out, "  {label} {line}").unwrap();
    Ok(())
}

fn dump_fields(
    out: &mut String,
    lib: &Typelib,
    ctx: &DumpContext,
    fields: &[FieldBlob],
) -> Result<(), TypelibError> {
    for f in fields {
        let name = lib.string(f.name)?;
        let ty = ctx.type_name(lib, &f.ty)?;
        if f.bits > 0 {
            writeln!(out, "  field {name}: {ty} [bits={}]", f.bits).unwrap();
        } else {
            writeln!(out, "  field {name}: {ty}").unwrap();
        }
    }
    Ok(())
}

fn dump_properties(
    out: &mut String,
    lib: &Typelib,
    ctx: &DumpContext,
    properties: &[PropertyBlob],
) -> Result<(), TypelibError> {
    use flags::property::{CONSTRUCT, CONSTRUCT_ONLY, READABLE, WRITABLE};

    for p in properties {
        let mut mode = String::new();
        for (bit, ch) in [(READABLE, 'r'), (WRITABLE, 'w'), (CONSTRUCT, 'c'), (CONSTRUCT_ONLY, 'C')] {
            if p.flags & bit != 0 {
                mode.push(ch);
            }
        }
        writeln!(
            out,
            "  property {}: {} [{mode}]",
            lib.string(p.name)?,
            ctx.type_name(lib, &p.ty)?
        )
        .unwrap();
    }
    Ok(())
}

fn dump_signals(
    out: &mut String,
    lib: &Typelib,
    ctx: &DumpContext,
    signals: &[SignalBlob],
) -> Result<(), TypelibError> {
    for s in signals {
        let line = ctx.callable(lib, lib.string(s.name)?, s.signature)?;
        writeln!(out, "  signal {line}").unwrap();
    }
    Ok(())
}

fn dump_vfuncs(
    out: &mut String,
    lib: &Typelib,
    ctx: &DumpContext,
    vfuncs: &[VFuncBlob],
) -> Result<(), TypelibError> {
    for v in vfuncs {
        let line = ctx.callable(lib, lib.string(v.name)?, v.signature)?;
        writeln!(out, "  vfunc {line}").unwrap();
    }
    Ok(())
}

fn dump_constants(
    out: &mut String,
    lib: &Typelib,
    ctx: &DumpContext,
    constants: &[ConstantBlob],
) -> Result<(), TypelibError> {
    for k in constants {
        let value = format_value(k.ty.tag(), lib.constant_value(k)?);
        writeln!(
            out,
            "  const {}: {} = {value}",
            lib.string(k.name)?,
            ctx.type_name(lib, &k.ty)?
        )
        .unwrap();
    }
    Ok(())
}

/// Decode constant value bytes according to the constant's type tag.
fn format_value(tag: Option<TypeTag>, bytes: &[u8]) -> String {
    fn arr<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
        bytes.get(..N)?.try_into().ok()
    }

    let text = || {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        String::from_utf8_lossy(&bytes[..end]).into_owned()
    };

    let decoded = match tag {
        Some(TypeTag::Boolean) => arr(bytes).map(|b| (i32::from_le_bytes(b) != 0).to_string()),
        Some(TypeTag::Int8) => arr(bytes).map(|b| i8::from_le_bytes(b).to_string()),
        Some(TypeTag::Uint8) => arr(bytes).map(|b| u8::from_le_bytes(b).to_string()),
        Some(TypeTag::Int16) => arr(bytes).map(|b| i16::from_le_bytes(b).to_string()),
        Some(TypeTag::Uint16) => arr(bytes).map(|b| u16::from_le_bytes(b).to_string()),
        Some(TypeTag::Int32 | TypeTag::Int) => arr(bytes).map(|b| i32::from_le_bytes(b).to_string()),
        Some(TypeTag::Uint32 | TypeTag::Uint) => {
            arr(bytes).map(|b| u32::from_le_bytes(b).to_string())
        }
        Some(TypeTag::Int64 | TypeTag::Long | TypeTag::Ssize) => {
            arr(bytes).map(|b| i64::from_le_bytes(b).to_string())
        }
        Some(TypeTag::Uint64 | TypeTag::Ulong | TypeTag::Size) => {
            arr(bytes).map(|b| u64::from_le_bytes(b).to_string())
        }
        Some(TypeTag::Float) => arr(bytes).map(|b| f32::from_le_bytes(b).to_string()),
        Some(TypeTag::Double) => arr(bytes).map(|b| f64::from_le_bytes(b).to_string()),
        Some(TypeTag::Utf8 | TypeTag::Filename) => Some(format!("{:?}", text())),
        _ => Some(text()),
    };

    decoded.unwrap_or_else(|| format!("{bytes:02x?}"))
}
