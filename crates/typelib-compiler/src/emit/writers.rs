//! Entry writers.
//!
//! Each writer emits a fixed-size row followed by its child arrays, in the
//! order the loader expects. Signatures, complex types and constant values
//! are not written inline: the row gets a relocated offset and the body is
//! queued for the drain loop.

use typelib_core::{
    Callback, Constant, Direction, Enum, ErrorDomain, Field, Function, Interface, Node, Object,
    Property, RunPhase, Signal, Signature, Struct, Transfer, Type, TypeKind, Union, VFunc, Value,
};
use typelib_format::blobs::{
    ArgBlob, ArrayTypeBlob, Blob, CallbackBlob, ConstantBlob, EnumBlob, ErrorDomainBlob,
    ErrorTypeBlob, FieldBlob, FunctionBlob, InterfaceBlob, ObjectBlob, ParamTypeBlob,
    PropertyBlob, SignalBlob, SignatureBlob, StructBlob, UnionBlob, VFuncBlob, ValueBlob,
};
use typelib_format::{BlobType, TypeRef, TypeTag, flags};

use super::CompileError;
use super::canon::{pointer_flag, tag_of};
use super::context::CompileContext;
use super::directory::EntryId;
use super::value::encode_constant;

/// Directory kind of a top-level node, `None` for member-only kinds.
pub fn blob_type_of(node: &Node) -> Option<BlobType> {
    Some(match node {
        Node::Function(_) => BlobType::Function,
        Node::Callback(_) => BlobType::Callback,
        Node::Struct(_) => BlobType::Struct,
        Node::Boxed(_) => BlobType::Boxed,
        Node::Union(_) => BlobType::Union,
        Node::Enum(_) => BlobType::Enum,
        Node::Flags(_) => BlobType::Flags,
        Node::Object(_) => BlobType::Object,
        Node::Interface(_) => BlobType::Interface,
        Node::ErrorDomain(_) => BlobType::ErrorDomain,
        Node::Constant(_) => BlobType::Constant,
        Node::Field(_)
        | Node::Property(_)
        | Node::Signal(_)
        | Node::VFunc(_)
        | Node::Param(_)
        | Node::Value(_)
        | Node::Type(_) => return None,
    })
}

/// Member lists of the entry being written, for index references from
/// functions, signals and vfuncs.
#[derive(Clone, Copy, Debug)]
struct Owner<'n> {
    name: &'n str,
    properties: &'n [Property],
    signals: &'n [Signal],
    vfuncs: &'n [VFunc],
}

impl<'n> Owner<'n> {
    fn bare(name: &'n str) -> Self {
        Self {
            name,
            properties: &[],
            signals: &[],
            vfuncs: &[],
        }
    }

    fn property_index(&self, name: &str) -> Result<u16, CompileError> {
        self.index("property", self.properties.iter().map(|p| p.name.as_str()), name)
    }

    fn signal_index(&self, name: &str) -> Result<u16, CompileError> {
        self.index("signal", self.signals.iter().map(|s| s.name.as_str()), name)
    }

    fn vfunc_index(&self, name: &str) -> Result<u16, CompileError> {
        self.index("vfunc", self.vfuncs.iter().map(|v| v.name.as_str()), name)
    }

    fn index<'i>(
        &self,
        kind: &'static str,
        mut names: impl Iterator<Item = &'i str>,
        name: &str,
    ) -> Result<u16, CompileError> {
        names
            .position(|n| n == name)
            .and_then(|i| u16::try_from(i).ok())
            .ok_or_else(|| CompileError::UnknownMember {
                owner: self.name.to_string(),
                kind,
                name: name.to_string(),
            })
    }
}

fn count(owner: &str, kind: &'static str, n: usize) -> Result<u16, CompileError> {
    u16::try_from(n).map_err(|_| CompileError::TooManyMembers {
        owner: owner.to_string(),
        kind,
        count: n,
    })
}

fn registered_flags(deprecated: bool, gtype_name: Option<&String>) -> u16 {
    let mut f = 0;
    if deprecated {
        f |= flags::registered::DEPRECATED;
    }
    if gtype_name.is_none() {
        f |= flags::registered::UNREGISTERED;
    }
    f
}

fn deprecated_flag(deprecated: bool) -> u16 {
    if deprecated { flags::DEPRECATED } else { 0 }
}

fn transfer_flags(transfer: Transfer, full: u16, container: u16) -> u16 {
    match transfer {
        Transfer::None => 0,
        Transfer::Container => container,
        Transfer::Full => full,
    }
}

impl<'a> CompileContext<'a> {
    /// Register every top-level node before any body is written, so forward
    /// references resolve locally and locals take the first directory slots.
    pub fn register_all(&mut self, nodes: &'a [Node]) -> Result<(), CompileError> {
        for node in nodes {
            let Some(blob_type) = blob_type_of(node) else {
                return Err(CompileError::UnexpectedNode {
                    kind: node.kind_name(),
                    name: node.name().to_string(),
                });
            };
            self.directory
                .register_local(node.name(), blob_type, &mut self.pool)?;
        }
        Ok(())
    }

    /// Write the body of a registered top-level node.
    pub fn write_entry(&mut self, node: &'a Node) -> Result<(), CompileError> {
        let Some(symbol) = self.directory.lookup(node.name()) else {
            return Err(CompileError::Internal(format!(
                "entry `{}` written before registration",
                node.name()
            )));
        };

        let start = self.body.begin_entry(symbol.entry_id);
        tracing::debug!(
            "{} `{}` as {} at +{start:#x}",
            node.kind_name(),
            node.name(),
            symbol.dir
        );

        match node {
            Node::Function(f) => self.write_function(f, &Owner::bare(&f.name)),
            Node::Callback(cb) => self.write_callback(cb),
            Node::Struct(s) => self.write_struct(s, BlobType::Struct),
            Node::Boxed(s) => self.write_struct(s, BlobType::Boxed),
            Node::Union(u) => self.write_union(u),
            Node::Enum(e) => self.write_enum(e, BlobType::Enum),
            Node::Flags(e) => self.write_enum(e, BlobType::Flags),
            Node::Object(o) => self.write_object(o),
            Node::Interface(i) => self.write_interface(i),
            Node::ErrorDomain(d) => self.write_error_domain(d),
            Node::Constant(c) => self.write_constant(c),
            _ => Err(CompileError::UnexpectedNode {
                kind: node.kind_name(),
                name: node.name().to_string(),
            }),
        }
    }

    /// Write every queued body until all queues are empty at once.
    pub fn drain(&mut self) -> Result<usize, CompileError> {
        let mut drained = 0;
        loop {
            if let Some((ty, id)) = self.queues.pop_type() {
                self.write_type_blob(ty, id)?;
            } else if let Some((signature, id)) = self.queues.pop_signature() {
                self.write_signature_blob(signature, id)?;
            } else if let Some((constant, id)) = self.queues.pop_constant() {
                self.write_constant_value(constant, id)?;
            } else {
                break;
            }
            drained += 1;
        }
        if drained > 0 {
            tracing::debug!("drained {drained} deferred bodies");
        }
        Ok(drained)
    }

    // ------------------------------------------------------------------------
    // Callables
    // ------------------------------------------------------------------------

    fn defer_signature(&mut self, signature: &'a Signature) {
        let id = self.allocate_id();
        self.queues.push_signature(signature, id);
        self.body.entry_ref(id);
    }

    fn write_function(&mut self, f: &'a Function, owner: &Owner<'a>) -> Result<(), CompileError> {
        use flags::function::*;

        let mut bits = 0;
        for (set, bit) in [
            (f.deprecated, DEPRECATED),
            (f.setter, SETTER),
            (f.getter, GETTER),
            (f.constructor, CONSTRUCTOR),
            (f.wraps_vfunc.is_some(), WRAPS_VFUNC),
            (f.method, METHOD),
        ] {
            if set {
                bits |= bit;
            }
        }

        let index = match (&f.wraps_vfunc, &f.property) {
            (Some(vfunc), _) => owner.vfunc_index(vfunc)?,
            (None, Some(property)) => owner.property_index(property)?,
            (None, None) => 0,
        };

        let start = self.body.len();
        self.body.u16(BlobType::Function as u16);
        self.body.u16(bits);
        self.body.u16(index);
        self.body.u16(0);
        self.str_field(&f.name);
        self.str_field(&f.symbol);
        self.defer_signature(&f.signature);
        self.ensure_row("function", start, FunctionBlob::SIZE);
        Ok(())
    }

    fn write_callback(&mut self, cb: &'a Callback) -> Result<(), CompileError> {
        let start = self.body.len();
        self.body.u16(BlobType::Callback as u16);
        self.body.u16(deprecated_flag(cb.deprecated));
        self.str_field(&cb.name);
        self.defer_signature(&cb.signature);
        self.ensure_row("callback", start, CallbackBlob::SIZE);
        Ok(())
    }

    fn write_signal(&mut self, s: &'a Signal, owner: &Owner<'a>) -> Result<(), CompileError> {
        use flags::signal::*;

        let run = match s.run {
            RunPhase::First => RUN_FIRST,
            RunPhase::Last => RUN_LAST,
            RunPhase::Cleanup => RUN_CLEANUP,
        };
        let mut bits = run;
        for (set, bit) in [
            (s.deprecated, DEPRECATED),
            (s.no_recurse, NO_RECURSE),
            (s.detailed, DETAILED),
            (s.action, ACTION),
            (s.no_hooks, NO_HOOKS),
            (s.class_closure.is_some(), HAS_CLASS_CLOSURE),
            (s.true_stops_emit, TRUE_STOPS_EMIT),
        ] {
            if set {
                bits |= bit;
            }
        }
        let class_closure = match &s.class_closure {
            Some(vfunc) => owner.vfunc_index(vfunc)?,
            None => 0,
        };

        let start = self.body.len();
        self.body.u16(bits);
        self.body.u16(class_closure);
        self.str_field(&s.name);
        self.defer_signature(&s.signature);
        self.ensure_row("signal", start, SignalBlob::SIZE);
        Ok(())
    }

    fn write_vfunc(&mut self, v: &'a VFunc, owner: &Owner<'a>) -> Result<(), CompileError> {
        use flags::vfunc::*;

        let mut bits = 0;
        for (set, bit) in [
            (v.must_chain_up, MUST_CHAIN_UP),
            (v.must_be_implemented, MUST_BE_IMPLEMENTED),
            (v.must_not_be_implemented, MUST_NOT_BE_IMPLEMENTED),
            (v.class_closure, CLASS_CLOSURE),
            (v.signal.is_some(), HAS_SIGNAL),
        ] {
            if set {
                bits |= bit;
            }
        }
        let signal = match &v.signal {
            Some(signal) => owner.signal_index(signal)?,
            None => 0,
        };

        let start = self.body.len();
        self.str_field(&v.name);
        self.body.u16(bits);
        self.body.u16(signal);
        self.body.u16(v.struct_offset);
        self.body.u16(0);
        self.defer_signature(&v.signature);
        self.ensure_row("vfunc", start, VFuncBlob::SIZE);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------------

    fn write_field(&mut self, f: &'a Field) -> Result<(), CompileError> {
        let mut bits = 0;
        if f.readable {
            bits |= flags::field::READABLE;
        }
        if f.writable {
            bits |= flags::field::WRITABLE;
        }

        let start = self.body.len();
        self.str_field(&f.name);
        self.body.u8(bits);
        self.body.u8(f.bits);
        self.body.u16(f.struct_offset);
        self.type_field(&f.ty)?;
        self.ensure_row("field", start, FieldBlob::SIZE);
        Ok(())
    }

    fn write_property(&mut self, p: &'a Property) -> Result<(), CompileError> {
        use flags::property::*;

        let mut bits = 0;
        for (set, bit) in [
            (p.deprecated, DEPRECATED),
            (p.readable, READABLE),
            (p.writable, WRITABLE),
            (p.construct, CONSTRUCT),
            (p.construct_only, CONSTRUCT_ONLY),
        ] {
            if set {
                bits |= bit;
            }
        }

        let start = self.body.len();
        self.str_field(&p.name);
        self.body.u32(bits);
        self.type_field(&p.ty)?;
        self.ensure_row("property", start, PropertyBlob::SIZE);
        Ok(())
    }

    fn write_value(&mut self, owner: &str, v: &Value) -> Result<(), CompileError> {
        let mut bits = u32::from(deprecated_flag(v.deprecated));
        let raw = if let Ok(signed) = i32::try_from(v.value) {
            signed as u32
        } else if let Ok(unsigned) = u32::try_from(v.value) {
            bits |= flags::value::UNSIGNED;
            unsigned
        } else {
            return Err(CompileError::ValueOutOfRange {
                owner: owner.to_string(),
                name: v.name.clone(),
                value: v.value,
            });
        };

        let start = self.body.len();
        self.body.u32(bits);
        self.str_field(&v.name);
        self.body.u32(raw);
        self.ensure_row("value", start, ValueBlob::SIZE);
        Ok(())
    }

    /// Constant row; the value bytes are queued.
    fn write_constant(&mut self, c: &'a Constant) -> Result<(), CompileError> {
        // validated here so a bad literal fails before anything is queued
        let size = encode_constant(c)?.len() as u32;

        let start = self.body.len();
        self.body.u16(BlobType::Constant as u16);
        self.body.u16(deprecated_flag(c.deprecated));
        self.str_field(&c.name);
        self.type_field(&c.ty)?;
        self.body.u32(size);
        let id = self.allocate_id();
        self.queues.push_constant(c, id);
        self.body.entry_ref(id);
        self.ensure_row("constant", start, ConstantBlob::SIZE);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Registered types
    // ------------------------------------------------------------------------

    fn write_head(
        &mut self,
        blob_type: BlobType,
        flags: u16,
        name: &str,
        gtype_name: Option<&String>,
        gtype_init: Option<&String>,
    ) {
        self.body.u16(blob_type as u16);
        self.body.u16(flags);
        self.str_field(name);
        self.opt_str_field(gtype_name.map(String::as_str));
        self.opt_str_field(gtype_init.map(String::as_str));
    }

    fn write_enum(&mut self, e: &'a Enum, blob_type: BlobType) -> Result<(), CompileError> {
        let n_values = count(&e.name, "values", e.values.len())?;

        let start = self.body.len();
        let head_flags = registered_flags(e.deprecated, e.gtype_name.as_ref());
        self.write_head(
            blob_type,
            head_flags,
            &e.name,
            e.gtype_name.as_ref(),
            e.gtype_init.as_ref(),
        );
        self.body.u16(n_values);
        self.body.u16(0);
        self.ensure_row("enum", start, EnumBlob::SIZE);

        let rows = self.body.len();
        for v in &e.values {
            self.write_value(&e.name, v)?;
        }
        self.ensure_rows("value", rows, e.values.len(), ValueBlob::SIZE);
        Ok(())
    }

    fn write_struct(&mut self, s: &'a Struct, blob_type: BlobType) -> Result<(), CompileError> {
        let n_fields = count(&s.name, "fields", s.fields.len())?;
        let n_methods = count(&s.name, "methods", s.methods.len())?;

        let start = self.body.len();
        let head_flags = registered_flags(s.deprecated, s.gtype_name.as_ref());
        self.write_head(
            blob_type,
            head_flags,
            &s.name,
            s.gtype_name.as_ref(),
            s.gtype_init.as_ref(),
        );
        self.body.u16(n_fields);
        self.body.u16(n_methods);
        self.ensure_row("struct", start, StructBlob::SIZE);

        self.write_fields(&s.fields)?;
        self.write_methods(&s.methods, &Owner::bare(&s.name))
    }

    fn write_union(&mut self, u: &'a Union) -> Result<(), CompileError> {
        let n_fields = count(&u.name, "fields", u.fields.len())?;
        let n_functions = count(&u.name, "methods", u.methods.len())?;
        let discriminators = u.discriminator.as_ref().map_or(&[][..], |d| d.values.as_slice());
        let n_discriminators = count(&u.name, "discriminators", discriminators.len())?;

        let mut head_flags = registered_flags(u.deprecated, u.gtype_name.as_ref());
        if u.discriminator.is_some() {
            head_flags |= flags::registered::DISCRIMINATED;
        }

        let start = self.body.len();
        self.write_head(
            BlobType::Union,
            head_flags,
            &u.name,
            u.gtype_name.as_ref(),
            u.gtype_init.as_ref(),
        );
        self.body.u16(n_fields);
        self.body.u16(n_functions);
        self.body.u16(n_discriminators);
        self.body.u16(0);
        match &u.discriminator {
            Some(d) => {
                self.body.i32(d.offset);
                self.type_field(&d.ty)?;
            }
            None => {
                self.body.i32(0);
                self.body.type_ref(TypeRef::NONE, None);
            }
        }
        self.ensure_row("union", start, UnionBlob::SIZE);

        self.write_fields(&u.fields)?;
        self.write_methods(&u.methods, &Owner::bare(&u.name))?;
        self.write_constants(discriminators)
    }

    fn write_object(&mut self, o: &'a Object) -> Result<(), CompileError> {
        let counts = [
            count(&o.name, "interfaces", o.interfaces.len())?,
            count(&o.name, "fields", o.fields.len())?,
            count(&o.name, "properties", o.properties.len())?,
            count(&o.name, "methods", o.methods.len())?,
            count(&o.name, "signals", o.signals.len())?,
            count(&o.name, "vfuncs", o.vfuncs.len())?,
            count(&o.name, "constants", o.constants.len())?,
        ];

        let start = self.body.len();
        let head_flags = registered_flags(o.deprecated, o.gtype_name.as_ref());
        self.write_head(
            BlobType::Object,
            head_flags,
            &o.name,
            o.gtype_name.as_ref(),
            o.gtype_init.as_ref(),
        );
        self.dir_field(o.parent.as_deref())?;
        for n in counts {
            self.body.u16(n);
        }
        self.body.u32(0);
        self.ensure_row("object", start, ObjectBlob::SIZE);

        self.write_dir_list(&o.interfaces)?;

        let owner = Owner {
            name: &o.name,
            properties: &o.properties,
            signals: &o.signals,
            vfuncs: &o.vfuncs,
        };
        self.write_fields(&o.fields)?;
        self.write_properties(&o.properties)?;
        self.write_methods(&o.methods, &owner)?;
        self.write_signals(&o.signals, &owner)?;
        self.write_vfuncs(&o.vfuncs, &owner)?;
        self.write_constants(&o.constants)
    }

    fn write_interface(&mut self, i: &'a Interface) -> Result<(), CompileError> {
        let counts = [
            count(&i.name, "prerequisites", i.prerequisites.len())?,
            count(&i.name, "properties", i.properties.len())?,
            count(&i.name, "methods", i.methods.len())?,
            count(&i.name, "signals", i.signals.len())?,
            count(&i.name, "vfuncs", i.vfuncs.len())?,
            count(&i.name, "constants", i.constants.len())?,
        ];

        let start = self.body.len();
        let head_flags = registered_flags(i.deprecated, i.gtype_name.as_ref());
        self.write_head(
            BlobType::Interface,
            head_flags,
            &i.name,
            i.gtype_name.as_ref(),
            i.gtype_init.as_ref(),
        );
        for n in counts {
            self.body.u16(n);
        }
        self.body.u32(0);
        self.ensure_row("interface", start, InterfaceBlob::SIZE);

        self.write_dir_list(&i.prerequisites)?;

        let owner = Owner {
            name: &i.name,
            properties: &i.properties,
            signals: &i.signals,
            vfuncs: &i.vfuncs,
        };
        self.write_properties(&i.properties)?;
        self.write_methods(&i.methods, &owner)?;
        self.write_signals(&i.signals, &owner)?;
        self.write_vfuncs(&i.vfuncs, &owner)?;
        self.write_constants(&i.constants)
    }

    fn write_error_domain(&mut self, d: &'a ErrorDomain) -> Result<(), CompileError> {
        let start = self.body.len();
        self.body.u16(BlobType::ErrorDomain as u16);
        self.body.u16(deprecated_flag(d.deprecated));
        self.str_field(&d.name);
        self.str_field(&d.get_quark);
        self.dir_field(Some(&d.codes))?;
        self.body.u16(0);
        self.ensure_row("error_domain", start, ErrorDomainBlob::SIZE);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Child arrays
    // ------------------------------------------------------------------------

    /// u16 directory refs, padded to the blob alignment.
    fn write_dir_list(&mut self, names: &[String]) -> Result<(), CompileError> {
        for name in names {
            self.dir_field(Some(name))?;
        }
        self.body.align();
        Ok(())
    }

    fn write_fields(&mut self, fields: &'a [Field]) -> Result<(), CompileError> {
        let rows = self.body.len();
        for f in fields {
            self.write_field(f)?;
        }
        self.ensure_rows("field", rows, fields.len(), FieldBlob::SIZE);
        Ok(())
    }

    fn write_properties(&mut self, properties: &'a [Property]) -> Result<(), CompileError> {
        let rows = self.body.len();
        for p in properties {
            self.write_property(p)?;
        }
        self.ensure_rows("property", rows, properties.len(), PropertyBlob::SIZE);
        Ok(())
    }

    fn write_methods(
        &mut self,
        methods: &'a [Function],
        owner: &Owner<'a>,
    ) -> Result<(), CompileError> {
        let rows = self.body.len();
        for m in methods {
            self.write_function(m, owner)?;
        }
        self.ensure_rows("function", rows, methods.len(), FunctionBlob::SIZE);
        Ok(())
    }

    fn write_signals(&mut self, signals: &'a [Signal], owner: &Owner<'a>) -> Result<(), CompileError> {
        let rows = self.body.len();
        for s in signals {
            self.write_signal(s, owner)?;
        }
        self.ensure_rows("signal", rows, signals.len(), SignalBlob::SIZE);
        Ok(())
    }

    fn write_vfuncs(&mut self, vfuncs: &'a [VFunc], owner: &Owner<'a>) -> Result<(), CompileError> {
        let rows = self.body.len();
        for v in vfuncs {
            self.write_vfunc(v, owner)?;
        }
        self.ensure_rows("vfunc", rows, vfuncs.len(), VFuncBlob::SIZE);
        Ok(())
    }

    fn write_constants(&mut self, constants: &'a [Constant]) -> Result<(), CompileError> {
        let rows = self.body.len();
        for c in constants {
            self.write_constant(c)?;
        }
        self.ensure_rows("constant", rows, constants.len(), ConstantBlob::SIZE);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Deferred bodies
    // ------------------------------------------------------------------------

    fn write_type_blob(&mut self, ty: &'a Type, id: EntryId) -> Result<(), CompileError> {
        let tag = tag_of(&ty.kind);
        let pointer = pointer_flag(ty.pointer);
        let start = self.body.begin_entry(id);

        match &ty.kind {
            TypeKind::Array {
                element,
                zero_terminated,
                length,
            } => {
                let mut bits = pointer;
                if *zero_terminated {
                    bits |= flags::array::ZERO_TERMINATED;
                }
                if length.is_some() {
                    bits |= flags::array::HAS_LENGTH;
                }
                self.body.u8(tag as u8);
                self.body.u8(bits);
                self.body.u16(length.unwrap_or(0));
                self.body.u32(0);
                self.type_field(element)?;
                self.ensure_row("array_type", start, ArrayTypeBlob::SIZE);
            }
            TypeKind::List { element } | TypeKind::SList { element } => {
                self.body.u8(tag as u8);
                self.body.u8(pointer);
                self.body.u16(1);
                self.body.u32(0);
                self.ensure_row("param_type", start, ParamTypeBlob::SIZE);
                self.type_field(element)?;
            }
            TypeKind::Hash { key, value } => {
                self.body.u8(tag as u8);
                self.body.u8(pointer);
                self.body.u16(2);
                self.body.u32(0);
                self.ensure_row("param_type", start, ParamTypeBlob::SIZE);
                self.type_field(key)?;
                self.type_field(value)?;
            }
            TypeKind::Error { domains } => {
                let domains = self.resolve_domains(domains)?;
                self.body.u8(tag as u8);
                self.body.u8(pointer);
                self.body.u16(count("error", "domains", domains.len())?);
                self.body.u32(0);
                self.ensure_row("error_type", start, ErrorTypeBlob::SIZE);
                for dir in domains {
                    self.body.u16(dir.raw());
                }
                self.body.align();
            }
            _ => {
                return Err(CompileError::Internal(format!(
                    "{} queued as a complex type",
                    tag.name()
                )));
            }
        }
        Ok(())
    }

    fn write_signature_blob(
        &mut self,
        signature: &'a Signature,
        id: EntryId,
    ) -> Result<(), CompileError> {
        use flags::signature::*;

        let n_arguments = count("signature", "arguments", signature.params.len())?;
        let start = self.body.begin_entry(id);

        let mut bits = 0;
        match &signature.result {
            Some(result) => {
                self.type_field(&result.ty)?;
                if result.may_return_null {
                    bits |= MAY_RETURN_NULL;
                }
                bits |= transfer_flags(
                    result.transfer,
                    CALLER_OWNS_RETURN_VALUE,
                    CALLER_OWNS_RETURN_CONTAINER,
                );
            }
            None => self
                .body
                .type_ref(TypeRef::simple(TypeTag::Void, false), None),
        }
        self.body.u16(bits);
        self.body.u16(n_arguments);
        self.body.u32(0);
        self.ensure_row("signature", start, SignatureBlob::SIZE);

        let rows = self.body.len();
        for param in &signature.params {
            use flags::arg::*;

            let mut bits = match param.direction {
                Direction::In => IN,
                Direction::Out => OUT,
                Direction::InOut => IN | OUT,
            };
            for (set, bit) in [
                (param.dipper, DIPPER),
                (param.null_ok, NULL_OK),
                (param.optional, OPTIONAL),
                (param.retval, RETURN_VALUE),
            ] {
                if set {
                    bits |= bit;
                }
            }
            bits |= transfer_flags(
                param.transfer,
                TRANSFER_OWNERSHIP,
                TRANSFER_CONTAINER_OWNERSHIP,
            );

            self.str_field(&param.name);
            self.body.u16(bits);
            self.body.u16(0);
            self.type_field(&param.ty)?;
        }
        self.ensure_rows("arg", rows, signature.params.len(), ArgBlob::SIZE);
        Ok(())
    }

    fn write_constant_value(&mut self, c: &'a Constant, id: EntryId) -> Result<(), CompileError> {
        let bytes = encode_constant(c)?;
        self.body.begin_entry(id);
        self.body.raw(&bytes);
        Ok(())
    }
}
