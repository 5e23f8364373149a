//! End-to-end emission tests: JSON forest in, loaded typelib out.

use indoc::indoc;
use typelib_format::blobs::{
    ArrayTypeBlob, Blob, CallbackBlob, ErrorDomainBlob, ErrorTypeBlob, FunctionBlob, ParamTypeBlob,
};
use typelib_format::{BlobType, DirRef, TypeRef, TypeTag, Typelib, flags};

use super::context::CompileContext;
use super::emitter::{assemble, build};
use super::options::CompileOptions;
use super::CompileError;
use crate::test_utils::{compile_ok, dump_body, load, namespace, try_compile};

fn local(lib: &Typelib, name: &str) -> u32 {
    lib.find_local(name)
        .unwrap_or_else(|| panic!("no local entry `{name}`"))
        .1
        .offset
}

#[test]
fn enum_with_three_values() {
    let ns = namespace(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            {
              "kind": "enum",
              "name": "Color",
              "values": [
                { "name": "red", "value": 0 },
                { "name": "green", "value": 1 },
                { "name": "blue", "value": 2 }
              ]
            }
          ]
        }
    "#});
    let options = CompileOptions::new();
    let mut ctx = CompileContext::new(&ns.name, None, &options);
    build(&mut ctx, &ns.nodes).unwrap();

    // namespace, enum name, three value names
    assert_eq!(ctx.pool().len(), 5);

    let lib = Typelib::from_bytes(assemble(ctx).unwrap()).unwrap();
    assert_eq!(lib.entry_count(), 1);
    assert_eq!(lib.local_entry_count(), 1);

    let entry = lib.entry(DirRef::from_raw(1)).unwrap();
    assert!(entry.local);
    assert_eq!(entry.blob_type(), Some(BlobType::Enum));
    assert_eq!(lib.enum_view(entry.offset).unwrap().blob.n_values, 3);
}

#[test]
fn flags_keep_the_high_bit() {
    let lib = load(&compile_ok(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            {
              "kind": "flags",
              "name": "Mode",
              "values": [
                { "name": "none", "value": 0 },
                { "name": "all", "value": -1 },
                { "name": "deprecated", "value": 2147483648 }
              ]
            }
          ]
        }
    "#}));

    let view = lib.enum_view(local(&lib, "Mode")).unwrap();
    let all = view.values[1];
    let high = view.values[2];

    assert!(!all.is_unsigned());
    assert_eq!(all.bits, u32::MAX);
    assert_eq!(all.value(), -1);
    assert!(high.is_unsigned());
    assert_eq!(high.flags & flags::value::UNSIGNED, flags::value::UNSIGNED);
    assert_eq!(high.bits, 1 << 31);
    assert_eq!(high.value(), 2_147_483_648);
}

#[test]
fn value_outside_32_bits_is_rejected() {
    let err = try_compile(
        indoc! {r#"
            {
              "namespace": "Demo",
              "nodes": [
                {
                  "kind": "flags",
                  "name": "Mode",
                  "values": [{ "name": "huge", "value": 4294967296 }]
                }
              ]
            }
        "#},
        &CompileOptions::new(),
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "`Mode` value `huge` out of range: 4294967296"
    );
}

#[test]
fn signatures_are_not_deduplicated() {
    let ns = namespace(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            {
              "kind": "function",
              "name": "add_one",
              "symbol": "demo_add_one",
              "signature": {
                "result": { "type": { "tag": "int" } },
                "params": [{ "name": "x", "type": { "tag": "int" } }]
              }
            },
            {
              "kind": "function",
              "name": "sub_one",
              "symbol": "demo_sub_one",
              "signature": {
                "result": { "type": { "tag": "int" } },
                "params": [{ "name": "x", "type": { "tag": "int" } }]
              }
            }
          ]
        }
    "#});
    let options = CompileOptions::new();
    let mut ctx = CompileContext::new(&ns.name, None, &options);
    build(&mut ctx, &ns.nodes).unwrap();

    assert_eq!(ctx.queues().pushed().signatures, 2);

    let lib = Typelib::from_bytes(assemble(ctx).unwrap()).unwrap();
    let add: FunctionBlob = lib.blob(local(&lib, "add_one")).unwrap();
    let sub: FunctionBlob = lib.blob(local(&lib, "sub_one")).unwrap();

    assert_ne!(add.signature, sub.signature);
    assert_eq!(
        lib.signature(add.signature).unwrap().blob,
        lib.signature(sub.signature).unwrap().blob
    );
}

#[test]
fn nested_array_pushes_two_complex_types() {
    let ns = namespace(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            {
              "kind": "struct",
              "name": "Matrix",
              "fields": [
                {
                  "name": "rows",
                  "type": {
                    "tag": "array",
                    "pointer": true,
                    "element": {
                      "tag": "array",
                      "pointer": true,
                      "element": { "tag": "int" }
                    }
                  }
                }
              ]
            }
          ]
        }
    "#});
    let options = CompileOptions::new();
    let mut ctx = CompileContext::new(&ns.name, None, &options);
    build(&mut ctx, &ns.nodes).unwrap();

    assert_eq!(ctx.queues().pushed().types, 2);
    assert_eq!(ctx.complex_type_count(), 2);
    assert!(ctx.queues().is_empty());

    let lib = Typelib::from_bytes(assemble(ctx).unwrap()).unwrap();
    let view = lib.struct_view(local(&lib, "Matrix")).unwrap();
    let outer_ref = view.fields[0].ty;
    assert_eq!(outer_ref.tag(), Some(TypeTag::Array));

    let outer: ArrayTypeBlob = lib.blob(outer_ref.offset).unwrap();
    assert_eq!(outer.element.tag(), Some(TypeTag::Array));
    assert_ne!(outer.element.offset, 0);
    assert_ne!(outer.element.offset, outer_ref.offset);

    let inner: ArrayTypeBlob = lib.blob(outer.element.offset).unwrap();
    assert_eq!(inner.element.tag(), Some(TypeTag::Int));
}

#[test]
fn object_parent_reference() {
    let lib = load(&compile_ok(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            { "kind": "struct", "name": "Base" },
            { "kind": "object", "name": "Orphan" },
            { "kind": "object", "name": "Child", "parent": "Base" }
          ]
        }
    "#}));

    let base = lib.find_local("Base").unwrap().0;
    let orphan = lib.object_view(local(&lib, "Orphan")).unwrap();
    let child = lib.object_view(local(&lib, "Child")).unwrap();

    assert_eq!(orphan.blob.parent, 0);
    assert_eq!(child.blob.parent, base.raw());
    assert_eq!(lib.entry_count(), 3);
}

#[test]
fn shared_complex_type_is_emitted_once() {
    let ns = namespace(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            {
              "kind": "struct",
              "name": "Bag",
              "fields": [
                { "name": "a", "type": { "tag": "list", "pointer": true, "element": { "tag": "int" } } },
                { "name": "b", "type": { "tag": "list", "pointer": true, "element": { "tag": "int" } } }
              ]
            },
            {
              "kind": "callback",
              "name": "Visit",
              "signature": {
                "params": [
                  { "name": "items", "type": { "tag": "list", "pointer": true, "element": { "tag": "int" } } }
                ]
              }
            }
          ]
        }
    "#});
    let options = CompileOptions::new();
    let mut ctx = CompileContext::new(&ns.name, None, &options);
    build(&mut ctx, &ns.nodes).unwrap();

    assert_eq!(ctx.queues().pushed().types, 1);

    let lib = Typelib::from_bytes(assemble(ctx).unwrap()).unwrap();
    let bag = lib.struct_view(local(&lib, "Bag")).unwrap();
    assert_eq!(bag.fields[0].ty.offset, bag.fields[1].ty.offset);
}

#[test]
fn aliased_error_domains_share_one_entry() {
    let lib = load(&compile_ok(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            { "kind": "error-domain", "name": "Quark", "get_quark": "demo_quark", "codes": "Code" },
            { "kind": "enum", "name": "Code" },
            {
              "kind": "struct",
              "name": "Failure",
              "fields": [
                { "name": "a", "type": { "tag": "error", "domains": ["Quark", "Demo.Quark"] } },
                { "name": "b", "type": { "tag": "error", "domains": ["Quark"] } }
              ]
            }
          ]
        }
    "#}));

    let quark = lib.find_local("Quark").unwrap().0;
    let failure = lib.struct_view(local(&lib, "Failure")).unwrap();
    let offset = failure.fields[0].ty.offset;
    assert_eq!(offset, failure.fields[1].ty.offset);

    let error: ErrorTypeBlob = lib.blob(offset).unwrap();
    assert_eq!(error.n_domains, 1);
    assert_eq!(lib.dir_refs(offset + ErrorTypeBlob::SIZE as u32, 1).unwrap(), [quark]);
}

#[test]
fn forward_reference_resolves_locally() {
    let lib = load(&compile_ok(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            {
              "kind": "struct",
              "name": "Node",
              "fields": [
                { "name": "next", "type": { "tag": "interface", "name": "Node", "pointer": true } },
                { "name": "owner", "type": { "tag": "interface", "name": "Tree", "pointer": true } }
              ]
            },
            { "kind": "struct", "name": "Tree" }
          ]
        }
    "#}));

    let tree = lib.find_local("Tree").unwrap().0;
    let node = lib.struct_view(local(&lib, "Node")).unwrap();

    assert_eq!(lib.entry_count(), 2);
    assert_eq!(DirRef::from_raw(node.fields[1].ty.interface), tree);
}

#[test]
fn locals_precede_externals() {
    let lib = load(&compile_ok(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            { "kind": "object", "name": "Button", "parent": "Gtk.Widget" },
            { "kind": "object", "name": "Label", "parent": "Gtk.Widget" }
          ]
        }
    "#}));

    assert_eq!(lib.entry_count(), 3);
    assert_eq!(lib.local_entry_count(), 2);

    let external = lib.entry(DirRef::from_raw(3)).unwrap();
    assert!(!external.local);
    assert_eq!(external.blob_type(), Some(BlobType::Invalid));
    assert_eq!(lib.entry_name(DirRef::from_raw(3)).unwrap(), "Gtk.Widget");
}

const REFERENCES: &str = r#"
{
  "namespace": "Demo",
  "nodes": [
    {
      "kind": "object",
      "name": "Canvas",
      "parent": "GObject.Object",
      "interfaces": ["Drawable", "Gio.Icon"],
      "fields": [
        { "name": "origin", "type": { "tag": "interface", "name": "Point" } },
        {
          "name": "layers",
          "type": {
            "tag": "hash",
            "pointer": true,
            "key": { "tag": "utf8", "pointer": true },
            "value": { "tag": "array", "element": { "tag": "interface", "name": "Gdk.Paintable", "pointer": true } }
          }
        }
      ],
      "properties": [{ "name": "origin", "type": { "tag": "interface", "name": "Point" } }],
      "methods": [
        {
          "name": "paint",
          "symbol": "demo_canvas_paint",
          "method": true,
          "signature": {
            "result": { "type": { "tag": "interface", "name": "Gsk.RenderNode", "pointer": true } },
            "params": [
              { "name": "at", "type": { "tag": "interface", "name": "Point", "pointer": true } },
              { "name": "error", "direction": "out", "type": { "tag": "error", "pointer": true, "domains": ["Failed", "GLib.IOError"] } }
            ]
          }
        }
      ],
      "signals": [
        {
          "name": "moved",
          "signature": { "params": [{ "name": "to", "type": { "tag": "slist", "pointer": true, "element": { "tag": "interface", "name": "Point" } } }] }
        }
      ],
      "vfuncs": [{ "name": "layout" }]
    },
    {
      "kind": "interface",
      "name": "Drawable",
      "prerequisites": ["GObject.Object", "Sized"],
      "properties": [{ "name": "size", "type": { "tag": "interface", "name": "Sized" } }]
    },
    { "kind": "interface", "name": "Sized" },
    { "kind": "struct", "name": "Point", "fields": [{ "name": "owner", "type": { "tag": "interface", "name": "Canvas", "pointer": true } }] },
    { "kind": "callback", "name": "Visit", "signature": { "params": [{ "name": "p", "type": { "tag": "interface", "name": "Point" } }] } },
    { "kind": "error-domain", "name": "Failed", "get_quark": "demo_failed_quark", "codes": "Code" },
    { "kind": "enum", "name": "Code" }
  ]
}
"#;

/// Walks every directory ref reachable from one artifact.
struct RefWalker<'l> {
    lib: &'l Typelib,
    checked: usize,
}

impl RefWalker<'_> {
    fn dir(&mut self, raw: u16, what: &str) {
        let n = self.lib.entry_count() as u16;
        assert!((1..=n).contains(&raw), "{what}: ref {raw} outside 1..={n}");
        self.lib.entry_name(DirRef::from_raw(raw)).unwrap();
        self.checked += 1;
    }

    fn dirs(&mut self, refs: &[DirRef], what: &str) {
        for r in refs {
            self.dir(r.raw(), what);
        }
    }

    fn ty(&mut self, ty: &TypeRef, what: &str) {
        let tag = ty.tag().unwrap();
        if tag == TypeTag::Interface {
            self.dir(ty.interface, what);
            return;
        }
        if !tag.is_complex() {
            return;
        }
        assert!((ty.offset as usize) < self.lib.bytes().len(), "{what}: offset out of range");
        match tag {
            TypeTag::Array => {
                let array: ArrayTypeBlob = self.lib.blob(ty.offset).unwrap();
                self.ty(&array.element, what);
            }
            TypeTag::Error => {
                let error: ErrorTypeBlob = self.lib.blob(ty.offset).unwrap();
                let domains = self
                    .lib
                    .dir_refs(ty.offset + ErrorTypeBlob::SIZE as u32, error.n_domains)
                    .unwrap();
                self.dirs(&domains, what);
            }
            _ => {
                let param: ParamTypeBlob = self.lib.blob(ty.offset).unwrap();
                let children: Vec<TypeRef> = self
                    .lib
                    .rows(ty.offset + ParamTypeBlob::SIZE as u32, param.n_types)
                    .unwrap();
                for child in &children {
                    self.ty(child, what);
                }
            }
        }
    }

    fn signature(&mut self, offset: u32, what: &str) {
        let sig = self.lib.signature(offset).unwrap();
        self.ty(&sig.blob.return_type, what);
        for arg in &sig.args {
            self.ty(&arg.ty, what);
        }
    }

    fn entry(&mut self, kind: BlobType, offset: u32) {
        let lib = self.lib;
        match kind {
            BlobType::Struct | BlobType::Boxed => {
                let view = lib.struct_view(offset).unwrap();
                for f in &view.fields {
                    self.ty(&f.ty, "struct field");
                }
            }
            BlobType::Object => {
                let view = lib.object_view(offset).unwrap();
                self.dir(view.blob.parent, "parent");
                self.dirs(&view.interfaces, "interface list");
                for f in &view.fields {
                    self.ty(&f.ty, "object field");
                }
                for p in &view.properties {
                    self.ty(&p.ty, "property");
                }
                for m in &view.methods {
                    self.signature(m.signature, "method");
                }
                for s in &view.signals {
                    self.signature(s.signature, "signal");
                }
                for v in &view.vfuncs {
                    self.signature(v.signature, "vfunc");
                }
            }
            BlobType::Interface => {
                let view = lib.interface_view(offset).unwrap();
                self.dirs(&view.prerequisites, "prerequisite list");
                for p in &view.properties {
                    self.ty(&p.ty, "property");
                }
            }
            BlobType::Callback => {
                let cb: CallbackBlob = lib.blob(offset).unwrap();
                self.signature(cb.signature, "callback");
            }
            BlobType::ErrorDomain => {
                let domain: ErrorDomainBlob = lib.blob(offset).unwrap();
                self.dir(domain.error_codes, "error codes");
            }
            _ => {}
        }
    }
}

#[test]
fn every_reference_lands_inside_the_artifact() {
    let artifact = compile_ok(REFERENCES);
    let lib = load(&artifact);
    let mut walker = RefWalker {
        lib: &lib,
        checked: 0,
    };

    for (r, entry) in lib.entries() {
        lib.entry_name(r).unwrap();
        if entry.local {
            assert!((entry.offset as usize) < artifact.len(), "{r} out of range");
            walker.entry(entry.blob_type().unwrap(), entry.offset);
        }
    }

    // Canvas: parent, 2 interfaces, 2 fields, property, method return,
    // `at` plus 2 error domains, signal element. Drawable: 2 prerequisites,
    // property. Point field, Visit arg, Failed codes.
    assert_eq!(walker.checked, 17);
    assert_eq!(lib.header().size as usize, artifact.len());
    assert_eq!(artifact.len() % 4, 0);
}

#[test]
fn compile_is_deterministic() {
    let first = compile_ok(ROUND_TRIP);
    let second = compile_ok(ROUND_TRIP);

    assert_eq!(first.bytes(), second.bytes());
}

#[test]
fn shared_library_is_recorded() {
    let lib = load(&compile_ok(ROUND_TRIP));

    assert_eq!(lib.namespace().unwrap(), "Demo");
    assert_eq!(lib.shared_library().unwrap(), Some("libdemo.so.0"));
}

#[test]
fn assemble_rejects_pending_bodies() {
    let ns = namespace(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [{ "kind": "callback", "name": "Notify" }]
        }
    "#});
    let options = CompileOptions::new();
    let mut ctx = CompileContext::new(&ns.name, None, &options);
    ctx.register_all(&ns.nodes).unwrap();
    ctx.write_entry(&ns.nodes[0]).unwrap();

    let err = assemble(ctx).unwrap_err();

    assert_eq!(
        err.to_string(),
        "internal error: 1 deferred bodies left at assembly"
    );
}

#[test]
fn strict_mode_requires_included_namespace() {
    let json = indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [{ "kind": "object", "name": "Button", "parent": "Gtk.Widget" }]
        }
    "#};

    let err = try_compile(json, &CompileOptions::new().strict(true)).unwrap_err();
    assert!(matches!(err, CompileError::UnresolvedName(name) if name == "Gtk.Widget"));

    let options = CompileOptions::new().strict(true).include("Gtk");
    assert!(try_compile(json, &options).is_ok());
}

#[test]
fn unknown_member_is_rejected() {
    let err = try_compile(
        indoc! {r#"
            {
              "namespace": "Demo",
              "nodes": [
                {
                  "kind": "object",
                  "name": "Widget",
                  "methods": [
                    { "name": "draw", "symbol": "demo_widget_draw", "wraps_vfunc": "missing" }
                  ]
                }
              ]
            }
        "#},
        &CompileOptions::new(),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "`Widget` has no vfunc named `missing`");
}

#[test]
fn duplicate_entry_is_rejected() {
    let err = try_compile(
        indoc! {r#"
            {
              "namespace": "Demo",
              "nodes": [
                { "kind": "enum", "name": "Color" },
                { "kind": "flags", "name": "Color" }
              ]
            }
        "#},
        &CompileOptions::new(),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "duplicate entry `Color`");
}

#[test]
fn member_kind_at_top_level_is_rejected() {
    let err = try_compile(
        indoc! {r#"
            {
              "namespace": "Demo",
              "nodes": [{ "kind": "field", "name": "x", "type": { "tag": "int" } }]
            }
        "#},
        &CompileOptions::new(),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "unexpected field node `x` at namespace level");
}

#[test]
fn invalid_constant_literal_is_rejected() {
    let err = try_compile(
        indoc! {r#"
            {
              "namespace": "Demo",
              "nodes": [
                { "kind": "constant", "name": "LIMIT", "type": { "tag": "uint8" }, "value": "300" }
              ]
            }
        "#},
        &CompileOptions::new(),
    )
    .unwrap_err();

    assert!(matches!(err, CompileError::InvalidConstant { name, .. } if name == "LIMIT"));
}

#[test]
fn union_discriminator() {
    insta::assert_snapshot!(dump_body(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            {
              "kind": "union",
              "name": "Value",
              "fields": [
                { "name": "i", "type": { "tag": "int32" } },
                { "name": "s", "type": { "tag": "utf8", "pointer": true } }
              ],
              "discriminator": {
                "offset": 0,
                "type": { "tag": "int32" },
                "values": [
                  { "name": "i", "type": { "tag": "int32" }, "value": "1" },
                  { "name": "s", "type": { "tag": "int32" }, "value": "2" }
                ]
              }
            },
            { "kind": "union", "name": "Plain" }
          ]
        }
    "#}), @r"
    [directory]
    #1 union        Value
    #2 union        Plain

    [entries]
    #1 union Value
      field i: int32
      field s: utf8*
      discriminator int32 @ 0
      const i: int32 = 1
      const s: int32 = 2
    #2 union Plain
    ");
}

#[test]
fn interface_with_prerequisites() {
    insta::assert_snapshot!(dump_body(indoc! {r#"
        {
          "namespace": "Demo",
          "nodes": [
            {
              "kind": "interface",
              "name": "Drawable",
              "gtype_name": "DemoDrawable",
              "gtype_init": "demo_drawable_get_type",
              "prerequisites": ["GObject.Object", "Sized"],
              "vfuncs": [
                {
                  "name": "draw",
                  "signature": {
                    "result": { "type": { "tag": "boolean" } },
                    "params": [
                      { "name": "scale", "type": { "tag": "double" } },
                      { "name": "area", "direction": "inout", "type": { "tag": "hash", "pointer": true, "key": { "tag": "utf8", "pointer": true }, "value": { "tag": "float" } } }
                    ]
                  }
                }
              ],
              "constants": [
                { "name": "VERSION", "type": { "tag": "utf8", "pointer": true }, "value": "1.0" }
              ]
            },
            { "kind": "interface", "name": "Sized" }
          ]
        }
    "#}), @r#"
    [directory]
    #1 interface    Drawable
    #2 interface    Sized
    #3 extern       GObject.Object

    [entries]
    #1 interface Drawable
      gtype DemoDrawable (demo_drawable_get_type)
      requires GObject.Object
      requires Sized
      vfunc draw(scale: double, inout area: hash<utf8*, float>*) -> boolean
      const VERSION: utf8* = "1.0"
    #2 interface Sized
    "#);
}

const ROUND_TRIP: &str = r#"
{
  "namespace": "Demo",
  "shared_library": "libdemo.so.0",
  "nodes": [
    {
      "kind": "enum",
      "name": "Color",
      "gtype_name": "DemoColor",
      "gtype_init": "demo_color_get_type",
      "values": [
        { "name": "red", "value": 0 },
        { "name": "green", "value": 1 }
      ]
    },
    {
      "kind": "struct",
      "name": "Point",
      "fields": [
        { "name": "x", "type": { "tag": "int" } },
        { "name": "y", "type": { "tag": "int" } }
      ]
    },
    {
      "kind": "object",
      "name": "Shape",
      "gtype_name": "DemoShape",
      "parent": "GObject.Object",
      "properties": [
        { "name": "color", "type": { "tag": "interface", "name": "Color" }, "writable": true }
      ],
      "methods": [
        {
          "name": "get_color",
          "symbol": "demo_shape_get_color",
          "method": true,
          "getter": true,
          "property": "color",
          "signature": { "result": { "type": { "tag": "interface", "name": "Color" } } }
        }
      ],
      "signals": [{ "name": "changed" }],
      "vfuncs": [
        {
          "name": "draw",
          "signature": {
            "params": [
              {
                "name": "points",
                "type": {
                  "tag": "list",
                  "pointer": true,
                  "element": { "tag": "interface", "name": "Point", "pointer": true }
                }
              }
            ]
          }
        }
      ]
    },
    {
      "kind": "function",
      "name": "parse",
      "symbol": "demo_parse",
      "signature": {
        "result": { "type": { "tag": "utf8", "pointer": true } },
        "params": [
          { "name": "text", "type": { "tag": "utf8", "pointer": true } },
          {
            "name": "error",
            "direction": "out",
            "type": { "tag": "error", "pointer": true, "domains": ["Demo.ParseError"] }
          }
        ]
      }
    },
    { "kind": "constant", "name": "MAX_POINTS", "type": { "tag": "int32" }, "value": "64" },
    {
      "kind": "error-domain",
      "name": "ParseError",
      "get_quark": "demo_parse_error_quark",
      "codes": "Color"
    }
  ]
}
"#;

#[test]
fn round_trip_dump() {
    insta::assert_snapshot!(dump_body(ROUND_TRIP), @r"
    [directory]
    #1 enum         Color
    #2 struct       Point
    #3 object       Shape
    #4 function     parse
    #5 constant     MAX_POINTS
    #6 error-domain ParseError
    #7 extern       GObject.Object

    [entries]
    #1 enum Color
      gtype DemoColor (demo_color_get_type)
      value red = 0
      value green = 1
    #2 struct Point
      field x: int
      field y: int
    #3 object Shape
      gtype DemoShape
      parent GObject.Object
      property color: Color [rw]
      method get_color() -> Color
      signal changed() -> void
      vfunc draw(points: list<Point*>*) -> void
    #4 function parse
      symbol demo_parse
      fn parse(text: utf8*, out error: error<ParseError>*) -> utf8*
    #5 constant MAX_POINTS
      const MAX_POINTS: int32 = 64
    #6 error-domain ParseError
      quark demo_parse_error_quark
      codes Color
    ");
}
