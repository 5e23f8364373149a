//! C rendering of a typelib.
//!
//! Produces a translation unit holding the typelib as a byte array, plus a
//! constructor that loads it into the default repository when the library
//! loads and a destructor that frees it on unload.

use std::fmt::Write as _;

use crate::artifact::Artifact;

const BYTES_PER_LINE: usize = 12;

/// Render the artifact as C source.
pub fn render(artifact: &Artifact) -> String {
    let ident = c_identifier(artifact.namespace());
    let namespace = c_string(artifact.namespace());
    let bytes = artifact.bytes();
    let mut out = String::new();

    writeln!(
        out,
        "/* typelib for namespace {} */",
        artifact.namespace().replace("*/", "* /")
    )
    .unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#include <girepository.h>").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "static const guint8 {ident}_typelib_data[{}] = {{",
        bytes.len()
    )
    .unwrap();
    for line in bytes.chunks(BYTES_PER_LINE) {
        let cells: Vec<_> = line.iter().map(|b| format!("0x{b:02x}")).collect();
        writeln!(out, "  {},", cells.join(", ")).unwrap();
    }
    writeln!(out, "}};").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "static GITypelib *{ident}_typelib;").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "__attribute__((constructor)) static void").unwrap();
    writeln!(out, "register_{ident}_typelib (void)").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "  GError *error = NULL;").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "  {ident}_typelib = g_typelib_new_from_const_memory ("
    )
    .unwrap();
    writeln!(
        out,
        "      {ident}_typelib_data, sizeof ({ident}_typelib_data), &error);"
    )
    .unwrap();
    writeln!(out, "  if ({ident}_typelib == NULL").unwrap();
    writeln!(
        out,
        "      || g_irepository_load_typelib (NULL, {ident}_typelib, 0, &error) == NULL)"
    )
    .unwrap();
    writeln!(out, "    {{").unwrap();
    writeln!(
        out,
        "      g_warning (\"failed to load typelib %s: %s\", {namespace}, error->message);"
    )
    .unwrap();
    writeln!(out, "      g_clear_error (&error);").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "__attribute__((destructor)) static void").unwrap();
    writeln!(out, "unregister_{ident}_typelib (void)").unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "  g_clear_pointer (&{ident}_typelib, g_typelib_free);").unwrap();
    writeln!(out, "}}").unwrap();

    out
}

/// Quoted C string literal. Non-printable bytes use three-digit octal
/// escapes, which cannot run into a following digit.
pub(crate) fn c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for b in s.bytes() {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'?' => out.push_str("\\?"),
            0x20..=0x7e => out.push(b as char),
            _ => write!(out, "\\{b:03o}").unwrap(),
        }
    }
    out.push('"');
    out
}

/// Lowercase identifier derived from a namespace name.
pub(crate) fn c_identifier(namespace: &str) -> String {
    let mut ident: String = namespace
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}
