//! Test utilities: JSON fixtures in, artifacts and dumps out.

use typelib_core::{Colors, Namespace, parse_namespace};
use typelib_format::{Typelib, dump};

use crate::artifact::Artifact;
use crate::emit::{CompileError, CompileOptions, compile_namespace};

/// Parse a namespace document, panicking on malformed fixtures.
pub fn namespace(json: &str) -> Namespace {
    parse_namespace(json).expect("fixture must be a valid namespace document")
}

pub fn try_compile(json: &str, options: &CompileOptions) -> Result<Artifact, CompileError> {
    compile_namespace(&namespace(json), options)
}

pub fn compile_ok(json: &str) -> Artifact {
    try_compile(json, &CompileOptions::new()).expect("fixture must compile")
}

pub fn load(artifact: &Artifact) -> Typelib {
    Typelib::from_bytes(artifact.bytes().to_vec()).expect("artifact must load")
}

/// Dump from the `[directory]` section on; the header carries sizes that
/// shift with every layout change.
pub fn dump_body(json: &str) -> String {
    let lib = load(&compile_ok(json));
    let text = dump(&lib, Colors::OFF).expect("artifact must dump");
    let start = text
        .find("[directory]")
        .expect("dump has a directory section");
    text[start..].to_string()
}
