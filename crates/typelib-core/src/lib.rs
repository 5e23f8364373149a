#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Node forest consumed by the typelib compiler.
//!
//! Two layers:
//! - **Model**: [`Node`] and its member records, plus [`Type`] descriptors
//! - **Input**: a namespace document (`{ "namespace", "shared_library", "nodes" }`)
//!   deserialized with serde, as produced by an upstream parser

mod colors;
mod node;
mod types;


pub use colors::Colors;
pub use node::{
    Callback, Constant, Direction, Discriminator, Enum, ErrorDomain, Field, Function, Interface,
    Node, Object, Param, Property, ReturnValue, RunPhase, Signal, Signature, Struct, Transfer,
    Union, VFunc, Value,
};
pub use types::{Type, TypeKind};

use serde::Deserialize;

// ============================================================================
// Input Layer
// ============================================================================

/// One namespace worth of nodes, as handed over by the front-end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Namespace {
    #[serde(rename = "namespace")]
    pub name: String,
    #[serde(default)]
    pub shared_library: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
}

impl Namespace {
    /// Find a top-level node by name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name() == name)
    }
}

/// Parse a namespace document.
pub fn parse_namespace(json: &str) -> Result<Namespace, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse a bare JSON array of nodes.
pub fn parse_nodes(json: &str) -> Result<Vec<Node>, serde_json::Error> {
    serde_json::from_str(json)
}
