//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use typelib_compiler::CompileOptions;

use super::ColorChoice;
use crate::commands::compile::{CompileArgs, OutputFormat};
use crate::commands::dump::DumpArgs;

pub struct CompileParams {
    pub forest_path: PathBuf,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub strict: bool,
    pub includes: Vec<String>,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            forest_path: m
                .get_one::<PathBuf>("forest_path")
                .cloned()
                .unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned(),
            format: parse_format(m),
            strict: m.get_flag("strict"),
            includes: m
                .get_many::<String>("include")
                .map(|v| v.cloned().collect())
                .unwrap_or_default(),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        let options = p
            .includes
            .into_iter()
            .fold(CompileOptions::new().strict(p.strict), |o, ns| o.include(ns));
        Self {
            forest_path: p.forest_path,
            output: p.output,
            format: p.format,
            options,
        }
    }
}

pub struct DumpParams {
    pub typelib_path: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            typelib_path: m
                .get_one::<PathBuf>("typelib_path")
                .cloned()
                .unwrap_or_default(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            typelib_path: p.typelib_path,
            color: p.color.should_colorize(),
        }
    }
}

/// Default log filter for a `-v` count.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("c") => OutputFormat::CSource,
        _ => OutputFormat::Binary,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
