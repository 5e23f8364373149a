//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Params extraction: correct fields are extracted from ArgMatches
//! 2. Defaults: binary output, permissive resolution, auto color
//! 3. Global verbosity is accepted before and after the subcommand

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{compile_command, dump_command};
use crate::commands::compile::{CompileArgs, OutputFormat};
use crate::commands::dump::DumpArgs;

#[test]
fn compile_defaults() {
    let m = compile_command()
        .try_get_matches_from(["compile", "demo.json"])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(params.forest_path, PathBuf::from("demo.json"));
    assert_eq!(params.output, None);
    assert_eq!(params.format, OutputFormat::Binary);
    assert!(!params.strict);
    assert!(params.includes.is_empty());
}

#[test]
fn compile_all_flags() {
    let m = compile_command()
        .try_get_matches_from([
            "compile",
            "demo.json",
            "-o",
            "demo.c",
            "--format",
            "c",
            "--strict",
            "-I",
            "GObject",
            "--include",
            "GLib",
        ])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(params.output, Some(PathBuf::from("demo.c")));
    assert_eq!(params.format, OutputFormat::CSource);
    assert!(params.strict);
    assert_eq!(params.includes, ["GObject", "GLib"]);
}

#[test]
fn compile_params_build_options() {
    let m = compile_command()
        .try_get_matches_from(["compile", "demo.json", "--strict", "-I", "Gtk"])
        .unwrap();
    let args: CompileArgs = CompileParams::from_matches(&m).into();

    assert!(args.options.is_strict());
    assert!(args.options.includes("Gtk"));
    assert!(!args.options.includes("Gdk"));
}

#[test]
fn compile_requires_forest() {
    let result = compile_command().try_get_matches_from(["compile"]);

    assert!(result.is_err());
}

#[test]
fn compile_rejects_unknown_format() {
    let result =
        compile_command().try_get_matches_from(["compile", "demo.json", "--format", "xml"]);

    assert!(result.is_err());
}

#[test]
fn dump_color_choices() {
    for (flag, expected) in [
        ("always", ColorChoice::Always),
        ("never", ColorChoice::Never),
        ("auto", ColorChoice::Auto),
    ] {
        let m = dump_command()
            .try_get_matches_from(["dump", "Demo.typelib", "--color", flag])
            .unwrap();
        assert_eq!(DumpParams::from_matches(&m).color, expected);
    }
}

#[test]
fn dump_params_into_args() {
    let m = dump_command()
        .try_get_matches_from(["dump", "Demo.typelib", "--color", "never"])
        .unwrap();
    let args: DumpArgs = DumpParams::from_matches(&m).into();

    assert_eq!(args.typelib_path, PathBuf::from("Demo.typelib"));
    assert!(!args.color);
}

#[test]
fn verbose_is_global() {
    let before = build_cli()
        .try_get_matches_from(["typelib", "-vv", "dump", "Demo.typelib"])
        .unwrap();
    assert_eq!(before.get_count("verbose"), 2);

    let after = build_cli()
        .try_get_matches_from(["typelib", "compile", "demo.json", "-v"])
        .unwrap();
    assert_eq!(after.get_count("verbose"), 1);
}

#[test]
fn verbosity_maps_to_level() {
    assert_eq!(log_level(0), "warn");
    assert_eq!(log_level(1), "info");
    assert_eq!(log_level(2), "debug");
    assert_eq!(log_level(5), "trace");
}

#[test]
fn subcommand_is_required() {
    let result = build_cli().try_get_matches_from(["typelib"]);

    assert!(result.is_err());
}
