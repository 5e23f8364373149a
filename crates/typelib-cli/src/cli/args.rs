//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Node forest document (positional).
pub fn forest_path_arg() -> Arg {
    Arg::new("forest_path")
        .value_name("FOREST")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Namespace document (JSON node forest)")
}

/// Compiled typelib (positional).
pub fn typelib_path_arg() -> Arg {
    Arg::new("typelib_path")
        .value_name("TYPELIB")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Compiled typelib file")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file (default: stdout)")
}

/// Output format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("binary")
        .value_parser(["binary", "c"])
        .help("Output format: raw typelib bytes or C source with load hooks")
}

/// Reject unresolved names (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Reject names that resolve neither locally nor in an included namespace")
}

/// Foreign namespace external references may point into (--include).
pub fn include_arg() -> Arg {
    Arg::new("include")
        .short('I')
        .long("include")
        .value_name("NAMESPACE")
        .action(ArgAction::Append)
        .help("Namespace that external references may resolve into (repeatable)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .global(true)
        .action(ArgAction::Count)
        .help("Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides")
}
