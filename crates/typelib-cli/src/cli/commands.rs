//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("typelib")
        .about("Compile interface-description node forests into binary typelibs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(compile_command())
        .subcommand(dump_command())
}

/// Compile a namespace document into a typelib.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile a namespace document into a typelib")
        .override_usage(
            "\
  typelib compile <FOREST> [-o <FILE>]
  typelib compile <FOREST> --format c [-o <FILE>]
  typelib compile <FOREST> --strict -I <NAMESPACE>...",
        )
        .after_help(
            r#"EXAMPLES:
  typelib compile demo.json -o Demo-1.0.typelib
  typelib compile demo.json --format c -o demo-typelib.c
  typelib compile demo.json --strict -I GObject -I GLib
  RUST_LOG=typelib_compiler=debug typelib compile demo.json -o /dev/null"#,
        )
        .arg(forest_path_arg())
        .arg(output_file_arg())
        .arg(format_arg())
        .arg(strict_arg())
        .arg(include_arg())
}

/// Show the contents of a compiled typelib.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the contents of a compiled typelib")
        .override_usage("  typelib dump <TYPELIB> [--color <WHEN>]")
        .after_help(
            r#"EXAMPLES:
  typelib dump Demo-1.0.typelib
  typelib dump Demo-1.0.typelib --color never"#,
        )
        .arg(typelib_path_arg())
        .arg(color_arg())
}
