use std::fs;

use typelib_compiler::CompileOptions;

use super::CommandError;
use super::compile::{OutputFormat, compile_source};
use super::dump::{DumpArgs, dump_bytes, execute};

const COLOR: &str = r#"
{
  "namespace": "Demo",
  "nodes": [
    {
      "kind": "enum",
      "name": "Color",
      "values": [
        { "name": "red", "value": 0 },
        { "name": "green", "value": 1 }
      ]
    }
  ]
}
"#;

fn compiled() -> Vec<u8> {
    compile_source(COLOR, OutputFormat::Binary, &CompileOptions::new()).unwrap()
}

#[test]
fn dump_compiled_enum() {
    insta::assert_snapshot!(dump_bytes(compiled(), false).unwrap(), @r"
    [header]
    namespace Demo
    library   -
    version   1.0
    entries   1 (1 local)
    size      176

    [directory]
    #1 enum         Color

    [entries]
    #1 enum Color
      value red = 0
      value green = 1
    ");
}

#[test]
fn colored_dump_wraps_sections() {
    let text = dump_bytes(compiled(), true).unwrap();

    assert!(text.starts_with("\x1b[34m[header]\x1b[0m\n"));
}

#[test]
fn garbage_is_rejected() {
    let err = dump_bytes(vec![1, 2, 3], false).unwrap_err();

    assert!(matches!(err, CommandError::Load(_)));
    assert_eq!(
        err.to_string(),
        "invalid typelib: file too small: 3 bytes (minimum 96)"
    );
}

#[test]
fn execute_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Demo.typelib");
    fs::write(&path, compiled()).unwrap();

    execute(&DumpArgs {
        typelib_path: path,
        color: false,
    })
    .unwrap();
}
