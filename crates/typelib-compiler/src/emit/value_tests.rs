use typelib_core::{Constant, Type, TypeKind};

use super::CompileError;
use super::value::encode_constant;

fn constant(kind: TypeKind, value: &str) -> Constant {
    Constant {
        name: "K".to_string(),
        deprecated: false,
        ty: Type::new(kind),
        value: value.to_string(),
    }
}

fn encode(kind: TypeKind, value: &str) -> Vec<u8> {
    encode_constant(&constant(kind, value)).unwrap()
}

#[test]
fn booleans_are_four_bytes() {
    assert_eq!(encode(TypeKind::Boolean, "true"), [1, 0, 0, 0]);
    assert_eq!(encode(TypeKind::Boolean, "FALSE"), [0, 0, 0, 0]);
}

#[test]
fn integers_use_declared_width() {
    assert_eq!(encode(TypeKind::Int8, "-1"), [0xff]);
    assert_eq!(encode(TypeKind::Uint16, "258"), [2, 1]);
    assert_eq!(encode(TypeKind::Int32, "10"), [10, 0, 0, 0]);
    assert_eq!(encode(TypeKind::Uint, "7"), [7, 0, 0, 0]);
    assert_eq!(encode(TypeKind::Long, "-2"), (-2i64).to_le_bytes());
    assert_eq!(encode(TypeKind::Size, " 42 "), 42u64.to_le_bytes());
}

#[test]
fn floats() {
    assert_eq!(encode(TypeKind::Float, "1.5"), 1.5f32.to_le_bytes());
    assert_eq!(encode(TypeKind::Double, "-0.25"), (-0.25f64).to_le_bytes());
}

#[test]
fn strings_are_nul_terminated() {
    assert_eq!(encode(TypeKind::Utf8, "hi"), b"hi\0");
    assert_eq!(encode(TypeKind::Filename, ""), b"\0");
}

#[test]
fn other_types_store_literal_text() {
    let kind = TypeKind::Interface {
        name: "Color".to_string(),
    };

    assert_eq!(encode(kind, "RED"), b"RED\0");
}

#[test]
fn out_of_range_literal_is_rejected() {
    let err = encode_constant(&constant(TypeKind::Uint8, "300")).unwrap_err();

    assert!(matches!(err, CompileError::InvalidConstant { ty: "uint8", .. }));
    assert_eq!(
        err.to_string(),
        "constant `K`: invalid uint8 literal `300`"
    );
}

#[test]
fn boolean_words_only() {
    let err = encode_constant(&constant(TypeKind::Boolean, "yes")).unwrap_err();

    assert!(matches!(err, CompileError::InvalidConstant { .. }));
}
