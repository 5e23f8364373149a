//! Constant value encoding.

use std::str::FromStr;

use typelib_core::{Constant, TypeKind};

use super::CompileError;
use super::canon::tag_of;

/// Encode a constant literal at the width of its declared type.
///
/// Numbers are little-endian, booleans are 4-byte ints, strings are
/// NUL-terminated. Any other type stores the literal text NUL-terminated.
pub fn encode_constant(constant: &Constant) -> Result<Vec<u8>, CompileError> {
    let text = constant.value.trim();
    let bytes = match &constant.ty.kind {
        TypeKind::Boolean => {
            let v: i32 = match text {
                "true" | "TRUE" | "1" => 1,
                "false" | "FALSE" | "0" => 0,
                _ => return Err(invalid(constant)),
            };
            v.to_le_bytes().to_vec()
        }
        TypeKind::Int8 => parse::<i8>(constant)?.to_le_bytes().to_vec(),
        TypeKind::Uint8 => parse::<u8>(constant)?.to_le_bytes().to_vec(),
        TypeKind::Int16 => parse::<i16>(constant)?.to_le_bytes().to_vec(),
        TypeKind::Uint16 => parse::<u16>(constant)?.to_le_bytes().to_vec(),
        TypeKind::Int32 | TypeKind::Int => parse::<i32>(constant)?.to_le_bytes().to_vec(),
        TypeKind::Uint32 | TypeKind::Uint => parse::<u32>(constant)?.to_le_bytes().to_vec(),
        TypeKind::Int64 | TypeKind::Long | TypeKind::Ssize => {
            parse::<i64>(constant)?.to_le_bytes().to_vec()
        }
        TypeKind::Uint64 | TypeKind::Ulong | TypeKind::Size => {
            parse::<u64>(constant)?.to_le_bytes().to_vec()
        }
        TypeKind::Float => parse::<f32>(constant)?.to_le_bytes().to_vec(),
        TypeKind::Double => parse::<f64>(constant)?.to_le_bytes().to_vec(),
        // strings keep their exact text, surrounding whitespace included
        TypeKind::Utf8 | TypeKind::Filename => nul_terminated(&constant.value),
        _ => nul_terminated(text),
    };
    Ok(bytes)
}

fn parse<T: FromStr>(constant: &Constant) -> Result<T, CompileError> {
    constant
        .value
        .trim()
        .parse()
        .map_err(|_| invalid(constant))
}

fn nul_terminated(s: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(s.len() + 1);
    bytes.extend_from_slice(s.as_bytes());
    bytes.push(0);
    bytes
}

fn invalid(constant: &Constant) -> CompileError {
    CompileError::InvalidConstant {
        name: constant.name.clone(),
        ty: tag_of(&constant.ty.kind).name(),
        value: constant.value.clone(),
    }
}
