// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field type classification.
//!
//! The derive only sees tokens, so classification goes by the last path
//! segment:
//!
//! | Written type | Shape |
//! |--------------|-------|
//! | primitive scalar or `String` | [`FieldShape::Scalar`] |
//! | `Vec<T>` | [`FieldShape::Many`] |
//! | `Option<T>`, `Box<T>`, `i128`, any other generic path | [`FieldShape::Unsupported`] |
//! | tuple, array, reference, slice | [`FieldShape::Unsupported`] |
//! | any other plain path | [`FieldShape::Entity`] |

use syn::{PathArguments, Type, TypePath};

/// Storage kinds the runtime maps to SQL types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bool,
    Char,
    String
}

impl ScalarType {
    /// Recognize a scalar by type name.
    pub fn from_ident(name: &str) -> Option<Self> {
        Some(match name {
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "usize" => Self::Usize,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "bool" => Self::Bool,
            "char" => Self::Char,
            "String" => Self::String,
            _ => return None
        })
    }

    /// Variant name of the runtime `ScalarKind`.
    pub const fn variant(self) -> &'static str {
        match self {
            Self::I8 => "I8",
            Self::I16 => "I16",
            Self::I32 => "I32",
            Self::I64 => "I64",
            Self::Isize => "Isize",
            Self::U8 => "U8",
            Self::U16 => "U16",
            Self::U32 => "U32",
            Self::U64 => "U64",
            Self::Usize => "Usize",
            Self::F32 => "F32",
            Self::F64 => "F64",
            Self::Bool => "Bool",
            Self::Char => "Char",
            Self::String => "String"
        }
    }
}

/// What a field is from the runtime's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    /// Column with a direct value.
    Scalar(ScalarType),
    /// Embedded entity; carries the written type.
    Entity(TypePath),
    /// `Vec<T>`.
    Many,
    /// Anything else.
    Unsupported
}

impl FieldShape {
    /// Classify a field type.
    ///
    /// Ignored fields never become [`FieldShape::Entity`], so their type does
    /// not have to implement `Entity`.
    pub fn classify(ty: &Type, ignored: bool) -> Self {
        let Type::Path(path) = ty else {
            return Self::Unsupported;
        };
        if path.qself.is_some() {
            return Self::Unsupported;
        }
        let Some(last) = path.path.segments.last() else {
            return Self::Unsupported;
        };

        let name = last.ident.to_string();
        match &last.arguments {
            PathArguments::None => {
                if let Some(scalar) = ScalarType::from_ident(&name) {
                    Self::Scalar(scalar)
                } else if matches!(name.as_str(), "i128" | "u128" | "str") || ignored {
                    Self::Unsupported
                } else {
                    Self::Entity(path.clone())
                }
            }
            PathArguments::AngleBracketed(_) if name == "Vec" => Self::Many,
            _ => Self::Unsupported
        }
    }

    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub const fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }
}
