// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Scalar kinds and dynamically typed column values.
//!
//! Every persisted field is reduced to a [`ScalarKind`] at extraction time.
//! The kind drives two things: the SQL type emitted in `CREATE TABLE` and the
//! way a [`Value`] is rendered as a literal.
//!
//! # Kind Table
//!
//! | Rust type | Kind | SQL type |
//! |-----------|------|----------|
//! | `i8`, `i16`, `i32` | `I8`..`I32` | `INTEGER` |
//! | `u8`, `u16`, `u32` | `U8`..`U32` | `INTEGER` |
//! | `i64`, `isize` | `I64`, `Isize` | `BIGINT` |
//! | `u64`, `usize` | `U64`, `Usize` | `BIGINT` |
//! | `f32`, `f64` | `F32`, `F64` | `FLOAT` |
//! | `bool` | `Bool` | `BOOLEAN` |
//! | `char`, `String` | `Char`, `String` | `VARCHAR` |
//!
//! Anything else is [`ScalarKind::Unsupported`] and is rejected with
//! [`OrmError::UnknownType`](crate::OrmError::UnknownType) as soon as it has to
//! be written or created.

use std::fmt;

use crate::error::{OrmError, Result};

/// Storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`, stored as a 64-bit integer.
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`, stored as a 64-bit integer.
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `bool`
    Bool,
    /// `char`, stored as a one character string.
    Char,
    /// `String`
    String,
    /// Any type without a column mapping.
    Unsupported
}

impl ScalarKind {
    /// Integer kinds of at most 32 bits.
    #[must_use]
    pub const fn is_narrow_integer(self) -> bool {
        matches!(
            self,
            Self::I8 | Self::I16 | Self::I32 | Self::U8 | Self::U16 | Self::U32
        )
    }

    /// 64-bit integer kinds.
    #[must_use]
    pub const fn is_wide_integer(self) -> bool {
        matches!(self, Self::I64 | Self::Isize | Self::U64 | Self::Usize)
    }

    /// Any integer kind.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        self.is_narrow_integer() || self.is_wide_integer()
    }

    /// Floating point kinds.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Kinds rendered as quoted literals.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Char | Self::String)
    }

    /// Rust spelling of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "String",
            Self::Unsupported => "unsupported"
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single column value.
///
/// Produced from entity fields when writing and from result rows when reading.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// SQL `NULL`.
    #[default]
    Null,

    /// Signed integer.
    Int(i64),

    /// Unsigned integer that does not fit the signed range losslessly.
    UInt(u64),

    /// Floating point number.
    Float(f64),

    /// Boolean.
    Bool(bool),

    /// Text.
    Text(String)
}

impl Value {
    /// Render the value as an SQL literal.
    ///
    /// Text is single-quoted with embedded quotes doubled, floats use six
    /// decimals and booleans become `1`/`0`.
    ///
    /// ```rust
    /// use entity_orm_core::Value;
    ///
    /// assert_eq!(Value::from("O'Neil").to_literal(), "'O''Neil'");
    /// assert_eq!(Value::from(true).to_literal(), "1");
    /// assert_eq!(Value::from(1.5_f64).to_literal(), "1.500000");
    /// ```
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_owned(),
            Self::Int(v) => v.to_string(),
            Self::UInt(v) => v.to_string(),
            Self::Float(v) => format!("{v:.6}"),
            Self::Bool(true) => "1".to_owned(),
            Self::Bool(false) => "0".to_owned(),
            Self::Text(v) => format!("'{}'", v.replace('\'', "''"))
        }
    }

    /// Whether this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => f.write_str(v),
            other => f.write_str(&other.to_literal())
        }
    }
}

macro_rules! value_from_lossless {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        }
    )*};
}

value_from_lossless!(i8, i16, i32, i64, u8, u16, u32);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::from(value as u64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Conversion from a decoded [`Value`] back into a field type.
///
/// Implemented for every scalar the derive maps to a [`ScalarKind`].
/// Integer conversions are range checked.
pub trait FromValue: Sized {
    /// Convert, failing with [`OrmError::Conversion`] on a kind or range
    /// mismatch.
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch(expected: &'static str, found: &Value) -> OrmError {
    OrmError::Conversion {
        expected,
        found: format!("{found:?}")
    }
}

macro_rules! integer_from_value {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Int(v) => <$ty>::try_from(v)
                        .map_err(|_| mismatch(stringify!($ty), &Value::Int(v))),
                    Value::UInt(v) => <$ty>::try_from(v)
                        .map_err(|_| mismatch(stringify!($ty), &Value::UInt(v))),
                    Value::Bool(v) => Ok(<$ty>::from(v)),
                    other => Err(mismatch(stringify!($ty), &other))
                }
            }
        }
    )*};
}

integer_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            Value::UInt(v) => Ok(v as f64),
            other => Err(mismatch("f64", &other))
        }
    }
}

impl FromValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::Int(v) => Ok(v != 0),
            Value::UInt(v) => Ok(v != 0),
            other => Err(mismatch("bool", &other))
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            other => Err(mismatch("String", &other))
        }
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self> {
        if let Value::Text(text) = &value {
            let mut chars = text.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                return Ok(c);
            }
        }
        Err(mismatch("char", &value))
    }
}
