// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Result row decoding.
//!
//! Cells are decoded by the slot's storage kind. Drivers disagree on the
//! runtime type of some columns (SQLite reports `BOOLEAN` columns as bool,
//! Postgres widens nothing), so each kind tries a short list of candidates:
//!
//! | Kind | Tried in order |
//! |------|----------------|
//! | integer | `i64`, `i32`, `bool` |
//! | float | `f64`, `f32`, `i64` |
//! | bool | `bool`, `i64` |
//! | char, string | `String` |

use sqlx::{Any, Decode, Row, Type, any::AnyRow};

use crate::{
    entity::Record,
    error::{OrmError, Result},
    marshal::{self, ReadSlot},
    value::{ScalarKind, Value}
};

/// Decode the leading cells of `row` into `record`, slot by slot.
///
/// Extra cells or extra slots are left alone.
pub(super) fn bind_row(row: &AnyRow, slots: &[ReadSlot], record: &mut dyn Record) -> Result<()> {
    for (index, slot) in slots.iter().enumerate().take(row.len()) {
        let value = decode_cell(row, index, slot)?;
        marshal::assign(record, slot, value)?;
    }
    Ok(())
}

fn cell<T>(row: &AnyRow, index: usize) -> std::result::Result<Option<T>, sqlx::Error>
where
    T: for<'r> Decode<'r, Any> + Type<Any>
{
    row.try_get::<Option<T>, _>(index)
}

fn decode_cell(row: &AnyRow, index: usize, slot: &ReadSlot) -> Result<Value> {
    let kind = slot.kind;
    let decoded = if kind.is_integer() {
        cell::<i64>(row, index)
            .map(|v| v.map(Value::Int))
            .or_else(|_| cell::<i32>(row, index).map(|v| v.map(Value::from)))
            .or_else(|_| cell::<bool>(row, index).map(|v| v.map(|b| Value::Int(i64::from(b)))))
    } else if kind.is_float() {
        cell::<f64>(row, index)
            .map(|v| v.map(Value::Float))
            .or_else(|_| cell::<f32>(row, index).map(|v| v.map(Value::from)))
            .or_else(|_| cell::<i64>(row, index).map(|v| v.map(Value::Int)))
    } else if kind == ScalarKind::Bool {
        cell::<bool>(row, index)
            .map(|v| v.map(Value::Bool))
            .or_else(|_| cell::<i64>(row, index).map(|v| v.map(|n| Value::Bool(n != 0))))
    } else if kind.is_text() {
        cell::<String>(row, index).map(|v| v.map(Value::Text))
    } else {
        return Err(OrmError::UnknownType {
            table:     slot.table.clone(),
            column:    slot.column().to_owned(),
            type_name: kind.to_string()
        });
    };

    decoded
        .map(Option::unwrap_or_default)
        .map_err(|err| OrmError::Decode {
            column: slot.dotted(),
            reason: err.to_string()
        })
}
