// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column type mapping.
//!
//! Both dialects share the base table below and differ only in how an
//! auto-increment key is spelled.
//!
//! | Kind | SQL |
//! |------|-----|
//! | integer, at most 32 bits | `INTEGER` |
//! | integer, 64 bits | `BIGINT` |
//! | float | `FLOAT` |
//! | bool | `BOOLEAN` |
//! | char, string | `VARCHAR` |

use crate::{metadata::Column, value::ScalarKind};

/// Maps column metadata to SQL types.
pub trait TypeMapper: Send + Sync {
    /// SQL type of the column, or `None` when its kind has no mapping.
    fn sql_type(&self, column: &Column) -> Option<&'static str>;

    /// Inline key clause for the column, if the dialect declares this key
    /// inside the column definition instead of the trailing
    /// `PRIMARY KEY (..)` clause.
    fn inline_key(&self, column: &Column) -> Option<&'static str>;
}

/// Shared kind table.
#[must_use]
pub const fn base_type(kind: ScalarKind) -> Option<&'static str> {
    if kind.is_narrow_integer() {
        Some("INTEGER")
    } else if kind.is_wide_integer() {
        Some("BIGINT")
    } else if kind.is_float() {
        Some("FLOAT")
    } else if kind.is_text() {
        Some("VARCHAR")
    } else if matches!(kind, ScalarKind::Bool) {
        Some("BOOLEAN")
    } else {
        None
    }
}

/// SQLite types. Auto-increment keys are declared inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteTypeMapper;

impl TypeMapper for SqliteTypeMapper {
    fn sql_type(&self, column: &Column) -> Option<&'static str> {
        base_type(column.column_type)
    }

    fn inline_key(&self, column: &Column) -> Option<&'static str> {
        (column.primary_key && column.auto_increment).then_some(" PRIMARY KEY AUTOINCREMENT")
    }
}

/// PostgreSQL types. Auto-increment integers become `SERIAL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresTypeMapper;

impl TypeMapper for PostgresTypeMapper {
    fn sql_type(&self, column: &Column) -> Option<&'static str> {
        if column.auto_increment && column.column_type.is_integer() {
            return Some("SERIAL");
        }
        base_type(column.column_type)
    }

    fn inline_key(&self, _column: &Column) -> Option<&'static str> {
        None
    }
}
