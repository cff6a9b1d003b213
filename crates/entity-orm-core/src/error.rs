// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error type shared by every entity-orm component.
//!
//! # Taxonomy
//!
//! | Class | Variants | Raised by |
//! |-------|----------|-----------|
//! | Schema | `UnknownType`, `TagNotFound`, `Annotation` | extraction, `CREATE` |
//! | Lookup | `ModelNotFound` | any operation on an unmigrated type |
//! | Key | `NoPrimaryKey` | default-filter First/Update/Remove |
//! | Not found | `NotFound` | First/Find with zero rows |
//! | Marshalling | `Conversion`, `Decode`, `UnknownField` | row binding |
//! | Driver | `Database` | everything touching the pool |
//!
//! Constraint violations (unique, foreign key, not null) are not interpreted
//! and arrive as [`OrmError::Database`].

use thiserror::Error;

/// Errors returned by entity-orm.
#[derive(Debug, Error)]
pub enum OrmError {
    /// The type was never migrated into this manager's registry.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// A default key filter was requested for a table without pk or unique
    /// columns.
    #[error("no primary key found for table {0}")]
    NoPrimaryKey(String),

    /// A column kind has no SQL mapping.
    #[error("unknown type {type_name} for column {table}.{column}")]
    UnknownType {
        /// Owning table.
        table:     String,
        /// Column title.
        column:    String,
        /// Declared Rust type.
        type_name: String
    },

    /// An embedded entity has no pk/unique field matching the foreign key
    /// reference.
    #[error("tag not found: {table}.{column} references {reference}")]
    TagNotFound {
        /// Owning table.
        table:     String,
        /// Column title.
        column:    String,
        /// The `Table(Column)` reference that failed to resolve.
        reference: String
    },

    /// A malformed `fk=` or `mappedBy=` token.
    #[error("invalid annotation `{token}` on field {field}")]
    Annotation {
        /// Field carrying the annotation.
        field: String,
        /// Offending token.
        token: String
    },

    /// First/Find matched zero rows.
    #[error("no {0} record found")]
    NotFound(String),

    /// A filter referenced `:name` without a value in the parameter map.
    #[error("missing value for named parameter :{0}")]
    MissingParameter(String),

    /// A value could not be converted into the field's Rust type.
    #[error("cannot convert {found} into {expected}")]
    Conversion {
        /// Target Rust type.
        expected: &'static str,
        /// Debug rendering of the source value.
        found:    String
    },

    /// Row binding failed for a column.
    #[error("failed to bind column {column}: {reason}")]
    Decode {
        /// Dotted field path of the column.
        column: String,
        /// Underlying cause.
        reason: String
    },

    /// The record does not expose a field the metadata refers to.
    #[error("field {field} not found on {table}")]
    UnknownField {
        /// Owning table.
        table: String,
        /// Missing field.
        field: String
    },

    /// Driver name without a dialect.
    #[error("unsupported driver: {0}")]
    UnsupportedDriver(String),

    /// No datasource with the requested name.
    #[error("datasource not found: {0}")]
    DatasourceNotFound(String),

    /// Error surfaced by the SQL driver or pool.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error)
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, OrmError>;
