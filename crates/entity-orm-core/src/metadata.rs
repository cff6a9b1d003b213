// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Table metadata extraction.
//!
//! [`parse_model`] turns the static field descriptors of an [`Entity`] into a
//! [`Table`]. Extraction is pure: registering the result is the manager's job.
//!
//! # Annotation Tokens
//!
//! | Token | Effect |
//! |-------|--------|
//! | `pk` | `primary_key`, listed in `primary_keys` |
//! | `unique` | `unique`, listed in `primary_keys` |
//! | `autoincrement` | `auto_increment` |
//! | `ignore` | `ignore`, never persisted or selected |
//! | `fk=Table(Column)` | `foreign_key` |
//! | `mappedBy=Table(Column)` | `mapped_by`, routed to `mapped_columns` |
//!
//! Unrecognized tokens are skipped.
//!
//! # Embedded Entities
//!
//! A field whose type is another entity becomes a complex column. Its kind is
//! borrowed from the referenced entity's field named by the `fk` column
//! reference, which must be tagged `pk` or `unique`.

use crate::{
    entity::{Entity, FieldDescriptor, FieldKind},
    error::{OrmError, Result},
    value::ScalarKind
};

/// Persisted shape of one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name (the entity's type name).
    pub name:           String,
    /// Persisted columns in declaration order.
    pub columns:        Vec<Column>,
    /// One-to-many back references. Informational only.
    pub mapped_columns: Vec<Column>,
    /// Columns flagged `pk` or `unique`.
    pub primary_keys:   Vec<PrimaryKey>
}

/// Name and kind of a key column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Column title.
    pub name: String,
    /// Storage kind.
    pub kind: ScalarKind
}

/// One entity field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Field name, used verbatim as the SQL identifier.
    pub title:            String,
    /// Storage kind, borrowed from the referenced key for complex columns.
    pub column_type:      ScalarKind,
    /// Declared type name, or the referenced table name for complex columns.
    pub column_type_name: String,
    /// `pk`
    pub primary_key:      bool,
    /// `unique`
    pub unique:           bool,
    /// `autoincrement`
    pub auto_increment:   bool,
    /// `ignore`
    pub ignore:           bool,
    /// `fk=Table(Column)`
    pub foreign_key:      ForeignKey,
    /// The field embeds another entity.
    pub is_complex:       bool,
    /// The field is the reverse side of a relation.
    pub is_mapped:        bool,
    /// `mappedBy=Table(Column)`
    pub mapped_by:        MappedBy
}

/// Foreign key reference of a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignKey {
    /// Set when the column declares `fk=`.
    pub is_foreign_key:   bool,
    /// Referenced table.
    pub table_reference:  String,
    /// Referenced column.
    pub column_reference: String
}

/// Target of a one-to-many mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedBy {
    /// Table holding the foreign key.
    pub target_table_name: String,
    /// Column of that table pointing back here.
    pub target_table_pk:   String
}

impl Table {
    /// Look up a persisted column by title.
    #[must_use]
    pub fn column(&self, title: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.title == title)
    }

    /// Columns written by INSERT/UPDATE: not ignored, not auto-increment.
    pub fn writable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| !c.ignore && !c.auto_increment)
    }

    /// Columns used for the default key filter.
    ///
    /// The `pk` columns when there are any, otherwise the `unique` ones.
    ///
    /// # Errors
    ///
    /// [`OrmError::NoPrimaryKey`] when the table has neither.
    pub fn key_columns(&self) -> Result<Vec<&Column>> {
        let pks: Vec<&Column> = self
            .columns
            .iter()
            .filter(|c| c.primary_key && !c.ignore)
            .collect();
        if !pks.is_empty() {
            return Ok(pks);
        }
        let uniques: Vec<&Column> = self
            .columns
            .iter()
            .filter(|c| c.unique && !c.ignore)
            .collect();
        if uniques.is_empty() {
            return Err(OrmError::NoPrimaryKey(self.name.clone()));
        }
        Ok(uniques)
    }
}

/// Flags parsed from an annotation string.
#[derive(Debug, Default)]
struct Annotations {
    primary_key:    bool,
    unique:         bool,
    auto_increment: bool,
    ignore:         bool,
    foreign_key:    Option<(String, String)>,
    mapped_by:      Option<(String, String)>
}

impl Annotations {
    fn parse(field: &str, annotation: &str) -> Result<Self> {
        let mut parsed = Self::default();
        for token in annotation.split(',').map(str::trim) {
            match token {
                "pk" => parsed.primary_key = true,
                "unique" => parsed.unique = true,
                "autoincrement" => parsed.auto_increment = true,
                "ignore" => parsed.ignore = true,
                _ => {
                    let Some((key, reference)) = token.split_once('=') else {
                        continue;
                    };
                    match key.trim() {
                        "fk" => {
                            parsed.foreign_key = Some(parse_reference(field, token, reference)?);
                        }
                        "mappedBy" | "mapped_by" => {
                            parsed.mapped_by = Some(parse_reference(field, token, reference)?);
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(parsed)
    }

    fn is_key(&self) -> bool {
        self.primary_key || self.unique
    }
}

/// Split `Table(Column)`.
fn parse_reference(field: &str, token: &str, reference: &str) -> Result<(String, String)> {
    let invalid = || OrmError::Annotation {
        field: field.to_owned(),
        token: token.to_owned()
    };
    let (table, rest) = reference.trim().split_once('(').ok_or_else(invalid)?;
    let column = rest.strip_suffix(')').ok_or_else(invalid)?;
    let (table, column) = (table.trim(), column.trim());
    if table.is_empty() || column.is_empty() {
        return Err(invalid());
    }
    Ok((table.to_owned(), column.to_owned()))
}

/// Extract the [`Table`] of an entity type.
///
/// # Errors
///
/// [`OrmError::TagNotFound`] for an embedded entity whose referenced field is
/// missing or not a key, and [`OrmError::Annotation`] for malformed `fk=` or
/// `mappedBy=` tokens.
pub fn parse_model<E: Entity>() -> Result<Table> {
    parse_fields(E::NAME, E::FIELDS)
}

/// Extract a [`Table`] from raw descriptors.
///
/// # Errors
///
/// See [`parse_model`].
pub fn parse_fields(name: &str, fields: &[FieldDescriptor]) -> Result<Table> {
    let mut table = Table {
        name:           name.to_owned(),
        columns:        Vec::with_capacity(fields.len()),
        mapped_columns: Vec::new(),
        primary_keys:   Vec::new()
    };

    for field in fields {
        let annotations = Annotations::parse(field.name, field.annotation)?;
        let (table_reference, column_reference) =
            annotations.foreign_key.clone().unwrap_or_default();

        let (column_type, column_type_name, is_complex) = match field.kind {
            FieldKind::Scalar(kind) => (kind, field.type_name.to_owned(), false),
            FieldKind::Entity {
                name: referenced,
                fields: referenced_fields
            } => {
                let kind =
                    referenced_key_kind(referenced_fields, &column_reference).ok_or_else(|| {
                        OrmError::TagNotFound {
                            table:     name.to_owned(),
                            column:    field.name.to_owned(),
                            reference: format!("{referenced}({column_reference})")
                        }
                    })?;
                (kind, referenced.to_owned(), true)
            }
            FieldKind::Many | FieldKind::Unsupported => {
                (ScalarKind::Unsupported, field.type_name.to_owned(), false)
            }
        };

        let (target_table_name, target_table_pk) =
            annotations.mapped_by.clone().unwrap_or_default();

        let column = Column {
            title: field.name.to_owned(),
            column_type,
            column_type_name,
            primary_key: annotations.primary_key,
            unique: annotations.unique,
            auto_increment: annotations.auto_increment,
            ignore: annotations.ignore,
            foreign_key: ForeignKey {
                is_foreign_key: annotations.foreign_key.is_some(),
                table_reference,
                column_reference
            },
            is_complex,
            is_mapped: annotations.mapped_by.is_some(),
            mapped_by: MappedBy {
                target_table_name,
                target_table_pk
            }
        };

        if column.is_mapped {
            table.mapped_columns.push(column);
            continue;
        }
        if annotations.is_key() {
            table.primary_keys.push(PrimaryKey {
                name: column.title.clone(),
                kind: column.column_type
            });
        }
        table.columns.push(column);
    }

    Ok(table)
}

/// Kind of the field named `reference` if it is a scalar `pk`/`unique` field.
fn referenced_key_kind(fields: &[FieldDescriptor], reference: &str) -> Option<ScalarKind> {
    fields.iter().find_map(|f| {
        if f.name != reference {
            return None;
        }
        let annotations = Annotations::parse(f.name, f.annotation).ok()?;
        match (annotations.is_key(), f.kind) {
            (true, FieldKind::Scalar(kind)) => Some(kind),
            _ => None
        }
    })
}
