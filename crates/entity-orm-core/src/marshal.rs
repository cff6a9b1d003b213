// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Object-row marshalling.
//!
//! Writing reduces an entity to `(column, value)` pairs. Reading goes the
//! other way through [`ReadSlot`]s: one slot per selected column, each naming
//! the field path inside the destination entity that receives the cell.
//!
//! # Slot Order
//!
//! ```text
//! Soldier { id, name, troop: Troop { id, name } }
//!
//! read_slots(Soldier)  ->  [id] [name] [troop.id] [troop.name]
//! SELECT               ->  Soldier.id, Soldier.name, Troop.id, Troop.name
//! ```
//!
//! The SELECT list of First/Find is generated from these slots, so column
//! positions and slot positions cannot drift apart. Native queries have no
//! registered table and use [`native_read_slots`], which walks the field
//! descriptors and ignores annotations.

use crate::{
    entity::{FieldDescriptor, FieldKind, FieldRef, Record},
    error::{OrmError, Result},
    metadata::{Column, Table},
    registry::Registry,
    value::{ScalarKind, Value}
};

/// Destination of one result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadSlot {
    /// Table the column is selected from.
    pub table:  String,
    /// Field path from the root entity, e.g. `["troop", "id"]`.
    pub path:   Vec<String>,
    /// Storage kind used to decode the cell.
    pub kind:   ScalarKind
}

impl ReadSlot {
    /// Column title (last path segment).
    #[must_use]
    pub fn column(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }

    /// `Table.column`, as used in SELECT lists.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table, self.column())
    }

    /// Dotted field path for diagnostics.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }
}

/// Value of one persisted column of `record`.
///
/// Complex columns resolve to the embedded entity's referenced key field.
///
/// # Errors
///
/// [`OrmError::UnknownType`] for columns without a SQL mapping and
/// [`OrmError::UnknownField`] when the record does not expose the field.
pub fn column_value(table: &Table, column: &Column, record: &dyn Record) -> Result<Value> {
    if column.column_type == ScalarKind::Unsupported {
        return Err(OrmError::UnknownType {
            table:     table.name.clone(),
            column:    column.title.clone(),
            type_name: column.column_type_name.clone()
        });
    }
    let unknown = |field: &str| OrmError::UnknownField {
        table: table.name.clone(),
        field: field.to_owned()
    };
    match record.field(&column.title) {
        Some(FieldRef::Value(value)) if !column.is_complex => Ok(value),
        Some(FieldRef::Record(nested)) if column.is_complex => {
            let reference = &column.foreign_key.column_reference;
            match nested.field(reference) {
                Some(FieldRef::Value(value)) => Ok(value),
                _ => Err(unknown(&format!("{}.{reference}", column.title)))
            }
        }
        _ => Err(unknown(&column.title))
    }
}

/// Values for INSERT/UPDATE: every column that is neither ignored nor
/// auto-increment, in declaration order.
///
/// # Errors
///
/// See [`column_value`].
pub fn values_for_write<'t>(
    table: &'t Table,
    record: &dyn Record
) -> Result<Vec<(&'t Column, Value)>> {
    table
        .writable_columns()
        .map(|column| Ok((column, column_value(table, column, record)?)))
        .collect()
}

/// Values of the default key filter columns.
///
/// # Errors
///
/// [`OrmError::NoPrimaryKey`] plus the errors of [`column_value`].
pub fn key_values<'t>(table: &'t Table, record: &dyn Record) -> Result<Vec<(&'t Column, Value)>> {
    table
        .key_columns()?
        .into_iter()
        .map(|column| Ok((column, column_value(table, column, record)?)))
        .collect()
}

/// Read slots for a registered table, in SELECT order.
///
/// The root's non-complex columns come first, then for each complex column
/// the referenced table's slots, depth first. Ignored columns are skipped.
///
/// # Errors
///
/// [`OrmError::ModelNotFound`] when a referenced table is not registered.
pub fn read_slots(registry: &Registry, table: &Table) -> Result<Vec<ReadSlot>> {
    let mut slots = Vec::new();
    collect_slots(registry, table, &[], &mut slots)?;
    Ok(slots)
}

fn collect_slots(
    registry: &Registry,
    table: &Table,
    prefix: &[String],
    slots: &mut Vec<ReadSlot>
) -> Result<()> {
    let persisted = || table.columns.iter().filter(|c| !c.ignore);

    for column in persisted().filter(|c| !c.is_complex) {
        slots.push(ReadSlot {
            table: table.name.clone(),
            path:  extend(prefix, &column.title),
            kind:  column.column_type
        });
    }
    for column in persisted().filter(|c| c.is_complex) {
        let referenced = registry.require(&column.column_type_name)?;
        collect_slots(registry, &referenced, &extend(prefix, &column.title), slots)?;
    }
    Ok(())
}

/// Read slots for a native query: every scalar field, descending into
/// embedded entities, regardless of annotations.
///
/// `Vec<T>` and unsupported fields have no cell and are skipped.
#[must_use]
pub fn native_read_slots(table: &str, fields: &[FieldDescriptor]) -> Vec<ReadSlot> {
    let mut slots = Vec::new();
    collect_native(table, fields, &[], &mut slots);
    slots
}

fn collect_native(
    table: &str,
    fields: &[FieldDescriptor],
    prefix: &[String],
    slots: &mut Vec<ReadSlot>
) {
    for field in fields {
        match field.kind {
            FieldKind::Scalar(kind) => slots.push(ReadSlot {
                table: table.to_owned(),
                path: extend(prefix, field.name),
                kind
            }),
            FieldKind::Entity {
                name,
                fields: nested
            } => collect_native(name, nested, &extend(prefix, field.name), slots),
            FieldKind::Many | FieldKind::Unsupported => {}
        }
    }
}

fn extend(prefix: &[String], segment: &str) -> Vec<String> {
    let mut path = prefix.to_vec();
    path.push(segment.to_owned());
    path
}

/// Store a decoded cell into the field addressed by `slot`.
///
/// # Errors
///
/// [`OrmError::Decode`] naming the slot when the path does not exist or the
/// value does not convert into the field type.
pub fn assign(record: &mut dyn Record, slot: &ReadSlot, value: Value) -> Result<()> {
    assign_path(record, &slot.path, value).map_err(|err| OrmError::Decode {
        column: slot.dotted(),
        reason: err.to_string()
    })
}

fn assign_path(record: &mut dyn Record, path: &[String], value: Value) -> Result<()> {
    match path {
        [] => Ok(()),
        [field] => record.assign(field, value),
        [head, rest @ ..] => {
            let nested = record.nested_mut(head).ok_or_else(|| OrmError::UnknownField {
                table: String::new(),
                field: head.clone()
            })?;
            assign_path(nested, rest, value)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{fixtures::*, *};
    use crate::{entity::Entity, metadata::parse_model};

    fn registry() -> Registry {
        let registry = Registry::new();
        registry.set(parse_model::<Troop>().unwrap());
        registry.set(parse_model::<Soldier>().unwrap());
        registry
    }

    fn ryan() -> Soldier {
        Soldier {
            id:      1,
            name:    "Ryan".into(),
            troop:   Troop {
                id:   7,
                name: "TheBestTeam".into()
            },
            scratch: true
        }
    }

    #[test]
    fn write_values_skip_autoincrement_and_ignored() {
        let registry = registry();
        let table = registry.require("Soldier").unwrap();
        let soldier = ryan();
        let values = values_for_write(&table, &soldier).unwrap();
        let pairs: Vec<_> = values
            .iter()
            .map(|(c, v)| (c.title.as_str(), v.clone()))
            .collect();
        assert_eq!(
            pairs,
            [("name", Value::from("Ryan")), ("troop", Value::Int(7))]
        );
    }

    #[test]
    fn key_values_use_pk() {
        let registry = registry();
        let table = registry.require("Soldier").unwrap();
        let soldier = ryan();
        let keys = key_values(&table, &soldier).unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].0.title, "id");
        assert_eq!(keys[0].1, Value::Int(1));
    }

    #[test]
    fn slots_follow_select_order() {
        let registry = registry();
        let table = registry.require("Soldier").unwrap();
        let slots = read_slots(&registry, &table).unwrap();
        let qualified: Vec<_> = slots.iter().map(ReadSlot::qualified).collect();
        assert_eq!(
            qualified,
            ["Soldier.id", "Soldier.name", "Troop.id", "Troop.name"]
        );
        assert_eq!(slots[2].dotted(), "troop.id");
    }

    #[test]
    fn slots_need_referenced_table() {
        let registry = Registry::new();
        let table = registry.set(parse_model::<Soldier>().unwrap());
        assert!(matches!(
            read_slots(&registry, &table),
            Err(OrmError::ModelNotFound(name)) if name == "Troop"
        ));
    }

    #[test]
    fn native_slots_include_everything_scalar() {
        let slots = native_read_slots(Soldier::NAME, Soldier::FIELDS);
        let paths: Vec<_> = slots.iter().map(ReadSlot::dotted).collect();
        assert_eq!(paths, ["id", "name", "troop.id", "troop.name", "scratch"]);
    }

    #[test]
    fn assign_fills_nested_fields() {
        let registry = registry();
        let table = registry.require("Soldier").unwrap();
        let slots = read_slots(&registry, &table).unwrap();
        let row = [
            Value::Int(3),
            Value::from("Bryan"),
            Value::Int(1),
            Value::from("TheBestTeam")
        ];
        let mut soldier = Soldier::default();
        for (slot, value) in slots.iter().zip(row) {
            assign(&mut soldier, slot, value).unwrap();
        }
        assert_eq!(soldier.id, 3);
        assert_eq!(soldier.name, "Bryan");
        assert_eq!(soldier.troop.id, 1);
        assert_eq!(soldier.troop.name, "TheBestTeam");
        assert!(!soldier.scratch);
    }

    #[test]
    fn assign_reports_the_column() {
        let slot = ReadSlot {
            table: "Soldier".into(),
            path:  vec!["troop".into(), "id".into()],
            kind:  ScalarKind::I32
        };
        let mut soldier = Soldier::default();
        let err = assign(&mut soldier, &slot, Value::from("x")).unwrap_err();
        match err {
            OrmError::Decode { column, .. } => assert_eq!(column, "troop.id"),
            other => panic!("unexpected {other:?}")
        }
    }
}
