// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! INSERT, UPDATE and DELETE generation.
//!
//! Values come from the marshaller and are rendered through the generator's
//! [`Binding`](super::Binding) mode. UPDATE always targets the instance's own
//! key; DELETE uses the key only when no filter is given.

use super::{Binder, SqlGenerator, Statement, normalize_filter};
use crate::{
    entity::Record,
    error::Result,
    marshal::{key_values, values_for_write},
    metadata::{Column, Table},
    value::Value
};

impl SqlGenerator<'_> {
    /// `INSERT INTO T (cols) VALUES (vals)`.
    ///
    /// Ignored and auto-increment columns are left out. A table with nothing
    /// left to write gets `DEFAULT VALUES`.
    ///
    /// # Errors
    ///
    /// Marshalling errors, e.g. [`OrmError::UnknownType`](crate::OrmError::UnknownType).
    pub fn insert(&self, table: &Table, record: &dyn Record) -> Result<Statement> {
        let values = values_for_write(table, record)?;
        if values.is_empty() {
            return Ok(Statement::new(format!(
                "INSERT INTO {} DEFAULT VALUES",
                table.name
            )));
        }

        let mut binder = self.binder();
        let mut columns = Vec::with_capacity(values.len());
        let mut rendered = Vec::with_capacity(values.len());
        for (column, value) in values {
            columns.push(column.title.as_str());
            rendered.push(binder.render(value));
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name,
            columns.join(","),
            rendered.join(",")
        );
        Ok(binder.finish(sql))
    }

    /// `UPDATE T SET c = v,.. WHERE T.k=v AND ..`.
    ///
    /// # Errors
    ///
    /// [`OrmError::NoPrimaryKey`](crate::OrmError::NoPrimaryKey) when the
    /// table has no key columns, plus marshalling errors.
    pub fn update(&self, table: &Table, record: &dyn Record) -> Result<Statement> {
        let values = values_for_write(table, record)?;
        let keys = key_values(table, record)?;

        let mut binder = self.binder();
        let assignments: Vec<String> = values
            .into_iter()
            .map(|(column, value)| format!("{} = {}", column.title, binder.render(value)))
            .collect();
        let condition = key_condition(&mut binder, Some(&table.name), keys);

        let sql = format!(
            "UPDATE {} SET {} WHERE {condition}",
            table.name,
            assignments.join(",")
        );
        Ok(binder.finish(sql))
    }

    /// `DELETE FROM T WHERE ..`.
    ///
    /// Without a filter the WHERE clause matches the instance's key columns,
    /// unqualified.
    ///
    /// # Errors
    ///
    /// [`OrmError::NoPrimaryKey`](crate::OrmError::NoPrimaryKey) when no
    /// filter is given and the table has no key columns.
    pub fn delete(
        &self,
        table: &Table,
        record: &dyn Record,
        filter: Option<&str>
    ) -> Result<Statement> {
        if let Some(filter) = normalize_filter(filter) {
            return Ok(Statement::new(format!(
                "DELETE FROM {} WHERE {filter}",
                table.name
            )));
        }

        let keys = key_values(table, record)?;
        let mut binder = self.binder();
        let condition = key_condition(&mut binder, None, keys);
        let sql = format!("DELETE FROM {} WHERE {condition}", table.name);
        Ok(binder.finish(sql))
    }
}

/// `k1=v1 AND k2=v2`, optionally qualified with the table name.
pub(super) fn key_condition(
    binder: &mut Binder,
    qualifier: Option<&str>,
    keys: Vec<(&Column, Value)>
) -> String {
    keys.into_iter()
        .map(|(column, value)| {
            let rendered = binder.render(value);
            match qualifier {
                Some(table) => format!("{table}.{}={rendered}", column.title),
                None => format!("{}={rendered}", column.title)
            }
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

#[cfg(test)]
mod tests {
    use crate::{
        dialect::{Binding, Dialect},
        entity::{Entity, FieldDescriptor, FieldKind, FieldRef, Record},
        error::{OrmError, Result},
        marshal::fixtures::{Assignment, Soldier, Troop},
        metadata::parse_model,
        registry::Registry,
        value::{ScalarKind, Value}
    };

    fn assignment() -> Assignment {
        Assignment {
            code:  "A-1".into(),
            troop: Troop {
                id:   1,
                name: "TheBestTeam".into()
            },
            note:  "first posting".into()
        }
    }

    fn registry() -> Registry {
        let registry = Registry::new();
        registry.set(parse_model::<Troop>().unwrap());
        registry.set(parse_model::<Soldier>().unwrap());
        registry.set(parse_model::<Assignment>().unwrap());
        registry
    }

    #[test]
    fn insert_literals() {
        let registry = registry();
        let table = registry.require("Assignment").unwrap();
        let statement = Dialect::Sqlite
            .generator(&registry, Binding::Literal)
            .insert(&table, &assignment())
            .unwrap();
        assert_eq!(
            statement.sql,
            "INSERT INTO Assignment (code,troop,note) VALUES ('A-1','TheBestTeam','first posting')"
        );
        assert!(statement.values.is_empty());
    }

    #[test]
    fn insert_skips_autoincrement_and_ignored() {
        let registry = registry();
        let table = registry.require("Soldier").unwrap();
        let soldier = Soldier {
            id:      9,
            name:    "Ryan".into(),
            troop:   Troop {
                id:   1,
                name: String::new()
            },
            scratch: true
        };
        let statement = Dialect::Sqlite
            .generator(&registry, Binding::Literal)
            .insert(&table, &soldier)
            .unwrap();
        assert_eq!(
            statement.sql,
            "INSERT INTO Soldier (name,troop) VALUES ('Ryan',1)"
        );
    }

    #[test]
    fn insert_bound() {
        let registry = registry();
        let table = registry.require("Assignment").unwrap();
        let statement = Dialect::Postgres
            .generator(&registry, Binding::Bound)
            .insert(&table, &assignment())
            .unwrap();
        assert_eq!(
            statement.sql,
            "INSERT INTO Assignment (code,troop,note) VALUES ($1,$2,$3)"
        );
        assert_eq!(
            statement.values,
            [
                Value::from("A-1"),
                Value::from("TheBestTeam"),
                Value::from("first posting")
            ]
        );
    }

    #[test]
    fn insert_default_values() {
        let registry = registry();
        let table = parse_model::<Counter>().unwrap();
        let statement = Dialect::Sqlite
            .generator(&registry, Binding::Literal)
            .insert(&table, &Counter::default())
            .unwrap();
        assert_eq!(statement.sql, "INSERT INTO Counter DEFAULT VALUES");
    }

    #[test]
    fn update_targets_own_key() {
        let registry = registry();
        let table = registry.require("Assignment").unwrap();
        let statement = Dialect::Sqlite
            .generator(&registry, Binding::Literal)
            .update(&table, &assignment())
            .unwrap();
        assert_eq!(
            statement.sql,
            "UPDATE Assignment SET code = 'A-1',troop = 'TheBestTeam',note = 'first posting' WHERE Assignment.code='A-1' AND Assignment.troop='TheBestTeam'"
        );
    }

    #[test]
    fn update_bound_orders_set_before_where() {
        let registry = registry();
        let table = registry.require("Soldier").unwrap();
        let soldier = Soldier {
            id:      4,
            name:    "Steve".into(),
            troop:   Troop {
                id:   2,
                name: String::new()
            },
            scratch: false
        };
        let statement = Dialect::Sqlite
            .generator(&registry, Binding::Bound)
            .update(&table, &soldier)
            .unwrap();
        assert_eq!(
            statement.sql,
            "UPDATE Soldier SET name = ?,troop = ? WHERE Soldier.id=?"
        );
        assert_eq!(
            statement.values,
            [Value::from("Steve"), Value::Int(2), Value::Int(4)]
        );
    }

    #[test]
    fn delete_by_key() {
        let registry = registry();
        let table = registry.require("Assignment").unwrap();
        let statement = Dialect::Sqlite
            .generator(&registry, Binding::Literal)
            .delete(&table, &assignment(), None)
            .unwrap();
        assert_eq!(
            statement.sql,
            "DELETE FROM Assignment WHERE code='A-1' AND troop='TheBestTeam'"
        );
    }

    #[test]
    fn delete_with_filter() {
        let registry = registry();
        let table = registry.require("Assignment").unwrap();
        let statement = Dialect::Sqlite
            .generator(&registry, Binding::Literal)
            .delete(&table, &assignment(), Some("code='A-1'"))
            .unwrap();
        assert_eq!(statement.sql, "DELETE FROM Assignment WHERE code='A-1'");
    }

    #[test]
    fn keyless_table_needs_filter() {
        let registry = registry();
        let table = parse_model::<Counter>().unwrap();
        let generator = Dialect::Sqlite.generator(&registry, Binding::Literal);
        assert!(matches!(
            generator.delete(&table, &Counter::default(), None),
            Err(OrmError::NoPrimaryKey(_))
        ));
        assert!(matches!(
            generator.update(&table, &Counter::default()),
            Err(OrmError::NoPrimaryKey(_))
        ));
        assert!(
            generator
                .delete(&table, &Counter::default(), Some("hits > 3"))
                .is_ok()
        );
    }

    #[derive(Debug, Default)]
    struct Counter {
        hits: i64
    }

    impl Entity for Counter {
        const NAME: &'static str = "Counter";
        const FIELDS: &'static [FieldDescriptor] = &[FieldDescriptor::new(
            "hits",
            "i64",
            "autoincrement",
            FieldKind::Scalar(ScalarKind::I64)
        )];
    }

    impl Record for Counter {
        fn field(&self, name: &str) -> Option<FieldRef<'_>> {
            (name == "hits").then(|| FieldRef::Value(Value::from(self.hits)))
        }

        fn assign(&mut self, name: &str, value: Value) -> Result<()> {
            if name == "hits" {
                self.hits = crate::value::FromValue::from_value(value)?;
            }
            Ok(())
        }

        fn nested_mut(&mut self, _name: &str) -> Option<&mut dyn Record> {
            None
        }
    }
}
