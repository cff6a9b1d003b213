// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SELECT generation for First and Find.
//!
//! Every complex column pulls its referenced table into the FROM list and
//! adds a join predicate, recursing depth first:
//!
//! ```text
//! A { a1, b: B }   B { b1, c: C }   C { c1 }
//!
//! SELECT A.a1,B.b1,C.c1 FROM A,B,C WHERE A.b = B.<ref> AND B.c = C.<ref>
//! ```
//!
//! The SELECT list comes from [`read_slots`], the same traversal the
//! marshaller uses to bind the row.
//!
//! # WHERE Composition
//!
//! | Filter | Joins | WHERE |
//! |--------|-------|-------|
//! | caller filter | none | `<filter>` |
//! | caller filter | some | `(<filter>) AND <joins>` |
//! | instance key (First only) | any | `T.k=v AND .. AND <joins>` |
//! | none | some | `<joins>` |
//! | none | none | no WHERE |

use super::{SqlGenerator, Statement, dml::key_condition, normalize_filter};
use crate::{
    entity::Record,
    error::Result,
    marshal::{ReadSlot, key_values, read_slots},
    metadata::Table
};

/// FROM list and join predicates of a table and everything it references.
#[derive(Debug, Default)]
struct Joins {
    from:       Vec<String>,
    predicates: Vec<String>
}

impl SqlGenerator<'_> {
    /// Query for the first row matching `filter`, or the instance's key when
    /// no filter is given.
    ///
    /// # Errors
    ///
    /// [`OrmError::ModelNotFound`](crate::OrmError::ModelNotFound) for an
    /// unregistered referenced table and
    /// [`OrmError::NoPrimaryKey`](crate::OrmError::NoPrimaryKey) for a keyless
    /// table without filter.
    pub fn first(
        &self,
        table: &Table,
        record: &dyn Record,
        filter: Option<&str>
    ) -> Result<Statement> {
        let mut binder = self.binder();
        let condition = match normalize_filter(filter) {
            Some(filter) => Condition::Filter(filter.to_owned()),
            None => {
                let keys = key_values(table, record)?;
                Condition::Key(key_condition(&mut binder, Some(&table.name), keys))
            }
        };
        let sql = self.select(table, condition)?;
        Ok(binder.finish(sql))
    }

    /// Query for every row matching `filter`.
    ///
    /// # Errors
    ///
    /// [`OrmError::ModelNotFound`](crate::OrmError::ModelNotFound) for an
    /// unregistered referenced table.
    pub fn find(&self, table: &Table, filter: Option<&str>) -> Result<Statement> {
        let condition = normalize_filter(filter)
            .map_or(Condition::None, |filter| Condition::Filter(filter.to_owned()));
        Ok(Statement::new(self.select(table, condition)?))
    }

    /// Read slots matching the SELECT list of [`first`](Self::first) and
    /// [`find`](Self::find).
    ///
    /// # Errors
    ///
    /// As [`find`](Self::find).
    pub fn slots(&self, table: &Table) -> Result<Vec<ReadSlot>> {
        read_slots(self.registry, table)
    }

    fn select(&self, table: &Table, condition: Condition) -> Result<String> {
        let slots = self.slots(table)?;
        let mut joins = Joins {
            from:       vec![table.name.clone()],
            predicates: Vec::new()
        };
        self.collect_joins(table, &mut joins)?;

        let columns: Vec<String> = slots.iter().map(ReadSlot::qualified).collect();
        let mut sql = format!(
            "SELECT {} FROM {}",
            columns.join(","),
            joins.from.join(",")
        );

        let predicates = joins.predicates.join(" AND ");
        let clause = match condition {
            Condition::Filter(filter) if predicates.is_empty() => filter,
            Condition::Filter(filter) => format!("({filter}) AND {predicates}"),
            Condition::Key(key) if predicates.is_empty() => key,
            Condition::Key(key) => format!("{key} AND {predicates}"),
            Condition::None => predicates
        };
        if !clause.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }
        Ok(sql)
    }

    fn collect_joins(&self, table: &Table, joins: &mut Joins) -> Result<()> {
        for column in table.columns.iter().filter(|c| c.is_complex && !c.ignore) {
            let referenced = self.registry.require(&column.column_type_name)?;
            joins.from.push(referenced.name.clone());
            joins.predicates.push(format!(
                "{}.{} = {}.{}",
                table.name, column.title, referenced.name, column.foreign_key.column_reference
            ));
            self.collect_joins(&referenced, joins)?;
        }
        Ok(())
    }
}

/// Source of the WHERE body.
enum Condition {
    Filter(String),
    Key(String),
    None
}
