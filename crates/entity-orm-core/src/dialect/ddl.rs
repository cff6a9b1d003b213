// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! CREATE TABLE and DROP TABLE generation.

use super::SqlGenerator;
use crate::{
    error::{OrmError, Result},
    metadata::Table
};

impl SqlGenerator<'_> {
    /// `CREATE TABLE` for a table.
    ///
    /// Columns appear in declaration order, ignored columns are skipped.
    /// Foreign keys follow the columns, then the deferred composite
    /// `PRIMARY KEY (..)` clause.
    ///
    /// # Errors
    ///
    /// [`OrmError::UnknownType`] for a column kind without SQL mapping.
    pub fn create(&self, table: &Table) -> Result<String> {
        let mapper = self.dialect.type_mapper();
        let mut columns = Vec::with_capacity(table.columns.len());
        let mut deferred_keys = Vec::new();
        let mut constraints = String::new();

        for column in table.columns.iter().filter(|c| !c.ignore) {
            let sql_type = mapper
                .sql_type(column)
                .ok_or_else(|| OrmError::UnknownType {
                    table:     table.name.clone(),
                    column:    column.title.clone(),
                    type_name: column.column_type_name.clone()
                })?;

            let mut definition = format!("{} {sql_type}", column.title);
            if column.unique {
                definition.push_str(" UNIQUE");
            }
            match mapper.inline_key(column) {
                Some(inline) => definition.push_str(inline),
                None if column.primary_key => deferred_keys.push(column.title.as_str()),
                None => {}
            }
            columns.push(definition);

            if column.foreign_key.is_foreign_key {
                constraints.push_str(&format!(
                    ", FOREIGN KEY ({}) REFERENCES {}({}) ON DELETE CASCADE",
                    column.title,
                    column.foreign_key.table_reference,
                    column.foreign_key.column_reference
                ));
            }
        }

        if !deferred_keys.is_empty() {
            constraints.push_str(&format!(", PRIMARY KEY ({})", deferred_keys.join(",")));
        }

        Ok(format!(
            "CREATE TABLE {} ({}{constraints})",
            table.name,
            columns.join(",")
        ))
    }

    /// `DROP TABLE`.
    #[must_use]
    pub fn drop(&self, table_name: &str) -> String {
        format!("DROP TABLE {table_name}")
    }

    /// `DROP TABLE IF EXISTS`, used by migrations that recreate a table.
    #[must_use]
    pub fn drop_if_exists(&self, table_name: &str) -> String {
        format!("DROP TABLE IF EXISTS {table_name}")
    }
}
